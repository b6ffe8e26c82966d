//! 边界本身
//!
//! `Host` 把 `(namespace, name)` 解析为可调用过程，并接受客户端反向导出的函数。
//! 所有调用都是同步的：宿主产生结果后控制权才返回调用方。

use super::value::RemoteValue;
use crate::core::HostError;
use std::sync::Arc;

/// 可双向跨边界调用的函数
pub type HostFunction =
    Arc<dyn Fn(Vec<RemoteValue>) -> Result<RemoteValue, HostError> + Send + Sync>;

/// 宿主程序的远程调用接口
pub trait Host: Send + Sync {
    /// `namespace::name` 当前是否可调用
    fn has_function(&self, namespace: &str, name: &str) -> bool;

    /// 以给定参数调用 `namespace::name`
    fn call(
        &self,
        namespace: &str,
        name: &str,
        args: Vec<RemoteValue>,
    ) -> Result<RemoteValue, HostError>;

    /// 以 `namespace::name` 导出客户端函数供宿主调用。
    /// 名称已被占用时返回 `false`。
    fn export(&self, namespace: &str, name: &str, function: HostFunction) -> bool;
}
