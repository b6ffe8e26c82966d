//! 进程内宿主
//!
//! `LocalHost` 维护名称到函数的表。嵌入方注册的过程与客户端导出的函数共用这张表，
//! 宿主一侧用普通的 `call` 即可调到导出的回调。

use super::host::{Host, HostFunction};
use super::value::RemoteValue;
use crate::core::HostError;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

type FunctionKey = (String, String);

#[derive(Default)]
pub struct LocalHost {
    functions: RwLock<HashMap<FunctionKey, HostFunction>>,
}

impl LocalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册宿主函数（同名覆盖）
    pub fn register<F>(&self, namespace: &str, name: &str, function: F)
    where
        F: Fn(Vec<RemoteValue>) -> Result<RemoteValue, HostError> + Send + Sync + 'static,
    {
        self.functions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((namespace.to_string(), name.to_string()), Arc::new(function));
    }

    /// 批量注册同一个实现
    pub fn register_all<F>(&self, namespace: &str, names: &[&str], function: F)
    where
        F: Fn(Vec<RemoteValue>) -> Result<RemoteValue, HostError> + Send + Sync + 'static,
    {
        let function: HostFunction = Arc::new(function);
        let mut functions = self
            .functions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for name in names {
            functions.insert(
                (namespace.to_string(), name.to_string()),
                Arc::clone(&function),
            );
        }
    }

    /// 某个命名空间下已注册的函数名（排序后）
    pub fn exported(&self, namespace: &str) -> Vec<String> {
        let functions = self.functions.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = functions
            .keys()
            .filter(|(ns, _)| ns == namespace)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, namespace: &str, name: &str) -> Option<HostFunction> {
        self.functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }
}

impl Host for LocalHost {
    fn has_function(&self, namespace: &str, name: &str) -> bool {
        self.lookup(namespace, name).is_some()
    }

    fn call(
        &self,
        namespace: &str,
        name: &str,
        args: Vec<RemoteValue>,
    ) -> Result<RemoteValue, HostError> {
        // 锁在调用前释放，被调函数可以重入宿主
        let function = self
            .lookup(namespace, name)
            .ok_or_else(|| HostError::new(format!("Function '{namespace}::{name}' not found")))?;
        function(args)
    }

    fn export(&self, namespace: &str, name: &str, function: HostFunction) -> bool {
        let mut functions = self
            .functions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let key = (namespace.to_string(), name.to_string());
        if functions.contains_key(&key) {
            return false;
        }
        functions.insert(key, function);
        true
    }
}
