//! 核心模块
//!
//! 包含客户端的基础设施：
//! - `error` - 错误类型定义
//! - `logging` - tracing 日志初始化
//! - `macros` - 通用宏

pub mod error;
pub mod logging;
#[macro_use]
pub mod macros;

// 重新导出错误类型
pub use error::{
    BindingError, BindingResult, CallError, CallResult, ConversionError, DispatchError,
    EncodingError, HostError, LdApiError, LdApiResult, ListenerError, MismatchReason,
    RemoteFailure,
};
