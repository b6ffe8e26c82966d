//! 统一错误处理模块
//!
//! 错误按照跨边界调用的失败方式分层：
//!
//! - **绑定错误** (`BindingError`): 启动时宿主缺少符号，属于版本不匹配，不可恢复
//! - **调用错误** (`CallError`): 宿主调用抛出异常或返回了无法转换的值
//! - **参数形状错误** (`DispatchError`): 没有任何重载匹配，属于调用方编程错误
//! - **编码错误** (`EncodingError`): 结构化载荷序列化/反序列化失败
//! - **监听器错误** (`ListenerError`): 宿主拒绝注册监听器
//!
//! 能用数据表达的失败（`Expected` 中的 Failure）通过返回值传播；
//! 静态误用（缺失符号、错误重载）立即以 `Err` 返回。

use crate::bindings::ValueKind;
use crate::config::ConfigError;
use thiserror::Error;

/// 客户端顶层错误类型
#[derive(Error, Debug)]
pub enum LdApiError {
    #[error("Binding error: {0}")]
    Binding(#[from] BindingError),

    #[error("Call error: {0}")]
    Call(#[from] CallError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Listener error: {0}")]
    Listener(#[from] ListenerError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Remote failure: {0}")]
    Remote(#[from] RemoteFailure),
}

/// 符号绑定错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("Symbol '{symbol}' is not exported by the host under namespace '{namespace}'")]
    MissingSymbol { namespace: String, symbol: String },

    #[error("Overload '{label}' supplies {supplied} argument(s) but '{symbol}' takes {expected}")]
    SignatureMismatch {
        label: &'static str,
        symbol: String,
        expected: usize,
        supplied: usize,
    },
}

/// 宿主侧抛出的异常
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// 远程调用错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error("Remote call '{symbol}' failed: {message}")]
    Host { symbol: String, message: String },

    #[error("Remote call '{symbol}' returned an unexpected value: {source}")]
    Conversion {
        symbol: String,
        #[source]
        source: ConversionError,
    },
}

/// 边界值转换错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: ValueKind, found: ValueKind },

    #[error("expected {expected} argument(s), found {found}")]
    Arity { expected: usize, found: usize },

    #[error("value {value} does not fit into {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("unknown {target} variant '{value}'")]
    UnknownVariant { target: &'static str, value: String },
}

/// 重载解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("Invalid arguments for '{operation}': {reason}")]
    InvalidArguments {
        operation: &'static str,
        reason: MismatchReason,
    },
}

/// 没有重载匹配的具体原因
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MismatchReason {
    #[error("no overload takes {found} argument(s)")]
    NoArity { found: usize },

    #[error("no overload accepts ({})", kind_list(.found))]
    NoShape { found: Vec<ValueKind> },

    #[error("positions lie in different dimensions ({first} and {second})")]
    DimensionMismatch { first: i32, second: i32 },
}

fn kind_list(kinds: &[ValueKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 结构化载荷编码错误
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed {what}: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// 事件监听器注册错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ListenerError {
    #[error("Failed to register listener for event {event}")]
    Rejected { event: String },

    #[error("Host refused to export listener '{key}' for event {event}")]
    Export { event: String, key: String },

    #[error(transparent)]
    Call(#[from] CallError),
}

/// `Expected` 解包失败时携带的宿主错误信息
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteFailure {
    pub message: String,
}

impl RemoteFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 结果类型别名
pub type LdApiResult<T> = Result<T, LdApiError>;
pub type BindingResult<T> = Result<T, BindingError>;
pub type CallResult<T> = Result<T, CallError>;
