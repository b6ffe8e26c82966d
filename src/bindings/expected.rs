//! `Expected<T>`：远程操作的成功或失败结果
//!
//! 宿主以自描述文本回答可能失败的操作：
//!
//! ```text
//! {"ok":true}                     无值成功
//! {"ok":true,"value":...}         带值成功
//! {"ok":false,"error":"..."}      失败
//! ```
//!
//! 失败一经产生便保持为失败：`map` 不会在失败上调用闭包，原始信息原样传递。
//! 组合子对任意 `T` 可用；无值成功时，若 `T` 实现了 [`FromUnit`]，
//! 则以其单位值参与 `unwrap`/`map`。

use super::codec;
use super::value::{FromRemote, FromUnit, RemoteValue};
use crate::core::RemoteFailure;
use serde::Deserialize;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// 远程操作的原始结果
#[derive(Debug, Clone, PartialEq)]
pub enum RpcOutcome<T> {
    /// 无返回值的操作为 `None`
    Success(Option<T>),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expected<T> {
    outcome: RpcOutcome<T>,
    /// 无值成功时使用的单位值，仅当 `T: FromUnit` 时存在
    unit: Option<T>,
}

#[derive(Deserialize)]
struct WireOutcome {
    ok: bool,
    #[serde(default)]
    value: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

impl<T> Expected<T> {
    pub fn new(outcome: RpcOutcome<T>) -> Self {
        Self { outcome, unit: None }
    }

    pub fn success(value: T) -> Self {
        Self::new(RpcOutcome::Success(Some(value)))
    }

    /// 无值成功，且 `T` 没有单位值
    pub fn empty() -> Self {
        Self::new(RpcOutcome::Success(None))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(RpcOutcome::Failure(message.into()))
    }

    pub fn outcome(&self) -> &RpcOutcome<T> {
        &self.outcome
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, RpcOutcome::Success(_))
    }

    pub fn has_value(&self) -> bool {
        matches!(self.outcome, RpcOutcome::Success(Some(_)))
    }

    pub fn has_error(&self) -> bool {
        matches!(self.outcome, RpcOutcome::Failure(_))
    }

    pub fn value(&self) -> Option<&T> {
        match &self.outcome {
            RpcOutcome::Success(value) => value.as_ref(),
            RpcOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            RpcOutcome::Failure(message) => Some(message),
            RpcOutcome::Success(_) => None,
        }
    }

    pub fn into_result(self) -> Result<Option<T>, RemoteFailure> {
        match self.outcome {
            RpcOutcome::Success(value) => Ok(value),
            RpcOutcome::Failure(message) => Err(RemoteFailure::new(message)),
        }
    }

    /// 取出成功值；无值成功返回单位值。
    ///
    /// 失败返回原始信息。无值成功而 `T` 没有单位值时同样返回错误。
    pub fn unwrap(self) -> Result<T, RemoteFailure> {
        match self.outcome {
            RpcOutcome::Success(Some(value)) => Ok(value),
            RpcOutcome::Success(None) => self
                .unit
                .ok_or_else(|| RemoteFailure::new("success carries no value")),
            RpcOutcome::Failure(message) => Err(RemoteFailure::new(message)),
        }
    }

    /// 失败时返回 `default`；无值成功且没有单位值时也返回 `default`
    pub fn unwrap_or(self, default: T) -> T {
        self.unwrap().unwrap_or(default)
    }

    /// 变换成功值。
    ///
    /// 带值成功时 `f` 在 `catch_unwind` 中执行，panic 变为携带 panic 信息的失败。
    /// 默认的 panic hook 仍会把这次 panic 打印到 stderr。
    ///
    /// 无值成功时以单位值调用 `f`，这一分支不捕获 panic；没有单位值则结果仍是无值成功。
    pub fn map<U, F>(self, f: F) -> Expected<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.outcome {
            RpcOutcome::Failure(message) => Expected::failure(message),
            RpcOutcome::Success(None) => match self.unit {
                Some(unit) => Expected::success(f(unit)),
                None => Expected::empty(),
            },
            RpcOutcome::Success(Some(value)) => {
                match panic::catch_unwind(AssertUnwindSafe(move || f(value))) {
                    Ok(mapped) => Expected::success(mapped),
                    Err(payload) => Expected::failure(panic_message(payload.as_ref())),
                }
            }
        }
    }

    /// 与 [`map`](Self::map) 相同，用于可能失败的变换
    pub fn try_map<U, E, F>(self, f: F) -> Expected<U>
    where
        E: std::fmt::Display,
        F: FnOnce(T) -> Result<U, E>,
    {
        let value = match self.outcome {
            RpcOutcome::Failure(message) => return Expected::failure(message),
            RpcOutcome::Success(Some(value)) => value,
            RpcOutcome::Success(None) => match self.unit {
                Some(unit) => unit,
                None => return Expected::empty(),
            },
        };
        match f(value) {
            Ok(mapped) => Expected::success(mapped),
            Err(e) => Expected::failure(e.to_string()),
        }
    }
}

impl<T: FromUnit> Expected<T> {
    /// 无值成功，携带 `T::from_unit()`
    pub fn unit() -> Self {
        Self {
            outcome: RpcOutcome::Success(None),
            unit: Some(T::from_unit()),
        }
    }
}

impl<T: FromRemote + FromUnit> Expected<T> {
    /// 解码宿主返回的结果文本，无法解码的内容记为失败并写日志
    pub fn from_remote(value: RemoteValue) -> Self {
        let text = match value {
            RemoteValue::String(text) => text,
            other => {
                tracing::error!(
                    target: "ldapi.codec",
                    "RPC result must be text, got {}",
                    other.kind()
                );
                return Self::failure(format!(
                    "malformed RPC result: expected text, got {}",
                    other.kind()
                ));
            }
        };

        let wire: WireOutcome = match codec::decode("RPC result", &text) {
            Ok(wire) => wire,
            Err(e) => {
                tracing::error!(target: "ldapi.codec", "{}: {}", e, text);
                return Self::failure(e.to_string());
            }
        };

        if !wire.ok {
            return Self::failure(wire.error.unwrap_or_else(|| "unknown error".to_string()));
        }

        match wire.value {
            None => Self::unit(),
            Some(json) => match T::from_remote(RemoteValue::from_json(json)) {
                Ok(value) => Self::success(value),
                Err(e) => {
                    tracing::error!(target: "ldapi.codec", "RPC result value: {}: {}", e, text);
                    Self::failure(format!("malformed RPC result value: {}", e))
                }
            },
        }
    }
}

impl<T> From<RemoteFailure> for Expected<T> {
    fn from(failure: RemoteFailure) -> Self {
        Self::failure(failure.message)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
