//! JSON 文本载荷
//!
//! 结构化值以 JSON 文本跨越边界。宿主用空字符串表示“不存在”。

use crate::core::EncodingError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode<T: Serialize>(what: &'static str, value: &T) -> Result<String, EncodingError> {
    serde_json::to_string(value).map_err(|source| EncodingError::Serialize { what, source })
}

pub fn decode<T: DeserializeOwned>(what: &'static str, text: &str) -> Result<T, EncodingError> {
    serde_json::from_str(text).map_err(|source| EncodingError::Malformed { what, source })
}

/// 解码 `text`，空文本和格式错误的文本都映射为 `None`。
/// 格式错误会写日志。
pub fn decode_or_log<T: DeserializeOwned>(what: &'static str, text: &str) -> Option<T> {
    if text.is_empty() {
        return None;
    }
    match decode(what, text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(target: "ldapi.codec", "{}: {}", e, text);
            None
        }
    }
}
