//! 边界值模型
//!
//! 跨越边界的一切都是 `RemoteValue`：标量、扁平数组、坐标或不透明的玩家句柄。
//! 结构化载荷以 JSON 文本的形式放在 `RemoteValue::String` 中传递。

use crate::core::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 整数方块坐标及维度 id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub dimid: i32,
}

impl IntPos {
    pub const fn new(x: i32, y: i32, z: i32, dimid: i32) -> Self {
        Self { x, y, z, dimid }
    }
}

impl fmt::Display for IntPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}) @ {}", self.x, self.y, self.z, self.dimid)
    }
}

/// 浮点坐标及维度 id
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub dimid: i32,
}

impl FloatPos {
    pub const fn new(x: f64, y: f64, z: f64, dimid: i32) -> Self {
        Self { x, y, z, dimid }
    }
}

/// 宿主持有的玩家对象的不透明引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerHandle(pub u64);

/// `RemoteValue` 的运行时形状，用于签名和重载谓词
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Pos,
    FloatPos,
    Player,
    /// 通配，接受任何形状
    Any,
}

impl ValueKind {
    /// `value` 是否具有此形状
    pub fn accepts(self, value: &RemoteValue) -> bool {
        self == ValueKind::Any || value.kind() == self
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Pos => "pos",
            ValueKind::FloatPos => "float_pos",
            ValueKind::Player => "player",
            ValueKind::Any => "any",
        };
        f.write_str(name)
    }
}

/// 跨边界复制的值
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum RemoteValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<RemoteValue>),
    Pos(IntPos),
    FloatPos(FloatPos),
    Player(PlayerHandle),
}

impl RemoteValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            RemoteValue::Null => ValueKind::Null,
            RemoteValue::Bool(_) => ValueKind::Bool,
            RemoteValue::Int(_) | RemoteValue::Float(_) => ValueKind::Number,
            RemoteValue::String(_) => ValueKind::String,
            RemoteValue::Array(_) => ValueKind::Array,
            RemoteValue::Pos(_) => ValueKind::Pos,
            RemoteValue::FloatPos(_) => ValueKind::FloatPos,
            RemoteValue::Player(_) => ValueKind::Player,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RemoteValue::Null)
    }

    pub fn is_number(&self) -> bool {
        self.kind() == ValueKind::Number
    }

    pub fn is_pos(&self) -> bool {
        matches!(self, RemoteValue::Pos(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, RemoteValue::Array(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RemoteValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// 整数视图；接受取整数值的浮点数
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RemoteValue::Int(i) => Some(*i),
            RemoteValue::Float(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RemoteValue::Int(i) => Some(*i as f64),
            RemoteValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RemoteValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_pos(&self) -> Option<&IntPos> {
        match self {
            RemoteValue::Pos(p) => Some(p),
            _ => None,
        }
    }

    /// 提升解码后的 JSON 值。对象在边界上没有表示，以其 JSON 文本携带。
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RemoteValue::Null,
            serde_json::Value::Bool(b) => RemoteValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => RemoteValue::Int(i),
                None => RemoteValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => RemoteValue::String(s),
            serde_json::Value::Array(items) => {
                RemoteValue::Array(items.into_iter().map(Self::from_json).collect())
            }
            object @ serde_json::Value::Object(_) => RemoteValue::String(object.to_string()),
        }
    }

    fn mismatch(&self, expected: ValueKind) -> ConversionError {
        ConversionError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

// ============================================================================
// Rust -> 边界
// ============================================================================

impl From<()> for RemoteValue {
    fn from(_: ()) -> Self {
        RemoteValue::Null
    }
}

impl From<bool> for RemoteValue {
    fn from(value: bool) -> Self {
        RemoteValue::Bool(value)
    }
}

impl From<i32> for RemoteValue {
    fn from(value: i32) -> Self {
        RemoteValue::Int(value as i64)
    }
}

impl From<i64> for RemoteValue {
    fn from(value: i64) -> Self {
        RemoteValue::Int(value)
    }
}

impl From<f64> for RemoteValue {
    fn from(value: f64) -> Self {
        RemoteValue::Float(value)
    }
}

impl From<String> for RemoteValue {
    fn from(value: String) -> Self {
        RemoteValue::String(value)
    }
}

impl From<&str> for RemoteValue {
    fn from(value: &str) -> Self {
        RemoteValue::String(value.to_string())
    }
}

impl From<IntPos> for RemoteValue {
    fn from(value: IntPos) -> Self {
        RemoteValue::Pos(value)
    }
}

impl From<FloatPos> for RemoteValue {
    fn from(value: FloatPos) -> Self {
        RemoteValue::FloatPos(value)
    }
}

impl From<PlayerHandle> for RemoteValue {
    fn from(value: PlayerHandle) -> Self {
        RemoteValue::Player(value)
    }
}

impl<T: Into<RemoteValue>> From<Vec<T>> for RemoteValue {
    fn from(values: Vec<T>) -> Self {
        RemoteValue::Array(values.into_iter().map(Into::into).collect())
    }
}

/// Rust 类型作为参数传递时的静态形状
pub trait RemoteType {
    const KIND: ValueKind;
}

macro_rules! impl_remote_type {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(impl RemoteType for $ty {
            const KIND: ValueKind = ValueKind::$kind;
        })*
    };
}

impl_remote_type! {
    bool => Bool,
    i32 => Number,
    i64 => Number,
    f64 => Number,
    String => String,
    IntPos => Pos,
    FloatPos => FloatPos,
    PlayerHandle => Player,
    RemoteValue => Any,
}

impl RemoteType for &str {
    const KIND: ValueKind = ValueKind::String;
}

impl<T> RemoteType for Vec<T> {
    const KIND: ValueKind = ValueKind::Array;
}

/// 参数个数固定的参数元组
pub trait IntoArgs {
    const ARITY: usize;

    /// 按顺序声明的参数形状
    fn signature() -> Vec<ValueKind>;

    fn into_args(self) -> Vec<RemoteValue>;
}

macro_rules! impl_into_args {
    ($len:expr; $($name:ident),*) => {
        impl<$($name),*> IntoArgs for ($($name,)*)
        where
            $($name: Into<RemoteValue> + RemoteType),*
        {
            const ARITY: usize = $len;

            fn signature() -> Vec<ValueKind> {
                vec![$($name::KIND),*]
            }

            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<RemoteValue> {
                let ($($name,)*) = self;
                vec![$($name.into()),*]
            }
        }
    };
}

impl_into_args!(0;);
impl_into_args!(1; A);
impl_into_args!(2; A, B);
impl_into_args!(3; A, B, C);
impl_into_args!(4; A, B, C, D);
impl_into_args!(5; A, B, C, D, E);
impl_into_args!(6; A, B, C, D, E, F);

// ============================================================================
// 边界 -> Rust
// ============================================================================

/// 把返回值转换为 Rust 类型，可能失败
pub trait FromRemote: Sized {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError>;
}

/// 类型的单位值，远程调用成功但未携带值时使用
pub trait FromUnit {
    fn from_unit() -> Self;
}

impl FromRemote for RemoteValue {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl FromRemote for () {
    fn from_remote(_: RemoteValue) -> Result<Self, ConversionError> {
        Ok(())
    }
}

impl FromRemote for bool {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        value.as_bool().ok_or_else(|| value.mismatch(ValueKind::Bool))
    }
}

impl FromRemote for i64 {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        value.as_i64().ok_or_else(|| value.mismatch(ValueKind::Number))
    }
}

impl FromRemote for i32 {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        let wide = i64::from_remote(value)?;
        i32::try_from(wide).map_err(|_| ConversionError::OutOfRange {
            value: wide.to_string(),
            target: "i32",
        })
    }
}

impl FromRemote for f64 {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        value.as_f64().ok_or_else(|| value.mismatch(ValueKind::Number))
    }
}

impl FromRemote for String {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        match value {
            RemoteValue::String(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }
}

impl FromRemote for IntPos {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        match value {
            RemoteValue::Pos(p) => Ok(p),
            other => Err(other.mismatch(ValueKind::Pos)),
        }
    }
}

impl FromRemote for FloatPos {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        match value {
            RemoteValue::FloatPos(p) => Ok(p),
            RemoteValue::Pos(p) => Ok(FloatPos::new(p.x as f64, p.y as f64, p.z as f64, p.dimid)),
            other => Err(other.mismatch(ValueKind::FloatPos)),
        }
    }
}

impl FromRemote for PlayerHandle {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        match value {
            RemoteValue::Player(p) => Ok(p),
            other => Err(other.mismatch(ValueKind::Player)),
        }
    }
}

impl<T: FromRemote> FromRemote for Vec<T> {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        match value {
            RemoteValue::Array(items) => items.into_iter().map(T::from_remote).collect(),
            other => Err(other.mismatch(ValueKind::Array)),
        }
    }
}

/// `Null` 映射为 `None`
impl<T: FromRemote> FromRemote for Option<T> {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        match value {
            RemoteValue::Null => Ok(None),
            other => T::from_remote(other).map(Some),
        }
    }
}

impl FromUnit for () {
    fn from_unit() -> Self {}
}

impl FromUnit for RemoteValue {
    fn from_unit() -> Self {
        RemoteValue::Null
    }
}

impl<T> FromUnit for Option<T> {
    fn from_unit() -> Self {
        None
    }
}

impl<T> FromUnit for Vec<T> {
    fn from_unit() -> Self {
        Vec::new()
    }
}

/// 标量的单位值取其默认值
macro_rules! impl_from_unit_default {
    ($($ty:ty),*) => {
        $(
            impl FromUnit for $ty {
                fn from_unit() -> Self {
                    <$ty>::default()
                }
            }
        )*
    };
}

impl_from_unit_default!(bool, i32, i64, f64, String);
