//! 领地相关的基础类型
//!
//! 标识符、枚举与简单载荷。枚举在边界上既可能以数字出现，也可能以名字出现，
//! 两种形式都接受。

use crate::bindings::{FromRemote, FromUnit, RemoteType, RemoteValue, ValueKind};
use crate::core::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type DimensionId = i32;

/// 领地 ID，`-1` 表示不存在
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LandId(pub i64);

pub const INVALID_LAND_ID: LandId = LandId::INVALID;

impl LandId {
    pub const INVALID: LandId = LandId(-1);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// 哨兵值映射为 `None`
    pub fn valid(self) -> Option<LandId> {
        self.is_valid().then_some(self)
    }
}

impl fmt::Display for LandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LandId {
    fn from(id: i64) -> Self {
        LandId(id)
    }
}

impl From<LandId> for RemoteValue {
    fn from(id: LandId) -> Self {
        RemoteValue::Int(id.0)
    }
}

impl RemoteType for LandId {
    const KIND: ValueKind = ValueKind::Number;
}

impl FromRemote for LandId {
    fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
        i64::from_remote(value).map(LandId)
    }
}

impl FromUnit for LandId {
    fn from_unit() -> Self {
        LandId::INVALID
    }
}

/// 声明一个在边界上以数字或名字表示的枚举
macro_rules! remote_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($(#[$vmeta:meta])* $variant:ident = $code:literal),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn code(self) -> i64 {
                self as i64
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),*
                }
            }

            pub fn from_code(code: i64) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.code() == code)
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.name() == name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl From<$name> for RemoteValue {
            fn from(value: $name) -> Self {
                RemoteValue::Int(value.code())
            }
        }

        impl RemoteType for $name {
            const KIND: ValueKind = ValueKind::Number;
        }

        impl FromRemote for $name {
            fn from_remote(value: RemoteValue) -> Result<Self, ConversionError> {
                let found = match &value {
                    RemoteValue::String(name) => Self::from_name(name),
                    other => match other.as_i64() {
                        Some(code) => Self::from_code(code),
                        None => {
                            return Err(ConversionError::TypeMismatch {
                                expected: ValueKind::Number,
                                found: other.kind(),
                            })
                        }
                    },
                };
                found.ok_or_else(|| ConversionError::UnknownVariant {
                    target: stringify!($name),
                    value: match value {
                        RemoteValue::String(name) => name,
                        other => format!("{:?}", other),
                    },
                })
            }
        }
    };
}

remote_enum! {
    /// 玩家在领地中的权限类别
    pub enum LandPermType {
        Operator = 0,
        Owner = 1,
        Member = 2,
        Guest = 3,
    }
}

remote_enum! {
    /// 领地在父子关系中的位置
    pub enum LandType {
        /// 无父、无子
        Ordinary = 0,
        /// 无父、有子
        Parent = 1,
        /// 有父、有子
        Mix = 2,
        /// 有父、无子
        Sub = 3,
    }
}

remote_enum! {
    /// 调整领地范围时的结算方式
    pub enum SettlementType {
        NoChange = 0,
        Pay = 1,
        Refund = 2,
    }
}

/// 玩家个人设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerSettings {
    /// 进入领地时显示标题
    pub show_enter_land_title: bool,
    /// 持续显示底部提示
    pub show_bottom_continued_tip: bool,
}

/// 宿主插件的构建信息
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionMeta {
    #[serde(rename = "Commit")]
    pub commit: String,
    #[serde(rename = "Branch")]
    pub branch: String,
    #[serde(rename = "Tag")]
    pub tag: String,
}
