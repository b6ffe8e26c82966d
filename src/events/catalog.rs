//! 事件目录
//!
//! 宿主按固定顺序传递每个事件的参数。每个事件对应一个结构体，字段顺序即参数顺序。

use crate::bindings::{FromRemote, IntPos, PlayerHandle, RemoteValue};
use crate::core::ConversionError;
use crate::land::{LandId, LandType, SettlementType};

/// 可由宿主参数元组解码的事件
pub trait LandEvent: Sized + Send + 'static {
    const KIND: EventKind;

    fn from_args(args: Vec<RemoteValue>) -> Result<Self, ConversionError>;
}

macro_rules! count_fields {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count_fields!($($tail)*) };
}

macro_rules! define_events {
    ($(
        $(#[$meta:meta])*
        $kind:ident => $event:ident { $($field:ident: $ty:ty),* $(,)? }
    )*) => {
        /// 事件种类，名称与宿主侧一致
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum EventKind {
            $($kind),*
        }

        impl EventKind {
            pub const ALL: &'static [EventKind] = &[$(EventKind::$kind),*];

            pub fn name(self) -> &'static str {
                match self {
                    $(EventKind::$kind => stringify!($event)),*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|kind| kind.name() == name)
            }

            /// 宿主传递的参数个数
            pub fn arity(self) -> usize {
                match self {
                    $(EventKind::$kind => count_fields!($($field)*)),*
                }
            }
        }

        impl std::fmt::Display for EventKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq)]
            pub struct $event {
                $(pub $field: $ty),*
            }

            impl LandEvent for $event {
                const KIND: EventKind = EventKind::$kind;

                #[allow(unused_mut, unused_variables)]
                fn from_args(args: Vec<RemoteValue>) -> Result<Self, ConversionError> {
                    let expected = Self::KIND.arity();
                    if args.len() != expected {
                        return Err(ConversionError::Arity {
                            expected,
                            found: args.len(),
                        });
                    }
                    let mut args = args.into_iter();
                    Ok(Self {
                        $($field: <$ty>::from_remote(args.next().unwrap_or_default())?),*
                    })
                }
            }
        )*
    };
}

define_events! {
    /// 领地范围已改变
    LandResized => LandResizedEvent { land: LandId, min: IntPos, max: IntPos }
    MemberChanged => MemberChangedEvent { land: LandId, target: String, is_add: bool }
    OwnerChanged => OwnerChangedEvent { land: LandId, old_owner: String, new_owner: String }
    /// 退款未能送达
    LandRefundFailed => LandRefundFailedEvent { land: LandId, target: String, amount: i64 }

    /// `amount` 为差价，始终非负
    PlayerApplyLandRangeChangeBefore => PlayerApplyLandRangeChangeBeforeEvent {
        player: PlayerHandle,
        land: LandId,
        min: IntPos,
        max: IntPos,
        settlement: SettlementType,
        new_total_price: i64,
        amount: i64,
    }
    PlayerApplyLandRangeChangeAfter => PlayerApplyLandRangeChangeAfterEvent {
        player: PlayerHandle,
        land: LandId,
        min: IntPos,
        max: IntPos,
        settlement: SettlementType,
        new_total_price: i64,
        amount: i64,
    }

    PlayerBuyLandBefore => PlayerBuyLandBeforeEvent {
        player: PlayerHandle,
        pay_money: i64,
        land_type: LandType,
    }
    PlayerBuyLandAfter => PlayerBuyLandAfterEvent { player: PlayerHandle, land: LandId, pay_money: i64 }

    PlayerChangeLandMemberBefore => PlayerChangeLandMemberBeforeEvent {
        player: PlayerHandle,
        land: LandId,
        target: String,
        is_add: bool,
    }
    PlayerChangeLandMemberAfter => PlayerChangeLandMemberAfterEvent {
        player: PlayerHandle,
        land: LandId,
        target: String,
        is_add: bool,
    }

    PlayerChangeLandNameBefore => PlayerChangeLandNameBeforeEvent {
        player: PlayerHandle,
        land: LandId,
        new_name: String,
    }
    PlayerChangeLandNameAfter => PlayerChangeLandNameAfterEvent {
        player: PlayerHandle,
        land: LandId,
        new_name: String,
    }

    PlayerDeleteLandBefore => PlayerDeleteLandBeforeEvent { player: PlayerHandle, land: LandId }
    PlayerDeleteLandAfter => PlayerDeleteLandAfterEvent { player: PlayerHandle, land: LandId }

    PlayerEnterLand => PlayerEnterLandEvent { player: PlayerHandle, land: LandId }
    PlayerLeaveLand => PlayerLeaveLandEvent { player: PlayerHandle, land: LandId }

    PlayerRequestChangeLandRangeBefore => PlayerRequestChangeLandRangeBeforeEvent {
        player: PlayerHandle,
        land: LandId,
    }
    PlayerRequestChangeLandRangeAfter => PlayerRequestChangeLandRangeAfterEvent {
        player: PlayerHandle,
        land: LandId,
    }

    PlayerRequestCreateLand => PlayerRequestCreateLandEvent { player: PlayerHandle, land_type: LandType }

    PlayerTransferLandBefore => PlayerTransferLandBeforeEvent {
        player: PlayerHandle,
        land: LandId,
        new_owner: String,
    }
    PlayerTransferLandAfter => PlayerTransferLandAfterEvent {
        player: PlayerHandle,
        land: LandId,
        new_owner: String,
    }
}
