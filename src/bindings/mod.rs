//! 边界绑定层
//!
//! 通过宿主的动态类型远程调用接口与其通信所需的一切：
//! 值模型、符号绑定、结果类型与重载分派。
//!
//! 架构:
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Facades                           │
//! │  ┌─────────┐  ┌──────────────┐  ┌─────────┐  ┌─────────┐   │
//! │  │  Land   │  │ LandRegistry │  │LandAABB │  │ Events  │   │
//! │  └────┬────┘  └──────┬───────┘  └────┬────┘  └────┬────┘   │
//! │       │              │               │            │         │
//! │       v              v               v            v         │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │   OverloadSet (first match)   Expected<T> (results) │   │
//! │  └───────────────────────┬─────────────────────────────┘   │
//! │                          │                                  │
//! │                          v                                  │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │   BindingRegistry -> Procedure<A, R> / ImportTable  │   │
//! │  └───────────────────────┬─────────────────────────────┘   │
//! │                          │                                  │
//! │                          v                                  │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │        Host trait (call / export, blocking)         │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod codec;
pub mod expected;
pub mod host;
pub mod local;
pub mod overload;
pub mod registry;
pub mod value;


pub use expected::{Expected, RpcOutcome};
pub use host::{Host, HostFunction};
pub use local::LocalHost;
pub use overload::{ArgPredicate, Dispatched, Overload, OverloadSet, OverloadSetBuilder};
pub use registry::{
    BindingRegistry, ImportTable, ImportTableBuilder, Procedure, RawProcedure,
    RemoteProcedureBinding,
};
pub use value::{
    FloatPos, FromRemote, FromUnit, IntPos, IntoArgs, PlayerHandle, RemoteType, RemoteValue,
    ValueKind,
};
