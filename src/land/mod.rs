//! 领地领域门面
//!
//! 采用贫血模型：
//! - **数据**: `LandAabb`、`LandPermTable`、`PlayerSettings` 等纯数据结构
//! - **服务**: `AabbService`、`LandRegistryService` 持有导入表并转发调用
//! - **句柄**: `Land` 只包含领地 ID，所有状态都在宿主侧

pub mod aabb;
pub mod handle;
pub mod perm;
pub mod registry;
pub mod types;

pub use aabb::{AabbService, LandAabb, AABB_SYMBOLS};
pub use handle::{CollisionQuery, Land, LandSymbols, LAND_SYMBOLS};
pub use perm::{EnvironmentPerms, LandPermTable, RoleEntry, RolePerms};
pub use registry::{
    LandAt, LandAtQuery, LandQuery, LandRef, LandRegistryService, RegistrySymbols,
    REGISTRY_SYMBOLS,
};
pub use types::{
    DimensionId, LandId, LandPermType, LandType, PlayerSettings, SettlementType, VersionMeta,
    INVALID_LAND_ID,
};
