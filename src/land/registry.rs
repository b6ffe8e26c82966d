//! 领地注册表
//!
//! 全局领地查询入口。`get_lands` 与 `get_land_at` 对应宿主的多个重载符号，
//! 由 [`OverloadSet`] 按参数形状选择；强类型查询先降级为参数列表，再走同一个分派器。

use super::aabb::LandAabb;
use super::handle::{Land, LandSymbols};
use super::types::{DimensionId, LandId, LandPermType, PlayerSettings, VersionMeta};
use crate::bindings::{
    codec, BindingRegistry, Expected, ImportTable, IntPos, Overload, OverloadSet, Procedure,
    RemoteValue, ValueKind,
};
use crate::core::{BindingResult, DispatchError, LdApiResult, MismatchReason};
use std::sync::Arc;

/// 宿主导出的全部 `LandRegistry_*` 符号以及版本查询
pub const REGISTRY_SYMBOLS: &[&str] = &[
    "LandRegistry_isOperator",
    "LandRegistry_addOperator",
    "LandRegistry_removeOperator",
    "LandRegistry_getOperators",
    "LandRegistry_getOrCreatePlayerSettings",
    "LandRegistry_getLand",
    "LandRegistry_hasLand",
    "LandRegistry_getLands",
    "LandRegistry_getLands1",
    "LandRegistry_getLands2",
    "LandRegistry_getLands3",
    "LandRegistry_getLands4",
    "LandRegistry_getPermType",
    "LandRegistry_getLandAt",
    "LandRegistry_getLandAt1",
    "LandRegistry_getLandAt2",
    "LandRegistry_refreshLandRange",
    "PLand_getVersionMeta",
    "LandRegistry_removeOrdinaryLand",
    "LandRegistry_addOrdinaryLand",
];

const GET_LANDS: &str = "LandRegistry.getLands";
const GET_LAND_AT: &str = "LandRegistry.getLandAt";

pub struct RegistrySymbols {
    is_operator: Procedure<(String,), bool>,
    add_operator: Procedure<(String,), bool>,
    remove_operator: Procedure<(String,), bool>,
    get_operators: Procedure<(), Vec<String>>,
    get_or_create_player_settings: Procedure<(String,), String>,
    get_land: Procedure<(LandId,), LandId>,
    has_land: Procedure<(LandId,), bool>,
    get_lands: OverloadSet,
    get_perm_type: Procedure<(String, LandId, bool), LandPermType>,
    get_land_at: OverloadSet,
    refresh_land_range: Procedure<(LandId,), ()>,
    get_version_meta: Procedure<(), String>,
    remove_ordinary_land: Procedure<(LandId,), RemoteValue>,
    add_ordinary_land: Procedure<(Vec<IntPos>, bool, String), RemoteValue>,
    imports: ImportTable,
}

impl RegistrySymbols {
    pub fn bind(registry: &BindingRegistry) -> BindingResult<Self> {
        let mut table = registry.table("LandRegistry");

        let all = table.import_raw("LandRegistry_getLands", vec![])?;
        let by_dimension = table.import_raw("LandRegistry_getLands1", vec![ValueKind::Number])?;
        let by_owner = table.import_raw(
            "LandRegistry_getLands2",
            vec![ValueKind::String, ValueKind::Bool],
        )?;
        let by_owner_dimension = table.import_raw(
            "LandRegistry_getLands3",
            vec![ValueKind::String, ValueKind::Number],
        )?;
        let by_ids = table.import_raw("LandRegistry_getLands4", vec![ValueKind::Array])?;

        let get_lands = OverloadSet::builder(GET_LANDS)
            .overload(Overload::kinds("all", vec![], all))
            .overload(Overload::custom("ids", 1, is_id_list, by_ids))
            .overload(Overload::kinds("dimension", vec![ValueKind::Number], by_dimension))
            .overload(
                Overload::kinds("owner", vec![ValueKind::String], by_owner.clone())
                    .with_default(false),
            )
            .overload(Overload::kinds(
                "owner_shared",
                vec![ValueKind::String, ValueKind::Bool],
                by_owner,
            ))
            .overload(Overload::kinds(
                "owner_dimension",
                vec![ValueKind::String, ValueKind::Number],
                by_owner_dimension,
            ))
            .build()?;

        let point = table.import_raw("LandRegistry_getLandAt", vec![ValueKind::Pos])?;
        let radius = table.import_raw(
            "LandRegistry_getLandAt1",
            vec![ValueKind::Pos, ValueKind::Number],
        )?;
        let area = table.import_raw(
            "LandRegistry_getLandAt2",
            vec![ValueKind::Pos, ValueKind::Pos],
        )?;

        let get_land_at = OverloadSet::builder(GET_LAND_AT)
            .overload(Overload::kinds("point", vec![ValueKind::Pos], point))
            .overload(Overload::kinds(
                "radius",
                vec![ValueKind::Pos, ValueKind::Number],
                radius,
            ))
            .overload(Overload::kinds("area", vec![ValueKind::Pos, ValueKind::Pos], area))
            .build()?;

        Ok(Self {
            is_operator: table.import("LandRegistry_isOperator")?,
            add_operator: table.import("LandRegistry_addOperator")?,
            remove_operator: table.import("LandRegistry_removeOperator")?,
            get_operators: table.import("LandRegistry_getOperators")?,
            get_or_create_player_settings: table.import("LandRegistry_getOrCreatePlayerSettings")?,
            get_land: table.import("LandRegistry_getLand")?,
            has_land: table.import("LandRegistry_hasLand")?,
            get_lands,
            get_perm_type: table.import("LandRegistry_getPermType")?,
            get_land_at,
            refresh_land_range: table.import("LandRegistry_refreshLandRange")?,
            get_version_meta: table.import("PLand_getVersionMeta")?,
            remove_ordinary_land: table.import("LandRegistry_removeOrdinaryLand")?,
            add_ordinary_land: table.import("LandRegistry_addOrdinaryLand")?,
            imports: table.freeze(),
        })
    }

    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }
}

fn is_id_list(args: &[RemoteValue]) -> bool {
    match &args[0] {
        RemoteValue::Array(items) => items.iter().all(RemoteValue::is_number),
        _ => false,
    }
}

/// `get_lands` 的强类型查询
#[derive(Debug, Clone, PartialEq)]
pub enum LandQuery {
    All,
    Ids(Vec<LandId>),
    Dimension(DimensionId),
    /// `include_shared` 为 `None` 时按 `false` 处理
    Owner {
        uuid: String,
        include_shared: Option<bool>,
    },
    OwnerInDimension {
        uuid: String,
        dimension: DimensionId,
    },
}

impl LandQuery {
    pub fn owner(uuid: impl Into<String>) -> Self {
        LandQuery::Owner {
            uuid: uuid.into(),
            include_shared: None,
        }
    }

    pub fn into_args(self) -> Vec<RemoteValue> {
        match self {
            LandQuery::All => vec![],
            LandQuery::Ids(ids) => vec![ids.into()],
            LandQuery::Dimension(dimension) => vec![dimension.into()],
            LandQuery::Owner {
                uuid,
                include_shared: None,
            } => vec![uuid.into()],
            LandQuery::Owner {
                uuid,
                include_shared: Some(shared),
            } => vec![uuid.into(), shared.into()],
            LandQuery::OwnerInDimension { uuid, dimension } => vec![uuid.into(), dimension.into()],
        }
    }
}

/// `get_land_at` 的强类型查询
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandAtQuery {
    Point(IntPos),
    Radius { center: IntPos, radius: i32 },
    /// 两个坐标必须位于同一维度
    Area { min: IntPos, max: IntPos },
}

impl LandAtQuery {
    pub fn into_args(self) -> Vec<RemoteValue> {
        match self {
            LandAtQuery::Point(pos) => vec![pos.into()],
            LandAtQuery::Radius { center, radius } => vec![center.into(), radius.into()],
            LandAtQuery::Area { min, max } => vec![min.into(), max.into()],
        }
    }
}

/// `get_land_at` 的结果：单点查询至多一个领地，范围查询为列表
#[derive(Debug, Clone, PartialEq)]
pub enum LandAt {
    Single(Option<Land>),
    Many(Vec<Land>),
}

impl LandAt {
    pub fn into_vec(self) -> Vec<Land> {
        match self {
            LandAt::Single(land) => land.into_iter().collect(),
            LandAt::Many(lands) => lands,
        }
    }
}

/// 领地注册表服务
#[derive(Clone)]
pub struct LandRegistryService {
    symbols: Arc<RegistrySymbols>,
    lands: Arc<LandSymbols>,
}

impl LandRegistryService {
    pub fn new(symbols: Arc<RegistrySymbols>, lands: Arc<LandSymbols>) -> Self {
        Self { symbols, lands }
    }

    /// 不访问宿主，只构造句柄
    pub fn land(&self, id: LandId) -> Land {
        Land::new(id, Arc::clone(&self.lands))
    }

    pub fn is_operator(&self, uuid: &str) -> LdApiResult<bool> {
        Ok(self.symbols.is_operator.call((uuid.to_string(),))?)
    }

    pub fn add_operator(&self, uuid: &str) -> LdApiResult<bool> {
        Ok(self.symbols.add_operator.call((uuid.to_string(),))?)
    }

    pub fn remove_operator(&self, uuid: &str) -> LdApiResult<bool> {
        Ok(self.symbols.remove_operator.call((uuid.to_string(),))?)
    }

    pub fn operators(&self) -> LdApiResult<Vec<String>> {
        Ok(self.symbols.get_operators.call(())?)
    }

    /// 无效的 UUID 或无法解析的设置返回 `None`
    pub fn player_settings(&self, uuid: &str) -> LdApiResult<Option<PlayerSettings>> {
        let text = self
            .symbols
            .get_or_create_player_settings
            .call((uuid.to_string(),))?;
        Ok(codec::decode_or_log("player settings", &text))
    }

    pub fn has_land(&self, id: LandId) -> LdApiResult<bool> {
        Ok(self.symbols.has_land.call((id,))?)
    }

    /// 创建并添加一个普通领地
    ///
    /// `min` 与 `max` 不在同一维度时直接返回错误，不会调用宿主。
    /// 宿主拒绝创建（例如范围冲突）时返回失败的 `Expected`。
    pub fn create_and_add_ordinary_land(
        &self,
        aabb: &LandAabb,
        is_3d: bool,
        owner: &str,
    ) -> LdApiResult<Expected<Land>> {
        if !aabb.is_same_dimension() {
            return Err(DispatchError::InvalidArguments {
                operation: "LandRegistry.createAndAddOrdinaryLand",
                reason: MismatchReason::DimensionMismatch {
                    first: aabb.min.dimid,
                    second: aabb.max.dimid,
                },
            }
            .into());
        }

        let result = self.symbols.add_ordinary_land.call((
            vec![aabb.min, aabb.max],
            is_3d,
            owner.to_string(),
        ))?;
        let lands = Arc::clone(&self.lands);
        Ok(Expected::<LandId>::from_remote(result).map(move |id| Land::new(id, lands)))
    }

    /// 移除普通领地，接受句柄或 ID
    pub fn remove_ordinary_land<'a>(&self, land: impl Into<LandRef<'a>>) -> LdApiResult<Expected<()>> {
        let id = land.into().id();
        let result = self.symbols.remove_ordinary_land.call((id,))?;
        Ok(Expected::from_remote(result))
    }

    pub fn get_land(&self, id: LandId) -> LdApiResult<Option<Land>> {
        let id = self.symbols.get_land.call((id,))?;
        Ok(id.valid().map(|id| self.land(id)))
    }

    pub fn get_lands(&self, query: LandQuery) -> LdApiResult<Vec<Land>> {
        self.get_lands_dyn(query.into_args())
    }

    /// 未经类型检查的参数列表；没有重载接受时返回 [`DispatchError`]
    pub fn get_lands_dyn(&self, args: Vec<RemoteValue>) -> LdApiResult<Vec<Land>> {
        let ids: Vec<LandId> = self.symbols.get_lands.dispatch(args)?.convert()?;
        Ok(self.handles(ids))
    }

    pub fn get_land_at(&self, query: LandAtQuery) -> LdApiResult<LandAt> {
        self.get_land_at_dyn(query.into_args())
    }

    pub fn get_land_at_dyn(&self, args: Vec<RemoteValue>) -> LdApiResult<LandAt> {
        if let [RemoteValue::Pos(first), RemoteValue::Pos(second)] = args.as_slice() {
            if first.dimid != second.dimid {
                tracing::warn!(
                    target: "ldapi.dispatch",
                    "{}: area corners in dimensions {} and {}",
                    GET_LAND_AT,
                    first.dimid,
                    second.dimid
                );
                return Err(DispatchError::InvalidArguments {
                    operation: GET_LAND_AT,
                    reason: MismatchReason::DimensionMismatch {
                        first: first.dimid,
                        second: second.dimid,
                    },
                }
                .into());
            }
        }

        let dispatched = self.symbols.get_land_at.dispatch(args)?;
        if dispatched.label == "point" {
            let id: LandId = dispatched.convert()?;
            return Ok(LandAt::Single(id.valid().map(|id| self.land(id))));
        }
        let ids: Vec<LandId> = dispatched.convert()?;
        Ok(LandAt::Many(self.handles(ids)))
    }

    /// 玩家的权限类别；`land` 为 `LandId(0)` 时只判断全局身份
    pub fn perm_type(
        &self,
        uuid: &str,
        land: LandId,
        include_operator: bool,
    ) -> LdApiResult<LandPermType> {
        Ok(self
            .symbols
            .get_perm_type
            .call((uuid.to_string(), land, include_operator))?)
    }

    pub fn refresh_land_range(&self, land: &Land) -> LdApiResult<()> {
        Ok(self.symbols.refresh_land_range.call((land.id(),))?)
    }

    pub fn version_meta(&self) -> LdApiResult<Option<VersionMeta>> {
        let text = self.symbols.get_version_meta.call(())?;
        Ok(codec::decode_or_log("version meta", &text))
    }

    fn handles(&self, ids: Vec<LandId>) -> Vec<Land> {
        ids.into_iter().map(|id| self.land(id)).collect()
    }
}

/// 领地句柄或裸 ID
#[derive(Debug, Clone, Copy)]
pub enum LandRef<'a> {
    Handle(&'a Land),
    Id(LandId),
}

impl LandRef<'_> {
    pub fn id(self) -> LandId {
        match self {
            LandRef::Handle(land) => land.id(),
            LandRef::Id(id) => id,
        }
    }
}

impl<'a> From<&'a Land> for LandRef<'a> {
    fn from(land: &'a Land) -> Self {
        LandRef::Handle(land)
    }
}

impl From<LandId> for LandRef<'_> {
    fn from(id: LandId) -> Self {
        LandRef::Id(id)
    }
}
