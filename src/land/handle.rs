//! 领地句柄
//!
//! `Land` 只持有领地 ID 和共享的导入表，每次访问都直接向宿主查询，
//! 客户端不缓存任何领地数据。

use super::aabb::LandAabb;
use super::perm::LandPermTable;
use super::types::{DimensionId, LandId, LandPermType, LandType};
use crate::bindings::{
    BindingRegistry, ImportTable, IntPos, Overload, OverloadSet, Procedure, RemoteValue,
    ValueKind,
};
use crate::core::{BindingResult, CallError, ConversionError, LdApiResult};
use std::fmt;
use std::sync::Arc;

/// 宿主导出的全部 `Land_*` 符号
pub const LAND_SYMBOLS: &[&str] = &[
    "Land_getAABB",
    "Land_getTeleportPos",
    "Land_setTeleportPos",
    "Land_getId",
    "Land_getDimensionId",
    "Land_getPermTable",
    "Land_setPermTable",
    "Land_getOwner",
    "Land_setOwner",
    "Land_getRawOwner",
    "Land_getMembers",
    "Land_addLandMember",
    "Land_removeLandMember",
    "Land_getName",
    "Land_setName",
    "Land_getOriginalBuyPrice",
    "Land_setOriginalBuyPrice",
    "Land_is3D",
    "Land_isOwner",
    "Land_isMember",
    "Land_isConvertedLand",
    "Land_isOwnerDataIsXUID",
    "Land_isCollision",
    "Land_isCollision2",
    "Land_isDirty",
    "Land_getType",
    "Land_hasParentLand",
    "Land_hasSubLand",
    "Land_isSubLand",
    "Land_isParentLand",
    "Land_isMixLand",
    "Land_isOrdinaryLand",
    "Land_canCreateSubLand",
    "Land_getParentLandID",
    "Land_getSubLandIDs",
    "Land_getNestedLevel",
    "Land_getPermType",
];

type ById<R> = Procedure<(LandId,), R>;
type ByIdWith<A, R> = Procedure<(LandId, A), R>;

/// `Land_*` 导入表，启动时绑定一次
pub struct LandSymbols {
    get_aabb: ById<Vec<IntPos>>,
    get_teleport_pos: ById<IntPos>,
    set_teleport_pos: ByIdWith<IntPos, ()>,
    get_id: ById<LandId>,
    get_dimension_id: ById<DimensionId>,
    get_perm_table: ById<String>,
    set_perm_table: ByIdWith<String, ()>,
    get_owner: ById<String>,
    set_owner: ByIdWith<String, ()>,
    get_raw_owner: ById<String>,
    get_members: ById<Vec<String>>,
    add_member: ByIdWith<String, ()>,
    remove_member: ByIdWith<String, ()>,
    get_name: ById<String>,
    set_name: ByIdWith<String, ()>,
    get_original_buy_price: ById<i64>,
    set_original_buy_price: ByIdWith<i64, ()>,
    is_3d: ById<bool>,
    is_owner: ByIdWith<String, bool>,
    is_member: ByIdWith<String, bool>,
    is_converted_land: ById<bool>,
    is_owner_data_xuid: ById<bool>,
    is_collision: OverloadSet,
    is_dirty: ById<bool>,
    get_type: ById<i64>,
    has_parent_land: ById<bool>,
    has_sub_land: ById<bool>,
    is_sub_land: ById<bool>,
    is_parent_land: ById<bool>,
    is_mix_land: ById<bool>,
    is_ordinary_land: ById<bool>,
    can_create_sub_land: ById<bool>,
    get_parent_land_id: ById<LandId>,
    get_sub_land_ids: ById<Vec<LandId>>,
    get_nested_level: ById<i32>,
    get_perm_type: ByIdWith<String, LandPermType>,
    imports: ImportTable,
}

impl LandSymbols {
    pub fn bind(registry: &BindingRegistry) -> BindingResult<Self> {
        let mut table = registry.table("Land");

        let collision_radius = table.import_raw(
            "Land_isCollision",
            vec![ValueKind::Number, ValueKind::Pos, ValueKind::Number],
        )?;
        let collision_area = table.import_raw(
            "Land_isCollision2",
            vec![ValueKind::Number, ValueKind::Pos, ValueKind::Pos],
        )?;
        let is_collision = OverloadSet::builder("Land.isCollision")
            .overload(Overload::kinds(
                "radius",
                vec![ValueKind::Number, ValueKind::Pos, ValueKind::Number],
                collision_radius,
            ))
            .overload(Overload::kinds(
                "area",
                vec![ValueKind::Number, ValueKind::Pos, ValueKind::Pos],
                collision_area,
            ))
            .build()?;

        Ok(Self {
            get_aabb: table.import("Land_getAABB")?,
            get_teleport_pos: table.import("Land_getTeleportPos")?,
            set_teleport_pos: table.import("Land_setTeleportPos")?,
            get_id: table.import("Land_getId")?,
            get_dimension_id: table.import("Land_getDimensionId")?,
            get_perm_table: table.import("Land_getPermTable")?,
            set_perm_table: table.import("Land_setPermTable")?,
            get_owner: table.import("Land_getOwner")?,
            set_owner: table.import("Land_setOwner")?,
            get_raw_owner: table.import("Land_getRawOwner")?,
            get_members: table.import("Land_getMembers")?,
            add_member: table.import("Land_addLandMember")?,
            remove_member: table.import("Land_removeLandMember")?,
            get_name: table.import("Land_getName")?,
            set_name: table.import("Land_setName")?,
            get_original_buy_price: table.import("Land_getOriginalBuyPrice")?,
            set_original_buy_price: table.import("Land_setOriginalBuyPrice")?,
            is_3d: table.import("Land_is3D")?,
            is_owner: table.import("Land_isOwner")?,
            is_member: table.import("Land_isMember")?,
            is_converted_land: table.import("Land_isConvertedLand")?,
            is_owner_data_xuid: table.import("Land_isOwnerDataIsXUID")?,
            is_collision,
            is_dirty: table.import("Land_isDirty")?,
            get_type: table.import("Land_getType")?,
            has_parent_land: table.import("Land_hasParentLand")?,
            has_sub_land: table.import("Land_hasSubLand")?,
            is_sub_land: table.import("Land_isSubLand")?,
            is_parent_land: table.import("Land_isParentLand")?,
            is_mix_land: table.import("Land_isMixLand")?,
            is_ordinary_land: table.import("Land_isOrdinaryLand")?,
            can_create_sub_land: table.import("Land_canCreateSubLand")?,
            get_parent_land_id: table.import("Land_getParentLandID")?,
            get_sub_land_ids: table.import("Land_getSubLandIDs")?,
            get_nested_level: table.import("Land_getNestedLevel")?,
            get_perm_type: table.import("Land_getPermType")?,
            imports: table.freeze(),
        })
    }

    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }
}

/// `Land.isCollision` 的两种查询形式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionQuery {
    /// 以 `center` 为中心、`radius` 为半径的立方体
    Radius { center: IntPos, radius: i32 },
    Area { min: IntPos, max: IntPos },
}

impl CollisionQuery {
    fn into_args(self) -> Vec<RemoteValue> {
        match self {
            CollisionQuery::Radius { center, radius } => vec![center.into(), radius.into()],
            CollisionQuery::Area { min, max } => vec![min.into(), max.into()],
        }
    }
}

/// 领地句柄
#[derive(Clone)]
pub struct Land {
    id: LandId,
    symbols: Arc<LandSymbols>,
}

impl Land {
    pub(crate) fn new(id: LandId, symbols: Arc<LandSymbols>) -> Self {
        Self { id, symbols }
    }

    /// 句柄持有的 ID，不访问宿主
    pub fn id(&self) -> LandId {
        self.id
    }

    /// 领地不存在时为 `None`
    pub fn aabb(&self) -> LdApiResult<Option<LandAabb>> {
        let pair = self.symbols.get_aabb.call((self.id,))?;
        if pair.is_empty() {
            return Ok(None);
        }
        let symbol = self.symbols.get_aabb.raw().symbol();
        Ok(Some(LandAabb::from_pair(symbol, pair)?))
    }

    pub fn teleport_pos(&self) -> LdApiResult<IntPos> {
        Ok(self.symbols.get_teleport_pos.call((self.id,))?)
    }

    pub fn set_teleport_pos(&self, pos: IntPos) -> LdApiResult<()> {
        Ok(self.symbols.set_teleport_pos.call((self.id, pos))?)
    }

    /// 宿主记录的 ID
    pub fn remote_id(&self) -> LdApiResult<LandId> {
        Ok(self.symbols.get_id.call((self.id,))?)
    }

    pub fn dimension_id(&self) -> LdApiResult<DimensionId> {
        Ok(self.symbols.get_dimension_id.call((self.id,))?)
    }

    pub fn perm_table(&self) -> LdApiResult<Option<LandPermTable>> {
        let text = self.symbols.get_perm_table.call((self.id,))?;
        Ok(LandPermTable::from_json(&text))
    }

    pub fn set_perm_table(&self, table: &LandPermTable) -> LdApiResult<()> {
        let text = table.to_json()?;
        Ok(self.symbols.set_perm_table.call((self.id, text))?)
    }

    pub fn owner(&self) -> LdApiResult<Option<String>> {
        Ok(non_empty(self.symbols.get_owner.call((self.id,))?))
    }

    pub fn set_owner(&self, owner: &str) -> LdApiResult<()> {
        Ok(self.symbols.set_owner.call((self.id, owner.to_string()))?)
    }

    /// 存储中的原始主人字段，可能是 XUID 也可能是 UUID
    pub fn raw_owner(&self) -> LdApiResult<Option<String>> {
        Ok(non_empty(self.symbols.get_raw_owner.call((self.id,))?))
    }

    pub fn members(&self) -> LdApiResult<Vec<String>> {
        Ok(self.symbols.get_members.call((self.id,))?)
    }

    pub fn add_member(&self, uuid: &str) -> LdApiResult<()> {
        Ok(self.symbols.add_member.call((self.id, uuid.to_string()))?)
    }

    pub fn remove_member(&self, uuid: &str) -> LdApiResult<()> {
        Ok(self.symbols.remove_member.call((self.id, uuid.to_string()))?)
    }

    pub fn name(&self) -> LdApiResult<String> {
        Ok(self.symbols.get_name.call((self.id,))?)
    }

    pub fn set_name(&self, name: &str) -> LdApiResult<()> {
        Ok(self.symbols.set_name.call((self.id, name.to_string()))?)
    }

    pub fn original_buy_price(&self) -> LdApiResult<i64> {
        Ok(self.symbols.get_original_buy_price.call((self.id,))?)
    }

    pub fn set_original_buy_price(&self, price: i64) -> LdApiResult<()> {
        Ok(self.symbols.set_original_buy_price.call((self.id, price))?)
    }

    pub fn is_3d(&self) -> LdApiResult<bool> {
        Ok(self.symbols.is_3d.call((self.id,))?)
    }

    pub fn is_owner(&self, uuid: &str) -> LdApiResult<bool> {
        Ok(self.symbols.is_owner.call((self.id, uuid.to_string()))?)
    }

    pub fn is_member(&self, uuid: &str) -> LdApiResult<bool> {
        Ok(self.symbols.is_member.call((self.id, uuid.to_string()))?)
    }

    pub fn is_converted_land(&self) -> LdApiResult<bool> {
        Ok(self.symbols.is_converted_land.call((self.id,))?)
    }

    pub fn is_owner_data_xuid(&self) -> LdApiResult<bool> {
        Ok(self.symbols.is_owner_data_xuid.call((self.id,))?)
    }

    pub fn is_collision(&self, query: CollisionQuery) -> LdApiResult<bool> {
        self.is_collision_dyn(query.into_args())
    }

    /// 未经类型检查的参数列表，由重载分派器决定调用哪个符号
    pub fn is_collision_dyn(&self, args: Vec<RemoteValue>) -> LdApiResult<bool> {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(RemoteValue::from(self.id));
        full.extend(args);
        Ok(self.symbols.is_collision.dispatch(full)?.convert()?)
    }

    /// 调用任意 setter 后为 `true`，直到宿主保存
    pub fn is_dirty(&self) -> LdApiResult<bool> {
        Ok(self.symbols.is_dirty.call((self.id,))?)
    }

    /// 领地不存在时为 `None`
    pub fn land_type(&self) -> LdApiResult<Option<LandType>> {
        let code = self.symbols.get_type.call((self.id,))?;
        if code == LandId::INVALID.0 {
            return Ok(None);
        }
        let land_type = LandType::from_code(code).ok_or_else(|| CallError::Conversion {
            symbol: self.symbols.get_type.raw().symbol().to_string(),
            source: ConversionError::UnknownVariant {
                target: "LandType",
                value: code.to_string(),
            },
        })?;
        Ok(Some(land_type))
    }

    pub fn has_parent_land(&self) -> LdApiResult<bool> {
        Ok(self.symbols.has_parent_land.call((self.id,))?)
    }

    pub fn has_sub_land(&self) -> LdApiResult<bool> {
        Ok(self.symbols.has_sub_land.call((self.id,))?)
    }

    pub fn is_sub_land(&self) -> LdApiResult<bool> {
        Ok(self.symbols.is_sub_land.call((self.id,))?)
    }

    pub fn is_parent_land(&self) -> LdApiResult<bool> {
        Ok(self.symbols.is_parent_land.call((self.id,))?)
    }

    pub fn is_mix_land(&self) -> LdApiResult<bool> {
        Ok(self.symbols.is_mix_land.call((self.id,))?)
    }

    pub fn is_ordinary_land(&self) -> LdApiResult<bool> {
        Ok(self.symbols.is_ordinary_land.call((self.id,))?)
    }

    /// 是否还满足嵌套层级限制
    pub fn can_create_sub_land(&self) -> LdApiResult<bool> {
        Ok(self.symbols.can_create_sub_land.call((self.id,))?)
    }

    pub fn parent_land(&self) -> LdApiResult<Option<Land>> {
        let id = self.symbols.get_parent_land_id.call((self.id,))?;
        Ok(id.valid().map(|id| self.sibling(id)))
    }

    pub fn sub_lands(&self) -> LdApiResult<Vec<Land>> {
        let ids = self.symbols.get_sub_land_ids.call((self.id,))?;
        Ok(ids.into_iter().map(|id| self.sibling(id)).collect())
    }

    /// 相对于根领地的嵌套层级
    pub fn nested_level(&self) -> LdApiResult<i32> {
        Ok(self.symbols.get_nested_level.call((self.id,))?)
    }

    pub fn perm_type(&self, uuid: &str) -> LdApiResult<LandPermType> {
        Ok(self.symbols.get_perm_type.call((self.id, uuid.to_string()))?)
    }

    fn sibling(&self, id: LandId) -> Land {
        Land::new(id, Arc::clone(&self.symbols))
    }
}

impl fmt::Debug for Land {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Land").field(&self.id).finish()
    }
}

/// 句柄按 ID 比较
impl PartialEq for Land {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Land {}

impl From<&Land> for LandId {
    fn from(land: &Land) -> Self {
        land.id
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}
