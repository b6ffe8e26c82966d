//! 领地权限表
//!
//! 权限表以 JSON 文本穿过边界，字段名为 camelCase。缺失的字段取默认值（全部禁止），
//! 以兼容宿主新增或删除字段。

use crate::bindings::codec;
use crate::core::EncodingError;
use serde::{Deserialize, Serialize};

/// 环境权限：与玩家无关的世界行为
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentPerms {
    pub allow_fire_spread: bool,
    pub allow_monster_spawn: bool,
    pub allow_animal_spawn: bool,
    /// 实体破坏、拾取、放置方块
    pub allow_mob_grief: bool,
    pub allow_explode: bool,
    pub allow_farm_decay: bool,
    /// 活塞推动边界方块
    pub allow_piston_push_on_boundary: bool,
    pub allow_redstone_update: bool,
    pub allow_block_fall: bool,
    pub allow_wither_destroy: bool,
    /// 苔藓蔓延
    pub allow_moss_growth: bool,
    pub allow_liquid_flow: bool,
    pub allow_dragon_egg_teleport: bool,
    pub allow_sculk_block_growth: bool,
    pub allow_sculk_spread: bool,
    pub allow_lightning_bolt: bool,
}

/// 一项角色权限对成员与访客分别生效
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleEntry {
    pub member: bool,
    pub guest: bool,
}

impl RoleEntry {
    pub const fn new(member: bool, guest: bool) -> Self {
        Self { member, guest }
    }
}

/// 角色权限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RolePerms {
    pub allow_destroy: RoleEntry,
    pub allow_place: RoleEntry,
    pub use_bucket: RoleEntry,
    pub use_axe: RoleEntry,
    pub use_hoe: RoleEntry,
    pub use_shovel: RoleEntry,
    pub place_boat: RoleEntry,
    pub place_minecart: RoleEntry,
    pub use_button: RoleEntry,
    pub use_door: RoleEntry,
    pub use_fence_gate: RoleEntry,
    pub allow_interact_entity: RoleEntry,
    pub use_trapdoor: RoleEntry,
    pub edit_sign: RoleEntry,
    pub use_lever: RoleEntry,
    /// 熔炉、高炉、烟熏炉
    pub use_furnaces: RoleEntry,
    pub allow_player_pickup_item: RoleEntry,
    /// 骑乘矿车或船
    pub allow_ride_trans: RoleEntry,
    pub allow_ride_entity: RoleEntry,
    pub use_pressure_plate: RoleEntry,
    pub allow_fishing_rod_and_hook: RoleEntry,
    /// 雪球、鸡蛋、三叉戟等投掷物
    pub allow_use_throwable: RoleEntry,
    pub use_armor_stand: RoleEntry,
    pub allow_drop_item: RoleEntry,
    pub use_item_frame: RoleEntry,
    pub use_flint_and_steel: RoleEntry,
    pub use_beacon: RoleEntry,
    pub use_bed: RoleEntry,
    #[serde(rename = "allowPvP")]
    pub allow_pvp: RoleEntry,
    pub allow_hostile_damage: RoleEntry,
    pub allow_friendly_damage: RoleEntry,
    pub allow_special_entity_damage: RoleEntry,
    /// 箱子、木桶、潜影盒、漏斗等容器
    pub use_container: RoleEntry,
    /// 工作台、铁砧、附魔台等工作站
    pub use_workstation: RoleEntry,
    pub use_bell: RoleEntry,
    pub use_campfire: RoleEntry,
    pub use_composter: RoleEntry,
    pub use_daylight_detector: RoleEntry,
    pub use_jukebox: RoleEntry,
    pub use_note_block: RoleEntry,
    pub use_cake: RoleEntry,
    pub use_comparator: RoleEntry,
    pub use_repeater: RoleEntry,
    pub use_lectern: RoleEntry,
    pub use_cauldron: RoleEntry,
    pub use_respawn_anchor: RoleEntry,
    pub use_bone_meal: RoleEntry,
    pub use_bee_nest: RoleEntry,
    pub edit_flower_pot: RoleEntry,
    /// 弓与弩
    pub allow_use_ranged_weapon: RoleEntry,
}

/// 一块领地的完整权限表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LandPermTable {
    pub environment: EnvironmentPerms,
    pub role: RolePerms,
}

impl LandPermTable {
    pub fn to_json(&self) -> Result<String, EncodingError> {
        codec::encode("land permission table", self)
    }

    /// 空文本或格式错误时返回 `None`
    pub fn from_json(text: &str) -> Option<Self> {
        codec::decode_or_log("land permission table", text)
    }
}
