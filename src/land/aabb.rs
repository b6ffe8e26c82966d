//! 领地范围 (AABB)
//!
//! `LandAabb` 只保存数据；所有几何计算都在宿主侧完成，由 `AabbService` 转发。

use super::types::DimensionId;
use crate::bindings::{BindingRegistry, FloatPos, ImportTable, IntPos, Procedure};
use crate::core::{BindingResult, CallError, CallResult, ConversionError};
use std::fmt;

/// 轴对齐包围盒，`min` 与 `max` 各自携带维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LandAabb {
    pub min: IntPos,
    pub max: IntPos,
}

impl LandAabb {
    pub const fn new(min: IntPos, max: IntPos) -> Self {
        Self { min, max }
    }

    pub fn dimension(&self) -> DimensionId {
        self.min.dimid
    }

    pub fn is_same_dimension(&self) -> bool {
        self.min.dimid == self.max.dimid
    }

    /// 由宿主返回的 `[min, max]` 列表构造
    pub(crate) fn from_pair(symbol: &str, mut pair: Vec<IntPos>) -> CallResult<Self> {
        if pair.len() != 2 {
            return Err(CallError::Conversion {
                symbol: symbol.to_string(),
                source: ConversionError::Arity {
                    expected: 2,
                    found: pair.len(),
                },
            });
        }
        let max = pair.remove(1);
        let min = pair.remove(0);
        Ok(Self { min, max })
    }
}

impl fmt::Display for LandAabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.min, self.max)
    }
}

/// 宿主导出的全部 `LandAABB_*` 符号
pub const AABB_SYMBOLS: &[&str] = &[
    "LandAABB_fix",
    "LandAABB_getSpanX",
    "LandAABB_getSpanY",
    "LandAABB_getSpanZ",
    "LandAABB_getSquare",
    "LandAABB_getVolume",
    "LandAABB_toString",
    "LandAABB_getBorder",
    "LandAABB_getRange",
    "LandAABB_getVertices",
    "LandAABB_getCorners",
    "LandAABB_getEdges",
    "LandAABB_hasPos",
    "LandAABB_isCollision",
    "LandAABB_isComplisWithMinSpacing",
    "LandAABB_isContain",
];

type Pair = (IntPos, IntPos);
type TwoPairs = (IntPos, IntPos, IntPos, IntPos);

/// 宿主侧的 AABB 计算
pub struct AabbService {
    fix: Procedure<Pair, Vec<IntPos>>,
    span_x: Procedure<Pair, i64>,
    span_y: Procedure<Pair, i64>,
    span_z: Procedure<Pair, i64>,
    square: Procedure<Pair, i64>,
    volume: Procedure<Pair, i64>,
    to_string: Procedure<Pair, String>,
    border: Procedure<Pair, Vec<IntPos>>,
    range: Procedure<Pair, Vec<IntPos>>,
    vertices: Procedure<Pair, Vec<FloatPos>>,
    corners: Procedure<Pair, Vec<FloatPos>>,
    edges: Procedure<Pair, Vec<Vec<IntPos>>>,
    has_pos: Procedure<(IntPos, IntPos, IntPos, bool), bool>,
    is_collision: Procedure<TwoPairs, bool>,
    complies_with_min_spacing: Procedure<(IntPos, IntPos, IntPos, IntPos, i32, bool), bool>,
    is_contain: Procedure<TwoPairs, bool>,
    imports: ImportTable,
}

impl AabbService {
    pub fn bind(registry: &BindingRegistry) -> BindingResult<Self> {
        let mut table = registry.table("LandAABB");
        Ok(Self {
            fix: table.import("LandAABB_fix")?,
            span_x: table.import("LandAABB_getSpanX")?,
            span_y: table.import("LandAABB_getSpanY")?,
            span_z: table.import("LandAABB_getSpanZ")?,
            square: table.import("LandAABB_getSquare")?,
            volume: table.import("LandAABB_getVolume")?,
            to_string: table.import("LandAABB_toString")?,
            border: table.import("LandAABB_getBorder")?,
            range: table.import("LandAABB_getRange")?,
            vertices: table.import("LandAABB_getVertices")?,
            corners: table.import("LandAABB_getCorners")?,
            edges: table.import("LandAABB_getEdges")?,
            has_pos: table.import("LandAABB_hasPos")?,
            is_collision: table.import("LandAABB_isCollision")?,
            complies_with_min_spacing: table.import("LandAABB_isComplisWithMinSpacing")?,
            is_contain: table.import("LandAABB_isContain")?,
            imports: table.freeze(),
        })
    }

    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }

    /// 规范化 `min`/`max`，使每个轴上 `min <= max`
    pub fn fix(&self, aabb: &mut LandAabb) -> CallResult<()> {
        let pair = self.fix.call((aabb.min, aabb.max))?;
        *aabb = LandAabb::from_pair(self.fix.raw().symbol(), pair)?;
        Ok(())
    }

    /// X 轴跨度
    pub fn span_x(&self, aabb: &LandAabb) -> CallResult<i64> {
        self.span_x.call((aabb.min, aabb.max))
    }

    /// Y 轴跨度
    pub fn span_y(&self, aabb: &LandAabb) -> CallResult<i64> {
        self.span_y.call((aabb.min, aabb.max))
    }

    /// Z 轴跨度
    pub fn span_z(&self, aabb: &LandAabb) -> CallResult<i64> {
        self.span_z.call((aabb.min, aabb.max))
    }

    pub fn square(&self, aabb: &LandAabb) -> CallResult<i64> {
        self.square.call((aabb.min, aabb.max))
    }

    pub fn volume(&self, aabb: &LandAabb) -> CallResult<i64> {
        self.volume.call((aabb.min, aabb.max))
    }

    /// 宿主格式化的文本表示
    pub fn to_string(&self, aabb: &LandAabb) -> CallResult<String> {
        self.to_string.call((aabb.min, aabb.max))
    }

    /// 立体边框上的点
    pub fn border(&self, aabb: &LandAabb) -> CallResult<Vec<IntPos>> {
        self.border.call((aabb.min, aabb.max))
    }

    /// 平面范围上的点
    pub fn range(&self, aabb: &LandAabb) -> CallResult<Vec<IntPos>> {
        self.range.call((aabb.min, aabb.max))
    }

    pub fn vertices(&self, aabb: &LandAabb) -> CallResult<Vec<FloatPos>> {
        self.vertices.call((aabb.min, aabb.max))
    }

    pub fn corners(&self, aabb: &LandAabb) -> CallResult<Vec<FloatPos>> {
        self.corners.call((aabb.min, aabb.max))
    }

    /// 十二条棱，每条为 `(起点, 终点)`
    pub fn edges(&self, aabb: &LandAabb) -> CallResult<Vec<(IntPos, IntPos)>> {
        let symbol = self.edges.raw().symbol();
        self.edges
            .call((aabb.min, aabb.max))?
            .into_iter()
            .map(|edge| LandAabb::from_pair(symbol, edge).map(|e| (e.min, e.max)))
            .collect()
    }

    pub fn has_pos(&self, aabb: &LandAabb, pos: IntPos, include_y: bool) -> CallResult<bool> {
        self.has_pos.call((aabb.min, aabb.max, pos, include_y))
    }

    /// 两个范围是否重合
    pub fn is_collision(&self, a: &LandAabb, b: &LandAabb) -> CallResult<bool> {
        self.is_collision.call((a.min, a.max, b.min, b.max))
    }

    pub fn complies_with_min_spacing(
        &self,
        a: &LandAabb,
        b: &LandAabb,
        min_spacing: i32,
        include_y: bool,
    ) -> CallResult<bool> {
        self.complies_with_min_spacing
            .call((a.min, a.max, b.min, b.max, min_spacing, include_y))
    }

    /// `outer` 是否完整包含 `inner`
    pub fn is_contain(&self, outer: &LandAabb, inner: &LandAabb) -> CallResult<bool> {
        self.is_contain.call((outer.min, outer.max, inner.min, inner.max))
    }
}
