// ==========================================
// 城市固体废弃物工具集 - 分摊结果汇总
// ==========================================
// 职责: 对分摊结果做纯归约，供展示层的指标卡与图表使用
// ==========================================

use crate::domain::types::Material;
use crate::domain::waste::AllocationResult;
use std::collections::BTreeMap;

/// 默认"处理总量"物料集合
pub const DEFAULT_SUMMARY_MATERIALS: [Material; 8] = [
    Material::PaperCardboard,
    Material::Paper,
    Material::Plastics,
    Material::Glass,
    Material::Metals,
    Material::Organics,
    Material::Concrete,
    Material::Mortar,
];

/// 默认按 UF 分组的图表物料
pub const DEFAULT_CHART_MATERIALS: [Material; 3] =
    [Material::Concrete, Material::Mortar, Material::Brick];

/// 选定物料的分摊量合计（空结果 → 0）
pub fn total_processed(results: &[AllocationResult], materials: &[Material]) -> f64 {
    results
        .iter()
        .flat_map(|row| materials.iter().filter_map(|m| row.quantity(*m)))
        .sum()
}

/// 按 UF 汇总选定物料（不含任何选定物料的地区不出现）
pub fn totals_by_region(
    results: &[AllocationResult],
    materials: &[Material],
) -> BTreeMap<String, BTreeMap<Material, f64>> {
    let mut totals: BTreeMap<String, BTreeMap<Material, f64>> = BTreeMap::new();

    for row in results {
        for material in materials {
            if let Some(quantity) = row.quantity(*material) {
                *totals
                    .entry(row.region.clone())
                    .or_default()
                    .entry(*material)
                    .or_insert(0.0) += quantity;
            }
        }
    }

    totals
}
