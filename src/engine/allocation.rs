// ==========================================
// 城市固体废弃物工具集 - 组分分摊引擎
// ==========================================
// 职责: 按单位类型连接重量组分表与流量汇总表，将汇总量分摊到物料
// 输入: CompositionRecord + FlowRecord + 建筑垃圾系数表
// 输出: AllocationResult（每个匹配的流量行一条）
// ==========================================
// 红线: 内连接，未匹配的流量行静默丢弃（不是错误）
// 红线: 分摊阶段不会失败
// ==========================================

use crate::domain::types::Material;
use crate::domain::waste::{
    AllocationResult, CompositionRecord, FlowRecord, DEBRIS_FRACTIONS,
};
use crate::engine::error::{EngineResult, InvalidInputError};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

// ==========================================
// DebrisFractionTable - 建筑垃圾系数表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebrisFractionTable {
    entries: Vec<(Material, f64)>,
}

impl Default for DebrisFractionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl DebrisFractionTable {
    /// 标准系数表
    pub fn standard() -> Self {
        Self {
            entries: DEBRIS_FRACTIONS.to_vec(),
        }
    }

    /// 自定义系数表（每个系数必须为 [0,1] 内的有限数；重复物料以首次出现为准）
    pub fn from_pairs<I>(pairs: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = (Material, f64)>,
    {
        let mut entries: Vec<(Material, f64)> = Vec::new();
        for (material, value) in pairs {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(InvalidInputError::InvalidDebrisFraction { material, value });
            }
            if entries.iter().all(|(m, _)| *m != material) {
                entries.push((material, value));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(Material, f64)] {
        &self.entries
    }

    pub fn fraction(&self, material: Material) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| *m == material)
            .map(|(_, f)| *f)
    }

    /// 系数之和（不要求为 1）
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, f)| f).sum()
    }
}

// ==========================================
// AllocationRun - 单次分摊结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRun {
    pub results: Vec<AllocationResult>,
    pub skipped_flow_rows: usize,
}

// ==========================================
// AllocationEngine - 组分分摊引擎
// ==========================================
#[derive(Debug, Default)]
pub struct AllocationEngine;

impl AllocationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 分摊（只返回结果行）
    pub fn allocate(
        &self,
        composition: &[CompositionRecord],
        flows: &[FlowRecord],
        debris_fractions: &DebrisFractionTable,
    ) -> Vec<AllocationResult> {
        self.run(composition, flows, debris_fractions).results
    }

    /// 分摊（附带未匹配行计数）
    #[instrument(skip_all, fields(composition = composition.len(), flows = flows.len()))]
    pub fn run(
        &self,
        composition: &[CompositionRecord],
        flows: &[FlowRecord],
        debris_fractions: &DebrisFractionTable,
    ) -> AllocationRun {
        // 同一单位类型多条记录: 首条为准
        let mut by_unit: HashMap<&str, &CompositionRecord> = HashMap::new();
        for record in composition {
            by_unit.entry(record.unit_type.as_str()).or_insert(record);
        }

        let mut results = Vec::with_capacity(flows.len());
        let mut skipped_flow_rows = 0;

        for flow in flows {
            let Some(record) = by_unit.get(flow.unit_type.as_str()) else {
                debug!(
                    row = flow.row_number,
                    unit_type = %flow.unit_type,
                    "未找到重量组分记录，跳过"
                );
                skipped_flow_rows += 1;
                continue;
            };

            results.push(self.allocate_row(record, flow, debris_fractions));
        }

        debug!(
            results = results.len(),
            skipped = skipped_flow_rows,
            "分摊完成"
        );

        AllocationRun {
            results,
            skipped_flow_rows,
        }
    }

    /// 单行分摊
    ///
    /// 规则:
    /// 1) Dom+Pub 存在 → 五种可回收/有机物料 = Dom+Pub × 组分比例（缺失比例按 0）
    /// 2) Entulho 存在 → 系数表中每种物料 = Entulho × 固定系数
    /// 3) 两者皆无 → 输出仅含 UF/单位的空行
    pub fn allocate_row(
        &self,
        record: &CompositionRecord,
        flow: &FlowRecord,
        debris_fractions: &DebrisFractionTable,
    ) -> AllocationResult {
        let mut quantities = BTreeMap::new();

        if let Some(total) = flow.household_public_total {
            for material in Material::RECYCLABLES {
                quantities.insert(material, total * record.fraction(material));
            }
        }

        if let Some(total) = flow.construction_debris_total {
            for (material, fraction) in debris_fractions.entries() {
                quantities.insert(*material, total * fraction);
            }
        }

        AllocationResult {
            region: flow.region.clone(),
            unit_type: flow.unit_type.clone(),
            quantities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composition(unit: &str, fractions: &[(Material, f64)]) -> CompositionRecord {
        CompositionRecord {
            unit_type: unit.to_string(),
            fractions: fractions.iter().copied().collect(),
            row_number: 2,
        }
    }

    fn flow(region: &str, unit: &str, household: Option<f64>, debris: Option<f64>) -> FlowRecord {
        FlowRecord {
            region: region.to_string(),
            unit_type: unit.to_string(),
            household_public_total: household,
            construction_debris_total: debris,
            row_number: 2,
        }
    }

    #[test]
    fn test_household_allocation_defaults_missing_fraction_to_zero() {
        let engine = AllocationEngine::new();
        let results = engine.allocate(
            &[composition("A", &[(Material::Glass, 0.1)])],
            &[flow("RJ", "A", Some(1000.0), None)],
            &DebrisFractionTable::standard(),
        );

        assert_eq!(results.len(), 1);
        let row = &results[0];
        assert_eq!(row.region, "RJ");
        assert_eq!(row.unit_type, "A");
        assert_eq!(row.quantity(Material::Glass), Some(100.0));
        assert_eq!(row.quantity(Material::PaperCardboard), Some(0.0));
        assert_eq!(row.quantity(Material::Plastics), Some(0.0));
        assert_eq!(row.quantity(Material::Metals), Some(0.0));
        assert_eq!(row.quantity(Material::Organics), Some(0.0));
        assert_eq!(row.quantities.len(), 5, "无 Entulho 时不应出现建筑垃圾物料");
    }

    #[test]
    fn test_unmatched_flow_rows_are_dropped() {
        let engine = AllocationEngine::new();
        let run = engine.run(
            &[composition("A", &[])],
            &[
                flow("RJ", "A", Some(1.0), None),
                flow("SP", "B", Some(1.0), Some(1.0)),
            ],
            &DebrisFractionTable::standard(),
        );

        assert_eq!(run.results.len(), 1);
        assert_eq!(run.skipped_flow_rows, 1);
        assert!(run.results.iter().all(|r| r.unit_type != "B"));
    }

    #[test]
    fn test_first_composition_record_wins() {
        let engine = AllocationEngine::new();
        let results = engine.allocate(
            &[
                composition("A", &[(Material::Metals, 0.2)]),
                composition("A", &[(Material::Metals, 0.9)]),
            ],
            &[flow("MG", "A", Some(10.0), None)],
            &DebrisFractionTable::standard(),
        );

        assert_eq!(results[0].quantity(Material::Metals), Some(2.0));
    }

    #[test]
    fn test_debris_allocation_uses_fixed_table() {
        let engine = AllocationEngine::new();
        let results = engine.allocate(
            &[composition("A", &[(Material::Glass, 0.5)])],
            &[flow("BA", "A", None, Some(1000.0))],
            &DebrisFractionTable::standard(),
        );

        let row = &results[0];
        assert_eq!(row.quantities.len(), 15);
        assert!((row.quantity(Material::RetainedRubble).unwrap() - 349.2).abs() < 1e-9);
        assert!((row.quantity(Material::Concrete).unwrap() - 67.7).abs() < 1e-9);
        assert_eq!(row.quantity(Material::Other), Some(0.0));
        assert_eq!(row.quantity(Material::Glass), None);
    }

    #[test]
    fn test_row_without_quantities_is_emitted_empty() {
        let engine = AllocationEngine::new();
        let results = engine.allocate(
            &[composition("A", &[(Material::Glass, 0.5)])],
            &[flow("PE", "A", None, None)],
            &DebrisFractionTable::standard(),
        );

        assert_eq!(results.len(), 1);
        assert!(results[0].quantities.is_empty());
    }

    #[test]
    fn test_debris_table_validation() {
        assert!(DebrisFractionTable::from_pairs([(Material::Concrete, 0.5)]).is_ok());
        assert_eq!(
            DebrisFractionTable::from_pairs([(Material::Concrete, 1.5)]),
            Err(InvalidInputError::InvalidDebrisFraction {
                material: Material::Concrete,
                value: 1.5
            })
        );
        assert!(DebrisFractionTable::from_pairs([(Material::Brick, f64::NAN)]).is_err());
    }

    #[test]
    fn test_standard_debris_table_total() {
        let table = DebrisFractionTable::standard();
        assert_eq!(table.entries().len(), 15);
        assert!((table.total() - 0.98492).abs() < 1e-9);
    }
}
