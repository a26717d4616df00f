// ==========================================
// 城市固体废弃物工具集 - 废弃物分摊领域模型
// ==========================================
// 用途: 导入层写入，引擎层只读
// 对齐: 重量组分表（Tabela 1）/ 流量汇总表（Tabela 2）
// ==========================================

use crate::domain::types::Material;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// 建筑垃圾组分系数（固定常量）
// ==========================================
// 系数之和为 0.98492，不要求为 1（残余质量隐含）
pub const DEBRIS_FRACTIONS: [(Material, f64); 15] = [
    (Material::Concrete, 0.0677),
    (Material::Mortar, 0.1065),
    (Material::Brick, 0.078),
    (Material::Wood, 0.0067),
    (Material::Paper, 0.0023),
    (Material::Plastic, 0.0034),
    (Material::Metal, 0.0029),
    (Material::AggregateMaterial, 0.0484),
    (Material::RawEarth, 0.0931),
    (Material::Stone, 0.00192),
    (Material::RetainedRubble, 0.3492),
    (Material::SievedRubble, 0.2),
    (Material::Ceramic, 0.0161),
    (Material::OrganicAndBranches, 0.0087),
    (Material::Other, 0.0),
];

// ==========================================
// CompositionRecord - 重量组分记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRecord {
    pub unit_type: String,                    // 单位类型（连接键）
    pub fractions: BTreeMap<Material, f64>,   // 物料 → 组分比例 [0,1]
    pub row_number: usize,                    // 源表行号（1 起）
}

impl CompositionRecord {
    /// 物料比例，缺失时为 0
    pub fn fraction(&self, material: Material) -> f64 {
        self.fractions.get(&material).copied().unwrap_or(0.0)
    }
}

// ==========================================
// FlowRecord - 流量汇总记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub region: String,                           // UF
    pub unit_type: String,                        // 单位类型（连接键）
    pub household_public_total: Option<f64>,      // Dom+Pub
    pub construction_debris_total: Option<f64>,   // Entulho
    pub row_number: usize,
}

// ==========================================
// AllocationResult - 分摊结果行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub region: String,
    pub unit_type: String,
    pub quantities: BTreeMap<Material, f64>,
}

impl AllocationResult {
    pub fn quantity(&self, material: Material) -> Option<f64> {
        self.quantities.get(&material).copied()
    }
}

// ==========================================
// AllocationReport - 分摊报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationReport {
    pub batch_id: String,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<AllocationResult>,
    pub skipped_flow_rows: usize,     // 未匹配到组分记录的流量行
    pub total_processed: f64,         // 汇总物料合计
    pub totals_by_region: BTreeMap<String, BTreeMap<Material, f64>>,
}
