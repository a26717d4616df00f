// ==========================================
// 城市固体废弃物工具集 - 领域层
// ==========================================
// 职责: 实体与类型定义，不含解析与计算
// ==========================================

pub mod region;
pub mod types;
pub mod waste;

// 重导出核心类型
pub use region::{
    find_region, lookup_region, RegionThreshold, DEFAULT_LITERS_PER_DAY, REGION_THRESHOLDS,
};
pub use types::{
    Answer, Classification, GeneratorStatus, Material, MaterialCategory, Question,
};
pub use waste::{
    AllocationReport, AllocationResult, CompositionRecord, FlowRecord, DEBRIS_FRACTIONS,
};
