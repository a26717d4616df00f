// ==========================================
// 城市固体废弃物工具集 - 引擎层
// ==========================================
// 职责: 纯计算，不读文件、不持有跨调用状态
// 红线: 所有分类结论必须附带走过的路径（可解释性）
// ==========================================

pub mod allocation;
pub mod classification;
pub mod error;
pub mod summary;

// 重导出核心引擎
pub use allocation::{AllocationEngine, AllocationRun, DebrisFractionTable};
pub use classification::{
    generator_status, transition, traverse, Answers, Assessment, ClassificationEngine, Node,
    Outcome, Questionnaire,
};
pub use error::{EngineResult, InvalidInputError};
pub use summary::{
    total_processed, totals_by_region, DEFAULT_CHART_MATERIALS, DEFAULT_SUMMARY_MATERIALS,
};
