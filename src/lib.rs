// ==========================================
// 城市固体废弃物工具集 - 核心库
// ==========================================
// 组件 1: 重量组分分摊（Tabela 1 × Tabela 2 → 物料量）
// 组件 2: 废弃物分类问卷（Classe I / II A / II B）+ 大型产生者判定
// 两个组件相互独立，均为纯计算
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分摊与分类
pub mod engine;

// 导入层 - 外部表格
pub mod importer;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    AllocationReport, AllocationResult, Answer, Classification, CompositionRecord, FlowRecord,
    GeneratorStatus, Material, Question,
};

pub use engine::{
    AllocationEngine, Answers, Assessment, ClassificationEngine, DebrisFractionTable,
    InvalidInputError, Outcome, Questionnaire,
};

pub use importer::DataFormatError;

pub use api::{AllocationApi, AllocationSession, ApiError, ClassificationApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Gestão de Resíduos Sólidos Urbanos";
