// ==========================================
// 城市固体废弃物工具集 - 引擎层错误类型
// ==========================================
// 红线: 输入非法时立即返回，状态不推进
// ==========================================

use crate::domain::types::{Classification, Material};
use thiserror::Error;

/// 非法输入错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("无法识别的回答: {0}（可接受: sim/não, yes/no）")]
    UnknownAnswer(String),

    #[error("未知地区: {0}")]
    UnknownRegion(String),

    #[error("日产量不是数值: {0}")]
    NonNumericQuantity(String),

    #[error("日产量非法: {0}（必须为非负有限数）")]
    InvalidQuantity(f64),

    #[error("问卷已得出结论 ({0})，不再接受回答")]
    AlreadyClassified(Classification),

    #[error("建筑垃圾系数非法: {material} = {value}（必须在 [0, 1] 内）")]
    InvalidDebrisFraction { material: Material, value: f64 },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, InvalidInputError>;
