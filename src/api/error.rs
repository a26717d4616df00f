// ==========================================
// 城市固体废弃物工具集 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，供展示层统一呈现
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::InvalidInputError;
use crate::importer::error::DataFormatError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    /// 输入表格格式错误（整次操作失败，无部分结果）
    #[error("数据格式错误: {0}")]
    DataFormat(#[from] DataFormatError),

    /// 回答或日产量不在合法域内（状态不推进）
    #[error("非法输入: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;
