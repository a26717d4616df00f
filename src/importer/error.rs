// ==========================================
// 城市固体废弃物工具集 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 导入失败即整体失败，不返回部分结果
// ==========================================

use thiserror::Error;

/// 表格数据格式错误
#[derive(Error, Debug)]
pub enum DataFormatError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("表格无数据: {0}")]
    EmptyTable(String),

    // ===== 数据映射错误 =====
    #[error("缺少必需列: {column}（可接受列名: {accepted}）")]
    MissingColumn { column: String, accepted: String },

    #[error("必填字段为空 (行 {row}, 字段 {field})")]
    MissingValue { row: usize, field: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): 无法解析为数值: {value}")]
    TypeConversionError {
        row: usize,
        field: String,
        value: String,
    },

    // ===== 数据质量错误 =====
    #[error("数值范围错误 (行 {row}, 字段 {field}): 值 {value} 超出范围 [{min}, {max}]")]
    ValueRangeError {
        row: usize,
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl From<std::io::Error> for DataFormatError {
    fn from(err: std::io::Error) -> Self {
        DataFormatError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for DataFormatError {
    fn from(err: csv::Error) -> Self {
        DataFormatError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for DataFormatError {
    fn from(err: calamine::Error) -> Self {
        DataFormatError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, DataFormatError>;
