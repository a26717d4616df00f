// ==========================================
// 城市固体废弃物工具集 - 导入层
// ==========================================
// 职责: 外部表格导入，生成类型化记录
// 支持: Excel, CSV
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod table_importer;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{DataFormatError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, RawTable, UniversalFileParser};
pub use table_importer::TableImporter;
