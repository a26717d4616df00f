// ==========================================
// 城市固体废弃物工具集 - 表格导入器
// ==========================================
// 职责: 整合导入流程，从文件到类型化记录
// 流程: 解析 → 映射 → 校验（任何一步失败即整体失败）
// ==========================================

use crate::domain::waste::{CompositionRecord, FlowRecord};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{FileParser, RawTable, UniversalFileParser};
use std::path::Path;
use tracing::{error, info, instrument};

pub struct TableImporter<P: FileParser = UniversalFileParser> {
    file_parser: P,
    field_mapper: FieldMapper,
}

impl Default for TableImporter<UniversalFileParser> {
    fn default() -> Self {
        Self::new(UniversalFileParser)
    }
}

impl<P: FileParser> TableImporter<P> {
    pub fn new(file_parser: P) -> Self {
        Self {
            file_parser,
            field_mapper: FieldMapper::new(),
        }
    }

    /// 导入重量组分表（Tabela 1）
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_composition<F: AsRef<Path>>(
        &self,
        file_path: F,
    ) -> ImportResult<Vec<CompositionRecord>> {
        let table = self.parse(file_path.as_ref())?;
        let records = self.field_mapper.map_composition(&table).map_err(|e| {
            error!(error = %e, "重量组分表映射失败");
            e
        })?;
        info!(records = records.len(), "重量组分表导入完成");
        Ok(records)
    }

    /// 导入流量汇总表（Tabela 2）
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_flows<F: AsRef<Path>>(&self, file_path: F) -> ImportResult<Vec<FlowRecord>> {
        let table = self.parse(file_path.as_ref())?;
        let records = self.field_mapper.map_flows(&table).map_err(|e| {
            error!(error = %e, "流量汇总表映射失败");
            e
        })?;
        info!(records = records.len(), "流量汇总表导入完成");
        Ok(records)
    }

    fn parse(&self, file_path: &Path) -> ImportResult<RawTable> {
        let table = self.file_parser.parse_to_raw_table(file_path).map_err(|e| {
            error!(error = %e, "文件解析失败");
            e
        })?;
        info!(
            columns = table.headers.len(),
            rows = table.rows.len(),
            "文件解析完成"
        );
        Ok(table)
    }
}
