// ==========================================
// 城市固体废弃物工具集 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射 + 类型转换
// 对齐: Tabela 1（重量组分）/ Tabela 2（按单位与 UF 汇总）
// ==========================================

use crate::domain::types::Material;
use crate::domain::waste::{CompositionRecord, FlowRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{DataFormatError, ImportResult};
use crate::importer::file_parser::{RawRow, RawTable};
use std::collections::BTreeMap;
use tracing::debug;

// ==========================================
// 列名别名（首个为源表标准列名）
// ==========================================
pub mod columns {
    pub const UNIT_TYPE: &[&str] = &[
        "Tipo de unidade, segundo o município informante",
        "unit_type",
        "Unidade",
    ];
    pub const REGION: &[&str] = &["UF", "region", "Estado"];
    pub const HOUSEHOLD_PUBLIC: &[&str] = &["Dom+Pub", "household_public_total"];
    pub const CONSTRUCTION_DEBRIS: &[&str] = &["Entulho", "construction_debris_total"];
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 重量组分表 → CompositionRecord
    pub fn map_composition(&self, table: &RawTable) -> ImportResult<Vec<CompositionRecord>> {
        let unit_column = self.resolve_column(table, columns::UNIT_TYPE)?;

        let material_columns: Vec<(&str, Material)> = table
            .headers
            .iter()
            .filter_map(|h| Material::from_label(h).map(|m| (h.as_str(), m)))
            .collect();

        for header in &table.headers {
            if header != unit_column && Material::from_label(header).is_none() {
                debug!(column = %header, "忽略非物料列");
            }
        }

        table
            .rows
            .iter()
            .map(|row| -> ImportResult<CompositionRecord> {
                let unit_type = self.required_text(row, unit_column)?;

                let mut fractions = BTreeMap::new();
                for (column, material) in &material_columns {
                    let value = self.cleaner.parse_optional_fraction(
                        row.values.get(*column).map(String::as_str),
                        column,
                        row.row_number,
                    )?;
                    if let Some(fraction) = value {
                        let fraction =
                            self.cleaner
                                .validate_range(fraction, 0.0, 1.0, column, row.row_number)?;
                        // 重复列: 首列为准
                        fractions.entry(*material).or_insert(fraction);
                    }
                }

                Ok(CompositionRecord {
                    unit_type,
                    fractions,
                    row_number: row.row_number,
                })
            })
            .collect()
    }

    /// 流量汇总表 → FlowRecord
    pub fn map_flows(&self, table: &RawTable) -> ImportResult<Vec<FlowRecord>> {
        let unit_column = self.resolve_column(table, columns::UNIT_TYPE)?;
        let region_column = self.resolve_column(table, columns::REGION)?;
        let household_column = self.find_column(table, columns::HOUSEHOLD_PUBLIC);
        let debris_column = self.find_column(table, columns::CONSTRUCTION_DEBRIS);

        if household_column.is_none() && debris_column.is_none() {
            debug!("流量表不含 Dom+Pub 与 Entulho 列，结果行将不含物料数量");
        }

        table
            .rows
            .iter()
            .map(|row| -> ImportResult<FlowRecord> {
                Ok(FlowRecord {
                    region: self.required_text(row, region_column)?,
                    unit_type: self.required_text(row, unit_column)?,
                    household_public_total: self.quantity(row, household_column)?,
                    construction_debris_total: self.quantity(row, debris_column)?,
                    row_number: row.row_number,
                })
            })
            .collect()
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn find_column<'a>(&self, table: &'a RawTable, aliases: &[&str]) -> Option<&'a str> {
        aliases.iter().find_map(|alias| {
            table
                .headers
                .iter()
                .find(|h| h.as_str() == *alias)
                .map(String::as_str)
        })
    }

    fn resolve_column<'a>(&self, table: &'a RawTable, aliases: &[&str]) -> ImportResult<&'a str> {
        self.find_column(table, aliases)
            .ok_or_else(|| DataFormatError::MissingColumn {
                column: aliases[0].to_string(),
                accepted: aliases.join(" | "),
            })
    }

    fn required_text(&self, row: &RawRow, column: &str) -> ImportResult<String> {
        self.cleaner
            .normalize_null(row.values.get(column).map(String::as_str))
            .ok_or_else(|| DataFormatError::MissingValue {
                row: row.row_number,
                field: column.to_string(),
            })
    }

    fn quantity(&self, row: &RawRow, column: Option<&str>) -> ImportResult<Option<f64>> {
        let Some(column) = column else {
            return Ok(None);
        };
        let value = self.cleaner.parse_optional_decimal(
            row.values.get(column).map(String::as_str),
            column,
            row.row_number,
        )?;
        value
            .map(|v| {
                self.cleaner
                    .validate_range(v, 0.0, f64::MAX, column, row.row_number)
            })
            .transpose()
    }
}
