// ==========================================
// 城市固体废弃物工具集 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 红线: 列名一律 TRIM（源表由人工编辑，空格不一致）
// ==========================================

use crate::importer::error::{DataFormatError, ImportResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ==========================================
// RawTable - 原始表格
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone)]
pub struct RawRow {
    pub row_number: usize, // 表格中的行号（表头为第 1 行）
    pub values: HashMap<String, String>,
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// 由表头与数据行构建（列名 TRIM，跳过完全空白行）
    pub fn from_rows<I, R>(headers: Vec<String>, data_rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = String>,
    {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();

        let mut rows = Vec::new();
        for (idx, data_row) in data_rows.into_iter().enumerate() {
            let mut values = HashMap::new();
            for (col_idx, value) in data_row.into_iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    if header.is_empty() {
                        continue;
                    }
                    // 重复列名: 首列为准
                    values
                        .entry(header.clone())
                        .or_insert_with(|| value.trim().to_string());
                }
            }

            if values.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(RawRow {
                row_number: idx + 2,
                values,
            });
        }

        Self { headers, rows }
    }
}

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(DataFormatError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意读取源解析（供上传内容直接解析）
    ///
    /// 分隔符按表头行自动识别: 葡语区域导出的 CSV 使用 `;`
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> ImportResult<RawTable> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        let header_line = content.split(|b| *b == b'\n').next().unwrap_or(&[]);
        let delimiter = detect_delimiter(header_line);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true) // 允许行长度不一致
            .from_reader(content.as_slice());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(DataFormatError::EmptyTable("CSV 无表头".to_string()));
        }

        let mut data_rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            data_rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        Ok(RawTable::from_rows(headers, data_rows))
    }
}

/// 统计引号外的 `;` 与 `,`，`;` 不少于 `,` 时按 `;` 分隔
fn detect_delimiter(header_line: &[u8]) -> u8 {
    let mut in_quotes = false;
    let (mut semicolons, mut commas) = (0usize, 0usize);
    for byte in header_line {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b';' if !in_quotes => semicolons += 1,
            b',' if !in_quotes => commas += 1,
            _ => {}
        }
    }
    if semicolons > 0 && semicolons >= commas {
        b';'
    } else {
        b','
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(DataFormatError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 只读取第一个工作表
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(DataFormatError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DataFormatError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| DataFormatError::EmptyTable(format!("工作表 {} 无表头", sheet_name)))?;

        let headers: Vec<String> = header_row.iter().map(cell_text).collect();
        let data_rows = rows.map(|row| row.iter().map(cell_text).collect::<Vec<_>>());

        Ok(RawTable::from_rows(headers, data_rows))
    }
}

// 数值单元格按小数逗号输出，与文本单元格走同一套数值解析
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Float(value) => value.to_string().replace('.', ","),
        other => other.to_string(),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_to_raw_table(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_table(file_path),
            other => Err(DataFormatError::UnsupportedFormat(other.to_string())),
        }
    }
}
