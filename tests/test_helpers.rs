// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成临时 CSV 表格、构造测试记录
// ==========================================
#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};
use waste_toolkit::{CompositionRecord, FlowRecord, Material};

/// 标准单位类型列名
pub const UNIT_COLUMN: &str = "Tipo de unidade, segundo o município informante";

/// 写入临时 CSV 文件（文件需要保持存活）
pub fn write_csv(lines: &[&str]) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut temp_file = Builder::new().suffix(".csv").tempfile()?;
    for line in lines {
        writeln!(temp_file, "{}", line)?;
    }
    temp_file.flush()?;
    Ok(temp_file)
}

/// Excel 单元格
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

/// 写入临时 .xlsx 文件（单个工作表，首行为表头）
pub fn write_xlsx(headers: &[&str], rows: &[Vec<Cell>]) -> Result<NamedTempFile, Box<dyn Error>> {
    let temp_file = Builder::new().suffix(".xlsx").tempfile()?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row_num, col as u16, *text)?;
                }
                Cell::Number(value) => {
                    worksheet.write_number(row_num, col as u16, *value)?;
                }
                Cell::Blank => {}
            }
        }
    }
    workbook.save(temp_file.path())?;

    Ok(temp_file)
}

/// 典型的重量组分表（Tabela 1），表头带有人工编辑留下的多余空格
pub fn sample_composition_csv() -> Result<NamedTempFile, Box<dyn Error>> {
    write_csv(&[
        &format!(
            "\"{} \", Papel/Papelão ,Plásticos,Vidros,Metais,Orgânicos",
            UNIT_COLUMN
        ),
        "Aterro sanitário,0.2,0.15,0.05,0.03,0.5",
        "Lixão,\"0,1\",0.1,0.02,0.02,0.6",
        "Aterro sanitário,0.9,0.9,0.9,0.9,0.9",
    ])
}

/// 典型的流量汇总表（Tabela 2）
pub fn sample_flows_csv() -> Result<NamedTempFile, Box<dyn Error>> {
    write_csv(&[
        &format!("UF,\"{}\",Dom+Pub,Entulho", UNIT_COLUMN),
        "RJ,Aterro sanitário,1000,500",
        "SP,Lixão,2000,",
        "MG,Unidade de triagem,300,100",
        "RJ,Lixão,,1000",
    ])
}

pub fn composition(unit: &str, fractions: &[(Material, f64)]) -> CompositionRecord {
    CompositionRecord {
        unit_type: unit.to_string(),
        fractions: fractions.iter().copied().collect(),
        row_number: 2,
    }
}

pub fn flow(region: &str, unit: &str, household: Option<f64>, debris: Option<f64>) -> FlowRecord {
    FlowRecord {
        region: region.to_string(),
        unit_type: unit.to_string(),
        household_public_total: household,
        construction_debris_total: debris,
        row_number: 2,
    }
}

/// 浮点近似相等
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
