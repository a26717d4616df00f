// ==========================================
// 城市固体废弃物工具集 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值解析 / 数值范围校验
// ==========================================

use crate::importer::error::{DataFormatError, ImportResult};

pub struct DataCleaner;

impl DataCleaner {
    /// 标准化 NULL 值（空字符串/空白/NaN → None）
    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 解析数值（巴西葡语习惯）
    ///
    /// 兼容:
    /// - 小数逗号: "0,25" → 0.25
    /// - 千分位点 + 小数逗号: "1.234,5" → 1234.5
    /// - 多组千分位点: "1.500.000" → 1500000
    ///
    /// 拒绝:
    /// - 单个点且恰好三位小数、整数部分非 0（"1.500"）: 千分位与小数点无法区分
    /// - 百分号（仅组分比例允许，见 `parse_fraction`）
    pub fn parse_decimal(&self, value: &str) -> Option<f64> {
        let text = value.trim().replace(' ', "");

        let normalized = if text.contains(',') {
            text.replace('.', "").replace(',', ".")
        } else {
            match dot_grouping(&text) {
                DotGrouping::Thousands => text.replace('.', ""),
                DotGrouping::Ambiguous => return None,
                DotGrouping::Decimal => text,
            }
        };

        normalized.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// 解析组分比例（额外允许百分号: "12,5%" → 0.125）
    pub fn parse_fraction(&self, value: &str) -> Option<f64> {
        let text = value.trim();
        match text.strip_suffix('%') {
            Some(percent) => self.parse_decimal(percent).map(|v| v / 100.0),
            None => self.parse_decimal(text),
        }
    }

    /// 解析可选数值字段（空值 → None，无法解析 → 错误）
    pub fn parse_optional_decimal(
        &self,
        value: Option<&str>,
        field: &str,
        row: usize,
    ) -> ImportResult<Option<f64>> {
        self.parse_optional_with(value, field, row, |text| self.parse_decimal(text))
    }

    /// 解析可选组分比例字段
    pub fn parse_optional_fraction(
        &self,
        value: Option<&str>,
        field: &str,
        row: usize,
    ) -> ImportResult<Option<f64>> {
        self.parse_optional_with(value, field, row, |text| self.parse_fraction(text))
    }

    fn parse_optional_with<F>(
        &self,
        value: Option<&str>,
        field: &str,
        row: usize,
        parse: F,
    ) -> ImportResult<Option<f64>>
    where
        F: Fn(&str) -> Option<f64>,
    {
        match self.normalize_null(value) {
            None => Ok(None),
            Some(text) => parse(&text)
                .map(Some)
                .ok_or(DataFormatError::TypeConversionError {
                    row,
                    field: field.to_string(),
                    value: text,
                }),
        }
    }

    /// 校验数值范围 [min, max]（闭区间）
    pub fn validate_range(
        &self,
        value: f64,
        min: f64,
        max: f64,
        field: &str,
        row: usize,
    ) -> ImportResult<f64> {
        if value < min || value > max {
            Err(DataFormatError::ValueRangeError {
                row,
                field: field.to_string(),
                value,
                min,
                max,
            })
        } else {
            Ok(value)
        }
    }
}

// ==========================================
// 不含逗号时点号的含义
// ==========================================
enum DotGrouping {
    Decimal,
    Thousands,
    Ambiguous,
}

fn dot_grouping(text: &str) -> DotGrouping {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let groups: Vec<&str> = digits.split('.').collect();
    if groups.len() < 2 {
        return DotGrouping::Decimal;
    }

    let all_digits = |g: &str| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit());
    let head = groups[0];
    let grouped = all_digits(head)
        && head.len() <= 3
        && !head.starts_with('0')
        && groups[1..].iter().all(|g| g.len() == 3 && all_digits(g));

    match (grouped, groups.len()) {
        (true, 2) => DotGrouping::Ambiguous,
        (true, _) => DotGrouping::Thousands,
        (false, _) => DotGrouping::Decimal,
    }
}
