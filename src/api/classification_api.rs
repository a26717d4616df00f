// ==========================================
// 城市固体废弃物工具集 - 分类问卷 API
// ==========================================
// 职责: 文本输入（地区/日产量/回答）→ 类型化输入 → 评估
// 红线: 任一回答或日产量非法即整体拒绝
// ==========================================

use crate::api::error::ApiResult;
use crate::config::ConfigManager;
use crate::domain::region::RegionThreshold;
use crate::domain::types::{Answer, Question};
use crate::engine::classification::{Answers, Assessment, ClassificationEngine};
use crate::engine::error::InvalidInputError;
use crate::importer::DataCleaner;
use tracing::instrument;

#[derive(Debug, Default)]
pub struct ClassificationApi {
    engine: ClassificationEngine,
}

impl ClassificationApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按配置创建（内置阈值表叠加 region_thresholds 覆盖）
    pub fn with_config(config: &ConfigManager) -> ApiResult<Self> {
        Ok(Self {
            engine: ClassificationEngine::with_thresholds(config.region_thresholds()?),
        })
    }

    /// 解析地区（州全称或 UF 代码）
    pub fn resolve_region(&self, region: &str) -> ApiResult<RegionThreshold> {
        Ok(self.engine.resolve_region(region)?)
    }

    /// 解析回答文本
    pub fn parse_answer(&self, value: &str) -> ApiResult<Answer> {
        Answer::parse(value)
            .ok_or_else(|| InvalidInputError::UnknownAnswer(value.trim().to_string()).into())
    }

    /// 解析日产量文本（升/天，兼容小数逗号）
    pub fn parse_daily_quantity(&self, value: &str) -> ApiResult<f64> {
        let quantity = DataCleaner
            .parse_decimal(value)
            .ok_or_else(|| InvalidInputError::NonNumericQuantity(value.trim().to_string()))?;
        if quantity < 0.0 {
            return Err(InvalidInputError::InvalidQuantity(quantity).into());
        }
        Ok(quantity)
    }

    /// 解析全部回答（不在路径上的回答同样必须合法）
    pub fn parse_answers(&self, answers: &[(Question, &str)]) -> ApiResult<Answers> {
        let mut parsed = Answers::new();
        for (question, text) in answers {
            parsed.record(*question, self.parse_answer(text)?);
        }
        Ok(parsed)
    }

    /// 文本输入评估
    #[instrument(skip(self, answers))]
    pub fn assess(
        &self,
        region: &str,
        daily_quantity: &str,
        answers: &[(Question, &str)],
    ) -> ApiResult<Assessment> {
        let quantity = self.parse_daily_quantity(daily_quantity)?;
        let answers = self.parse_answers(answers)?;
        Ok(self.engine.classify(region, quantity, &answers)?)
    }

    /// 类型化输入评估
    pub fn classify(
        &self,
        region: &str,
        daily_quantity: f64,
        answers: &Answers,
    ) -> ApiResult<Assessment> {
        Ok(self.engine.classify(region, daily_quantity, answers)?)
    }
}
