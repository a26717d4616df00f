// ==========================================
// 城市固体废弃物工具集 - 废弃物分类决策树
// ==========================================
// 职责: 固定问卷的有限状态机 + 大型产生者判定
// 输入: 地区 + 日产量（升/天）+ 已回答的问题
// 输出: Assessment（产生者身份 + 分类或待答问题 + 路径）
// ==========================================
// 红线: "来源已知"与"来源未知"两个分支汇合到同一个 Q3/Q4 子树
// 红线: 产生者身份与分类路径相互独立
// ==========================================

use crate::domain::region::{find_region, RegionThreshold, REGION_THRESHOLDS};
use crate::domain::types::{Answer, Classification, GeneratorStatus, Question};
use crate::engine::error::{EngineResult, InvalidInputError};
use serde::Serialize;
use tracing::{debug, instrument};

// ==========================================
// 状态机定义
// ==========================================

/// 状态机节点：提问或终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Node {
    Ask(Question),
    Terminal(Classification),
}

/// 起始问题
pub const START: Question = Question::KnownOrigin;

/// 状态转移表
///
/// ```text
/// KNOWN_ORIGIN       YES → LISTED_IN_ANNEX      NO → HAZARD_TRAIT
/// LISTED_IN_ANNEX    YES → Classe I             NO → HAZARD_TRAIT
/// HAZARD_TRAIT       YES → Classe I             NO → SOLUBILITY_EXCEEDS
/// SOLUBILITY_EXCEEDS YES → Classe II A          NO → Classe II B
/// ```
pub const fn transition(question: Question, answer: Answer) -> Node {
    match (question, answer) {
        (Question::KnownOrigin, Answer::Yes) => Node::Ask(Question::ListedInAnnex),
        (Question::KnownOrigin, Answer::No) => Node::Ask(Question::HazardTrait),
        (Question::ListedInAnnex, Answer::Yes) => Node::Terminal(Classification::Hazardous),
        (Question::ListedInAnnex, Answer::No) => Node::Ask(Question::HazardTrait),
        (Question::HazardTrait, Answer::Yes) => Node::Terminal(Classification::Hazardous),
        (Question::HazardTrait, Answer::No) => Node::Ask(Question::SolubilityExceeds),
        (Question::SolubilityExceeds, Answer::Yes) => {
            Node::Terminal(Classification::NonHazardousNonInert)
        }
        (Question::SolubilityExceeds, Answer::No) => {
            Node::Terminal(Classification::NonHazardousInert)
        }
    }
}

// ==========================================
// Answers - 已回答问题（按回答顺序）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Answers {
    entries: Vec<(Question, Answer)>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录回答（同一问题重复回答时覆盖原值，保持原顺序）
    pub fn record(&mut self, question: Question, answer: Answer) -> &mut Self {
        match self.entries.iter_mut().find(|(q, _)| *q == question) {
            Some(entry) => entry.1 = answer,
            None => self.entries.push((question, answer)),
        }
        self
    }

    pub fn with(mut self, question: Question, answer: Answer) -> Self {
        self.record(question, answer);
        self
    }

    pub fn get(&self, question: Question) -> Option<Answer> {
        self.entries
            .iter()
            .find(|(q, _)| *q == question)
            .map(|(_, a)| *a)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Question, Answer)> for Answers {
    fn from_iter<T: IntoIterator<Item = (Question, Answer)>>(iter: T) -> Self {
        let mut answers = Answers::new();
        for (question, answer) in iter {
            answers.record(question, answer);
        }
        answers
    }
}

// ==========================================
// 评估结果
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Classified(Classification),
    Pending(Question), // 下一个待答问题
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub region: RegionThreshold,
    pub daily_quantity: f64,
    pub generator_status: GeneratorStatus,
    pub outcome: Outcome,
    pub trace: Vec<(Question, Answer)>, // 实际走过的路径
}

/// 沿状态机行走，遇到未回答的问题即停止
///
/// 不在路径上的回答被忽略
pub fn traverse(answers: &Answers) -> (Outcome, Vec<(Question, Answer)>) {
    let mut trace = Vec::new();
    let mut current = START;

    loop {
        let Some(answer) = answers.get(current) else {
            return (Outcome::Pending(current), trace);
        };
        trace.push((current, answer));

        match transition(current, answer) {
            Node::Ask(next) => current = next,
            Node::Terminal(classification) => {
                return (Outcome::Classified(classification), trace);
            }
        }
    }
}

/// 大型产生者判定（严格大于阈值）
pub fn generator_status(daily_quantity: f64, threshold: &RegionThreshold) -> GeneratorStatus {
    if daily_quantity > f64::from(threshold.liters_per_day) {
        GeneratorStatus::LargeGenerator
    } else {
        GeneratorStatus::NotLargeGenerator
    }
}

// ==========================================
// ClassificationEngine - 分类引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct ClassificationEngine {
    thresholds: Vec<RegionThreshold>,
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassificationEngine {
    /// 使用内置阈值表
    pub fn new() -> Self {
        Self::with_thresholds(REGION_THRESHOLDS.to_vec())
    }

    /// 使用自定义阈值表（通常由配置覆盖后生成）
    pub fn with_thresholds(thresholds: Vec<RegionThreshold>) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &[RegionThreshold] {
        &self.thresholds
    }

    /// 按州全称或 UF 代码解析地区
    pub fn resolve_region(&self, region: &str) -> EngineResult<RegionThreshold> {
        find_region(&self.thresholds, region)
            .copied()
            .ok_or_else(|| InvalidInputError::UnknownRegion(region.trim().to_string()))
    }

    /// 评估（纯函数：相同输入必得相同输出）
    #[instrument(skip(self, answers), fields(answered = answers.len()))]
    pub fn classify(
        &self,
        region: &str,
        daily_quantity: f64,
        answers: &Answers,
    ) -> EngineResult<Assessment> {
        if !daily_quantity.is_finite() || daily_quantity < 0.0 {
            return Err(InvalidInputError::InvalidQuantity(daily_quantity));
        }

        let threshold = self.resolve_region(region)?;

        let generator_status = generator_status(daily_quantity, &threshold);
        let (outcome, trace) = traverse(answers);

        debug!(
            region = threshold.name,
            threshold = threshold.liters_per_day,
            status = %generator_status,
            outcome = ?outcome,
            "分类评估完成"
        );

        Ok(Assessment {
            region: threshold,
            daily_quantity,
            generator_status,
            outcome,
            trace,
        })
    }
}

// ==========================================
// Questionnaire - 逐题作答驱动器
// ==========================================
// 每次只推进一步；非法操作不改变状态
#[derive(Debug, Clone, Default)]
pub struct Questionnaire {
    path: Vec<(Question, Answer)>,
}

impl Questionnaire {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前状态
    pub fn outcome(&self) -> Outcome {
        let answers: Answers = self.path.iter().copied().collect();
        traverse(&answers).0
    }

    /// 当前待答问题（已得出结论时为 None）
    pub fn current(&self) -> Option<Question> {
        match self.outcome() {
            Outcome::Pending(question) => Some(question),
            Outcome::Classified(_) => None,
        }
    }

    /// 回答当前问题
    pub fn answer(&mut self, answer: Answer) -> EngineResult<Outcome> {
        match self.outcome() {
            Outcome::Classified(classification) => {
                Err(InvalidInputError::AlreadyClassified(classification))
            }
            Outcome::Pending(question) => {
                self.path.push((question, answer));
                Ok(self.outcome())
            }
        }
    }

    /// 撤销上一题
    pub fn undo(&mut self) -> Option<(Question, Answer)> {
        self.path.pop()
    }

    pub fn reset(&mut self) {
        self.path.clear();
    }

    pub fn answers(&self) -> Answers {
        self.path.iter().copied().collect()
    }

    pub fn path(&self) -> &[(Question, Answer)] {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::region::REGION_THRESHOLDS;

    fn answers(entries: &[(Question, Answer)]) -> Answers {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_empty_answers_pending_on_first_question() {
        let (outcome, trace) = traverse(&Answers::new());
        assert_eq!(outcome, Outcome::Pending(Question::KnownOrigin));
        assert!(trace.is_empty());
    }

    #[test]
    fn test_known_origin_listed_short_circuits() {
        let given = answers(&[
            (Question::KnownOrigin, Answer::Yes),
            (Question::ListedInAnnex, Answer::Yes),
            (Question::HazardTrait, Answer::No),
            (Question::SolubilityExceeds, Answer::No),
        ]);

        let (outcome, trace) = traverse(&given);

        assert_eq!(outcome, Outcome::Classified(Classification::Hazardous));
        assert_eq!(trace.len(), 2, "Q3/Q4 不应被评估");
    }

    #[test]
    fn test_unknown_origin_skips_annex_question() {
        let given = answers(&[
            (Question::KnownOrigin, Answer::No),
            (Question::ListedInAnnex, Answer::Yes),
        ]);

        let (outcome, _) = traverse(&given);

        assert_eq!(outcome, Outcome::Pending(Question::HazardTrait));
    }

    #[test]
    fn test_transition_table_converges_on_hazard_trait() {
        assert_eq!(
            transition(Question::KnownOrigin, Answer::No),
            transition(Question::ListedInAnnex, Answer::No)
        );
    }

    #[test]
    fn test_generator_status_boundary() {
        let sao_paulo = REGION_THRESHOLDS
            .iter()
            .find(|r| r.uf == "SP")
            .unwrap();
        assert_eq!(generator_status(250.0, sao_paulo), GeneratorStatus::LargeGenerator);
        assert_eq!(generator_status(200.0, sao_paulo), GeneratorStatus::NotLargeGenerator);
        assert_eq!(generator_status(200.0001, sao_paulo), GeneratorStatus::LargeGenerator);
    }

    #[test]
    fn test_classify_rejects_invalid_quantity() {
        let engine = ClassificationEngine::new();
        assert_eq!(
            engine.classify("São Paulo", -1.0, &Answers::new()),
            Err(InvalidInputError::InvalidQuantity(-1.0))
        );
        assert!(engine.classify("São Paulo", f64::NAN, &Answers::new()).is_err());
    }

    #[test]
    fn test_classify_rejects_unknown_region() {
        let engine = ClassificationEngine::new();
        assert_eq!(
            engine.classify("Atlântida", 10.0, &Answers::new()),
            Err(InvalidInputError::UnknownRegion("Atlântida".to_string()))
        );
    }

    #[test]
    fn test_custom_thresholds_replace_builtin_table() {
        let mut thresholds = REGION_THRESHOLDS.to_vec();
        if let Some(bahia) = thresholds.iter_mut().find(|r| r.uf == "BA") {
            bahia.liters_per_day = 50;
        }
        let engine = ClassificationEngine::with_thresholds(thresholds);

        let assessment = engine.classify("Bahia", 60.0, &Answers::new()).unwrap();

        assert_eq!(assessment.region.liters_per_day, 50);
        assert_eq!(assessment.generator_status, GeneratorStatus::LargeGenerator);
        assert_eq!(engine.resolve_region("sp").unwrap().liters_per_day, 200);
    }

    #[test]
    fn test_questionnaire_step_by_step() {
        let mut questionnaire = Questionnaire::new();
        assert_eq!(questionnaire.current(), Some(Question::KnownOrigin));

        assert_eq!(
            questionnaire.answer(Answer::No),
            Ok(Outcome::Pending(Question::HazardTrait))
        );
        assert_eq!(
            questionnaire.answer(Answer::No),
            Ok(Outcome::Pending(Question::SolubilityExceeds))
        );
        assert_eq!(
            questionnaire.answer(Answer::Yes),
            Ok(Outcome::Classified(Classification::NonHazardousNonInert))
        );
        assert_eq!(questionnaire.current(), None);
    }

    #[test]
    fn test_questionnaire_rejects_answer_after_terminal() {
        let mut questionnaire = Questionnaire::new();
        questionnaire.answer(Answer::Yes).unwrap();
        questionnaire.answer(Answer::Yes).unwrap();

        let before = questionnaire.path().to_vec();
        assert_eq!(
            questionnaire.answer(Answer::No),
            Err(InvalidInputError::AlreadyClassified(Classification::Hazardous))
        );
        assert_eq!(questionnaire.path(), before.as_slice());
    }

    #[test]
    fn test_questionnaire_undo_and_reset() {
        let mut questionnaire = Questionnaire::new();
        questionnaire.answer(Answer::Yes).unwrap();
        questionnaire.answer(Answer::No).unwrap();
        assert_eq!(questionnaire.current(), Some(Question::HazardTrait));

        assert_eq!(
            questionnaire.undo(),
            Some((Question::ListedInAnnex, Answer::No))
        );
        assert_eq!(questionnaire.current(), Some(Question::ListedInAnnex));

        questionnaire.reset();
        assert_eq!(questionnaire.current(), Some(Question::KnownOrigin));
        assert!(questionnaire.answers().is_empty());
    }
}
