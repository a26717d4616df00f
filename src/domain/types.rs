// ==========================================
// 城市固体废弃物工具集 - 领域类型定义
// ==========================================
// 红线: 物料标识是枚举，不是自由字符串
// 红线: 分类结果是等级制（I / II A / II B），不是评分制
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 物料类别 (Material Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialCategory {
    Recyclable, // 生活+公共垃圾中的可回收/有机组分
    Debris,     // 建筑/拆除垃圾组分
}

// ==========================================
// 物料 (Material)
// ==========================================
// 序列化名即源表格中的列名（葡语原文）
// 注意: Papel/Papelão 与 Papel、Plásticos 与 Plástico、Metais 与 Metal 是不同物料
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Material {
    // ===== 可回收/有机 =====
    #[serde(rename = "Papel/Papelão")]
    PaperCardboard,
    #[serde(rename = "Plásticos")]
    Plastics,
    #[serde(rename = "Vidros")]
    Glass,
    #[serde(rename = "Metais")]
    Metals,
    #[serde(rename = "Orgânicos")]
    Organics,

    // ===== 建筑垃圾 =====
    #[serde(rename = "Concreto")]
    Concrete,
    #[serde(rename = "Argamassa")]
    Mortar,
    #[serde(rename = "Tijolo")]
    Brick,
    #[serde(rename = "Madeira")]
    Wood,
    #[serde(rename = "Papel")]
    Paper,
    #[serde(rename = "Plástico")]
    Plastic,
    #[serde(rename = "Metal")]
    Metal,
    #[serde(rename = "Material agregado")]
    AggregateMaterial,
    #[serde(rename = "Terra bruta")]
    RawEarth,
    #[serde(rename = "Pedra")]
    Stone,
    #[serde(rename = "Caliça Retida")]
    RetainedRubble,
    #[serde(rename = "Caliça Peneirada")]
    SievedRubble,
    #[serde(rename = "Cerâmica")]
    Ceramic,
    #[serde(rename = "Material orgânico e galhos")]
    OrganicAndBranches,
    #[serde(rename = "Outros")]
    Other,
}

impl Material {
    /// 生活+公共垃圾分摊使用的五种物料（顺序即输出顺序）
    pub const RECYCLABLES: [Material; 5] = [
        Material::PaperCardboard,
        Material::Plastics,
        Material::Glass,
        Material::Metals,
        Material::Organics,
    ];

    /// 全部物料
    pub const ALL: [Material; 20] = [
        Material::PaperCardboard,
        Material::Plastics,
        Material::Glass,
        Material::Metals,
        Material::Organics,
        Material::Concrete,
        Material::Mortar,
        Material::Brick,
        Material::Wood,
        Material::Paper,
        Material::Plastic,
        Material::Metal,
        Material::AggregateMaterial,
        Material::RawEarth,
        Material::Stone,
        Material::RetainedRubble,
        Material::SievedRubble,
        Material::Ceramic,
        Material::OrganicAndBranches,
        Material::Other,
    ];

    /// 源表格列名
    pub fn label(&self) -> &'static str {
        match self {
            Material::PaperCardboard => "Papel/Papelão",
            Material::Plastics => "Plásticos",
            Material::Glass => "Vidros",
            Material::Metals => "Metais",
            Material::Organics => "Orgânicos",
            Material::Concrete => "Concreto",
            Material::Mortar => "Argamassa",
            Material::Brick => "Tijolo",
            Material::Wood => "Madeira",
            Material::Paper => "Papel",
            Material::Plastic => "Plástico",
            Material::Metal => "Metal",
            Material::AggregateMaterial => "Material agregado",
            Material::RawEarth => "Terra bruta",
            Material::Stone => "Pedra",
            Material::RetainedRubble => "Caliça Retida",
            Material::SievedRubble => "Caliça Peneirada",
            Material::Ceramic => "Cerâmica",
            Material::OrganicAndBranches => "Material orgânico e galhos",
            Material::Other => "Outros",
        }
    }

    /// 按列名解析（去除首尾空白，区分大小写）
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Material::ALL.iter().copied().find(|m| m.label() == label)
    }

    pub fn category(&self) -> MaterialCategory {
        if Material::RECYCLABLES.contains(self) {
            MaterialCategory::Recyclable
        } else {
            MaterialCategory::Debris
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 问卷问题 (Question)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Question {
    KnownOrigin,       // Q1 来源是否已知
    ListedInAnnex,     // Q2 是否列入附录 A 或 B
    HazardTrait,       // Q3 是否具有危险特性（易燃/腐蚀/反应/毒性/病原）
    SolubilityExceeds, // Q4 溶出成分是否超过附录 G 限值
}

impl Question {
    pub const ALL: [Question; 4] = [
        Question::KnownOrigin,
        Question::ListedInAnnex,
        Question::HazardTrait,
        Question::SolubilityExceeds,
    ];

    /// 问题文本（葡语原文，供展示层使用）
    pub fn prompt(&self) -> &'static str {
        match self {
            Question::KnownOrigin => "O resíduo tem origem conhecida?",
            Question::ListedInAnnex => "O resíduo consta nos anexos A ou B?",
            Question::HazardTrait => {
                "O resíduo apresenta inflamabilidade, corrosividade, reatividade, toxicidade ou patogenicidade?"
            }
            Question::SolubilityExceeds => {
                "Os constituintes solubilizados excedem os limites do anexo G?"
            }
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Question::KnownOrigin => write!(f, "KNOWN_ORIGIN"),
            Question::ListedInAnnex => write!(f, "LISTED_IN_ANNEX"),
            Question::HazardTrait => write!(f, "HAZARD_TRAIT"),
            Question::SolubilityExceeds => write!(f, "SOLUBILITY_EXCEEDS"),
        }
    }
}

// ==========================================
// 回答 (Answer)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// 从文本解析回答
    ///
    /// 接受: sim/s/yes/y/true/1 与 não/nao/n/no/false/0（忽略大小写与首尾空白）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "sim" | "s" | "yes" | "y" | "true" | "1" => Some(Answer::Yes),
            "não" | "nao" | "n" | "no" | "false" | "0" => Some(Answer::No),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Yes => write!(f, "YES"),
            Answer::No => write!(f, "NO"),
        }
    }
}

// ==========================================
// 废弃物分类 (Classification)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Hazardous,            // Classe I
    NonHazardousNonInert, // Classe II A
    NonHazardousInert,    // Classe II B
}

impl Classification {
    pub fn class_code(&self) -> &'static str {
        match self {
            Classification::Hazardous => "I",
            Classification::NonHazardousNonInert => "II A",
            Classification::NonHazardousInert => "II B",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Classification::Hazardous => "Resíduo Perigoso (Classe I)",
            Classification::NonHazardousNonInert => "Resíduo Não Perigoso, Não Inerte (Classe II A)",
            Classification::NonHazardousInert => "Resíduo Não Perigoso, Inerte (Classe II B)",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Hazardous => write!(f, "HAZARDOUS"),
            Classification::NonHazardousNonInert => write!(f, "NON_HAZARDOUS_NON_INERT"),
            Classification::NonHazardousInert => write!(f, "NON_HAZARDOUS_INERT"),
        }
    }
}

// ==========================================
// 产生者身份 (Generator Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneratorStatus {
    LargeGenerator,    // 大型产生者（日产量严格大于地区阈值）
    NotLargeGenerator, // 非大型产生者
}

impl fmt::Display for GeneratorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorStatus::LargeGenerator => write!(f, "LARGE_GENERATOR"),
            GeneratorStatus::NotLargeGenerator => write!(f, "NOT_LARGE_GENERATOR"),
        }
    }
}
