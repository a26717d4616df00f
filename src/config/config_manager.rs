// ==========================================
// 城市固体废弃物工具集 - 配置管理器
// ==========================================
// 职责: 配置加载（JSON 文件 → 默认值兜底）与物料列表解析
// 环境变量: WASTE_TOOLKIT_CONFIG 指定配置文件路径
// ==========================================

use crate::domain::region::{find_region, RegionThreshold, REGION_THRESHOLDS};
use crate::domain::types::Material;
use crate::engine::summary::{DEFAULT_CHART_MATERIALS, DEFAULT_SUMMARY_MATERIALS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_ENV_VAR: &str = "WASTE_TOOLKIT_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    Read { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    Parse { path: String, message: String },

    #[error("配置中的物料名未知 ({key}): {label}")]
    UnknownMaterial { key: String, label: String },

    #[error("配置中的物料名重复 ({key}): {label}")]
    DuplicateMaterial { key: String, label: String },

    #[error("配置中的地区未知 (region_thresholds): {0}")]
    UnknownRegion(String),

    #[error("地区阈值必须大于 0 (region_thresholds): {region} = {value}")]
    InvalidThreshold { region: String, value: u32 },
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 日志过滤器（RUST_LOG 优先）
    pub log_filter: String,
    /// "处理总量"计入的物料（源表列名）
    pub summary_materials: Vec<String>,
    /// 按 UF 分组的图表物料（源表列名）
    pub chart_materials: Vec<String>,
    /// 大型产生者阈值覆盖（州全称或 UF → 升/天）
    pub region_thresholds: BTreeMap<String, u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            summary_materials: DEFAULT_SUMMARY_MATERIALS
                .iter()
                .map(|m| m.label().to_string())
                .collect(),
            chart_materials: DEFAULT_CHART_MATERIALS
                .iter()
                .map(|m| m.label().to_string())
                .collect(),
            region_thresholds: BTreeMap::new(),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// 从文件加载；文件不存在时使用默认配置
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        if !path.exists() {
            debug!(path = %shown, "配置文件不存在，使用默认配置");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: shown.clone(),
            message: e.to_string(),
        })?;
        let config: AppConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: shown.clone(),
            message: e.to_string(),
        })?;

        let manager = Self { config };
        // 提前校验物料名与地区阈值
        manager.summary_materials()?;
        manager.chart_materials()?;
        manager.region_thresholds()?;

        info!(path = %shown, "配置加载完成");
        Ok(manager)
    }

    /// 从环境变量指定的路径加载；未设置时使用默认配置
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn log_filter(&self) -> &str {
        &self.config.log_filter
    }

    pub fn summary_materials(&self) -> Result<Vec<Material>, ConfigError> {
        Self::parse_materials("summary_materials", &self.config.summary_materials)
    }

    pub fn chart_materials(&self) -> Result<Vec<Material>, ConfigError> {
        Self::parse_materials("chart_materials", &self.config.chart_materials)
    }

    /// 内置阈值表叠加配置覆盖
    pub fn region_thresholds(&self) -> Result<Vec<RegionThreshold>, ConfigError> {
        let mut thresholds = REGION_THRESHOLDS.to_vec();
        for (key, value) in &self.config.region_thresholds {
            if *value == 0 {
                return Err(ConfigError::InvalidThreshold {
                    region: key.clone(),
                    value: *value,
                });
            }
            let uf = find_region(&REGION_THRESHOLDS, key)
                .map(|r| r.uf)
                .ok_or_else(|| ConfigError::UnknownRegion(key.clone()))?;
            if let Some(entry) = thresholds.iter_mut().find(|r| r.uf == uf) {
                entry.liters_per_day = *value;
            }
        }
        Ok(thresholds)
    }

    // 同一列表内物料不得重复
    fn parse_materials(key: &str, labels: &[String]) -> Result<Vec<Material>, ConfigError> {
        let mut materials = Vec::with_capacity(labels.len());
        for label in labels {
            let material =
                Material::from_label(label).ok_or_else(|| ConfigError::UnknownMaterial {
                    key: key.to_string(),
                    label: label.clone(),
                })?;
            if materials.contains(&material) {
                return Err(ConfigError::DuplicateMaterial {
                    key: key.to_string(),
                    label: label.clone(),
                });
            }
            materials.push(material);
        }
        Ok(materials)
    }
}
