// ==========================================
// 城市固体废弃物工具集 - 配置层
// ==========================================
// 职责: 应用配置加载与校验
// 存储: JSON 文件（可选），缺省时使用内置默认值
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{AppConfig, ConfigError, ConfigManager, CONFIG_ENV_VAR};
