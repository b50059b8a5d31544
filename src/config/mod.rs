// ==========================================
// CycleEye 节拍分析系统 - 配置层
// ==========================================
// 职责: 分析参数加载、校验、默认值回退
// 存储: JSON 文件 + 环境变量覆写
// ==========================================

pub mod analysis_config;

// 重导出核心配置类型
pub use analysis_config::{
    default_config_path, defaults, env_keys, AnalysisConfig, ConfigError,
};
