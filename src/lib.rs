// ==========================================
// CycleEye 节拍分析系统 - 核心库
// ==========================================
// 技术栈: Rust + csv/calamine + tracing + moka
// 系统定位: 多区域生产线周期时间分析（分析结果交由外部叙述生成与看板使用）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "ja");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 分析规则
pub mod engine;

// 配置层 - 分析参数
pub mod config;

// 导出层 - 报告文件
pub mod export;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AnomalyConfidence, RecommendationPriority, ZoneStatus};

// 领域实体
pub use domain::{
    AnalysisReport, CleaningReport, CycleRecord, Dataset, FlaggedCycleRecord, RawCycleRecord,
    ZoneMap, ZoneStatistics, ZoneStatisticsMap,
};

// 引擎
pub use engine::{
    AnalysisCache, AnalysisError, AnalysisOutcome, AnalysisPipeline, AnalysisResult,
    OutlierDetector, Preprocessor, ReportAssembler, StatisticsAggregator,
};

// 导入与配置
pub use config::{AnalysisConfig, ConfigError};
pub use importer::{load_dataset, ImportError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "CycleEye";
