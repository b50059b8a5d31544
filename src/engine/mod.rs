// ==========================================
// CycleEye 节拍分析系统 - 引擎层
// ==========================================
// 职责: 前处理 / 异常检测 / 统计聚合 / 状态判定 / 报告组装
// 红线: 引擎不做文件 I/O,所有输出均为新结构
// ==========================================

pub mod cache;
pub mod error;
pub mod numeric;
pub mod orchestrator;
pub mod outlier;
pub mod preprocessor;
pub mod report;
pub mod series;
pub mod statistics;
pub mod status;

// 重导出核心引擎
pub use cache::{cache_key, dataset_fingerprint, AnalysisCache};
pub use error::{AnalysisError, AnalysisResult};
pub use orchestrator::{AnalysisOutcome, AnalysisPipeline};
pub use outlier::{detect_outliers_iqr, detect_outliers_zscore, OutlierDetector};
pub use preprocessor::Preprocessor;
pub use report::ReportAssembler;
pub use series::SeriesBuilder;
pub use statistics::{achieve_rate, StatisticsAggregator};
pub use status::{classify, StatusThresholds};
