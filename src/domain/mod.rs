// ==========================================
// CycleEye 节拍分析系统 - 领域模型层
// ==========================================
// 职责: 定义记录、统计、报告等领域实体与类型
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod record;
pub mod report;
pub mod series;
pub mod statistics;
pub mod types;
pub mod zone_map;

// 重导出核心类型
pub use record::{
    CleaningReport, CycleRecord, Dataset, FlaggedCycleRecord, RawCycleRecord, RawTable,
};
pub use report::{
    AnalysisReport, AnomalySample, Evaluation, HistogramHint, Recommendation, ReportSummary,
    TimeseriesHint, ZoneReport, ZoneStatsView,
};
pub use series::{HistogramSeries, OutlierOverview, TimeseriesPoint, TimeseriesSeries};
pub use statistics::{ZoneStatistics, ZoneStatisticsMap};
pub use types::{AnomalyConfidence, RecommendationPriority, ZoneStatus};
pub use zone_map::ZoneMap;
