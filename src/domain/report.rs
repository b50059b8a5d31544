// ==========================================
// CycleEye 节拍分析系统 - 分析报告模型
// ==========================================
// 用途: 叙述生成器输入 / JSON 导出
// 红线: 字段名与嵌套结构即对外契约,变更即破坏性变更
// ==========================================

use crate::domain::types::{RecommendationPriority, ZoneStatus};
use crate::domain::zone_map::ZoneMap;
use serde::Serialize;

// ==========================================
// AnalysisReport - 顶层报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: ReportSummary,
    pub zones: ZoneMap<ZoneReport>,
    pub requested_additional_data: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub overall_comment: String,
}

// ==========================================
// ZoneReport - 单区域报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneReport {
    pub stats: ZoneStatsView,
    pub histogram: HistogramHint,
    pub timeseries: TimeseriesHint,
    pub anomalies: Vec<AnomalySample>,
    pub evaluation: Evaluation,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneStatsView {
    pub target: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub achieve_rate: f64,
    pub status: ZoneStatus,
}

/// 直方图范围提示
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramHint {
    pub x_min: f64,
    pub x_max: f64,
    pub bins: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeseriesHint {
    pub point_count: usize,
    pub notes: String,
}

/// 异常样本（按原始顺序,最多 anomaly_sample_limit 条）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalySample {
    pub timestamp: String,
    pub value: f64,
    pub iqr_flag: bool,
    pub zscore_flag: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub short: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub text: String,
    pub priority: RecommendationPriority,
    pub reason: String,
}
