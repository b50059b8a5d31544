// ==========================================
// CycleEye 节拍分析系统 - 可视化数据序列
// ==========================================
// 用途: 供图表协作方直接绘制（本层不负责绘制）
// ==========================================

use crate::domain::record::FlaggedCycleRecord;
use serde::Serialize;

// ==========================================
// HistogramSeries - 区域直方图
// ==========================================
// edges.len() == counts.len() + 1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSeries {
    pub target: f64,
    pub bin_width: f64,
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

// ==========================================
// TimeseriesSeries - 区域时序
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeseriesSeries {
    pub target: f64,
    pub points: Vec<TimeseriesPoint>,
    /// 居中移动平均；样本数不足窗口时为 None
    pub moving_average: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeseriesPoint {
    pub label: String, // 时间戳或行号
    pub value: f64,
}

// ==========================================
// OutlierOverview - 按置信度分组的异常一览
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutlierOverview {
    pub high_confidence_count: usize,
    pub low_confidence_count: usize,
    pub high_confidence: Vec<FlaggedCycleRecord>, // 截断至 OVERVIEW_LIST_LIMIT
    pub low_confidence: Vec<FlaggedCycleRecord>,
}
