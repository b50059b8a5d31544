// ==========================================
// CycleEye 节拍分析系统 - 可视化序列构建
// ==========================================
// 职责: 直方图分箱 / 时序点 / 居中移动平均 / 异常置信度一览
// 说明: 只生成数据,不负责绘制
// ==========================================

use crate::domain::record::FlaggedCycleRecord;
use crate::domain::series::{HistogramSeries, OutlierOverview, TimeseriesPoint, TimeseriesSeries};
use crate::domain::types::AnomalyConfidence;
use crate::domain::zone_map::ZoneMap;
use std::collections::BTreeMap;

/// 直方图公共区间两侧的留白比例
pub const HISTOGRAM_RANGE_MARGIN: f64 = 0.1;

/// 异常一览每个置信度分组的展示上限
pub const OVERVIEW_LIST_LIMIT: usize = 50;

/// 等宽分箱
///
/// 区间 [lower, upper]；upper 落在最后一个箱内
pub fn histogram_counts(values: &[f64], lower: f64, upper: f64, bins: usize) -> (f64, Vec<f64>, Vec<usize>) {
    let bins = bins.max(1);
    let span = upper - lower;
    let bin_width = if span > 0.0 { span / bins as f64 } else { 1.0 };

    let edges: Vec<f64> = (0..=bins).map(|i| lower + i as f64 * bin_width).collect();

    let mut counts = vec![0_usize; bins];
    for &v in values {
        if v < lower || v > upper {
            continue;
        }
        let idx = ((v - lower) / bin_width).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    (bin_width, edges, counts)
}

/// 居中移动平均
///
/// 窗口不完整的位置为 None；样本数不足窗口时返回 None
pub fn centered_moving_average(values: &[f64], window: usize) -> Option<Vec<Option<f64>>> {
    if window == 0 || values.len() < window {
        return None;
    }

    // 偶数窗口时左侧多取一个点
    let left = window / 2;
    let right = window - left - 1;

    let averaged = (0..values.len())
        .map(|i| {
            if i < left || i + right >= values.len() {
                None
            } else {
                let slice = &values[i - left..=i + right];
                Some(slice.iter().sum::<f64>() / window as f64)
            }
        })
        .collect();

    Some(averaged)
}

// ==========================================
// SeriesBuilder - 序列构建器
// ==========================================
#[derive(Debug, Clone)]
pub struct SeriesBuilder {
    zones: Vec<String>,
    bins: usize,
    moving_average_window: usize,
}

impl SeriesBuilder {
    pub fn new<S: AsRef<str>>(zones: &[S], bins: usize, moving_average_window: usize) -> Self {
        Self {
            zones: zones.iter().map(|z| z.as_ref().to_string()).collect(),
            bins,
            moving_average_window,
        }
    }

    fn zone_values<'a>(&self, records: &'a [FlaggedCycleRecord], zone: &'a str) -> impl Iterator<Item = &'a FlaggedCycleRecord> {
        records.iter().filter(move |r| r.zone_name() == zone)
    }

    /// 各区域直方图（所有区域共用同一区间,含 10% 留白）
    pub fn histograms(
        &self,
        records: &[FlaggedCycleRecord],
        targets: &BTreeMap<String, f64>,
        default_target: f64,
    ) -> ZoneMap<HistogramSeries> {
        let mut result = ZoneMap::new();
        if records.is_empty() {
            return result;
        }

        let overall_min = records.iter().map(|r| r.value()).fold(f64::INFINITY, f64::min);
        let overall_max = records.iter().map(|r| r.value()).fold(f64::NEG_INFINITY, f64::max);
        let margin = (overall_max - overall_min) * HISTOGRAM_RANGE_MARGIN;
        let (lower, upper) = (overall_min - margin, overall_max + margin);

        for zone in &self.zones {
            let values: Vec<f64> = self.zone_values(records, zone).map(|r| r.value()).collect();
            if values.is_empty() {
                continue;
            }

            let (bin_width, edges, counts) = histogram_counts(&values, lower, upper, self.bins);
            result.insert(
                zone.clone(),
                HistogramSeries {
                    target: targets.get(zone).copied().unwrap_or(default_target),
                    bin_width,
                    edges,
                    counts,
                },
            );
        }

        result
    }

    /// 各区域时序（按原始行号排序）
    pub fn timeseries(
        &self,
        records: &[FlaggedCycleRecord],
        targets: &BTreeMap<String, f64>,
        default_target: f64,
    ) -> ZoneMap<TimeseriesSeries> {
        let mut result = ZoneMap::new();

        for zone in &self.zones {
            let mut zone_records: Vec<&FlaggedCycleRecord> = self.zone_values(records, zone).collect();
            if zone_records.is_empty() {
                continue;
            }
            zone_records.sort_by_key(|r| r.record.row_index);

            let values: Vec<f64> = zone_records.iter().map(|r| r.value()).collect();
            let points = zone_records
                .iter()
                .map(|r| TimeseriesPoint {
                    label: r.record.timestamp_label(),
                    value: r.value(),
                })
                .collect();

            result.insert(
                zone.clone(),
                TimeseriesSeries {
                    target: targets.get(zone).copied().unwrap_or(default_target),
                    points,
                    moving_average: centered_moving_average(&values, self.moving_average_window),
                },
            );
        }

        result
    }

    /// 异常置信度一览（全部区域）
    pub fn outlier_overview(&self, records: &[FlaggedCycleRecord]) -> OutlierOverview {
        let mut overview = OutlierOverview::default();

        for record in records {
            match record.confidence() {
                Some(AnomalyConfidence::High) => {
                    overview.high_confidence_count += 1;
                    if overview.high_confidence.len() < OVERVIEW_LIST_LIMIT {
                        overview.high_confidence.push(record.clone());
                    }
                }
                Some(AnomalyConfidence::Low) => {
                    overview.low_confidence_count += 1;
                    if overview.low_confidence.len() < OVERVIEW_LIST_LIMIT {
                        overview.low_confidence.push(record.clone());
                    }
                }
                None => {}
            }
        }

        overview
    }
}
