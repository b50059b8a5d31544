// ==========================================
// CycleEye 节拍分析系统 - 报告组装器
// ==========================================
// 职责: 带标记记录 + 区域统计 → AnalysisReport
// 内容: 统计视图 / 直方图提示 / 时序点数 / 异常样本 / 评价 / 建议
// 红线: 纯转换,无 I/O；文本取自 locales（按配置语言）
// ==========================================

use crate::config::defaults;
use crate::domain::record::FlaggedCycleRecord;
use crate::domain::report::{
    AnalysisReport, AnomalySample, Evaluation, HistogramHint, Recommendation, ReportSummary,
    TimeseriesHint, ZoneReport, ZoneStatsView,
};
use crate::domain::statistics::{ZoneStatistics, ZoneStatisticsMap};
use crate::domain::types::RecommendationPriority;
use crate::domain::zone_map::ZoneMap;
use crate::engine::status::classify;
use crate::i18n;

/// 标准差超过该值（秒）即提示工程不稳定
pub const INSTABILITY_STD_THRESHOLD: f64 = 1.0;

/// 追加数据需求的文本键
const REQUESTED_DATA_KEYS: [&str; 3] = [
    "report.requested_data.operator",
    "report.requested_data.maintenance",
    "report.requested_data.material_lot",
];

// ==========================================
// ReportAssembler - 报告组装器
// ==========================================
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    locale: String,
    anomaly_sample_limit: usize,
    histogram_bins: usize,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(
            defaults::LOCALE,
            defaults::ANOMALY_SAMPLE_LIMIT,
            defaults::HISTOGRAM_BINS,
        )
    }
}

impl ReportAssembler {
    pub fn new(locale: &str, anomaly_sample_limit: usize, histogram_bins: usize) -> Self {
        Self {
            locale: locale.to_string(),
            anomaly_sample_limit,
            histogram_bins,
        }
    }

    /// 组装报告
    ///
    /// # 参数
    /// - records: 带标记记录（原始顺序）
    /// - zone_stats: 区域统计（迭代顺序即输出顺序）
    /// - threshold_good / threshold_ok: 状态判定阈值
    pub fn assemble(
        &self,
        records: &[FlaggedCycleRecord],
        zone_stats: &ZoneStatisticsMap,
        threshold_good: f64,
        threshold_ok: f64,
    ) -> AnalysisReport {
        let zones: ZoneMap<ZoneReport> = zone_stats
            .iter()
            .map(|(zone, stats)| {
                (
                    zone.to_string(),
                    self.zone_report(records, zone, stats, threshold_good, threshold_ok),
                )
            })
            .collect();

        AnalysisReport {
            summary: ReportSummary {
                overall_comment: self.text("report.overall_comment"),
            },
            zones,
            requested_additional_data: REQUESTED_DATA_KEYS
                .iter()
                .map(|key| self.text(key))
                .collect(),
        }
    }

    fn zone_report(
        &self,
        records: &[FlaggedCycleRecord],
        zone: &str,
        stats: &ZoneStatistics,
        threshold_good: f64,
        threshold_ok: f64,
    ) -> ZoneReport {
        let status = classify(stats.achieve_rate, threshold_good, threshold_ok);
        let rate = format!("{:.1}", stats.achieve_rate);

        ZoneReport {
            stats: ZoneStatsView {
                target: stats.target,
                mean: stats.mean,
                min: stats.min,
                max: stats.max,
                achieve_rate: stats.achieve_rate,
                status,
            },
            histogram: HistogramHint {
                x_min: stats.min,
                x_max: stats.max,
                bins: self.histogram_bins,
            },
            timeseries: TimeseriesHint {
                point_count: stats.count,
                notes: self.text("report.timeseries_notes"),
            },
            anomalies: self.anomaly_samples(records, zone),
            evaluation: Evaluation {
                short: i18n::text_with_args(
                    &self.locale,
                    "report.evaluation",
                    &[
                        ("rate", rate.as_str()),
                        ("status", status.symbol()),
                    ],
                ),
            },
            recommendations: self.recommendations(stats, threshold_ok),
        }
    }

    /// 区域内异常记录（iqr_flag OR zscore_flag）,原始顺序取前 N 条
    fn anomaly_samples(&self, records: &[FlaggedCycleRecord], zone: &str) -> Vec<AnomalySample> {
        records
            .iter()
            .filter(|r| r.zone_name() == zone && r.is_anomaly())
            .take(self.anomaly_sample_limit)
            .map(|r| AnomalySample {
                timestamp: r.record.timestamp_label(),
                value: r.value(),
                iqr_flag: r.iqr_flag,
                zscore_flag: r.zscore_flag,
            })
            .collect()
    }

    /// 建议生成: 达成率不足 → High；标准差过大 → Medium（可同时触发）
    fn recommendations(&self, stats: &ZoneStatistics, threshold_ok: f64) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();
        let rate = format!("{:.1}", stats.achieve_rate);
        let mean = format!("{:.1}", stats.mean);
        let target = format!("{:.1}", stats.target);
        let std = format!("{:.1}", stats.std);

        if stats.achieve_rate < threshold_ok {
            recommendations.push(Recommendation {
                text: i18n::text_with_args(
                    &self.locale,
                    "report.gap_text",
                    &[
                        ("mean", mean.as_str()),
                        ("target", target.as_str()),
                    ],
                ),
                priority: RecommendationPriority::High,
                reason: i18n::text_with_args(
                    &self.locale,
                    "report.gap_reason",
                    &[("rate", rate.as_str())],
                ),
            });
        }

        if stats.std > INSTABILITY_STD_THRESHOLD {
            recommendations.push(Recommendation {
                text: self.text("report.unstable_text"),
                priority: RecommendationPriority::Medium,
                reason: i18n::text_with_args(
                    &self.locale,
                    "report.unstable_reason",
                    &[("std", std.as_str())],
                ),
            });
        }

        recommendations
    }

    fn text(&self, key: &str) -> String {
        i18n::text(&self.locale, key)
    }
}
