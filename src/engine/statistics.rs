// ==========================================
// CycleEye 节拍分析系统 - 统计聚合器
// ==========================================
// 职责: 区域描述统计 + 达成率
// 输入: 带标记记录 + 区域目标节拍映射
// 输出: 区域 → ZoneStatistics（无数据区域不出现）
// ==========================================

use crate::domain::record::FlaggedCycleRecord;
use crate::domain::statistics::{ZoneStatistics, ZoneStatisticsMap};
use crate::engine::numeric::{mean, round1, sample_std};
use std::collections::BTreeMap;

/// 达成率 = target / mean * 100；mean <= 0 时为 0（不设上限）
pub fn achieve_rate(target: f64, mean: f64) -> f64 {
    if mean > 0.0 {
        target / mean * 100.0
    } else {
        0.0
    }
}

// ==========================================
// StatisticsAggregator - 统计聚合器
// ==========================================
#[derive(Debug, Clone)]
pub struct StatisticsAggregator {
    zones: Vec<String>,  // 区域枚举（决定输出顺序）
    default_target: f64, // 目标节拍缺省值
}

impl StatisticsAggregator {
    pub fn new<S: AsRef<str>>(zones: &[S], default_target: f64) -> Self {
        Self {
            zones: zones.iter().map(|z| z.as_ref().to_string()).collect(),
            default_target,
        }
    }

    /// 计算各区域统计
    ///
    /// # 参数
    /// - records: 带标记记录
    /// - targets: 区域 → 目标节拍（缺失时回退 default_target）
    pub fn aggregate(
        &self,
        records: &[FlaggedCycleRecord],
        targets: &BTreeMap<String, f64>,
    ) -> ZoneStatisticsMap {
        let mut stats = ZoneStatisticsMap::new();

        for zone in &self.zones {
            let values: Vec<f64> = records
                .iter()
                .filter(|r| r.zone_name() == zone)
                .map(|r| r.value())
                .collect();

            let (zone_mean, zone_std) = match (mean(&values), sample_std(&values)) {
                (Some(m), Some(s)) => (m, s),
                _ => continue, // 无数据 → 省略
            };

            let zone_min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let zone_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let target = targets.get(zone).copied().unwrap_or(self.default_target);

            stats.insert(
                zone.clone(),
                ZoneStatistics {
                    target: round1(target),
                    mean: round1(zone_mean),
                    min: round1(zone_min),
                    max: round1(zone_max),
                    std: round1(zone_std),
                    achieve_rate: round1(achieve_rate(target, zone_mean)),
                    count: values.len(),
                },
            );
        }

        stats
    }
}
