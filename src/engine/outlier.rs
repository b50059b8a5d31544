// ==========================================
// CycleEye 节拍分析系统 - 异常值检测器
// ==========================================
// 职责: 按区域独立执行 IQR 检验与 Z-score 检验
// 输入: 清洗后记录
// 输出: 带 iqr_flag / zscore_flag 的新记录（顺序不变）
// 红线: 两个标记独立计算,互不影响；枚举外区域两个标记均为 false
// ==========================================

use crate::domain::record::{CycleRecord, FlaggedCycleRecord};
use crate::engine::numeric::{mean, quantile_linear, sample_std, sorted_copy};

/// IQR 围栏系数
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Z-score 阈值
pub const ZSCORE_THRESHOLD: f64 = 3.0;

/// IQR 法: 值严格落在 [Q1 - 1.5·IQR, Q3 + 1.5·IQR] 之外即为异常
pub fn detect_outliers_iqr(values: &[f64]) -> Vec<bool> {
    let sorted = sorted_copy(values);
    let (q1, q3) = match (quantile_linear(&sorted, 0.25), quantile_linear(&sorted, 0.75)) {
        (Some(q1), Some(q3)) => (q1, q3),
        _ => return vec![false; values.len()],
    };

    let iqr = q3 - q1;
    let lower = q1 - IQR_MULTIPLIER * iqr;
    let upper = q3 + IQR_MULTIPLIER * iqr;

    values.iter().map(|&v| v < lower || v > upper).collect()
}

/// Z-score 法: |v - mean| / std > 3 即为异常
///
/// 标准差恰为 0 时（常数序列）全部判为非异常
pub fn detect_outliers_zscore(values: &[f64]) -> Vec<bool> {
    let (m, std) = match (mean(values), sample_std(values)) {
        (Some(m), Some(std)) => (m, std),
        _ => return vec![false; values.len()],
    };

    if std == 0.0 {
        return vec![false; values.len()];
    }

    values
        .iter()
        .map(|&v| ((v - m) / std).abs() > ZSCORE_THRESHOLD)
        .collect()
}

// ==========================================
// OutlierDetector - 异常值检测器
// ==========================================
#[derive(Debug, Clone)]
pub struct OutlierDetector {
    zones: Vec<String>, // 区域枚举
}

impl OutlierDetector {
    pub fn new<S: AsRef<str>>(zones: &[S]) -> Self {
        Self {
            zones: zones.iter().map(|z| z.as_ref().to_string()).collect(),
        }
    }

    /// 为每条记录打标
    ///
    /// # 参数
    /// - records: 清洗后记录
    ///
    /// # 返回
    /// 与输入等长、同序的带标记记录
    pub fn detect(&self, records: &[CycleRecord]) -> Vec<FlaggedCycleRecord> {
        let mut flagged: Vec<FlaggedCycleRecord> = records
            .iter()
            .cloned()
            .map(FlaggedCycleRecord::unflagged)
            .collect();

        for zone in &self.zones {
            let indices: Vec<usize> = records
                .iter()
                .enumerate()
                .filter(|(_, r)| r.zone_name == *zone)
                .map(|(i, _)| i)
                .collect();

            // 空区域跳过
            if indices.is_empty() {
                continue;
            }

            let values: Vec<f64> = indices
                .iter()
                .map(|&i| records[i].adjusted_time_seconds)
                .collect();

            let iqr_flags = detect_outliers_iqr(&values);
            let zscore_flags = detect_outliers_zscore(&values);

            for (k, &i) in indices.iter().enumerate() {
                flagged[i].iqr_flag = iqr_flags[k];
                flagged[i].zscore_flag = zscore_flags[k];
            }
        }

        flagged
    }
}
