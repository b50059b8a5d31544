// ==========================================
// CycleEye 节拍分析系统 - 区域统计模型
// ==========================================
// 用途: 统计聚合器输出,报告组装器输入
// 约定: 所有数值字段已四舍五入到 1 位小数
// ==========================================

use crate::domain::zone_map::ZoneMap;
use serde::{Deserialize, Serialize};

// ==========================================
// ZoneStatistics - 单区域描述统计
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneStatistics {
    pub target: f64,       // 目标节拍（秒）
    pub mean: f64,         // 平均值
    pub min: f64,          // 最小值
    pub max: f64,          // 最大值
    pub std: f64,          // 样本标准差
    pub achieve_rate: f64, // 达成率 = target / mean * 100（mean <= 0 时为 0）
    pub count: usize,      // 样本数
}

/// 区域 → 统计；无数据的区域不出现在映射中
pub type ZoneStatisticsMap = ZoneMap<ZoneStatistics>;
