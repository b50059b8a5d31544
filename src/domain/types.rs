// ==========================================
// CycleEye 节拍分析系统 - 领域类型定义
// ==========================================
// 职责: 达成状态 / 建议优先级 / 异常置信度
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 达成状态 (Zone Status)
// ==========================================
// 顺序: Bad < Ok < Good (派生 Ord 依赖声明顺序)
// 序列化格式: "○" / "△" / "×" (下游叙述生成器依赖此取值)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneStatus {
    #[serde(rename = "×")]
    Bad, // 未达标
    #[serde(rename = "△")]
    Ok, // 关注
    #[serde(rename = "○")]
    Good, // 达标
}

impl ZoneStatus {
    /// 界面展示用的三态符号（○ / △ / ×）
    pub fn symbol(&self) -> &'static str {
        match self {
            ZoneStatus::Good => "○",
            ZoneStatus::Ok => "△",
            ZoneStatus::Bad => "×",
        }
    }
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneStatus::Good => write!(f, "GOOD"),
            ZoneStatus::Ok => write!(f, "OK"),
            ZoneStatus::Bad => write!(f, "BAD"),
        }
    }
}

// ==========================================
// 建议优先级 (Recommendation Priority)
// ==========================================
// 序列化格式: "High" / "Medium" (下游叙述生成器依赖此取值)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationPriority {
    High,   // 达成率不足
    Medium, // 波动过大
}

impl fmt::Display for RecommendationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationPriority::High => write!(f, "High"),
            RecommendationPriority::Medium => write!(f, "Medium"),
        }
    }
}

// ==========================================
// 异常置信度 (Anomaly Confidence)
// ==========================================
// 两种检验同时命中 = High, 仅命中其一 = Low
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyConfidence {
    High,
    Low,
}

impl AnomalyConfidence {
    /// 由两个独立标记推导置信度；均未命中时返回 None
    pub fn from_flags(iqr_flag: bool, zscore_flag: bool) -> Option<Self> {
        match (iqr_flag, zscore_flag) {
            (true, true) => Some(AnomalyConfidence::High),
            (true, false) | (false, true) => Some(AnomalyConfidence::Low),
            (false, false) => None,
        }
    }
}

impl fmt::Display for AnomalyConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyConfidence::High => write!(f, "HIGH"),
            AnomalyConfidence::Low => write!(f, "LOW"),
        }
    }
}
