// ==========================================
// CycleEye 节拍分析系统 - 达成状态判定
// ==========================================
// 规则（按顺序）: rate >= good → GOOD; rate >= ok → OK; 否则 BAD
// 边界值归入更高一档
// ==========================================

use crate::domain::types::ZoneStatus;

/// 由达成率判定状态
pub fn classify(achieve_rate: f64, threshold_good: f64, threshold_ok: f64) -> ZoneStatus {
    if achieve_rate >= threshold_good {
        ZoneStatus::Good
    } else if achieve_rate >= threshold_ok {
        ZoneStatus::Ok
    } else {
        ZoneStatus::Bad
    }
}

/// 判定阈值对
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusThresholds {
    pub good: f64,
    pub ok: f64,
}

impl StatusThresholds {
    pub fn new(good: f64, ok: f64) -> Self {
        Self { good, ok }
    }

    pub fn classify(&self, achieve_rate: f64) -> ZoneStatus {
        classify(achieve_rate, self.good, self.ok)
    }
}
