// ==========================================
// CycleEye 节拍分析系统 - 周期记录领域模型
// ==========================================
// 职责: 原始表 / 原始记录 / 清洗后记录 / 带标记记录 / 清洗报告
// 流向: RawTable → Dataset → CycleRecord → FlaggedCycleRecord
// 红线: 各阶段只产出新结构,不回写上游结构
// ==========================================

use crate::domain::types::AnomalyConfidence;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ===== 列名常量 =====
pub const ZONE_NAME_COLUMN: &str = "zone_name";
pub const ADJUSTED_TIME_COLUMN: &str = "adjusted_time_seconds";
pub const START_DATETIME_COLUMN: &str = "start_datetime";

/// 必须存在于输入表头的列
pub const REQUIRED_COLUMNS: [&str; 2] = [ZONE_NAME_COLUMN, ADJUSTED_TIME_COLUMN];

/// 时间戳输出格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// RawTable - 文件解析产物（列名 + 行映射）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<String>,                  // 表头（保持文件顺序）
    pub rows: Vec<HashMap<String, String>>,    // 行记录（列名 → 原始文本）
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// RawCycleRecord - 未清洗的周期观测
// ==========================================
// 必填字段以 Option 表示缺失
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCycleRecord {
    pub row_index: usize,                       // 原始表中的位置
    pub zone_name: Option<String>,              // 区域名
    pub adjusted_time_seconds: Option<f64>,     // 修正后周期时间（秒）
    pub start_datetime: Option<NaiveDateTime>,  // 开始时间（可选列）
    #[serde(default)]
    pub extra: BTreeMap<String, String>,        // 透传列
}

impl RawCycleRecord {
    pub fn new(row_index: usize, zone_name: Option<&str>, adjusted_time_seconds: Option<f64>) -> Self {
        Self {
            row_index,
            zone_name: zone_name.map(|z| z.to_string()),
            adjusted_time_seconds,
            start_datetime: None,
            extra: BTreeMap::new(),
        }
    }
}

// ==========================================
// Dataset - 单次分析的输入数据集
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<RawCycleRecord>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<RawCycleRecord>) -> Self {
        Self { columns, records }
    }

    /// 以标准列（zone_name, adjusted_time_seconds）构造数据集
    pub fn with_standard_columns(records: Vec<RawCycleRecord>) -> Self {
        let columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// 返回表头中缺失的必填列（按 REQUIRED_COLUMNS 顺序）
    pub fn missing_required_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect()
    }
}

// ==========================================
// CycleRecord - 清洗后的周期观测
// ==========================================
// 不变量: adjusted_time_seconds > 0 且有限; zone_name 非空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleRecord {
    pub row_index: usize,
    pub zone_name: String,
    pub adjusted_time_seconds: f64,
    pub start_datetime: Option<NaiveDateTime>,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl CycleRecord {
    /// 时间戳标签
    ///
    /// 优先级: extra 中的 start_datetime 原文 > 格式化的开始时间 > 原始行号
    /// 原文保留时区偏移,无法解析的文本也原样输出
    pub fn timestamp_label(&self) -> String {
        if let Some(raw) = self
            .extra
            .get(START_DATETIME_COLUMN)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
        {
            return raw.to_string();
        }

        match self.start_datetime {
            Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
            None => self.row_index.to_string(),
        }
    }
}

// ==========================================
// FlaggedCycleRecord - 异常检测后的记录
// ==========================================
// 两个标记独立计算、独立存储,四种组合均有意义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedCycleRecord {
    #[serde(flatten)]
    pub record: CycleRecord,
    pub iqr_flag: bool,
    pub zscore_flag: bool,
}

impl FlaggedCycleRecord {
    /// 未标记的记录（区域不在枚举内 / 区域被跳过）
    pub fn unflagged(record: CycleRecord) -> Self {
        Self {
            record,
            iqr_flag: false,
            zscore_flag: false,
        }
    }

    pub fn zone_name(&self) -> &str {
        &self.record.zone_name
    }

    pub fn value(&self) -> f64 {
        self.record.adjusted_time_seconds
    }

    /// 任一检验命中即视为异常
    pub fn is_anomaly(&self) -> bool {
        self.iqr_flag || self.zscore_flag
    }

    pub fn confidence(&self) -> Option<AnomalyConfidence> {
        AnomalyConfidence::from_flags(self.iqr_flag, self.zscore_flag)
    }
}

// ==========================================
// CleaningReport - 前处理报告
// ==========================================
// 不变量: original_count = final_count + removed_for_missing_fields + removed_for_invalid_value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub original_count: usize,             // 原始行数
    pub removed_for_missing_fields: usize, // 缺失值剔除
    pub removed_for_invalid_value: usize,  // 无效值剔除（<= 0）
    pub final_count: usize,                // 处理后行数
}

impl CleaningReport {
    /// 行数守恒校验
    pub fn is_conserved(&self) -> bool {
        self.original_count
            == self.final_count + self.removed_for_missing_fields + self.removed_for_invalid_value
    }
}
