// ==========================================
// CycleEye 节拍分析系统 - 字段映射器实现
// ==========================================
// 职责: 原始表 → Dataset（类型转换 + NULL 标准化 + 透传列保留）
// 规则: 无法解析的值一律视为缺失,由前处理器计入缺失剔除
// 透传: start_datetime 原文非空时也保留在 extra,作为异常样本的时间戳
// ==========================================

use crate::domain::record::{
    Dataset, RawCycleRecord, RawTable, ADJUSTED_TIME_COLUMN, START_DATETIME_COLUMN,
    ZONE_NAME_COLUMN,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};

/// 可接受的开始时间格式（依次尝试）
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub struct FieldMapper;

impl FieldMapper {
    /// 整表映射,行号沿用原始表中的位置
    pub fn map_table(&self, table: &RawTable) -> Dataset {
        let records = table
            .rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| self.map_row(row, row_index))
            .collect();

        Dataset::new(table.columns.clone(), records)
    }

    /// 单行映射
    pub fn map_row(&self, row: &HashMap<String, String>, row_index: usize) -> RawCycleRecord {
        let extra = row
            .iter()
            .filter(|(k, v)| match k.as_str() {
                ZONE_NAME_COLUMN | ADJUSTED_TIME_COLUMN => false,
                START_DATETIME_COLUMN => !v.trim().is_empty(),
                _ => true,
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<BTreeMap<_, _>>();

        RawCycleRecord {
            row_index,
            zone_name: self.get_string(row, ZONE_NAME_COLUMN),
            adjusted_time_seconds: self.parse_f64(row, ADJUSTED_TIME_COLUMN),
            start_datetime: self.parse_datetime(row, START_DATETIME_COLUMN),
            extra,
        }
    }

    /// 提取字符串字段（空白视为缺失）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        row.get(key).and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 解析浮点数；NaN 与不可解析文本均视为缺失
    fn parse_f64(&self, row: &HashMap<String, String>, key: &str) -> Option<f64> {
        self.get_string(row, key)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| !v.is_nan())
    }

    /// 解析开始时间（RFC 3339 / 常见本地格式 / 纯日期）
    fn parse_datetime(&self, row: &HashMap<String, String>, key: &str) -> Option<NaiveDateTime> {
        let value = self.get_string(row, key)?;

        if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
            return Some(dt.naive_local());
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&value, format) {
                return Some(dt);
            }
        }

        NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}
