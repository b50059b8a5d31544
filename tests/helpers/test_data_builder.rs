// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};
use cycle_eye::domain::record::{
    Dataset, RawCycleRecord, ADJUSTED_TIME_COLUMN, START_DATETIME_COLUMN, ZONE_NAME_COLUMN,
};
use std::io::Write;
use std::path::Path;

/// 区域内确定性小幅波动: 偏移取 -10..=10 的整数,乘以 step
pub fn jitter(i: usize, step: f64) -> f64 {
    (((i * 37) % 21) as f64 - 10.0) * step
}

pub fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

// ==========================================
// Dataset 构建器
// ==========================================

pub struct DatasetBuilder {
    columns: Vec<String>,
    records: Vec<RawCycleRecord>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self {
            columns: vec![
                ZONE_NAME_COLUMN.to_string(),
                ADJUSTED_TIME_COLUMN.to_string(),
                START_DATETIME_COLUMN.to_string(),
            ],
            records: Vec::new(),
        }
    }

    /// 追加一个区域的 count 行: center + jitter(i, step)
    pub fn zone_series(mut self, zone: &str, count: usize, center: f64, step: f64) -> Self {
        for i in 0..count {
            let row_index = self.records.len();
            let mut record = RawCycleRecord::new(row_index, Some(zone), Some(center + jitter(i, step)));
            let start = base_time() + Duration::seconds(row_index as i64 * 10);
            record.start_datetime = Some(start);
            // 与导入后的形态一致: 原文同时留在 extra
            record.extra.insert(
                START_DATETIME_COLUMN.to_string(),
                start.format("%Y-%m-%d %H:%M:%S").to_string(),
            );
            self.records.push(record);
        }
        self
    }

    /// 追加 count 行固定值
    pub fn constant_zone(mut self, zone: &str, count: usize, value: f64) -> Self {
        for _ in 0..count {
            let row_index = self.records.len();
            self.records
                .push(RawCycleRecord::new(row_index, Some(zone), Some(value)));
        }
        self
    }

    pub fn push(mut self, zone: Option<&str>, value: Option<f64>) -> Self {
        let row_index = self.records.len();
        self.records
            .push(RawCycleRecord::new(row_index, zone, value));
        self
    }

    pub fn set_value(mut self, row_index: usize, value: Option<f64>) -> Self {
        self.records[row_index].adjusted_time_seconds = value;
        self
    }

    pub fn set_zone(mut self, row_index: usize, zone: Option<&str>) -> Self {
        self.records[row_index].zone_name = zone.map(|z| z.to_string());
        self
    }

    pub fn without_column(mut self, column: &str) -> Self {
        self.columns.retain(|c| c != column);
        self
    }

    pub fn build(self) -> Dataset {
        Dataset::new(self.columns, self.records)
    }
}

/// 两区域标准场景: A ≈ 5.0, B ≈ 7.0, 各 100 行
pub fn two_zone_dataset() -> DatasetBuilder {
    DatasetBuilder::new()
        .zone_series("A", 100, 5.0, 0.02)
        .zone_series("B", 100, 7.0, 0.04)
}

// ==========================================
// CSV 文件写出
// ==========================================

/// 将数据集写为 CSV（缺失值写空字符串）
pub fn write_csv(dataset: &Dataset, path: &Path) {
    let mut file = std::fs::File::create(path).unwrap();
    writeln!(file, "{}", dataset.columns.join(",")).unwrap();

    for record in &dataset.records {
        let cells: Vec<String> = dataset
            .columns
            .iter()
            .map(|column| match column.as_str() {
                ZONE_NAME_COLUMN => record.zone_name.clone().unwrap_or_default(),
                ADJUSTED_TIME_COLUMN => record
                    .adjusted_time_seconds
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                START_DATETIME_COLUMN => record
                    .start_datetime
                    .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default(),
                other => record.extra.get(other).cloned().unwrap_or_default(),
            })
            .collect();
        writeln!(file, "{}", cells.join(",")).unwrap();
    }
}
