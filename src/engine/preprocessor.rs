// ==========================================
// CycleEye 节拍分析系统 - 前处理器
// ==========================================
// 职责: 必须列校验 → 缺失值剔除 → 无效值剔除 → 清洗报告
// 顺序: 缺失剔除先于无效剔除（缺失值只计入缺失,不计入无效）
// 红线: 纯函数,不记录日志,不修改输入数据集
// ==========================================

use crate::domain::record::{CleaningReport, CycleRecord, Dataset, RawCycleRecord};
use crate::engine::error::{AnalysisError, AnalysisResult};

// ==========================================
// Preprocessor - 前处理器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// 执行前处理
    ///
    /// # 返回
    /// - Ok((清洗后记录, 清洗报告))
    /// - Err(MissingRequiredColumns): 表头缺少 zone_name 或 adjusted_time_seconds
    pub fn preprocess(&self, dataset: &Dataset) -> AnalysisResult<(Vec<CycleRecord>, CleaningReport)> {
        self.check_schema(dataset)?;
        Ok(self.clean(dataset))
    }

    /// 必须列校验
    pub fn check_schema(&self, dataset: &Dataset) -> AnalysisResult<()> {
        let missing = dataset.missing_required_columns();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::MissingRequiredColumns { missing })
        }
    }

    /// 清洗（要求表头已通过校验）
    pub(crate) fn clean(&self, dataset: &Dataset) -> (Vec<CycleRecord>, CleaningReport) {
        let original_count = dataset.len();

        // 步骤1: 缺失值剔除
        let complete: Vec<(&RawCycleRecord, &str, f64)> = dataset
            .records
            .iter()
            .filter_map(|r| match (r.zone_name.as_deref(), r.adjusted_time_seconds) {
                (Some(zone), Some(value)) if !value.is_nan() => Some((r, zone, value)),
                _ => None,
            })
            .collect();
        let removed_for_missing_fields = original_count - complete.len();

        // 步骤2: 无效值剔除（必须为有限正数）
        let after_missing = complete.len();
        let cleaned: Vec<CycleRecord> = complete
            .into_iter()
            .filter(|(_, _, value)| *value > 0.0 && value.is_finite())
            .map(|(r, zone, value)| CycleRecord {
                row_index: r.row_index,
                zone_name: zone.to_string(),
                adjusted_time_seconds: value,
                start_datetime: r.start_datetime,
                extra: r.extra.clone(),
            })
            .collect();
        let removed_for_invalid_value = after_missing - cleaned.len();

        let report = CleaningReport {
            original_count,
            removed_for_missing_fields,
            removed_for_invalid_value,
            final_count: cleaned.len(),
        };

        (cleaned, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(values: &[(Option<&str>, Option<f64>)]) -> Dataset {
        let records = values
            .iter()
            .enumerate()
            .map(|(i, (zone, value))| RawCycleRecord::new(i, *zone, *value))
            .collect();
        Dataset::with_standard_columns(records)
    }

    #[test]
    fn test_preprocess_valid_data() {
        let ds = dataset(&[(Some("A"), Some(5.0)), (Some("B"), Some(7.0))]);
        let (cleaned, report) = Preprocessor::new().preprocess(&ds).unwrap();

        assert_eq!(cleaned.len(), 2);
        assert_eq!(report.removed_for_missing_fields, 0);
        assert_eq!(report.removed_for_invalid_value, 0);
        assert_eq!(report.final_count, 2);
        assert!(report.is_conserved());
    }

    #[test]
    fn test_missing_counted_before_invalid() {
        let ds = dataset(&[
            (Some("A"), None),           // 缺失（不计入无效）
            (None, Some(-3.0)),          // 缺失区域,值也无效 → 计入缺失
            (Some("A"), Some(f64::NAN)), // NaN 视为缺失
            (Some("A"), Some(0.0)),      // 无效
            (Some("A"), Some(-1.0)),     // 无效
            (Some("A"), Some(5.0)),
        ]);

        let (cleaned, report) = Preprocessor::new().preprocess(&ds).unwrap();

        assert_eq!(report.original_count, 6);
        assert_eq!(report.removed_for_missing_fields, 3);
        assert_eq!(report.removed_for_invalid_value, 2);
        assert_eq!(report.final_count, 1);
        assert!(report.is_conserved());
        assert_eq!(cleaned[0].row_index, 5);
    }

    #[test]
    fn test_infinite_value_is_invalid() {
        let ds = dataset(&[(Some("A"), Some(f64::INFINITY)), (Some("A"), Some(1.0))]);
        let (_, report) = Preprocessor::new().preprocess(&ds).unwrap();
        assert_eq!(report.removed_for_invalid_value, 1);
    }

    #[test]
    fn test_missing_required_columns() {
        let ds = Dataset::new(vec!["wrong_column".to_string()], vec![]);
        let err = Preprocessor::new().preprocess(&ds).unwrap_err();

        match err {
            AnalysisError::MissingRequiredColumns { ref missing } => {
                assert_eq!(missing.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.code(), "missing_required_columns");
    }

    #[test]
    fn test_input_dataset_untouched() {
        let ds = dataset(&[(Some("A"), Some(-1.0)), (Some("A"), Some(5.0))]);
        let before = ds.clone();
        let _ = Preprocessor::new().preprocess(&ds).unwrap();
        assert_eq!(ds, before);
    }
}
