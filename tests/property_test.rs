// ==========================================
// 分析流程性质测试
// ==========================================
// 工具: proptest
// 覆盖: 计数守恒 / 正值不变量 / 确定性 / 零方差 / 达成率下界 / 状态单调 / 省略规则
// ==========================================

use cycle_eye::config::AnalysisConfig;
use cycle_eye::domain::record::{Dataset, RawCycleRecord};
use cycle_eye::engine::{
    achieve_rate, classify, detect_outliers_iqr, detect_outliers_zscore, AnalysisPipeline,
    OutlierDetector, Preprocessor,
};
use proptest::prelude::*;
use std::sync::Arc;

fn zone_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("A".to_string())),
        Just(Some("B".to_string())),
        Just(Some("X".to_string())),
    ]
}

fn value_strategy() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(None),
        Just(Some(f64::NAN)),
        Just(Some(0.0)),
        Just(Some(f64::INFINITY)),
        (-50.0..50.0f64).prop_map(Some),
        (0.1..20.0f64).prop_map(Some),
    ]
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec((zone_strategy(), value_strategy()), 0..120).prop_map(|rows| {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, (zone, value))| RawCycleRecord::new(i, zone.as_deref(), value))
            .collect();
        Dataset::with_standard_columns(records)
    })
}

fn pipeline() -> AnalysisPipeline {
    AnalysisPipeline::new(Arc::new(AnalysisConfig::with_zones(&["A", "B"])))
}

proptest! {
    #[test]
    fn count_conservation(dataset in dataset_strategy()) {
        let (cleaned, report) = Preprocessor::new().preprocess(&dataset).unwrap();
        prop_assert_eq!(report.original_count, dataset.len());
        prop_assert_eq!(report.final_count, cleaned.len());
        prop_assert_eq!(
            report.original_count,
            report.final_count + report.removed_for_missing_fields + report.removed_for_invalid_value
        );
    }

    #[test]
    fn cleaned_records_are_positive(dataset in dataset_strategy()) {
        let (cleaned, _) = Preprocessor::new().preprocess(&dataset).unwrap();
        for record in &cleaned {
            prop_assert!(record.adjusted_time_seconds > 0.0);
            prop_assert!(record.adjusted_time_seconds.is_finite());
            prop_assert!(!record.zone_name.is_empty());
        }
    }

    #[test]
    fn outlier_flags_are_deterministic(dataset in dataset_strategy()) {
        let (cleaned, _) = Preprocessor::new().preprocess(&dataset).unwrap();
        let detector = OutlierDetector::new(&["A", "B"]);
        prop_assert_eq!(detector.detect(&cleaned), detector.detect(&cleaned));
    }

    #[test]
    fn pipeline_is_deterministic(dataset in dataset_strategy()) {
        let pipeline = pipeline();
        let first = pipeline.run(&dataset).unwrap();
        let second = pipeline.run(&dataset).unwrap();
        prop_assert_eq!(first.cleaning_report, second.cleaning_report);
        prop_assert_eq!(first.statistics, second.statistics);
        prop_assert_eq!(first.report, second.report);
    }

    #[test]
    fn constant_series_has_no_outliers(value in 0.1..100.0f64, n in 1usize..60) {
        let values = vec![value; n];
        prop_assert!(detect_outliers_zscore(&values).iter().all(|f| !f));
        prop_assert!(detect_outliers_iqr(&values).iter().all(|f| !f));
    }

    #[test]
    fn achieve_rate_is_non_negative(target in 0.1..100.0f64, mean in -100.0..100.0f64) {
        let rate = achieve_rate(target, mean);
        prop_assert!(rate >= 0.0);
        prop_assert_eq!(rate == 0.0, mean <= 0.0);
    }

    #[test]
    fn classify_is_monotonic(
        a in 0.0..200.0f64,
        b in 0.0..200.0f64,
        ok in 0.0..100.0f64,
        gap in 0.0..50.0f64,
    ) {
        let good = ok + gap;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(low, good, ok) <= classify(high, good, ok));
    }

    #[test]
    fn empty_zones_never_reported(dataset in dataset_strategy()) {
        let outcome = pipeline().run(&dataset).unwrap();
        for zone in outcome.statistics.keys() {
            let count = outcome.flagged.iter().filter(|r| r.zone_name() == zone).count();
            prop_assert!(count > 0);
            prop_assert_eq!(outcome.statistics.get(zone).map(|s| s.count), Some(count));
        }
        prop_assert_eq!(outcome.report.zones.len(), outcome.statistics.len());
    }
}
