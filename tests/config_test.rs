// ==========================================
// AnalysisConfig 集成测试
// ==========================================
// 测试目标: 配置文件 → 分析流程（区域枚举、目标节拍、阈值、语言）
// ==========================================

mod helpers;

use cycle_eye::config::{AnalysisConfig, ConfigError};
use cycle_eye::domain::types::ZoneStatus;
use cycle_eye::engine::AnalysisPipeline;
use helpers::test_data_builder::*;
use std::sync::Arc;
use tempfile::TempDir;

fn write_config(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_config_file_drives_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "zones": ["B", "A"],
            "targets": {"A": 5.0, "B": 7.0},
            "threshold_good": 95.0,
            "threshold_ok": 90.0,
            "anomaly_sample_limit": 1,
            "locale": "en"
        }"#,
    );

    let config = AnalysisConfig::load(&path).unwrap();
    assert_eq!(config.target_for("B"), 7.0);
    assert_eq!(config.target_for("UNKNOWN"), 5.0);

    let pipeline = AnalysisPipeline::new(Arc::new(config));
    let dataset = two_zone_dataset()
        .set_value(10, Some(15.0))
        .set_value(20, Some(16.0))
        .build();
    let outcome = pipeline.run(&dataset).unwrap();

    // 输出顺序跟随配置
    let keys: Vec<&str> = outcome.report.zones.keys().collect();
    assert_eq!(keys, vec!["B", "A"]);

    let b = outcome.report.zones.get("B").unwrap();
    assert_eq!(b.stats.status, ZoneStatus::Good);

    let a = outcome.report.zones.get("A").unwrap();
    assert_eq!(a.anomalies.len(), 1);
    assert_eq!(
        outcome.report.summary.overall_comment,
        "Analyzed cycle-time data for each zone of the production line."
    );
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = AnalysisConfig::load(dir.path().join("absent.json")).unwrap();

    assert_eq!(config.zones.len(), 4);
    assert_eq!(config.threshold_good, 90.0);
    assert_eq!(config.threshold_ok, 80.0);
    assert_eq!(config.default_target, 5.0);
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{"zones": ["A"], "targets": {"A": -5.0}}"#);

    let result = AnalysisConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    let path = write_config(&dir, "{ not json");
    assert!(matches!(AnalysisConfig::load(&path), Err(ConfigError::Parse { .. })));
}

#[test]
fn test_inverted_thresholds_are_accepted() {
    let config = AnalysisConfig::with_zones(&["A"]).thresholds(70.0, 90.0);
    assert!(config.validate().is_ok());
}
