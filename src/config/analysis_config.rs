// ==========================================
// CycleEye 节拍分析系统 - 分析配置
// ==========================================
// 职责: 区域枚举 / 目标节拍 / 判定阈值 / 输出参数
// 存储: JSON 文件（缺省时使用内置默认值）
// 覆写: 环境变量 CYCLE_EYE_DATA_PATH / CYCLE_EYE_OUTPUT_DIR / CYCLE_EYE_LOCALE
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const ZONES: [&str; 4] = ["A_Assemble", "A2_Assemble", "B_Assemble", "B2_Assemble"];
    pub const TARGET: f64 = 5.0;
    pub const THRESHOLD_GOOD: f64 = 90.0;
    pub const THRESHOLD_OK: f64 = 80.0;
    pub const HISTOGRAM_BINS: usize = 30;
    pub const MOVING_AVERAGE_WINDOW: usize = 5;
    pub const ANOMALY_SAMPLE_LIMIT: usize = 10;
    pub const LOCALE: &str = "ja";
    pub const DATA_PATH: &str = "generated_cycles_4zones_2000rows.csv";
    pub const OUTPUT_DIR: &str = ".";
}

// ===== 环境变量键 =====
pub mod env_keys {
    pub const DATA_PATH: &str = "CYCLE_EYE_DATA_PATH";
    pub const OUTPUT_DIR: &str = "CYCLE_EYE_OUTPUT_DIR";
    pub const LOCALE: &str = "CYCLE_EYE_LOCALE";
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileRead { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    Parse { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// AnalysisConfig - 单次分析的全部参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub zones: Vec<String>,              // 区域枚举（决定迭代与输出顺序）
    pub targets: BTreeMap<String, f64>,  // 区域 → 目标节拍（秒）
    pub default_target: f64,             // 未配置区域的目标节拍
    pub threshold_good: f64,             // 达成率 >= good → GOOD
    pub threshold_ok: f64,               // 达成率 >= ok → OK
    pub histogram_bins: usize,
    pub moving_average_window: usize,
    pub anomaly_sample_limit: usize,     // 报告中每区域异常样本上限
    pub locale: String,                  // 报告文本语言
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let zones: Vec<String> = defaults::ZONES.iter().map(|z| z.to_string()).collect();
        let targets = zones
            .iter()
            .map(|z| (z.clone(), defaults::TARGET))
            .collect();

        Self {
            zones,
            targets,
            default_target: defaults::TARGET,
            threshold_good: defaults::THRESHOLD_GOOD,
            threshold_ok: defaults::THRESHOLD_OK,
            histogram_bins: defaults::HISTOGRAM_BINS,
            moving_average_window: defaults::MOVING_AVERAGE_WINDOW,
            anomaly_sample_limit: defaults::ANOMALY_SAMPLE_LIMIT,
            locale: defaults::LOCALE.to_string(),
            data_path: PathBuf::from(defaults::DATA_PATH),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
        }
    }
}

impl AnalysisConfig {
    /// 以指定区域枚举构造（其余参数取默认值,目标节拍未配置）
    pub fn with_zones<S: AsRef<str>>(zones: &[S]) -> Self {
        Self {
            zones: zones.iter().map(|z| z.as_ref().to_string()).collect(),
            targets: BTreeMap::new(),
            ..Self::default()
        }
    }

    /// 从 JSON 文件加载；文件不存在时返回默认配置
    ///
    /// # 返回
    /// - Ok(AnalysisConfig): 已应用环境变量覆写并通过校验
    /// - Err(ConfigError): 读取/解析失败或配置值无效
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            let parsed: AnalysisConfig =
                serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            info!(path = %path.display(), "已加载分析配置");
            parsed
        } else {
            debug!(path = %path.display(), "配置文件不存在,使用默认配置");
            AnalysisConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 应用环境变量覆写
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var(env_keys::DATA_PATH) {
            if !v.trim().is_empty() {
                self.data_path = PathBuf::from(v.trim());
            }
        }
        if let Ok(v) = std::env::var(env_keys::OUTPUT_DIR) {
            if !v.trim().is_empty() {
                self.output_dir = PathBuf::from(v.trim());
            }
        }
        if let Ok(v) = std::env::var(env_keys::LOCALE) {
            if !v.trim().is_empty() {
                self.locale = v.trim().to_string();
            }
        }
    }

    /// 校验配置值
    ///
    /// 注意: threshold_good > threshold_ok 仅为惯例,不做强制
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zones.is_empty() {
            return Err(invalid("zones", "区域列表不能为空"));
        }

        let mut seen = HashSet::new();
        for zone in &self.zones {
            if zone.trim().is_empty() {
                return Err(invalid("zones", "区域名不能为空"));
            }
            if !seen.insert(zone.as_str()) {
                return Err(invalid("zones", &format!("区域重复: {}", zone)));
            }
        }

        for (zone, target) in &self.targets {
            if !(target.is_finite() && *target > 0.0) {
                return Err(invalid(
                    &format!("targets.{}", zone),
                    &format!("目标节拍必须为正数: {}", target),
                ));
            }
        }

        if !(self.default_target.is_finite() && self.default_target > 0.0) {
            return Err(invalid("default_target", "默认目标节拍必须为正数"));
        }
        if !self.threshold_good.is_finite() || !self.threshold_ok.is_finite() {
            return Err(invalid("threshold", "阈值必须为有限数值"));
        }
        if self.histogram_bins == 0 {
            return Err(invalid("histogram_bins", "分箱数必须大于 0"));
        }
        if self.moving_average_window == 0 {
            return Err(invalid("moving_average_window", "移动平均窗口必须大于 0"));
        }

        Ok(())
    }

    /// 解析区域目标节拍,未配置时回退到 default_target
    pub fn target_for(&self, zone: &str) -> f64 {
        self.targets
            .get(zone)
            .copied()
            .unwrap_or(self.default_target)
    }

    /// 设置区域目标节拍（构建器风格）
    pub fn target(mut self, zone: &str, target: f64) -> Self {
        self.targets.insert(zone.to_string(), target);
        self
    }

    /// 设置判定阈值（构建器风格）
    pub fn thresholds(mut self, good: f64, ok: f64) -> Self {
        self.threshold_good = good;
        self.threshold_ok = ok;
        self
    }

    /// 配置快照（JSON）,随导出结果一起记录
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// 默认配置文件路径: <系统配置目录>/cycle-eye/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cycle-eye")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.zones.len(), 4);
        assert_eq!(config.zones[0], "A_Assemble");
        assert_eq!(config.target_for("B2_Assemble"), 5.0);
        assert_eq!(config.threshold_good, 90.0);
        assert_eq!(config.threshold_ok, 80.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_target_fallback() {
        let config = AnalysisConfig::with_zones(&["A", "B"]).target("A", 6.5);
        assert_eq!(config.target_for("A"), 6.5);
        assert_eq!(config.target_for("B"), defaults::TARGET);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let config = AnalysisConfig::load("definitely/not/here/config.json").unwrap();
        assert_eq!(config.zones, AnalysisConfig::default().zones);
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"zones": ["L1", "L2"], "targets": {{"L1": 4.2}}, "threshold_ok": 70}}"#
        )
        .unwrap();

        let config = AnalysisConfig::load(file.path()).unwrap();
        assert_eq!(config.zones, vec!["L1", "L2"]);
        assert_eq!(config.target_for("L1"), 4.2);
        assert_eq!(config.target_for("L2"), defaults::TARGET);
        assert_eq!(config.threshold_ok, 70.0);
        assert_eq!(config.threshold_good, defaults::THRESHOLD_GOOD);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = AnalysisConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AnalysisConfig::with_zones::<&str>(&[]);
        assert!(config.validate().is_err());

        let config = AnalysisConfig::with_zones(&["A", "A"]);
        assert!(config.validate().is_err());

        let config = AnalysisConfig::default().target("A_Assemble", 0.0);
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.histogram_bins = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_thresholds_order_not_enforced() {
        let config = AnalysisConfig::default().thresholds(70.0, 90.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_snapshot_json_roundtrip_fields() {
        let config = AnalysisConfig::default();
        let snapshot = config.snapshot_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(value["zones"][1], "A2_Assemble");
        assert_eq!(value["locale"], "ja");
    }
}
