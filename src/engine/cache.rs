// ==========================================
// CycleEye 节拍分析系统 - 分析结果缓存
// ==========================================
// 职责: 以 (数据集内容, 分析配置) 的 blake3 指纹缓存分析结果
// 并发: 同一指纹同时请求时只计算一次,其余调用方等待并共享结果
// 红线: 表头校验失败不进入缓存
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::record::Dataset;
use crate::engine::error::AnalysisResult;
use crate::engine::orchestrator::{AnalysisOutcome, AnalysisPipeline};
use crate::engine::preprocessor::Preprocessor;
use moka::sync::Cache;
use std::sync::Arc;
use tracing::debug;

/// 缓存默认容量（条目数）
pub const DEFAULT_CACHE_CAPACITY: u64 = 64;

fn hash_str(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn hash_f64(hasher: &mut blake3::Hasher, value: f64) {
    hasher.update(&value.to_bits().to_le_bytes());
}

fn hash_opt<T>(hasher: &mut blake3::Hasher, value: Option<T>, f: impl FnOnce(&mut blake3::Hasher, T)) {
    match value {
        Some(v) => {
            hasher.update(&[1]);
            f(hasher, v);
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

fn feed_dataset(hasher: &mut blake3::Hasher, dataset: &Dataset) {
    hasher.update(&(dataset.columns.len() as u64).to_le_bytes());
    for column in &dataset.columns {
        hash_str(hasher, column);
    }

    hasher.update(&(dataset.records.len() as u64).to_le_bytes());
    for record in &dataset.records {
        hasher.update(&(record.row_index as u64).to_le_bytes());
        hash_opt(hasher, record.zone_name.as_deref(), hash_str);
        hash_opt(hasher, record.adjusted_time_seconds, hash_f64);
        hash_opt(hasher, record.start_datetime, |h, dt| {
            hash_str(h, &dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
        });
        hasher.update(&(record.extra.len() as u64).to_le_bytes());
        for (key, value) in &record.extra {
            hash_str(hasher, key);
            hash_str(hasher, value);
        }
    }
}

fn feed_config(hasher: &mut blake3::Hasher, config: &AnalysisConfig) {
    hasher.update(&(config.zones.len() as u64).to_le_bytes());
    for zone in &config.zones {
        hash_str(hasher, zone);
    }
    hasher.update(&(config.targets.len() as u64).to_le_bytes());
    for (zone, target) in &config.targets {
        hash_str(hasher, zone);
        hash_f64(hasher, *target);
    }
    hash_f64(hasher, config.default_target);
    hash_f64(hasher, config.threshold_good);
    hash_f64(hasher, config.threshold_ok);
    hasher.update(&(config.histogram_bins as u64).to_le_bytes());
    hasher.update(&(config.moving_average_window as u64).to_le_bytes());
    hasher.update(&(config.anomaly_sample_limit as u64).to_le_bytes());
    hash_str(hasher, &config.locale);
}

/// 数据集内容指纹（blake3 十六进制）
pub fn dataset_fingerprint(dataset: &Dataset) -> String {
    let mut hasher = blake3::Hasher::new();
    feed_dataset(&mut hasher, dataset);
    hasher.finalize().to_hex().to_string()
}

/// 缓存键: 数据集内容 + 影响结果的配置项
///
/// data_path / output_dir 不参与计算结果,不计入
pub fn cache_key(dataset: &Dataset, config: &AnalysisConfig) -> String {
    let mut hasher = blake3::Hasher::new();
    feed_dataset(&mut hasher, dataset);
    feed_config(&mut hasher, config);
    hasher.finalize().to_hex().to_string()
}

// ==========================================
// AnalysisCache - 分析结果缓存
// ==========================================
pub struct AnalysisCache {
    cache: Cache<String, Arc<AnalysisOutcome>>,
}

impl AnalysisCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: Cache::new(capacity),
        }
    }

    /// 取缓存结果,未命中时执行分析
    ///
    /// # 返回
    /// - Ok(Arc<AnalysisOutcome>): 相同输入返回同一份结果
    /// - Err(MissingRequiredColumns): 表头缺少必须列
    pub fn get_or_run(
        &self,
        pipeline: &AnalysisPipeline,
        dataset: &Dataset,
    ) -> AnalysisResult<Arc<AnalysisOutcome>> {
        Preprocessor::new().check_schema(dataset)?;

        let key = cache_key(dataset, pipeline.config());
        let outcome = self.cache.get_with(key.clone(), || {
            debug!(key = %key, "缓存未命中,执行分析");
            Arc::new(pipeline.run_checked(dataset))
        });

        Ok(outcome)
    }

    pub fn contains(&self, dataset: &Dataset, config: &AnalysisConfig) -> bool {
        self.cache.contains_key(&cache_key(dataset, config))
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
