// ==========================================
// CycleEye 节拍分析系统 - 命令行入口
// ==========================================
// 用法:
//   cycle-eye [data_path] [config_path]
//
// 流程: 加载配置 → 加载数据 → 分析(缓存) → 输出状态 → 导出报告 JSON
// 叙述生成与看板渲染由外部协作方负责
// ==========================================

use anyhow::Context;
use cycle_eye::config::{default_config_path, AnalysisConfig};
use cycle_eye::engine::{AnalysisCache, AnalysisPipeline};
use cycle_eye::{export, i18n, importer, logging};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let data_arg = args.next().map(PathBuf::from);
    let config_path = args.next().map(PathBuf::from).unwrap_or_else(default_config_path);

    tracing::info!("==================================================");
    tracing::info!("{} - 节拍分析", cycle_eye::APP_NAME);
    tracing::info!("系统版本: {}", cycle_eye::VERSION);
    tracing::info!("==================================================");

    // 加载配置
    let mut config = AnalysisConfig::load(&config_path)
        .with_context(|| format!("配置加载失败: {}", config_path.display()))?;
    if let Some(data_path) = data_arg {
        config.data_path = data_path;
    }
    if !i18n::is_supported(&config.locale) {
        tracing::warn!(locale = %config.locale, "不支持的语言,报告文本将回退为日语");
    }
    tracing::debug!(config = %config.snapshot_json()?, "分析配置");
    let config = Arc::new(config);

    // 加载数据
    if !config.data_path.exists() {
        let path = config.data_path.display().to_string();
        anyhow::bail!(i18n::text_with_args(
            &config.locale,
            "import.file_not_found",
            &[("path", path.as_str())]
        ));
    }
    let dataset = importer::load_dataset(&config.data_path)?;

    // 执行分析
    let pipeline = AnalysisPipeline::new(Arc::clone(&config));
    let cache = AnalysisCache::default();
    let outcome = cache.get_or_run(&pipeline, &dataset)?;

    let cleaning = &outcome.cleaning_report;
    tracing::info!(
        original = cleaning.original_count,
        removed_missing = cleaning.removed_for_missing_fields,
        removed_invalid = cleaning.removed_for_invalid_value,
        final_count = cleaning.final_count,
        "清洗报告"
    );

    for (zone, zone_report) in outcome.report.zones.iter() {
        let stats = &zone_report.stats;
        tracing::info!(
            zone,
            mean = stats.mean,
            target = stats.target,
            achieve_rate = stats.achieve_rate,
            status = %stats.status,
            symbol = stats.status.symbol(),
            anomalies = zone_report.anomalies.len(),
            "区域状态"
        );
    }

    // 导出报告
    let path = export::write_report(&config.output_dir, &outcome.report)?;
    tracing::info!(run_id = %outcome.run_id, path = %path.display(), "分析完成");

    Ok(())
}
