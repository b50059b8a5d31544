// ==========================================
// CycleEye 节拍分析系统 - 分析流程编排器
// ==========================================
// 用途: 按顺序串联五个核心组件
// 流向: 前处理 → 异常检测 → 统计聚合(+状态判定) → 报告组装
// 红线: 各阶段完整结束后才进入下一阶段；不修改输入数据集
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::record::{CleaningReport, Dataset, FlaggedCycleRecord};
use crate::domain::report::AnalysisReport;
use crate::domain::series::{HistogramSeries, OutlierOverview, TimeseriesSeries};
use crate::domain::statistics::ZoneStatisticsMap;
use crate::domain::zone_map::ZoneMap;
use crate::engine::error::AnalysisResult;
use crate::engine::outlier::OutlierDetector;
use crate::engine::preprocessor::Preprocessor;
use crate::engine::report::ReportAssembler;
use crate::engine::series::SeriesBuilder;
use crate::engine::statistics::StatisticsAggregator;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// AnalysisOutcome - 单次分析结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub run_id: String,
    pub generated_at: NaiveDateTime,

    // 前处理输出
    pub cleaning_report: CleaningReport,

    // 异常检测输出（供可视化协作方使用）
    pub flagged: Vec<FlaggedCycleRecord>,

    // 统计输出
    pub statistics: ZoneStatisticsMap,

    // 报告输出
    pub report: AnalysisReport,

    // 可视化序列
    pub overview: OutlierOverview,
    pub histograms: ZoneMap<HistogramSeries>,
    pub timeseries: ZoneMap<TimeseriesSeries>,
}

// ==========================================
// AnalysisPipeline - 分析流程编排器
// ==========================================
pub struct AnalysisPipeline {
    config: Arc<AnalysisConfig>,
    preprocessor: Preprocessor,
    detector: OutlierDetector,
    aggregator: StatisticsAggregator,
    assembler: ReportAssembler,
    series: SeriesBuilder,
}

impl AnalysisPipeline {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 分析配置（区域枚举、目标节拍、阈值等）
    pub fn new(config: Arc<AnalysisConfig>) -> Self {
        Self {
            preprocessor: Preprocessor::new(),
            detector: OutlierDetector::new(&config.zones),
            aggregator: StatisticsAggregator::new(&config.zones, config.default_target),
            assembler: ReportAssembler::new(
                &config.locale,
                config.anomaly_sample_limit,
                config.histogram_bins,
            ),
            series: SeriesBuilder::new(
                &config.zones,
                config.histogram_bins,
                config.moving_average_window,
            ),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 执行完整分析流程
    ///
    /// # 返回
    /// - Ok(AnalysisOutcome)
    /// - Err(MissingRequiredColumns): 表头缺少必须列,不产生部分结果
    pub fn run(&self, dataset: &Dataset) -> AnalysisResult<AnalysisOutcome> {
        self.preprocessor.check_schema(dataset)?;
        Ok(self.run_checked(dataset))
    }

    /// 执行分析（要求表头已通过校验）
    pub(crate) fn run_checked(&self, dataset: &Dataset) -> AnalysisOutcome {
        let started = Instant::now();
        info!(
            rows = dataset.len(),
            zones = self.config.zones.len(),
            "开始执行分析流程"
        );

        // ==========================================
        // 步骤1: 前处理
        // ==========================================
        let (cleaned, cleaning_report) = self.preprocessor.clean(dataset);
        info!(
            original = cleaning_report.original_count,
            removed_missing = cleaning_report.removed_for_missing_fields,
            removed_invalid = cleaning_report.removed_for_invalid_value,
            final_count = cleaning_report.final_count,
            "前处理完成"
        );

        // ==========================================
        // 步骤2: 异常检测
        // ==========================================
        let flagged = self.detector.detect(&cleaned);
        let anomaly_count = flagged.iter().filter(|r| r.is_anomaly()).count();
        debug!(anomaly_count, "异常检测完成");

        // ==========================================
        // 步骤3: 统计聚合
        // ==========================================
        let statistics = self.aggregator.aggregate(&flagged, &self.config.targets);
        for (zone, stats) in statistics.iter() {
            debug!(
                zone,
                count = stats.count,
                mean = stats.mean,
                achieve_rate = stats.achieve_rate,
                "区域统计"
            );
        }

        // ==========================================
        // 步骤4: 报告组装
        // ==========================================
        let report = self.assembler.assemble(
            &flagged,
            &statistics,
            self.config.threshold_good,
            self.config.threshold_ok,
        );

        // 可视化序列
        let overview = self.series.outlier_overview(&flagged);
        let histograms =
            self.series
                .histograms(&flagged, &self.config.targets, self.config.default_target);
        let timeseries =
            self.series
                .timeseries(&flagged, &self.config.targets, self.config.default_target);

        info!(
            zones_reported = report.zones.len(),
            high_confidence = overview.high_confidence_count,
            low_confidence = overview.low_confidence_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "分析流程完成"
        );

        AnalysisOutcome {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Local::now().naive_local(),
            cleaning_report,
            flagged,
            statistics,
            report,
            overview,
            histograms,
            timeseries,
        }
    }
}
