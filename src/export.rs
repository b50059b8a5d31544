// ==========================================
// CycleEye 节拍分析系统 - 报告导出
// ==========================================
// 职责: 将 AnalysisReport 写为带时间戳的 JSON 文件
// 格式: analysis_YYYYMMDD_HHMMSS.json（UTF-8,缩进 2 空格）
// ==========================================

use crate::domain::report::AnalysisReport;
use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const EXPORT_FILE_PREFIX: &str = "analysis_";

/// 导出文件名
pub fn report_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}{}.json", EXPORT_FILE_PREFIX, now.format("%Y%m%d_%H%M%S"))
}

/// 写出报告 JSON
///
/// # 返回
/// - Ok(PathBuf): 写出的文件路径
pub fn write_report(dir: &Path, report: &AnalysisReport) -> Result<PathBuf> {
    write_report_at(dir, report, &chrono::Local::now())
}

/// 以指定时间写出报告 JSON
pub fn write_report_at<Tz: TimeZone>(
    dir: &Path,
    report: &AnalysisReport,
    now: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    fs::create_dir_all(dir)
        .with_context(|| format!("无法创建导出目录: {}", dir.display()))?;

    let content = serde_json::to_string_pretty(report).context("报告序列化失败")?;

    let path = dir.join(report_file_name(now));
    fs::write(&path, content)
        .with_context(|| format!("无法写入导出文件: {}", path.display()))?;

    info!(path = %path.display(), zones = report.zones.len(), "报告已导出");
    Ok(path)
}
