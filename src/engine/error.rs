// ==========================================
// CycleEye 节拍分析系统 - 分析错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 数值退化情形（零方差 / 均值 <= 0 / 空区域）不属于错误
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use thiserror::Error;

/// 分析流程错误类型
#[derive(Error, Debug)]
pub enum AnalysisError {
    // ===== 结构错误（致命,不产生部分结果）=====
    #[error("必须列缺失: {}", .missing.join(", "))]
    MissingRequiredColumns { missing: Vec<String> },

    // ===== 上游错误 =====
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AnalysisError {
    /// 机器可读错误码
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::MissingRequiredColumns { .. } => "missing_required_columns",
            AnalysisError::Import(_) => "load_error",
            AnalysisError::Config(_) => "config_error",
        }
    }
}

/// Result 类型别名
pub type AnalysisResult<T> = Result<T, AnalysisError>;
