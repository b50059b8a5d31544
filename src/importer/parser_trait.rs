// ==========================================
// CycleEye 节拍分析系统 - 文件解析 Trait
// ==========================================
// 职责: 定义文件 → 原始表 的解析接口（不包含实现）
// ==========================================

use crate::domain::record::RawTable;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表（表头 + 行映射）
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RawTable): 表头保持文件顺序,完全空白的行被跳过
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}
