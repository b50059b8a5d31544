// ==========================================
// CycleEye 节拍分析系统 - 导入层
// ==========================================
// 职责: 外部表格文件 → Dataset
// 支持: CSV, Excel
// 说明: 加载失败在前处理之前短路
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod parser_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use parser_trait::FileParser;

use crate::domain::record::Dataset;
use std::path::Path;
use tracing::info;

/// 读取文件并映射为 Dataset
pub fn load_dataset<P: AsRef<Path>>(file_path: P) -> ImportResult<Dataset> {
    let path = file_path.as_ref();
    let table = UniversalFileParser.parse(path)?;
    let dataset = FieldMapper.map_table(&table);

    info!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.columns.len(),
        "数据文件加载完成"
    );

    Ok(dataset)
}
