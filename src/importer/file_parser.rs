// ==========================================
// CycleEye 节拍分析系统 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv) / Excel (.xlsx/.xls)
// ==========================================

use crate::domain::record::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::parser_trait::FileParser;
use crate::domain::record::TIMESTAMP_FORMAT;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// 把一行单元格按表头组装为映射
///
/// 全空白行（如 `,`）照常保留: 下游按缺失计数,行号与数据位置一致
fn build_row<I>(headers: &[String], cells: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = String>,
{
    let mut row_map = HashMap::new();
    for (col_idx, value) in cells.into_iter().enumerate() {
        if let Some(header) = headers.get(col_idx) {
            row_map.insert(header.clone(), value.trim().to_string());
        }
    }
    row_map
}

/// Excel 单元格 → 文本
///
/// 日期时间单元格输出 `%Y-%m-%d %H:%M:%S`,其余沿用 calamine 的 Display
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if dt.is_datetime() => ndt.format(TIMESTAMP_FORMAT).to_string(),
            _ => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        other => other.to_string(),
    }
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(build_row(&headers, record.iter().map(|v| v.to_string())));
        }

        debug!(
            path = %file_path.display(),
            columns = headers.len(),
            rows = rows.len(),
            "CSV 解析完成"
        );

        Ok(RawTable {
            columns: headers,
            rows,
        })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无表头行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell_text(cell).trim().to_string())
            .collect();

        let rows: Vec<_> = sheet_rows
            .map(|data_row| build_row(&headers, data_row.iter().map(cell_text)))
            .collect();

        debug!(
            path = %file_path.display(),
            sheet = %sheet_name,
            rows = rows.len(),
            "Excel 解析完成"
        );

        Ok(RawTable {
            columns: headers,
            rows,
        })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_raw_table(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_table(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
