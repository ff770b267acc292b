// ==========================================
// 炉体耐磨层 TCO 分析 - 导入导出层
// ==========================================
// 职责: 策略文档与工作簿的读写，序列/报告导出
// 支持: JSON, Excel (.xlsx 只读), CSV 工作表目录
// ==========================================
// 红线: 导入只构造 Strategy，不做范围修复（交给 StrategyValidator）
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod json_io;
pub mod series_export;
pub mod workbook;

use crate::domain::strategy::Strategy;
use std::path::{Path, PathBuf};

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{
    write_workbook_csv_dir, CsvDirWorkbookReader, UniversalWorkbookReader, WorkbookSource,
    XlsxWorkbookReader,
};
pub use json_io::{
    load_strategies_json, parse_strategies_json, save_strategies_json, strategies_to_json,
};
pub use series_export::{write_cost_series_csv, write_markdown_report, write_wear_series_csv};
pub use workbook::{
    sheet_base_name, strategies_from_workbook, strategies_to_workbook, Sheet, Workbook,
    INTERVENTION_COLUMNS,
};

/// 从 .xlsx 工作簿导入策略
pub fn import_workbook_xlsx(path: impl AsRef<Path>) -> ImportResult<Vec<Strategy>> {
    let workbook = XlsxWorkbookReader.read_workbook(path.as_ref())?;
    strategies_from_workbook(&workbook)
}

/// 从 CSV 工作表目录导入策略
pub fn import_sheet_pairs_csv(dir: impl AsRef<Path>) -> ImportResult<Vec<Strategy>> {
    let workbook = CsvDirWorkbookReader.read_workbook(dir.as_ref())?;
    strategies_from_workbook(&workbook)
}

/// 导出为 CSV 工作表目录（每个策略两张表）
pub fn export_sheet_pairs_csv(
    dir: impl AsRef<Path>,
    strategies: &[Strategy],
) -> ImportResult<Vec<PathBuf>> {
    write_workbook_csv_dir(dir.as_ref(), &strategies_to_workbook(strategies))
}

/// 目录 → CSV 工作表，.xlsx → Excel
pub fn import_workbook(path: impl AsRef<Path>) -> ImportResult<Vec<Strategy>> {
    let workbook = UniversalWorkbookReader.read_workbook(path.as_ref())?;
    strategies_from_workbook(&workbook)
}
