// ==========================================
// 炉体耐磨层 TCO 分析 - 工作簿文件读写
// ==========================================
// 读取: Excel (.xlsx) / CSV 目录（每张表一个 <表名>.csv）
// 写出: CSV 目录（单元格布局与工作簿一致）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::workbook::{Sheet, Workbook};
use calamine::{open_workbook, Reader, Xlsx};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

/// 工作簿来源
pub trait WorkbookSource {
    fn read_workbook(&self, path: &Path) -> ImportResult<Workbook>;
}

// ==========================================
// Excel 读取
// ==========================================
pub struct XlsxWorkbookReader;

impl WorkbookSource for XlsxWorkbookReader {
    fn read_workbook(&self, path: &Path) -> ImportResult<Workbook> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut excel: Xlsx<_> = open_workbook(path)?;
        let mut workbook = Workbook::default();

        for sheet_name in excel.sheet_names() {
            let range = excel.worksheet_range(&sheet_name)?;
            let rows = range
                .rows()
                .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
                .collect();
            workbook.sheets.push(Sheet {
                name: sheet_name,
                rows,
            });
        }

        tracing::debug!(path = %path.display(), sheets = workbook.sheets.len(), "Excel 工作簿读取完成");
        Ok(workbook)
    }
}

// ==========================================
// CSV 目录读取
// ==========================================
pub struct CsvDirWorkbookReader;

impl WorkbookSource for CsvDirWorkbookReader {
    fn read_workbook(&self, dir: &Path) -> ImportResult<Workbook> {
        if !dir.exists() {
            return Err(ImportError::FileNotFound(dir.display().to_string()));
        }
        if !dir.is_dir() {
            return Err(ImportError::UnsupportedFormat(dir.display().to_string()));
        }

        // 按文件名排序，保证顺序稳定
        let mut files: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();

        let mut workbook = Workbook::default();
        for file in files {
            let Some(name) = file.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            workbook.sheets.push(read_csv_sheet(&file, name)?);
        }

        tracing::debug!(dir = %dir.display(), sheets = workbook.sheets.len(), "CSV 工作簿读取完成");
        Ok(workbook)
    }
}

fn read_csv_sheet(path: &Path, name: &str) -> ImportResult<Sheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // 允许行长度不一致
        .from_path(path)?;

    let mut sheet = Sheet::new(name);
    for record in reader.records() {
        let record = record?;
        sheet
            .rows
            .push(record.iter().map(|v| v.trim().to_string()).collect());
    }
    Ok(sheet)
}

// ==========================================
// 通用读取（目录 → CSV，.xlsx → Excel）
// ==========================================
pub struct UniversalWorkbookReader;

impl WorkbookSource for UniversalWorkbookReader {
    fn read_workbook(&self, path: &Path) -> ImportResult<Workbook> {
        if path.is_dir() {
            CsvDirWorkbookReader.read_workbook(path)
        } else {
            XlsxWorkbookReader.read_workbook(path)
        }
    }
}

// ==========================================
// CSV 目录写出
// ==========================================

/// 每张表写一个 <表名>.csv；目录不存在时创建
pub fn write_workbook_csv_dir(dir: &Path, workbook: &Workbook) -> ImportResult<Vec<std::path::PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(workbook.sheets.len());

    for sheet in &workbook.sheets {
        let path = dir.join(format!("{}.csv", sheet.name));
        let mut writer = WriterBuilder::new().flexible(true).from_path(&path)?;
        for row in &sheet.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        written.push(path);
    }

    tracing::info!(dir = %dir.display(), files = written.len(), "工作簿 CSV 已写出");
    Ok(written)
}
