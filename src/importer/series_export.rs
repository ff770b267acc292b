// ==========================================
// 炉体耐磨层 TCO 分析 - 序列与报告导出
// ==========================================
// 磨损/成本序列 → CSV（表头为字段名）
// 自检报告 → Markdown 文件
// ==========================================

use crate::domain::accumulation::{CostAccumulation, WearAccumulation};
use crate::importer::error::ImportResult;
use csv::Writer;
use serde::Serialize;
use std::path::Path;

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> ImportResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// 写出磨损序列: hours,floor,stage0..stage4
pub fn write_wear_series_csv(path: impl AsRef<Path>, series: &[WearAccumulation]) -> ImportResult<()> {
    let path = path.as_ref();
    write_rows(path, series)?;
    tracing::debug!(path = %path.display(), rows = series.len(), "磨损序列已写出");
    Ok(())
}

/// 写出成本序列: hours,periodCost,cumulativeCost,costPerHour
pub fn write_cost_series_csv(path: impl AsRef<Path>, series: &[CostAccumulation]) -> ImportResult<()> {
    let path = path.as_ref();
    write_rows(path, series)?;
    tracing::debug!(path = %path.display(), rows = series.len(), "成本序列已写出");
    Ok(())
}

/// 写出 Markdown 报告
pub fn write_markdown_report(path: impl AsRef<Path>, markdown: &str) -> ImportResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, markdown)?;
    tracing::info!(path = %path.display(), "报告已写出");
    Ok(())
}
