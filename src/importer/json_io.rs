// ==========================================
// 炉体耐磨层 TCO 分析 - JSON 策略文档
// ==========================================
// 格式: Strategy 对象数组（camelCase 扁平字段）
// 说明: 除 serde 类型检查外不做模式校验，范围修复交给 StrategyValidator
// ==========================================

use crate::domain::strategy::Strategy;
use crate::importer::error::{ImportError, ImportResult};
use std::path::Path;

/// 解析 JSON 策略文档
pub fn parse_strategies_json(content: &str) -> ImportResult<Vec<Strategy>> {
    let strategies: Vec<Strategy> = serde_json::from_str(content)?;
    Ok(strategies)
}

/// 序列化为格式化 JSON
pub fn strategies_to_json(strategies: &[Strategy]) -> ImportResult<String> {
    Ok(serde_json::to_string_pretty(strategies)?)
}

/// 从文件加载策略
pub fn load_strategies_json(path: impl AsRef<Path>) -> ImportResult<Vec<Strategy>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let strategies = parse_strategies_json(&content)?;
    tracing::info!(path = %path.display(), count = strategies.len(), "JSON 策略加载完成");
    Ok(strategies)
}

/// 保存策略到文件
pub fn save_strategies_json(path: impl AsRef<Path>, strategies: &[Strategy]) -> ImportResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, strategies_to_json(strategies)?)?;
    tracing::info!(path = %path.display(), count = strategies.len(), "JSON 策略已保存");
    Ok(())
}
