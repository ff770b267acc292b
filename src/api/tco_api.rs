// ==========================================
// 炉体耐磨层 TCO 分析 - TCO API
// ==========================================
// 职责: 串联 校验 → 仿真/累计 → 对比/导出/自检
// 调用方: 命令行、集成测试
// ==========================================
// 数据流: Strategy → StrategyValidator → CachedCalculationEngine → 汇总
// ==========================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfig;
use crate::domain::accumulation::{CostAccumulation, WearAccumulation};
use crate::domain::strategy::Strategy;
use crate::engine::comparison::apply_savings;
use crate::engine::{
    render_markdown, CacheStats, CachedCalculationEngine, CalculationOutcome, SelfTestEngine,
    StrategyComparator, StrategySummary, StrategyValidator, TestSuite, ValidationOutcome,
};
use crate::importer;

/// 单策略分析结果
#[derive(Debug, Clone)]
pub struct StrategyAnalysis {
    /// 规范化后的策略（引擎实际使用的输入）
    pub strategy: Strategy,
    pub validation: ValidationOutcome,
    pub wear: CalculationOutcome<WearAccumulation>,
    pub cost: CalculationOutcome<CostAccumulation>,
    pub summary: StrategySummary,
}

/// 自检报告
#[derive(Debug, Clone, Serialize)]
pub struct SelfTestReport {
    pub suites: Vec<TestSuite>,
    pub markdown: String,
}

/// 序列导出结果
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFiles {
    pub wear_csv: PathBuf,
    pub cost_csv: PathBuf,
}

/// TCO API
pub struct TcoApi {
    config: EngineConfig,
    validator: StrategyValidator,
    comparator: StrategyComparator,
    engine: Mutex<CachedCalculationEngine>,
}

impl Default for TcoApi {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl TcoApi {
    /// 创建新的 TcoApi 实例
    pub fn new(config: EngineConfig) -> Self {
        let engine = CachedCalculationEngine::new(config.cache_capacity);
        Self {
            config,
            validator: StrategyValidator::new(),
            comparator: StrategyComparator::new(),
            engine: Mutex::new(engine),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn with_engine<T>(&self, f: impl FnOnce(&mut CachedCalculationEngine) -> T) -> ApiResult<T> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))?;
        Ok(f(&mut engine))
    }

    // ==========================================
    // 校验
    // ==========================================

    /// 校验策略（不运行引擎）
    pub fn validate(&self, strategies: &[Strategy]) -> Vec<ValidationOutcome> {
        strategies.iter().map(|s| self.validator.validate(s)).collect()
    }

    // ==========================================
    // 分析 / 对比
    // ==========================================

    /// 校验 + 仿真 + 累计
    ///
    /// # 返回
    /// - Ok(StrategyAnalysis): 序列与汇总（savings 为 0，由 compare 计算）
    pub fn analyze(&self, strategy: &Strategy) -> ApiResult<StrategyAnalysis> {
        let validation = self.validator.validate(strategy);
        let normalized = validation.strategy.clone();

        let (wear, cost) = self.with_engine(|engine| {
            (
                engine.simulate_wear(&normalized),
                engine.accumulate_cost(&normalized),
            )
        })?;

        let summary = self
            .comparator
            .summarize(&normalized, &wear.series, &cost.series);

        tracing::info!(
            strategy_id = %normalized.id,
            violations = validation.violations.len(),
            total_cost = summary.total_cost,
            wear_from_cache = wear.from_cache,
            cost_from_cache = cost.from_cache,
            "策略分析完成"
        );

        Ok(StrategyAnalysis {
            strategy: normalized,
            validation,
            wear,
            cost,
            summary,
        })
    }

    /// 对比多个策略，第一个为基准
    pub fn compare(&self, strategies: &[Strategy]) -> ApiResult<Vec<StrategySummary>> {
        let mut summaries = strategies
            .iter()
            .map(|s| self.analyze(s).map(|a| a.summary))
            .collect::<ApiResult<Vec<_>>>()?;
        apply_savings(&mut summaries);
        Ok(summaries)
    }

    pub fn cache_stats(&self) -> ApiResult<CacheStats> {
        self.with_engine(|engine| engine.cache_stats())
    }

    pub fn clear_cache(&self) -> ApiResult<()> {
        self.with_engine(|engine| engine.clear_cache())
    }

    // ==========================================
    // 导入 / 导出
    // ==========================================

    pub fn load_strategies(&self, path: impl AsRef<Path>) -> ApiResult<Vec<Strategy>> {
        Ok(importer::load_strategies_json(path)?)
    }

    pub fn save_strategies(&self, path: impl AsRef<Path>, strategies: &[Strategy]) -> ApiResult<()> {
        Ok(importer::save_strategies_json(path, strategies)?)
    }

    /// 导入工作簿（.xlsx 文件或 CSV 工作表目录）
    pub fn import_workbook(&self, path: impl AsRef<Path>) -> ApiResult<Vec<Strategy>> {
        Ok(importer::import_workbook(path)?)
    }

    pub fn export_workbook(
        &self,
        dir: impl AsRef<Path>,
        strategies: &[Strategy],
    ) -> ApiResult<Vec<PathBuf>> {
        if strategies.is_empty() {
            return Err(ApiError::InvalidInput("没有可导出的策略".to_string()));
        }
        Ok(importer::export_sheet_pairs_csv(dir, strategies)?)
    }

    /// 写出 <id>_wear.csv / <id>_cost.csv
    pub fn export_series(&self, dir: impl AsRef<Path>, analysis: &StrategyAnalysis) -> ApiResult<SeriesFiles> {
        let dir = dir.as_ref();
        let stem = file_stem_for(&analysis.strategy);
        let files = SeriesFiles {
            wear_csv: dir.join(format!("{}_wear.csv", stem)),
            cost_csv: dir.join(format!("{}_cost.csv", stem)),
        };
        importer::write_wear_series_csv(&files.wear_csv, &analysis.wear.series)?;
        importer::write_cost_series_csv(&files.cost_csv, &analysis.cost.series)?;
        Ok(files)
    }

    // ==========================================
    // 自检
    // ==========================================

    pub fn self_test(&self, strategies: &[Strategy], generated_at: DateTime<Utc>) -> SelfTestReport {
        let engine = SelfTestEngine::from_config(&self.config);
        let suites = engine.run_comprehensive(strategies);
        let markdown = render_markdown(&suites, generated_at);
        SelfTestReport { suites, markdown }
    }

    pub fn write_report(&self, path: impl AsRef<Path>, report: &SelfTestReport) -> ApiResult<()> {
        Ok(importer::write_markdown_report(path, &report.markdown)?)
    }
}

/// 序列文件名: 优先 id，为空时用名称；非字母数字替换为 '_'
fn file_stem_for(strategy: &Strategy) -> String {
    let source = if strategy.id.trim().is_empty() {
        &strategy.name
    } else {
        &strategy.id
    };
    let stem: String = source
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "strategy".to_string()
    } else {
        stem
    }
}
