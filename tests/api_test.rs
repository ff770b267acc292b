// ==========================================
// TcoApi 集成测试
// ==========================================
// 测试目标: API 层串联 校验 → 计算 → 导出/自检
// 覆盖范围:
// 1. analyze 使用规范化后的策略并走缓存
// 2. 文件导入导出（JSON / 工作表目录 / 序列 CSV / 报告）
// 3. 错误统一包装为 ApiError
// ==========================================

mod helpers;

use chrono::{TimeZone, Utc};
use furnace_tco::config::EngineConfig;
use furnace_tco::domain::templates::{default_strategies, scenario1, scenario2};
use furnace_tco::domain::types::Layer;
use furnace_tco::importer::workbook::same_content;
use furnace_tco::importer::ImportError;
use furnace_tco::{logging, ApiError, TcoApi};
use helpers::test_data_builder::StrategyBuilder;
use tempfile::TempDir;

// ==========================================
// 分析
// ==========================================

#[test]
fn test_analyze_clamps_before_simulating() {
    logging::init_test();
    let api = TcoApi::default();
    let strategy = StrategyBuilder::new("clamped")
        .total_hours(4000.0)
        .operating_hours_per_period(1000.0)
        .rate(Layer::Floor, 0.9)
        .checkpoint(0.0)
        .build();

    let analysis = api.analyze(&strategy).unwrap();
    assert_eq!(analysis.strategy.wear_rates.floor, 0.45);
    assert_eq!(analysis.validation.violations.len(), 1);
    // 炉底按夹取后的 0.45 磨损
    let last = analysis.wear.series.last().map(|s| s.floor).unwrap_or_default();
    assert!((last - (25.0 - 0.45 * 4.0)).abs() < 1e-9);
}

#[test]
fn test_cache_capacity_from_config() {
    let config = EngineConfig {
        cache_capacity: 1,
        ..EngineConfig::default()
    };
    let api = TcoApi::new(config);
    api.analyze(&scenario1()).unwrap();
    api.analyze(&scenario2()).unwrap();

    let stats = api.cache_stats().unwrap();
    assert_eq!(stats.capacity, 1);
    assert_eq!(stats.wear_cache_size, 1);
    assert!(!api.analyze(&scenario1()).unwrap().wear.from_cache);
}

#[test]
fn test_compare_baseline_first() {
    let summaries = TcoApi::default().compare(&default_strategies()).unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].strategy_id, "scenario1");
    assert_eq!(summaries[0].savings, 0.0);
    let expected = summaries[0].total_cost - summaries[1].total_cost;
    assert!((summaries[1].savings - expected).abs() < 1e-6);
}

// ==========================================
// 文件
// ==========================================

#[test]
fn test_export_then_import_workbook() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let api = TcoApi::default();
    let strategies = default_strategies();

    let files = api.export_workbook(dir.path(), &strategies).unwrap();
    assert_eq!(files.len(), 4);

    let imported = api.import_workbook(dir.path()).unwrap();
    assert_eq!(imported.len(), 2);
    for original in &strategies {
        assert!(imported.iter().any(|s| same_content(s, original)));
    }
}

#[test]
fn test_export_series_files() {
    let dir = TempDir::new().unwrap();
    let api = TcoApi::default();
    let analysis = api.analyze(&scenario2()).unwrap();

    let files = api.export_series(dir.path(), &analysis).unwrap();
    assert_eq!(files.wear_csv, dir.path().join("scenario2_wear.csv"));
    assert_eq!(files.cost_csv, dir.path().join("scenario2_cost.csv"));

    let cost_text = std::fs::read_to_string(&files.cost_csv).unwrap();
    assert_eq!(cost_text.lines().count(), analysis.cost.series.len() + 1);
}

#[test]
fn test_json_roundtrip_through_api() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("strategies.json");
    let api = TcoApi::default();

    api.save_strategies(&path, &default_strategies()).unwrap();
    assert_eq!(api.load_strategies(&path).unwrap(), default_strategies());
}

#[test]
fn test_missing_file_is_import_error() {
    let dir = TempDir::new().unwrap();
    let result = TcoApi::default().load_strategies(dir.path().join("absent.json"));
    assert!(matches!(
        result,
        Err(ApiError::Import(ImportError::FileNotFound(_)))
    ));
}

// ==========================================
// 自检
// ==========================================

#[test]
fn test_self_test_report_written() {
    let dir = TempDir::new().unwrap();
    let api = TcoApi::default();
    let generated_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    let report = api.self_test(&default_strategies(), generated_at);
    assert_eq!(report.suites.len(), 2);
    for suite in &report.suites {
        assert_eq!(suite.total, suite.tests.len());
        assert!(suite.total > 1);
    }

    let path = dir.path().join("validation_report.md");
    api.write_report(&path, &report).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, report.markdown);
    assert!(written.contains("2024-01-02T03:04:05+00:00"));
}
