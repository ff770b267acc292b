// ==========================================
// 炉体耐磨层 TCO 分析 - 命令行入口
// ==========================================
// 用法:
//   furnace-tco validate  <strategies.json>
//   furnace-tco simulate  <strategies.json> [out_dir]
//   furnace-tco report    [out.md]
//   furnace-tco export    <strategies.json> <out_dir>
//   furnace-tco import    <workbook.xlsx|dir> <out.json>
//   furnace-tco templates <out.json>
// ==========================================
// 任意 ApiError 以非零退出码结束
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::Utc;
use furnace_tco::config::ConfigManager;
use furnace_tco::domain::templates::default_strategies;
use furnace_tco::{logging, Layer, TcoApi, WearSeverity};
use std::path::PathBuf;

const USAGE: &str = "\
usage: furnace-tco <command> [args]

commands:
  validate  <strategies.json>               print violations per strategy
  simulate  <strategies.json> [out_dir]     run both engines, write series CSV
  report    [out.md]                        self-test the built-in templates
  export    <strategies.json> <out_dir>     write sheet-pair CSV files
  import    <workbook.xlsx|dir> <out.json>  read a workbook into JSON
  templates <out.json>                      write the built-in templates";

fn required(args: &mut impl Iterator<Item = String>, what: &str) -> Result<PathBuf> {
    match args.next() {
        Some(v) if !v.trim().is_empty() => Ok(PathBuf::from(v)),
        _ => bail!("missing argument: {}\n\n{}", what, USAGE),
    }
}

fn main() -> Result<()> {
    logging::init();

    let config = ConfigManager::load_default()
        .context("加载配置失败")?
        .into_config();
    furnace_tco::i18n::set_locale(&config.locale);
    let default_out = config.export_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let api = TcoApi::new(config);

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_default();

    tracing::info!(version = furnace_tco::VERSION, command = %command, "{}", furnace_tco::APP_NAME);

    match command.as_str() {
        "validate" => {
            let input = required(&mut args, "strategies.json")?;
            let strategies = api.load_strategies(&input)?;
            for outcome in api.validate(&strategies) {
                let summary = outcome.summary();
                println!(
                    "{} ({}): {} violation(s)",
                    outcome.strategy.name, outcome.strategy.id, summary.error_count
                );
                for v in &summary.violations {
                    println!("  [{:?}] {} = {}: {}", v.kind, v.field, v.value, v.message);
                }
                let rates: Vec<String> = Layer::ALL
                    .iter()
                    .map(|layer| {
                        let rate = outcome.strategy.wear_rates.rate(*layer);
                        format!("{}={} ({})", layer.as_str(), rate, WearSeverity::classify(rate))
                    })
                    .collect();
                println!("  rates: {}", rates.join(", "));
            }
        }
        "simulate" => {
            let input = required(&mut args, "strategies.json")?;
            let out_dir = args.next().map(PathBuf::from).unwrap_or(default_out);
            let strategies = api.load_strategies(&input)?;

            for strategy in &strategies {
                let analysis = api.analyze(strategy)?;
                let files = api.export_series(&out_dir, &analysis)?;
                println!(
                    "{}: {} wear samples -> {}, {} cost points -> {}",
                    analysis.strategy.name,
                    analysis.wear.series.len(),
                    files.wear_csv.display(),
                    analysis.cost.series.len(),
                    files.cost_csv.display()
                );
            }

            println!();
            println!(
                "{:<40} {:>14} {:>10} {:>7} {:>10} {:>14} {:>9}",
                "strategy", "total_cost", "cost/h", "events", "floor_mm", "savings", "savings%"
            );
            for s in api.compare(&strategies)? {
                println!(
                    "{:<40} {:>14.2} {:>10.4} {:>7} {:>10.2} {:>14.2} {:>8.1}%",
                    s.strategy_name.chars().take(40).collect::<String>(),
                    s.total_cost,
                    s.cost_per_hour,
                    s.maintenance_events,
                    s.final_floor_thickness,
                    s.savings,
                    s.savings_pct
                );
            }
        }
        "report" => {
            let output = args
                .next()
                .map(PathBuf::from)
                .unwrap_or_else(|| default_out.join("validation_report.md"));
            let report = api.self_test(&default_strategies(), Utc::now());
            api.write_report(&output, &report)?;
            let passed: usize = report.suites.iter().map(|s| s.passed).sum();
            let total: usize = report.suites.iter().map(|s| s.total).sum();
            println!("{}/{} assertions passed -> {}", passed, total, output.display());
        }
        "export" => {
            let input = required(&mut args, "strategies.json")?;
            let out_dir = required(&mut args, "out_dir")?;
            let strategies = api.load_strategies(&input)?;
            let files = api.export_workbook(&out_dir, &strategies)?;
            println!("{} sheet file(s) written to {}", files.len(), out_dir.display());
        }
        "import" => {
            let input = required(&mut args, "workbook.xlsx|dir")?;
            let output = required(&mut args, "out.json")?;
            let strategies = api.import_workbook(&input)?;
            api.save_strategies(&output, &strategies)?;
            println!("{} strategy(ies) imported -> {}", strategies.len(), output.display());
        }
        "templates" => {
            let output = required(&mut args, "out.json")?;
            let strategies = default_strategies();
            api.save_strategies(&output, &strategies)?;
            println!("{} template(s) written -> {}", strategies.len(), output.display());
        }
        "" | "help" | "-h" | "--help" => {
            println!("{}", USAGE);
        }
        other => bail!("unknown command: {}\n\n{}", other, USAGE),
    }

    Ok(())
}
