// ==========================================
// 炉体耐磨层 TCO 分析 - 双表工作簿布局
// ==========================================
// 每个策略两张表:
// - <名称>_Overview:      Parameter | Value 键值行
// - <名称>_Interventions: 表头 + 固定 15 列
// 名称取策略名前 25 个字符
// ==========================================
// 本模块只处理内存中的单元格网格，文件读写见 file_parser
// ==========================================

use crate::domain::strategy::{MaintenanceIntervention, Strategy};
use crate::domain::templates::{import_default_cost_structure, import_default_wear_rates};
use crate::domain::types::Layer;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::{HashMap, HashSet};

pub const OVERVIEW_SUFFIX: &str = "_Overview";
pub const INTERVENTIONS_SUFFIX: &str = "_Interventions";

/// 工作表名中策略名的最大长度
pub const SHEET_NAME_PREFIX_LEN: usize = 25;

/// 干预表固定列
pub const INTERVENTION_COLUMNS: [&str; 15] = [
    "Operating Hours",
    "Floor Min Thickness",
    "Stage 0 Thickness",
    "Stage 0 Min Thickness",
    "Stage 1 Thickness",
    "Stage 1 Min Thickness",
    "Stage 2 Thickness",
    "Stage 2 Min Thickness",
    "Stage 3 Thickness",
    "Stage 3 Min Thickness",
    "Stage 4 Thickness",
    "Stage 4 Min Thickness",
    "Sidewall Replacement",
    "Frontwall Replacement",
    "Rebuild",
];

// ===== 缺省值（工作簿缺项时使用）=====
const DEFAULT_OPERATING_HOURS_PER_PERIOD: f64 = 6000.0;
const DEFAULT_TOTAL_HOURS: f64 = 110000.0;
const DEFAULT_INITIAL_FLOOR_THICKNESS: f64 = 25.0;
const DEFAULT_FLOOR_MIN_THICKNESS: f64 = 14.0;

// ==========================================
// 单元格网格
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

// ==========================================
// 工作表命名
// ==========================================

/// 策略名 → 工作表基名（前 25 字符，去掉 Excel 不允许的字符）
pub fn sheet_base_name(strategy_name: &str) -> String {
    let base: String = strategy_name
        .chars()
        .take(SHEET_NAME_PREFIX_LEN)
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '[' | ']' => '_',
            other => other,
        })
        .collect();
    if base.trim().is_empty() {
        "Strategy".to_string()
    } else {
        base
    }
}

fn fmt_cell(v: f64) -> String {
    format!("{}", v)
}

fn fmt_flag(v: bool) -> String {
    let text = if v { "Yes" } else { "No" };
    text.to_string()
}

// ==========================================
// Overview 行定义
// ==========================================
// 每个数值行: 标签 + 取值 + 写回
type Getter = fn(&Strategy) -> f64;
type Setter = fn(&mut Strategy, f64);

struct OverviewRow {
    label: String,
    get: Box<dyn Fn(&Strategy) -> f64>,
    set: Box<dyn Fn(&mut Strategy, f64)>,
}

impl OverviewRow {
    fn plain(label: &str, get: Getter, set: Setter) -> Self {
        Self {
            label: label.to_string(),
            get: Box::new(get),
            set: Box::new(set),
        }
    }
}

fn overview_rows() -> Vec<OverviewRow> {
    let mut rows = vec![
        OverviewRow::plain(
            "Operating Hours per Period",
            |s| s.operating_hours_per_period,
            |s, v| s.operating_hours_per_period = v,
        ),
        OverviewRow::plain("Total Hours", |s| s.total_hours, |s, v| s.total_hours = v),
        OverviewRow::plain(
            "Initial Floor Thickness (mm)",
            |s| s.initial_floor_thickness,
            |s, v| s.initial_floor_thickness = v,
        ),
        OverviewRow::plain(
            "Floor Minimum Thickness (mm)",
            |s| s.floor_min_thickness,
            |s, v| s.floor_min_thickness = v,
        ),
    ];

    // 磨损速率: Floor, Stage 0..Stage 4
    for layer in Layer::ALL {
        rows.push(OverviewRow {
            label: layer.label().to_string(),
            get: Box::new(move |s: &Strategy| s.wear_rates.rate(layer)),
            set: Box::new(move |s: &mut Strategy, v: f64| *s.wear_rates.rate_mut(layer) = v),
        });
    }

    rows.push(OverviewRow::plain(
        "Labor Rate ($/hr)",
        |s| s.costs.labor_rate,
        |s, v| s.costs.labor_rate = v,
    ));

    for layer in Layer::STAGES {
        let n = layer.stage_number().unwrap_or_default();
        rows.push(OverviewRow {
            label: format!("Stage {} 20mm Cost", n),
            get: Box::new(move |s: &Strategy| s.costs.stages[n].price_20mm),
            set: Box::new(move |s: &mut Strategy, v: f64| s.costs.stages[n].price_20mm = v),
        });
        rows.push(OverviewRow {
            label: format!("Stage {} 25mm Cost", n),
            get: Box::new(move |s: &Strategy| s.costs.stages[n].price_25mm),
            set: Box::new(move |s: &mut Strategy, v: f64| s.costs.stages[n].price_25mm = v),
        });
    }

    rows.extend([
        OverviewRow::plain("Sidewall Cost", |s| s.costs.sidewall_cost, |s, v| s.costs.sidewall_cost = v),
        OverviewRow::plain("Frontwall Cost", |s| s.costs.frontwall_cost, |s, v| s.costs.frontwall_cost = v),
        OverviewRow::plain("Rebuild Cost", |s| s.costs.rebuild_cost, |s, v| s.costs.rebuild_cost = v),
    ]);

    for layer in Layer::STAGES {
        let n = layer.stage_number().unwrap_or_default();
        rows.push(OverviewRow {
            label: format!("Stage {} Quantity", n),
            get: Box::new(move |s: &Strategy| s.costs.stages[n].quantity),
            set: Box::new(move |s: &mut Strategy, v: f64| s.costs.stages[n].quantity = v),
        });
    }

    rows.extend([
        OverviewRow::plain("Sidewall Quantity", |s| s.costs.sidewall_qty, |s, v| s.costs.sidewall_qty = v),
        OverviewRow::plain("Frontwall Quantity", |s| s.costs.frontwall_qty, |s, v| s.costs.frontwall_qty = v),
        OverviewRow::plain("Rebuild Quantity", |s| s.costs.rebuild_qty, |s, v| s.costs.rebuild_qty = v),
        OverviewRow::plain("Labor WP 20mm (min)", |s| s.costs.labor_wp_20mm, |s, v| s.costs.labor_wp_20mm = v),
        OverviewRow::plain("Labor WP 25mm (min)", |s| s.costs.labor_wp_25mm, |s, v| s.costs.labor_wp_25mm = v),
        OverviewRow::plain("Labor Sidewall (hrs)", |s| s.costs.labor_sidewall, |s, v| s.costs.labor_sidewall = v),
        OverviewRow::plain("Labor Frontwall (hrs)", |s| s.costs.labor_frontwall, |s, v| s.costs.labor_frontwall = v),
        OverviewRow::plain("Labor Rebuild (hrs)", |s| s.costs.labor_rebuild, |s, v| s.costs.labor_rebuild = v),
    ]);

    rows
}

// ==========================================
// 导出: Strategy → Sheet 对
// ==========================================

/// 生成单个策略的 (Overview, Interventions) 两张表
pub fn strategy_to_sheets(strategy: &Strategy, base_name: &str) -> (Sheet, Sheet) {
    let mut overview = Sheet::new(format!("{}{}", base_name, OVERVIEW_SUFFIX));
    overview.push_row(["Parameter", "Value"]);
    overview.push_row(["Strategy Name".to_string(), strategy.name.clone()]);
    for row in overview_rows() {
        overview.push_row([row.label.clone(), fmt_cell((row.get)(strategy))]);
    }

    let mut interventions = Sheet::new(format!("{}{}", base_name, INTERVENTIONS_SUFFIX));
    interventions.push_row(INTERVENTION_COLUMNS);
    for intervention in &strategy.interventions {
        let mut cells = vec![
            fmt_cell(intervention.operating_hours),
            fmt_cell(intervention.floor_min_thickness),
        ];
        for stage in &intervention.stages {
            cells.push(fmt_cell(stage.thickness));
            cells.push(fmt_cell(stage.min_thickness));
        }
        cells.push(fmt_flag(intervention.sidewall_replacement));
        cells.push(fmt_flag(intervention.frontwall_replacement));
        cells.push(fmt_flag(intervention.rebuild));
        interventions.rows.push(cells);
    }

    (overview, interventions)
}

/// 多个策略写成一个工作簿；基名重复时追加序号
pub fn strategies_to_workbook(strategies: &[Strategy]) -> Workbook {
    let mut used = HashSet::new();
    let mut workbook = Workbook::default();

    for strategy in strategies {
        let base = sheet_base_name(&strategy.name);
        let mut unique = base.clone();
        let mut n = 2;
        while !used.insert(unique.clone()) {
            unique = format!("{}_{}", base, n);
            n += 1;
        }

        let (overview, interventions) = strategy_to_sheets(strategy, &unique);
        workbook.sheets.push(overview);
        workbook.sheets.push(interventions);
    }

    workbook
}

// ==========================================
// 导入: Sheet 对 → Strategy
// ==========================================

fn cell_error(sheet: &Sheet, row: usize, column: &str, value: &str) -> ImportError {
    ImportError::CellParse {
        sheet: sheet.name.clone(),
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// 数值单元格；空单元格返回 None
fn parse_number(
    sheet: &Sheet,
    row: usize,
    column: &str,
    raw: Option<&String>,
) -> ImportResult<Option<f64>> {
    let text = raw.map(|s| s.trim()).unwrap_or("");
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| cell_error(sheet, row, column, text))
}

/// 标记单元格: Yes/No, true/false, 1/0；空单元格为 false
fn parse_flag(sheet: &Sheet, row: usize, column: &str, raw: Option<&String>) -> ImportResult<bool> {
    let text = raw.map(|s| s.trim()).unwrap_or("");
    match text.to_ascii_lowercase().as_str() {
        "" | "no" | "false" | "0" => Ok(false),
        "yes" | "true" | "1" => Ok(true),
        _ => Err(cell_error(sheet, row, column, text)),
    }
}

fn default_import_strategy(name: String) -> Strategy {
    Strategy {
        id: format!("imported-{}", uuid::Uuid::new_v4()),
        name,
        operating_hours_per_period: DEFAULT_OPERATING_HOURS_PER_PERIOD,
        total_hours: DEFAULT_TOTAL_HOURS,
        initial_floor_thickness: DEFAULT_INITIAL_FLOOR_THICKNESS,
        floor_min_thickness: DEFAULT_FLOOR_MIN_THICKNESS,
        interventions: Vec::new(),
        wear_rates: import_default_wear_rates(),
        costs: import_default_cost_structure(),
    }
}

/// 解析 Overview 表（行号从 1 开始，含表头）
fn parse_overview(sheet: &Sheet, base_name: &str) -> ImportResult<Strategy> {
    let mut values: HashMap<&str, (usize, Option<&String>)> = HashMap::new();
    for (idx, row) in sheet.rows.iter().enumerate().skip(1) {
        if let Some(label) = row.first() {
            values.insert(label.trim(), (idx + 1, row.get(1)));
        }
    }

    let name = values
        .get("Strategy Name")
        .and_then(|(_, v)| *v)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| base_name.to_string());

    let mut strategy = default_import_strategy(name);
    for row in overview_rows() {
        if let Some((row_no, raw)) = values.get(row.label.as_str()) {
            if let Some(v) = parse_number(sheet, *row_no, &row.label, *raw)? {
                (row.set)(&mut strategy, v);
            }
        }
    }

    Ok(strategy)
}

/// 解析 Interventions 表（跳过表头与全空行）
fn parse_interventions(sheet: &Sheet) -> ImportResult<Vec<MaintenanceIntervention>> {
    let mut interventions = Vec::new();

    for (idx, row) in sheet.rows.iter().enumerate().skip(1) {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let row_no = idx + 1;
        let number = |col: usize| parse_number(sheet, row_no, INTERVENTION_COLUMNS[col], row.get(col));
        let flag = |col: usize| parse_flag(sheet, row_no, INTERVENTION_COLUMNS[col], row.get(col));

        let mut intervention = MaintenanceIntervention::at(
            number(0)?.unwrap_or(0.0),
            number(1)?.unwrap_or(DEFAULT_FLOOR_MIN_THICKNESS),
        );
        for (n, stage) in intervention.stages.iter_mut().enumerate() {
            stage.thickness = number(2 + n * 2)?.unwrap_or(0.0);
            stage.min_thickness = number(3 + n * 2)?.unwrap_or(0.0);
        }
        intervention.sidewall_replacement = flag(12)?;
        intervention.frontwall_replacement = flag(13)?;
        intervention.rebuild = flag(14)?;

        interventions.push(intervention);
    }

    Ok(interventions)
}

/// 从工作簿读出全部策略
///
/// # 返回
/// - Err(NoStrategies): 没有任何完整的表对
/// - Err(CellParse): 单元格不是数值/标记
pub fn strategies_from_workbook(workbook: &Workbook) -> ImportResult<Vec<Strategy>> {
    let mut strategies = Vec::new();

    for sheet in &workbook.sheets {
        let Some(base_name) = sheet.name.strip_suffix(OVERVIEW_SUFFIX) else {
            continue;
        };

        let partner = format!("{}{}", base_name, INTERVENTIONS_SUFFIX);
        let Some(interventions_sheet) = workbook.sheet(&partner) else {
            tracing::warn!(
                sheet = %sheet.name,
                "{}",
                crate::i18n::t_with_args("import.orphan_overview", &[("sheet", &sheet.name)])
            );
            continue;
        };

        let mut strategy = parse_overview(sheet, base_name)?;
        strategy.interventions = parse_interventions(interventions_sheet)?;
        tracing::debug!(
            strategy = %strategy.name,
            interventions = strategy.interventions.len(),
            "工作簿策略解析完成"
        );
        strategies.push(strategy);
    }

    if strategies.is_empty() {
        return Err(ImportError::NoStrategies);
    }
    Ok(strategies)
}

/// 比较导入前后策略时忽略 id（导入会重新分配 id）
pub fn same_content(a: &Strategy, b: &Strategy) -> bool {
    let strip = |s: &Strategy| Strategy {
        id: String::new(),
        ..s.clone()
    };
    strip(a) == strip(b)
}
