// ==========================================
// 炉体耐磨层 TCO 分析 - 策略校验器
// ==========================================
// 职责: 把 Strategy 各字段夹到领域有效范围，记录违规
// 输入: &Strategy（不修改）
// 输出: 规范化后的 Strategy 副本 + 违规列表
// ==========================================
// 红线: 永不失败，永远返回可用策略
// 红线: 干预按给定顺序检查，不重新排序
// ==========================================

use crate::domain::strategy::{CostStructure, MaintenanceIntervention, Strategy, WearRates};
use crate::domain::types::Layer;
use crate::i18n::t_with_args;
use serde::{Deserialize, Serialize};

// ==========================================
// 领域取值范围
// ==========================================
pub mod limits {
    /// 磨损速率 (mm/1000h)
    pub const WEAR_RATE_MIN: f64 = 0.12;
    pub const WEAR_RATE_MAX: f64 = 0.45;

    /// 厚度 (mm)
    pub const THICKNESS_MIN: f64 = 0.0;
    pub const THICKNESS_MAX: f64 = 100.0;

    /// stage0 最小厚度下限（允许磨入下层）
    pub const STAGE0_MIN_THICKNESS_FLOOR: f64 = -5.0;

    /// 运行小时
    pub const OPERATING_HOURS_MIN: f64 = 0.0;
    pub const OPERATING_HOURS_MAX: f64 = 500_000.0;

    /// 非递增干预的顺延步长
    pub const ORDERING_SHIFT_HOURS: f64 = 1000.0;
}

// ==========================================
// ViolationKind - 违规类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    Range,    // 超出取值范围，已夹取
    Ordering, // 干预时间非递增，已顺延
    Relation, // 字段间关系不成立，仅提示
}

/// 单条校验违规
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub kind: ViolationKind,
    /// 字段路径，如 interventions[2].operatingHours
    pub field: String,
    /// 原始值
    pub value: f64,
    /// 有效范围 [min, max]
    pub valid_range: (f64, f64),
    pub message: String,
}

/// 校验结果
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub strategy: Strategy,
    pub violations: Vec<ValidationViolation>,
}

/// 校验摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub error_count: usize,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationOutcome {
    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary {
            is_valid: self.violations.is_empty(),
            error_count: self.violations.len(),
            violations: self.violations.clone(),
        }
    }
}

// ==========================================
// StrategyValidator - 策略校验器
// ==========================================
pub struct StrategyValidator {
    // 无状态，违规按次收集
}

impl Default for StrategyValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyValidator {
    pub fn new() -> Self {
        Self {}
    }

    /// 校验并规范化策略
    ///
    /// # 参数
    /// - `strategy`: 原始策略（不会被修改）
    ///
    /// # 返回
    /// 规范化后的策略副本 + 违规列表
    pub fn validate(&self, strategy: &Strategy) -> ValidationOutcome {
        let mut pass = ValidationPass::default();

        let mut validated = strategy.clone();

        // 1. 基础参数
        validated.operating_hours_per_period =
            pass.operating_hours(strategy.operating_hours_per_period, "operatingHoursPerPeriod");
        validated.total_hours = pass.operating_hours(strategy.total_hours, "totalHours");

        // 2. 初始炉底
        validated.initial_floor_thickness =
            pass.thickness(strategy.initial_floor_thickness, "initialFloorThickness");
        validated.floor_min_thickness =
            pass.thickness(strategy.floor_min_thickness, "floorMinThickness");

        // 3. 磨损速率
        validated.wear_rates = pass.wear_rates(&strategy.wear_rates);

        // 4. 干预序列
        validated.interventions = pass.interventions(&strategy.interventions);

        // 5. 成本结构
        validated.costs = pass.cost_structure(&strategy.costs);

        // 6. 字段间关系（仅提示，不修复）
        pass.relations(&validated);

        tracing::debug!(
            strategy_id = %strategy.id,
            violations = pass.violations.len(),
            "策略校验完成"
        );

        ValidationOutcome {
            strategy: validated,
            violations: pass.violations,
        }
    }
}

// ==========================================
// ValidationPass - 单次校验的违规收集
// ==========================================
#[derive(Default)]
struct ValidationPass {
    violations: Vec<ValidationViolation>,
}

fn fmt_num(v: f64) -> String {
    format!("{}", v)
}

impl ValidationPass {
    fn push(&mut self, kind: ViolationKind, field: &str, value: f64, range: (f64, f64), message: String) {
        self.violations.push(ValidationViolation {
            kind,
            field: field.to_string(),
            value,
            valid_range: range,
            message,
        });
    }

    /// 通用夹取；非有限值按下限处理
    fn clamp(&mut self, value: f64, field: &str, min: f64, max: f64, message_key: &str) -> f64 {
        if value.is_finite() && value >= min && value <= max {
            return value;
        }

        let message = t_with_args(
            message_key,
            &[
                ("value", &fmt_num(value)),
                ("min", &fmt_num(min)),
                ("max", &fmt_num(max)),
            ],
        );
        self.push(ViolationKind::Range, field, value, (min, max), message);

        if value.is_finite() {
            value.clamp(min, max)
        } else {
            min
        }
    }

    fn wear_rate(&mut self, value: f64, field: &str) -> f64 {
        // 速率 0 表示该层不投用（不磨损），保留原值
        if value == 0.0 {
            return value;
        }
        self.clamp(
            value,
            field,
            limits::WEAR_RATE_MIN,
            limits::WEAR_RATE_MAX,
            "validation.wear_rate_range",
        )
    }

    fn thickness_with_floor(&mut self, value: f64, field: &str, lower: f64) -> f64 {
        self.clamp(
            value,
            field,
            lower,
            limits::THICKNESS_MAX,
            "validation.thickness_range",
        )
    }

    fn thickness(&mut self, value: f64, field: &str) -> f64 {
        self.thickness_with_floor(value, field, limits::THICKNESS_MIN)
    }

    fn operating_hours(&mut self, value: f64, field: &str) -> f64 {
        self.clamp(
            value,
            field,
            limits::OPERATING_HOURS_MIN,
            limits::OPERATING_HOURS_MAX,
            "validation.hours_range",
        )
    }

    fn cost(&mut self, value: f64, field: &str) -> f64 {
        if value.is_finite() && value >= 0.0 {
            return value;
        }
        let message = t_with_args("validation.cost_negative", &[("value", &fmt_num(value))]);
        self.push(ViolationKind::Range, field, value, (0.0, f64::MAX), message);
        0.0
    }

    /// 数量取非负整数
    fn quantity(&mut self, value: f64, field: &str) -> f64 {
        let corrected = if value.is_finite() {
            value.floor().max(0.0)
        } else {
            0.0
        };
        if corrected != value {
            let message = t_with_args(
                "validation.quantity_integer",
                &[("value", &fmt_num(value)), ("corrected", &fmt_num(corrected))],
            );
            self.push(ViolationKind::Range, field, value, (0.0, f64::MAX), message);
        }
        corrected
    }

    fn wear_rates(&mut self, rates: &WearRates) -> WearRates {
        let mut out = *rates;
        for layer in Layer::ALL {
            let field = format!("wearRates.{}", layer.as_str());
            *out.rate_mut(layer) = self.wear_rate(rates.rate(layer), &field);
        }
        out
    }

    fn interventions(&mut self, interventions: &[MaintenanceIntervention]) -> Vec<MaintenanceIntervention> {
        let mut out: Vec<MaintenanceIntervention> = Vec::with_capacity(interventions.len());

        for (i, intervention) in interventions.iter().enumerate() {
            let mut fixed = intervention.clone();
            let hours_field = format!("interventions[{}].operatingHours", i);

            fixed.operating_hours = self.operating_hours(intervention.operating_hours, &hours_field);

            // 严格递增：非递增者顺延到前一个 + 1000
            if let Some(prev) = out.last() {
                if fixed.operating_hours <= prev.operating_hours {
                    let corrected = prev.operating_hours + limits::ORDERING_SHIFT_HOURS;
                    let message = t_with_args(
                        "validation.ordering",
                        &[
                            ("value", &fmt_num(fixed.operating_hours)),
                            ("corrected", &fmt_num(corrected)),
                        ],
                    );
                    self.push(
                        ViolationKind::Ordering,
                        &hours_field,
                        fixed.operating_hours,
                        (corrected, limits::OPERATING_HOURS_MAX),
                        message,
                    );
                    // 顺延后超出上限：保留顺延值，另记一条范围违规
                    if corrected > limits::OPERATING_HOURS_MAX {
                        let message = t_with_args(
                            "validation.hours_range",
                            &[
                                ("value", &fmt_num(corrected)),
                                ("min", &fmt_num(limits::OPERATING_HOURS_MIN)),
                                ("max", &fmt_num(limits::OPERATING_HOURS_MAX)),
                            ],
                        );
                        self.push(
                            ViolationKind::Range,
                            &hours_field,
                            corrected,
                            (limits::OPERATING_HOURS_MIN, limits::OPERATING_HOURS_MAX),
                            message,
                        );
                    }
                    fixed.operating_hours = corrected;
                }
            }

            for layer in Layer::STAGES {
                let name = layer.as_str();
                let min_floor = if layer == Layer::Stage0 {
                    limits::STAGE0_MIN_THICKNESS_FLOOR
                } else {
                    limits::THICKNESS_MIN
                };
                let original = intervention.install(layer).copied().unwrap_or_default();

                let thickness = self.thickness(
                    original.thickness,
                    &format!("interventions[{}].{}Thickness", i, name),
                );
                let min_thickness = self.thickness_with_floor(
                    original.min_thickness,
                    &format!("interventions[{}].{}MinThickness", i, name),
                    min_floor,
                );

                if let Some(install) = fixed.install_mut(layer) {
                    install.thickness = thickness;
                    install.min_thickness = min_thickness;
                }
            }

            fixed.floor_min_thickness = self.thickness(
                intervention.floor_min_thickness,
                &format!("interventions[{}].floorMinThickness", i),
            );

            out.push(fixed);
        }

        out
    }

    fn cost_structure(&mut self, costs: &CostStructure) -> CostStructure {
        let mut out = costs.clone();

        for layer in Layer::STAGES {
            let name = layer.as_str();
            if let (Some(src), Some(dst)) = (costs.pricing(layer).copied(), out.pricing_mut(layer)) {
                dst.price_20mm = self.cost(src.price_20mm, &format!("costs.{}_20mm", name));
                dst.price_25mm = self.cost(src.price_25mm, &format!("costs.{}_25mm", name));
                dst.quantity = self.quantity(src.quantity, &format!("costs.{}Qty", name));
            }
        }

        out.sidewall_qty = self.quantity(costs.sidewall_qty, "costs.sidewallQty");
        out.frontwall_qty = self.quantity(costs.frontwall_qty, "costs.frontwallQty");
        out.rebuild_qty = self.quantity(costs.rebuild_qty, "costs.rebuildQty");

        out.sidewall_cost = self.cost(costs.sidewall_cost, "costs.sidewallCost");
        out.frontwall_cost = self.cost(costs.frontwall_cost, "costs.frontwallCost");
        out.rebuild_cost = self.cost(costs.rebuild_cost, "costs.rebuildCost");

        out.labor_rate = self.cost(costs.labor_rate, "costs.laborRate");
        out.labor_wp_20mm = self.cost(costs.labor_wp_20mm, "costs.laborWP20mm");
        out.labor_wp_25mm = self.cost(costs.labor_wp_25mm, "costs.laborWP25mm");
        out.labor_sidewall = self.cost(costs.labor_sidewall, "costs.laborSidewall");
        out.labor_frontwall = self.cost(costs.labor_frontwall, "costs.laborFrontwall");
        out.labor_rebuild = self.cost(costs.labor_rebuild, "costs.laborRebuild");

        out
    }

    fn relations(&mut self, strategy: &Strategy) {
        if strategy.total_hours <= strategy.operating_hours_per_period {
            let message = t_with_args("validation.total_hours_relation", &[]);
            self.push(
                ViolationKind::Relation,
                "totalHours",
                strategy.total_hours,
                (strategy.operating_hours_per_period, limits::OPERATING_HOURS_MAX),
                message,
            );
        }

        if strategy.initial_floor_thickness <= strategy.floor_min_thickness {
            let message = t_with_args("validation.floor_relation", &[]);
            self.push(
                ViolationKind::Relation,
                "initialFloorThickness",
                strategy.initial_floor_thickness,
                (strategy.floor_min_thickness + 1.0, limits::THICKNESS_MAX),
                message,
            );
        }
    }
}
