// ==========================================
// 炉体耐磨层 TCO 分析 - 成本累计引擎
// ==========================================
// 输入: Strategy（应先经 StrategyValidator 规范化）
// 输出: CostAccumulation[]
// ==========================================
// 序列规则:
// - 起点 (0h) 恒定输出
// - 每个成本 > 0 的干预输出一个点；零成本干预不输出
// - 末点 hours < total_hours 时补一个 total_hours 边界点
// ==========================================
// 红线: 所有金额/数量项在计算时按 >= 0 兜底
// ==========================================

use crate::domain::accumulation::CostAccumulation;
use crate::domain::strategy::{CostStructure, MaintenanceIntervention, Strategy};

const MINUTES_PER_HOUR: f64 = 60.0;

fn non_negative(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

// ==========================================
// InterventionCost - 单次干预成本拆分
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InterventionCost {
    pub material: f64, // 耐磨板材料
    pub labor: f64,    // 耐磨板安装人工
    pub fixed: f64,    // 侧墙/前墙/重建（含人工）
}

impl InterventionCost {
    pub fn total(&self) -> f64 {
        self.material + self.labor + self.fixed
    }
}

// ==========================================
// CostEngine - 成本累计引擎
// ==========================================
pub struct CostEngine {
    // 无状态引擎
}

impl Default for CostEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CostEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算单次干预的成本
    pub fn intervention_cost(
        &self,
        intervention: &MaintenanceIntervention,
        costs: &CostStructure,
    ) -> InterventionCost {
        let mut result = InterventionCost::default();
        let labor_rate = non_negative(costs.labor_rate);

        // 1. 耐磨板：数量 × 单价 + 数量 × 工时(分钟)/60 × 人工费率
        for (layer, install) in intervention.installs() {
            let Some(pricing) = costs.pricing(layer) else {
                continue;
            };
            let quantity = non_negative(pricing.quantity);
            let unit_cost = non_negative(pricing.unit_cost(install.thickness));
            let minutes = non_negative(costs.labor_minutes(install.thickness));

            result.material += quantity * unit_cost;
            result.labor += quantity * (minutes / MINUTES_PER_HOUR) * labor_rate;
        }

        // 2. 整体更换（人工按小时计）
        if intervention.sidewall_replacement {
            result.fixed += non_negative(costs.sidewall_qty) * non_negative(costs.sidewall_cost);
            result.fixed += non_negative(costs.labor_sidewall) * labor_rate;
        }
        if intervention.frontwall_replacement {
            result.fixed += non_negative(costs.frontwall_qty) * non_negative(costs.frontwall_cost);
            result.fixed += non_negative(costs.labor_frontwall) * labor_rate;
        }
        if intervention.rebuild {
            result.fixed += non_negative(costs.rebuild_cost);
            result.fixed += non_negative(costs.labor_rebuild) * labor_rate;
        }

        result
    }

    /// 累计整个生命周期的成本
    ///
    /// # 参数
    /// - `strategy`: 已校验策略
    ///
    /// # 返回
    /// 成本序列（起点 + 成本事件 + 可能的终点）
    pub fn accumulate(&self, strategy: &Strategy) -> Vec<CostAccumulation> {
        let mut series = vec![CostAccumulation::origin()];
        let mut cumulative_cost = 0.0;

        for intervention in &strategy.interventions {
            let period_cost = self.intervention_cost(intervention, &strategy.costs).total();
            if period_cost <= 0.0 {
                continue;
            }

            cumulative_cost += period_cost;
            series.push(CostAccumulation::new(
                intervention.operating_hours,
                period_cost,
                cumulative_cost,
            ));
        }

        // 终点边界
        let last_hours = series.last().map(|s| s.hours).unwrap_or(0.0);
        if last_hours < strategy.total_hours {
            series.push(CostAccumulation::new(strategy.total_hours, 0.0, cumulative_cost));
        }

        tracing::debug!(
            strategy_id = %strategy.id,
            points = series.len(),
            total_cost = cumulative_cost,
            "成本累计完成"
        );

        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::templates::{reference_cost_structure, scenario1};
    use crate::domain::types::Layer;

    #[test]
    fn test_plate_cost_20mm_vs_25mm() {
        let engine = CostEngine::new();
        let costs = reference_cost_structure();

        // stage1: 30 块 × 570 + 30 × 5/60 × 120
        let i20 = MaintenanceIntervention::at(0.0, 14.0).with_install(Layer::Stage1, 20.0, 2.0);
        let c20 = engine.intervention_cost(&i20, &costs);
        assert_eq!(c20.material, 17100.0);
        assert!((c20.labor - 300.0).abs() < 1e-9);

        // stage1: 30 块 × 660 + 30 × 8/60 × 120
        let i25 = MaintenanceIntervention::at(0.0, 14.0).with_install(Layer::Stage1, 25.0, 2.0);
        let c25 = engine.intervention_cost(&i25, &costs);
        assert_eq!(c25.material, 19800.0);
        assert!((c25.labor - 480.0).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_replacements() {
        let engine = CostEngine::new();
        let costs = reference_cost_structure();
        let intervention = MaintenanceIntervention::at(60000.0, 14.0)
            .with_sidewall()
            .with_frontwall()
            .with_rebuild();
        let cost = engine.intervention_cost(&intervention, &costs);
        // 侧墙 2×36000 + 520×120; 前墙 1×20000 + 640×120; 重建 0 + 1200×120
        let expected = 72000.0 + 62400.0 + 20000.0 + 76800.0 + 144000.0;
        assert_eq!(cost.fixed, expected);
        assert_eq!(cost.material, 0.0);
    }

    #[test]
    fn test_negative_terms_treated_as_zero() {
        let engine = CostEngine::new();
        let mut costs = reference_cost_structure();
        costs.sidewall_cost = -5000.0;
        costs.labor_rate = -1.0;
        let intervention = MaintenanceIntervention::at(0.0, 14.0).with_sidewall();
        assert_eq!(engine.intervention_cost(&intervention, &costs).total(), 0.0);
    }

    #[test]
    fn test_zero_cost_interventions_skipped() {
        let series = CostEngine::new().accumulate(&scenario1());
        // 起点 + 5 个成本事件 + 110000 终点 (空干预不出点)
        assert_eq!(series.len(), 7);
        assert_eq!(series[0], CostAccumulation::origin());
        assert_eq!(series[5].hours, 78000.0);
        assert_eq!(series[6].hours, 110000.0);
    }

    #[test]
    fn test_no_trailing_point_past_horizon() {
        let mut strategy = scenario1();
        strategy.total_hours = 50000.0;
        let series = CostEngine::new().accumulate(&strategy);
        assert_eq!(series.last().unwrap().hours, 78000.0);
    }

    #[test]
    fn test_trailing_point_added() {
        let mut strategy = scenario1();
        strategy.interventions.truncate(5);
        let series = CostEngine::new().accumulate(&strategy);
        let last = series.last().unwrap();
        assert_eq!(last.hours, 110000.0);
        assert_eq!(last.period_cost, 0.0);
        assert_eq!(last.cumulative_cost, series[series.len() - 2].cumulative_cost);
        assert_eq!(last.cost_per_hour, last.cumulative_cost / 110000.0);
    }
}
