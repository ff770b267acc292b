// ==========================================
// 炉体耐磨层 TCO 分析 - 策略对比
// ==========================================
// 职责: 汇总多个策略的成本/磨损结果，以第一个策略为基准计算节省额
// 输入: 已校验策略列表
// 输出: StrategySummary[] / 每小时成本对齐矩阵
// ==========================================

use crate::domain::accumulation::{CostAccumulation, WearAccumulation};
use crate::domain::strategy::Strategy;
use crate::engine::cost::CostEngine;
use crate::engine::wear::WearEngine;
use serde::Serialize;

// ==========================================
// StrategySummary - 单策略汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    pub strategy_id: String,
    pub strategy_name: String,
    pub total_cost: f64,
    pub cost_per_hour: f64,
    pub maintenance_events: usize,
    pub final_floor_thickness: f64,
    /// 相对基准策略的节省额（正数 = 更省）
    pub savings: f64,
    /// 节省百分比；基准成本为 0 时为 0
    pub savings_pct: f64,
}

/// 每小时成本矩阵的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostPerHourRow {
    pub hours: f64,
    /// 按策略顺序；该策略序列较短时为 None
    pub values: Vec<Option<f64>>,
}

// ==========================================
// StrategyComparator
// ==========================================
pub struct StrategyComparator {
    wear_engine: WearEngine,
    cost_engine: CostEngine,
}

impl Default for StrategyComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyComparator {
    pub fn new() -> Self {
        Self {
            wear_engine: WearEngine::new(),
            cost_engine: CostEngine::new(),
        }
    }

    /// 由已计算的序列生成汇总（不含节省额）
    pub fn summarize(
        &self,
        strategy: &Strategy,
        wear: &[WearAccumulation],
        cost: &[CostAccumulation],
    ) -> StrategySummary {
        let (total_cost, cost_per_hour) = cost
            .last()
            .map(|c| (c.cumulative_cost, c.cost_per_hour))
            .unwrap_or((0.0, 0.0));
        let final_floor_thickness = wear
            .last()
            .map(|w| w.floor)
            .unwrap_or(strategy.initial_floor_thickness);

        StrategySummary {
            strategy_id: strategy.id.clone(),
            strategy_name: strategy.name.clone(),
            total_cost,
            cost_per_hour,
            maintenance_events: strategy.maintenance_event_count(),
            final_floor_thickness,
            savings: 0.0,
            savings_pct: 0.0,
        }
    }

    /// 对比多个策略
    ///
    /// # 参数
    /// - `strategies`: 第一个为基准
    ///
    /// # 返回
    /// 与输入等长、同顺序的汇总
    pub fn compare(&self, strategies: &[Strategy]) -> Vec<StrategySummary> {
        let mut summaries: Vec<StrategySummary> = strategies
            .iter()
            .map(|s| {
                let wear = self.wear_engine.simulate(s);
                let cost = self.cost_engine.accumulate(s);
                self.summarize(s, &wear, &cost)
            })
            .collect();

        apply_savings(&mut summaries);

        tracing::info!(strategies = summaries.len(), "策略对比完成");
        summaries
    }

    /// 以第一个策略的时间点为横轴，对齐各策略的每小时成本
    pub fn cost_per_hour_matrix(&self, strategies: &[Strategy]) -> Vec<CostPerHourRow> {
        let series: Vec<Vec<CostAccumulation>> = strategies
            .iter()
            .map(|s| self.cost_engine.accumulate(s))
            .collect();

        let Some(baseline) = series.first() else {
            return Vec::new();
        };

        baseline
            .iter()
            .enumerate()
            .map(|(idx, point)| CostPerHourRow {
                hours: point.hours,
                values: series
                    .iter()
                    .map(|s| s.get(idx).map(|c| c.cost_per_hour))
                    .collect(),
            })
            .collect()
    }
}

/// 以第一个汇总为基准填写节省额
pub fn apply_savings(summaries: &mut [StrategySummary]) {
    let Some(baseline_cost) = summaries.first().map(|s| s.total_cost) else {
        return;
    };
    for summary in summaries.iter_mut() {
        summary.savings = baseline_cost - summary.total_cost;
        summary.savings_pct = if baseline_cost > 0.0 {
            summary.savings / baseline_cost * 100.0
        } else {
            0.0
        };
    }
}
