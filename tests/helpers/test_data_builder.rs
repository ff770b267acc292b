// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use furnace_tco::domain::strategy::{CostStructure, MaintenanceIntervention, Strategy, WearRates};
use furnace_tco::domain::templates::reference_cost_structure;
use furnace_tco::domain::types::Layer;

// ==========================================
// Strategy 构建器
// ==========================================

pub struct StrategyBuilder {
    id: String,
    name: String,
    operating_hours_per_period: f64,
    total_hours: f64,
    initial_floor_thickness: f64,
    floor_min_thickness: f64,
    interventions: Vec<MaintenanceIntervention>,
    wear_rates: WearRates,
    costs: CostStructure,
}

impl StrategyBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("Strategy {}", id),
            operating_hours_per_period: 6000.0,
            total_hours: 110000.0,
            initial_floor_thickness: 25.0,
            floor_min_thickness: 14.0,
            interventions: Vec::new(),
            wear_rates: standard_rates(),
            costs: reference_cost_structure(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn total_hours(mut self, hours: f64) -> Self {
        self.total_hours = hours;
        self
    }

    pub fn operating_hours_per_period(mut self, hours: f64) -> Self {
        self.operating_hours_per_period = hours;
        self
    }

    pub fn floor(mut self, initial: f64, minimum: f64) -> Self {
        self.initial_floor_thickness = initial;
        self.floor_min_thickness = minimum;
        self
    }

    pub fn rate(mut self, layer: Layer, rate: f64) -> Self {
        *self.wear_rates.rate_mut(layer) = rate;
        self
    }

    pub fn costs(mut self, costs: CostStructure) -> Self {
        self.costs = costs;
        self
    }

    /// 空检查点（不更换任何层）
    pub fn checkpoint(mut self, hours: f64) -> Self {
        self.interventions.push(MaintenanceIntervention::at(hours, 14.0));
        self
    }

    /// 在指定小时安装单层
    pub fn install(mut self, hours: f64, layer: Layer, thickness: f64, min_thickness: f64) -> Self {
        self.interventions.push(
            MaintenanceIntervention::at(hours, 14.0).with_install(layer, thickness, min_thickness),
        );
        self
    }

    pub fn intervention(mut self, intervention: MaintenanceIntervention) -> Self {
        self.interventions.push(intervention);
        self
    }

    pub fn build(self) -> Strategy {
        Strategy {
            id: self.id,
            name: self.name,
            operating_hours_per_period: self.operating_hours_per_period,
            total_hours: self.total_hours,
            initial_floor_thickness: self.initial_floor_thickness,
            floor_min_thickness: self.floor_min_thickness,
            interventions: self.interventions,
            wear_rates: self.wear_rates,
            costs: self.costs,
        }
    }
}

/// 常用磨损速率
pub fn standard_rates() -> WearRates {
    WearRates {
        floor: 0.45,
        stage0: 0.45,
        stage1: 0.36,
        stage2: 0.26,
        stage3: 0.18,
        stage4: 0.12,
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
