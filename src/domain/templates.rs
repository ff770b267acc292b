// ==========================================
// 炉体耐磨层 TCO 分析 - 内置策略模板
// ==========================================
// scenario1: 初装不带 stage0 耐磨板
// scenario2: 初装 25mm stage0 耐磨板（允许磨入炉底 2mm）
// template:  工作簿模板中的示例策略
// ==========================================

use crate::domain::strategy::{
    CostStructure, MaintenanceIntervention, StagePricing, Strategy, WearRates,
};
use crate::domain::types::Layer;

/// 两个内置场景共用的成本结构
pub fn reference_cost_structure() -> CostStructure {
    CostStructure {
        stages: [
            StagePricing::new(380.0, 440.0, 20.0),
            StagePricing::new(570.0, 660.0, 30.0),
            StagePricing::new(760.0, 880.0, 40.0),
            StagePricing::new(950.0, 1100.0, 50.0),
            StagePricing::new(1140.0, 1320.0, 60.0),
        ],
        sidewall_qty: 2.0,
        frontwall_qty: 1.0,
        rebuild_qty: 0.0,
        sidewall_cost: 36000.0,
        frontwall_cost: 20000.0,
        rebuild_cost: 0.0,
        labor_rate: 120.0,
        labor_wp_20mm: 5.0,
        labor_wp_25mm: 8.0,
        labor_sidewall: 520.0,
        labor_frontwall: 640.0,
        labor_rebuild: 1200.0,
    }
}

/// 工作簿导入缺省值使用的成本结构
pub fn import_default_cost_structure() -> CostStructure {
    CostStructure {
        stages: [
            StagePricing::new(5.0, 8.0, 20.0),
            StagePricing::new(5.0, 8.0, 30.0),
            StagePricing::new(5.0, 8.0, 40.0),
            StagePricing::new(5.0, 8.0, 50.0),
            StagePricing::new(5.0, 8.0, 60.0),
        ],
        sidewall_qty: 2.0,
        frontwall_qty: 1.0,
        rebuild_qty: 0.0,
        sidewall_cost: 36000.0,
        frontwall_cost: 20000.0,
        rebuild_cost: 0.0,
        labor_rate: 120.0,
        labor_wp_20mm: 7.0,
        labor_wp_25mm: 7.0,
        labor_sidewall: 520.0,
        labor_frontwall: 640.0,
        labor_rebuild: 1200.0,
    }
}

/// 工作簿导入缺省磨损速率
pub fn import_default_wear_rates() -> WearRates {
    WearRates {
        floor: 0.45,
        stage0: 0.45,
        stage1: 0.38,
        stage2: 0.26,
        stage3: 0.18,
        stage4: 0.12,
    }
}

fn empty_checkpoints(hours: &[f64]) -> impl Iterator<Item = MaintenanceIntervention> + '_ {
    hours.iter().map(|h| MaintenanceIntervention::at(*h, 14.0))
}

/// 场景 1：不带 stage0 耐磨板
pub fn scenario1() -> Strategy {
    let mut interventions = vec![
        MaintenanceIntervention::at(0.0, 14.0).with_install(Layer::Stage1, 25.0, 2.0),
        MaintenanceIntervention::at(24000.0, 14.0).with_install(Layer::Stage2, 25.0, 0.0),
        MaintenanceIntervention::at(36000.0, 14.0).with_install(Layer::Stage3, 25.0, 0.0),
        MaintenanceIntervention::at(60000.0, 14.0).with_sidewall(),
        MaintenanceIntervention::at(78000.0, 14.0).with_install(Layer::Stage4, 25.0, 0.0),
    ];
    interventions.extend(empty_checkpoints(&[90000.0, 96000.0, 102000.0, 108000.0, 114000.0]));

    Strategy {
        id: "scenario1".to_string(),
        name: "Scenario 1 - No Stage 0 WP (Initial Install)".to_string(),
        operating_hours_per_period: 6000.0,
        total_hours: 110000.0,
        initial_floor_thickness: 25.0,
        floor_min_thickness: 14.0,
        interventions,
        wear_rates: WearRates {
            floor: 0.45,
            stage0: 0.0,
            stage1: 0.36,
            stage2: 0.36,
            stage3: 0.18,
            stage4: 0.12,
        },
        costs: reference_cost_structure(),
    }
}

/// 场景 2：初装 25mm stage0 耐磨板
pub fn scenario2() -> Strategy {
    let mut interventions = vec![
        MaintenanceIntervention::at(0.0, 14.0).with_install(Layer::Stage0, 25.0, -2.0),
        MaintenanceIntervention::at(24000.0, 14.0)
            .with_install(Layer::Stage0, 25.0, 2.0)
            .with_install(Layer::Stage1, 25.0, 2.0),
        MaintenanceIntervention::at(36000.0, 14.0).with_install(Layer::Stage2, 20.0, 0.0),
        MaintenanceIntervention::at(60000.0, 14.0)
            .with_install(Layer::Stage3, 25.0, 0.0)
            .with_sidewall(),
        MaintenanceIntervention::at(78000.0, 14.0),
        MaintenanceIntervention::at(84000.0, 14.0).with_install(Layer::Stage4, 20.0, 0.0),
    ];
    interventions.extend(empty_checkpoints(&[90000.0, 96000.0, 102000.0, 108000.0]));

    Strategy {
        id: "scenario2".to_string(),
        name: "Scenario 2 - 25 mm Wear Plate installed in Stage 0 (Initial Install)".to_string(),
        operating_hours_per_period: 6000.0,
        total_hours: 110000.0,
        initial_floor_thickness: 25.0,
        floor_min_thickness: 14.0,
        interventions,
        wear_rates: WearRates {
            floor: 0.45,
            stage0: 0.45,
            stage1: 0.36,
            stage2: 0.36,
            stage3: 0.18,
            stage4: 0.12,
        },
        costs: reference_cost_structure(),
    }
}

/// 内置策略（对比视图/自检使用）
pub fn default_strategies() -> Vec<Strategy> {
    vec![scenario1(), scenario2()]
}

/// 工作簿模板示例策略
pub fn template_strategy() -> Strategy {
    Strategy {
        id: "template".to_string(),
        name: "My TCO Strategy".to_string(),
        operating_hours_per_period: 6000.0,
        total_hours: 110000.0,
        initial_floor_thickness: 25.0,
        floor_min_thickness: 14.0,
        interventions: vec![
            MaintenanceIntervention::at(0.0, 14.0).with_install(Layer::Stage1, 25.0, 2.0),
            MaintenanceIntervention::at(24000.0, 14.0).with_install(Layer::Stage2, 25.0, 0.0),
            MaintenanceIntervention::at(36000.0, 14.0).with_install(Layer::Stage3, 25.0, 0.0),
        ],
        wear_rates: import_default_wear_rates(),
        costs: import_default_cost_structure(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scenarios_shape() {
        let s1 = scenario1();
        assert_eq!(s1.interventions.len(), 10);
        assert_eq!(s1.maintenance_event_count(), 5);
        assert_eq!(s1.wear_rates.stage0, 0.0);

        let s2 = scenario2();
        assert_eq!(s2.interventions.len(), 10);
        assert_eq!(s2.interventions[0].stages[0].min_thickness, -2.0);
        assert_eq!(s2.maintenance_event_count(), 5);
    }

    #[test]
    fn test_builtin_interventions_ascending() {
        for strategy in default_strategies() {
            for pair in strategy.interventions.windows(2) {
                assert!(pair[0].operating_hours < pair[1].operating_hours);
            }
        }
    }
}
