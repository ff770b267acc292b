// ==========================================
// WearEngine 集成测试
// ==========================================
// 测试目标: 分层磨损仿真的序列性质
// 覆盖范围:
// 1. 炉底厚度单调不增，各层厚度非负
// 2. 每步最多一层变薄，其余层不变厚
// 3. 零速率哨兵与重复调用结果一致
// ==========================================

mod helpers;

use furnace_tco::domain::templates::{scenario1, scenario2};
use furnace_tco::domain::types::Layer;
use furnace_tco::engine::{StrategyValidator, WearEngine, WEAR_STEP_HOURS};
use helpers::test_data_builder::{approx, StrategyBuilder};

// ==========================================
// 序列性质
// ==========================================

#[test]
fn test_floor_never_increases_for_templates() {
    let engine = WearEngine::new();
    for strategy in [scenario1(), scenario2()] {
        let normalized = StrategyValidator::new().validate(&strategy).strategy;
        let samples = engine.simulate(&normalized);
        assert!(!samples.is_empty());

        let mut previous = normalized.initial_floor_thickness;
        for sample in &samples {
            assert!(
                sample.floor <= previous,
                "{} @ {}h: floor {} > {}",
                normalized.id,
                sample.hours,
                sample.floor,
                previous
            );
            previous = sample.floor;
            for layer in Layer::ALL {
                assert!(sample.thickness(layer) >= 0.0);
            }
        }
    }
}

#[test]
fn test_sample_hours_strictly_increase() {
    let samples = WearEngine::new().simulate(&scenario2());
    for pair in samples.windows(2) {
        assert!(pair[1].hours > pair[0].hours);
        assert!(pair[1].hours - pair[0].hours <= WEAR_STEP_HOURS);
    }
}

#[test]
fn test_at_most_one_layer_wears_per_step() {
    let strategy = StrategyBuilder::new("stack")
        .total_hours(45000.0)
        .install(0.0, Layer::Stage1, 25.0, 2.0)
        .build();
    // 同一干预时刻再叠两层
    let mut strategy = strategy;
    strategy.interventions[0] = strategy.interventions[0]
        .clone()
        .with_install(Layer::Stage3, 4.0, 0.0)
        .with_install(Layer::Stage4, 2.0, 0.0);

    let samples = WearEngine::new().simulate(&strategy);
    assert_eq!(samples.len(), 45);

    for pair in samples.windows(2) {
        let thinner = Layer::ALL
            .iter()
            .filter(|l| pair[1].thickness(**l) < pair[0].thickness(**l))
            .count();
        assert!(thinner <= 1, "多层同时磨损 @ {}h", pair[1].hours);
        for layer in Layer::ALL {
            assert!(
                pair[1].thickness(layer) <= pair[0].thickness(layer),
                "{:?} 变厚 @ {}h",
                layer,
                pair[1].hours
            );
        }
    }

    // stage4 先于 stage3 耗尽
    let stage4_gone = samples.iter().position(|s| s.stage4 == 0.0);
    let stage3_gone = samples.iter().position(|s| s.stage3 == 0.0);
    assert!(stage4_gone.is_some());
    assert!(stage3_gone.is_some());
    assert!(stage4_gone < stage3_gone);
}

#[test]
fn test_simulate_is_repeatable() {
    let engine = WearEngine::new();
    let strategy = scenario1();
    assert_eq!(engine.simulate(&strategy), engine.simulate(&strategy));
}

// ==========================================
// 边界场景
// ==========================================

#[test]
fn test_zero_rate_stage_shields_floor() {
    let strategy = StrategyBuilder::new("zero-rate")
        .total_hours(10000.0)
        .rate(Layer::Stage0, 0.0)
        .install(0.0, Layer::Stage0, 25.0, 2.0)
        .build();

    let samples = WearEngine::new().simulate(&strategy);
    assert_eq!(samples.len(), 10);
    for sample in &samples {
        assert_eq!(sample.stage0, 25.0);
        assert_eq!(sample.floor, 25.0);
    }
}

#[test]
fn test_floor_wears_after_plate_depleted() {
    // stage1 3mm → 2mm @0.36: 3 步耗尽，之后炉底 0.45/步
    let strategy = StrategyBuilder::new("thin")
        .total_hours(5000.0)
        .install(0.0, Layer::Stage1, 3.0, 2.0)
        .build();

    let samples = WearEngine::new().simulate(&strategy);
    assert!(approx(samples[1].stage1, 3.0 - 0.72));
    assert_eq!(samples[2].stage1, 2.0);
    assert_eq!(samples[2].floor, 25.0);
    assert!(approx(samples[3].floor, 25.0 - 0.45));
    assert!(approx(samples[4].floor, 25.0 - 0.9));
}

#[test]
fn test_checkpoint_refreshes_floor_minimum() {
    let strategy = StrategyBuilder::new("checkpoint")
        .total_hours(20000.0)
        .floor(25.0, 20.0)
        .checkpoint(0.0)
        .build();
    // 检查点把炉底下限改为 14，炉底可磨穿策略级的 20
    let samples = WearEngine::new().simulate(&strategy);
    let last = samples.last().map(|s| s.floor).unwrap_or_default();
    assert!(approx(last, 25.0 - 0.45 * 20.0));
}
