// ==========================================
// 炉体耐磨层 TCO 分析 - 磨损仿真引擎
// ==========================================
// 输入: Strategy（应先经 StrategyValidator 规范化）
// 输出: WearAccumulation[]（每个仿真步一个样本）
// ==========================================
// 规则:
// 1. 干预按给定顺序处理；厚度 > 0 的层被更换并标记为已安装
// 2. 两次干预之间按 1000h 步长推进
// 3. 每步只有一层磨损：stage4 > stage3 > stage2 > stage1 > stage0 > floor
// 4. 磨到最小厚度即耗尽（炉底无耗尽态，只夹取）
// ==========================================
// 红线: 纯函数，每次调用从头计算
// ==========================================

use crate::domain::accumulation::WearAccumulation;
use crate::domain::strategy::{MaintenanceIntervention, Strategy, WearRates};
use crate::domain::types::Layer;

/// 仿真步长（运行小时）
pub const WEAR_STEP_HOURS: f64 = 1000.0;

/// 磨损速率的小时基数 (mm / 1000h)
const RATE_BASIS_HOURS: f64 = 1000.0;

// ==========================================
// LayerState - 单层运行态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
struct LayerState {
    current: f64,
    minimum: f64,
    installed: bool,
}

impl LayerState {
    fn empty() -> Self {
        Self {
            current: 0.0,
            minimum: 0.0,
            installed: false,
        }
    }

    /// 是否还能继续磨损
    fn has_margin(&self) -> bool {
        self.current > self.minimum
    }
}

// ==========================================
// WearState - 六层运行态（按 Layer::index 存放）
// ==========================================
#[derive(Debug, Clone)]
struct WearState {
    layers: [LayerState; 6],
}

impl WearState {
    fn new(strategy: &Strategy) -> Self {
        let mut layers = [LayerState::empty(); 6];
        layers[Layer::Floor.index()] = LayerState {
            current: strategy.initial_floor_thickness,
            minimum: strategy.floor_min_thickness,
            installed: true,
        };
        Self { layers }
    }

    fn get(&self, layer: Layer) -> &LayerState {
        &self.layers[layer.index()]
    }

    fn get_mut(&mut self, layer: Layer) -> &mut LayerState {
        &mut self.layers[layer.index()]
    }

    /// 应用一次干预：更换层 + 刷新各层最小厚度
    fn apply(&mut self, intervention: &MaintenanceIntervention) {
        for (layer, install) in intervention.installs() {
            let state = self.get_mut(layer);
            state.current = install.thickness;
            state.minimum = install.min_thickness;
            state.installed = true;
        }
        self.get_mut(Layer::Floor).minimum = intervention.floor_min_thickness;
    }

    /// 本步磨损的层：最上层已安装且有余量者；都不满足时为炉底
    fn wearing_layer(&self) -> Layer {
        Layer::WEAR_PRECEDENCE
            .iter()
            .copied()
            .find(|layer| {
                let state = self.get(*layer);
                state.installed && state.has_margin()
            })
            .unwrap_or(Layer::Floor)
    }

    /// 推进一步
    fn step(&mut self, rates: &WearRates, step_hours: f64) {
        let layer = self.wearing_layer();
        let depletion = rates.rate(layer).max(0.0) * (step_hours / RATE_BASIS_HOURS);
        let state = self.get_mut(layer);

        if layer.is_floor() {
            // 炉底: 只夹取到最小厚度，且不会因最小厚度上调而变厚
            if state.has_margin() {
                state.current = (state.current - depletion).max(state.minimum);
            }
            return;
        }

        let next = state.current - depletion;
        if next <= state.minimum {
            state.current = state.minimum;
            state.installed = false;
        } else {
            state.current = next;
        }
    }

    /// 输出样本（展示口径：厚度下限取 0）
    fn sample(&self, hours: f64) -> WearAccumulation {
        let mut t = [0.0; 6];
        for (slot, state) in t.iter_mut().zip(self.layers.iter()) {
            *slot = state.current.max(0.0);
        }
        WearAccumulation::from_thicknesses(hours, t)
    }

    /// 从 start 推进到 end，每步追加一个样本
    fn advance(&mut self, rates: &WearRates, start: f64, end: f64, out: &mut Vec<WearAccumulation>) {
        let mut hours = start;
        while hours < end {
            let step_hours = (end - hours).min(WEAR_STEP_HOURS);
            self.step(rates, step_hours);
            hours += step_hours;
            out.push(self.sample(hours));
        }
    }
}

// ==========================================
// WearEngine - 磨损仿真引擎
// ==========================================
pub struct WearEngine {
    // 无状态引擎
}

impl Default for WearEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WearEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 仿真整个生命周期的磨损
    ///
    /// # 参数
    /// - `strategy`: 已校验策略（干预序列须严格递增，否则区间无定义）
    ///
    /// # 返回
    /// 按时间顺序的磨损样本
    pub fn simulate(&self, strategy: &Strategy) -> Vec<WearAccumulation> {
        let mut state = WearState::new(strategy);
        let mut samples = Vec::new();
        let rates = &strategy.wear_rates;

        // 首次干预之前的裸炉底区间
        let first_hours = strategy
            .interventions
            .first()
            .map(|i| i.operating_hours)
            .unwrap_or(strategy.total_hours);
        if first_hours > 0.0 {
            state.advance(rates, 0.0, first_hours, &mut samples);
        }

        for (i, intervention) in strategy.interventions.iter().enumerate() {
            state.apply(intervention);

            let end_hours = strategy
                .interventions
                .get(i + 1)
                .map(|next| next.operating_hours)
                .unwrap_or(strategy.total_hours);

            state.advance(rates, intervention.operating_hours, end_hours, &mut samples);
        }

        tracing::debug!(
            strategy_id = %strategy.id,
            samples = samples.len(),
            "磨损仿真完成"
        );

        samples
    }
}
