// ==========================================
// 炉体耐磨层 TCO 分析 - 引擎输出序列
// ==========================================
// WearAccumulation: 磨损仿真每步一个样本
// CostAccumulation: 成本事件 + 首尾边界点
// ==========================================
// 红线: 样本只追加不修改
// ==========================================

use crate::domain::types::Layer;
use serde::{Deserialize, Serialize};

// ==========================================
// WearAccumulation - 磨损样本
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WearAccumulation {
    pub hours: f64,
    pub floor: f64,
    pub stage0: f64,
    pub stage1: f64,
    pub stage2: f64,
    pub stage3: f64,
    pub stage4: f64,
}

impl WearAccumulation {
    /// 按 [Layer::ALL] 顺序的厚度构造样本
    pub fn from_thicknesses(hours: f64, t: [f64; 6]) -> Self {
        Self {
            hours,
            floor: t[0],
            stage0: t[1],
            stage1: t[2],
            stage2: t[3],
            stage3: t[4],
            stage4: t[5],
        }
    }

    pub fn thickness(&self, layer: Layer) -> f64 {
        match layer {
            Layer::Floor => self.floor,
            Layer::Stage0 => self.stage0,
            Layer::Stage1 => self.stage1,
            Layer::Stage2 => self.stage2,
            Layer::Stage3 => self.stage3,
            Layer::Stage4 => self.stage4,
        }
    }
}

// ==========================================
// CostAccumulation - 成本样本
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAccumulation {
    pub hours: f64,
    pub period_cost: f64,     // 本点发生的成本
    pub cumulative_cost: f64, // 累计成本
    pub cost_per_hour: f64,   // cumulative_cost / hours，hours = 0 时为 0
}

impl CostAccumulation {
    /// 序列起点 (0h, 全 0)
    pub fn origin() -> Self {
        Self {
            hours: 0.0,
            period_cost: 0.0,
            cumulative_cost: 0.0,
            cost_per_hour: 0.0,
        }
    }

    pub fn new(hours: f64, period_cost: f64, cumulative_cost: f64) -> Self {
        let cost_per_hour = if hours > 0.0 {
            cumulative_cost / hours
        } else {
            0.0
        };
        Self {
            hours,
            period_cost,
            cumulative_cost,
            cost_per_hour,
        }
    }
}
