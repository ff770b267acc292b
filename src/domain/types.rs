// ==========================================
// 炉体耐磨层 TCO 分析 - 领域类型定义
// ==========================================
// 层级: floor (炉底) + stage0..stage4 (耐磨板层)
// 磨损优先级: stage4 > stage3 > stage2 > stage1 > stage0 > floor
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 磨损层 (Layer)
// ==========================================
// 红线: 按固定枚举寻址，不按字段名字符串寻址
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Layer {
    Floor,
    Stage0,
    Stage1,
    Stage2,
    Stage3,
    Stage4,
}

impl Layer {
    /// 全部层（含炉底），按存储下标排列
    pub const ALL: [Layer; 6] = [
        Layer::Floor,
        Layer::Stage0,
        Layer::Stage1,
        Layer::Stage2,
        Layer::Stage3,
        Layer::Stage4,
    ];

    /// 耐磨板层，按存储下标排列 (stage0..stage4)
    pub const STAGES: [Layer; 5] = [
        Layer::Stage0,
        Layer::Stage1,
        Layer::Stage2,
        Layer::Stage3,
        Layer::Stage4,
    ];

    /// 磨损优先级：最上层先磨
    pub const WEAR_PRECEDENCE: [Layer; 5] = [
        Layer::Stage4,
        Layer::Stage3,
        Layer::Stage2,
        Layer::Stage1,
        Layer::Stage0,
    ];

    /// 在 [Layer::ALL] 中的下标
    pub fn index(self) -> usize {
        match self {
            Layer::Floor => 0,
            Layer::Stage0 => 1,
            Layer::Stage1 => 2,
            Layer::Stage2 => 3,
            Layer::Stage3 => 4,
            Layer::Stage4 => 5,
        }
    }

    /// 耐磨板层编号 (0..=4)，炉底返回 None
    pub fn stage_number(self) -> Option<usize> {
        match self {
            Layer::Floor => None,
            other => Some(other.index() - 1),
        }
    }

    /// 由耐磨板层编号构造
    pub fn from_stage_number(n: usize) -> Option<Layer> {
        Layer::STAGES.get(n).copied()
    }

    pub fn is_floor(self) -> bool {
        self == Layer::Floor
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Floor => "floor",
            Layer::Stage0 => "stage0",
            Layer::Stage1 => "stage1",
            Layer::Stage2 => "stage2",
            Layer::Stage3 => "stage3",
            Layer::Stage4 => "stage4",
        }
    }

    /// 工作簿中使用的显示名称
    pub fn label(&self) -> &'static str {
        match self {
            Layer::Floor => "Floor",
            Layer::Stage0 => "Stage 0",
            Layer::Stage1 => "Stage 1",
            Layer::Stage2 => "Stage 2",
            Layer::Stage3 => "Stage 3",
            Layer::Stage4 => "Stage 4",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 磨损强度分级 (Wear Severity)
// ==========================================
// 顺序: Inactive < Low < Moderate < High < Severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WearSeverity {
    Inactive, // 速率为 0，层不参与磨损
    Low,      // <= 0.12
    Moderate, // <= 0.18
    High,     // <= 0.36
    Severe,   // > 0.36
}

impl WearSeverity {
    /// 按磨损速率 (mm/1000h) 分级
    pub fn classify(rate: f64) -> Self {
        if rate == 0.0 {
            WearSeverity::Inactive
        } else if rate <= 0.12 {
            WearSeverity::Low
        } else if rate <= 0.18 {
            WearSeverity::Moderate
        } else if rate <= 0.36 {
            WearSeverity::High
        } else {
            WearSeverity::Severe
        }
    }
}

impl fmt::Display for WearSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WearSeverity::Inactive => write!(f, "INACTIVE"),
            WearSeverity::Low => write!(f, "LOW"),
            WearSeverity::Moderate => write!(f, "MODERATE"),
            WearSeverity::High => write!(f, "HIGH"),
            WearSeverity::Severe => write!(f, "SEVERE"),
        }
    }
}
