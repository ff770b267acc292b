// ==========================================
// 炉体耐磨层 TCO 分析 - 策略领域模型
// ==========================================
// 聚合根: Strategy
// 组成: WearRates + MaintenanceIntervention[] + CostStructure
// ==========================================
// 序列化: 外部 JSON 文档沿用扁平 camelCase 字段
// (stage0Thickness / stage4_20mm / laborWP20mm ...)，
// 内部按层下标存放，经 *Record 中转
// ==========================================

use crate::domain::types::Layer;
use serde::{Deserialize, Serialize};

/// 20mm 板厚（单价/工时二选一的判定值）
pub const PLATE_THICKNESS_20MM: f64 = 20.0;

// ==========================================
// WearRates - 磨损速率 (mm / 1000 运行小时)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WearRates {
    pub floor: f64,
    pub stage0: f64,
    pub stage1: f64,
    pub stage2: f64,
    pub stage3: f64,
    pub stage4: f64,
}

impl WearRates {
    pub fn rate(&self, layer: Layer) -> f64 {
        match layer {
            Layer::Floor => self.floor,
            Layer::Stage0 => self.stage0,
            Layer::Stage1 => self.stage1,
            Layer::Stage2 => self.stage2,
            Layer::Stage3 => self.stage3,
            Layer::Stage4 => self.stage4,
        }
    }

    pub fn rate_mut(&mut self, layer: Layer) -> &mut f64 {
        match layer {
            Layer::Floor => &mut self.floor,
            Layer::Stage0 => &mut self.stage0,
            Layer::Stage1 => &mut self.stage1,
            Layer::Stage2 => &mut self.stage2,
            Layer::Stage3 => &mut self.stage3,
            Layer::Stage4 => &mut self.stage4,
        }
    }
}

// ==========================================
// StageInstall - 单层安装记录
// ==========================================
// thickness = 0 表示本次不更换该层
// min_thickness 为该层允许磨到的下限 (stage0 可为负，磨入下层)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StageInstall {
    pub thickness: f64,
    pub min_thickness: f64,
}

impl StageInstall {
    pub fn new(thickness: f64, min_thickness: f64) -> Self {
        Self {
            thickness,
            min_thickness,
        }
    }

    /// 是否为实际安装（厚度 > 0）
    pub fn is_install(&self) -> bool {
        self.thickness > 0.0
    }
}

// ==========================================
// MaintenanceIntervention - 维护干预事件
// ==========================================
// 红线: 序列按 operating_hours 严格递增（由 Validator 保证）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "InterventionRecord", into = "InterventionRecord")]
pub struct MaintenanceIntervention {
    pub operating_hours: f64,
    pub floor_min_thickness: f64,
    /// 按 stage 编号存放 (stages[0] = stage0)
    pub stages: [StageInstall; 5],
    pub sidewall_replacement: bool,
    pub frontwall_replacement: bool,
    pub rebuild: bool,
}

impl MaintenanceIntervention {
    /// 创建空干预（不更换任何层）
    pub fn at(operating_hours: f64, floor_min_thickness: f64) -> Self {
        Self {
            operating_hours,
            floor_min_thickness,
            ..Default::default()
        }
    }

    pub fn with_install(mut self, layer: Layer, thickness: f64, min_thickness: f64) -> Self {
        if let Some(n) = layer.stage_number() {
            self.stages[n] = StageInstall::new(thickness, min_thickness);
        }
        self
    }

    pub fn with_sidewall(mut self) -> Self {
        self.sidewall_replacement = true;
        self
    }

    pub fn with_frontwall(mut self) -> Self {
        self.frontwall_replacement = true;
        self
    }

    pub fn with_rebuild(mut self) -> Self {
        self.rebuild = true;
        self
    }

    /// 取某耐磨板层的安装记录，炉底返回 None
    pub fn install(&self, layer: Layer) -> Option<&StageInstall> {
        layer.stage_number().map(|n| &self.stages[n])
    }

    pub fn install_mut(&mut self, layer: Layer) -> Option<&mut StageInstall> {
        match layer.stage_number() {
            Some(n) => Some(&mut self.stages[n]),
            None => None,
        }
    }

    /// 本次实际安装的层（厚度 > 0），按 stage0..stage4 顺序
    pub fn installs(&self) -> impl Iterator<Item = (Layer, &StageInstall)> + '_ {
        Layer::STAGES
            .iter()
            .zip(self.stages.iter())
            .filter(|(_, install)| install.is_install())
            .map(|(layer, install)| (*layer, install))
    }

    /// 是否构成一次维护事件（任一层安装或任一整体更换）
    pub fn is_maintenance_event(&self) -> bool {
        self.stages.iter().any(StageInstall::is_install)
            || self.sidewall_replacement
            || self.frontwall_replacement
            || self.rebuild
    }
}

/// 干预记录的外部扁平表示
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InterventionRecord {
    operating_hours: f64,
    floor_min_thickness: f64,
    stage0_thickness: f64,
    stage0_min_thickness: f64,
    stage1_thickness: f64,
    stage1_min_thickness: f64,
    stage2_thickness: f64,
    stage2_min_thickness: f64,
    stage3_thickness: f64,
    stage3_min_thickness: f64,
    stage4_thickness: f64,
    stage4_min_thickness: f64,
    sidewall_replacement: bool,
    frontwall_replacement: bool,
    rebuild: bool,
}

impl From<InterventionRecord> for MaintenanceIntervention {
    fn from(r: InterventionRecord) -> Self {
        Self {
            operating_hours: r.operating_hours,
            floor_min_thickness: r.floor_min_thickness,
            stages: [
                StageInstall::new(r.stage0_thickness, r.stage0_min_thickness),
                StageInstall::new(r.stage1_thickness, r.stage1_min_thickness),
                StageInstall::new(r.stage2_thickness, r.stage2_min_thickness),
                StageInstall::new(r.stage3_thickness, r.stage3_min_thickness),
                StageInstall::new(r.stage4_thickness, r.stage4_min_thickness),
            ],
            sidewall_replacement: r.sidewall_replacement,
            frontwall_replacement: r.frontwall_replacement,
            rebuild: r.rebuild,
        }
    }
}

impl From<MaintenanceIntervention> for InterventionRecord {
    fn from(i: MaintenanceIntervention) -> Self {
        let [s0, s1, s2, s3, s4] = i.stages;
        Self {
            operating_hours: i.operating_hours,
            floor_min_thickness: i.floor_min_thickness,
            stage0_thickness: s0.thickness,
            stage0_min_thickness: s0.min_thickness,
            stage1_thickness: s1.thickness,
            stage1_min_thickness: s1.min_thickness,
            stage2_thickness: s2.thickness,
            stage2_min_thickness: s2.min_thickness,
            stage3_thickness: s3.thickness,
            stage3_min_thickness: s3.min_thickness,
            stage4_thickness: s4.thickness,
            stage4_min_thickness: s4.min_thickness,
            sidewall_replacement: i.sidewall_replacement,
            frontwall_replacement: i.frontwall_replacement,
            rebuild: i.rebuild,
        }
    }
}

// ==========================================
// StagePricing - 单层耐磨板价格与数量
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StagePricing {
    pub price_20mm: f64,
    pub price_25mm: f64,
    /// 每次安装的板数
    pub quantity: f64,
}

impl StagePricing {
    pub fn new(price_20mm: f64, price_25mm: f64, quantity: f64) -> Self {
        Self {
            price_20mm,
            price_25mm,
            quantity,
        }
    }

    /// 单板价格：厚度恰为 20 取 20mm 价，其余一律取 25mm 价
    pub fn unit_cost(&self, thickness: f64) -> f64 {
        if thickness == PLATE_THICKNESS_20MM {
            self.price_20mm
        } else {
            self.price_25mm
        }
    }
}

// ==========================================
// CostStructure - 成本结构
// ==========================================
// 红线: 金额与数量均 >= 0（由 Validator 保证，引擎另做兜底）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "CostRecord", into = "CostRecord")]
pub struct CostStructure {
    /// 按 stage 编号存放 (stages[0] = stage0)
    pub stages: [StagePricing; 5],

    // ===== 整体更换 =====
    pub sidewall_qty: f64,
    pub frontwall_qty: f64,
    pub rebuild_qty: f64,
    pub sidewall_cost: f64,
    pub frontwall_cost: f64,
    pub rebuild_cost: f64,

    // ===== 人工 =====
    pub labor_rate: f64,      // 元/小时
    pub labor_wp_20mm: f64,   // 分钟/块 (20mm)
    pub labor_wp_25mm: f64,   // 分钟/块 (25mm 及其他)
    pub labor_sidewall: f64,  // 小时
    pub labor_frontwall: f64, // 小时
    pub labor_rebuild: f64,   // 小时
}

impl CostStructure {
    pub fn pricing(&self, layer: Layer) -> Option<&StagePricing> {
        layer.stage_number().map(|n| &self.stages[n])
    }

    pub fn pricing_mut(&mut self, layer: Layer) -> Option<&mut StagePricing> {
        match layer.stage_number() {
            Some(n) => Some(&mut self.stages[n]),
            None => None,
        }
    }

    /// 单板安装工时（分钟），与单价使用同一个二选一判定
    pub fn labor_minutes(&self, thickness: f64) -> f64 {
        if thickness == PLATE_THICKNESS_20MM {
            self.labor_wp_20mm
        } else {
            self.labor_wp_25mm
        }
    }
}

/// 成本结构的外部扁平表示
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct CostRecord {
    stage4_20mm: f64,
    stage4_25mm: f64,
    stage3_20mm: f64,
    stage3_25mm: f64,
    stage2_20mm: f64,
    stage2_25mm: f64,
    stage1_20mm: f64,
    stage1_25mm: f64,
    stage0_20mm: f64,
    stage0_25mm: f64,

    #[serde(rename = "stage4Qty")]
    stage4_qty: f64,
    #[serde(rename = "stage3Qty")]
    stage3_qty: f64,
    #[serde(rename = "stage2Qty")]
    stage2_qty: f64,
    #[serde(rename = "stage1Qty")]
    stage1_qty: f64,
    #[serde(rename = "stage0Qty")]
    stage0_qty: f64,
    #[serde(rename = "sidewallQty")]
    sidewall_qty: f64,
    #[serde(rename = "frontwallQty")]
    frontwall_qty: f64,
    #[serde(rename = "rebuildQty")]
    rebuild_qty: f64,

    #[serde(rename = "sidewallCost")]
    sidewall_cost: f64,
    #[serde(rename = "frontwallCost")]
    frontwall_cost: f64,
    #[serde(rename = "rebuildCost")]
    rebuild_cost: f64,

    #[serde(rename = "laborRate")]
    labor_rate: f64,
    #[serde(rename = "laborWP20mm")]
    labor_wp_20mm: f64,
    #[serde(rename = "laborWP25mm")]
    labor_wp_25mm: f64,
    #[serde(rename = "laborSidewall")]
    labor_sidewall: f64,
    #[serde(rename = "laborFrontwall")]
    labor_frontwall: f64,
    #[serde(rename = "laborRebuild")]
    labor_rebuild: f64,
}

impl From<CostRecord> for CostStructure {
    fn from(r: CostRecord) -> Self {
        Self {
            stages: [
                StagePricing::new(r.stage0_20mm, r.stage0_25mm, r.stage0_qty),
                StagePricing::new(r.stage1_20mm, r.stage1_25mm, r.stage1_qty),
                StagePricing::new(r.stage2_20mm, r.stage2_25mm, r.stage2_qty),
                StagePricing::new(r.stage3_20mm, r.stage3_25mm, r.stage3_qty),
                StagePricing::new(r.stage4_20mm, r.stage4_25mm, r.stage4_qty),
            ],
            sidewall_qty: r.sidewall_qty,
            frontwall_qty: r.frontwall_qty,
            rebuild_qty: r.rebuild_qty,
            sidewall_cost: r.sidewall_cost,
            frontwall_cost: r.frontwall_cost,
            rebuild_cost: r.rebuild_cost,
            labor_rate: r.labor_rate,
            labor_wp_20mm: r.labor_wp_20mm,
            labor_wp_25mm: r.labor_wp_25mm,
            labor_sidewall: r.labor_sidewall,
            labor_frontwall: r.labor_frontwall,
            labor_rebuild: r.labor_rebuild,
        }
    }
}

impl From<CostStructure> for CostRecord {
    fn from(c: CostStructure) -> Self {
        let [s0, s1, s2, s3, s4] = c.stages;
        Self {
            stage4_20mm: s4.price_20mm,
            stage4_25mm: s4.price_25mm,
            stage3_20mm: s3.price_20mm,
            stage3_25mm: s3.price_25mm,
            stage2_20mm: s2.price_20mm,
            stage2_25mm: s2.price_25mm,
            stage1_20mm: s1.price_20mm,
            stage1_25mm: s1.price_25mm,
            stage0_20mm: s0.price_20mm,
            stage0_25mm: s0.price_25mm,
            stage4_qty: s4.quantity,
            stage3_qty: s3.quantity,
            stage2_qty: s2.quantity,
            stage1_qty: s1.quantity,
            stage0_qty: s0.quantity,
            sidewall_qty: c.sidewall_qty,
            frontwall_qty: c.frontwall_qty,
            rebuild_qty: c.rebuild_qty,
            sidewall_cost: c.sidewall_cost,
            frontwall_cost: c.frontwall_cost,
            rebuild_cost: c.rebuild_cost,
            labor_rate: c.labor_rate,
            labor_wp_20mm: c.labor_wp_20mm,
            labor_wp_25mm: c.labor_wp_25mm,
            labor_sidewall: c.labor_sidewall,
            labor_frontwall: c.labor_frontwall,
            labor_rebuild: c.labor_rebuild,
        }
    }
}

// ==========================================
// Strategy - 维护策略（聚合根）
// ==========================================
// 生命周期: 由调用方创建/整体替换，引擎只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    // ===== 标识 =====
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,

    // ===== 时间参数 =====
    pub operating_hours_per_period: f64,
    pub total_hours: f64, // 仿真终点

    // ===== 初始炉底 =====
    pub initial_floor_thickness: f64,
    pub floor_min_thickness: f64,

    // ===== 维护计划 / 磨损 / 成本 =====
    #[serde(default)]
    pub interventions: Vec<MaintenanceIntervention>,
    pub wear_rates: WearRates,
    pub costs: CostStructure,
}

impl Strategy {
    /// 维护事件数（排除空干预）
    pub fn maintenance_event_count(&self) -> usize {
        self.interventions
            .iter()
            .filter(|i| i.is_maintenance_event())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_intervention_flat_json_fields() {
        let value = json!({
            "operatingHours": 24000,
            "floorMinThickness": 14,
            "stage0Thickness": 25,
            "stage0MinThickness": -2,
            "stage3Thickness": 20,
            "stage3MinThickness": 1,
            "sidewallReplacement": true
        });

        let intervention: MaintenanceIntervention = serde_json::from_value(value).unwrap();
        assert_eq!(intervention.operating_hours, 24000.0);
        assert_eq!(intervention.stages[0], StageInstall::new(25.0, -2.0));
        assert_eq!(intervention.install(Layer::Stage3), Some(&StageInstall::new(20.0, 1.0)));
        assert_eq!(intervention.install(Layer::Stage4), Some(&StageInstall::default()));
        assert!(intervention.sidewall_replacement);
        assert!(!intervention.rebuild);

        let back = serde_json::to_value(&intervention).unwrap();
        assert_eq!(back["stage0MinThickness"], json!(-2.0));
        assert_eq!(back["stage4Thickness"], json!(0.0));
    }

    #[test]
    fn test_cost_structure_flat_json_fields() {
        let value = json!({
            "stage4_20mm": 1140, "stage4_25mm": 1320,
            "stage0_20mm": 380, "stage0_25mm": 440,
            "stage4Qty": 60, "stage0Qty": 20,
            "sidewallQty": 2, "sidewallCost": 36000,
            "laborRate": 120, "laborWP20mm": 5, "laborWP25mm": 8,
            "laborSidewall": 520
        });

        let costs: CostStructure = serde_json::from_value(value).unwrap();
        let stage4 = costs.pricing(Layer::Stage4).unwrap();
        assert_eq!(stage4.price_20mm, 1140.0);
        assert_eq!(stage4.quantity, 60.0);
        assert_eq!(costs.pricing(Layer::Stage0).unwrap().price_25mm, 440.0);
        assert!(costs.pricing(Layer::Floor).is_none());
        assert_eq!(costs.labor_wp_20mm, 5.0);

        let back = serde_json::to_value(&costs).unwrap();
        assert_eq!(back["laborWP25mm"], json!(8.0));
        assert_eq!(back["stage4_25mm"], json!(1320.0));
    }

    #[test]
    fn test_binary_thickness_selector() {
        let pricing = StagePricing::new(570.0, 660.0, 30.0);
        assert_eq!(pricing.unit_cost(20.0), 570.0);
        assert_eq!(pricing.unit_cost(25.0), 660.0);
        assert_eq!(pricing.unit_cost(22.5), 660.0);

        let costs = CostStructure {
            labor_wp_20mm: 5.0,
            labor_wp_25mm: 8.0,
            ..Default::default()
        };
        assert_eq!(costs.labor_minutes(20.0), 5.0);
        assert_eq!(costs.labor_minutes(30.0), 8.0);
    }

    #[test]
    fn test_maintenance_event_detection() {
        assert!(!MaintenanceIntervention::at(1000.0, 14.0).is_maintenance_event());
        assert!(MaintenanceIntervention::at(1000.0, 14.0)
            .with_install(Layer::Stage2, 25.0, 0.0)
            .is_maintenance_event());
        assert!(MaintenanceIntervention::at(1000.0, 14.0)
            .with_frontwall()
            .is_maintenance_event());

        let installs: Vec<Layer> = MaintenanceIntervention::at(0.0, 14.0)
            .with_install(Layer::Stage4, 20.0, 0.0)
            .with_install(Layer::Stage1, 25.0, 2.0)
            .installs()
            .map(|(layer, _)| layer)
            .collect();
        assert_eq!(installs, vec![Layer::Stage1, Layer::Stage4]);
    }
}
