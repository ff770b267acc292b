// ==========================================
// 炉体耐磨层 TCO 分析 - 领域模型层
// ==========================================
// 职责: 定义策略聚合、层级类型、引擎输出序列、内置模板
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod accumulation;
pub mod strategy;
pub mod templates;
pub mod types;

// 重导出核心类型
pub use accumulation::{CostAccumulation, WearAccumulation};
pub use strategy::{
    CostStructure, MaintenanceIntervention, StageInstall, StagePricing, Strategy, WearRates,
    PLATE_THICKNESS_20MM,
};
pub use types::{Layer, WearSeverity};
