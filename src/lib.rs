// ==========================================
// 炉体耐磨层 TCO 分析 - 核心库
// ==========================================
// 职责: 维护策略校验、分层磨损仿真、成本累计、对比与自检
// 技术栈: Rust + serde + calamine/csv
// 系统定位: 决策支持（结果供图表/报告消费）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 策略与序列
pub mod domain;

// 引擎层 - 校验/仿真/累计/自检
pub mod engine;

// 导入导出层 - JSON/工作簿/序列
pub mod importer;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CostAccumulation, CostStructure, Layer, MaintenanceIntervention, StageInstall, StagePricing,
    Strategy, WearAccumulation, WearRates, WearSeverity,
};

// 引擎
pub use engine::{
    CachedCalculationEngine, CostEngine, SelfTestEngine, StrategyComparator, StrategyValidator,
    WearEngine,
};

// API
pub use api::{ApiError, ApiResult, TcoApi};

// 配置
pub use config::{ConfigManager, EngineConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "炉体耐磨层 TCO 分析";
