// ==========================================
// 炉体耐磨层 TCO 分析 - 引擎层
// ==========================================
// 职责: 校验 / 磨损仿真 / 成本累计 / 缓存 / 对比 / 自检
// 红线: 引擎不读写文件，每次调用从策略值重新计算
// ==========================================
// 数据流: Strategy → StrategyValidator → (WearEngine, CostEngine) → 序列
// ==========================================

pub mod cached;
pub mod comparison;
pub mod cost;
pub mod validator;
pub mod wear;

// 重导出核心引擎
pub use cached::{
    strategy_fingerprint, BoundedCache, CacheStats, CachedCalculationEngine, CalculationOutcome,
    DEFAULT_CACHE_CAPACITY,
};
pub use comparison::{CostPerHourRow, StrategyComparator, StrategySummary};
pub use cost::{CostEngine, InterventionCost};
pub use self_test::{
    builtin_reference_figures, render_markdown, AssertionResult, QuickValidation,
    ReferenceFigures, SelfTestEngine, SelfTestTolerances, TestSuite,
};
pub use validator::{
    StrategyValidator, ValidationOutcome, ValidationSummary, ValidationViolation, ViolationKind,
};
pub use wear::{WearEngine, WEAR_STEP_HOURS};
