// ==========================================
// 炉体耐磨层 TCO 分析 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行与集成测试调用
// ==========================================

pub mod error;
pub mod tco_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use tco_api::{SelfTestReport, SeriesFiles, StrategyAnalysis, TcoApi};
