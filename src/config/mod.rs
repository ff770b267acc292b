// ==========================================
// 炉体耐磨层 TCO 分析 - 配置层
// ==========================================
// 职责: 引擎配置加载/保存，支持环境变量覆写
// 存储: JSON 文件
// ==========================================

pub mod config_manager;
pub mod engine_config;

// 重导出核心配置类型
pub use config_manager::{default_config_path, env_keys, ConfigManager};
pub use engine_config::{ConfigError, EngineConfig};
