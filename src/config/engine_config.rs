use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::engine::cached::DEFAULT_CACHE_CAPACITY;

/// 引擎配置（JSON 文件）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 每类结果缓存的容量
    pub cache_capacity: usize,

    /// 界面/报告语言（"en" 或 "zh-CN"）
    pub locale: String,

    /// 自检：成本相对容差
    pub cost_tolerance: f64,

    /// 自检：磨损速率绝对容差
    pub wear_rate_tolerance: f64,

    /// 自检：炉底厚度绝对容差 (mm)
    pub thickness_tolerance_mm: f64,

    /// 命令行默认输出目录
    pub export_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            locale: "en".to_string(),
            cost_tolerance: 0.01,
            wear_rate_tolerance: 0.001,
            thickness_tolerance_mm: 1.0,
            export_dir: None,
        }
    }
}

impl EngineConfig {
    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity < 1 {
            return Err(ConfigError::InvalidValue {
                key: "cache_capacity".to_string(),
                reason: "必须 >= 1".to_string(),
            });
        }

        let tolerances = [
            ("cost_tolerance", self.cost_tolerance),
            ("wear_rate_tolerance", self.wear_rate_tolerance),
            ("thickness_tolerance_mm", self.thickness_tolerance_mm),
        ];
        for (key, value) in tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("必须为有限非负数, 实际 {}", value),
                });
            }
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置文件格式错误: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置项非法: {key} ({reason})")]
    InvalidValue { key: String, reason: String },

    #[error("无法确定用户配置目录")]
    NoConfigDir,
}
