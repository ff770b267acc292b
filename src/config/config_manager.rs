// ==========================================
// 炉体耐磨层 TCO 分析 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、保存
// 存储: JSON 文件（默认位于用户配置目录）
// 优先级: 环境变量 > 配置文件 > 内置默认值
// ==========================================

use crate::config::engine_config::{ConfigError, EngineConfig};
use std::path::{Path, PathBuf};

/// 环境变量键
pub mod env_keys {
    pub const CACHE_CAPACITY: &str = "FURNACE_TCO_CACHE_CAPACITY";
    pub const LOCALE: &str = "FURNACE_TCO_LOCALE";
}

const APP_CONFIG_DIR: &str = "furnace-tco";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    path: PathBuf,
    config: EngineConfig,
}

impl ConfigManager {
    /// 从指定文件加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径（不存在时使用默认值）
    ///
    /// # 返回
    /// - Err(ConfigError): 文件存在但无法解析，或配置值非法
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// 加载配置，环境变量来源可替换
    pub fn load_with_env<F>(path: impl AsRef<Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref().to_path_buf();

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str::<EngineConfig>(&content)?
        } else {
            tracing::debug!(path = %path.display(), "配置文件不存在，使用默认配置");
            EngineConfig::default()
        };

        apply_env_overrides(&mut config, env)?;
        config.validate()?;

        tracing::info!(
            path = %path.display(),
            cache_capacity = config.cache_capacity,
            locale = %config.locale,
            "配置加载完成"
        );

        Ok(Self { path, config })
    }

    /// 从默认位置加载: <用户配置目录>/furnace-tco/config.json
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(default_config_path()?)
    }

    /// 保存到指定路径（格式化 JSON）
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "配置已保存");
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    /// 加载来源路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

fn apply_env_overrides<F>(config: &mut EngineConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = env(env_keys::CACHE_CAPACITY) {
        config.cache_capacity =
            raw.trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: env_keys::CACHE_CAPACITY.to_string(),
                    reason: e.to_string(),
                })?;
    }

    if let Some(raw) = env(env_keys::LOCALE) {
        let locale = raw.trim();
        if !locale.is_empty() {
            config.locale = locale.to_string();
        }
    }

    Ok(())
}
