// ==========================================
// 配置管理 集成测试
// ==========================================
// 测试目标: 配置文件 + 环境变量覆写 + 保存
// 覆盖范围:
// 1. 部分字段的配置文件按默认值补全
// 2. 环境变量优先于文件
// 3. 非法值被拒绝
// ==========================================

use furnace_tco::config::{env_keys, ConfigError, ConfigManager, EngineConfig};
use furnace_tco::engine::{SelfTestEngine, DEFAULT_CACHE_CAPACITY};
use std::path::PathBuf;
use tempfile::TempDir;

fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}

#[test]
fn test_partial_file_filled_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "locale": "zh-CN", "cost_tolerance": 0.05 }"#).unwrap();

    let manager = ConfigManager::load_with_env(&path, env_of(&[])).unwrap();
    let config = manager.config();
    assert_eq!(config.locale, "zh-CN");
    assert_eq!(config.cost_tolerance, 0.05);
    assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
    assert_eq!(config.export_dir, None);
    assert_eq!(manager.path(), path.as_path());
}

#[test]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "cache_capacity": 10, "locale": "zh-CN" }"#).unwrap();

    let env = env_of(&[
        (env_keys::CACHE_CAPACITY, " 3 "),
        (env_keys::LOCALE, "en"),
    ]);
    let config = ConfigManager::load_with_env(&path, env).unwrap().into_config();
    assert_eq!(config.cache_capacity, 3);
    assert_eq!(config.locale, "en");
}

#[test]
fn test_invalid_values_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let bad_env = env_of(&[(env_keys::CACHE_CAPACITY, "many")]);
    assert!(matches!(
        ConfigManager::load_with_env(&path, bad_env),
        Err(ConfigError::InvalidValue { .. })
    ));

    std::fs::write(&path, r#"{ "cache_capacity": 0 }"#).unwrap();
    assert!(matches!(
        ConfigManager::load_with_env(&path, env_of(&[])),
        Err(ConfigError::InvalidValue { .. })
    ));

    std::fs::write(&path, r#"{ "wear_rate_tolerance": -0.1 }"#).unwrap();
    assert!(matches!(
        ConfigManager::load_with_env(&path, env_of(&[])),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("absent.json");
    let target = dir.path().join("saved").join("config.json");

    let mut manager = ConfigManager::load_with_env(&source, env_of(&[])).unwrap();
    manager.config_mut().cache_capacity = 7;
    manager.config_mut().export_dir = Some(PathBuf::from("/tmp/tco-out"));
    manager.save(&target).unwrap();

    let reloaded = ConfigManager::load_with_env(&target, env_of(&[])).unwrap();
    assert_eq!(reloaded.config(), manager.config());
}

#[test]
fn test_tolerances_flow_into_self_test() {
    let config = EngineConfig {
        cost_tolerance: 0.2,
        wear_rate_tolerance: 0.01,
        thickness_tolerance_mm: 0.5,
        ..EngineConfig::default()
    };
    let tolerances = SelfTestEngine::from_config(&config).tolerances();
    assert_eq!(tolerances.cost_relative, 0.2);
    assert_eq!(tolerances.wear_rate_absolute, 0.01);
    assert_eq!(tolerances.thickness_mm, 0.5);
}
