use mkit_core::{ConfigError, ConfigManager, MkitConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_config_file_round_trips_through_loader() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    ConfigManager::create_default_config(&path).unwrap();
    assert!(path.exists());

    let manager = ConfigManager::load_from(&path).unwrap();
    assert_eq!(manager.config_path(), Some(path.as_path()));
    assert_eq!(manager.into_config(), MkitConfig::default());
}

#[test]
fn test_sections_override_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mkit.toml");
    fs::write(
        &path,
        r#"
[stress]
producers = 4
consumers = 2
per_producer = 250
timeout_ms = 900

[logging]
level = "debug"
format = "compact"
"#,
    )
    .unwrap();

    let config = ConfigManager::load_from(&path).unwrap().into_config();
    assert_eq!(config.stress.producers, 4);
    assert_eq!(config.stress.consumers, 2);
    assert_eq!(config.stress.total(), Some(1_000));
    assert_eq!(config.stress.timeout_ms, 900);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "compact");
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "[stress\nproducers = ").unwrap();

    assert!(matches!(
        ConfigManager::load_from(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn test_invalid_values_fail_validation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("zero.toml");
    fs::write(&path, "[stress]\nconsumers = 0\n").unwrap();

    assert!(matches!(
        ConfigManager::load_from(&path),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn test_missing_file_is_a_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = ConfigManager::load_from(&temp_dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError(_))));
}
