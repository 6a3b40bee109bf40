//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_contains_vlist_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("vlist") && path_str.ends_with("config.toml"),
            "Path should contain 'vlist' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn default_log_path_ends_with_vlist_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("vlist.log"),
        "Default log path should end with 'vlist.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let path = write_temp_config(
        "vlist_test_config_valid.toml",
        r#"
overscan_count = 5
settle_delay_ms = 150
frame_interval_ms = 33
log_file_path = "/tmp/vlist-test.log"
"#,
    );

    let config = load_config_file(&path)
        .expect("valid TOML should parse")
        .expect("file exists");

    assert_eq!(config.overscan_count, Some(5));
    assert_eq!(config.settle_delay_ms, Some(150));
    assert_eq!(config.frame_interval_ms, Some(33));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/vlist-test.log"))
    );

    let _ = fs::remove_file(&path);
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let path = write_temp_config("vlist_test_config_unknown.toml", "overscan = 5\n");

    let result = load_config_file(&path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Unknown key should be a parse error, got {:?}",
        result
    );

    let _ = fs::remove_file(&path);
}

#[test]
fn load_config_file_rejects_invalid_toml() {
    let path = write_temp_config("vlist_test_config_invalid.toml", "overscan_count = [\n");

    let result = load_config_file(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    let _ = fs::remove_file(&path);
}

#[test]
fn load_config_file_rejects_zero_settle_delay() {
    let path = write_temp_config("vlist_test_config_zero.toml", "settle_delay_ms = 0\n");

    let result = load_config_file(&path);
    match result {
        Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "settle_delay_ms"),
        other => panic!("Expected InvalidValue, got {:?}", other),
    }

    let _ = fs::remove_file(&path);
}

#[test]
fn merge_config_uses_defaults_for_missing_fields() {
    let file = ConfigFile {
        overscan_count: Some(8),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    let defaults = ResolvedConfig::default();
    assert_eq!(resolved.overscan_count, 8);
    assert_eq!(resolved.settle_delay_ms, defaults.settle_delay_ms);
    assert_eq!(resolved.frame_interval_ms, defaults.frame_interval_ms);
    assert_eq!(resolved.log_file_path, defaults.log_file_path);
}

#[test]
fn merge_config_without_file_is_default() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn cli_overrides_take_precedence() {
    let base = ResolvedConfig {
        overscan_count: 8,
        settle_delay_ms: 300,
        ..ResolvedConfig::default()
    };

    let resolved = apply_cli_overrides(base.clone(), Some(1), None);
    assert_eq!(resolved.overscan_count, 1);
    assert_eq!(resolved.settle_delay_ms, 300);

    let unchanged = apply_cli_overrides(base.clone(), None, None);
    assert_eq!(unchanged, base);
}

#[test]
#[serial(env)]
fn env_overrides_apply_valid_values() {
    env::set_var("VLIST_OVERSCAN", "6");
    env::set_var("VLIST_SETTLE_DELAY_MS", "250");

    let resolved = apply_env_overrides(ResolvedConfig::default());

    env::remove_var("VLIST_OVERSCAN");
    env::remove_var("VLIST_SETTLE_DELAY_MS");

    assert_eq!(resolved.overscan_count, 6);
    assert_eq!(resolved.settle_delay_ms, 250);
}

#[test]
#[serial(env)]
fn env_overrides_ignore_invalid_values() {
    env::set_var("VLIST_OVERSCAN", "lots");
    env::set_var("VLIST_SETTLE_DELAY_MS", "0");

    let resolved = apply_env_overrides(ResolvedConfig::default());

    env::remove_var("VLIST_OVERSCAN");
    env::remove_var("VLIST_SETTLE_DELAY_MS");

    assert_eq!(resolved, ResolvedConfig::default());
}

#[test]
#[serial(env)]
fn precedence_prefers_explicit_path_over_env() {
    let explicit = write_temp_config("vlist_test_config_explicit.toml", "overscan_count = 2\n");
    let from_env = write_temp_config("vlist_test_config_env.toml", "overscan_count = 9\n");
    env::set_var("VLIST_CONFIG", &from_env);

    let chosen = load_config_with_precedence(Some(explicit.clone()));
    let env_only = load_config_with_precedence(None);

    env::remove_var("VLIST_CONFIG");
    let _ = fs::remove_file(&explicit);
    let _ = fs::remove_file(&from_env);

    assert_eq!(
        chosen.expect("parses").and_then(|c| c.overscan_count),
        Some(2)
    );
    assert_eq!(
        env_only.expect("parses").and_then(|c| c.overscan_count),
        Some(9)
    );
}
