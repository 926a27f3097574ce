//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// Removes the named env var on creation and on drop.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
fn default_config_path_contains_qlog_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("qlog") && path_str.ends_with("config.toml"),
        "Path should contain 'qlog' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_qlog_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("qlog.log"),
        "Default log path should end with 'qlog.log', got: {:?}",
        path
    );
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();

    assert_eq!(config.page_size, 10);
    assert_eq!(config.sort_direction, SortDirection::Desc);
    assert_eq!(config.slow_response_ms, 2000);
    assert_eq!(config.preview_length, 60);
    assert_eq!(config.log_file_path, default_log_path());
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/qlog/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("qlog_test_config.toml");
    let toml_content = r#"
page_size = 25
sort_direction = "asc"
slow_response_ms = 1500
preview_length = 40
log_file_path = "/tmp/qlog-test.log"
"#;
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should parse valid TOML")
        .expect("File exists");
    fs::remove_file(&config_path).ok();

    assert_eq!(config.page_size, Some(25));
    assert_eq!(config.sort_direction, Some(SortDirection::Asc));
    assert_eq!(config.slow_response_ms, Some(1500));
    assert_eq!(config.preview_length, Some(40));
    assert_eq!(config.log_file_path, Some(PathBuf::from("/tmp/qlog-test.log")));
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("qlog_test_invalid.toml");
    fs::write(&config_path, "this is not valid TOML ][}{").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => assert_eq!(path, config_path),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"\n");
    assert!(result.is_err(), "Unknown keys should be rejected");
}

#[test]
fn config_file_rejects_unknown_sort_direction() {
    let result: Result<ConfigFile, _> = toml::from_str("sort_direction = \"sideways\"\n");
    assert!(result.is_err());
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_uses_defaults_for_none_fields() {
    let file = ConfigFile {
        preview_length: Some(80),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.preview_length, 80);
    assert_eq!(resolved.page_size, defaults.page_size);
    assert_eq!(resolved.sort_direction, defaults.sort_direction);
    assert_eq!(resolved.slow_response_ms, defaults.slow_response_ms);
    assert_eq!(resolved.log_file_path, defaults.log_file_path);
}

#[test]
#[serial(qlog_env)]
fn apply_env_overrides_respects_page_size_and_sort() {
    let _page = EnvGuard::new("QLOG_PAGE_SIZE");
    let _sort = EnvGuard::new("QLOG_SORT");
    env::set_var("QLOG_PAGE_SIZE", "6");
    env::set_var("QLOG_SORT", "asc");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.page_size, 6);
    assert_eq!(result.sort_direction, SortDirection::Asc);
}

#[test]
#[serial(qlog_env)]
fn apply_env_overrides_ignores_unparseable_values() {
    let _page = EnvGuard::new("QLOG_PAGE_SIZE");
    let _sort = EnvGuard::new("QLOG_SORT");
    env::set_var("QLOG_PAGE_SIZE", "many");
    env::set_var("QLOG_SORT", "random");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(qlog_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _page = EnvGuard::new("QLOG_PAGE_SIZE");
    let _sort = EnvGuard::new("QLOG_SORT");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
fn apply_cli_overrides_only_touches_given_flags() {
    let base = ResolvedConfig {
        page_size: 20,
        ..ResolvedConfig::default()
    };

    let result = apply_cli_overrides(
        base.clone(),
        CliOverrides {
            page_size: None,
            sort_direction: Some(SortDirection::Asc),
        },
    );

    assert_eq!(result.page_size, 20);
    assert_eq!(result.sort_direction, SortDirection::Asc);
    assert_eq!(apply_cli_overrides(base.clone(), CliOverrides::default()), base);
}

#[test]
#[serial(qlog_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new("QLOG_CONFIG");
    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("qlog_explicit.toml");
    let env_path = temp_dir.join("qlog_env.toml");
    fs::write(&explicit_path, "page_size = 3\n").expect("Failed to write explicit config");
    fs::write(&env_path, "page_size = 4\n").expect("Failed to write env config");
    env::set_var("QLOG_CONFIG", &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .expect("valid config")
        .expect("file exists");
    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();

    assert_eq!(config.page_size, Some(3));
}

#[test]
#[serial(qlog_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new("QLOG_CONFIG");
    let env_path = env::temp_dir().join("qlog_env_only.toml");
    fs::write(&env_path, "sort_direction = \"asc\"\n").expect("Failed to write env config");
    env::set_var("QLOG_CONFIG", &env_path);

    let config = load_config_with_precedence(None)
        .expect("valid config")
        .expect("file exists");
    fs::remove_file(env_path).ok();

    assert_eq!(config.sort_direction, Some(SortDirection::Asc));
}

#[test]
#[serial(qlog_config)]
fn load_config_with_precedence_missing_env_file_is_not_an_error() {
    let _guard = EnvGuard::new("QLOG_CONFIG");
    env::set_var("QLOG_CONFIG", "/nonexistent/qlog/config.toml");

    assert_eq!(load_config_with_precedence(None), Ok(None));
}

#[test]
#[serial(qlog_env)]
fn precedence_chain_full_defaults_to_cli() {
    let _page = EnvGuard::new("QLOG_PAGE_SIZE");
    let _sort = EnvGuard::new("QLOG_SORT");
    let file = ConfigFile {
        page_size: Some(15),
        sort_direction: Some(SortDirection::Asc),
        slow_response_ms: Some(500),
        ..ConfigFile::default()
    };
    env::set_var("QLOG_PAGE_SIZE", "30");

    let merged = merge_config(Some(file));
    let with_env = apply_env_overrides(merged);
    let resolved = apply_cli_overrides(
        with_env,
        CliOverrides {
            page_size: None,
            sort_direction: Some(SortDirection::Desc),
        },
    );

    assert_eq!(resolved.page_size, 30, "env beats file");
    assert_eq!(resolved.sort_direction, SortDirection::Desc, "cli beats file");
    assert_eq!(resolved.slow_response_ms, 500, "file beats default");
    assert_eq!(resolved.preview_length, DEFAULT_PREVIEW_LENGTH);
}
