//! Tests for the procura configuration system.

use std::sync::Mutex;

use procura_core::config::{CliOverrides, ProcuraConfig};
use procura_core::errors::{ConfigError, ProcuraErrorCode};

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 5] = [
    "PROCURA_OUTLIERS_MULTIPLIER",
    "PROCURA_CACHE_ENABLED",
    "PROCURA_CACHE_TTL_SECONDS",
    "PROCURA_CACHE_MAX_ENTRIES",
    "PROCURA_DISPLAY_CURRENCY_SYMBOL",
];

/// Clear all PROCURA_ env vars and point HOME at an empty directory so the
/// developer's own `~/.procura/config.toml` never leaks into a test.
fn isolate_env(home: &std::path::Path) {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_without_any_files() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    let dir = tempfile::TempDir::new().unwrap();
    let config = ProcuraConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.outliers.multiplier, None);
    assert_eq!(config.outliers.effective_multiplier(), 2.0);
    assert_eq!(config.display.effective_currency_symbol(), "R$");
    assert_eq!(config.display.effective_decimal_separator(), ',');
    assert_eq!(config.display.effective_thousands_separator(), '.');
    assert_eq!(config.display.effective_decimal_places(), 2);
    assert!(!config.cache.effective_enabled());
    assert_eq!(config.cache.effective_ttl_seconds(), 300);
    assert_eq!(config.cache.effective_max_entries(), 1024);
}

#[test]
fn four_layer_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    // User layer
    let user_dir = home.path().join(".procura");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        r#"
[outliers]
multiplier = 1.0

[display]
currency_symbol = "US$"
decimal_places = 3

[cache]
ttl_seconds = 60
"#,
    )
    .unwrap();

    // Project layer overrides user multiplier and symbol
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("procura.toml"),
        r#"
[outliers]
multiplier = 2.5

[display]
currency_symbol = "€"
"#,
    )
    .unwrap();

    // Env overrides project for the symbol
    std::env::set_var("PROCURA_DISPLAY_CURRENCY_SYMBOL", "BRL");
    std::env::set_var("PROCURA_CACHE_ENABLED", "true");

    // CLI overrides everything for the multiplier
    let cli = CliOverrides {
        multiplier: Some(3.0),
        ..Default::default()
    };

    let config = ProcuraConfig::load(dir.path(), Some(&cli)).unwrap();

    assert_eq!(config.outliers.effective_multiplier(), 3.0);
    assert_eq!(config.display.effective_currency_symbol(), "BRL");
    assert_eq!(config.display.effective_decimal_places(), 3);
    assert_eq!(config.cache.effective_ttl_seconds(), 60);
    assert!(config.cache.effective_enabled());

    clear_env();
}

#[test]
fn env_multiplier_must_parse() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    std::env::set_var("PROCURA_OUTLIERS_MULTIPLIER", "two");
    let dir = tempfile::TempDir::new().unwrap();
    let err = ProcuraConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    assert_eq!(err.error_code(), "CONFIG_ERROR");

    clear_env();
}

#[test]
fn invalid_project_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("procura.toml"), "[outliers\nmultiplier = ").unwrap();
    let err = ProcuraConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn validation_rejects_bad_multipliers() {
    for bad in ["-1.0", "nan", "inf"] {
        let toml_str = format!("[outliers]\nmultiplier = {bad}\n");
        let config = ProcuraConfig::from_toml(&toml_str).unwrap();
        let err = ProcuraConfig::validate(&config).unwrap_err();
        match err {
            ConfigError::ValidationFailed { field, .. } => {
                assert_eq!(field, "outliers.multiplier")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[test]
fn validation_accepts_zero_multiplier() {
    let config = ProcuraConfig::from_toml("[outliers]\nmultiplier = 0.0\n").unwrap();
    assert!(ProcuraConfig::validate(&config).is_ok());
}

#[test]
fn validation_rejects_zero_cache_limits() {
    let config = ProcuraConfig::from_toml("[cache]\nttl_seconds = 0\n").unwrap();
    assert!(ProcuraConfig::validate(&config).is_err());

    let config = ProcuraConfig::from_toml("[cache]\nmax_entries = 0\n").unwrap();
    assert!(ProcuraConfig::validate(&config).is_err());
}

#[test]
fn validation_rejects_identical_separators() {
    let config = ProcuraConfig::from_toml(
        "[display]\ndecimal_separator = \".\"\nthousands_separator = \".\"\n",
    )
    .unwrap();
    let err = ProcuraConfig::validate(&config).unwrap_err();
    assert!(err.to_string().contains("display.thousands_separator"));
}

#[test]
fn toml_round_trip_keeps_values() {
    let config = ProcuraConfig::from_toml(
        r#"
[outliers]
multiplier = 1.5

[display]
decimal_separator = "."
thousands_separator = ","
"#,
    )
    .unwrap();
    let rendered = config.to_toml().unwrap();
    let back = ProcuraConfig::from_toml(&rendered).unwrap();
    assert_eq!(back.outliers.multiplier, Some(1.5));
    assert_eq!(back.display.effective_decimal_separator(), '.');
    assert_eq!(back.display.effective_thousands_separator(), ',');
}

#[test]
fn unknown_keys_are_ignored() {
    let config = ProcuraConfig::from_toml("[outliers]\nmultiplier = 2.0\nrobust = true\n").unwrap();
    assert_eq!(config.outliers.effective_multiplier(), 2.0);
}
