//! Top-level procura configuration with 4-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CacheConfig, DisplayConfig, OutlierConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PROCURA_*`)
/// 3. Project config (`procura.toml` in project root)
/// 4. User config (`~/.procura/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProcuraConfig {
    pub outliers: OutlierConfig,
    pub display: DisplayConfig,
    pub cache: CacheConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub multiplier: Option<f64>,
    pub cache_enabled: Option<bool>,
    pub currency_symbol: Option<String>,
}

impl ProcuraConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("procura.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        tracing::debug!(
            multiplier = config.outliers.effective_multiplier(),
            cache_enabled = config.cache.effective_enabled(),
            "configuration resolved"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ProcuraConfig) -> Result<(), ConfigError> {
        if let Some(k) = config.outliers.multiplier {
            if !k.is_finite() || k < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "outliers.multiplier".to_string(),
                    message: format!("must be a finite number >= 0, got {k}"),
                });
            }
        }
        if config.cache.ttl_seconds == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "cache.ttl_seconds".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.cache.max_entries == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "cache.max_entries".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.display.effective_decimal_places() > 6 {
            return Err(ConfigError::ValidationFailed {
                field: "display.decimal_places".to_string(),
                message: "must be between 0 and 6".to_string(),
            });
        }
        if config.display.effective_decimal_separator()
            == config.display.effective_thousands_separator()
        {
            return Err(ConfigError::ValidationFailed {
                field: "display.thousands_separator".to_string(),
                message: "must differ from display.decimal_separator".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.procura/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut ProcuraConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ProcuraConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut ProcuraConfig, other: &ProcuraConfig) {
        // Outliers
        if other.outliers.multiplier.is_some() {
            base.outliers.multiplier = other.outliers.multiplier;
        }

        // Display
        if other.display.currency_symbol.is_some() {
            base.display.currency_symbol = other.display.currency_symbol.clone();
        }
        if other.display.decimal_separator.is_some() {
            base.display.decimal_separator = other.display.decimal_separator;
        }
        if other.display.thousands_separator.is_some() {
            base.display.thousands_separator = other.display.thousands_separator;
        }
        if other.display.decimal_places.is_some() {
            base.display.decimal_places = other.display.decimal_places;
        }

        // Cache
        if other.cache.enabled.is_some() {
            base.cache.enabled = other.cache.enabled;
        }
        if other.cache.ttl_seconds.is_some() {
            base.cache.ttl_seconds = other.cache.ttl_seconds;
        }
        if other.cache.max_entries.is_some() {
            base.cache.max_entries = other.cache.max_entries;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `PROCURA_OUTLIERS_MULTIPLIER`, `PROCURA_CACHE_TTL_SECONDS`, etc.
    /// An unparsable multiplier is an error; other unparsable values are ignored.
    fn apply_env_overrides(config: &mut ProcuraConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("PROCURA_OUTLIERS_MULTIPLIER") {
            let k = val.trim().parse::<f64>().map_err(|e| ConfigError::InvalidValue {
                field: "PROCURA_OUTLIERS_MULTIPLIER".to_string(),
                message: e.to_string(),
            })?;
            config.outliers.multiplier = Some(k);
        }
        if let Ok(val) = std::env::var("PROCURA_CACHE_ENABLED") {
            if let Ok(v) = val.trim().parse::<bool>() {
                config.cache.enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PROCURA_CACHE_TTL_SECONDS") {
            if let Ok(v) = val.trim().parse::<u64>() {
                config.cache.ttl_seconds = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PROCURA_CACHE_MAX_ENTRIES") {
            if let Ok(v) = val.trim().parse::<u64>() {
                config.cache.max_entries = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PROCURA_DISPLAY_CURRENCY_SYMBOL") {
            config.display.currency_symbol = Some(val);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut ProcuraConfig, cli: &CliOverrides) {
        if let Some(k) = cli.multiplier {
            config.outliers.multiplier = Some(k);
        }
        if let Some(v) = cli.cache_enabled {
            config.cache.enabled = Some(v);
        }
        if let Some(ref v) = cli.currency_symbol {
            config.display.currency_symbol = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level procura config directory: `~/.procura/`.
fn dirs_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".procura"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
