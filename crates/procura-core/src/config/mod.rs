//! Configuration system for procura.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod cache_config;
pub mod display_config;
pub mod outlier_config;
pub mod procura_config;

pub use cache_config::CacheConfig;
pub use display_config::DisplayConfig;
pub use outlier_config::OutlierConfig;
pub use procura_config::{CliOverrides, ProcuraConfig};
