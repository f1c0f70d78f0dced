//! Configuration module for ui-parity.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```
//! use ui_parity::config::{AppConfig, ConfigPreset, Validatable};
//!
//! let config = AppConfig::from_preset(ConfigPreset::Strict);
//! assert!(config.is_valid());
//!
//! let config = AppConfig::builder()
//!     .match_threshold(0.6)
//!     .fail_on_warning(true)
//!     .build();
//! assert!(config.behavior.fail_on_warning);
//! ```
//!
//! # Configuration File
//!
//! Place a `.ui-parity.yaml` file in your project root or `~/.config/ui-parity/`:
//!
//! ```yaml
//! comparison:
//!   matching:
//!     match_threshold: 0.6
//!   changed_credit: 0.5
//! behavior:
//!   min_parity: 0.9
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_MATCH_THRESHOLD, DEFAULT_SEARCH_MIN_SCORE};
pub use types::{AppConfig, AppConfigBuilder, BehaviorConfig, OutputConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// The schema documents every option accepted by `.ui-parity.yaml` and can
/// be used by editors for validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
