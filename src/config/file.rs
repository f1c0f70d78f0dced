//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::defaults::ConfigPreset;
use super::types::AppConfig;
use crate::compare::{ComparisonConfig, ContentConfig, LayoutConfig, TableConfig};
use crate::matching::MatchConfig;
use crate::reports::ReportFormat;
use crate::search::SearchConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".ui-parity.yaml",
    ".ui-parity.yml",
    "ui-parity.yaml",
    "ui-parity.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/ui-parity/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let cwd = std::env::current_dir().ok();
    let git_root = cwd.as_deref().and_then(find_git_root);
    let user_dir = dirs::config_dir().map(|dir| dir.join("ui-parity"));

    [cwd, git_root, user_dir, dirs::home_dir()]
        .into_iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(&dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Sections of `other` left at their defaults do not override. This is
    /// how CLI arguments are layered over file config.
    pub fn merge(&mut self, other: &Self) {
        self.comparison.merge(&other.comparison);

        // Output config - only override if explicitly set
        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if !other.output.pretty {
            self.output.pretty = false;
        }
        if other.output.max_issues != crate::config::OutputConfig::default().max_issues {
            self.output.max_issues = other.output.max_issues;
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.fail_on_warning {
            self.behavior.fail_on_warning = true;
        }
        if other.behavior.min_parity.is_some() {
            self.behavior.min_parity = other.behavior.min_parity;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
        if other.behavior.explain_matches {
            self.behavior.explain_matches = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }

    /// Replace the comparison settings with those of an explicitly chosen
    /// preset.
    ///
    /// Unlike [`merge`](Self::merge), every comparison field is taken from
    /// the preset, including ones equal to the defaults.
    pub fn apply_preset(&mut self, preset: ConfigPreset) {
        self.comparison = Self::from_preset(preset).comparison;
    }
}

impl ComparisonConfig {
    fn merge(&mut self, other: &Self) {
        if other.matching != MatchConfig::default() {
            self.matching = other.matching.clone();
        }
        if other.content != ContentConfig::default() {
            self.content = other.content.clone();
        }
        if other.tables != TableConfig::default() {
            self.tables = other.tables.clone();
        }
        if other.layout != LayoutConfig::default() {
            self.layout = other.layout.clone();
        }
        if other.search != SearchConfig::default() {
            self.search = other.search.clone();
        }

        let defaults = Self::default();
        if other.navigation_threshold != defaults.navigation_threshold {
            self.navigation_threshold = other.navigation_threshold;
        }
        if other.component_threshold != defaults.component_threshold {
            self.component_threshold = other.component_threshold;
        }
        if other.changed_credit != defaults.changed_credit {
            self.changed_credit = other.changed_credit;
        }
        if other.synonyms != defaults.synonyms {
            self.synonyms = other.synonyms.clone();
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# UI Parity Configuration
# Place this file at .ui-parity.yaml in your project root or ~/.config/ui-parity/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with the commonly tuned options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# UI Parity Configuration File
# ============================
#
# Place it at:
#   - .ui-parity.yaml in your project root
#   - ~/.config/ui-parity/ui-parity.yaml for global config
#
# CLI arguments always override file settings.

comparison:
  # Element matching
  matching:
    # Minimum pair score (0.0-1.0)
    match_threshold: 0.5
    # Largest normalized center distance for spatial matching
    spatial_max_distance: 0.1
    # Assignment: greedy, optimal
    assignment: greedy
    weights:
      accessible_name: 1.0
      text_exact: 0.9
      text_fuzzy: 0.8
      spatial: 0.6
      value: 0.7

  # Content pairing thresholds
  content:
    heading_match_threshold: 0.75
    metric_match_threshold: 0.8
    status_match_threshold: 0.8
    label_match_threshold: 0.75

  tables:
    table_match_threshold: 0.6
    # Cell differences reported per table
    max_differences: 50

  navigation_threshold: 0.75
  component_threshold: 0.75

  layout:
    grid_columns: 4
    grid_rows: 4
    # Smaller/larger area ratio below which a size change is reported
    size_tolerance: 0.5

  # Credit given to changed pairs when computing parity
  changed_credit: 0.5

  search:
    min_score: 0.5
    max_results: 10

# Output configuration
output:
  # Format: auto, json, summary
  format: auto
  # Output file path (omit for stdout)
  # file: report.json
  no_color: false
  pretty: true
  max_issues: 20

# Behavior flags
behavior:
  # Exit with code 1 when the report severity is warning
  fail_on_warning: false
  # Exit with code 2 when overall parity is below this value
  # min_parity: 0.9
  quiet: false
  explain_matches: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
