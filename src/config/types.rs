//! Configuration types for ui-parity operations.

use crate::compare::ComparisonConfig;
use crate::matching::{AssignmentMethod, MatchConfig};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// Aggregates the engine configuration with output and behavior settings.
/// Built from CLI arguments, config files, or both (CLI overriding file
/// settings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Matching, comparison and search configuration
    pub comparison: ComparisonConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags and exit code policy
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Replace the element matching configuration.
    pub fn matching(mut self, matching: MatchConfig) -> Self {
        self.config.comparison.matching = matching;
        self
    }

    /// Set the element match threshold.
    pub const fn match_threshold(mut self, threshold: f64) -> Self {
        self.config.comparison.matching.match_threshold = threshold;
        self
    }

    /// Set the assignment algorithm.
    pub const fn assignment(mut self, method: AssignmentMethod) -> Self {
        self.config.comparison.matching.assignment = method;
        self
    }

    /// Set the heading pairing threshold.
    pub const fn heading_threshold(mut self, threshold: f64) -> Self {
        self.config.comparison.content.heading_match_threshold = threshold;
        self
    }

    /// Set the partial credit for changed pairs.
    pub const fn changed_credit(mut self, credit: f64) -> Self {
        self.config.comparison.changed_credit = credit;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Fail when the report severity is `warning`.
    pub const fn fail_on_warning(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_warning = fail;
        self
    }

    /// Fail when overall parity drops below this value.
    pub const fn min_parity(mut self, min_parity: Option<f64>) -> Self {
        self.config.behavior.min_parity = min_parity;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Attach per-pair match explanations to the output.
    pub const fn explain_matches(mut self, explain: bool) -> Self {
        self.config.behavior.explain_matches = explain;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Output and Behavior
// ============================================================================

/// Output-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (stdout when unset)
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Maximum issues listed by the summary output
    pub max_issues: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Auto,
            file: None,
            no_color: false,
            pretty: true,
            max_issues: Some(20),
        }
    }
}

/// Behavior flags and exit code policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 when the report severity is `warning`
    pub fail_on_warning: bool,
    /// Exit with code 2 when overall parity is below this value
    #[schemars(range(min = 0.0, max = 1.0))]
    pub min_parity: Option<f64>,
    /// Suppress non-essential output
    pub quiet: bool,
    /// Include per-pair match explanations
    pub explain_matches: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .match_threshold(0.8)
            .assignment(AssignmentMethod::Optimal)
            .output_format(ReportFormat::Json)
            .fail_on_warning(true)
            .min_parity(Some(0.9))
            .build();

        assert_eq!(config.comparison.matching.match_threshold, 0.8);
        assert_eq!(config.comparison.matching.assignment, AssignmentMethod::Optimal);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_warning);
        assert_eq!(config.behavior.min_parity, Some(0.9));
    }

    #[test]
    fn test_yaml_sections_are_optional() {
        let config: AppConfig =
            serde_yaml::from_str("behavior:\n  fail_on_warning: true\n").unwrap();
        assert!(config.behavior.fail_on_warning);
        assert_eq!(config.comparison, ComparisonConfig::default());
        assert!(config.output.pretty);
    }
}
