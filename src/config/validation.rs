//! Configuration validation for ui-parity.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, OutputConfig};
use crate::compare::{ComparisonConfig, LayoutConfig};
use crate::matching::MatchConfig;
use crate::search::SearchConfig;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn check_unit(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ConfigError::new(
            field,
            format!("Value must be between 0.0 and 1.0, got {value}"),
        ));
    }
}

fn prefixed(prefix: &str, errors: Vec<ConfigError>) -> impl Iterator<Item = ConfigError> + '_ {
    errors.into_iter().map(move |mut e| {
        e.field = format!("{prefix}.{}", e.field);
        e
    })
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(prefixed("comparison", self.comparison.validate()));
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for MatchConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_unit(&mut errors, "matching.match_threshold", self.match_threshold);
        check_unit(
            &mut errors,
            "matching.spatial_max_distance",
            self.spatial_max_distance,
        );

        for (name, weight) in self.weights.entries() {
            check_unit(&mut errors, &format!("matching.weights.{name}"), weight);
        }

        if !(0.0..=0.25).contains(&self.prefix_scale) {
            errors.push(ConfigError::new(
                "matching.prefix_scale",
                format!(
                    "Prefix scale must be between 0.0 and 0.25, got {}",
                    self.prefix_scale
                ),
            ));
        }

        errors
    }
}

impl Validatable for LayoutConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.grid_columns == 0 {
            errors.push(ConfigError::new(
                "layout.grid_columns",
                "Grid must have at least 1 column",
            ));
        }
        if self.grid_rows == 0 {
            errors.push(ConfigError::new("layout.grid_rows", "Grid must have at least 1 row"));
        }
        check_unit(&mut errors, "layout.size_tolerance", self.size_tolerance);
        errors
    }
}

impl Validatable for SearchConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_unit(&mut errors, "search.min_score", self.min_score);
        if self.max_results == 0 {
            errors.push(ConfigError::new(
                "search.max_results",
                "Max results must be at least 1",
            ));
        }
        errors
    }
}

impl Validatable for ComparisonConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.matching.validate();

        let thresholds = [
            ("content.heading_match_threshold", self.content.heading_match_threshold),
            ("content.metric_match_threshold", self.content.metric_match_threshold),
            ("content.status_match_threshold", self.content.status_match_threshold),
            ("content.label_match_threshold", self.content.label_match_threshold),
            ("tables.table_match_threshold", self.tables.table_match_threshold),
            ("navigation_threshold", self.navigation_threshold),
            ("component_threshold", self.component_threshold),
            ("changed_credit", self.changed_credit),
        ];
        for (field, value) in thresholds {
            check_unit(&mut errors, field, value);
        }

        errors.extend(self.layout.validate());
        errors.extend(self.search.validate());
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        if self.max_issues == Some(0) {
            errors.push(ConfigError::new(
                "output.max_issues",
                "Max issues must be at least 1 when set",
            ));
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(min_parity) = self.min_parity {
            check_unit(&mut errors, "behavior.min_parity", min_parity);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
        for preset in crate::config::ConfigPreset::all() {
            assert!(AppConfig::from_preset(*preset).is_valid(), "preset {preset}");
        }
    }

    #[test]
    fn test_match_config_validation() {
        let mut config = MatchConfig::default();
        config.match_threshold = 1.5;
        config.prefix_scale = 0.3;
        config.weights.spatial = -0.1;

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"matching.match_threshold".to_string()));
        assert!(fields.contains(&"matching.prefix_scale".to_string()));
        assert!(fields.contains(&"matching.weights.spatial".to_string()));
    }

    #[test]
    fn test_comparison_config_validation() {
        let mut config = ComparisonConfig::default();
        config.changed_credit = 2.0;
        config.layout.grid_rows = 0;

        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "changed_credit");
        assert_eq!(errors[1].field, "layout.grid_rows");
    }

    #[test]
    fn test_app_config_prefixes_comparison_fields() {
        let mut config = AppConfig::default();
        config.comparison.matching.match_threshold = -1.0;
        config.behavior.min_parity = Some(1.2);

        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "comparison.matching.match_threshold");
        assert_eq!(errors[1].field, "behavior.min_parity");
        assert!(errors[1].to_string().starts_with("behavior.min_parity: "));
    }

    #[test]
    fn test_output_config_validation() {
        let config = OutputConfig {
            file: Some("/nonexistent/dir/report.json".into()),
            ..OutputConfig::default()
        };
        assert_eq!(config.validate().len(), 1);
    }
}
