//! Default configurations and presets for ui-parity.
//!
//! Provides named presets for common use cases and default values.

use super::types::{AppConfig, BehaviorConfig, OutputConfig};
use crate::compare::ComparisonConfig;
use crate::matching::{AssignmentMethod, MatchConfig};
use crate::reports::ReportFormat;

/// Default element match threshold.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.5;

/// Default minimum score for search results.
pub const DEFAULT_SEARCH_MIN_SCORE: f64 = 0.5;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Balanced settings suitable for most comparisons
    Default,
    /// Strict matching with optimal assignment
    Strict,
    /// Loose matching for apps with inconsistent wording
    Permissive,
    /// JSON output and failure on any warning
    CiCd,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Permissive => "permissive",
            Self::CiCd => "ci-cd",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "strict" | "exact" => Some(Self::Strict),
            "permissive" | "loose" => Some(Self::Permissive),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Balanced settings suitable for most app comparisons",
            Self::Strict => "High thresholds and optimal assignment for near-identical apps",
            Self::Permissive => "Loose matching for apps with inconsistent wording and layout",
            Self::CiCd => "Machine-readable output that fails on any warning",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Permissive, Self::CiCd]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::strict_preset(),
            ConfigPreset::Permissive => Self::permissive_preset(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
        }
    }

    /// Strict preset.
    ///
    /// - Strict element matching with Kuhn-Munkres assignment
    /// - Higher content pairing thresholds
    #[must_use]
    pub fn strict_preset() -> Self {
        let mut comparison = ComparisonConfig::default()
            .with_matching(MatchConfig::strict().with_assignment(AssignmentMethod::Optimal));
        comparison.content.heading_match_threshold = 0.9;
        comparison.content.label_match_threshold = 0.9;
        comparison.content.metric_match_threshold = 0.9;
        comparison.content.status_match_threshold = 0.9;
        comparison.navigation_threshold = 0.9;
        comparison.component_threshold = 0.9;
        Self {
            comparison,
            output: OutputConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }

    /// Permissive preset.
    ///
    /// - Loose element matching and a wide spatial window
    /// - Lower content pairing thresholds
    #[must_use]
    pub fn permissive_preset() -> Self {
        let mut comparison = ComparisonConfig::default().with_matching(MatchConfig::permissive());
        comparison.content.heading_match_threshold = 0.6;
        comparison.content.label_match_threshold = 0.6;
        comparison.content.metric_match_threshold = 0.7;
        comparison.content.status_match_threshold = 0.7;
        comparison.navigation_threshold = 0.6;
        comparison.component_threshold = 0.6;
        comparison.tables.table_match_threshold = 0.5;
        Self {
            comparison,
            output: OutputConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }

    /// CI/CD pipeline preset.
    ///
    /// - JSON output for machine parsing
    /// - Fail on any warning
    /// - Quiet mode to reduce noise
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            comparison: ComparisonConfig::default(),
            output: OutputConfig {
                format: ReportFormat::Json,
                no_color: true,
                ..OutputConfig::default()
            },
            behavior: BehaviorConfig {
                fail_on_warning: true,
                quiet: true,
                ..BehaviorConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("balanced"), Some(ConfigPreset::Default));
        assert_eq!(ConfigPreset::from_name("LOOSE"), Some(ConfigPreset::Permissive));
        assert_eq!(ConfigPreset::from_name("unknown"), None);
    }

    #[test]
    fn test_default_constants() {
        let config = AppConfig::default();
        assert_eq!(config.comparison.matching.match_threshold, DEFAULT_MATCH_THRESHOLD);
        assert_eq!(config.comparison.search.min_score, DEFAULT_SEARCH_MIN_SCORE);
    }

    #[test]
    fn test_strict_preset() {
        let config = AppConfig::from_preset(ConfigPreset::Strict);
        assert_eq!(config.comparison.matching.match_threshold, 0.7);
        assert_eq!(config.comparison.matching.assignment, AssignmentMethod::Optimal);
        assert!(
            config.comparison.content.heading_match_threshold
                > AppConfig::default().comparison.content.heading_match_threshold
        );
    }

    #[test]
    fn test_ci_cd_preset() {
        let config = AppConfig::from_preset(ConfigPreset::CiCd);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_warning);
        assert!(config.behavior.quiet);
    }
}
