//! Element matching configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-strategy weights applied to raw strategy scores.
///
/// A pair's score is the maximum over strategies, never the sum, so the
/// weights rank strategies against each other rather than adding up to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StrategyWeights {
    /// Case-insensitive accessible name equality
    #[schemars(range(min = 0.0, max = 1.0))]
    pub accessible_name: f64,
    /// Normalized visible text equality
    #[schemars(range(min = 0.0, max = 1.0))]
    pub text_exact: f64,
    /// Multiplier for Jaro-Winkler similarity of visible text
    #[schemars(range(min = 0.0, max = 1.0))]
    pub text_fuzzy: f64,
    /// Multiplier for `1 - distance` of same-role elements
    #[schemars(range(min = 0.0, max = 1.0))]
    pub spatial: f64,
    /// Equal normalized data values
    #[schemars(range(min = 0.0, max = 1.0))]
    pub value: f64,
}

impl StrategyWeights {
    /// Standard weights: name 1.0, text 0.9, fuzzy 0.8, value 0.7, spatial 0.6.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            accessible_name: 1.0,
            text_exact: 0.9,
            text_fuzzy: 0.8,
            spatial: 0.6,
            value: 0.7,
        }
    }

    /// Weights that ignore geometry and only trust textual evidence.
    #[must_use]
    pub const fn text_only() -> Self {
        Self {
            spatial: 0.0,
            ..Self::standard()
        }
    }

    /// All weights as `(field, value)` pairs, for validation.
    #[must_use]
    pub const fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("accessible_name", self.accessible_name),
            ("text_exact", self.text_exact),
            ("text_fuzzy", self.text_fuzzy),
            ("spatial", self.spatial),
            ("value", self.value),
        ]
    }
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self::standard()
    }
}

/// How accepted candidates are turned into a one-to-one assignment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentMethod {
    /// Highest score first, skipping claimed endpoints
    #[default]
    Greedy,
    /// Maximum total score (Kuhn-Munkres)
    Optimal,
}

impl std::fmt::Display for AssignmentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Greedy => write!(f, "greedy"),
            Self::Optimal => write!(f, "optimal"),
        }
    }
}

/// Configuration for element matching behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatchConfig {
    /// Candidates scoring below this are discarded (0.0 - 1.0)
    #[schemars(range(min = 0.0, max = 1.0))]
    pub match_threshold: f64,
    /// Strategy weights
    pub weights: StrategyWeights,
    /// Largest normalized center distance accepted by the spatial strategy
    #[schemars(range(min = 0.0, max = 1.0))]
    pub spatial_max_distance: f64,
    /// Jaro-Winkler prefix scale used by fuzzy text scoring
    #[schemars(range(min = 0.0, max = 0.25))]
    pub prefix_scale: f64,
    /// Assignment algorithm
    pub assignment: AssignmentMethod,
}

impl MatchConfig {
    /// Strict matching: high threshold, tight spatial window
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            match_threshold: 0.7,
            weights: StrategyWeights::standard(),
            spatial_max_distance: 0.05,
            prefix_scale: 0.1,
            assignment: AssignmentMethod::Greedy,
        }
    }

    /// Balanced matching for general comparisons
    #[must_use]
    pub const fn balanced() -> Self {
        Self {
            match_threshold: 0.5,
            weights: StrategyWeights::standard(),
            spatial_max_distance: 0.1,
            prefix_scale: 0.1,
            assignment: AssignmentMethod::Greedy,
        }
    }

    /// Permissive matching for heavily redesigned screens
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            match_threshold: 0.35,
            weights: StrategyWeights::standard(),
            spatial_max_distance: 0.2,
            prefix_scale: 0.1,
            assignment: AssignmentMethod::Greedy,
        }
    }

    /// Set a custom threshold value.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    /// Set the assignment method.
    #[must_use]
    pub const fn with_assignment(mut self, assignment: AssignmentMethod) -> Self {
        self.assignment = assignment;
        self
    }

    /// Set the strategy weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: StrategyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Create config from a preset name.
    ///
    /// Supported presets: "strict", "balanced", "permissive".
    #[must_use]
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "strict" => Some(Self::strict()),
            "balanced" | "default" => Some(Self::balanced()),
            "permissive" | "loose" => Some(Self::permissive()),
            _ => None,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::balanced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_order_thresholds() {
        assert!(MatchConfig::strict().match_threshold > MatchConfig::balanced().match_threshold);
        assert!(
            MatchConfig::balanced().match_threshold > MatchConfig::permissive().match_threshold
        );
        assert_eq!(MatchConfig::default(), MatchConfig::balanced());
    }

    #[test]
    fn test_from_preset() {
        assert_eq!(
            MatchConfig::from_preset("STRICT"),
            Some(MatchConfig::strict())
        );
        assert_eq!(
            MatchConfig::from_preset("loose"),
            Some(MatchConfig::permissive())
        );
        assert!(MatchConfig::from_preset("unknown").is_none());
    }

    #[test]
    fn test_standard_weights_rank_strategies() {
        let w = StrategyWeights::standard();
        assert!(w.accessible_name > w.text_exact);
        assert!(w.text_exact > w.text_fuzzy);
        assert!(w.text_fuzzy > w.value);
        assert!(w.value > w.spatial);
        assert_eq!(StrategyWeights::text_only().spatial, 0.0);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: MatchConfig = serde_yaml::from_str("match_threshold: 0.8\n").unwrap();
        assert_eq!(config.match_threshold, 0.8);
        assert_eq!(config.weights, StrategyWeights::standard());
        assert_eq!(config.assignment, AssignmentMethod::Greedy);

        let config: MatchConfig = serde_yaml::from_str("assignment: optimal\n").unwrap();
        assert_eq!(config.assignment, AssignmentMethod::Optimal);
    }
}
