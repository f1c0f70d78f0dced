//! Comparison configuration.

use crate::matching::{MatchConfig, SynonymTable};
use crate::search::SearchConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default partial credit for a paired element whose value differs.
pub const DEFAULT_CHANGED_CREDIT: f64 = 0.5;

/// Label pairing thresholds for the content categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ContentConfig {
    /// Heading text similarity required to pair two headings
    #[schemars(range(min = 0.0, max = 1.0))]
    pub heading_match_threshold: f64,
    /// Label similarity required to pair two metrics
    #[schemars(range(min = 0.0, max = 1.0))]
    pub metric_match_threshold: f64,
    /// Label similarity required to pair two status indicators
    #[schemars(range(min = 0.0, max = 1.0))]
    pub status_match_threshold: f64,
    /// Text similarity required to pair two form labels
    #[schemars(range(min = 0.0, max = 1.0))]
    pub label_match_threshold: f64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            heading_match_threshold: 0.75,
            metric_match_threshold: 0.8,
            status_match_threshold: 0.8,
            label_match_threshold: 0.75,
        }
    }
}

/// Table pairing and cell diff limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TableConfig {
    /// Caption similarity required to pair two tables
    #[schemars(range(min = 0.0, max = 1.0))]
    pub table_match_threshold: f64,
    /// Maximum cell differences recorded per table pair
    pub max_differences: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            table_match_threshold: 0.6,
            max_differences: 50,
        }
    }
}

/// Layout grid and tolerance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal grid cells used to bucket element centers
    #[schemars(range(min = 1))]
    pub grid_columns: u32,
    /// Vertical grid cells used to bucket element centers
    #[schemars(range(min = 1))]
    pub grid_rows: u32,
    /// Smallest accepted ratio between the normalized areas of a pair
    #[schemars(range(min = 0.0, max = 1.0))]
    pub size_tolerance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_columns: 4,
            grid_rows: 4,
            size_tolerance: 0.5,
        }
    }
}

/// Everything the report aggregator needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Element matching used for the top-level pairing and layout
    pub matching: MatchConfig,
    pub content: ContentConfig,
    pub tables: TableConfig,
    /// Link text similarity required to pair two navigation links
    #[schemars(range(min = 0.0, max = 1.0))]
    pub navigation_threshold: f64,
    pub layout: LayoutConfig,
    /// Component name similarity required to pair two components
    #[schemars(range(min = 0.0, max = 1.0))]
    pub component_threshold: f64,
    /// Parity credit given to a paired but changed element
    #[schemars(range(min = 0.0, max = 1.0))]
    pub changed_credit: f64,
    /// Search defaults
    pub search: SearchConfig,
    /// Synonym vocabulary for alias generation
    pub synonyms: SynonymTable,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            matching: MatchConfig::default(),
            content: ContentConfig::default(),
            tables: TableConfig::default(),
            navigation_threshold: 0.75,
            layout: LayoutConfig::default(),
            component_threshold: 0.75,
            changed_credit: DEFAULT_CHANGED_CREDIT,
            search: SearchConfig::default(),
            synonyms: SynonymTable::with_builtins(),
        }
    }
}

impl ComparisonConfig {
    /// Replace the element matching configuration.
    #[must_use]
    pub fn with_matching(mut self, matching: MatchConfig) -> Self {
        self.matching = matching;
        self
    }

    /// Set the heading pairing threshold.
    #[must_use]
    pub const fn with_heading_threshold(mut self, threshold: f64) -> Self {
        self.content.heading_match_threshold = threshold;
        self
    }

    /// Set the partial credit for changed pairs.
    #[must_use]
    pub const fn with_changed_credit(mut self, credit: f64) -> Self {
        self.changed_credit = credit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ComparisonConfig::default();
        assert_eq!(config.content.heading_match_threshold, 0.75);
        assert_eq!(config.content.metric_match_threshold, 0.8);
        assert_eq!(config.tables.max_differences, 50);
        assert_eq!(config.changed_credit, 0.5);
        assert!(!config.synonyms.is_empty());
    }

    #[test]
    fn test_partial_yaml() {
        let config: ComparisonConfig = serde_yaml::from_str(
            "content:\n  heading_match_threshold: 0.9\nlayout:\n  grid_columns: 12\n",
        )
        .unwrap();
        assert_eq!(config.content.heading_match_threshold, 0.9);
        assert_eq!(config.content.label_match_threshold, 0.75);
        assert_eq!(config.layout.grid_columns, 12);
        assert_eq!(config.layout.grid_rows, 4);
    }
}
