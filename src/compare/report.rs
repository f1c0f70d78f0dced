//! The cross-application comparison report.

use super::component::ComponentComparison;
use super::content::ContentComparison;
use super::layout::LayoutComparison;
use super::navigation::NavigationComparison;
use super::table::TableCategory;
use crate::matching::ElementMatchResult;
use crate::model::Severity;
use crate::normalize::FormatMismatch;
use serde::{Deserialize, Serialize};

/// Comparison category an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Element,
    Heading,
    Metric,
    Status,
    Label,
    Table,
    Navigation,
    Layout,
    Component,
    Format,
}

impl IssueCategory {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Element => "element",
            Self::Heading => "heading",
            Self::Metric => "metric",
            Self::Status => "status",
            Self::Label => "label",
            Self::Table => "table",
            Self::Navigation => "navigation",
            Self::Layout => "layout",
            Self::Component => "component",
            Self::Format => "format",
        }
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reportable difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub label: String,
    pub category: IssueCategory,
    pub severity: Severity,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

impl Issue {
    pub(crate) fn new(
        category: IssueCategory,
        severity: Severity,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            category,
            severity,
            description: description.into(),
            source_id: None,
            target_id: None,
        }
    }

    pub(crate) fn with_ids(mut self, source_id: Option<&str>, target_id: Option<&str>) -> Self {
        self.source_id = source_id.map(str::to_string);
        self.target_id = target_id.map(str::to_string);
        self
    }
}

/// Parity per category; `None` marks a category with no eligible element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityScores {
    /// Mean of all present category parities, 1.0 when none is present
    pub overall: f64,
    /// Mean of the present heading, metric, status and label parities
    pub content: f64,
    pub headings: Option<f64>,
    pub metrics: Option<f64>,
    pub statuses: Option<f64>,
    pub labels: Option<f64>,
    pub tables: Option<f64>,
    pub navigation: Option<f64>,
    pub layout: Option<f64>,
    pub components: Option<f64>,
}

impl ParityScores {
    /// Present category parities as `(name, value)`
    #[must_use]
    pub fn categories(&self) -> Vec<(&'static str, f64)> {
        [
            ("headings", self.headings),
            ("metrics", self.metrics),
            ("statuses", self.statuses),
            ("labels", self.labels),
            ("tables", self.tables),
            ("navigation", self.navigation),
            ("layout", self.layout),
            ("components", self.components),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// Headline counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub source_elements: usize,
    pub target_elements: usize,
    pub matched_elements: usize,
    pub unmatched_source: usize,
    pub unmatched_target: usize,
    /// Paired items whose value, level, destination or structure differs
    pub changes: usize,
    pub format_mismatches: usize,
    pub layout_differences: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Aggregate root of one source/target comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossAppComparisonReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    pub severity: Severity,
    pub element_matches: ElementMatchResult,
    pub content: ContentComparison,
    pub tables: TableCategory,
    pub navigation: NavigationComparison,
    pub layout: LayoutComparison,
    pub components: ComponentComparison,
    pub format_mismatches: Vec<FormatMismatch>,
    pub parity: ParityScores,
    pub issues: Vec<Issue>,
    pub summary: ReportSummary,
}

impl CrossAppComparisonReport {
    /// Issues of exactly `severity`
    pub fn issues_with(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.severity == Severity::Error
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.severity >= Severity::Warning
    }
}
