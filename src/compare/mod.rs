//! Cross-application comparison.
//!
//! Each comparator selects a narrow element subset with a role predicate,
//! pairs it with [`match_texts`](crate::matching::match_texts) and classifies
//! every pair as matched or changed. [`ReportAggregator`] runs all of them
//! and folds the results into a [`CrossAppComparisonReport`].
//!
//! # Example
//!
//! ```
//! use ui_parity::compare::ReportAggregator;
//! use ui_parity::model::{ContentRole, ElementDescriptor, Severity};
//!
//! let heading = |id: &str, text: &str| {
//!     ElementDescriptor::new(id)
//!         .with_content_role(ContentRole::Heading)
//!         .with_text(text)
//! };
//! let source = vec![heading("a", "Overview"), heading("b", "Settings")];
//! let target = vec![heading("x", "Overview"), heading("y", "Setting")];
//!
//! let report = ReportAggregator::default().compare_elements(&source, &target);
//! assert_eq!(report.content.headings.matched.len(), 2);
//! assert_eq!(report.parity.headings, Some(1.0));
//! ```

mod aggregate;
mod component;
mod config;
mod content;
mod layout;
mod navigation;
mod parity;
mod report;
mod table;

pub use aggregate::ReportAggregator;
pub use component::{compare_components, group_components, ComponentComparison, ComponentPair, RoleCount};
pub use config::{ComparisonConfig, ContentConfig, LayoutConfig, TableConfig, DEFAULT_CHANGED_CREDIT};
pub use content::{
    compare_content, compare_headings, compare_labels, compare_metrics, compare_statuses,
    is_heading, is_label, is_metric, is_status, ContentComparison, HeadingChange,
    HeadingComparison, HeadingMatch, LabelComparison, LabelMatch, MetricChange, MetricComparison,
    MetricMatch, StatusChange, StatusComparison, StatusMatch, ValueComparison, ValuePair,
};
pub use layout::{compare_layout, LayoutComparison, LayoutDifference, LayoutDifferenceKind};
pub use navigation::{compare_navigation, is_navigation, normalize_href, NavigationComparison, NavigationPair};
pub use parity::{mean_present, CategoryCounts, Unpaired};
pub use report::{
    CrossAppComparisonReport, Issue, IssueCategory, ParityScores, ReportSummary,
};
pub use table::{
    compare_table_data, compare_tables, is_table, CellDifference, ColumnMapping, TableCategory,
    TableComparison, TableDiff,
};

use crate::matching::{match_texts, TextMatchResult};
use crate::model::ElementDescriptor;

/// A visible element selected by a comparator, with its pairing key.
pub(crate) struct Eligible<'a> {
    pub element: &'a ElementDescriptor,
    pub key: String,
}

pub(crate) fn eligible<'a, P, K>(
    elements: &'a [ElementDescriptor],
    predicate: P,
    key: K,
) -> Vec<Eligible<'a>>
where
    P: Fn(&ElementDescriptor) -> bool,
    K: Fn(&ElementDescriptor) -> String,
{
    elements
        .iter()
        .filter(|&e| e.visible && predicate(e))
        .map(|element| Eligible {
            element,
            key: key(element),
        })
        .collect()
}

pub(crate) fn pair_eligible(
    source: &[Eligible<'_>],
    target: &[Eligible<'_>],
    threshold: f64,
) -> TextMatchResult {
    let source_keys: Vec<&str> = source.iter().map(|e| e.key.as_str()).collect();
    let target_keys: Vec<&str> = target.iter().map(|e| e.key.as_str()).collect();
    match_texts(&source_keys, &target_keys, threshold)
}

pub(crate) fn unpaired(items: &[Eligible<'_>], indices: &[usize]) -> Vec<Unpaired> {
    indices
        .iter()
        .map(|&i| Unpaired::new(items[i].element, &items[i].key))
        .collect()
}
