//! Report aggregation: run every comparator and fold the results into one
//! report with a severity and parity summary.

use super::component::compare_components;
use super::content::{compare_content, is_metric, is_status, ContentComparison};
use super::layout::compare_layout;
use super::navigation::compare_navigation;
use super::parity::{mean_present, Unpaired};
use super::report::{CrossAppComparisonReport, Issue, IssueCategory, ParityScores, ReportSummary};
use super::table::compare_tables;
use super::ComparisonConfig;
use crate::config::Validatable;
use crate::error::{ParityError, Result};
use crate::matching::{ElementMatchResult, ElementMatcher};
use crate::model::{ElementDescriptor, Severity, Snapshot};
use crate::normalize::{compare_formats, describe_formats, FormatMismatch};
use rayon::prelude::*;

/// Composes every comparator into a [`CrossAppComparisonReport`].
///
/// Comparators run independently of each other; none consumes another's
/// output.
#[derive(Debug, Clone)]
#[must_use]
pub struct ReportAggregator {
    config: ComparisonConfig,
    matcher: ElementMatcher,
}

impl Default for ReportAggregator {
    fn default() -> Self {
        Self::new(ComparisonConfig::default())
    }
}

impl ReportAggregator {
    /// Create an aggregator without validating the configuration.
    pub fn new(config: ComparisonConfig) -> Self {
        let matcher = ElementMatcher::new(config.matching.clone());
        Self { config, matcher }
    }

    /// Create an aggregator, rejecting invalid configuration.
    pub fn try_new(config: ComparisonConfig) -> Result<Self> {
        let errors = config.validate();
        if errors.is_empty() {
            Ok(Self::new(config))
        } else {
            Err(ParityError::config(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            ))
        }
    }

    /// Replace the element matcher, e.g. to plug in a custom assigner.
    pub fn with_matcher(mut self, matcher: ElementMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    #[must_use]
    pub const fn matcher(&self) -> &ElementMatcher {
        &self.matcher
    }

    /// Compare two bare element collections.
    #[must_use]
    pub fn compare_elements(
        &self,
        source: &[ElementDescriptor],
        target: &[ElementDescriptor],
    ) -> CrossAppComparisonReport {
        self.compare(
            &Snapshot::new(source.to_vec()),
            &Snapshot::new(target.to_vec()),
        )
    }

    /// Compare two snapshots.
    #[must_use]
    pub fn compare(&self, source: &Snapshot, target: &Snapshot) -> CrossAppComparisonReport {
        let config = &self.config;
        let credit = config.changed_credit;
        let (s, t) = (source.elements.as_slice(), target.elements.as_slice());

        let element_matches = self.matcher.match_snapshots(source, target);
        let content = compare_content(s, t, &config.content, credit);
        let tables = compare_tables(s, t, &config.tables, credit);
        let navigation = compare_navigation(s, t, config.navigation_threshold, credit);
        let layout = compare_layout(source, target, &self.matcher, &config.layout, credit);
        let components = compare_components(s, t, config.component_threshold, credit);

        let valued = |e: &&ElementDescriptor| e.visible && (is_metric(e) || is_status(e));
        let format_mismatches = compare_formats(
            &describe_formats(s.iter().filter(valued)),
            &describe_formats(t.iter().filter(valued)),
            config.content.metric_match_threshold,
        );

        let parity = ParityScores {
            overall: mean_present([
                content.headings.parity,
                content.metrics.parity,
                content.statuses.parity,
                content.labels.parity,
                tables.parity,
                navigation.parity,
                layout.parity,
                components.parity,
            ])
            .unwrap_or(1.0),
            content: content.parity(),
            headings: content.headings.parity,
            metrics: content.metrics.parity,
            statuses: content.statuses.parity,
            labels: content.labels.parity,
            tables: tables.parity,
            navigation: navigation.parity,
            layout: layout.parity,
            components: components.parity,
        };

        let mut issues = element_issues(source, target, &element_matches);
        content_issues(&content, &mut issues);
        for table in &tables.changed {
            issues.push(
                Issue::new(
                    IssueCategory::Table,
                    Severity::Warning,
                    &table.caption,
                    format!(
                        "Table '{}' differs: {} cell difference(s){}, {} vs {} rows, {} missing and {} extra column(s)",
                        table.caption,
                        table.cell_differences.len(),
                        if table.truncated { " (truncated)" } else { "" },
                        table.source_row_count,
                        table.target_row_count,
                        table.source_only_columns.len(),
                        table.target_only_columns.len()
                    ),
                )
                .with_ids(Some(&table.source_id), Some(&table.target_id)),
            );
        }
        unpaired_issues(IssueCategory::Table, "Table", &tables.source_only, &tables.target_only, &mut issues);
        for link in &navigation.changed {
            issues.push(
                Issue::new(
                    IssueCategory::Navigation,
                    Severity::Warning,
                    &link.source_text,
                    format!(
                        "Link '{}' points to '{}' in source and '{}' in target",
                        link.source_text,
                        link.source_href.as_deref().unwrap_or("-"),
                        link.target_href.as_deref().unwrap_or("-")
                    ),
                )
                .with_ids(Some(&link.source_id), Some(&link.target_id)),
            );
        }
        unpaired_issues(
            IssueCategory::Navigation,
            "Link",
            &navigation.source_only,
            &navigation.target_only,
            &mut issues,
        );
        for difference in &layout.differences {
            issues.push(
                Issue::new(
                    IssueCategory::Layout,
                    Severity::Warning,
                    difference.kind.to_string(),
                    &difference.description,
                )
                .with_ids(Some(&difference.source_id), Some(&difference.target_id)),
            );
        }
        for component in &components.changed {
            issues.push(Issue::new(
                IssueCategory::Component,
                Severity::Warning,
                &component.source_name,
                format!(
                    "Component '{}' differs: missing roles [{}], extra roles [{}]",
                    component.source_name,
                    component.missing_roles.join(", "),
                    component.extra_roles.join(", ")
                ),
            ));
        }
        for name in &components.source_only {
            issues.push(Issue::new(
                IssueCategory::Component,
                Severity::Warning,
                name,
                format!("Component '{name}' is missing in target"),
            ));
        }
        for name in &components.target_only {
            issues.push(Issue::new(
                IssueCategory::Component,
                Severity::Warning,
                name,
                format!("Component '{name}' appears only in target"),
            ));
        }
        issues.extend(format_mismatches.iter().map(format_issue));

        let severity = issues
            .iter()
            .map(|i| i.severity)
            .max()
            .unwrap_or(Severity::Ok);

        let changes = content.headings.changed.len()
            + content.metrics.changed.len()
            + content.statuses.changed.len()
            + tables.changed.len()
            + navigation.changed.len()
            + components.changed.len();
        let summary = ReportSummary {
            source_elements: s.len(),
            target_elements: t.len(),
            matched_elements: element_matches.matched_pairs.len(),
            unmatched_source: element_matches.unmatched_source_ids.len(),
            unmatched_target: element_matches.unmatched_target_ids.len(),
            changes,
            format_mismatches: format_mismatches.len(),
            layout_differences: layout.differences.len(),
            errors: issues.iter().filter(|i| i.severity == Severity::Error).count(),
            warnings: issues.iter().filter(|i| i.severity == Severity::Warning).count(),
        };

        tracing::debug!(
            severity = %severity,
            overall = parity.overall,
            issues = issues.len(),
            "Aggregated comparison report"
        );

        CrossAppComparisonReport {
            source_name: source.name.clone(),
            target_name: target.name.clone(),
            severity,
            element_matches,
            content,
            tables,
            navigation,
            layout,
            components,
            format_mismatches,
            parity,
            issues,
            summary,
        }
    }

    /// Compare many independent snapshot pairs in parallel.
    ///
    /// Reports are returned in input order.
    #[must_use]
    pub fn compare_batch(&self, pairs: &[(Snapshot, Snapshot)]) -> Vec<CrossAppComparisonReport> {
        pairs
            .par_iter()
            .map(|(source, target)| self.compare(source, target))
            .collect()
    }
}

// ============================================================================
// Issue templates
// ============================================================================

fn element_issues(source: &Snapshot, target: &Snapshot, matches: &ElementMatchResult) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut push = |element: &ElementDescriptor, in_source: bool| {
        let label = element.describe().to_string();
        let (severity, qualifier) = if element.required {
            (Severity::Error, "Required element")
        } else {
            (Severity::Warning, "Element")
        };
        let (description, ids) = if in_source {
            (
                format!("{qualifier} '{label}' has no counterpart in target"),
                (Some(element.id.as_str()), None),
            )
        } else {
            (
                format!("{qualifier} '{label}' appears only in target"),
                (None, Some(element.id.as_str())),
            )
        };
        issues.push(Issue::new(IssueCategory::Element, severity, label, description).with_ids(ids.0, ids.1));
    };

    for id in &matches.unmatched_source_ids {
        if let Some(element) = source.get(id) {
            push(element, true);
        }
    }
    for id in &matches.unmatched_target_ids {
        if let Some(element) = target.get(id) {
            push(element, false);
        }
    }
    issues
}

fn content_issues(content: &ContentComparison, issues: &mut Vec<Issue>) {
    for change in &content.headings.changed {
        issues.push(
            Issue::new(
                IssueCategory::Heading,
                Severity::Warning,
                &change.source_text,
                format!(
                    "Heading '{}' is level {} in source and level {} in target",
                    change.source_text, change.source_level, change.target_level
                ),
            )
            .with_ids(Some(&change.source_id), Some(&change.target_id)),
        );
    }
    unpaired_issues(
        IssueCategory::Heading,
        "Heading",
        &content.headings.source_only,
        &content.headings.target_only,
        issues,
    );

    for (category, noun, comparison) in [
        (IssueCategory::Metric, "Metric", &content.metrics),
        (IssueCategory::Status, "Status", &content.statuses),
    ] {
        for change in &comparison.changed {
            issues.push(
                Issue::new(
                    category,
                    Severity::Warning,
                    &change.label,
                    format!(
                        "{noun} '{}' shows '{}' in source and '{}' in target",
                        change.label, change.source_value, change.target_value
                    ),
                )
                .with_ids(Some(&change.source_id), Some(&change.target_id)),
            );
        }
        unpaired_issues(category, noun, &comparison.source_only, &comparison.target_only, issues);
    }

    unpaired_issues(
        IssueCategory::Label,
        "Label",
        &content.labels.source_only,
        &content.labels.target_only,
        issues,
    );
}

fn unpaired_issues(
    category: IssueCategory,
    noun: &str,
    source_only: &[Unpaired],
    target_only: &[Unpaired],
    issues: &mut Vec<Issue>,
) {
    for item in source_only {
        issues.push(
            Issue::new(
                category,
                Severity::Warning,
                &item.text,
                format!("{noun} '{}' is missing in target", item.text),
            )
            .with_ids(Some(&item.element_id), None),
        );
    }
    for item in target_only {
        issues.push(
            Issue::new(
                category,
                Severity::Warning,
                &item.text,
                format!("{noun} '{}' appears only in target", item.text),
            )
            .with_ids(None, Some(&item.element_id)),
        );
    }
}

fn format_issue(mismatch: &FormatMismatch) -> Issue {
    let description = if mismatch.source_type == mismatch.target_type {
        format!(
            "'{}' is formatted as '{}' in source and '{}' in target",
            mismatch.label, mismatch.source_example, mismatch.target_example
        )
    } else {
        format!(
            "'{}' is a {} ('{}') in source but a {} ('{}') in target",
            mismatch.label,
            mismatch.source_type,
            mismatch.source_example,
            mismatch.target_type,
            mismatch.target_example
        )
    };
    Issue::new(IssueCategory::Format, mismatch.severity, &mismatch.label, description).with_ids(
        Some(&mismatch.source_element_id),
        Some(&mismatch.target_element_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentRole;

    fn metric(id: &str, label: &str, value: &str) -> ElementDescriptor {
        ElementDescriptor::new(id)
            .with_content_role(ContentRole::Metric)
            .with_label(label)
            .with_value(value)
    }

    #[test]
    fn test_empty_snapshots() {
        let report = ReportAggregator::default().compare_elements(&[], &[]);
        assert_eq!(report.severity, Severity::Ok);
        assert_eq!(report.parity.content, 1.0);
        assert_eq!(report.parity.overall, 1.0);
        assert!(report.parity.categories().is_empty());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_identical_snapshots_are_ok() {
        let elements = vec![
            metric("m1", "Revenue", "$1,200.00"),
            ElementDescriptor::new("h1")
                .with_tag_name("h1")
                .with_text("Dashboard"),
        ];
        let report = ReportAggregator::default().compare_elements(&elements, &elements);
        assert_eq!(report.severity, Severity::Ok);
        assert_eq!(report.parity.overall, 1.0);
        assert_eq!(report.summary.matched_elements, 2);
    }

    #[test]
    fn test_format_warning() {
        let source = vec![metric("m1", "Revenue", "$1,200.00")];
        let target = vec![metric("m1", "Revenue", "1200.00 $")];
        let report = ReportAggregator::default().compare_elements(&source, &target);
        assert_eq!(report.severity, Severity::Warning);
        assert_eq!(report.format_mismatches.len(), 1);
        assert_eq!(report.parity.metrics, Some(1.0));
        assert_eq!(report.summary.format_mismatches, 1);
    }

    #[test]
    fn test_required_unmatched_is_error() {
        let source = vec![ElementDescriptor::new("pay")
            .with_accessible_name("Pay now")
            .required()];
        let report = ReportAggregator::default().compare_elements(&source, &[]);
        assert_eq!(report.severity, Severity::Error);
        assert!(report.has_errors());
        let issue = report.issues_with(Severity::Error).next().unwrap();
        assert_eq!(issue.category, IssueCategory::Element);
        assert!(issue.description.contains("Pay now"));
    }

    #[test]
    fn test_type_mismatch_is_error() {
        let source = vec![metric("g", "Growth", "12%")];
        let target = vec![metric("g", "Growth", "0.12")];
        let report = ReportAggregator::default().compare_elements(&source, &target);
        assert_eq!(report.severity, Severity::Error);
        assert_eq!(report.content.metrics.changed.len(), 1);
    }

    #[test]
    fn test_batch_preserves_order() {
        let a = Snapshot::new(vec![metric("m", "Users", "10")]).with_name("a");
        let b = Snapshot::new(vec![metric("m", "Users", "20")]).with_name("b");
        let pairs = vec![(a.clone(), a.clone()), (b.clone(), a.clone()), (a, b)];
        let reports = ReportAggregator::default().compare_batch(&pairs);
        let names: Vec<_> = reports.iter().map(|r| r.source_name.as_deref()).collect();
        assert_eq!(names, vec![Some("a"), Some("b"), Some("a")]);
        assert_eq!(reports[0].severity, Severity::Ok);
        assert_eq!(reports[1].severity, Severity::Warning);
    }

    #[test]
    fn test_try_new_validates() {
        let config = ComparisonConfig::default().with_changed_credit(2.0);
        assert!(ReportAggregator::try_new(config).is_err());
        assert!(ReportAggregator::try_new(ComparisonConfig::default()).is_ok());
    }
}
