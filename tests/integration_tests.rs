//! Integration tests for ui-parity
//!
//! These tests verify end-to-end behavior of element matching, value
//! normalization, the content comparators and the aggregated report.

use ui_parity::{
    compare::{compare_headings, compare_labels, compare_metrics, IssueCategory},
    matching::{MatchStrategy, OptimalAssigner},
    model::ContentRole,
    pipeline::{determine_exit_code, exit_codes, load_snapshot},
    AppConfig, AssignmentMethod, DataType, ElementDescriptor, ElementMatcher, MatchConfig,
    ReportAggregator, SearchEngine, SearchQuery, Severity,
};
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn metric(id: &str, label: &str, value: &str) -> ElementDescriptor {
    ElementDescriptor::new(id)
        .with_content_role(ContentRole::Metric)
        .with_label(label)
        .with_value(value)
}

fn heading(id: &str, text: &str) -> ElementDescriptor {
    ElementDescriptor::new(id)
        .with_content_role(ContentRole::Heading)
        .with_text(text)
}

fn label(id: &str, text: &str) -> ElementDescriptor {
    ElementDescriptor::new(id)
        .with_tag_name("label")
        .with_text(text)
}

// ============================================================================
// Element Matching
// ============================================================================

mod element_matching {
    use super::*;

    #[test]
    fn test_accessible_name_is_case_insensitive() {
        let source = vec![ElementDescriptor::new("a").with_accessible_name("Submit")];
        let target = vec![ElementDescriptor::new("b").with_accessible_name("submit")];

        let result = ElementMatcher::new(MatchConfig::default()).match_elements(&source, &target);

        assert_eq!(result.matched_pairs.len(), 1);
        let pair = &result.matched_pairs[0];
        assert_eq!(pair.source_id, "a");
        assert_eq!(pair.target_id, "b");
        assert_eq!(pair.strategy, MatchStrategy::AccessibleNameExact);
        assert!((pair.confidence - 1.0).abs() < f64::EPSILON);
        assert!(result.unmatched_source_ids.is_empty());
        assert!(result.unmatched_target_ids.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let matcher = ElementMatcher::new(MatchConfig::default());
        let some = vec![ElementDescriptor::new("x").with_text("Hello")];

        let result = matcher.match_elements(&[], &some);
        assert!(result.matched_pairs.is_empty());
        assert_eq!(result.unmatched_target_ids, vec!["x"]);

        let result = matcher.match_elements(&some, &[]);
        assert!(result.matched_pairs.is_empty());
        assert_eq!(result.unmatched_source_ids, vec!["x"]);
    }

    #[test]
    fn test_zero_threshold_pairs_everything_it_can() {
        let source: Vec<_> = (0..4)
            .map(|i| ElementDescriptor::new(format!("s{i}")).with_text(format!("alpha {i}")))
            .collect();
        let target: Vec<_> = (0..3)
            .map(|i| ElementDescriptor::new(format!("t{i}")).with_text(format!("omega {i}")))
            .collect();

        let matcher = ElementMatcher::new(MatchConfig::default().with_threshold(0.0));
        let result = matcher.match_elements(&source, &target);

        assert_eq!(result.matched_pairs.len(), 3);
        assert_eq!(result.unmatched_source_ids.len(), 1);
        assert!(result.unmatched_target_ids.is_empty());
    }

    #[test]
    fn test_threshold_above_one_matches_nothing() {
        let source = vec![ElementDescriptor::new("a").with_accessible_name("Save")];
        let target = vec![ElementDescriptor::new("b").with_accessible_name("Save")];

        let matcher = ElementMatcher::new(MatchConfig::default().with_threshold(1.01));
        let result = matcher.match_elements(&source, &target);

        assert!(result.matched_pairs.is_empty());
        assert_eq!(result.unmatched_source_ids, vec!["a"]);
        assert_eq!(result.unmatched_target_ids, vec!["b"]);
    }

    #[test]
    fn test_matching_is_deterministic() {
        let source: Vec<_> = ["Save", "Save draft", "Cancel", "Delete"]
            .iter()
            .enumerate()
            .map(|(i, t)| ElementDescriptor::new(format!("s{i}")).with_text(*t))
            .collect();
        let target: Vec<_> = ["Save", "Save drafts", "Cancel order", "Remove"]
            .iter()
            .enumerate()
            .map(|(i, t)| ElementDescriptor::new(format!("t{i}")).with_text(*t))
            .collect();

        let matcher = ElementMatcher::new(MatchConfig::default());
        let first = matcher.match_elements(&source, &target);
        for _ in 0..5 {
            assert_eq!(matcher.match_elements(&source, &target), first);
        }
    }

    #[test]
    fn test_optimal_assigner_seam() {
        let source = vec![
            ElementDescriptor::new("s0").with_text("Submit order"),
            ElementDescriptor::new("s1").with_text("Submit"),
        ];
        let target = vec![
            ElementDescriptor::new("t0").with_text("Submit"),
            ElementDescriptor::new("t1").with_text("Submit orders"),
        ];

        let via_config = ElementMatcher::new(
            MatchConfig::default().with_assignment(AssignmentMethod::Optimal),
        )
        .match_elements(&source, &target);
        let via_seam = ElementMatcher::new(MatchConfig::default())
            .with_assigner(Arc::new(OptimalAssigner))
            .match_elements(&source, &target);

        assert_eq!(via_config, via_seam);
        assert_eq!(via_config.matched_pairs.len(), 2);
    }
}

// ============================================================================
// Content Comparison
// ============================================================================

mod content_comparison {
    use super::*;

    #[test]
    fn test_currency_forms_are_equal_values() {
        let source = vec![metric("m1", "Total", "$1,200.00")];
        let target = vec![metric("m2", "Total", "1200.00 $")];

        let comparison = compare_metrics(&source, &target, 0.8, 0.5);

        assert_eq!(comparison.matched.len(), 1);
        assert!(comparison.changed.is_empty());
        let pair = &comparison.matched[0];
        assert!(pair.values_match);
        assert!(!pair.formats_match);
        assert_eq!(pair.source_type, DataType::Currency);
        assert_eq!(pair.target_type, DataType::Currency);
        assert_eq!(comparison.parity, Some(1.0));
    }

    #[test]
    fn test_changed_metric_gets_partial_credit() {
        let source = vec![metric("m1", "Revenue", "$1,200.00")];
        let target = vec![metric("m2", "Revenue", "$1,250.00")];

        let comparison = compare_metrics(&source, &target, 0.8, 0.5);

        assert!(comparison.matched.is_empty());
        assert_eq!(comparison.changed.len(), 1);
        assert_eq!(comparison.parity, Some(0.5));
    }

    #[test]
    fn test_near_identical_headings_pair() {
        let source = vec![heading("h1", "Overview"), heading("h2", "Settings")];
        let target = vec![heading("h3", "Overview"), heading("h4", "Setting")];

        let comparison = compare_headings(&source, &target, 0.75, 0.5);

        assert_eq!(comparison.matched.len(), 2);
        assert!(comparison.source_only.is_empty());
        assert!(comparison.target_only.is_empty());
        assert!(comparison.matched.iter().any(|m| m.exact));
        assert!(comparison.matched.iter().any(|m| !m.exact));
    }

    #[test]
    fn test_disjoint_labels_have_zero_parity() {
        let source = vec![label("l1", "Email address"), label("l2", "Password")];
        let target = vec![label("l3", "Quantity"), label("l4", "Zip")];

        let comparison = compare_labels(&source, &target, 0.75, 0.5);

        assert!(comparison.matched.is_empty());
        assert_eq!(comparison.source_only.len(), 2);
        assert_eq!(comparison.target_only.len(), 2);
        assert_eq!(comparison.parity, Some(0.0));
    }

    #[test]
    fn test_absent_category_has_no_parity() {
        let comparison = compare_labels(&[], &[], 0.75, 0.5);
        assert_eq!(comparison.parity, None);
    }
}

// ============================================================================
// Aggregated Reports
// ============================================================================

mod aggregated_report {
    use super::*;

    fn fixture_report() -> ui_parity::CrossAppComparisonReport {
        let source = load_snapshot(&fixture_path("legacy_dashboard.json"), true)
            .expect("source fixture should load");
        let target = load_snapshot(&fixture_path("rewrite_dashboard.json"), true)
            .expect("target fixture should load");
        ReportAggregator::default().compare(&source.snapshot, &target.snapshot)
    }

    #[test]
    fn test_fixture_element_matches() {
        let report = fixture_report();

        assert_eq!(report.source_name.as_deref(), Some("legacy-dashboard"));
        assert_eq!(report.target_name.as_deref(), Some("rewrite-dashboard"));
        assert_eq!(report.summary.matched_elements, 7);
        assert_eq!(report.element_matches.unmatched_source_ids, vec!["btn-print"]);
        assert_eq!(report.element_matches.unmatched_target_ids, vec!["zoom"]);

        let revenue = report
            .element_matches
            .matched_pairs
            .iter()
            .find(|p| p.source_id == "revenue")
            .expect("revenue should be matched");
        assert_eq!(revenue.target_id, "kpi-revenue");
        assert_eq!(revenue.strategy, MatchStrategy::Value);
    }

    #[test]
    fn test_fixture_categories() {
        let report = fixture_report();

        assert_eq!(report.content.headings.matched.len(), 1);
        assert_eq!(report.content.metrics.matched.len(), 1);
        assert_eq!(report.content.statuses.matched.len(), 1);
        assert_eq!(report.parity.metrics, Some(1.0));

        assert_eq!(report.navigation.matched.len(), 2);
        assert!(report.navigation.changed.is_empty());
        assert_eq!(report.parity.navigation, Some(1.0));

        assert_eq!(report.tables.changed.len(), 1);
        let table = &report.tables.changed[0];
        assert_eq!(table.cell_differences.len(), 1);
        assert_eq!(table.cell_differences[0].row, 0);
        assert_eq!(table.cell_differences[0].column, "Amount");

        assert_eq!(report.format_mismatches.len(), 1);
        assert_eq!(report.format_mismatches[0].source_element_id, "revenue");
    }

    #[test]
    fn test_fixture_severity_and_exit_codes() {
        let report = fixture_report();

        assert_eq!(report.severity, Severity::Warning);
        assert!(!report.has_errors());
        assert!(report
            .issues
            .iter()
            .any(|i| i.category == IssueCategory::Format));
        assert!(report.parity.overall < 1.0);

        let config = AppConfig::default();
        assert_eq!(
            determine_exit_code(&config.behavior, &report),
            exit_codes::SUCCESS
        );

        let strict = AppConfig::builder().fail_on_warning(true).build();
        assert_eq!(
            determine_exit_code(&strict.behavior, &report),
            exit_codes::WARNINGS
        );

        let gated = AppConfig::builder().min_parity(Some(0.99)).build();
        assert_eq!(
            determine_exit_code(&gated.behavior, &report),
            exit_codes::PARITY_FAILURE
        );
    }

    #[test]
    fn test_missing_required_element_is_error() {
        let source = vec![
            ElementDescriptor::new("pay")
                .with_role("button")
                .with_text("Pay now")
                .required(),
        ];
        let report = ReportAggregator::default().compare_elements(&source, &[]);

        assert_eq!(report.severity, Severity::Error);
        assert!(report.has_errors());
    }

    #[test]
    fn test_identical_snapshots_are_ok() {
        let source = load_snapshot(&fixture_path("legacy_dashboard.json"), true)
            .expect("fixture should load")
            .into_snapshot();

        let report = ReportAggregator::default().compare(&source, &source);

        assert_eq!(report.severity, Severity::Ok);
        assert!(report.issues.is_empty());
        assert!((report.parity.overall - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_batch_preserves_order() {
        let a = load_snapshot(&fixture_path("legacy_dashboard.json"), true)
            .expect("fixture should load")
            .into_snapshot();
        let b = load_snapshot(&fixture_path("rewrite_dashboard.json"), true)
            .expect("fixture should load")
            .into_snapshot();

        let reports = ReportAggregator::default()
            .compare_batch(&[(a.clone(), a.clone()), (a.clone(), b.clone())]);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].severity, Severity::Ok);
        assert_eq!(reports[1].severity, Severity::Warning);
    }
}

// ============================================================================
// Search
// ============================================================================

mod search {
    use super::*;

    #[test]
    fn test_search_fixture_by_text() {
        let snapshot = load_snapshot(&fixture_path("rewrite_dashboard.json"), true)
            .expect("fixture should load")
            .into_snapshot();
        let engine = SearchEngine::default();

        let response = engine.search(&snapshot.elements, &SearchQuery::new("export csv"));

        let best = response.best_match.expect("export button should be found");
        assert_eq!(best.element_id, "export");
        assert_eq!(response.scanned_count, snapshot.elements.len());
    }
}
