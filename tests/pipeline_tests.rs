//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full load → compare → report pipeline,
//! error handling paths, and CLI command handlers with real fixture files.

use std::path::{Path, PathBuf};
use ui_parity::cli::{run_compare, run_match, run_search};
use ui_parity::pipeline::{
    auto_detect_format, exit_codes, load_snapshot, output_report, parse_snapshot_str,
    write_output, OutputTarget,
};
use ui_parity::reports::{ReportConfig, ReportFormat};
use ui_parity::{AppConfig, ParityError, ReportAggregator, SearchQuery};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn json_config(output: &Path) -> AppConfig {
    AppConfig::builder()
        .output_format(ReportFormat::Json)
        .output_file(Some(output.to_path_buf()))
        .quiet(true)
        .build()
}

fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("output file should exist");
    serde_json::from_str(&content).expect("output should be valid JSON")
}

// ============================================================================
// Load Stage Tests
// ============================================================================

mod load_stage {
    use super::*;

    #[test]
    fn load_named_fixture() {
        let loaded = load_snapshot(&fixture_path("legacy_dashboard.json"), true)
            .expect("load should succeed");

        assert_eq!(loaded.snapshot.name.as_deref(), Some("legacy-dashboard"));
        assert_eq!(loaded.snapshot.element_count(), 8);
        assert!(loaded.snapshot.viewport.is_some());
        assert!(loaded.display_path().ends_with("legacy_dashboard.json"));
    }

    #[test]
    fn unnamed_snapshot_takes_file_stem() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("checkout-page.json");
        std::fs::write(&path, r#"[{"id": "pay", "role": "button", "text": "Pay"}]"#)
            .expect("write temp file");

        let loaded = load_snapshot(&path, true).expect("load should succeed");
        assert_eq!(loaded.snapshot.name.as_deref(), Some("checkout-page"));
    }

    #[test]
    fn missing_file_returns_error() {
        let path = PathBuf::from("/nonexistent/path/to/snapshot.json");
        let result = load_snapshot(&path, true);

        let msg = format!("{:#}", result.err().expect("missing file should fail"));
        assert!(
            msg.contains("nonexistent"),
            "Error message should mention the path: {msg}"
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("dupes.json");
        std::fs::write(&path, r#"[{"id": "a", "text": "One"}, {"id": "a", "text": "Two"}]"#)
            .expect("write temp file");

        let err = load_snapshot(&path, true).expect_err("duplicate ids should fail");
        let parity_error = err
            .downcast_ref::<ParityError>()
            .expect("root cause should be a ParityError");
        assert!(parity_error.to_string().contains("snapshot"));
        assert!(format!("{err:#}").contains("Duplicate element id 'a'"));
    }

    #[test]
    fn elements_without_ids_load() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("anonymous.json");
        std::fs::write(&path, r#"[{"text":"Save"},{"text":"Cancel"}]"#).expect("write temp file");

        let loaded = load_snapshot(&path, true).expect("id-less elements should load");
        let ids: Vec<_> = loaded.snapshot.elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["#0", "#1"]);
    }

    #[test]
    fn invalid_content_is_rejected() {
        assert!(parse_snapshot_str(r#"{"elements": 5}"#).is_err());
        assert!(parse_snapshot_str("not json").is_err());
        assert!(parse_snapshot_str("   ").is_err());
        assert!(parse_snapshot_str("[]").is_ok());
    }
}

// ============================================================================
// Report Stage Tests
// ============================================================================

mod report_stage {
    use super::*;

    #[test]
    fn json_report_envelope() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let output = dir.path().join("report.json");
        let config = json_config(&output);

        let source = load_snapshot(&fixture_path("legacy_dashboard.json"), true).expect("load");
        let target = load_snapshot(&fixture_path("rewrite_dashboard.json"), true).expect("load");
        let report = ReportAggregator::default().compare(&source.snapshot, &target.snapshot);
        let report_config = ReportConfig::from_output(&config.output)
            .with_paths(Some(source.display_path()), Some(target.display_path()));

        output_report(&config, &report, &report_config).expect("output should succeed");

        let json = read_json(&output);
        assert_eq!(json["metadata"]["tool"]["name"], "ui-parity");
        assert_eq!(json["source"]["name"], "legacy-dashboard");
        assert_eq!(json["source"]["elementCount"], 8);
        assert_eq!(json["target"]["name"], "rewrite-dashboard");
        assert_eq!(json["report"]["severity"], "warning");
        assert_eq!(json["report"]["summary"]["matchedElements"], 7);
    }

    #[test]
    fn auto_format_is_json_for_files() {
        let target = OutputTarget::File(PathBuf::from("report.out"));
        assert_eq!(
            auto_detect_format(ReportFormat::Auto, &target),
            ReportFormat::Json
        );
        assert_eq!(
            auto_detect_format(ReportFormat::Summary, &target),
            ReportFormat::Summary
        );
    }

    #[test]
    fn write_output_to_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("out.txt");
        write_output("hello", &OutputTarget::File(path.clone()), true).expect("write");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "hello");
    }
}

// ============================================================================
// CLI Handler Tests
// ============================================================================

mod cli_handlers {
    use super::*;

    #[test]
    fn compare_fixtures_exit_codes() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let output = dir.path().join("report.json");
        let source = fixture_path("legacy_dashboard.json");
        let target = fixture_path("rewrite_dashboard.json");

        let config = json_config(&output);
        let code = run_compare(&config, &source, &target).expect("compare should succeed");
        assert_eq!(code, exit_codes::SUCCESS);

        let mut strict = json_config(&output);
        strict.behavior.fail_on_warning = true;
        let code = run_compare(&strict, &source, &target).expect("compare should succeed");
        assert_eq!(code, exit_codes::WARNINGS);

        let mut gated = json_config(&output);
        gated.behavior.min_parity = Some(0.99);
        let code = run_compare(&gated, &source, &target).expect("compare should succeed");
        assert_eq!(code, exit_codes::PARITY_FAILURE);
    }

    #[test]
    fn compare_summary_output() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let output = dir.path().join("report.txt");
        let config = AppConfig::builder()
            .output_format(ReportFormat::Summary)
            .output_file(Some(output.clone()))
            .quiet(true)
            .build();

        run_compare(
            &config,
            &fixture_path("legacy_dashboard.json"),
            &fixture_path("rewrite_dashboard.json"),
        )
        .expect("compare should succeed");

        let text = std::fs::read_to_string(output).expect("read summary");
        assert!(text.contains("UI Parity Summary"));
        assert!(text.contains("legacy-dashboard → rewrite-dashboard"));
        assert!(!text.contains('\x1b'), "file output should not be colored");
    }

    #[test]
    fn compare_rejects_invalid_threshold() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut config = json_config(&dir.path().join("report.json"));
        config.comparison.matching.match_threshold = 1.5;

        let result = run_compare(
            &config,
            &fixture_path("legacy_dashboard.json"),
            &fixture_path("rewrite_dashboard.json"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn match_fixtures() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let output = dir.path().join("matches.json");
        let config = json_config(&output);

        let code = run_match(
            &config,
            &fixture_path("legacy_dashboard.json"),
            &fixture_path("rewrite_dashboard.json"),
        )
        .expect("match should succeed");
        assert_eq!(code, exit_codes::SUCCESS);

        let json = read_json(&output);
        assert_eq!(json["result"]["matchedPairs"].as_array().map(Vec::len), Some(7));
        assert_eq!(json["result"]["unmatchedSourceIds"][0], "btn-print");
        assert!(json.get("explanations").is_none());
    }

    #[test]
    fn search_fixture_with_role_filter() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let output = dir.path().join("search.json");
        let config = json_config(&output);
        let snapshot = fixture_path("rewrite_dashboard.json");

        let query = SearchQuery::new("home").with_role("link");
        let code = run_search(&config, &snapshot, &query).expect("search should succeed");
        assert_eq!(code, exit_codes::SUCCESS);

        let json = read_json(&output);
        assert_eq!(json["response"]["bestMatch"]["elementId"], "link-home");
        assert_eq!(json["response"]["scannedCount"], 2);

        let query = SearchQuery::new("home").with_role("checkbox");
        let code = run_search(&config, &snapshot, &query).expect("search should succeed");
        assert_eq!(code, exit_codes::WARNINGS);
    }
}
