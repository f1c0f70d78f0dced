//! Report output stage.
//!
//! Renders comparison, match and search results in the configured format
//! and writes them to file or stdout.

use super::{auto_detect_format, should_use_color, write_output, OutputTarget};
use crate::compare::CrossAppComparisonReport;
use crate::config::AppConfig;
use crate::matching::{ElementMatchResult, MatchExplanation};
use crate::reports::{create_reporter_with_options, ReportConfig, ReportGenerator};
use crate::search::SearchResponse;
use anyhow::Result;

fn prepare(config: &AppConfig) -> (OutputTarget, Box<dyn ReportGenerator>) {
    let target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &target);
    let use_color = should_use_color(config.output.no_color, &target);
    (target, create_reporter_with_options(format, use_color))
}

/// Output a comparison report to the configured destination.
pub fn output_report(
    config: &AppConfig,
    report: &CrossAppComparisonReport,
    report_config: &ReportConfig,
) -> Result<()> {
    let (target, reporter) = prepare(config);
    let rendered = reporter.generate_comparison_report(report, report_config)?;
    write_output(&rendered, &target, config.behavior.quiet)
}

/// Output an element matching result to the configured destination.
pub fn output_matches(
    config: &AppConfig,
    result: &ElementMatchResult,
    explanations: &[MatchExplanation],
    report_config: &ReportConfig,
) -> Result<()> {
    let (target, reporter) = prepare(config);
    let rendered = reporter.generate_match_report(result, explanations, report_config)?;
    write_output(&rendered, &target, config.behavior.quiet)
}

/// Output a search response to the configured destination.
pub fn output_search(
    config: &AppConfig,
    response: &SearchResponse,
    report_config: &ReportConfig,
) -> Result<()> {
    let (target, reporter) = prepare(config);
    let rendered = reporter.generate_search_report(response, report_config)?;
    write_output(&rendered, &target, config.behavior.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ReportAggregator;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_output_report_to_file_as_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.json");
        let config = AppConfig::builder()
            .output_file(Some(path.clone()))
            .quiet(true)
            .build();
        let report = ReportAggregator::default().compare_elements(&[], &[]);

        output_report(&config, &report, &ReportConfig::default()).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["report"]["severity"], "ok");
    }

    #[test]
    fn test_output_summary_to_file_has_no_color() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.txt");
        let config = AppConfig::builder()
            .output_file(Some(path.clone()))
            .output_format(ReportFormat::Summary)
            .quiet(true)
            .build();

        output_search(&config, &SearchResponse::default(), &ReportConfig::default()).unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("No results"));
        assert!(!written.contains('\x1b'));
    }
}
