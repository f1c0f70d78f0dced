//! Report generation for comparison, matching and search results.
//!
//! Two output formats are provided:
//! - JSON: structured data for programmatic integration
//! - Summary: compact, human-readable terminal output

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::compare::CrossAppComparisonReport;
use crate::error::Result;
use crate::matching::{ElementMatchResult, MatchExplanation};
use crate::search::SearchResponse;
use std::io::Write;

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a cross-app comparison report
    fn generate_comparison_report(
        &self,
        report: &CrossAppComparisonReport,
        config: &ReportConfig,
    ) -> Result<String>;

    /// Render an element matching result, optionally with per-pair explanations
    fn generate_match_report(
        &self,
        result: &ElementMatchResult,
        explanations: &[MatchExplanation],
        config: &ReportConfig,
    ) -> Result<String>;

    /// Render a search response
    fn generate_search_report(
        &self,
        response: &SearchResponse,
        config: &ReportConfig,
    ) -> Result<String>;

    /// Write a comparison report to a writer
    fn write_comparison_report(
        &self,
        report: &CrossAppComparisonReport,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let rendered = self.generate_comparison_report(report, config)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
