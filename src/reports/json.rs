//! JSON report generator.

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::compare::CrossAppComparisonReport;
use crate::error::{ParityError, ReportErrorKind, Result};
use crate::matching::{ElementMatchResult, MatchExplanation};
use crate::search::SearchResponse;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, value: &T, config: &ReportConfig) -> Result<String> {
        let json = if self.pretty && config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map_err(|e| {
            ParityError::report(
                "JSON rendering",
                ReportErrorKind::JsonSerializationError(e.to_string()),
            )
        })
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_comparison_report(
        &self,
        report: &CrossAppComparisonReport,
        config: &ReportConfig,
    ) -> Result<String> {
        let document = JsonComparisonReport {
            metadata: JsonReportMetadata::new(config),
            source: SnapshotInfo {
                name: report.source_name.clone(),
                file_path: config.metadata.source_path.clone(),
                element_count: report.summary.source_elements,
            },
            target: SnapshotInfo {
                name: report.target_name.clone(),
                file_path: config.metadata.target_path.clone(),
                element_count: report.summary.target_elements,
            },
            report,
        };
        self.render(&document, config)
    }

    fn generate_match_report(
        &self,
        result: &ElementMatchResult,
        explanations: &[MatchExplanation],
        config: &ReportConfig,
    ) -> Result<String> {
        let document = JsonMatchReport {
            metadata: JsonReportMetadata::new(config),
            result,
            explanations,
        };
        self.render(&document, config)
    }

    fn generate_search_report(
        &self,
        response: &SearchResponse,
        config: &ReportConfig,
    ) -> Result<String> {
        let document = JsonSearchReport {
            metadata: JsonReportMetadata::new(config),
            response,
        };
        self.render(&document, config)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON report structures

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "std::collections::HashMap::is_empty")]
    custom: std::collections::HashMap<String, String>,
}

impl JsonReportMetadata {
    fn new(config: &ReportConfig) -> Self {
        Self {
            tool: ToolInfo {
                name: "ui-parity".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            generated_at: config
                .metadata
                .generated_at
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339()),
            title: config.title.clone(),
            custom: config.metadata.custom.clone(),
        }
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    element_count: usize,
}

#[derive(Serialize)]
struct JsonComparisonReport<'a> {
    metadata: JsonReportMetadata,
    source: SnapshotInfo,
    target: SnapshotInfo,
    report: &'a CrossAppComparisonReport,
}

#[derive(Serialize)]
struct JsonMatchReport<'a> {
    metadata: JsonReportMetadata,
    result: &'a ElementMatchResult,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    explanations: &'a [MatchExplanation],
}

#[derive(Serialize)]
struct JsonSearchReport<'a> {
    metadata: JsonReportMetadata,
    response: &'a SearchResponse,
}
