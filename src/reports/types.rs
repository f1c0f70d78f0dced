//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: summary on a terminal, JSON otherwise
    #[default]
    Auto,
    /// Structured JSON output
    Json,
    /// Brief human-readable summary
    Summary,
}

impl ReportFormat {
    /// Resolve `Auto` against whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, is_terminal: bool) -> Self {
        match self {
            Self::Auto if is_terminal => Self::Summary,
            Self::Auto => Self::Json,
            other => other,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Maximum issues listed by human-readable output
    pub max_issues: Option<usize>,
    /// Pretty-print JSON
    pub pretty: bool,
    /// Title for the report
    pub title: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_issues: None,
            pretty: true,
            title: None,
            metadata: ReportMetadata::new(),
        }
    }
}

impl ReportConfig {
    /// Build from the output section of the app configuration.
    #[must_use]
    pub fn from_output(output: &crate::config::OutputConfig) -> Self {
        Self {
            max_issues: output.max_issues,
            pretty: output.pretty,
            ..Self::default()
        }
    }

    /// Set the snapshot paths recorded in the metadata.
    #[must_use]
    pub fn with_paths(mut self, source: Option<String>, target: Option<String>) -> Self {
        self.metadata.source_path = source;
        self.metadata.target_path = target;
        self
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Source snapshot file path
    pub source_path: Option<String>,
    /// Target snapshot file path
    pub target_path: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp
    pub generated_at: Option<String>,
    /// Custom properties
    pub custom: std::collections::HashMap<String, String>,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
