//! **Semantic UI element matching and cross-application parity comparison.**
//!
//! `ui-parity` takes two independently captured collections of UI element
//! descriptors (a *source* and a *target* snapshot, typically a legacy
//! application and its rewrite) and answers three questions:
//!
//! - **Which elements correspond?** [`ElementMatcher`] scores every
//!   source/target pair with several independent strategies (accessible
//!   name, exact and fuzzy text, position, data value) and resolves a
//!   deterministic one-to-one assignment.
//! - **Do equivalent values agree?** The [`normalize`] module classifies
//!   values (currency, percentages, dates, counts, ...) so that
//!   `"$1,200.00"` and `"1200.00 $"` compare equal.
//! - **How close are the two apps?** [`ReportAggregator`] runs content,
//!   table, navigation, layout and component comparators and folds them into
//!   a [`CrossAppComparisonReport`] with parity scores and issues.
//!
//! The [`search`] module reuses the same scoring machinery to rank elements
//! of one snapshot against a free-text query.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`ElementDescriptor`], [`Snapshot`] and [`Severity`].
//! - **[`matching`]**: string similarity, aliases, [`ElementMatcher`] and
//!   the [`Assigner`](matching::Assigner) seam (greedy or Kuhn-Munkres).
//! - **[`normalize`]**: text folding, data type classification and format
//!   analysis.
//! - **[`compare`]**: the per-category comparators and [`ReportAggregator`].
//! - **[`search`]**: [`SearchEngine`].
//! - **[`config`]**: [`AppConfig`], presets, validation and YAML config files.
//! - **[`pipeline`]** / **[`reports`]**: snapshot loading and report rendering
//!   used by the CLI.
//!
//! ## Getting Started
//!
//! ```
//! use ui_parity::{ElementDescriptor, ReportAggregator, Severity};
//!
//! let source = vec![
//!     ElementDescriptor::new("save").with_role("button").with_text("Save changes"),
//!     ElementDescriptor::new("total").with_label("Total").with_value("$1,200.00"),
//! ];
//! let target = vec![
//!     ElementDescriptor::new("btn-1").with_role("button").with_text("Save changes"),
//!     ElementDescriptor::new("sum").with_label("Total").with_value("1200.00 $"),
//! ];
//!
//! let report = ReportAggregator::default().compare_elements(&source, &target);
//! assert_eq!(report.summary.matched_elements, 2);
//! assert_eq!(report.severity, Severity::Ok);
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `ui-parity` binary wraps this library: `compare`, `match` and
//! `search` load snapshot JSON files and render the result as JSON or a
//! terminal summary.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::similar_names
)]

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod matching;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod reports;
pub mod search;

// Re-export main types for convenience
pub use compare::{ComparisonConfig, CrossAppComparisonReport, ReportAggregator};
pub use config::{AppConfig, AppConfigBuilder, BehaviorConfig, ConfigPreset, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use error::{ParityError, Result};
pub use matching::{
    match_texts, AssignmentMethod, ElementMatchResult, ElementMatcher, MatchConfig, MatchedPair,
    SynonymTable,
};
pub use model::{ElementDescriptor, Severity, Snapshot};
pub use normalize::{classify, normalize, DataType};
pub use reports::{ReportFormat, ReportGenerator};
pub use search::{SearchEngine, SearchQuery, SearchResponse};
