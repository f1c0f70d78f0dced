//! Pipeline orchestration for CLI operations.
//!
//! Shared load → compare → report logic, kept out of the command handlers
//! so it can be tested without a process boundary.

mod output;
mod parse;
mod report_stage;

pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use parse::{load_snapshot, parse_snapshot_str, LoadedSnapshot};
pub use report_stage::{output_matches, output_report, output_search};

use crate::compare::CrossAppComparisonReport;
use crate::config::BehaviorConfig;
use crate::model::Severity;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success, or warnings without `--fail-on-warning`
    pub const SUCCESS: i32 = 0;
    /// Warnings found and `--fail-on-warning` set
    pub const WARNINGS: i32 = 1;
    /// Error severity, or parity below `--min-parity`
    pub const PARITY_FAILURE: i32 = 2;
    /// A runtime error occurred
    pub const ERROR: i32 = 3;
}

/// Map a comparison report onto the process exit code.
#[must_use]
pub fn determine_exit_code(behavior: &BehaviorConfig, report: &CrossAppComparisonReport) -> i32 {
    if report.severity == Severity::Error {
        return exit_codes::PARITY_FAILURE;
    }
    if let Some(min_parity) = behavior.min_parity {
        if report.parity.overall < min_parity {
            return exit_codes::PARITY_FAILURE;
        }
    }
    if behavior.fail_on_warning && report.severity == Severity::Warning {
        return exit_codes::WARNINGS;
    }
    exit_codes::SUCCESS
}
