//! Compare command handler.
//!
//! Implements the `compare` subcommand for comparing two app snapshots.

use crate::compare::ReportAggregator;
use crate::config::AppConfig;
use crate::pipeline::{determine_exit_code, load_snapshot, output_report};
use crate::reports::ReportConfig;
use anyhow::Result;
use std::path::Path;

/// Run the compare command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_compare(config: &AppConfig, source: &Path, target: &Path) -> Result<i32> {
    let quiet = config.behavior.quiet;
    let aggregator = ReportAggregator::try_new(config.comparison.clone())?;

    let source = load_snapshot(source, quiet)?;
    let target = load_snapshot(target, quiet)?;

    let report = aggregator.compare(&source.snapshot, &target.snapshot);

    if !quiet {
        tracing::info!(
            "Compared {} source and {} target elements: {} matched, parity {:.1}%, severity {}",
            report.summary.source_elements,
            report.summary.target_elements,
            report.summary.matched_elements,
            report.parity.overall * 100.0,
            report.severity
        );
    }

    let report_config = ReportConfig::from_output(&config.output)
        .with_paths(Some(source.display_path()), Some(target.display_path()));
    output_report(config, &report, &report_config)?;

    Ok(determine_exit_code(&config.behavior, &report))
}
