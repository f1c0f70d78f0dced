//! Match command handler.
//!
//! Implements the `match` subcommand: element correspondence only, with
//! optional per-pair explanations.

use crate::config::AppConfig;
use crate::matching::ElementMatcher;
use crate::pipeline::{exit_codes, load_snapshot, output_matches};
use crate::reports::ReportConfig;
use anyhow::Result;
use std::path::Path;

/// Run the match command, returning the desired exit code.
pub fn run_match(config: &AppConfig, source: &Path, target: &Path) -> Result<i32> {
    let quiet = config.behavior.quiet;
    let matcher = ElementMatcher::try_new(config.comparison.matching.clone())?;

    let source = load_snapshot(source, quiet)?;
    let target = load_snapshot(target, quiet)?;

    let result = matcher.match_snapshots(&source.snapshot, &target.snapshot);
    if !quiet {
        tracing::info!(
            "Matched {} pairs ({} source-only, {} target-only)",
            result.matched_pairs.len(),
            result.unmatched_source_ids.len(),
            result.unmatched_target_ids.len()
        );
    }

    let explanations: Vec<_> = if config.behavior.explain_matches {
        result
            .matched_pairs
            .iter()
            .filter_map(|pair| {
                matcher.explain_pair(
                    &source.snapshot.elements,
                    &target.snapshot.elements,
                    &pair.source_id,
                    &pair.target_id,
                )
            })
            .collect()
    } else {
        Vec::new()
    };

    let report_config = ReportConfig::from_output(&config.output)
        .with_paths(Some(source.display_path()), Some(target.display_path()));
    output_matches(config, &result, &explanations, &report_config)?;

    Ok(exit_codes::SUCCESS)
}
