//! Search command handler.
//!
//! Implements the `search` subcommand for ranking the elements of one
//! snapshot against a free-text query.

use crate::config::{AppConfig, Validatable};
use crate::pipeline::{exit_codes, load_snapshot, output_search};
use crate::reports::ReportConfig;
use crate::search::{SearchEngine, SearchQuery};
use anyhow::Result;
use std::path::Path;

/// Run the search command.
///
/// Returns exit code 1 when nothing matched the query.
pub fn run_search(config: &AppConfig, snapshot: &Path, query: &SearchQuery) -> Result<i32> {
    let errors = config.comparison.search.validate();
    if let Some(error) = errors.first() {
        anyhow::bail!("Invalid search configuration: {error}");
    }

    let loaded = load_snapshot(snapshot, config.behavior.quiet)?;
    let engine = SearchEngine::new(
        config.comparison.search.clone(),
        config.comparison.synonyms.clone(),
    );
    let response = engine.search(&loaded.snapshot.elements, query);

    let report_config =
        ReportConfig::from_output(&config.output).with_paths(Some(loaded.display_path()), None);
    output_search(config, &response, &report_config)?;

    Ok(if response.results.is_empty() {
        exit_codes::WARNINGS
    } else {
        exit_codes::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_search() {
        let tmp = TempDir::new().unwrap();
        let snapshot = tmp.path().join("app.json");
        let output = tmp.path().join("results.json");
        std::fs::write(
            &snapshot,
            r#"[
                {"id": "btn-login", "role": "button", "text": "Sign in"},
                {"id": "lnk-help", "role": "link", "text": "Help"}
            ]"#,
        )
        .unwrap();

        let config = AppConfig::builder()
            .output_file(Some(output.clone()))
            .quiet(true)
            .build();

        let code = run_search(&config, &snapshot, &SearchQuery::new("sign in")).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["response"]["bestMatch"]["elementId"], "btn-login");

        let code = run_search(&config, &snapshot, &SearchQuery::new("")).unwrap();
        assert_eq!(code, exit_codes::WARNINGS);
    }
}
