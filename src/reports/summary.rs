//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::compare::CrossAppComparisonReport;
use crate::error::Result;
use crate::matching::{ElementMatchResult, MatchExplanation};
use crate::model::Severity;
use crate::search::SearchResponse;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Ok => "green",
        Severity::Warning => "yellow",
        Severity::Error => "red",
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn header(&self, lines: &mut Vec<String>, title: &str) {
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_comparison_report(
        &self,
        report: &CrossAppComparisonReport,
        config: &ReportConfig,
    ) -> Result<String> {
        let mut lines = Vec::new();
        let title = config.title.as_deref().unwrap_or("UI Parity Summary");
        self.header(&mut lines, title);

        let source = report.source_name.as_deref().unwrap_or("source");
        let target = report.target_name.as_deref().unwrap_or("target");
        lines.push(format!("{}  {source} → {target}", self.color("Apps:", "cyan")));

        let summary = &report.summary;
        lines.push(format!(
            "{}  {} → {} elements, {} matched",
            self.color("Size:", "cyan"),
            summary.source_elements,
            summary.target_elements,
            summary.matched_elements
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Severity:", "cyan"),
            self.color(report.severity.as_str(), severity_color(report.severity))
        ));

        lines.push(String::new());
        lines.push(self.color("Parity:", "bold"));
        lines.push(format!(
            "  {:<12} {}",
            "overall",
            self.color(&percent(report.parity.overall), "bold")
        ));
        for (name, value) in report.parity.categories() {
            lines.push(format!("  {name:<12} {}", percent(value)));
        }

        lines.push(String::new());
        lines.push(self.color("Differences:", "bold"));
        let counts = [
            (summary.unmatched_source, "only in source", "red"),
            (summary.unmatched_target, "only in target", "green"),
            (summary.changes, "changed", "yellow"),
            (summary.format_mismatches, "format mismatches", "yellow"),
            (summary.layout_differences, "layout differences", "yellow"),
        ];
        let mut any = false;
        for (count, label, color) in counts {
            if count > 0 {
                any = true;
                lines.push(format!("  {} {label}", self.color(&count.to_string(), color)));
            }
        }
        if !any {
            lines.push(format!("  {}", self.color("No differences", "dim")));
        }

        if !report.issues.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "{} {} errors, {} warnings",
                self.color("Issues:", "bold"),
                summary.errors,
                summary.warnings
            ));
            let limit = config.max_issues.unwrap_or(usize::MAX);
            for issue in report.issues.iter().take(limit) {
                lines.push(format!(
                    "  {} [{}] {}",
                    self.color(issue.severity.as_str(), severity_color(issue.severity)),
                    issue.category,
                    issue.description
                ));
            }
            if report.issues.len() > limit {
                lines.push(format!(
                    "  {}",
                    self.color(&format!("... and {} more", report.issues.len() - limit), "dim")
                ));
            }
        }

        Ok(lines.join("\n") + "\n")
    }

    fn generate_match_report(
        &self,
        result: &ElementMatchResult,
        explanations: &[MatchExplanation],
        config: &ReportConfig,
    ) -> Result<String> {
        let mut lines = Vec::new();
        let title = config.title.as_deref().unwrap_or("Element Matches");
        self.header(&mut lines, title);

        for pair in &result.matched_pairs {
            lines.push(format!(
                "  {} → {}  {} via {}",
                pair.source_id,
                pair.target_id,
                self.color(&percent(pair.confidence), "cyan"),
                pair.strategy
            ));
        }
        if result.matched_pairs.is_empty() {
            lines.push(format!("  {}", self.color("No matches", "dim")));
        }

        if !result.unmatched_source_ids.is_empty() {
            lines.push(format!(
                "{} {}",
                self.color("Only in source:", "red"),
                result.unmatched_source_ids.join(", ")
            ));
        }
        if !result.unmatched_target_ids.is_empty() {
            lines.push(format!(
                "{} {}",
                self.color("Only in target:", "green"),
                result.unmatched_target_ids.join(", ")
            ));
        }

        if !explanations.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Explanations:", "bold"));
            for explanation in explanations {
                lines.push(format!("  {}", explanation.summary()));
            }
        }

        Ok(lines.join("\n") + "\n")
    }

    fn generate_search_report(
        &self,
        response: &SearchResponse,
        _config: &ReportConfig,
    ) -> Result<String> {
        let mut lines = Vec::new();
        self.header(&mut lines, &format!("Search: \"{}\"", response.query));

        for (rank, result) in response.results.iter().enumerate() {
            lines.push(format!(
                "  {}. {}  {}",
                rank + 1,
                result.element_id,
                self.color(&percent(result.score), "cyan")
            ));
            if !result.match_reasons.is_empty() {
                lines.push(format!(
                    "     {}",
                    self.color(&result.match_reasons.join("; "), "dim")
                ));
            }
        }
        if response.results.is_empty() {
            lines.push(format!("  {}", self.color("No results", "dim")));
        }
        lines.push(self.color(
            &format!("{} elements scanned", response.scanned_count),
            "dim",
        ));

        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ReportAggregator;
    use crate::matching::ElementMatcher;
    use crate::model::{ContentRole, ElementDescriptor};

    fn heading(id: &str, text: &str) -> ElementDescriptor {
        ElementDescriptor::new(id)
            .with_content_role(ContentRole::Heading)
            .with_text(text)
    }

    #[test]
    fn test_comparison_summary_without_color() {
        let source = vec![heading("a", "Overview"), heading("b", "Billing")];
        let target = vec![heading("x", "Overview")];
        let report = ReportAggregator::default().compare_elements(&source, &target);

        let text = SummaryReporter::new()
            .no_color()
            .generate_comparison_report(&report, &ReportConfig::default())
            .unwrap();

        assert!(text.starts_with("UI Parity Summary\n"));
        assert!(text.contains("Severity:  warning"));
        assert!(text.contains("1 only in source"));
        assert!(text.contains("headings"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_issue_limit() {
        let source: Vec<_> = (0..5)
            .map(|i| heading(&format!("h{i}"), &format!("Section number {i}")))
            .collect();
        let report = ReportAggregator::default().compare_elements(&source, &[]);
        let config = ReportConfig {
            max_issues: Some(2),
            ..ReportConfig::default()
        };

        let text = SummaryReporter::new()
            .no_color()
            .generate_comparison_report(&report, &config)
            .unwrap();
        assert!(text.contains("more"));
    }

    #[test]
    fn test_match_summary() {
        let source = vec![ElementDescriptor::new("a").with_text("Save")];
        let target = vec![
            ElementDescriptor::new("b").with_text("Save"),
            ElementDescriptor::new("c").with_text("Delete account"),
        ];
        let result = ElementMatcher::default().match_elements(&source, &target);

        let text = SummaryReporter::new()
            .no_color()
            .generate_match_report(&result, &[], &ReportConfig::default())
            .unwrap();
        assert!(text.contains("a → b"));
        assert!(text.contains("Only in target: c"));
    }

    #[test]
    fn test_colored_output() {
        let text = SummaryReporter::new()
            .generate_search_report(&SearchResponse::default(), &ReportConfig::default())
            .unwrap();
        assert!(text.contains("\x1b[1m"));
        assert!(text.contains("No results"));
    }
}
