//! Shared matching vocabulary: strategies, candidates, explanations and
//! the assignment abstraction.

use serde::{Deserialize, Serialize};

/// Named scoring heuristic that produced a candidate score.
///
/// Declaration order is the tie-break order when two strategies yield the
/// same score for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum MatchStrategy {
    /// Case-insensitive accessible name equality
    AccessibleNameExact,
    /// Normalized visible text equality
    TextExact,
    /// Jaro-Winkler similarity of normalized visible text
    TextFuzzy,
    /// Same role and nearby centers
    Spatial,
    /// Equal normalized data values
    Value,
    /// No strategy applied; only accepted at a zero threshold
    None,
}

impl MatchStrategy {
    /// All scoring strategies in evaluation order
    pub const ALL: [Self; 5] = [
        Self::AccessibleNameExact,
        Self::TextExact,
        Self::TextFuzzy,
        Self::Spatial,
        Self::Value,
    ];

    /// Stable label used in reports
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AccessibleNameExact => "accessible-name-exact",
            Self::TextExact => "text-exact",
            Self::TextFuzzy => "text-fuzzy",
            Self::Spatial => "spatial",
            Self::Value => "value",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Scored `(source, target)` index pair produced while scoring all pairs.
///
/// Transient: candidates are consumed by an [`Assigner`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate {
    pub source_index: usize,
    pub target_index: usize,
    pub score: f64,
    pub strategy: MatchStrategy,
}

impl MatchCandidate {
    #[must_use]
    pub const fn new(
        source_index: usize,
        target_index: usize,
        score: f64,
        strategy: MatchStrategy,
    ) -> Self {
        Self {
            source_index,
            target_index,
            score,
            strategy,
        }
    }
}

/// Resolves scored candidates into a partial injection.
///
/// Implementations receive candidates that already passed the threshold
/// and must never use a source or target index twice. Callers rely only on
/// that contract, so the algorithm can be swapped without touching them.
pub trait Assigner: Send + Sync {
    /// Select a conflict-free subset of `candidates`.
    fn assign(&self, candidates: Vec<MatchCandidate>) -> Vec<MatchCandidate>;

    /// Name of this assigner for logging.
    fn name(&self) -> &'static str;
}

/// One strategy's contribution to a pair score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponent {
    pub strategy: MatchStrategy,
    /// Weight applied to the raw score
    pub weight: f64,
    /// Raw score before weighting, `None` when the strategy was skipped
    pub raw_score: Option<f64>,
    /// Weighted score
    pub weighted_score: f64,
    /// What was compared
    pub description: String,
}

/// Human-readable explanation of why two elements matched (or didn't).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchExplanation {
    pub source_id: String,
    pub target_id: String,
    /// Winning strategy, `MatchStrategy::None` when nothing applied
    pub strategy: MatchStrategy,
    /// Maximum weighted score across strategies
    pub score: f64,
    /// Threshold the score was compared against
    pub threshold: f64,
    /// Whether the pair clears the threshold
    pub is_match: bool,
    pub score_breakdown: Vec<ScoreComponent>,
}

impl MatchExplanation {
    /// Generate a one-line summary of the decision.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_match {
            format!(
                "MATCH ({:.0}% confidence via {}): '{}' -> '{}'",
                self.score * 100.0,
                self.strategy,
                self.source_id,
                self.target_id
            )
        } else {
            format!(
                "NO MATCH: '{}' vs '{}' (score {:.2} below threshold {:.2})",
                self.source_id, self.target_id, self.score, self.threshold
            )
        }
    }

    /// Generate a detailed multi-line explanation.
    #[must_use]
    pub fn detailed(&self) -> String {
        let mut lines = vec![self.summary()];

        if !self.score_breakdown.is_empty() {
            lines.push("Score breakdown:".to_string());
            for component in &self.score_breakdown {
                let line = match component.raw_score {
                    Some(raw) => format!(
                        "  - {}: {:.2} x {:.2} = {:.2} ({})",
                        component.strategy,
                        raw,
                        component.weight,
                        component.weighted_score,
                        component.description
                    ),
                    None => format!(
                        "  - {}: skipped ({})",
                        component.strategy, component.description
                    ),
                };
                lines.push(line);
            }
        }

        lines.join("\n")
    }
}

impl std::fmt::Display for MatchExplanation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}
