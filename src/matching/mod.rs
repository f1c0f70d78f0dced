//! Semantic element matching across two independently captured snapshots.
//!
//! Every `(source, target)` pair is scored by five strategies; the pair
//! score is the maximum across strategies, never the sum. Candidates below
//! the threshold are discarded and the rest are resolved into a partial
//! injection by an [`Assigner`].
//!
//! # Example
//!
//! ```
//! use ui_parity::matching::{ElementMatcher, MatchConfig, MatchStrategy};
//! use ui_parity::model::ElementDescriptor;
//!
//! let source = vec![ElementDescriptor::new("a").with_accessible_name("Submit")];
//! let target = vec![ElementDescriptor::new("b").with_accessible_name("submit")];
//!
//! let matcher = ElementMatcher::new(MatchConfig::default());
//! let result = matcher.match_elements(&source, &target);
//! assert_eq!(result.matched_pairs[0].strategy, MatchStrategy::AccessibleNameExact);
//! ```

mod aliases;
mod assignment;
mod config;
pub mod string_similarity;
mod traits;

pub use aliases::{
    element_type_word, generate_aliases, normalize_for_alias, AliasIndex, SynonymGroup,
    SynonymTable, DEFAULT_MAX_ALIASES,
};
pub use assignment::{GreedyAssigner, OptimalAssigner};
pub use config::{AssignmentMethod, MatchConfig, StrategyWeights};
pub use traits::{Assigner, MatchCandidate, MatchExplanation, MatchStrategy, ScoreComponent};

use crate::config::Validatable;
use crate::error::{ParityError, Result};
use crate::model::{ElementDescriptor, Snapshot, Viewport};
use crate::normalize::{extract_value, normalize_text};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use string_similarity::{jaro_winkler, jaro_winkler_with_scale};

// ============================================================================
// Results
// ============================================================================

/// A resolved source/target correspondence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedPair {
    pub source_id: String,
    pub target_id: String,
    pub source_index: usize,
    pub target_index: usize,
    /// Winning strategy score in `[0, 1]`
    pub confidence: f64,
    pub strategy: MatchStrategy,
}

/// Output of [`ElementMatcher::match_elements`].
///
/// No id appears as a source in two pairs, nor as a target in two pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMatchResult {
    /// Pairs in acceptance order
    pub matched_pairs: Vec<MatchedPair>,
    /// Unmatched source ids, in source order
    pub unmatched_source_ids: Vec<String>,
    /// Unmatched target ids, in target order
    pub unmatched_target_ids: Vec<String>,
}

impl ElementMatchResult {
    /// Target index paired with `source_index`, if any.
    #[must_use]
    pub fn target_for(&self, source_index: usize) -> Option<usize> {
        self.matched_pairs
            .iter()
            .find(|p| p.source_index == source_index)
            .map(|p| p.target_index)
    }
}

/// A pair of labels accepted by [`match_texts`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPair {
    pub source_index: usize,
    pub target_index: usize,
    pub score: f64,
    /// Normalized labels are equal
    pub exact: bool,
}

/// Output of [`match_texts`], all in index space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMatchResult {
    pub pairs: Vec<TextPair>,
    pub unmatched_source: Vec<usize>,
    pub unmatched_target: Vec<usize>,
}

// ============================================================================
// Label matching
// ============================================================================

/// Greedy one-to-one matching of two flat label lists.
///
/// Normalized equality scores 1.0, anything else scores the Jaro-Winkler
/// similarity of the normalized labels. Empty labels never match. Pairs
/// below `threshold` are discarded, the rest accepted highest first with
/// ties broken by `(source_index, target_index)`.
#[must_use]
pub fn match_texts<A, B>(source: &[A], target: &[B], threshold: f64) -> TextMatchResult
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let source_norm: Vec<String> = source.iter().map(|s| normalize_text(s.as_ref())).collect();
    let target_norm: Vec<String> = target.iter().map(|t| normalize_text(t.as_ref())).collect();

    let mut candidates = Vec::new();
    for (i, s) in source_norm.iter().enumerate() {
        if s.is_empty() {
            continue;
        }
        for (j, t) in target_norm.iter().enumerate() {
            if t.is_empty() {
                continue;
            }
            let (score, strategy) = if s == t {
                (1.0, MatchStrategy::TextExact)
            } else {
                (jaro_winkler(s, t), MatchStrategy::TextFuzzy)
            };
            if score >= threshold {
                candidates.push(MatchCandidate::new(i, j, score, strategy));
            }
        }
    }

    let accepted = GreedyAssigner.assign(candidates);
    let (unmatched_source, unmatched_target) =
        unmatched_indices(&accepted, source.len(), target.len());

    TextMatchResult {
        pairs: accepted
            .into_iter()
            .map(|c| TextPair {
                source_index: c.source_index,
                target_index: c.target_index,
                score: c.score,
                exact: c.strategy == MatchStrategy::TextExact,
            })
            .collect(),
        unmatched_source,
        unmatched_target,
    }
}

fn unmatched_indices(
    accepted: &[MatchCandidate],
    source_len: usize,
    target_len: usize,
) -> (Vec<usize>, Vec<usize>) {
    let mut source_used = vec![false; source_len];
    let mut target_used = vec![false; target_len];
    for c in accepted {
        source_used[c.source_index] = true;
        target_used[c.target_index] = true;
    }
    let unused = |used: Vec<bool>| {
        used.into_iter()
            .enumerate()
            .filter_map(|(i, u)| (!u).then_some(i))
            .collect::<Vec<_>>()
    };
    (unused(source_used), unused(target_used))
}

// ============================================================================
// Element matching
// ============================================================================

/// Per-element signals, computed once per match call.
struct Features {
    name: Option<String>,
    text: Option<String>,
    role: Option<String>,
    center: Option<(f64, f64)>,
    value: Option<String>,
}

impl Features {
    fn of(element: &ElementDescriptor, viewport: Option<Viewport>) -> Self {
        let non_empty = |s: String| (!s.is_empty()).then_some(s);
        Self {
            name: element
                .accessible_name
                .as_deref()
                .map(|n| n.trim().to_lowercase())
                .and_then(non_empty),
            text: element.text.as_deref().map(normalize_text).and_then(non_empty),
            role: element.effective_role().map(str::to_lowercase),
            center: element
                .bounds
                .as_ref()
                .zip(viewport)
                .map(|(b, vp)| vp.normalize(b.center())),
            value: extract_value(element)
                .filter(|v| !v.data_type.is_text() && !v.normalized_value.is_empty())
                .map(|v| v.normalized_value),
        }
    }
}

/// Weighted score of every strategy for one pair, `None` when skipped.
type StrategyScores = [(MatchStrategy, Option<f64>); 5];

/// Scores element pairs and resolves them into one-to-one matches.
///
/// Stateless apart from its configuration; safe to share across threads.
#[derive(Clone)]
#[must_use]
pub struct ElementMatcher {
    config: MatchConfig,
    assigner: Option<Arc<dyn Assigner>>,
}

impl std::fmt::Debug for ElementMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementMatcher")
            .field("config", &self.config)
            .field("assigner", &self.assigner().name())
            .finish()
    }
}

impl Default for ElementMatcher {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl ElementMatcher {
    /// Create a matcher without validating the configuration.
    ///
    /// Out-of-range thresholds are honored as given: above 1 nothing
    /// matches, at 0 every pair is a candidate.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            assigner: None,
        }
    }

    /// Create a matcher, rejecting invalid configuration.
    pub fn try_new(config: MatchConfig) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ParityError::config(message));
        }
        Ok(Self::new(config))
    }

    /// Replace the assignment algorithm selected by the configuration.
    pub fn with_assigner(mut self, assigner: Arc<dyn Assigner>) -> Self {
        self.assigner = Some(assigner);
        self
    }

    /// Get the current configuration.
    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn assigner(&self) -> &dyn Assigner {
        if let Some(custom) = &self.assigner {
            return custom.as_ref();
        }
        match self.config.assignment {
            AssignmentMethod::Greedy => &GreedyAssigner,
            AssignmentMethod::Optimal => &OptimalAssigner,
        }
    }

    /// Match two element collections.
    ///
    /// Positions are normalized by a viewport derived from each
    /// collection's element extents.
    pub fn match_elements(
        &self,
        source: &[ElementDescriptor],
        target: &[ElementDescriptor],
    ) -> ElementMatchResult {
        self.match_with_viewports(
            source,
            Viewport::from_elements(source),
            target,
            Viewport::from_elements(target),
        )
    }

    /// Match two snapshots, using their declared viewports when present.
    pub fn match_snapshots(&self, source: &Snapshot, target: &Snapshot) -> ElementMatchResult {
        self.match_with_viewports(
            &source.elements,
            source.effective_viewport(),
            &target.elements,
            target.effective_viewport(),
        )
    }

    /// Match two collections with explicit viewports.
    pub fn match_with_viewports(
        &self,
        source: &[ElementDescriptor],
        source_viewport: Option<Viewport>,
        target: &[ElementDescriptor],
        target_viewport: Option<Viewport>,
    ) -> ElementMatchResult {
        let source_features: Vec<Features> = source
            .iter()
            .map(|e| Features::of(e, source_viewport))
            .collect();
        let target_features: Vec<Features> = target
            .iter()
            .map(|e| Features::of(e, target_viewport))
            .collect();

        let threshold = self.config.match_threshold;
        let mut candidates = Vec::new();
        for (i, a) in source_features.iter().enumerate() {
            for (j, b) in target_features.iter().enumerate() {
                let (score, strategy) = best_of(&self.strategy_scores(a, b));
                if score >= threshold {
                    candidates.push(MatchCandidate::new(i, j, score, strategy));
                }
            }
        }

        let candidate_count = candidates.len();
        let assigner = self.assigner();
        let accepted = assigner.assign(candidates);
        tracing::debug!(
            source = source.len(),
            target = target.len(),
            candidates = candidate_count,
            accepted = accepted.len(),
            assigner = assigner.name(),
            "Matched elements"
        );

        let (unmatched_source, unmatched_target) =
            unmatched_indices(&accepted, source.len(), target.len());

        ElementMatchResult {
            matched_pairs: accepted
                .into_iter()
                .map(|c| MatchedPair {
                    source_id: source[c.source_index].id.clone(),
                    target_id: target[c.target_index].id.clone(),
                    source_index: c.source_index,
                    target_index: c.target_index,
                    confidence: c.score.clamp(0.0, 1.0),
                    strategy: c.strategy,
                })
                .collect(),
            unmatched_source_ids: unmatched_source
                .into_iter()
                .map(|i| source[i].id.clone())
                .collect(),
            unmatched_target_ids: unmatched_target
                .into_iter()
                .map(|j| target[j].id.clone())
                .collect(),
        }
    }

    /// Explain how one source element scores against one target element.
    ///
    /// Viewports are derived from the full collections so spatial scores
    /// agree with [`match_elements`](Self::match_elements). Returns `None`
    /// when either id is missing.
    #[must_use]
    pub fn explain_pair(
        &self,
        source: &[ElementDescriptor],
        target: &[ElementDescriptor],
        source_id: &str,
        target_id: &str,
    ) -> Option<MatchExplanation> {
        let a = source.iter().find(|e| e.id == source_id)?;
        let b = target.iter().find(|e| e.id == target_id)?;
        let fa = Features::of(a, Viewport::from_elements(source));
        let fb = Features::of(b, Viewport::from_elements(target));

        let scores = self.strategy_scores(&fa, &fb);
        let (score, strategy) = best_of(&scores);
        let weights = &self.config.weights;

        let score_breakdown = scores
            .iter()
            .map(|&(strategy, weighted)| {
                let weight = match strategy {
                    MatchStrategy::AccessibleNameExact => weights.accessible_name,
                    MatchStrategy::TextExact => weights.text_exact,
                    MatchStrategy::TextFuzzy => weights.text_fuzzy,
                    MatchStrategy::Spatial => weights.spatial,
                    _ => weights.value,
                };
                let raw_score = weighted.map(|w| if weight > 0.0 { w / weight } else { 0.0 });
                ScoreComponent {
                    strategy,
                    weight,
                    raw_score,
                    weighted_score: weighted.unwrap_or(0.0),
                    description: describe_strategy(strategy, &fa, &fb, weighted.is_some()),
                }
            })
            .collect();

        Some(MatchExplanation {
            source_id: a.id.clone(),
            target_id: b.id.clone(),
            strategy,
            score,
            threshold: self.config.match_threshold,
            is_match: score >= self.config.match_threshold,
            score_breakdown,
        })
    }

    fn strategy_scores(&self, a: &Features, b: &Features) -> StrategyScores {
        let w = &self.config.weights;

        let name = both(&a.name, &b.name).map(|(x, y)| if x == y { w.accessible_name } else { 0.0 });

        let texts = both(&a.text, &b.text);
        let text_exact = texts.map(|(x, y)| if x == y { w.text_exact } else { 0.0 });
        let text_fuzzy = texts
            .map(|(x, y)| jaro_winkler_with_scale(x, y, self.config.prefix_scale) * w.text_fuzzy);

        let spatial = match (both(&a.role, &b.role), a.center.zip(b.center)) {
            (Some((ra, rb)), Some(((ax, ay), (bx, by)))) if ra == rb => {
                let distance = (ax - bx).hypot(ay - by) / std::f64::consts::SQRT_2;
                Some(if distance <= self.config.spatial_max_distance {
                    w.spatial * (1.0 - distance)
                } else {
                    0.0
                })
            }
            _ => None,
        };

        let value = both(&a.value, &b.value).map(|(x, y)| if x == y { w.value } else { 0.0 });

        [
            (MatchStrategy::AccessibleNameExact, name),
            (MatchStrategy::TextExact, text_exact),
            (MatchStrategy::TextFuzzy, text_fuzzy),
            (MatchStrategy::Spatial, spatial),
            (MatchStrategy::Value, value),
        ]
    }
}

fn both<'a>(a: &'a Option<String>, b: &'a Option<String>) -> Option<(&'a str, &'a str)> {
    a.as_deref().zip(b.as_deref())
}

/// Maximum score; ties keep the earlier strategy.
fn best_of(scores: &StrategyScores) -> (f64, MatchStrategy) {
    let mut best = (0.0, MatchStrategy::None);
    for &(strategy, score) in scores {
        if let Some(score) = score {
            if score > best.0 || (best.1 == MatchStrategy::None && score > 0.0) {
                best = (score, strategy);
            }
        }
    }
    best
}

fn describe_strategy(strategy: MatchStrategy, a: &Features, b: &Features, applied: bool) -> String {
    let show = |v: &Option<String>| v.as_deref().unwrap_or("-").to_string();
    match strategy {
        MatchStrategy::AccessibleNameExact => {
            format!("accessible names '{}' vs '{}'", show(&a.name), show(&b.name))
        }
        MatchStrategy::TextExact | MatchStrategy::TextFuzzy => {
            format!("texts '{}' vs '{}'", show(&a.text), show(&b.text))
        }
        MatchStrategy::Spatial if applied => format!("same role '{}'", show(&a.role)),
        MatchStrategy::Spatial => "requires equal roles and bounds".to_string(),
        _ => format!("values '{}' vs '{}'", show(&a.value), show(&b.value)),
    }
}
