//! Free-text element search.
//!
//! Ranks the elements of one snapshot against a query using the same
//! signals as element matching (exact, fuzzy and token overlap) plus the
//! element's generated aliases.
//!
//! # Example
//!
//! ```
//! use ui_parity::matching::SynonymTable;
//! use ui_parity::model::ElementDescriptor;
//! use ui_parity::search::{SearchConfig, SearchEngine, SearchQuery};
//!
//! let elements = vec![
//!     ElementDescriptor::new("btn-login").with_role("button").with_text("Sign in"),
//!     ElementDescriptor::new("lnk-help").with_role("link").with_text("Help"),
//! ];
//! let engine = SearchEngine::new(SearchConfig::default(), SynonymTable::with_builtins());
//! let response = engine.search(&elements, &SearchQuery::new("login"));
//! assert_eq!(response.best_match.unwrap().element_id, "btn-login");
//! ```

use crate::matching::string_similarity::{jaro_winkler, token_jaccard};
use crate::matching::{normalize_for_alias, AliasIndex, SynonymTable, DEFAULT_MAX_ALIASES};
use crate::model::ElementDescriptor;
use crate::normalize::normalize_text;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration
// ============================================================================

/// Weights of the search strategies and alias bonuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SearchWeights {
    pub accessible_name_exact: f64,
    pub text_exact: f64,
    pub alias_exact: f64,
    pub text_fuzzy: f64,
    pub text_contains: f64,
    pub alias_fuzzy: f64,
    pub token_overlap: f64,
    /// Added when an alias equals the query
    pub alias_exact_bonus: f64,
    /// Added when an alias is at least 0.8 similar to the query
    pub alias_fuzzy_bonus: f64,
}

impl Default for SearchWeights {
    fn default() -> Self {
        Self {
            accessible_name_exact: 1.0,
            text_exact: 0.95,
            alias_exact: 0.9,
            text_fuzzy: 0.85,
            text_contains: 0.8,
            alias_fuzzy: 0.8,
            token_overlap: 0.75,
            alias_exact_bonus: 0.1,
            alias_fuzzy_bonus: 0.05,
        }
    }
}

/// Search defaults applied when a query leaves them unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SearchConfig {
    /// Results scoring below this are dropped (0.0 - 1.0)
    #[schemars(range(min = 0.0, max = 1.0))]
    pub min_score: f64,
    /// Maximum results returned
    pub max_results: usize,
    /// Aliases generated per element
    pub max_aliases: usize,
    pub weights: SearchWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_score: 0.5,
            max_results: 10,
            max_aliases: DEFAULT_MAX_ALIASES,
            weights: SearchWeights::default(),
        }
    }
}

/// Alias similarity at which the fuzzy alias bonus applies.
const ALIAS_FUZZY_BONUS_FLOOR: f64 = 0.8;

// ============================================================================
// Query and results
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub text: String,
    /// Only consider elements with this role or tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub include_hidden: bool,
}

impl SearchQuery {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    #[must_use]
    pub const fn include_hidden(mut self) -> Self {
        self.include_hidden = true;
        self
    }
}

/// Weighted score of every search strategy for one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchScores {
    pub accessible_name_exact: f64,
    pub text_exact: f64,
    pub alias_exact: f64,
    pub text_fuzzy: f64,
    pub text_contains: f64,
    pub alias_fuzzy: f64,
    pub token_overlap: f64,
    pub alias_bonus: f64,
    /// Maximum strategy score plus the alias bonus, capped at 1
    pub total: f64,
}

impl SearchScores {
    fn strategies(&self) -> [(&'static str, f64); 7] {
        [
            ("accessible name exact", self.accessible_name_exact),
            ("text exact", self.text_exact),
            ("alias exact", self.alias_exact),
            ("text fuzzy", self.text_fuzzy),
            ("text contains", self.text_contains),
            ("alias fuzzy", self.alias_fuzzy),
            ("token overlap", self.token_overlap),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub element_id: String,
    pub element_index: usize,
    pub score: f64,
    /// Why the element matched, strongest first
    pub match_reasons: Vec<String>,
    pub scores: SearchScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_alias: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_match: Option<SearchResult>,
    /// Elements scored after role and visibility filtering
    pub scanned_count: usize,
}

// ============================================================================
// Engine
// ============================================================================

/// Scores elements against free-text queries.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: SearchConfig,
    synonyms: SynonymTable,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default(), SynonymTable::with_builtins())
    }
}

impl SearchEngine {
    #[must_use]
    pub const fn new(config: SearchConfig, synonyms: SynonymTable) -> Self {
        Self { config, synonyms }
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Alias index for `elements` under this engine's synonyms.
    #[must_use]
    pub fn alias_index(&self, elements: &[ElementDescriptor]) -> AliasIndex {
        AliasIndex::build(elements, &self.synonyms, self.config.max_aliases)
    }

    /// Rank `elements` against `query`.
    ///
    /// Results at or above the minimum score are ordered by score
    /// descending, ties by element order.
    #[must_use]
    pub fn search(&self, elements: &[ElementDescriptor], query: &SearchQuery) -> SearchResponse {
        self.search_indexed(elements, &self.alias_index(elements), query)
    }

    /// Rank `elements` against `query` with a prebuilt alias index.
    ///
    /// `aliases` must be built from the same `elements`, in order.
    #[must_use]
    pub fn search_indexed(
        &self,
        elements: &[ElementDescriptor],
        aliases: &AliasIndex,
        query: &SearchQuery,
    ) -> SearchResponse {
        let normalized = normalize_text(&query.text);
        if normalized.is_empty() {
            return SearchResponse {
                query: query.text.clone(),
                ..SearchResponse::default()
            };
        }
        let alias_query = normalize_for_alias(&query.text);
        let min_score = query.min_score.unwrap_or(self.config.min_score);
        let limit = query.limit.unwrap_or(self.config.max_results);

        let mut scanned_count = 0;
        let mut results: Vec<SearchResult> = Vec::new();
        for (index, element) in elements.iter().enumerate() {
            if !query.include_hidden && !element.visible {
                continue;
            }
            if let Some(role) = query.role.as_deref() {
                if !(element.has_role(role) || element.has_tag(role)) {
                    continue;
                }
            }
            scanned_count += 1;

            let (scores, matched_alias) =
                self.score(element, &normalized, &alias_query, aliases.at(index));
            if scores.total < min_score || scores.total <= 0.0 {
                continue;
            }
            results.push(SearchResult {
                element_id: element.id.clone(),
                element_index: index,
                score: scores.total,
                match_reasons: match_reasons(&scores, min_score),
                scores,
                matched_alias,
            });
        }

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.element_index.cmp(&b.element_index))
        });
        results.truncate(limit);

        tracing::debug!(
            query = %query.text,
            scanned = scanned_count,
            results = results.len(),
            "Searched elements"
        );

        SearchResponse {
            query: query.text.clone(),
            best_match: results.first().cloned(),
            results,
            scanned_count,
        }
    }

    fn score(
        &self,
        element: &ElementDescriptor,
        query: &str,
        alias_query: &str,
        aliases: &[String],
    ) -> (SearchScores, Option<String>) {
        let w = &self.config.weights;
        let name = element.accessible_name.as_deref().map(normalize_text);
        let text = element.text.as_deref().map(normalize_text);
        let visible: Vec<&str> = [text.as_deref(), name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();

        let mut scores = SearchScores::default();
        if name.as_deref() == Some(query) {
            scores.accessible_name_exact = w.accessible_name_exact;
        }
        if text.as_deref() == Some(query) {
            scores.text_exact = w.text_exact;
        }
        scores.text_fuzzy = visible
            .iter()
            .map(|v| jaro_winkler(v, query))
            .fold(0.0, f64::max)
            * w.text_fuzzy;
        if visible.iter().any(|v| v.contains(query)) {
            scores.text_contains = w.text_contains;
        }

        let mut matched_alias = None;
        let mut best_alias = 0.0;
        for alias in aliases {
            let similarity = if alias == alias_query {
                1.0
            } else {
                jaro_winkler(alias, alias_query)
            };
            if similarity > best_alias {
                best_alias = similarity;
                matched_alias = Some(alias.clone());
            }
        }
        if best_alias >= 1.0 {
            scores.alias_exact = w.alias_exact;
            scores.alias_bonus = w.alias_exact_bonus;
        } else {
            scores.alias_fuzzy = best_alias * w.alias_fuzzy;
            if best_alias >= ALIAS_FUZZY_BONUS_FLOOR {
                scores.alias_bonus = w.alias_fuzzy_bonus;
            }
        }

        scores.token_overlap = visible
            .iter()
            .copied()
            .chain(aliases.iter().map(String::as_str))
            .map(|candidate| token_jaccard(candidate, query))
            .fold(0.0, f64::max)
            * w.token_overlap;

        let best = scores
            .strategies()
            .iter()
            .map(|(_, s)| *s)
            .fold(0.0, f64::max);
        scores.total = if best > 0.0 {
            (best + scores.alias_bonus).min(1.0)
        } else {
            0.0
        };
        let matched_alias = matched_alias.filter(|_| scores.alias_bonus > 0.0);

        (scores, matched_alias)
    }
}

fn match_reasons(scores: &SearchScores, min_score: f64) -> Vec<String> {
    let mut strategies: Vec<(&'static str, f64)> = scores
        .strategies()
        .into_iter()
        .filter(|(_, s)| *s > 0.0)
        .collect();
    strategies.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut reasons: Vec<String> = strategies
        .iter()
        .enumerate()
        .filter(|(i, (_, s))| *i == 0 || *s >= min_score)
        .map(|(_, (label, s))| format!("{label} ({s:.2})"))
        .collect();
    if scores.alias_bonus > 0.0 {
        reasons.push(format!("alias bonus (+{:.2})", scores.alias_bonus));
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements() -> Vec<ElementDescriptor> {
        vec![
            ElementDescriptor::new("btn-submit")
                .with_role("button")
                .with_text("Submit")
                .with_accessible_name("Submit order"),
            ElementDescriptor::new("input-email")
                .with_tag_name("input")
                .with_placeholder("Email address"),
            ElementDescriptor::new("lnk-settings")
                .with_role("link")
                .with_text("Settings"),
            ElementDescriptor::new("hidden-submit")
                .with_role("button")
                .with_text("Submit")
                .hidden(),
        ]
    }

    #[test]
    fn test_exact_text_ranks_first() {
        let response = SearchEngine::default().search(&elements(), &SearchQuery::new("submit"));
        let best = response.best_match.unwrap();
        assert_eq!(best.element_id, "btn-submit");
        assert_eq!(best.scores.text_exact, 0.95);
        assert_eq!(best.score, 1.0);
        assert_eq!(response.scanned_count, 3);
        assert!(best.match_reasons[0].starts_with("text exact"));
    }

    #[test]
    fn test_accessible_name_exact() {
        let response =
            SearchEngine::default().search(&elements(), &SearchQuery::new("Submit Order"));
        let best = response.best_match.unwrap();
        assert_eq!(best.scores.accessible_name_exact, 1.0);
        assert_eq!(best.score, 1.0);
    }

    #[test]
    fn test_synonym_alias_match() {
        let response = SearchEngine::default().search(&elements(), &SearchQuery::new("send"));
        let best = response.best_match.unwrap();
        assert_eq!(best.element_id, "btn-submit");
        assert_eq!(best.scores.alias_exact, 0.9);
        assert_eq!(best.matched_alias.as_deref(), Some("send"));
        assert!((best.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_placeholder_contains() {
        let response = SearchEngine::default().search(&elements(), &SearchQuery::new("email"));
        assert_eq!(response.best_match.unwrap().element_id, "input-email");
    }

    #[test]
    fn test_role_filter_and_hidden() {
        let engine = SearchEngine::default();
        let response = engine.search(&elements(), &SearchQuery::new("submit").with_role("link"));
        assert!(response.results.iter().all(|r| r.element_id == "lnk-settings"));
        assert_eq!(response.scanned_count, 1);

        let response = engine.search(&elements(), &SearchQuery::new("submit").include_hidden());
        assert_eq!(response.scanned_count, 4);
        let ids: Vec<&str> = response.results.iter().map(|r| r.element_id.as_str()).collect();
        assert_eq!(&ids[..2], &["btn-submit", "hidden-submit"]);
    }

    #[test]
    fn test_min_score_and_limit() {
        let engine = SearchEngine::default();
        let response =
            engine.search(&elements(), &SearchQuery::new("settings").with_min_score(0.99));
        assert_eq!(response.results.len(), 1);

        let response = engine.search(
            &elements(),
            &SearchQuery::new("s").with_min_score(0.0).with_limit(2),
        );
        assert!(response.results.len() <= 2);
    }

    #[test]
    fn test_prebuilt_alias_index_is_reused() {
        let engine = SearchEngine::default();
        let elements = elements();
        let index = engine.alias_index(&elements);
        assert_eq!(index.len(), elements.len());
        assert!(index.get("btn-submit").is_some_and(|a| a.iter().any(|a| a == "send")));

        for text in ["send", "email", "settings"] {
            let query = SearchQuery::new(text);
            assert_eq!(
                engine.search_indexed(&elements, &index, &query),
                engine.search(&elements, &query)
            );
        }

        let empty = AliasIndex::default();
        let response = engine.search_indexed(&elements, &empty, &SearchQuery::new("send"));
        assert!(response.best_match.map_or(true, |b| b.scores.alias_exact == 0.0));
    }

    #[test]
    fn test_empty_query() {
        let response = SearchEngine::default().search(&elements(), &SearchQuery::new("   "));
        assert!(response.results.is_empty());
        assert!(response.best_match.is_none());
    }
}
