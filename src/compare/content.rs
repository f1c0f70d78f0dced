//! Content comparison: headings, metrics, statuses and form labels.

use super::parity::{mean_present, CategoryCounts, Unpaired};
use super::{eligible, pair_eligible, unpaired, ContentConfig};
use crate::model::{ContentRole, ElementDescriptor};
use crate::normalize::{detect_pattern, DataType, ExtractedDataValue};
use serde::{Deserialize, Serialize};

// ============================================================================
// Predicates
// ============================================================================

/// Headings: content role, ARIA role or an `h1`..`h6` tag.
#[must_use]
pub fn is_heading(element: &ElementDescriptor) -> bool {
    element.content_role == Some(ContentRole::Heading)
        || element.has_role("heading")
        || element.tag_name.as_deref().is_some_and(is_heading_tag)
}

fn is_heading_tag(tag: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    matches!(tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

#[must_use]
pub fn is_metric(element: &ElementDescriptor) -> bool {
    element.content_role == Some(ContentRole::Metric)
}

#[must_use]
pub fn is_status(element: &ElementDescriptor) -> bool {
    element.content_role == Some(ContentRole::Status) || element.has_role("status")
}

#[must_use]
pub fn is_label(element: &ElementDescriptor) -> bool {
    element.content_role == Some(ContentRole::Label) || element.has_tag("label")
}

fn display_key(element: &ElementDescriptor) -> String {
    element.display_text().unwrap_or_default().to_string()
}

fn label_key(element: &ElementDescriptor) -> String {
    element.label_text().unwrap_or(&element.id).to_string()
}

// ============================================================================
// Headings
// ============================================================================

/// Two headings with the same text and compatible levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingMatch {
    pub source_id: String,
    pub target_id: String,
    pub source_text: String,
    pub target_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    pub similarity: f64,
    pub exact: bool,
}

/// Two paired headings whose levels differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingChange {
    pub source_id: String,
    pub target_id: String,
    pub source_text: String,
    pub target_text: String,
    pub source_level: u8,
    pub target_level: u8,
    pub similarity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingComparison {
    pub matched: Vec<HeadingMatch>,
    pub changed: Vec<HeadingChange>,
    pub source_only: Vec<Unpaired>,
    pub target_only: Vec<Unpaired>,
    pub counts: CategoryCounts,
    pub parity: Option<f64>,
}

/// Pair headings by text; levels decide matched versus changed.
#[must_use]
pub fn compare_headings(
    source: &[ElementDescriptor],
    target: &[ElementDescriptor],
    threshold: f64,
    changed_credit: f64,
) -> HeadingComparison {
    let source = eligible(source, is_heading, display_key);
    let target = eligible(target, is_heading, display_key);
    let pairing = pair_eligible(&source, &target, threshold);

    let mut matched = Vec::new();
    let mut changed = Vec::new();
    for pair in &pairing.pairs {
        let s = &source[pair.source_index];
        let t = &target[pair.target_index];
        let source_level = s.element.effective_heading_level();
        let target_level = t.element.effective_heading_level();
        match (source_level, target_level) {
            (Some(sl), Some(tl)) if sl != tl => changed.push(HeadingChange {
                source_id: s.element.id.clone(),
                target_id: t.element.id.clone(),
                source_text: s.key.clone(),
                target_text: t.key.clone(),
                source_level: sl,
                target_level: tl,
                similarity: pair.score,
            }),
            _ => matched.push(HeadingMatch {
                source_id: s.element.id.clone(),
                target_id: t.element.id.clone(),
                source_text: s.key.clone(),
                target_text: t.key.clone(),
                level: source_level.or(target_level),
                similarity: pair.score,
                exact: pair.exact,
            }),
        }
    }

    let source_only = unpaired(&source, &pairing.unmatched_source);
    let target_only = unpaired(&target, &pairing.unmatched_target);
    let counts = CategoryCounts::new(
        matched.len(),
        changed.len(),
        source_only.len(),
        target_only.len(),
    );
    HeadingComparison {
        matched,
        changed,
        source_only,
        target_only,
        parity: counts.parity(changed_credit),
        counts,
    }
}

// ============================================================================
// Metrics and statuses
// ============================================================================

/// A labelled value paired across both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePair {
    pub label: String,
    pub source_id: String,
    pub target_id: String,
    pub label_similarity: f64,
    pub source_value: String,
    pub target_value: String,
    pub source_normalized: String,
    pub target_normalized: String,
    pub source_type: DataType,
    pub target_type: DataType,
    pub source_pattern: String,
    pub target_pattern: String,
    /// Normalized values are equal
    pub values_match: bool,
    /// Data types and structural patterns are equal
    pub formats_match: bool,
}

impl ValuePair {
    fn new(label: &str, similarity: f64, source: &ElementDescriptor, target: &ElementDescriptor) -> Self {
        let s = ExtractedDataValue::from_raw(&source.id, source.value_text().unwrap_or_default());
        let t = ExtractedDataValue::from_raw(&target.id, target.value_text().unwrap_or_default());
        let source_pattern = detect_pattern(&s.raw_value, s.data_type);
        let target_pattern = detect_pattern(&t.raw_value, t.data_type);
        Self {
            label: label.to_string(),
            source_id: s.element_id,
            target_id: t.element_id,
            label_similarity: similarity,
            values_match: s.normalized_value == t.normalized_value,
            formats_match: s.data_type == t.data_type && source_pattern == target_pattern,
            source_value: s.raw_value,
            target_value: t.raw_value,
            source_normalized: s.normalized_value,
            target_normalized: t.normalized_value,
            source_type: s.data_type,
            target_type: t.data_type,
            source_pattern,
            target_pattern,
        }
    }
}

pub type MetricMatch = ValuePair;
pub type MetricChange = ValuePair;
pub type StatusMatch = ValuePair;
pub type StatusChange = ValuePair;

/// Labelled values paired by label; matched when normalized values agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueComparison {
    pub matched: Vec<ValuePair>,
    pub changed: Vec<ValuePair>,
    pub source_only: Vec<Unpaired>,
    pub target_only: Vec<Unpaired>,
    pub counts: CategoryCounts,
    pub parity: Option<f64>,
}

pub type MetricComparison = ValueComparison;
pub type StatusComparison = ValueComparison;

impl ValueComparison {
    /// Every pair, matched first
    pub fn pairs(&self) -> impl Iterator<Item = &ValuePair> {
        self.matched.iter().chain(&self.changed)
    }
}

fn compare_values(
    source: &[ElementDescriptor],
    target: &[ElementDescriptor],
    predicate: fn(&ElementDescriptor) -> bool,
    threshold: f64,
    changed_credit: f64,
) -> ValueComparison {
    let source = eligible(source, predicate, label_key);
    let target = eligible(target, predicate, label_key);
    let pairing = pair_eligible(&source, &target, threshold);

    let (matched, changed): (Vec<_>, Vec<_>) = pairing
        .pairs
        .iter()
        .map(|pair| {
            let s = &source[pair.source_index];
            let t = &target[pair.target_index];
            ValuePair::new(&s.key, pair.score, s.element, t.element)
        })
        .partition(|pair| pair.values_match);

    let source_only = unpaired(&source, &pairing.unmatched_source);
    let target_only = unpaired(&target, &pairing.unmatched_target);
    let counts = CategoryCounts::new(
        matched.len(),
        changed.len(),
        source_only.len(),
        target_only.len(),
    );
    ValueComparison {
        matched,
        changed,
        source_only,
        target_only,
        parity: counts.parity(changed_credit),
        counts,
    }
}

/// Pair metrics by label and compare their normalized values.
#[must_use]
pub fn compare_metrics(
    source: &[ElementDescriptor],
    target: &[ElementDescriptor],
    threshold: f64,
    changed_credit: f64,
) -> MetricComparison {
    compare_values(source, target, is_metric, threshold, changed_credit)
}

/// Pair status indicators by label and compare their normalized values.
#[must_use]
pub fn compare_statuses(
    source: &[ElementDescriptor],
    target: &[ElementDescriptor],
    threshold: f64,
    changed_credit: f64,
) -> StatusComparison {
    compare_values(source, target, is_status, threshold, changed_credit)
}

// ============================================================================
// Labels
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelMatch {
    pub source_id: String,
    pub target_id: String,
    pub source_text: String,
    pub target_text: String,
    pub similarity: f64,
    /// Normalized texts are identical
    pub exact: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelComparison {
    pub matched: Vec<LabelMatch>,
    pub source_only: Vec<Unpaired>,
    pub target_only: Vec<Unpaired>,
    pub counts: CategoryCounts,
    pub parity: Option<f64>,
}

/// Pair form labels by text. Every pair counts as a match.
#[must_use]
pub fn compare_labels(
    source: &[ElementDescriptor],
    target: &[ElementDescriptor],
    threshold: f64,
    changed_credit: f64,
) -> LabelComparison {
    let source = eligible(source, is_label, display_key);
    let target = eligible(target, is_label, display_key);
    let pairing = pair_eligible(&source, &target, threshold);

    let matched: Vec<LabelMatch> = pairing
        .pairs
        .iter()
        .map(|pair| {
            let s = &source[pair.source_index];
            let t = &target[pair.target_index];
            LabelMatch {
                source_id: s.element.id.clone(),
                target_id: t.element.id.clone(),
                source_text: s.key.clone(),
                target_text: t.key.clone(),
                similarity: pair.score,
                exact: pair.exact,
            }
        })
        .collect();

    let source_only = unpaired(&source, &pairing.unmatched_source);
    let target_only = unpaired(&target, &pairing.unmatched_target);
    let counts = CategoryCounts::new(matched.len(), 0, source_only.len(), target_only.len());
    LabelComparison {
        matched,
        source_only,
        target_only,
        parity: counts.parity(changed_credit),
        counts,
    }
}

// ============================================================================
// Content
// ============================================================================

/// The four text-bearing content categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentComparison {
    pub headings: HeadingComparison,
    pub metrics: MetricComparison,
    pub statuses: StatusComparison,
    pub labels: LabelComparison,
}

impl ContentComparison {
    /// Mean of the present category parities, 1.0 when none is present.
    #[must_use]
    pub fn parity(&self) -> f64 {
        mean_present([
            self.headings.parity,
            self.metrics.parity,
            self.statuses.parity,
            self.labels.parity,
        ])
        .unwrap_or(1.0)
    }
}

/// Compare every content category.
#[must_use]
pub fn compare_content(
    source: &[ElementDescriptor],
    target: &[ElementDescriptor],
    config: &ContentConfig,
    changed_credit: f64,
) -> ContentComparison {
    let content = ContentComparison {
        headings: compare_headings(source, target, config.heading_match_threshold, changed_credit),
        metrics: compare_metrics(source, target, config.metric_match_threshold, changed_credit),
        statuses: compare_statuses(source, target, config.status_match_threshold, changed_credit),
        labels: compare_labels(source, target, config.label_match_threshold, changed_credit),
    };
    tracing::debug!(
        headings = content.headings.counts.total(),
        metrics = content.metrics.counts.total(),
        statuses = content.statuses.counts.total(),
        labels = content.labels.counts.total(),
        "Compared content"
    );
    content
}
