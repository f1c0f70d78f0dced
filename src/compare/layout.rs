//! Layout comparison: grid position, relative size and nesting depth of
//! matched elements.

use super::parity::CategoryCounts;
use super::LayoutConfig;
use crate::matching::ElementMatcher;
use crate::model::{ElementDescriptor, Snapshot, Viewport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of structural difference between two matched elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDifferenceKind {
    /// Centers fall in different grid cells
    Position,
    /// Normalized areas differ beyond the tolerance
    Size,
    /// Nesting depth differs
    Hierarchy,
}

impl std::fmt::Display for LayoutDifferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position => write!(f, "position"),
            Self::Size => write!(f, "size"),
            Self::Hierarchy => write!(f, "hierarchy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDifference {
    pub source_id: String,
    pub target_id: String,
    pub kind: LayoutDifferenceKind,
    pub source_value: String,
    pub target_value: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutComparison {
    /// Matched elements with no layout difference
    pub aligned_ids: Vec<(String, String)>,
    pub differences: Vec<LayoutDifference>,
    pub source_only: Vec<String>,
    pub target_only: Vec<String>,
    pub counts: CategoryCounts,
    pub parity: Option<f64>,
}

fn grid_cell(center: (f64, f64), viewport: Viewport, config: &LayoutConfig) -> (u32, u32) {
    let (x, y) = viewport.normalize(center);
    let columns = config.grid_columns.max(1);
    let rows = config.grid_rows.max(1);
    let column = ((x * f64::from(columns)) as u32).min(columns - 1);
    let row = ((y * f64::from(rows)) as u32).min(rows - 1);
    (column, row)
}

fn relative_area(element: &ElementDescriptor, viewport: Viewport) -> f64 {
    element
        .bounds
        .as_ref()
        .map_or(0.0, |b| b.area() / (viewport.width * viewport.height))
}

/// Compare the layout of visible, positioned elements.
///
/// Elements are paired with `matcher`; each pair is checked for a grid
/// cell change, a size change and a depth change.
#[must_use]
pub fn compare_layout(
    source: &Snapshot,
    target: &Snapshot,
    matcher: &ElementMatcher,
    config: &LayoutConfig,
    changed_credit: f64,
) -> LayoutComparison {
    let positioned = |snapshot: &Snapshot| -> Vec<ElementDescriptor> {
        snapshot
            .elements
            .iter()
            .filter(|e| e.visible && e.bounds.is_some())
            .cloned()
            .collect()
    };
    let source_elements = positioned(source);
    let target_elements = positioned(target);
    let (Some(source_viewport), Some(target_viewport)) =
        (source.effective_viewport(), target.effective_viewport())
    else {
        let counts = CategoryCounts::new(0, 0, source_elements.len(), target_elements.len());
        return LayoutComparison {
            source_only: source_elements.into_iter().map(|e| e.id).collect(),
            target_only: target_elements.into_iter().map(|e| e.id).collect(),
            parity: counts.parity(changed_credit),
            counts,
            ..LayoutComparison::default()
        };
    };

    let matches = matcher.match_with_viewports(
        &source_elements,
        Some(source_viewport),
        &target_elements,
        Some(target_viewport),
    );
    let source_depths: HashMap<&str, usize> = Snapshot::depths(&source.elements);
    let target_depths: HashMap<&str, usize> = Snapshot::depths(&target.elements);

    let mut aligned_ids = Vec::new();
    let mut differences = Vec::new();
    let mut changed = 0;
    for pair in &matches.matched_pairs {
        let s = &source_elements[pair.source_index];
        let t = &target_elements[pair.target_index];
        let before = differences.len();
        let mut push = |kind, source_value: String, target_value: String, description: String| {
            differences.push(LayoutDifference {
                source_id: s.id.clone(),
                target_id: t.id.clone(),
                kind,
                source_value,
                target_value,
                description,
            });
        };

        if let (Some(sb), Some(tb)) = (&s.bounds, &t.bounds) {
            let sc = grid_cell(sb.center(), source_viewport, config);
            let tc = grid_cell(tb.center(), target_viewport, config);
            if sc != tc {
                push(
                    LayoutDifferenceKind::Position,
                    format!("{},{}", sc.0, sc.1),
                    format!("{},{}", tc.0, tc.1),
                    format!(
                        "'{}' moved from grid cell ({}, {}) to ({}, {})",
                        s.describe(),
                        sc.0,
                        sc.1,
                        tc.0,
                        tc.1
                    ),
                );
            }
        }

        let sa = relative_area(s, source_viewport);
        let ta = relative_area(t, target_viewport);
        let larger = sa.max(ta);
        let ratio = if larger > 0.0 { sa.min(ta) / larger } else { 1.0 };
        if ratio < config.size_tolerance {
            push(
                LayoutDifferenceKind::Size,
                format!("{:.1}%", sa * 100.0),
                format!("{:.1}%", ta * 100.0),
                format!(
                    "'{}' occupies {:.1}% of the viewport in source and {:.1}% in target",
                    s.describe(),
                    sa * 100.0,
                    ta * 100.0
                ),
            );
        }

        let sd = source_depths.get(s.id.as_str()).copied().unwrap_or(0);
        let td = target_depths.get(t.id.as_str()).copied().unwrap_or(0);
        if sd != td {
            push(
                LayoutDifferenceKind::Hierarchy,
                sd.to_string(),
                td.to_string(),
                format!("'{}' is nested at depth {sd} in source and {td} in target", s.describe()),
            );
        }

        if differences.len() == before {
            aligned_ids.push((s.id.clone(), t.id.clone()));
        } else {
            changed += 1;
        }
    }

    let counts = CategoryCounts::new(
        aligned_ids.len(),
        changed,
        matches.unmatched_source_ids.len(),
        matches.unmatched_target_ids.len(),
    );
    tracing::debug!(
        pairs = matches.matched_pairs.len(),
        differences = differences.len(),
        "Compared layout"
    );
    LayoutComparison {
        aligned_ids,
        differences,
        source_only: matches.unmatched_source_ids,
        target_only: matches.unmatched_target_ids,
        parity: counts.parity(changed_credit),
        counts,
    }
}
