//! Table comparison: caption pairing, header alignment and cell diffs.

use super::parity::{CategoryCounts, Unpaired};
use super::{eligible, pair_eligible, unpaired, TableConfig};
use crate::model::{ContentRole, ElementDescriptor, TableData};
use crate::normalize::{normalize, normalize_text};
use serde::{Deserialize, Serialize};

/// Tables: content role `table`, or role `table`/`grid` carrying data.
#[must_use]
pub fn is_table(element: &ElementDescriptor) -> bool {
    element.content_role == Some(ContentRole::Table)
        || (element.table.is_some() && (element.has_role("table") || element.has_role("grid")))
}

fn caption_key(element: &ElementDescriptor) -> String {
    element
        .label_text()
        .or_else(|| element.display_text())
        .unwrap_or(&element.id)
        .to_string()
}

/// One cell whose normalized values differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDifference {
    pub row: usize,
    /// Source header of the aligned column
    pub column: String,
    pub source_value: String,
    pub target_value: String,
}

/// A source column aligned to a target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub source_column: usize,
    pub target_column: usize,
}

/// Comparison of two paired tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableComparison {
    pub source_id: String,
    pub target_id: String,
    pub caption: String,
    pub caption_similarity: f64,
    pub column_mapping: Vec<ColumnMapping>,
    /// Headers with no equal counterpart
    pub source_only_columns: Vec<String>,
    pub target_only_columns: Vec<String>,
    pub source_row_count: usize,
    pub target_row_count: usize,
    pub cell_differences: Vec<CellDifference>,
    /// Cell differences stopped at the configured maximum
    pub truncated: bool,
}

impl TableComparison {
    /// No column, row-count or cell difference
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.source_only_columns.is_empty()
            && self.target_only_columns.is_empty()
            && self.source_row_count == self.target_row_count
            && self.cell_differences.is_empty()
    }
}

/// Result of pairing every table on both sides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCategory {
    pub matched: Vec<TableComparison>,
    pub changed: Vec<TableComparison>,
    pub source_only: Vec<Unpaired>,
    pub target_only: Vec<Unpaired>,
    pub counts: CategoryCounts,
    pub parity: Option<f64>,
}

/// Column alignment and cell differences of two tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDiff {
    pub column_mapping: Vec<ColumnMapping>,
    pub source_only_columns: Vec<String>,
    pub target_only_columns: Vec<String>,
    pub cell_differences: Vec<CellDifference>,
    pub truncated: bool,
}

/// Compare two tables' contents.
///
/// Columns align by normalized header equality, first unused target
/// column wins. Rows are compared positionally up to the shorter table.
#[must_use]
pub fn compare_table_data(source: &TableData, target: &TableData, max_differences: usize) -> TableDiff {
    let target_headers: Vec<String> = target.headers.iter().map(|h| normalize_text(h)).collect();
    let mut target_used = vec![false; target_headers.len()];
    let mut mapping = Vec::new();
    let mut source_only_columns = Vec::new();

    for (i, header) in source.headers.iter().enumerate() {
        let key = normalize_text(header);
        let found = (0..target_headers.len()).find(|&j| !target_used[j] && target_headers[j] == key);
        match found {
            Some(j) => {
                target_used[j] = true;
                mapping.push(ColumnMapping {
                    source_column: i,
                    target_column: j,
                });
            }
            None => source_only_columns.push(header.clone()),
        }
    }
    let target_only_columns = target
        .headers
        .iter()
        .zip(&target_used)
        .filter(|(_, used)| !**used)
        .map(|(h, _)| h.clone())
        .collect();

    let mut differences = Vec::new();
    let mut truncated = false;
    let rows = source.rows.len().min(target.rows.len());
    'rows: for row in 0..rows {
        for column in &mapping {
            let s = source.cell(row, column.source_column).unwrap_or_default();
            let t = target.cell(row, column.target_column).unwrap_or_default();
            if normalize(s) == normalize(t) {
                continue;
            }
            if differences.len() >= max_differences {
                truncated = true;
                break 'rows;
            }
            differences.push(CellDifference {
                row,
                column: source.headers[column.source_column].clone(),
                source_value: s.to_string(),
                target_value: t.to_string(),
            });
        }
    }

    TableDiff {
        column_mapping: mapping,
        source_only_columns,
        target_only_columns,
        cell_differences: differences,
        truncated,
    }
}

/// Pair tables by caption and diff every pair.
#[must_use]
pub fn compare_tables(
    source: &[ElementDescriptor],
    target: &[ElementDescriptor],
    config: &TableConfig,
    changed_credit: f64,
) -> TableCategory {
    let source = eligible(source, is_table, caption_key);
    let target = eligible(target, is_table, caption_key);
    let pairing = pair_eligible(&source, &target, config.table_match_threshold);

    let empty = TableData::default();
    let (matched, changed): (Vec<_>, Vec<_>) = pairing
        .pairs
        .iter()
        .map(|pair| {
            let s = &source[pair.source_index];
            let t = &target[pair.target_index];
            let source_table = s.element.table.as_ref().unwrap_or(&empty);
            let target_table = t.element.table.as_ref().unwrap_or(&empty);
            let diff = compare_table_data(source_table, target_table, config.max_differences);
            TableComparison {
                source_id: s.element.id.clone(),
                target_id: t.element.id.clone(),
                caption: s.key.clone(),
                caption_similarity: pair.score,
                column_mapping: diff.column_mapping,
                source_only_columns: diff.source_only_columns,
                target_only_columns: diff.target_only_columns,
                source_row_count: source_table.rows.len(),
                target_row_count: target_table.rows.len(),
                cell_differences: diff.cell_differences,
                truncated: diff.truncated,
            }
        })
        .partition(TableComparison::is_clean);

    let source_only = unpaired(&source, &pairing.unmatched_source);
    let target_only = unpaired(&target, &pairing.unmatched_target);
    let counts = CategoryCounts::new(
        matched.len(),
        changed.len(),
        source_only.len(),
        target_only.len(),
    );
    tracing::debug!(
        matched = counts.matched,
        changed = counts.changed,
        "Compared tables"
    );
    TableCategory {
        matched,
        changed,
        source_only,
        target_only,
        parity: counts.parity(changed_credit),
        counts,
    }
}
