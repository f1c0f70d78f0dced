//! Snapshot loading.
//!
//! A snapshot file is either a full snapshot object
//! (`{ "name", "viewport", "elements" }`) or a bare array of element
//! descriptors.

use crate::error::{ParityError, SnapshotErrorKind};
use crate::model::{ElementDescriptor, Snapshot};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Elements(Vec<ElementDescriptor>),
    Snapshot(Snapshot),
}

/// Parse snapshot JSON, rejecting empty input and duplicate element ids.
///
/// Elements without an id get a positional id (`#<index>`) before the
/// uniqueness check.
pub fn parse_snapshot_str(content: &str) -> crate::error::Result<Snapshot> {
    if content.trim().is_empty() {
        return Err(ParityError::snapshot("empty input", SnapshotErrorKind::Empty));
    }

    let document: SnapshotDocument = serde_json::from_str(content).map_err(|e| {
        ParityError::snapshot(
            "expected a snapshot object or an array of elements",
            SnapshotErrorKind::InvalidJson(e.to_string()),
        )
    })?;
    let mut snapshot = match document {
        SnapshotDocument::Elements(elements) => Snapshot::new(elements),
        SnapshotDocument::Snapshot(snapshot) => snapshot,
    };
    assign_positional_ids(&mut snapshot.elements);

    if let Some(id) = snapshot.duplicate_ids().first() {
        return Err(ParityError::snapshot(
            "element ids must be unique",
            SnapshotErrorKind::DuplicateId((*id).to_string()),
        ));
    }

    Ok(snapshot)
}

fn assign_positional_ids(elements: &mut [ElementDescriptor]) {
    for (index, element) in elements.iter_mut().enumerate() {
        if element.id.trim().is_empty() {
            element.id = format!("#{index}");
        }
    }
}

/// A snapshot loaded from disk
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub snapshot: Snapshot,
    pub path: PathBuf,
}

impl LoadedSnapshot {
    /// Display path, as recorded in report metadata
    #[must_use]
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }
}

/// Load a snapshot file, naming it after the file stem when unnamed.
pub fn load_snapshot(path: &Path, quiet: bool) -> Result<LoadedSnapshot> {
    if !quiet {
        tracing::info!("Loading snapshot: {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ParityError::io(path, e))
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
    let mut snapshot = parse_snapshot_str(&content)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;

    if snapshot.name.is_none() {
        snapshot.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string());
    }

    tracing::debug!(
        "Loaded {} elements from {}",
        snapshot.element_count(),
        path.display()
    );

    Ok(LoadedSnapshot {
        snapshot,
        path: path.to_path_buf(),
    })
}
