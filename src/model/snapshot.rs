//! Snapshots: ordered element collections captured from one application.

use super::element::ElementDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reference frame used to normalize element positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a viewport; non-positive dimensions are clamped to 1.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: if width > 0.0 { width } else { 1.0 },
            height: if height > 0.0 { height } else { 1.0 },
        }
    }

    /// Derive a viewport from the furthest right/bottom edge of any element.
    ///
    /// Returns `None` when no element carries bounds.
    #[must_use]
    pub fn from_elements(elements: &[ElementDescriptor]) -> Option<Self> {
        let mut extent: Option<(f64, f64)> = None;
        for bounds in elements.iter().filter_map(|e| e.bounds.as_ref()) {
            let (w, h) = extent.unwrap_or((0.0, 0.0));
            extent = Some((w.max(bounds.right()), h.max(bounds.bottom())));
        }
        extent.map(|(w, h)| Self::new(w, h))
    }

    /// Normalize a point into `[0, 1]` coordinates of this viewport.
    #[must_use]
    pub fn normalize(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            (x / self.width).clamp(0.0, 1.0),
            (y / self.height).clamp(0.0, 1.0),
        )
    }
}

/// An ordered collection of element descriptors from one application.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Display name of the captured application or page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared viewport; derived from element bounds when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub elements: Vec<ElementDescriptor>,
}

impl Snapshot {
    /// Create a snapshot from elements
    #[must_use]
    pub fn new(elements: Vec<ElementDescriptor>) -> Self {
        Self {
            name: None,
            viewport: None,
            elements,
        }
    }

    /// Set the snapshot name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the viewport
    #[must_use]
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Some(Viewport::new(width, height));
        self
    }

    /// Declared viewport, or one derived from element bounds.
    #[must_use]
    pub fn effective_viewport(&self) -> Option<Viewport> {
        self.viewport
            .or_else(|| Viewport::from_elements(&self.elements))
    }

    /// Number of elements
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Find an element by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ElementDescriptor> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Ids that appear more than once, in first-duplicate order.
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for element in &self.elements {
            let count = seen.entry(element.id.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                duplicates.push(element.id.as_str());
            }
        }
        duplicates
    }

    /// Nesting depth of every element, following `parent_id` links.
    ///
    /// Unknown parents terminate the walk; cycles are cut at the
    /// collection size.
    #[must_use]
    pub fn depths(elements: &[ElementDescriptor]) -> HashMap<&str, usize> {
        let parents: HashMap<&str, &str> = elements
            .iter()
            .filter_map(|e| e.parent_id.as_deref().map(|p| (e.id.as_str(), p)))
            .collect();
        let known: std::collections::HashSet<&str> =
            elements.iter().map(|e| e.id.as_str()).collect();

        elements
            .iter()
            .map(|e| {
                let mut depth = 0;
                let mut current = e.id.as_str();
                while let Some(parent) = parents.get(current) {
                    if !known.contains(parent) || depth >= elements.len() {
                        break;
                    }
                    depth += 1;
                    current = *parent;
                }
                (e.id.as_str(), depth)
            })
            .collect()
    }
}

impl From<Vec<ElementDescriptor>> for Snapshot {
    fn from(elements: Vec<ElementDescriptor>) -> Self {
        Self::new(elements)
    }
}
