//! Element descriptors captured from a UI surface.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in capture coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the box
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Area of the box, never negative
    #[must_use]
    pub fn area(&self) -> f64 {
        (self.width.max(0.0)) * (self.height.max(0.0))
    }

    /// Right edge
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Semantic content role assigned by the capture collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentRole {
    Heading,
    Metric,
    Status,
    Label,
    NavLink,
    Table,
    #[serde(other)]
    Other,
}

/// Tabular data attached to a table element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableData {
    /// Column header texts, in display order
    pub headers: Vec<String>,
    /// Row cells; rows may be shorter than `headers`
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Cell text at `(row, column)`, if present
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }
}

const fn default_true() -> bool {
    true
}

/// Immutable snapshot of one UI element.
///
/// Every field except `id` is optional. Comparators skip whatever strategy
/// depends on a missing field instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    /// Opaque key, unique within its collection
    #[serde(default)]
    pub id: String,
    /// ARIA role or element type ("button", "link", "heading", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Lowercase tag name when captured from markup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    /// Computed accessible name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible_name: Option<String>,
    /// Visible text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Text of an associated label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Displayed data value (metric value, status text, input value)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Link target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_role: Option<ContentRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
    /// Id of the enclosing element, for hierarchy comparison
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Name of the logical component this element belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Whether a missing counterpart should be reported as an error
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,
}

impl ElementDescriptor {
    /// Create a descriptor with only an id set
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: None,
            tag_name: None,
            accessible_name: None,
            text: None,
            label: None,
            placeholder: None,
            title: None,
            value: None,
            href: None,
            bounds: None,
            visible: true,
            enabled: true,
            checked: None,
            content_role: None,
            heading_level: None,
            parent_id: None,
            component: None,
            required: false,
            table: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    #[must_use]
    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = Some(tag_name.into());
        self
    }

    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    #[must_use]
    pub const fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bounds = Some(BoundingBox::new(x, y, width, height));
        self
    }

    #[must_use]
    pub const fn with_content_role(mut self, role: ContentRole) -> Self {
        self.content_role = Some(role);
        self
    }

    #[must_use]
    pub const fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = Some(level);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    #[must_use]
    pub fn with_table(mut self, headers: &[&str], rows: &[&[&str]]) -> Self {
        self.table = Some(TableData {
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(ToString::to_string).collect())
                .collect(),
        });
        self
    }

    /// Role if set, otherwise the tag name.
    #[must_use]
    pub fn effective_role(&self) -> Option<&str> {
        non_empty(self.role.as_deref()).or_else(|| non_empty(self.tag_name.as_deref()))
    }

    /// Visible text, falling back to the accessible name.
    #[must_use]
    pub fn display_text(&self) -> Option<&str> {
        non_empty(self.text.as_deref()).or_else(|| non_empty(self.accessible_name.as_deref()))
    }

    /// Label text used as a pairing key for data-bearing elements.
    #[must_use]
    pub fn label_text(&self) -> Option<&str> {
        non_empty(self.label.as_deref())
            .or_else(|| non_empty(self.accessible_name.as_deref()))
            .or_else(|| non_empty(self.title.as_deref()))
    }

    /// Displayed data value, falling back to visible text.
    #[must_use]
    pub fn value_text(&self) -> Option<&str> {
        non_empty(self.value.as_deref()).or_else(|| non_empty(self.text.as_deref()))
    }

    /// Human-readable name for issue descriptions.
    #[must_use]
    pub fn describe(&self) -> &str {
        self.label_text()
            .or_else(|| self.display_text())
            .unwrap_or(&self.id)
    }

    /// Heading level from the descriptor or an `h1`..`h6` tag.
    #[must_use]
    pub fn effective_heading_level(&self) -> Option<u8> {
        self.heading_level.or_else(|| {
            let tag = self.tag_name.as_deref()?;
            let digit = tag.strip_prefix('h').or_else(|| tag.strip_prefix('H'))?;
            digit.parse::<u8>().ok().filter(|l| (1..=6).contains(l))
        })
    }

    /// Whether the element's explicit role equals `role` (case-insensitive).
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.role
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case(role))
    }

    /// Whether the element's tag name equals `tag` (case-insensitive).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_name
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
