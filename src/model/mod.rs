//! Element snapshot data model.
//!
//! Descriptors are supplied by an external capture collaborator and are
//! read-only to every comparator. Ids are treated as opaque keys.

mod element;
mod severity;
mod snapshot;

pub use element::{BoundingBox, ContentRole, ElementDescriptor, TableData};
pub use severity::Severity;
pub use snapshot::{Snapshot, Viewport};
