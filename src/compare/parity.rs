//! Category parity ratios and the shared shapes every comparator reports.

use crate::model::ElementDescriptor;
use serde::{Deserialize, Serialize};

/// An eligible element that found no counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unpaired {
    pub element_id: String,
    /// Text the element was paired by
    pub text: String,
    /// Whether the element is marked required
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl Unpaired {
    pub(crate) fn new(element: &ElementDescriptor, text: &str) -> Self {
        Self {
            element_id: element.id.clone(),
            text: text.to_string(),
            required: element.required,
        }
    }
}

/// Outcome counts of one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub matched: usize,
    pub changed: usize,
    pub source_only: usize,
    pub target_only: usize,
}

impl CategoryCounts {
    #[must_use]
    pub const fn new(matched: usize, changed: usize, source_only: usize, target_only: usize) -> Self {
        Self {
            matched,
            changed,
            source_only,
            target_only,
        }
    }

    /// Number of outcomes; zero means no eligible element on either side.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.matched + self.changed + self.source_only + self.target_only
    }

    /// Whether anything differs
    #[must_use]
    pub const fn has_differences(&self) -> bool {
        self.changed + self.source_only + self.target_only > 0
    }

    /// Parity ratio with partial credit for changed pairs.
    ///
    /// `None` when the category is empty, so it can be excluded from
    /// aggregate means instead of counting as 0 or 1.
    #[must_use]
    pub fn parity(&self, changed_credit: f64) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let credit = changed_credit.mul_add(self.changed as f64, self.matched as f64);
        Some((credit / total as f64).clamp(0.0, 1.0))
    }
}

/// Arithmetic mean of the present values.
#[must_use]
pub fn mean_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_with_changed_credit() {
        let counts = CategoryCounts::new(2, 2, 0, 0);
        assert_eq!(counts.parity(0.5), Some(0.75));
        assert_eq!(counts.parity(0.0), Some(0.5));
        assert_eq!(CategoryCounts::new(0, 0, 3, 1).parity(0.5), Some(0.0));
    }

    #[test]
    fn test_empty_category_has_no_parity() {
        let counts = CategoryCounts::default();
        assert_eq!(counts.parity(0.5), None);
        assert!(!counts.has_differences());
    }

    #[test]
    fn test_mean_present_skips_missing() {
        assert_eq!(mean_present([Some(1.0), None, Some(0.5)]), Some(0.75));
        assert_eq!(mean_present([None, None]), None);
    }
}
