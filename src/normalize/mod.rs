//! Text folding, data type classification and value normalization.
//!
//! Normalization makes differently formatted but equivalent values compare
//! equal: `"$1,200.00"` and `"1200.00 $"` both become `"1200.00 USD"`.
//! Every function here is total; unparseable input falls back to folded
//! text.

mod data_type;
pub mod format;

pub use data_type::{
    classify, extract_value, normalize, normalize_value, parse_number, ClassificationRule,
    Classifier, DataType, ExtractedDataValue,
};
pub use format::{compare_formats, describe_formats, detect_pattern, FormatDescriptor, FormatMismatch};

/// Fold text for comparison: trim, lowercase, collapse internal whitespace
/// and strip trailing colons.
///
/// ```
/// use ui_parity::normalize::normalize_text;
///
/// assert_eq!(normalize_text("  Total   Revenue: "), "total revenue");
/// ```
#[must_use]
pub fn normalize_text(s: &str) -> String {
    let collapsed = s
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    collapsed
        .trim_end_matches(|c: char| c == ':' || c.is_whitespace())
        .to_string()
}
