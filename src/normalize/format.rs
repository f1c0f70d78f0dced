//! Structural format patterns of displayed values.
//!
//! A pattern is a compact token string (`"$#,###.##"`), not a grammar. Two
//! values can normalize equal while their patterns differ; that is reported
//! as a format mismatch, not a value change.

use super::data_type::{extract_value, DataType};
use crate::matching::match_texts;
use crate::model::{ElementDescriptor, Severity};
use serde::{Deserialize, Serialize};

/// Format of one classified value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatDescriptor {
    pub element_id: String,
    pub label: String,
    pub data_type: DataType,
    pub pattern: String,
    /// The raw value the pattern was derived from
    pub example: String,
}

/// A labelled value whose format differs between source and target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatMismatch {
    pub label: String,
    pub source_element_id: String,
    pub target_element_id: String,
    pub source_type: DataType,
    pub target_type: DataType,
    pub source_pattern: String,
    pub target_pattern: String,
    pub source_example: String,
    pub target_example: String,
    /// `Error` when the data types differ, `Warning` when only the pattern does
    pub severity: Severity,
}

/// Compact structural pattern of a value.
///
/// Digits become `#`, letters `A`, whitespace runs a single space; all other
/// characters are kept. Text values have an empty pattern.
#[must_use]
pub fn detect_pattern(raw: &str, data_type: DataType) -> String {
    if data_type.is_text() {
        return String::new();
    }

    let mut pattern = String::with_capacity(raw.len());
    let mut in_space = false;
    for c in raw.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                pattern.push(' ');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        pattern.push(if c.is_ascii_digit() {
            '#'
        } else if c.is_alphabetic() {
            'A'
        } else {
            c
        });
    }
    pattern
}

/// Format descriptors for every element showing a non-text value.
#[must_use]
pub fn describe_formats<'a, I>(elements: I) -> Vec<FormatDescriptor>
where
    I: IntoIterator<Item = &'a ElementDescriptor>,
{
    elements
        .into_iter()
        .filter_map(|element| {
            let extracted = extract_value(element)?;
            if extracted.data_type.is_text() {
                return None;
            }
            let label = element
                .label_text()
                .unwrap_or(element.id.as_str())
                .to_string();
            Some(FormatDescriptor {
                element_id: element.id.clone(),
                label,
                data_type: extracted.data_type,
                pattern: detect_pattern(&extracted.raw_value, extracted.data_type),
                example: extracted.raw_value,
            })
        })
        .collect()
}

/// Pair descriptors by label and report type or pattern differences.
#[must_use]
pub fn compare_formats(
    source: &[FormatDescriptor],
    target: &[FormatDescriptor],
    threshold: f64,
) -> Vec<FormatMismatch> {
    let source_labels: Vec<&str> = source.iter().map(|d| d.label.as_str()).collect();
    let target_labels: Vec<&str> = target.iter().map(|d| d.label.as_str()).collect();
    let matched = match_texts(&source_labels, &target_labels, threshold);

    matched
        .pairs
        .iter()
        .filter_map(|pair| {
            let s = &source[pair.source_index];
            let t = &target[pair.target_index];
            let severity = if s.data_type != t.data_type {
                Severity::Error
            } else if s.pattern != t.pattern {
                Severity::Warning
            } else {
                return None;
            };
            Some(FormatMismatch {
                label: s.label.clone(),
                source_element_id: s.element_id.clone(),
                target_element_id: t.element_id.clone(),
                source_type: s.data_type,
                target_type: t.data_type,
                source_pattern: s.pattern.clone(),
                target_pattern: t.pattern.clone(),
                source_example: s.example.clone(),
                target_example: t.example.clone(),
                severity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentRole;

    fn metric(id: &str, label: &str, value: &str) -> ElementDescriptor {
        ElementDescriptor::new(id)
            .with_content_role(ContentRole::Metric)
            .with_label(label)
            .with_value(value)
    }

    #[test]
    fn test_detect_pattern() {
        assert_eq!(detect_pattern("$1,200.00", DataType::Currency), "$#,###.##");
        assert_eq!(detect_pattern("1200.00  $", DataType::Currency), "####.## $");
        assert_eq!(detect_pattern("Jan 5, 2024", DataType::Date), "AAA #, ####");
        assert_eq!(detect_pattern("Hello", DataType::Text), "");
    }

    #[test]
    fn test_describe_formats_skips_text() {
        let elements = vec![
            metric("m1", "Revenue", "$1,200.00"),
            metric("m2", "Status", "Active"),
            ElementDescriptor::new("m3").with_value("42%"),
        ];
        let formats = describe_formats(&elements);
        assert_eq!(formats.len(), 2);
        assert_eq!(formats[0].label, "Revenue");
        assert_eq!(formats[0].pattern, "$#,###.##");
        assert_eq!(formats[1].label, "m3");
        assert_eq!(formats[1].data_type, DataType::Percentage);
    }

    #[test]
    fn test_compare_formats_severities() {
        let source = describe_formats(&[
            metric("s1", "Revenue", "$1,200.00"),
            metric("s2", "Growth", "12%"),
            metric("s3", "Users", "1,024"),
        ]);
        let target = describe_formats(&[
            metric("t1", "Revenue", "1200.00 $"),
            metric("t2", "Growth", "0.12"),
            metric("t3", "Users", "2,048"),
        ]);

        let mismatches = compare_formats(&source, &target, 0.8);
        assert_eq!(mismatches.len(), 2);

        let revenue = mismatches.iter().find(|m| m.label == "Revenue").unwrap();
        assert_eq!(revenue.severity, Severity::Warning);

        let growth = mismatches.iter().find(|m| m.label == "Growth").unwrap();
        assert_eq!(growth.severity, Severity::Error);
        assert_eq!(growth.source_type, DataType::Percentage);
        assert_eq!(growth.target_type, DataType::Number);
    }

    #[test]
    fn test_compare_formats_empty() {
        assert!(compare_formats(&[], &[], 0.8).is_empty());
    }
}
