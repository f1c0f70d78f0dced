//! Data type classification and value canonicalization.
//!
//! Classification is an explicit ordered rule list: the first rule with a
//! matching pattern wins, anything unmatched is [`DataType::Text`]. Order
//! matters because shapes overlap (`"5%"` is numeric, `"$5"` too).

use super::normalize_text;
use crate::model::ElementDescriptor;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Semantic category of a displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Currency,
    Date,
    Percentage,
    Number,
    Phone,
    Text,
}

impl DataType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::Date => "date",
            Self::Percentage => "percentage",
            Self::Number => "number",
            Self::Phone => "phone",
            Self::Text => "text",
        }
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// One entry of the ordered classifier: any pattern match selects the type.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    pub data_type: DataType,
    pub patterns: Vec<Regex>,
}

impl ClassificationRule {
    /// Compile a rule from pattern sources.
    pub fn new(data_type: DataType, patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            data_type,
            patterns,
        })
    }

    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(value))
    }
}

const CURRENCY_PATTERNS: &[&str] = &[
    r"^[-+]?\s*[$€£¥₹]\s*[-+]?\d[\d,.\s]*$",
    r"^[-+]?\d[\d,.\s]*[$€£¥₹]$",
    r"(?i)^[-+]?\s*(usd|eur|gbp|jpy|inr|cad|aud|chf|cny)\s*[-+]?\d[\d,.\s]*$",
    r"(?i)^[-+]?\d[\d,.\s]*\s(usd|eur|gbp|jpy|inr|cad|aud|chf|cny)$",
];

const PERCENTAGE_PATTERNS: &[&str] = &[r"^[-+]?\d[\d,.]*\s*%$", r"^[-+]?\.\d+\s*%$"];

const DATE_PATTERNS: &[&str] = &[
    r"^\d{4}-\d{1,2}-\d{1,2}$",
    r"^\d{1,2}/\d{1,2}/\d{2,4}$",
    r"^\d{1,2}\.\d{1,2}\.\d{2,4}$",
    r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2}(st|nd|rd|th)?,?\s+\d{4}$",
    r"(?i)^\d{1,2}(st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+\d{4}$",
];

const PHONE_PATTERNS: &[&str] = &[
    r"^\(\d{3}\)\s*\d{3}[\s.-]?\d{4}$",
    r"^\d{3}[\s.-]\d{3}[\s.-]\d{4}$",
    r"^\+\d{1,3}[\s.-]?(\(\d{1,4}\)|\d{1,4})([\s.-]?\d{2,4}){2,4}$",
];

const NUMBER_PATTERNS: &[&str] = &[
    r"^[-+]?\d{1,3}(,\d{3})+(\.\d+)?$",
    r"^[-+]?\d{1,3}(\.\d{3})+(,\d+)?$",
    r"^[-+]?\d+([.,]\d+)?$",
    r"^[-+]?\.\d+$",
];

/// Ordered list of classification rules.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
}

impl Classifier {
    /// Create a classifier from explicit rules
    #[must_use]
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    /// Built-in rules: currency, percentage, date, phone, number.
    #[must_use]
    pub fn builtin() -> Self {
        let table: [(DataType, &[&str]); 5] = [
            (DataType::Currency, CURRENCY_PATTERNS),
            (DataType::Percentage, PERCENTAGE_PATTERNS),
            (DataType::Date, DATE_PATTERNS),
            (DataType::Phone, PHONE_PATTERNS),
            (DataType::Number, NUMBER_PATTERNS),
        ];
        let rules = table
            .into_iter()
            .map(|(data_type, patterns)| {
                ClassificationRule::new(data_type, patterns).expect("static regex")
            })
            .collect();
        Self { rules }
    }

    /// Rules in evaluation order
    #[must_use]
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Classify a value. Total: unmatched input is `Text`.
    #[must_use]
    pub fn classify(&self, value: &str) -> DataType {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return DataType::Text;
        }
        self.rules
            .iter()
            .find(|rule| rule.matches(trimmed))
            .map_or(DataType::Text, |rule| rule.data_type)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builtin()
    }
}

static BUILTIN_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(Classifier::builtin);

/// Classify a value with the built-in rules.
#[must_use]
pub fn classify(value: &str) -> DataType {
    BUILTIN_CLASSIFIER.classify(value)
}

// ============================================================================
// Normalization
// ============================================================================

/// Canonical comparable form of `value` interpreted as `data_type`.
///
/// - currency: `"<amount, 2 decimals> <ISO code>"`
/// - percentage: canonical number followed by `%`
/// - date: ISO `YYYY-MM-DD` (slash dates month-first, dotted dates day-first)
/// - phone: `ddd-ddd-dddd` for ten national digits, else `+<digits>`
/// - number: shortest decimal form (`"1,234.50"` becomes `"1234.5"`)
/// - text: folded text, re-normalized if the folded form is a typed value
///
/// Anything that fails to parse falls back to folded text, so the result is
/// stable under re-classification and re-normalization.
#[must_use]
pub fn normalize_value(value: &str, data_type: DataType) -> String {
    let trimmed = value.trim();
    let normalized = match data_type {
        DataType::Currency => normalize_currency(trimmed),
        DataType::Percentage => parse_number(trimmed).map(|n| format!("{}%", format_number(n))),
        DataType::Date => normalize_date(trimmed),
        DataType::Phone => normalize_phone(trimmed),
        DataType::Number => parse_number(trimmed).map(format_number),
        DataType::Text => {
            let folded = normalize_text(trimmed);
            let reclassified = classify(&folded);
            return if reclassified.is_text() {
                folded
            } else {
                normalize_value(&folded, reclassified)
            };
        }
    };
    normalized.unwrap_or_else(|| normalize_text(trimmed))
}

/// Classify then normalize.
#[must_use]
pub fn normalize(value: &str) -> String {
    normalize_value(value, classify(value))
}

/// Parse a number whose thousand and decimal separators may be `.` or `,`.
///
/// When both occur the last one is the decimal separator. A lone comma
/// followed by exactly three digits, or repeated commas, are thousand
/// separators; repeated dots are thousand separators, a single dot is
/// decimal. Any `-` makes the value negative.
#[must_use]
pub fn parse_number(value: &str) -> Option<f64> {
    let body: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if !body.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let last_dot = body.rfind('.');
    let last_comma = body.rfind(',');
    let decimal_at = match (last_dot, last_comma) {
        (Some(d), Some(c)) => Some(d.max(c)),
        (Some(d), None) => (body.matches('.').count() == 1).then_some(d),
        (None, Some(c)) => {
            let digits_after = body.len() - c - 1;
            (body.matches(',').count() == 1 && digits_after != 3).then_some(c)
        }
        (None, None) => None,
    };

    let mut canonical = String::with_capacity(body.len() + 1);
    if value.contains('-') {
        canonical.push('-');
    }
    for (i, c) in body.char_indices() {
        if c.is_ascii_digit() {
            canonical.push(c);
        } else if Some(i) == decimal_at {
            canonical.push('.');
        }
    }

    canonical.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn format_number(n: f64) -> String {
    // -0 prints as "-0"
    let n = if n == 0.0 { 0.0 } else { n };
    format!("{n}")
}

static CURRENCY_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(usd|eur|gbp|jpy|inr|cad|aud|chf|cny)").expect("static regex")
});

fn currency_code(value: &str) -> Option<String> {
    let symbol = value.chars().find_map(|c| match c {
        '$' => Some("USD"),
        '€' => Some("EUR"),
        '£' => Some("GBP"),
        '¥' => Some("JPY"),
        '₹' => Some("INR"),
        _ => None,
    });
    symbol.map(str::to_string).or_else(|| {
        CURRENCY_CODE
            .find(value)
            .map(|m| m.as_str().to_uppercase())
    })
}

fn normalize_currency(value: &str) -> Option<String> {
    let code = currency_code(value)?;
    let amount = parse_number(value)?;
    let rounded = (amount * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    Some(format!("{rounded:.2} {code}"))
}

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("static regex"));
static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2,4})$").expect("static regex"));
static DOT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{2,4})$").expect("static regex"));
static MONTH_FIRST_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z]{3})[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})$")
        .expect("static regex")
});
static DAY_FIRST_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]{3})[a-z]*\.?,?\s+(\d{4})$")
        .expect("static regex")
});

fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = name.to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == lower)
        .and_then(|i| u32::try_from(i + 1).ok())
}

fn expand_year(year: &str) -> Option<i32> {
    let value: i32 = year.parse().ok()?;
    Some(match year.len() {
        2 if value < 70 => 2000 + value,
        2 => 1900 + value,
        _ => value,
    })
}

fn normalize_date(value: &str) -> Option<String> {
    let (year, month, day): (i32, u32, u32) = if let Some(c) = ISO_DATE.captures(value) {
        (c[1].parse().ok()?, c[2].parse().ok()?, c[3].parse().ok()?)
    } else if let Some(c) = SLASH_DATE.captures(value) {
        (expand_year(&c[3])?, c[1].parse().ok()?, c[2].parse().ok()?)
    } else if let Some(c) = DOT_DATE.captures(value) {
        (expand_year(&c[3])?, c[2].parse().ok()?, c[1].parse().ok()?)
    } else if let Some(c) = MONTH_FIRST_DATE.captures(value) {
        (c[3].parse().ok()?, month_number(&c[1])?, c[2].parse().ok()?)
    } else if let Some(c) = DAY_FIRST_DATE.captures(value) {
        (c[3].parse().ok()?, month_number(&c[2])?, c[1].parse().ok()?)
    } else {
        return None;
    };

    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%Y-%m-%d").to_string())
}

fn normalize_phone(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    let national = match digits.len() {
        10 => Some(digits.as_str()),
        11 if digits.starts_with('1') => Some(&digits[1..]),
        _ => None,
    };
    match national {
        Some(n) => Some(format!("{}-{}-{}", &n[..3], &n[3..6], &n[6..])),
        None if digits.is_empty() => None,
        None => Some(format!("+{digits}")),
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// A classified and normalized value read from one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDataValue {
    pub element_id: String,
    pub raw_value: String,
    pub data_type: DataType,
    pub normalized_value: String,
}

impl ExtractedDataValue {
    /// Classify and normalize a raw value.
    #[must_use]
    pub fn from_raw(element_id: impl Into<String>, raw: &str) -> Self {
        let raw_value = raw.trim().to_string();
        let data_type = classify(&raw_value);
        let normalized_value = normalize_value(&raw_value, data_type);
        Self {
            element_id: element_id.into(),
            raw_value,
            data_type,
            normalized_value,
        }
    }
}

/// Extract the displayed value of an element: `value`, falling back to
/// visible text. `None` when the element shows nothing.
#[must_use]
pub fn extract_value(element: &ElementDescriptor) -> Option<ExtractedDataValue> {
    element
        .value_text()
        .map(|raw| ExtractedDataValue::from_raw(&element.id, raw))
}
