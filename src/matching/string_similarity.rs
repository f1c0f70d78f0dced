//! String similarity algorithms for element matching.
//!
//! Edit distance and Jaro come from `strsim`; Jaro-Winkler is layered on
//! top so the prefix scale can be configured. Token and n-gram measures
//! cover reordered or partially overlapping labels.

use std::collections::HashSet;

/// Default Jaro-Winkler prefix scale.
pub const DEFAULT_PREFIX_SCALE: f64 = 0.1;

/// Longest common prefix considered by Jaro-Winkler.
const MAX_PREFIX_LEN: usize = 4;

/// Unit-cost Levenshtein distance over characters.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Normalized edit similarity: `1 - distance / max(|a|, |b|)`.
///
/// Both empty is a perfect match; exactly one empty scores 0.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();

    match (len_a, len_b) {
        (0, 0) => 1.0,
        (0, _) | (_, 0) => 0.0,
        _ => {
            let max_len = len_a.max(len_b);
            1.0 - edit_distance(a, b) as f64 / max_len as f64
        }
    }
}

/// Jaro similarity. Returns 0 when the strings share no matching characters.
#[must_use]
pub fn jaro(a: &str, b: &str) -> f64 {
    strsim::jaro(a, b)
}

/// Jaro-Winkler similarity with the default prefix scale of 0.1.
#[must_use]
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    jaro_winkler_with_scale(a, b, DEFAULT_PREFIX_SCALE)
}

/// Jaro-Winkler similarity with an explicit prefix scale.
///
/// `score = jaro + prefix_len * prefix_scale * (1 - jaro)` where the
/// shared prefix is capped at four characters. The result is clamped to
/// `[0, 1]` so scales above 0.25 cannot overshoot.
#[must_use]
pub fn jaro_winkler_with_scale(a: &str, b: &str, prefix_scale: f64) -> f64 {
    let base = jaro(a, b);
    let prefix_len = a
        .chars()
        .zip(b.chars())
        .take_while(|(ca, cb)| ca == cb)
        .take(MAX_PREFIX_LEN)
        .count();

    (prefix_len as f64 * prefix_scale)
        .mul_add(1.0 - base, base)
        .clamp(0.0, 1.0)
}

/// Jaccard coefficient of character n-gram sets.
///
/// A string shorter than `n` contributes itself as a single gram, so two
/// empty strings compare equal. `n == 0` is treated as unigrams.
#[must_use]
pub fn ngram_jaccard(a: &str, b: &str, n: usize) -> f64 {
    let n = n.max(1);
    let grams_a = ngrams(a, n);
    let grams_b = ngrams(b, n);

    let intersection = grams_a.intersection(&grams_b).count();
    let union = grams_a.union(&grams_b).count();

    if union > 0 {
        intersection as f64 / union as f64
    } else {
        0.0
    }
}

fn ngrams(s: &str, n: usize) -> HashSet<String> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() < n {
        return std::iter::once(s.to_string()).collect();
    }
    chars.windows(n).map(|w| w.iter().collect()).collect()
}

/// Split an identifier or phrase into lowercase tokens.
///
/// Handles camelCase, PascalCase, acronyms (`"URLInput"` becomes
/// `["url", "input"]`), digit runs, and any non-alphanumeric separator
/// such as `_`, `-`, `.` or whitespace.
#[must_use]
pub fn tokenize(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            flush(&mut current, &mut tokens);
            continue;
        }

        if !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (c.is_uppercase() && (prev.is_lowercase() || prev.is_numeric()))
                || (c.is_uppercase() && prev.is_uppercase() && next_is_lower)
                || (c.is_numeric() != prev.is_numeric());
            if boundary {
                flush(&mut current, &mut tokens);
            }
        }
        current.extend(c.to_lowercase());
    }
    flush(&mut current, &mut tokens);

    tokens
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

/// Jaccard similarity of the token sets produced by [`tokenize`].
///
/// Catches reordered names like `"submitButton"` vs `"button-submit"`.
#[must_use]
pub fn token_jaccard(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<String> = tokenize(a).into_iter().collect();
    let tokens_b: HashSet<String> = tokenize(b).into_iter().collect();

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 1.0;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    intersection as f64 / union as f64
}
