//! Navigation mapping: pair links by text and compare their destinations.

use super::parity::{CategoryCounts, Unpaired};
use super::{eligible, pair_eligible, unpaired};
use crate::model::{ContentRole, ElementDescriptor};
use serde::{Deserialize, Serialize};

/// Navigation links: content role `nav-link`, or role `link`, `menuitem`
/// or `tab`.
#[must_use]
pub fn is_navigation(element: &ElementDescriptor) -> bool {
    element.content_role == Some(ContentRole::NavLink)
        || ["link", "menuitem", "tab"]
            .iter()
            .any(|role| element.has_role(role))
}

fn link_key(element: &ElementDescriptor) -> String {
    element.display_text().unwrap_or_default().to_string()
}

/// Reduce a link target to a comparable path.
///
/// Drops scheme, host, query and fragment; lowercases; strips the trailing
/// slash. The root path stays `/`.
#[must_use]
pub fn normalize_href(href: &str) -> String {
    let href = href.trim();
    let href = href.split(['#', '?']).next().unwrap_or_default();
    let path = match href.find("://") {
        Some(scheme_end) => {
            let rest = &href[scheme_end + 3..];
            rest.find('/').map_or("/", |slash| &rest[slash..])
        }
        None => href,
    };
    let path = path.to_lowercase();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Two links paired by their text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPair {
    pub source_id: String,
    pub target_id: String,
    pub source_text: String,
    pub target_text: String,
    pub text_similarity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_href: Option<String>,
    /// Normalized destinations agree (both absent counts as agreeing)
    pub href_match: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationComparison {
    pub matched: Vec<NavigationPair>,
    pub changed: Vec<NavigationPair>,
    pub source_only: Vec<Unpaired>,
    pub target_only: Vec<Unpaired>,
    pub counts: CategoryCounts,
    pub parity: Option<f64>,
}

/// Pair navigation links by text; differing destinations are changes.
#[must_use]
pub fn compare_navigation(
    source: &[ElementDescriptor],
    target: &[ElementDescriptor],
    threshold: f64,
    changed_credit: f64,
) -> NavigationComparison {
    let source = eligible(source, is_navigation, link_key);
    let target = eligible(target, is_navigation, link_key);
    let pairing = pair_eligible(&source, &target, threshold);

    let (matched, changed): (Vec<_>, Vec<_>) = pairing
        .pairs
        .iter()
        .map(|pair| {
            let s = source[pair.source_index].element;
            let t = target[pair.target_index].element;
            let href_match = s.href.as_deref().map(normalize_href)
                == t.href.as_deref().map(normalize_href);
            NavigationPair {
                source_id: s.id.clone(),
                target_id: t.id.clone(),
                source_text: source[pair.source_index].key.clone(),
                target_text: target[pair.target_index].key.clone(),
                text_similarity: pair.score,
                source_href: s.href.clone(),
                target_href: t.href.clone(),
                href_match,
            }
        })
        .partition(|pair| pair.href_match);

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
        source_only = counts.source_only,
        target_only = counts.target_only,
        "Compared navigation"
    );
    NavigationComparison {
        matched,
        changed,
        source_only,
        target_only,
        parity: counts.parity(changed_credit),
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str, text: &str, href: &str) -> ElementDescriptor {
        ElementDescriptor::new(id)
            .with_role("link")
            .with_text(text)
            .with_href(href)
    }

    #[test]
    fn test_normalize_href() {
        assert_eq!(normalize_href("https://app.example.com/Settings/?tab=1#top"), "/settings");
        assert_eq!(normalize_href("/settings/"), "/settings");
        assert_eq!(normalize_href("https://example.com"), "/");
        assert_eq!(normalize_href("/"), "/");
        assert_eq!(normalize_href("#section"), "");
        assert_eq!(normalize_href("reports/daily"), "reports/daily");
    }

    #[test]
    fn test_navigation_pairs() {
        let source = vec![
            link("s1", "Home", "/"),
            link("s2", "Settings", "/settings"),
            link("s3", "Billing", "/billing"),
        ];
        let target = vec![
            link("t1", "Home", "https://other.app/"),
            link("t2", "Settings", "/preferences"),
        ];
        let result = compare_navigation(&source, &target, 0.75, 0.5);

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].source_id, "s1");
        assert_eq!(result.changed.len(), 1);
        assert!(!result.changed[0].href_match);
        assert_eq!(result.source_only[0].element_id, "s3");
        assert_eq!(result.parity, Some(1.5 / 3.0));
    }

    #[test]
    fn test_navigation_predicate() {
        assert!(is_navigation(&ElementDescriptor::new("a").with_role("tab")));
        assert!(is_navigation(
            &ElementDescriptor::new("b").with_content_role(ContentRole::NavLink)
        ));
        assert!(!is_navigation(&ElementDescriptor::new("c").with_role("button")));
    }
}
