//! Component comparison: logical groups paired by name and compared by
//! role composition.

use super::parity::CategoryCounts;
use crate::matching::match_texts;
use crate::model::ElementDescriptor;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Number of elements with one role inside a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCount {
    pub role: String,
    pub count: usize,
}

/// Two components paired by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPair {
    pub source_name: String,
    pub target_name: String,
    pub name_similarity: f64,
    pub source_roles: Vec<RoleCount>,
    pub target_roles: Vec<RoleCount>,
    /// Roles the target has fewer of
    pub missing_roles: Vec<String>,
    /// Roles the target has more of
    pub extra_roles: Vec<String>,
}

impl ComponentPair {
    /// Role compositions are identical
    #[must_use]
    pub fn is_equivalent(&self) -> bool {
        self.missing_roles.is_empty() && self.extra_roles.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentComparison {
    pub matched: Vec<ComponentPair>,
    pub changed: Vec<ComponentPair>,
    /// Component names without a counterpart
    pub source_only: Vec<String>,
    pub target_only: Vec<String>,
    pub counts: CategoryCounts,
    pub parity: Option<f64>,
}

/// Role composition of every component, in first-appearance order.
///
/// Elements without a role are counted as `"generic"`.
#[must_use]
pub fn group_components(elements: &[ElementDescriptor]) -> IndexMap<String, IndexMap<String, usize>> {
    let mut groups: IndexMap<String, IndexMap<String, usize>> = IndexMap::new();
    for element in elements.iter().filter(|e| e.visible) {
        let Some(component) = element.component.as_deref().map(str::trim) else {
            continue;
        };
        if component.is_empty() {
            continue;
        }
        let role = element
            .effective_role()
            .map_or_else(|| "generic".to_string(), str::to_lowercase);
        *groups
            .entry(component.to_string())
            .or_default()
            .entry(role)
            .or_insert(0) += 1;
    }
    groups
}

fn role_counts(roles: &IndexMap<String, usize>) -> Vec<RoleCount> {
    roles
        .iter()
        .map(|(role, &count)| RoleCount {
            role: role.clone(),
            count,
        })
        .collect()
}

fn composition_delta(
    source: &IndexMap<String, usize>,
    target: &IndexMap<String, usize>,
) -> (Vec<String>, Vec<String>) {
    let missing = source
        .iter()
        .filter(|(role, &count)| target.get(*role).copied().unwrap_or(0) < count)
        .map(|(role, _)| role.clone())
        .collect();
    let extra = target
        .iter()
        .filter(|(role, &count)| source.get(*role).copied().unwrap_or(0) < count)
        .map(|(role, _)| role.clone())
        .collect();
    (missing, extra)
}

/// Pair components by name; differing role compositions are changes.
#[must_use]
pub fn compare_components(
    source: &[ElementDescriptor],
    target: &[ElementDescriptor],
    threshold: f64,
    changed_credit: f64,
) -> ComponentComparison {
    let source_groups = group_components(source);
    let target_groups = group_components(target);
    let source_names: Vec<&str> = source_groups.keys().map(String::as_str).collect();
    let target_names: Vec<&str> = target_groups.keys().map(String::as_str).collect();
    let pairing = match_texts(&source_names, &target_names, threshold);

    let (matched, changed): (Vec<_>, Vec<_>) = pairing
        .pairs
        .iter()
        .filter_map(|pair| {
            let (source_name, source_roles) = source_groups.get_index(pair.source_index)?;
            let (target_name, target_roles) = target_groups.get_index(pair.target_index)?;
            let (missing_roles, extra_roles) = composition_delta(source_roles, target_roles);
            Some(ComponentPair {
                source_name: source_name.clone(),
                target_name: target_name.clone(),
                name_similarity: pair.score,
                source_roles: role_counts(source_roles),
                target_roles: role_counts(target_roles),
                missing_roles,
                extra_roles,
            })
        })
        .partition(ComponentPair::is_equivalent);

    let source_only: Vec<String> = pairing
        .unmatched_source
        .iter()
        .map(|&i| source_names[i].to_string())
        .collect();
    let target_only: Vec<String> = pairing
        .unmatched_target
        .iter()
        .map(|&j| target_names[j].to_string())
        .collect();
    let counts = CategoryCounts::new(
        matched.len(),
        changed.len(),
        source_only.len(),
        target_only.len(),
    );
    tracing::debug!(
        source = source_groups.len(),
        target = target_groups.len(),
        changed = counts.changed,
        "Compared components"
    );
    ComponentComparison {
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

    fn part(id: &str, component: &str, role: &str) -> ElementDescriptor {
        ElementDescriptor::new(id)
            .with_component(component)
            .with_role(role)
    }

    #[test]
    fn test_grouping_preserves_first_appearance() {
        let elements = vec![
            part("1", "Toolbar", "button"),
            part("2", "Sidebar", "link"),
            part("3", "Toolbar", "button"),
            ElementDescriptor::new("4").with_component("Toolbar"),
            ElementDescriptor::new("5").with_role("button"),
        ];
        let groups = group_components(&elements);
        let names: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Toolbar", "Sidebar"]);
        assert_eq!(groups["Toolbar"]["button"], 2);
        assert_eq!(groups["Toolbar"]["generic"], 1);
    }

    #[test]
    fn test_component_composition() {
        let source = vec![
            part("1", "Login Form", "textbox"),
            part("2", "Login Form", "textbox"),
            part("3", "Login Form", "button"),
            part("4", "Footer", "link"),
        ];
        let target = vec![
            part("a", "login form", "textbox"),
            part("b", "login form", "checkbox"),
            part("c", "login form", "button"),
            part("d", "Footer", "link"),
            part("e", "Banner", "img"),
        ];
        let result = compare_components(&source, &target, 0.75, 0.5);

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].source_name, "Footer");
        assert_eq!(result.changed.len(), 1);
        assert_eq!(result.changed[0].missing_roles, vec!["textbox"]);
        assert_eq!(result.changed[0].extra_roles, vec!["checkbox"]);
        assert_eq!(result.target_only, vec!["Banner"]);
        assert_eq!(result.parity, Some(1.5 / 3.0));
    }
}
