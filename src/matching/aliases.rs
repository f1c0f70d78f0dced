//! Alias generation for natural-language element lookup.
//!
//! Aliases are alternative names derived from an element's visible
//! attributes plus an injected [`SynonymTable`]. The table is plain
//! configuration, so engines with different vocabularies can run side by
//! side.

use super::string_similarity::tokenize;
use crate::model::ElementDescriptor;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default cap on aliases generated per element.
pub const DEFAULT_MAX_ALIASES: usize = 10;

/// A group of interchangeable phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SynonymGroup {
    /// Phrases that select this group when found in an element's text
    pub triggers: Vec<String>,
    /// Phrases added as aliases when the group is selected
    pub synonyms: Vec<String>,
}

impl SynonymGroup {
    #[must_use]
    pub fn new(triggers: &[&str], synonyms: &[&str]) -> Self {
        Self {
            triggers: triggers.iter().map(|t| normalize_for_alias(t)).collect(),
            synonyms: synonyms.iter().map(|s| normalize_for_alias(s)).collect(),
        }
    }
}

/// Ordered synonym groups. The first group with a matching trigger wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SynonymTable {
    groups: Vec<SynonymGroup>,
}

impl SynonymTable {
    /// Create an empty synonym table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the built-in UI vocabulary
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        table.load_builtins();
        table
    }

    fn load_builtins(&mut self) {
        // Form actions
        self.add_group(&["submit", "send", "go"], &["submit", "send", "go", "confirm"]);
        self.add_group(
            &["sign in", "signin", "log in", "login"],
            &["sign in", "signin", "log in", "login", "authenticate"],
        );
        self.add_group(
            &["sign up", "signup", "register", "create account"],
            &["sign up", "signup", "register", "create account", "join"],
        );
        self.add_group(
            &["sign out", "signout", "log out", "logout"],
            &["sign out", "signout", "log out", "logout", "exit"],
        );
        self.add_group(
            &["cancel", "close", "dismiss", "x"],
            &["cancel", "close", "dismiss", "exit", "abort"],
        );
        self.add_group(
            &["save", "store", "keep"],
            &["save", "store", "keep", "persist", "apply"],
        );
        self.add_group(
            &["delete", "remove", "trash"],
            &["delete", "remove", "trash", "discard", "erase"],
        );
        self.add_group(
            &["edit", "modify", "change", "update"],
            &["edit", "modify", "change", "update", "alter"],
        );
        self.add_group(
            &["search", "find", "lookup"],
            &["search", "find", "lookup", "query", "filter"],
        );

        // Navigation
        self.add_group(
            &["next", "continue", "proceed", "forward"],
            &["next", "continue", "proceed", "forward", "advance"],
        );
        self.add_group(
            &["back", "previous", "prev", "return"],
            &["back", "previous", "prev", "return", "go back"],
        );
        self.add_group(
            &["start", "begin", "launch", "run"],
            &["start", "begin", "launch", "run", "execute", "initiate"],
        );
        self.add_group(
            &["stop", "end", "halt", "pause"],
            &["stop", "end", "halt", "pause", "terminate"],
        );
        self.add_group(
            &["add", "create", "new", "plus"],
            &["add", "create", "new", "plus", "insert"],
        );
        self.add_group(
            &["download", "export", "save as"],
            &["download", "export", "save as", "get"],
        );
        self.add_group(
            &["upload", "import", "attach"],
            &["upload", "import", "attach", "add file"],
        );

        // Dialog answers
        self.add_group(
            &["confirm", "ok", "okay", "yes", "accept"],
            &["confirm", "ok", "okay", "yes", "accept", "agree"],
        );
        self.add_group(
            &["deny", "no", "reject", "decline"],
            &["deny", "no", "reject", "decline", "refuse"],
        );

        // Sections
        self.add_group(
            &["help", "support", "info", "information"],
            &["help", "support", "info", "information", "faq"],
        );
        self.add_group(
            &["settings", "preferences", "options", "config"],
            &["settings", "preferences", "options", "config", "configure"],
        );
        self.add_group(
            &["profile", "account", "user"],
            &["profile", "account", "user", "my account"],
        );
        self.add_group(
            &["home", "main", "dashboard"],
            &["home", "main", "dashboard", "start page"],
        );
        self.add_group(
            &["menu", "navigation", "nav"],
            &["menu", "navigation", "nav", "hamburger"],
        );

        // Content actions
        self.add_group(
            &["refresh", "reload", "update"],
            &["refresh", "reload", "update", "sync"],
        );
        self.add_group(
            &["copy", "duplicate", "clone"],
            &["copy", "duplicate", "clone", "replicate"],
        );
        self.add_group(&["paste", "insert"], &["paste", "insert", "put"]);
        self.add_group(
            &["share", "send to"],
            &["share", "send to", "forward", "distribute"],
        );
        self.add_group(
            &["view", "show", "display", "see"],
            &["view", "show", "display", "see", "reveal"],
        );
        self.add_group(
            &["hide", "conceal"],
            &["hide", "conceal", "collapse", "minimize"],
        );
        self.add_group(
            &["expand", "more", "show more"],
            &["expand", "more", "show more", "details", "see all"],
        );
        self.add_group(
            &["collapse", "less", "show less"],
            &["collapse", "less", "show less", "hide details"],
        );
    }

    /// Append a synonym group. Phrases are normalized on insertion.
    pub fn add_group(&mut self, triggers: &[&str], synonyms: &[&str]) {
        self.groups.push(SynonymGroup::new(triggers, synonyms));
    }

    /// Groups in lookup order
    #[must_use]
    pub fn groups(&self) -> &[SynonymGroup] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Synonyms of the first group with a trigger occurring in `text` as a
    /// whole-word sequence. The text itself is never returned.
    #[must_use]
    pub fn synonyms_for(&self, text: &str) -> Vec<String> {
        let normalized = normalize_for_alias(text);
        if normalized.is_empty() {
            return Vec::new();
        }
        let padded = format!(" {normalized} ");

        // Groups deserialized from config are not normalized on insertion.
        let Some(group) = self.groups.iter().find(|g| {
            g.triggers.iter().any(|t| {
                let trigger = normalize_for_alias(t);
                !trigger.is_empty() && padded.contains(&format!(" {trigger} "))
            })
        }) else {
            return Vec::new();
        };

        let mut synonyms: Vec<String> = Vec::new();
        for synonym in group.synonyms.iter().map(|s| normalize_for_alias(s)) {
            if !synonym.is_empty() && synonym != normalized && !synonyms.contains(&synonym) {
                synonyms.push(synonym);
            }
        }
        synonyms
    }

    /// Load synonym groups from JSON, appending to the existing groups
    pub fn load_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let groups: Vec<SynonymGroup> = serde_json::from_str(json)?;
        for group in groups {
            let triggers: Vec<&str> = group.triggers.iter().map(String::as_str).collect();
            let synonyms: Vec<&str> = group.synonyms.iter().map(String::as_str).collect();
            self.add_group(&triggers, &synonyms);
        }
        Ok(())
    }

    /// Export synonym groups to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.groups)
    }
}

/// Fold text into alias form: trim, lowercase, keep only alphanumerics and
/// whitespace, collapse whitespace runs.
#[must_use]
pub fn normalize_for_alias(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generic element-type word ("button", "link", "email input", ...).
#[must_use]
pub fn element_type_word(element: &ElementDescriptor) -> Option<String> {
    let kind = element
        .role
        .as_deref()
        .or(element.tag_name.as_deref())?
        .trim()
        .to_lowercase();

    let word = match kind.as_str() {
        "" => return None,
        "a" | "link" => "link",
        "select" | "combobox" | "listbox" => "dropdown",
        "searchbox" => "search input",
        "checkbox" => "checkbox",
        "radio" => "radio",
        "input" | "textbox" => return Some(input_type_word(element)),
        other => other,
    };
    Some(word.to_string())
}

fn input_type_word(element: &ElementDescriptor) -> String {
    let hints = [
        element.placeholder.as_deref(),
        element.label.as_deref(),
        element.accessible_name.as_deref(),
    ];
    for hint in hints.into_iter().flatten() {
        let lower = hint.to_lowercase();
        if lower.contains("email") {
            return "email input".to_string();
        }
        if lower.contains("password") {
            return "password input".to_string();
        }
        if lower.contains("search") {
            return "search input".to_string();
        }
        if lower.contains("phone") || lower.contains("tel") {
            return "phone input".to_string();
        }
    }
    "input".to_string()
}

/// Generate ordered, deduplicated aliases for an element.
///
/// Sources in priority order: visible text and its synonyms, accessible
/// name and its synonyms, label, placeholder, title, identifier tokens of
/// the id, and the element-type word. At most `max_aliases` are kept.
#[must_use]
pub fn generate_aliases(
    element: &ElementDescriptor,
    synonyms: &SynonymTable,
    max_aliases: usize,
) -> Vec<String> {
    fn push(alias: String, aliases: &mut Vec<String>) {
        if !alias.is_empty() && !aliases.contains(&alias) {
            aliases.push(alias);
        }
    }

    let mut aliases: Vec<String> = Vec::new();

    for source in [element.text.as_deref(), element.accessible_name.as_deref()]
        .into_iter()
        .flatten()
    {
        let normalized = normalize_for_alias(source);
        if normalized.is_empty() {
            continue;
        }
        push(normalized.clone(), &mut aliases);
        for synonym in synonyms.synonyms_for(&normalized) {
            push(synonym, &mut aliases);
        }
    }

    for source in [
        element.label.as_deref(),
        element.placeholder.as_deref(),
        element.title.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        push(normalize_for_alias(source), &mut aliases);
    }

    push(tokenize(&element.id).join(" "), &mut aliases);

    if let Some(word) = element_type_word(element) {
        push(normalize_for_alias(&word), &mut aliases);
    }

    aliases.truncate(max_aliases);
    aliases
}

/// Aliases for every element of a collection, in element order.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    entries: Vec<(String, Vec<String>)>,
}

impl AliasIndex {
    /// Build the index for `elements`.
    #[must_use]
    pub fn build(
        elements: &[ElementDescriptor],
        synonyms: &SynonymTable,
        max_aliases: usize,
    ) -> Self {
        let entries = elements
            .iter()
            .map(|e| (e.id.clone(), generate_aliases(e, synonyms, max_aliases)))
            .collect();
        Self { entries }
    }

    /// Aliases of the first element with this id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, aliases)| aliases.as_slice())
    }

    /// Aliases of the element at `index`
    #[must_use]
    pub fn at(&self, index: usize) -> &[String] {
        self.entries
            .get(index)
            .map_or(&[], |(_, aliases)| aliases.as_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(id, aliases)` in element order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(id, aliases)| (id.as_str(), aliases.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_for_alias() {
        assert_eq!(normalize_for_alias("  Sign In  "), "sign in");
        assert_eq!(normalize_for_alias("Submit!@#Form"), "submitform");
        assert_eq!(normalize_for_alias("Enter   Email"), "enter email");
    }

    #[test]
    fn test_synonyms_for_builtins() {
        let table = SynonymTable::with_builtins();

        let synonyms = table.synonyms_for("Sign In");
        assert!(synonyms.contains(&"login".to_string()));
        assert!(synonyms.contains(&"authenticate".to_string()));
        assert!(!synonyms.contains(&"sign in".to_string()));

        let synonyms = table.synonyms_for("submit");
        assert!(synonyms.contains(&"send".to_string()));
        assert!(synonyms.contains(&"confirm".to_string()));
    }

    #[test]
    fn test_synonyms_require_whole_words() {
        let table = SynonymTable::with_builtins();
        // "x" must not fire inside "export", "go" not inside "google"
        assert!(!table.synonyms_for("google").contains(&"confirm".to_string()));
        let export = table.synonyms_for("export data");
        assert!(export.contains(&"download".to_string()));
        assert!(!export.contains(&"abort".to_string()));
    }

    #[test]
    fn test_update_triggers_edit_group_before_refresh() {
        let table = SynonymTable::with_builtins();
        let synonyms = table.synonyms_for("Update");
        assert!(synonyms.contains(&"edit".to_string()));
        assert!(synonyms.contains(&"modify".to_string()));
        assert!(!synonyms.contains(&"sync".to_string()));

        let synonyms = table.synonyms_for("reload");
        assert!(synonyms.contains(&"sync".to_string()));
    }

    #[test]
    fn test_first_group_wins() {
        let mut table = SynonymTable::new();
        table.add_group(&["save"], &["persist"]);
        table.add_group(&["save"], &["store"]);
        assert_eq!(table.synonyms_for("save"), vec!["persist".to_string()]);
        assert!(table.synonyms_for("unrelated").is_empty());
    }

    #[test]
    fn test_json_roundtrip_preserves_order() {
        let mut table = SynonymTable::new();
        table
            .load_json(r#"[{"triggers": ["Buy"], "synonyms": ["purchase", "checkout"]}]"#)
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.synonyms_for("buy now"),
            vec!["purchase".to_string(), "checkout".to_string()]
        );

        let mut copy = SynonymTable::new();
        copy.load_json(&table.to_json().unwrap()).unwrap();
        assert_eq!(copy, table);
    }

    #[test]
    fn test_generate_aliases_sources() {
        let element = ElementDescriptor::new("emailField")
            .with_tag_name("input")
            .with_placeholder("Email address")
            .with_accessible_name("Enter your email");
        let aliases = generate_aliases(&element, &SynonymTable::new(), DEFAULT_MAX_ALIASES);

        assert_eq!(
            aliases,
            vec![
                "enter your email".to_string(),
                "email address".to_string(),
                "email field".to_string(),
                "email input".to_string(),
            ]
        );
    }

    #[test]
    fn test_generate_aliases_with_synonyms_and_cap() {
        let element = ElementDescriptor::new("btn")
            .with_role("button")
            .with_text("Sign In");
        let table = SynonymTable::with_builtins();

        let aliases = generate_aliases(&element, &table, DEFAULT_MAX_ALIASES);
        assert_eq!(aliases[0], "sign in");
        assert!(aliases.contains(&"login".to_string()));
        assert!(aliases.contains(&"button".to_string()));

        let capped = generate_aliases(&element, &table, 2);
        assert_eq!(capped.len(), 2);
    }

    #[test]
    fn test_element_type_words() {
        let link = ElementDescriptor::new("l").with_tag_name("a");
        assert_eq!(element_type_word(&link).as_deref(), Some("link"));

        let select = ElementDescriptor::new("s").with_tag_name("select");
        assert_eq!(element_type_word(&select).as_deref(), Some("dropdown"));

        let phone = ElementDescriptor::new("p")
            .with_role("textbox")
            .with_label("Phone number");
        assert_eq!(element_type_word(&phone).as_deref(), Some("phone input"));

        assert!(element_type_word(&ElementDescriptor::new("bare")).is_none());
    }

    #[test]
    fn test_alias_index_lookup() {
        let elements = vec![
            ElementDescriptor::new("save-btn").with_text("Save"),
            ElementDescriptor::new("cancel-btn").with_text("Cancel"),
        ];
        let index = AliasIndex::build(&elements, &SynonymTable::with_builtins(), 10);

        assert_eq!(index.len(), 2);
        assert!(index.get("save-btn").unwrap().contains(&"persist".to_string()));
        assert!(index.at(1).contains(&"abort".to_string()));
        assert!(index.get("missing").is_none());
        assert!(index.at(9).is_empty());
    }
}
