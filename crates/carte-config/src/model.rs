use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Desired shape of a context menu.
///
/// Immutable while a transform runs; editing helpers below are for the
/// settings side and always produce a value that is then saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
    /// Rules in desired display order.
    #[serde(default)]
    pub items: Vec<ItemRule>,

    /// Titles suppressed unconditionally, even when a rule enables them.
    #[serde(default)]
    pub hidden_items: Vec<String>,

    /// Emit trace lines while customizing.
    #[serde(default, rename = "isDebug")]
    pub debug: bool,
}

/// How one entry, identified by its display title, should be presented.
///
/// Titles are the only key the host menu exposes, so a host that renames an
/// entry (or localizes it) silently breaks the rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRule {
    /// Display title to match, exact and case-sensitive.
    pub key: String,

    /// Replacement title.
    pub custom_label: String,

    /// `false` suppresses the entry.
    #[serde(default = "default_enabled", rename = "isEnabled")]
    pub enabled: bool,

    /// Narrows the match to entries launching into this package.
    #[serde(default)]
    pub package_name: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl ItemRule {
    pub fn new(key: impl Into<String>, custom_label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            custom_label: custom_label.into(),
            enabled: true,
            package_name: None,
        }
    }

    /// Scope the rule to entries whose destination belongs to `package`.
    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package_name = Some(package.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// True when this rule targets the same entry as `key` + `package`.
    pub fn targets(&self, key: &str, package: Option<&str>) -> bool {
        self.key == key && self.package_name.as_deref() == package
    }
}

impl MenuConfig {
    pub fn new(items: Vec<ItemRule>, hidden_items: Vec<String>) -> Self {
        Self {
            items,
            hidden_items,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn is_hidden(&self, title: &str) -> bool {
        self.hidden_items.iter().any(|hidden| hidden == title)
    }

    /// Reject configurations the engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        for (idx, rule) in self.items.iter().enumerate() {
            if rule.key.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "items[{idx}].key must not be empty"
                )));
            }
            if rule.package_name.as_deref() == Some("") {
                return Err(ConfigError::Invalid(format!(
                    "items[{idx}].packageName must be omitted rather than empty"
                )));
            }
        }

        if let Some(idx) = self.hidden_items.iter().position(String::is_empty) {
            return Err(ConfigError::Invalid(format!(
                "hiddenItems[{idx}] must not be empty"
            )));
        }

        Ok(())
    }

    /// Add `title` to the hidden list. Returns false if it was already there.
    pub fn hide(&mut self, title: &str) -> bool {
        if self.is_hidden(title) {
            return false;
        }
        self.hidden_items.push(title.to_string());
        true
    }

    /// Remove `title` from the hidden list. Returns false if it was absent.
    pub fn unhide(&mut self, title: &str) -> bool {
        let before = self.hidden_items.len();
        self.hidden_items.retain(|hidden| hidden != title);
        before != self.hidden_items.len()
    }

    /// Replace the first rule targeting the same key + package, or append.
    pub fn upsert_rule(&mut self, rule: ItemRule) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.targets(&rule.key, rule.package_name.as_deref()))
        {
            Some(existing) => *existing = rule,
            None => self.items.push(rule),
        }
    }

    /// Drop every rule targeting `key` + `package`. Returns how many went.
    pub fn remove_rule(&mut self, key: &str, package: Option<&str>) -> usize {
        let before = self.items.len();
        self.items.retain(|rule| !rule.targets(key, package));
        before - self.items.len()
    }
}
