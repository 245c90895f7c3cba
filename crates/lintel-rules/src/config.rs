//! Rule set configuration.
//!
//! A rule set switches rules on and off by id. It can be read from three
//! places:
//! - a JSON object, `{"tag-pair": true, "attr-lowercase": false}`
//! - a comma separated list, `tag-pair,attr-lowercase:false`
//! - an inline comment opening the document, `<!-- lintel tag-pair -->`

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ConfigError;

/// Keyword that marks an inline rule set comment.
const INLINE_KEYWORD: &str = "lintel";

/// Which rules run.
///
/// Rules named explicitly are on or off as written. Every other rule follows
/// the fallback: on for [`RuleSet::all`], off for [`RuleSet::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    fallback: bool,
    entries: BTreeMap<String, bool>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::all()
    }
}

impl RuleSet {
    /// A rule set that enables nothing until rules are named.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fallback: false,
            entries: BTreeMap::new(),
        }
    }

    /// A rule set that enables every registered rule.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            fallback: true,
            entries: BTreeMap::new(),
        }
    }

    /// Parse a JSON object mapping rule ids to booleans.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for malformed JSON, [`ConfigError::NotAnObject`]
    /// when the top level is not an object, [`ConfigError::InvalidValue`]
    /// when a value is not a boolean.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let Value::Object(map) = serde_json::from_str::<Value>(text)? else {
            return Err(ConfigError::NotAnObject);
        };
        let mut rules = Self::new();
        for (id, value) in map {
            let Value::Bool(enabled) = value else {
                return Err(ConfigError::InvalidValue { rule: id });
            };
            rules.set(id, enabled);
        }
        Ok(rules)
    }

    /// Parse a comma separated list such as `tag-pair,attr-lowercase:false`.
    ///
    /// An entry is enabled unless its value is exactly `false`. The empty
    /// string yields an empty rule set.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyRuleId`] when an entry has no id.
    pub fn from_list(text: &str) -> Result<Self, ConfigError> {
        let mut rules = Self::new();
        if text.trim().is_empty() {
            return Ok(rules);
        }
        for entry in text.split(',') {
            let (id, value) = entry.split_once(':').unwrap_or((entry, ""));
            let id = id.trim();
            if id.is_empty() {
                return Err(ConfigError::EmptyRuleId);
            }
            rules.set(id, value.trim() != "false");
        }
        Ok(rules)
    }

    /// Read the rule set of an inline `<!-- lintel ... -->` comment.
    ///
    /// The comment must open the document (leading whitespace aside) and fit
    /// on one line; the keyword is matched case-insensitively. Returns
    /// `Ok(None)` when there is no such comment.
    ///
    /// # Errors
    ///
    /// Same as [`RuleSet::from_list`].
    pub fn from_inline_comment(document: &str) -> Result<Option<Self>, ConfigError> {
        let Some(body) = document.trim_start().strip_prefix("<!--") else {
            return Ok(None);
        };
        let Some(end) = body.find("-->") else {
            return Ok(None);
        };
        let body = body[..end].trim();
        if body.contains(['\r', '\n']) {
            return Ok(None);
        }
        let Some((keyword, list)) = body.split_once(char::is_whitespace) else {
            return Ok(None);
        };
        if !keyword.eq_ignore_ascii_case(INLINE_KEYWORD) {
            return Ok(None);
        }
        Self::from_list(list).map(Some)
    }

    /// Switch one rule on or off.
    pub fn set(&mut self, id: impl Into<String>, enabled: bool) {
        let _ = self.entries.insert(id.into(), enabled);
    }

    /// Switch one rule on.
    pub fn enable(&mut self, id: impl Into<String>) {
        self.set(id, true);
    }

    /// Switch one rule off.
    pub fn disable(&mut self, id: impl Into<String>) {
        self.set(id, false);
    }

    /// Apply the entries of `other` on top of this rule set.
    pub fn merge(&mut self, other: &Self) {
        for (id, &enabled) in &other.entries {
            self.set(id.clone(), enabled);
        }
    }

    /// Whether the rule `id` runs.
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.entries.get(id).copied().unwrap_or(self.fallback)
    }

    /// Rules named explicitly, sorted by id.
    pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries
            .iter()
            .map(|(id, &enabled)| (id.as_str(), enabled))
    }
}
