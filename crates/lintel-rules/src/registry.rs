//! The set of rules a linter can run.

use core::fmt;

use tracing::warn;

use crate::rule::Rule;
use crate::rules;

/// Rule definitions keyed by id, in registration order.
///
/// The registry is an ordinary value owned by the caller; nothing is global.
/// Registering an id a second time replaces the earlier definition in place.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in rule.
    #[must_use]
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        for rule in rules::builtin() {
            registry.add_rule(rule);
        }
        registry
    }

    /// Register `rule`. A rule with the same id is replaced, keeping its
    /// place in the initialisation order.
    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        let id = rule.id();
        if let Some(existing) = self.rules.iter_mut().find(|existing| existing.id() == id) {
            warn!(rule = id, "rule registered twice; replacing the earlier definition");
            *existing = rule;
        } else {
            self.rules.push(rule);
        }
    }

    /// Ids of the registered rules, in registration order.
    pub fn rule_ids(&self) -> impl Iterator<Item = &'static str> {
        self.rules.iter().map(|rule| rule.id())
    }

    /// The rule registered as `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.id() == id)
            .map(Box::as_ref)
    }

    /// The registered rules, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(Box::as_ref)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rule_ids()).finish()
    }
}
