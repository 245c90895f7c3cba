//! The rule runtime: one lint pass over one document.

use lintel_common::warning::warn_once;
use lintel_html::Parser;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RuleSet;
use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::RuleRegistry;
use crate::reporter::Reporter;
use crate::rule::RuleParser;

/// A rule whose `init` failed during a pass. It reported nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleFailure {
    /// Id of the rule.
    pub rule: String,
    /// The error it returned.
    pub reason: String,
}

/// Outcome of [`Linter::verify`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    /// Diagnostics in document order.
    pub diagnostics: Vec<Diagnostic>,
    /// Rules that could not run.
    pub failures: Vec<RuleFailure>,
}

impl LintReport {
    /// True when there is nothing to report.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.failures.is_empty()
    }

    /// Number of diagnostics with `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    }
}

/// Runs the rules of a [`RuleRegistry`] over documents.
///
/// Each [`Linter::verify`] call builds its own parser and reporter, so one
/// linter can check any number of documents and repeated calls on the same
/// input give identical reports.
#[derive(Debug, Clone, Copy)]
pub struct Linter<'r> {
    registry: &'r RuleRegistry,
}

impl<'r> Linter<'r> {
    /// Create a linter over `registry`.
    #[must_use]
    pub const fn new(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    /// Lint `text` with the rules enabled by `rules`.
    ///
    /// An inline `<!-- lintel ... -->` comment at the top of `text` is
    /// applied on top of `rules`. Rule ids that are not registered are
    /// logged once and otherwise ignored.
    #[must_use]
    pub fn verify(&self, text: &str, rules: &RuleSet) -> LintReport {
        let rules = self.effective_rules(text, rules);

        let mut parser: RuleParser<'r, '_> = Parser::new();
        let mut failures = Vec::new();
        for rule in self.registry.iter().filter(|rule| rules.is_enabled(rule.id())) {
            let mark = parser.mark();
            if let Err(err) = rule.init(&mut parser) {
                parser.rollback(mark);
                warn!(rule = rule.id(), %err, "rule skipped");
                failures.push(RuleFailure {
                    rule: rule.id().to_string(),
                    reason: err.to_string(),
                });
            }
        }

        let mut reporter = Reporter::new(text);
        parser.parse(text, &mut reporter);
        let diagnostics = reporter.into_diagnostics();
        debug!(
            listeners = parser.listener_count(),
            diagnostics = diagnostics.len(),
            failures = failures.len(),
            "lint pass complete"
        );

        LintReport {
            diagnostics,
            failures,
        }
    }

    fn effective_rules(&self, text: &str, rules: &RuleSet) -> RuleSet {
        let mut rules = rules.clone();
        match RuleSet::from_inline_comment(text) {
            Ok(Some(inline)) => rules.merge(&inline),
            Ok(None) => {}
            Err(err) => warn!(%err, "ignoring malformed inline rule set"),
        }
        for (id, enabled) in rules.entries() {
            if enabled && self.registry.get(id).is_none() {
                let _ = warn_once("Rules", &format!("unknown rule `{id}` in rule set"));
            }
        }
        rules
    }
}
