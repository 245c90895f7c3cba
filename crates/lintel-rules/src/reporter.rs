use crate::diagnostic::{Diagnostic, Severity};

/// Collects the diagnostics of one lint pass.
///
/// Every listener is handed the reporter of the pass it runs in. Reports are
/// kept in the order they arrive, which is document order because dispatch
/// is. Nothing is deduplicated.
#[derive(Debug, Clone)]
pub struct Reporter<'s> {
    lines: Vec<&'s str>,
    diagnostics: Vec<Diagnostic>,
}

impl<'s> Reporter<'s> {
    /// Create a reporter for `source`, the document being linted.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        let lines = source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        Self {
            lines,
            diagnostics: Vec::new(),
        }
    }

    /// Report a [`Severity::Warning`].
    pub fn warn(
        &mut self,
        message: impl Into<String>,
        line: usize,
        column: usize,
        rule_id: &str,
        raw: &str,
    ) {
        self.report(Severity::Warning, message, line, column, rule_id, raw);
    }

    /// Report a [`Severity::Error`].
    pub fn error(
        &mut self,
        message: impl Into<String>,
        line: usize,
        column: usize,
        rule_id: &str,
        raw: &str,
    ) {
        self.report(Severity::Error, message, line, column, rule_id, raw);
    }

    /// Report a [`Severity::Info`].
    pub fn info(
        &mut self,
        message: impl Into<String>,
        line: usize,
        column: usize,
        rule_id: &str,
        raw: &str,
    ) {
        self.report(Severity::Info, message, line, column, rule_id, raw);
    }

    /// Append one diagnostic. `line` is 1-based; an out of range line gets
    /// empty evidence.
    pub fn report(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        line: usize,
        column: usize,
        rule_id: &str,
        raw: &str,
    ) {
        let evidence = line
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .copied()
            .unwrap_or_default();
        self.diagnostics.push(Diagnostic {
            rule: rule_id.to_string(),
            severity,
            message: message.into(),
            line,
            column,
            raw: raw.to_string(),
            evidence: evidence.to_string(),
        });
    }

    /// Diagnostics reported so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the reporter.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
