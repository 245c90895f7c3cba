use lintel_common::Position;
use serde::Serialize;
use strum_macros::Display;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// The document is broken.
    Error,
    /// The document works but is likely wrong.
    Warning,
    /// Informational only.
    Info,
}

/// One finding reported by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Id of the rule that reported it.
    pub rule: String,
    /// Severity chosen by the rule.
    pub severity: Severity,
    /// Human readable message.
    pub message: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters.
    pub column: usize,
    /// Raw source text of the event that triggered the report.
    pub raw: String,
    /// Full text of the reported line, without its terminator.
    pub evidence: String,
}

impl Diagnostic {
    /// Line and column as a [`Position`].
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}
