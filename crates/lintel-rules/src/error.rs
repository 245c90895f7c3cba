//! Error types for rule initialisation and rule set configuration.
//!
//! Lint findings are not errors; they are [`crate::Diagnostic`]s.

/// A rule could not subscribe its listeners.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// `init` gave up. Listeners it had already added are discarded.
    #[error("rule `{rule}` failed to initialise: {reason}")]
    Init {
        /// Id of the failing rule.
        rule: String,
        /// What went wrong.
        reason: String,
    },
}

impl RuleError {
    /// Shorthand for [`RuleError::Init`].
    pub fn init(rule: &str, reason: impl Into<String>) -> Self {
        Self::Init {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

/// A rule set could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The text is not valid JSON.
    #[error("invalid rule set JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON document is not an object.
    #[error("rule set must be a JSON object mapping rule ids to true or false")]
    NotAnObject,
    /// A rule is switched with something other than a boolean.
    #[error("rule `{rule}` must be set to true or false")]
    InvalidValue {
        /// Id of the offending rule.
        rule: String,
    },
    /// A rule list contains an empty entry, as in `a,,b`.
    #[error("empty rule id in rule list")]
    EmptyRuleId,
}
