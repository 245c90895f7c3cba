//! Rule engine for the Lintel HTML linter.
//!
//! A [`Rule`] subscribes listeners on a [`RuleParser`] during
//! [`Rule::init`]; the listeners inspect events as the document is parsed and
//! push [`Diagnostic`]s through the [`Reporter`] they are handed.
//!
//! [`Linter::verify`] ties it together for one document:
//!
//! 1. Resolve the effective [`RuleSet`] (caller's set plus any inline
//!    `<!-- lintel ... -->` comment at the top of the document)
//! 2. Initialise every enabled rule of the [`RuleRegistry`] on a fresh parser
//! 3. Parse, then collect the diagnostics into a [`LintReport`]
//!
//! # Example
//! ```ignore
//! let registry = RuleRegistry::with_builtin_rules();
//! let report = Linter::new(&registry).verify("<p>\n \tx</p>", &RuleSet::all());
//! assert_eq!(report.diagnostics[0].rule, "space-tab-mixed-disabled");
//! ```

pub mod config;
/// Diagnostics and their severity.
pub mod diagnostic;
pub mod error;
pub mod linter;
pub mod registry;
/// The per-pass diagnostic sink handed to listeners.
pub mod reporter;
/// The rule plugin contract.
pub mod rule;
pub mod rules;

pub use config::RuleSet;
pub use diagnostic::{Diagnostic, Severity};
pub use error::{ConfigError, RuleError};
pub use linter::{LintReport, Linter, RuleFailure};
pub use registry::RuleRegistry;
pub use reporter::Reporter;
pub use rule::{Rule, RuleParser};
