use lintel_html::Parser;

use crate::error::RuleError;
use crate::reporter::Reporter;

/// The parser rules subscribe to. Listeners are handed the [`Reporter`] of
/// the pass they run in.
pub type RuleParser<'l, 's> = Parser<'l, Reporter<'s>>;

/// A lint rule.
///
/// A rule is a definition, not a pass: [`Rule::init`] runs once per lint
/// pass on a fresh parser, so any state a rule needs while a document is
/// parsed is created inside `init` and moved into its listeners.
///
/// # Example
/// ```ignore
/// struct NoComments;
///
/// impl Rule for NoComments {
///     fn id(&self) -> &'static str { "no-comments" }
///     fn description(&self) -> &'static str { "Comments are not allowed." }
///     fn init<'l>(&'l self, parser: &mut RuleParser<'l, '_>) -> Result<(), RuleError> {
///         parser.add_listener(EventKind::Comment, |event, reporter| {
///             let Position { line, column } = event.position;
///             reporter.warn("Comment found.", line, column, "no-comments", event.raw);
///         });
///         Ok(())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Unique id, used in rule sets and diagnostics.
    fn id(&self) -> &'static str;

    /// One-line summary of what the rule checks.
    fn description(&self) -> &'static str;

    /// Subscribe this rule's listeners.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Init`] when the rule cannot run. Listeners added
    /// before the error are removed again and the other rules still run.
    fn init<'l>(&'l self, parser: &mut RuleParser<'l, '_>) -> Result<(), RuleError>;
}
