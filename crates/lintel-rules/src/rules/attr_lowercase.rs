use lintel_html::EventKind;

use crate::error::RuleError;
use crate::rule::{Rule, RuleParser};

const ID: &str = "attr-lowercase";

/// Attribute names must be lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttrLowercase;

impl Rule for AttrLowercase {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "All attribute names must be in lowercase."
    }

    fn init<'l>(&'l self, parser: &mut RuleParser<'l, '_>) -> Result<(), RuleError> {
        parser.add_listener(EventKind::Attr, |event, reporter| {
            let Some(attribute) = event.attribute() else {
                return;
            };
            if attribute.name.chars().any(char::is_uppercase) {
                reporter.error(
                    format!(
                        "The attribute name of [ {} ] must be in lowercase.",
                        attribute.name
                    ),
                    event.position.line,
                    event.position.column,
                    ID,
                    event.raw,
                );
            }
        });
        Ok(())
    }
}
