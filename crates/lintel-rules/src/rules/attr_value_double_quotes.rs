use lintel_html::{Attribute, EventKind, Quote};

use crate::error::RuleError;
use crate::rule::{Rule, RuleParser};

const ID: &str = "attr-value-double-quotes";

/// Attribute values must be wrapped in double quotes.
///
/// Attributes written without a value, such as `disabled`, are fine.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttrValueDoubleQuotes;

impl Rule for AttrValueDoubleQuotes {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Attribute values must be in double quotes."
    }

    fn init<'l>(&'l self, parser: &mut RuleParser<'l, '_>) -> Result<(), RuleError> {
        parser.add_listener(EventKind::Attr, |event, reporter| {
            let Some(attribute) = event.attribute() else {
                return;
            };
            if needs_double_quotes(attribute) {
                reporter.error(
                    format!(
                        "The value of attribute [ {} ] must be in double quotes.",
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

/// An unquoted empty value (`a=`) is treated like a missing one.
fn needs_double_quotes(attribute: &Attribute<'_>) -> bool {
    match attribute.quote {
        Quote::Double | Quote::Missing => false,
        Quote::Single => true,
        Quote::Unquoted => !attribute.value.is_empty(),
    }
}
