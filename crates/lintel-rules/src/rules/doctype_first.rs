use std::cell::Cell;
use std::rc::Rc;

use lintel_html::{EventDetail, EventKind};
use strum::IntoEnumIterator;

use crate::error::RuleError;
use crate::rule::{Rule, RuleParser};

const ID: &str = "doctype-first";

/// The first significant thing in a document must be a doctype.
///
/// Whitespace-only text before the doctype is allowed; anything else,
/// comments included, is reported once.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoctypeFirst;

impl Rule for DoctypeFirst {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Doctype must be declared first."
    }

    fn init<'l>(&'l self, parser: &mut RuleParser<'l, '_>) -> Result<(), RuleError> {
        let decided = Rc::new(Cell::new(false));
        let significant =
            EventKind::iter().filter(|kind| !matches!(kind, EventKind::Start | EventKind::End));
        for kind in significant {
            let decided = Rc::clone(&decided);
            parser.add_listener(kind, move |event, reporter| {
                if decided.get() {
                    return;
                }
                if matches!(event.detail, EventDetail::Text) && event.raw.trim().is_empty() {
                    return;
                }
                decided.set(true);
                let is_doctype = match event.detail {
                    EventDetail::Doctype { data } => is_doctype_declaration(data),
                    _ => false,
                };
                if !is_doctype {
                    let position = event.position;
                    reporter.error(
                        "Doctype must be first.",
                        position.line,
                        position.column,
                        ID,
                        event.raw,
                    );
                }
            });
        }
        Ok(())
    }
}

/// `DOCTYPE` (any case) followed by whitespace.
fn is_doctype_declaration(data: &str) -> bool {
    data.get(..7).is_some_and(|keyword| keyword.eq_ignore_ascii_case("doctype"))
        && data[7..].starts_with(|c: char| c.is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::is_doctype_declaration;

    #[test]
    fn doctype_keyword_needs_a_name() {
        assert!(is_doctype_declaration("DOCTYPE html"));
        assert!(is_doctype_declaration("doctype\thtml"));
        assert!(!is_doctype_declaration("DOCTYPE"));
        assert!(!is_doctype_declaration("ELEMENT p"));
        assert!(!is_doctype_declaration("DOCTYPEhtml"));
    }
}
