use std::cell::RefCell;
use std::rc::Rc;

use lintel_html::{EventDetail, EventKind};

use crate::error::RuleError;
use crate::rule::{Rule, RuleParser};

const ID: &str = "tag-pair";

/// Elements that never take an end tag, including obsolete ones.
const EMPTY_ELEMENTS: [&str; 19] = [
    "area", "base", "basefont", "br", "col", "command", "embed", "frame", "hr", "img", "input",
    "isindex", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

struct OpenTag {
    name: String,
    raw: String,
    line: usize,
}

/// Every start tag must have a matching end tag and every end tag a matching
/// start tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagPair;

impl Rule for TagPair {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Tag must be paired."
    }

    fn init<'l>(&'l self, parser: &mut RuleParser<'l, '_>) -> Result<(), RuleError> {
        let stack: Rc<RefCell<Vec<OpenTag>>> = Rc::default();

        let open = Rc::clone(&stack);
        parser.add_listener(EventKind::TagStart, move |event, _| {
            if let EventDetail::TagStart {
                name, self_closing, ..
            } = &event.detail
                && !self_closing
                && !EMPTY_ELEMENTS.contains(&name.as_str())
            {
                open.borrow_mut().push(OpenTag {
                    name: name.clone(),
                    raw: event.raw.to_string(),
                    line: event.position.line,
                });
            }
        });

        let close = Rc::clone(&stack);
        parser.add_listener(EventKind::TagEnd, move |event, reporter| {
            let Some(name) = event.tag_name() else {
                return;
            };
            let mut stack = close.borrow_mut();
            let position = event.position;
            match stack.iter().rposition(|open| open.name == name) {
                Some(index) => {
                    if let Some(message) = missing_end_tags(&stack[index + 1..]) {
                        reporter.error(message, position.line, position.column, ID, event.raw);
                    }
                    stack.truncate(index);
                }
                None => reporter.error(
                    format!("Tag must be paired, no start tag: [ {} ]", event.raw),
                    position.line,
                    position.column,
                    ID,
                    event.raw,
                ),
            }
        });

        parser.add_listener(EventKind::End, move |event, reporter| {
            let stack = stack.borrow();
            if let Some(message) = missing_end_tags(&stack) {
                let position = event.position;
                reporter.error(message, position.line, position.column, ID, "");
            }
        });
        Ok(())
    }
}

/// Message for tags left open, innermost first, or `None` when `unclosed`
/// is empty.
fn missing_end_tags(unclosed: &[OpenTag]) -> Option<String> {
    let innermost = unclosed.last()?;
    let end_tags: String = unclosed
        .iter()
        .rev()
        .map(|open| format!("</{}>", open.name))
        .collect();
    Some(format!(
        "Tag must be paired, missing: [ {end_tags} ], start tag match failed [ {} ] on line {}.",
        innermost.raw, innermost.line
    ))
}
