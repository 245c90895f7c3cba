use lintel_html::EventKind;

use crate::error::RuleError;
use crate::rule::{Rule, RuleParser};

const ID: &str = "space-tab-mixed-disabled";
const MESSAGE: &str = "There were spaces and tabs used together in front of a line.";

/// Flags lines whose indentation starts with spaces followed by a tab, or
/// tabs followed by a space.
///
/// Only text runs are inspected, and at most one warning is reported per
/// line, at column 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceTabMixedDisabled;

impl Rule for SpaceTabMixedDisabled {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Spaces and tabs cannot be used together in front of a line."
    }

    fn init<'l>(&'l self, parser: &mut RuleParser<'l, '_>) -> Result<(), RuleError> {
        parser.add_listener(EventKind::Text, |event, reporter| {
            for line_start in mixed_indent_line_starts(event.raw) {
                let line = event.fix_pos(line_start).line;
                reporter.warn(MESSAGE, line, 1, ID, event.raw);
            }
        });
        Ok(())
    }
}

/// Offsets of the line starts in `text` that open with mixed indentation.
///
/// A line starts at offset 0 and after every `\n`.
fn mixed_indent_line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    let bytes = text.as_bytes();
    let mut cursor = Some(0);
    core::iter::from_fn(move || {
        while let Some(start) = cursor {
            // The cursor always moves past `start` before the line is checked.
            cursor = bytes[start..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|newline| start + newline + 1);
            if opens_with_mixed_indent(&bytes[start..]) {
                return Some(start);
            }
        }
        None
    })
}

/// `' '+ '\t'` or `'\t'+ ' '` at the start of `line`.
fn opens_with_mixed_indent(line: &[u8]) -> bool {
    let other = match line.first() {
        Some(b' ') => b'\t',
        Some(b'\t') => b' ',
        _ => return false,
    };
    let run = line.iter().take_while(|&&b| b == line[0]).count();
    line.get(run) == Some(&other)
}

#[cfg(test)]
mod tests {
    use super::{mixed_indent_line_starts, opens_with_mixed_indent};

    #[test]
    fn detects_both_orders() {
        assert!(opens_with_mixed_indent(b"  \tfoo"));
        assert!(opens_with_mixed_indent(b"\t\t foo"));
        assert!(!opens_with_mixed_indent(b"    foo"));
        assert!(!opens_with_mixed_indent(b"\t\tfoo"));
        assert!(!opens_with_mixed_indent(b"x \tfoo"));
        assert!(!opens_with_mixed_indent(b""));
    }

    #[test]
    fn only_line_starts_are_checked() {
        let text = "a \tb\n \tc\r\n\t d\n";
        assert_eq!(mixed_indent_line_starts(text).collect::<Vec<_>>(), vec![5, 10]);
    }

    #[test]
    fn trailing_newline_yields_an_empty_last_line() {
        assert_eq!(mixed_indent_line_starts("\n").count(), 0);
        assert_eq!(mixed_indent_line_starts("").count(), 0);
    }
}
