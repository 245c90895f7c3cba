//! Byte spans and human-facing source positions.
//!
//! Offsets handed around by the scanner and the parser are byte offsets into
//! the document. Diagnostics are reported as 1-based line and column pairs,
//! where a column counts characters rather than bytes.
//!
//! Line terminators are `\n` and `\r\n`. A `\r` immediately before `\n`
//! occupies a column on the line it ends, then the `\n` starts the next line
//! at column 1, so `\r\n` behaves as one terminator of length 2. A lone `\r`
//! is an ordinary character.

use core::fmt;

use serde::Serialize;

/// A half-open byte range `[start, end)` into a source buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a span. `end` is clamped so the span is never inverted.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        let end = if end < start { start } else { end };
        Self { start, end }
    }

    /// Number of bytes covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The text covered by this span, or `""` when the span does not fall on
    /// character boundaries of `source`.
    #[must_use]
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// A 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number in characters, starting at 1.
    pub column: usize,
}

impl Position {
    /// The first character of a document.
    pub const START: Self = Self { line: 1, column: 1 };

    /// Create a position from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position reached after walking over `text` starting here.
    ///
    /// This is how every offset is mapped: relative to a known earlier
    /// position plus the text in between, never by rescanning from the start
    /// of the document.
    #[must_use]
    pub fn advance(self, text: &str) -> Self {
        let mut line = self.line;
        let mut column = self.column;
        for c in text.chars() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Incremental offset-to-position mapper over one document.
///
/// The parser asks for the position of each token in document order, so the
/// tracker only ever walks the text between the previous query and the next
/// one. A query behind the last one restarts from the top of the document.
#[derive(Debug, Clone)]
pub struct LineTracker<'s> {
    source: &'s str,
    offset: usize,
    position: Position,
}

impl<'s> LineTracker<'s> {
    /// Start tracking at the beginning of `source`.
    #[must_use]
    pub const fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            position: Position::START,
        }
    }

    /// Position of the byte at `offset`.
    ///
    /// Offsets past the end of the source, or inside a multi-byte character,
    /// are moved back to the nearest character boundary.
    pub fn position_at(&mut self, offset: usize) -> Position {
        let offset = floor_char_boundary(self.source, offset);
        if offset < self.offset {
            self.offset = 0;
            self.position = Position::START;
        }
        let skipped = &self.source[self.offset..offset];
        self.position = self.position.advance(skipped);
        self.offset = offset;
        self.position
    }
}

/// Largest character boundary of `text` that is `<= offset`.
#[must_use]
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::{LineTracker, Position, Span, floor_char_boundary};

    #[test]
    fn advance_counts_columns_on_one_line() {
        assert_eq!(Position::START.advance("abc"), Position::new(1, 4));
        assert_eq!(Position::new(3, 7).advance(""), Position::new(3, 7));
    }

    #[test]
    fn advance_handles_lf_and_crlf() {
        assert_eq!(Position::START.advance("a\nb"), Position::new(2, 2));
        assert_eq!(Position::START.advance("a\r\nb"), Position::new(2, 2));
        assert_eq!(Position::START.advance("a\r\n\r\n"), Position::new(3, 1));
    }

    #[test]
    fn lone_carriage_return_is_not_a_terminator() {
        assert_eq!(Position::START.advance("a\rb"), Position::new(1, 4));
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        assert_eq!(Position::START.advance("héllo"), Position::new(1, 6));
    }

    #[test]
    fn tracker_matches_direct_advance() {
        let source = "<p>\r\n  text\n</p>";
        let mut tracker = LineTracker::new(source);
        for offset in [0, 3, 5, 7, 11, 12, source.len()] {
            assert_eq!(
                tracker.position_at(offset),
                Position::START.advance(&source[..offset]),
                "offset {offset}"
            );
        }
    }

    #[test]
    fn tracker_restarts_when_queried_backwards() {
        let mut tracker = LineTracker::new("a\nb\nc");
        assert_eq!(tracker.position_at(4), Position::new(3, 1));
        assert_eq!(tracker.position_at(2), Position::new(2, 1));
    }

    #[test]
    fn floor_char_boundary_backs_off_multibyte() {
        let text = "aé";
        assert_eq!(floor_char_boundary(text, 2), 1);
        assert_eq!(floor_char_boundary(text, 99), text.len());
    }

    #[test]
    fn span_slice_is_lossless_for_valid_ranges() {
        let source = "<b>bold</b>";
        assert_eq!(Span::new(3, 7).slice(source), "bold");
        assert_eq!(Span::new(5, 2).len(), 0);
        assert_eq!(Span::new(0, 99).slice(source), "");
    }

    #[test]
    fn reversed_span_built_by_hand_is_empty() {
        let span = Span { start: 7, end: 3 };
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
        assert_eq!(span.slice("<b>bold</b>"), "");
    }
}
