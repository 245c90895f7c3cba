//! Cursor helpers for the scanner.
//!
//! Every delimiter the scanner looks for is ASCII, so these helpers work on
//! bytes. An ASCII byte never occurs inside a multi-byte UTF-8 sequence,
//! which keeps every offset they return on a character boundary.

use super::scanner::Scanner;

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl Scanner<'_> {
    /// True once the cursor has reached the end of the input.
    #[must_use]
    pub const fn at_eof(&self) -> bool {
        self.current_pos >= self.input.len()
    }

    /// Peek at the byte `offset` bytes past the cursor without consuming it.
    #[must_use]
    pub fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.input
            .as_bytes()
            .get(self.current_pos + offset)
            .copied()
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "If the next few characters are..."
    ///
    /// Check if the input at the cursor starts with `target` exactly.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input
            .as_bytes()
            .get(self.current_pos..)
            .is_some_and(|rest| rest.starts_with(target.as_bytes()))
    }

    /// Advance the cursor while `predicate` holds for the byte under it.
    /// Returns the new cursor offset.
    pub(super) fn consume_while(&mut self, predicate: impl Fn(u8) -> bool) -> usize {
        let bytes = self.input.as_bytes();
        while let Some(&b) = bytes.get(self.current_pos) {
            if !predicate(b) {
                break;
            }
            self.current_pos += 1;
        }
        self.current_pos
    }

    /// Offset of the first occurrence of `needle` at or after `from`.
    pub(super) fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        let haystack = self.input.as_bytes().get(from..)?;
        haystack
            .windows(needle.len())
            .position(|window| window == needle.as_bytes())
            .map(|found| from + found)
    }
}

// =============================================================================
// Markup Detection
// =============================================================================

impl Scanner<'_> {
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    ///
    /// Whether the `<` at `at` opens markup. "U+0021 EXCLAMATION MARK (!)",
    /// "U+002F SOLIDUS (/)" followed by an ASCII alpha, "ASCII alpha" and
    /// "U+003F QUESTION MARK (?)" do; anything else is emitted as text.
    #[must_use]
    pub fn starts_markup_at(&self, at: usize) -> bool {
        let bytes = self.input.as_bytes();
        if bytes.get(at) != Some(&b'<') {
            return false;
        }
        match bytes.get(at + 1) {
            Some(b'!' | b'?') => true,
            Some(b'/') => bytes.get(at + 2).is_some_and(u8::is_ascii_alphabetic),
            Some(b) => b.is_ascii_alphabetic(),
            None => false,
        }
    }
}
