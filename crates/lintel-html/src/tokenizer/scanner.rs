use lintel_common::Span;
use tracing::trace;

use super::token::{Attribute, Quote, Token, TokenKind};

/// Elements whose content is scanned as character data up to the matching
/// end tag.
///
/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2):
/// "Raw text elements: script, style"
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// A lazy, lossless scanner over one HTML buffer.
///
/// The scanner is purely lexical: it does not check nesting, does not decode
/// character references, and never fails. An unterminated tag closes before
/// the next `<` that opens markup, and a quoted attribute value that is never
/// closed ends at the next `>`, so one broken tag does not swallow the rest
/// of the document. Unterminated comments, declarations and raw text elements
/// run to the end of the input.
///
/// Every call to [`Iterator::next`] that yields a token moves the cursor
/// forward by at least one byte, and the `raw` slices of the produced tokens
/// tile the input exactly.
#[derive(Debug, Clone)]
pub struct Scanner<'i> {
    pub(super) input: &'i str,
    pub(super) current_pos: usize,
    /// Set after a `<script>` or `<style>` start tag; the next token is the
    /// element's content.
    pub(super) raw_text_element: Option<&'static str>,
}

impl<'i> Scanner<'i> {
    /// Create a scanner positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'i str) -> Self {
        Self {
            input,
            current_pos: 0,
            raw_text_element: None,
        }
    }

    fn scan_token(&mut self) -> Option<Token<'i>> {
        if self.at_eof() {
            return None;
        }
        let start = self.current_pos;

        if let Some(element) = self.raw_text_element.take() {
            let end = self.find_raw_text_end(element);
            if end > start {
                self.current_pos = end;
                let data = &self.input[start..end];
                let kind = TokenKind::CData {
                    data,
                    element: Some(element),
                };
                return Some(self.emit(kind, start));
            }
        }

        if self.starts_markup_at(start)
            && let Some(token) = self.scan_markup(start)
        {
            return Some(token);
        }
        Some(self.scan_text(start))
    }

    /// `<` has been seen and [`Self::starts_markup_at`] agreed that markup
    /// begins here.
    fn scan_markup(&mut self, start: usize) -> Option<Token<'i>> {
        if self.next_few_characters_are("<!--") {
            return Some(self.scan_comment(start));
        }
        if self.next_few_characters_are("<![CDATA[") {
            return Some(self.scan_delimited(start, "<![CDATA[", "]]>", |data| {
                TokenKind::CData {
                    data,
                    element: None,
                }
            }));
        }
        if self.next_few_characters_are("<![") {
            return Some(self.scan_delimited(start, "<![", "]>", |data| {
                TokenKind::ConditionalComment { data }
            }));
        }
        if self.next_few_characters_are("<!") {
            return Some(self.scan_delimited(start, "<!", ">", |data| TokenKind::Doctype {
                data,
            }));
        }
        if self.next_few_characters_are("<?") {
            // [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
            // "U+003F QUESTION MARK (?) ... Create a comment token whose data
            // is the empty string. Reconsume in the bogus comment state."
            return Some(self.scan_delimited(start, "<", ">", |data| TokenKind::Comment {
                data,
            }));
        }
        if self.next_few_characters_are("</") {
            return Some(self.scan_end_tag(start));
        }
        if self.peek_byte(1).is_some_and(|b| b.is_ascii_alphabetic()) {
            return Some(self.scan_start_tag(start));
        }
        None
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    fn scan_comment(&mut self, start: usize) -> Token<'i> {
        let data_start = start + "<!--".len();
        self.current_pos = data_start;

        // "U+003E GREATER-THAN SIGN (>) - This is an abrupt-closing-of-empty-comment
        // parse error. Switch to the data state. Emit the current comment token."
        let (data_end, end) = if self.next_few_characters_are(">") {
            (data_start, data_start + 1)
        } else if self.next_few_characters_are("->") {
            (data_start, data_start + 2)
        } else if let Some(close) = self.find_from(data_start, "-->") {
            (close, close + "-->".len())
        } else {
            trace!(offset = start, "unterminated comment");
            (self.input.len(), self.input.len())
        };

        self.current_pos = end;
        let data = &self.input[data_start..data_end];
        let kind = if data.starts_with("[if") || data.ends_with("<![endif]") {
            TokenKind::ConditionalComment { data }
        } else {
            TokenKind::Comment { data }
        };
        self.emit(kind, start)
    }

    /// Scan `open ... close`, handing the text in between to `make`.
    fn scan_delimited(
        &mut self,
        start: usize,
        open: &str,
        close: &str,
        make: impl FnOnce(&'i str) -> TokenKind<'i>,
    ) -> Token<'i> {
        let data_start = start + open.len();
        let (data_end, end) = match self.find_from(data_start, close) {
            Some(found) => (found, found + close.len()),
            None => {
                trace!(offset = start, close, "unterminated declaration");
                (self.input.len(), self.input.len())
            }
        };
        self.current_pos = end;
        let data = &self.input[data_start..data_end];
        self.emit(make(data), start)
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    ///
    /// Anything between the tag name and `>` is kept in `raw` but otherwise
    /// ignored.
    fn scan_end_tag(&mut self, start: usize) -> Token<'i> {
        let name_start = start + "</".len();
        self.current_pos = name_start;
        let name_end = self.consume_while(|b| !is_tag_name_terminator(b));
        let name = &self.input[name_start..name_end];

        let boundary = self.find_tag_boundary(name_end);
        self.current_pos = if self.input.as_bytes().get(boundary) == Some(&b'>') {
            boundary + 1
        } else {
            trace!(offset = start, name, "unterminated end tag");
            boundary
        };
        self.emit(TokenKind::EndTag { name }, start)
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    /// through
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn scan_start_tag(&mut self, start: usize) -> Token<'i> {
        self.current_pos = start + 1;
        let name_end = self.consume_while(|b| !is_tag_name_terminator(b));
        let name = &self.input[start + 1..name_end];

        let mut attributes = Vec::new();
        let mut self_closing = false;
        loop {
            let _ = self.consume_while(is_whitespace_byte);
            match self.peek_byte(0) {
                None => {
                    trace!(offset = start, name, "unterminated start tag");
                    break;
                }
                Some(b'<') if self.starts_markup_at(self.current_pos) => {
                    trace!(offset = start, name, "start tag cut off by markup");
                    break;
                }
                Some(b'>') => {
                    self.current_pos += 1;
                    break;
                }
                Some(b'/') => {
                    if self.peek_byte(1) == Some(b'>') {
                        self_closing = true;
                        self.current_pos += 2;
                        break;
                    }
                    // "unexpected-solidus-in-tag parse error. Reconsume in the
                    // before attribute name state."
                    self.current_pos += 1;
                }
                Some(_) => attributes.push(self.scan_attribute()),
            }
        }

        if !self_closing {
            self.raw_text_element = RAW_TEXT_ELEMENTS
                .iter()
                .copied()
                .find(|element| name.eq_ignore_ascii_case(element));
        }

        self.emit(
            TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            },
            start,
        )
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// The cursor is on the first character of the attribute name, which is
    /// neither whitespace, `/`, `>` nor the end of input.
    fn scan_attribute(&mut self) -> Attribute<'i> {
        let attr_start = self.current_pos;
        // "U+003D EQUALS SIGN (=) - unexpected-equals-sign-before-attribute-name
        // parse error. Start a new attribute in the current tag token. Set that
        // attribute's name to the current input character."
        self.current_pos += 1;
        let name_end = self.consume_while(|b| !is_attribute_name_terminator(b));
        let name = &self.input[attr_start..name_end];

        let _ = self.consume_while(is_whitespace_byte);
        let (value, quote) = if self.peek_byte(0) == Some(b'=') {
            self.current_pos += 1;
            let _ = self.consume_while(is_whitespace_byte);
            self.scan_attribute_value()
        } else {
            // Whitespace after a valueless attribute belongs to the tag.
            self.current_pos = name_end;
            ("", Quote::Missing)
        };

        Attribute {
            name,
            value,
            quote,
            raw: &self.input[attr_start..self.current_pos],
            span: Span::new(attr_start, self.current_pos),
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn scan_attribute_value(&mut self) -> (&'i str, Quote) {
        let quote = match self.peek_byte(0) {
            Some(b'"') => Some((b'"', Quote::Double)),
            Some(b'\'') => Some((b'\'', Quote::Single)),
            _ => None,
        };

        if let Some((delimiter, quote)) = quote {
            let value_start = self.current_pos + 1;
            self.current_pos = value_start;
            let value_end = self.consume_while(|b| b != delimiter);
            if self.at_eof() {
                // The quote is never closed: end the value, and with it the
                // tag, at the next `>` or markup instead of the end of input.
                trace!(offset = value_start, "unterminated attribute value");
                let value_end = self.find_tag_boundary(value_start);
                self.current_pos = value_end;
                return (&self.input[value_start..value_end], quote);
            }
            self.current_pos += 1;
            return (&self.input[value_start..value_end], quote);
        }

        // "U+003E GREATER-THAN SIGN (>) - This is a missing-attribute-value parse
        // error." The value stays empty.
        let value_start = self.current_pos;
        let value_end = self.consume_while(|b| !is_whitespace_byte(b) && b != b'>');
        (&self.input[value_start..value_end], Quote::Unquoted)
    }

    /// Character data up to the next `<` that opens markup.
    fn scan_text(&mut self, start: usize) -> Token<'i> {
        // A `<` that did not open markup is part of the text.
        let mut search_from = start + 1;
        self.current_pos = loop {
            match self.find_from(search_from, "<") {
                Some(lt) if self.starts_markup_at(lt) => break lt,
                Some(lt) => search_from = lt + 1,
                None => break self.input.len(),
            }
        };
        self.emit(TokenKind::Text, start)
    }

    /// Offset of the first `>`, or `<` that opens markup, at or after `from`.
    /// The end of the input when there is neither.
    fn find_tag_boundary(&self, from: usize) -> usize {
        let bytes = self.input.as_bytes();
        (from..bytes.len())
            .find(|&at| bytes[at] == b'>' || self.starts_markup_at(at))
            .unwrap_or(bytes.len())
    }

    /// Offset of the end tag closing the raw text element, or the end of the
    /// input when it is never closed.
    ///
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state):
    /// an appropriate end tag is `</` followed by the element name (ASCII
    /// case-insensitive) and then whitespace, `/` or `>`.
    fn find_raw_text_end(&self, element: &str) -> usize {
        let mut search_from = self.current_pos;
        while let Some(lt) = self.find_from(search_from, "</") {
            let name_start = lt + 2;
            let name_end = name_start + element.len();
            let name_matches = self
                .input
                .as_bytes()
                .get(name_start..name_end)
                .is_some_and(|name| name.eq_ignore_ascii_case(element.as_bytes()));
            let terminated = self
                .input
                .as_bytes()
                .get(name_end)
                .is_none_or(|&b| is_tag_name_terminator(b));
            if name_matches && terminated {
                return lt;
            }
            search_from = name_start;
        }
        trace!(offset = self.current_pos, element, "unterminated raw text element");
        self.input.len()
    }

    /// Build a token covering `start..current_pos`.
    fn emit(&self, kind: TokenKind<'i>, start: usize) -> Token<'i> {
        let span = Span::new(start, self.current_pos);
        Token::new(kind, &self.input[start..self.current_pos], span)
    }
}

impl<'i> Iterator for Scanner<'i> {
    type Item = Token<'i>;

    fn next(&mut self) -> Option<Self::Item> {
        let before = self.current_pos;
        let token = self.scan_token();
        debug_assert!(
            token.is_none() || self.current_pos > before,
            "scanner failed to advance at offset {before}"
        );
        token
    }
}

impl core::iter::FusedIterator for Scanner<'_> {}

/// Bytes that end a tag name: whitespace, `/` and `>`.
const fn is_tag_name_terminator(b: u8) -> bool {
    is_whitespace_byte(b) || b == b'/' || b == b'>'
}

/// Bytes that end an attribute name.
const fn is_attribute_name_terminator(b: u8) -> bool {
    is_tag_name_terminator(b) || b == b'='
}

/// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state):
/// "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED
/// (FF), U+0020 SPACE". Carriage returns are not normalized away before
/// scanning here, so they count as whitespace too.
const fn is_whitespace_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0C' | b'\r')
}
