use core::fmt;

use lintel_common::Span;

/// How an attribute value was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// `name="value"`
    Double,
    /// `name='value'`
    Single,
    /// `name=value`
    Unquoted,
    /// `name` with no `=` at all.
    Missing,
}

/// An attribute on a start tag.
///
/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
///
/// Unlike the tree builder's attributes, these keep the exact source text so
/// rules can report on how the attribute was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'i> {
    /// The attribute name as written (case preserved).
    pub name: &'i str,
    /// The value without its quotes. Empty when the value is missing.
    pub value: &'i str,
    /// Quoting style of the value.
    pub quote: Quote,
    /// The full `name="value"` source text.
    pub raw: &'i str,
    /// Document offsets of `raw`.
    pub span: Span,
}

/// The lexical category of a [`Token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'i> {
    /// `<name attr=value>` or `<name/>`.
    StartTag {
        /// Tag name as written (case preserved).
        name: &'i str,
        /// Attributes in source order.
        attributes: Vec<Attribute<'i>>,
        /// Whether the tag ended with `/>`.
        self_closing: bool,
    },
    /// `</name>`.
    EndTag {
        /// Tag name as written (case preserved).
        name: &'i str,
    },
    /// A run of character data, possibly whitespace only.
    Text,
    /// `<!-- data -->`, or a `<?...>` bogus comment.
    Comment {
        /// Text between the delimiters.
        data: &'i str,
    },
    /// `<!--[if IE]>...<![endif]-->` or a downlevel-revealed `<![if ...]>`.
    ConditionalComment {
        /// Text between the outermost delimiters.
        data: &'i str,
    },
    /// `<!DOCTYPE html>` and other `<!...>` declarations.
    Doctype {
        /// Text between `<!` and `>`.
        data: &'i str,
    },
    /// `<![CDATA[...]]>`, or the raw content of a `<script>` or `<style>`.
    CData {
        /// The character data.
        data: &'i str,
        /// `script` or `style` for raw text element content, `None` for a
        /// `<![CDATA[...]]>` section.
        element: Option<&'static str>,
    },
}

/// One lexical unit of the document.
///
/// Tokens borrow from the scanned buffer, and the `raw` slices of all tokens
/// produced for a document concatenate back to that document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'i> {
    /// What was scanned.
    pub kind: TokenKind<'i>,
    /// The exact source text of the token.
    pub raw: &'i str,
    /// Document offsets of `raw`.
    pub span: Span,
}

impl<'i> Token<'i> {
    /// Create a token from its kind and the source slice it covers.
    #[must_use]
    pub const fn new(kind: TokenKind<'i>, raw: &'i str, span: Span) -> Self {
        Self { kind, raw, span }
    }

    /// Returns true if this is a text token made only of whitespace.
    #[must_use]
    pub fn is_whitespace_text(&self) -> bool {
        matches!(self.kind, TokenKind::Text) && self.raw.chars().all(char::is_whitespace)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "StartTag({name}")?;
                for attr in attributes {
                    write!(f, " {}", attr.name)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ")")
            }
            TokenKind::EndTag { name } => write!(f, "EndTag({name})"),
            TokenKind::Text => write!(f, "Text({:?})", self.raw),
            TokenKind::Comment { data } => write!(f, "Comment({data:?})"),
            TokenKind::ConditionalComment { data } => write!(f, "ConditionalComment({data:?})"),
            TokenKind::Doctype { data } => write!(f, "Doctype({data:?})"),
            TokenKind::CData { data, .. } => write!(f, "CData({data:?})"),
        }?;
        write!(f, " @{}..{}", self.span.start, self.span.end)
    }
}
