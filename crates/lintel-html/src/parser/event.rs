use lintel_common::position::floor_char_boundary;
use lintel_common::{Position, Span};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::tokenizer::Attribute;

/// The kinds of event a listener can subscribe to.
///
/// The lowercase names (`"tagstart"`, `"cdata"`, ...) are what rule authors
/// and configuration use to refer to events.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    /// Dispatched once before the first token.
    Start,
    /// A start tag.
    TagStart,
    /// An end tag.
    TagEnd,
    /// One attribute of a start tag. Dispatched right after the tag,
    /// once per attribute in source order.
    Attr,
    /// A run of character data.
    Text,
    /// An ordinary comment.
    Comment,
    /// A conditional comment.
    ConditionalComment,
    /// A doctype or other `<!...>` declaration.
    Doctype,
    /// A CDATA section or the content of a raw text element.
    CData,
    /// Dispatched once after the last token.
    End,
}

/// Token-specific payload of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDetail<'i> {
    /// See [`EventKind::Start`].
    Start,
    /// See [`EventKind::TagStart`].
    TagStart {
        /// Tag name, ASCII-lowercased.
        name: String,
        /// Attributes in source order.
        attributes: Vec<Attribute<'i>>,
        /// Whether the tag ended with `/>`.
        self_closing: bool,
    },
    /// See [`EventKind::TagEnd`].
    TagEnd {
        /// Tag name, ASCII-lowercased.
        name: String,
    },
    /// See [`EventKind::Attr`].
    Attr {
        /// Name of the owning tag, ASCII-lowercased.
        tag_name: String,
        /// The attribute as written.
        attribute: Attribute<'i>,
    },
    /// See [`EventKind::Text`].
    Text,
    /// See [`EventKind::Comment`].
    Comment {
        /// Text between `<!--` and `-->`.
        data: &'i str,
    },
    /// See [`EventKind::ConditionalComment`].
    ConditionalComment {
        /// Text between the outermost delimiters.
        data: &'i str,
    },
    /// See [`EventKind::Doctype`].
    Doctype {
        /// Text between `<!` and `>`.
        data: &'i str,
    },
    /// See [`EventKind::CData`].
    CData {
        /// The character data.
        data: &'i str,
        /// `script` or `style` when this is a raw text element's content.
        tag_name: Option<String>,
    },
    /// See [`EventKind::End`].
    End,
}

/// A read-only snapshot handed to every listener subscribed to its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<'i> {
    /// What happened.
    pub detail: EventDetail<'i>,
    /// Source text of the event. Empty for `start` and `end`.
    pub raw: &'i str,
    /// Document offsets of `raw`.
    pub span: Span,
    /// Line and column of the first character of `raw`.
    pub position: Position,
    /// Number of open elements enclosing the event.
    pub depth: usize,
}

impl<'i> Event<'i> {
    /// The subscription kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self.detail {
            EventDetail::Start => EventKind::Start,
            EventDetail::TagStart { .. } => EventKind::TagStart,
            EventDetail::TagEnd { .. } => EventKind::TagEnd,
            EventDetail::Attr { .. } => EventKind::Attr,
            EventDetail::Text => EventKind::Text,
            EventDetail::Comment { .. } => EventKind::Comment,
            EventDetail::ConditionalComment { .. } => EventKind::ConditionalComment,
            EventDetail::Doctype { .. } => EventKind::Doctype,
            EventDetail::CData { .. } => EventKind::CData,
            EventDetail::End => EventKind::End,
        }
    }

    /// The tag name for tag and attribute events.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match &self.detail {
            EventDetail::TagStart { name, .. } | EventDetail::TagEnd { name } => Some(name),
            EventDetail::Attr { tag_name, .. } => Some(tag_name),
            _ => None,
        }
    }

    /// The attribute carried by an `attr` event.
    #[must_use]
    pub fn attribute(&self) -> Option<&Attribute<'i>> {
        match &self.detail {
            EventDetail::Attr { attribute, .. } => Some(attribute),
            _ => None,
        }
    }

    /// Line and column of the byte `offset` bytes into [`Event::raw`].
    ///
    /// The position is computed from the event's own start, so rules can
    /// locate a character inside a text node without rescanning the
    /// document. `offset` is clamped to `raw` and moved back to a character
    /// boundary. Results never decrease as `offset` grows.
    #[must_use]
    pub fn fix_pos(&self, offset: usize) -> Position {
        let offset = floor_char_boundary(self.raw, offset);
        self.position.advance(&self.raw[..offset])
    }
}
