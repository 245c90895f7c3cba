use std::collections::HashMap;

use lintel_common::{LineTracker, Position, Span};
use tracing::debug;

use super::event::{Event, EventDetail, EventKind};
use crate::tokenizer::{Scanner, Token, TokenKind};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr". `param` is kept from older revisions.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// A subscribed event handler.
///
/// Listeners receive the event and the per-parse context `C` that the caller
/// passed to [`Parser::parse`]. They run to completion, synchronously, before
/// the next listener or event.
pub type Listener<'l, C> = Box<dyn FnMut(&Event<'_>, &mut C) + 'l>;

struct Subscriber<'l, C> {
    seq: usize,
    listener: Listener<'l, C>,
}

/// A point in listener registration history; see [`Parser::rollback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListenerMark(usize);

/// Drives the scanner over a document and fans each token out as events to
/// the subscribed listeners.
///
/// One token can produce several events: a start tag dispatches `tagstart`,
/// then the listeners registered for that tag name, then one `attr` event per
/// attribute. Listeners of one kind run in registration order.
///
/// The only structural state is the stack of open elements, which is reset at
/// the start of every [`Parser::parse`] call.
pub struct Parser<'l, C> {
    listeners: HashMap<EventKind, Vec<Subscriber<'l, C>>>,
    tag_listeners: HashMap<String, Vec<Subscriber<'l, C>>>,
    next_seq: usize,
    open_elements: Vec<String>,
}

impl<C> Default for Parser<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'l, C> Parser<'l, C> {
    /// Create a parser with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            tag_listeners: HashMap::new(),
            next_seq: 0,
            open_elements: Vec::new(),
        }
    }

    /// Subscribe `listener` to every event of `kind`.
    pub fn add_listener<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&Event<'_>, &mut C) + 'l,
    {
        let subscriber = self.subscriber(Box::new(listener));
        self.listeners.entry(kind).or_default().push(subscriber);
    }

    /// Subscribe `listener` to start tags named `tag_name` (ASCII
    /// case-insensitive). These run right after the generic `tagstart`
    /// listeners.
    pub fn add_tag_listener<F>(&mut self, tag_name: &str, listener: F)
    where
        F: FnMut(&Event<'_>, &mut C) + 'l,
    {
        let subscriber = self.subscriber(Box::new(listener));
        self.tag_listeners
            .entry(tag_name.to_ascii_lowercase())
            .or_default()
            .push(subscriber);
    }

    /// Total number of subscribed listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners
            .values()
            .chain(self.tag_listeners.values())
            .map(Vec::len)
            .sum()
    }

    /// Remember the current registration point.
    #[must_use]
    pub const fn mark(&self) -> ListenerMark {
        ListenerMark(self.next_seq)
    }

    /// Drop every listener registered after `mark` was taken.
    pub fn rollback(&mut self, mark: ListenerMark) {
        for subscribers in self
            .listeners
            .values_mut()
            .chain(self.tag_listeners.values_mut())
        {
            subscribers.retain(|subscriber| subscriber.seq < mark.0);
        }
    }

    /// Scan `text` and dispatch its events to the listeners.
    ///
    /// `context` is handed to every listener; it is how listeners report
    /// back to the caller.
    pub fn parse(&mut self, text: &str, context: &mut C) {
        self.open_elements.clear();

        let mut tracker = LineTracker::new(text);
        let mut token_count = 0_usize;

        self.dispatch(
            &Event {
                detail: EventDetail::Start,
                raw: "",
                span: Span::new(0, 0),
                position: Position::START,
                depth: 0,
            },
            context,
        );

        for token in Scanner::new(text) {
            token_count += 1;
            let position = tracker.position_at(token.span.start);
            self.dispatch_token(token, position, context);
        }

        let unclosed = self.open_elements.len();
        self.dispatch(
            &Event {
                detail: EventDetail::End,
                raw: "",
                span: Span::new(text.len(), text.len()),
                position: tracker.position_at(text.len()),
                depth: unclosed,
            },
            context,
        );

        debug!(
            tokens = token_count,
            listeners = self.listener_count(),
            unclosed,
            "parse complete"
        );
    }

    fn dispatch_token(&mut self, token: Token<'_>, position: Position, context: &mut C) {
        let depth = self.open_elements.len();
        let Token { kind, raw, span } = token;

        let detail = match kind {
            TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let name = name.to_ascii_lowercase();
                let attr_events: Vec<Event<'_>> = attributes
                    .iter()
                    .map(|attribute| Event {
                        detail: EventDetail::Attr {
                            tag_name: name.clone(),
                            attribute: attribute.clone(),
                        },
                        raw: attribute.raw,
                        span: attribute.span,
                        position: position.advance(&raw[..attribute.span.start - span.start]),
                        depth,
                    })
                    .collect();

                let event = Event {
                    detail: EventDetail::TagStart {
                        name: name.clone(),
                        attributes,
                        self_closing,
                    },
                    raw,
                    span,
                    position,
                    depth,
                };
                self.dispatch(&event, context);
                if let Some(subscribers) = self.tag_listeners.get_mut(&name) {
                    for subscriber in subscribers {
                        (subscriber.listener)(&event, context);
                    }
                }
                for attr_event in &attr_events {
                    self.dispatch(attr_event, context);
                }
                self.open_element(name, self_closing);
                return;
            }
            TokenKind::EndTag { name } => {
                let name = name.to_ascii_lowercase();
                let depth = self.close_element(&name);
                let event = Event {
                    detail: EventDetail::TagEnd { name },
                    raw,
                    span,
                    position,
                    depth,
                };
                self.dispatch(&event, context);
                return;
            }
            TokenKind::Text => EventDetail::Text,
            TokenKind::Comment { data } => EventDetail::Comment { data },
            TokenKind::ConditionalComment { data } => EventDetail::ConditionalComment { data },
            TokenKind::Doctype { data } => EventDetail::Doctype { data },
            TokenKind::CData { data, element } => EventDetail::CData {
                data,
                tag_name: element.map(str::to_string),
            },
        };

        self.dispatch(
            &Event {
                detail,
                raw,
                span,
                position,
                depth,
            },
            context,
        );
    }

    fn dispatch(&mut self, event: &Event<'_>, context: &mut C) {
        if let Some(subscribers) = self.listeners.get_mut(&event.kind()) {
            for subscriber in subscribers {
                (subscriber.listener)(event, context);
            }
        }
    }

    fn subscriber(&mut self, listener: Listener<'l, C>) -> Subscriber<'l, C> {
        let seq = self.next_seq;
        self.next_seq += 1;
        Subscriber { seq, listener }
    }

    /// Push a start tag onto the stack of open elements unless it is void or
    /// self-closing.
    fn open_element(&mut self, name: String, self_closing: bool) {
        if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
            self.open_elements.push(name);
        }
    }

    /// Pop the stack up to and including the nearest element named `name`.
    /// An end tag with no matching open element leaves the stack alone.
    /// Returns the depth of the end tag.
    fn close_element(&mut self, name: &str) -> usize {
        if let Some(index) = self.open_elements.iter().rposition(|open| open == name) {
            self.open_elements.truncate(index);
        }
        self.open_elements.len()
    }
}

/// Line and column of the byte `offset` bytes into `event.raw`.
///
/// A pure function of its arguments; see [`Event::fix_pos`].
#[must_use]
pub fn fix_pos(event: &Event<'_>, offset: usize) -> Position {
    event.fix_pos(offset)
}
