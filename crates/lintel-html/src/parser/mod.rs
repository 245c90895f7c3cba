//! Event dispatch over the scanner's token stream.
//!
//! The parser interprets tokens just enough to give rules useful events:
//! lowercased tag names, per-attribute events, the depth of the stack of open
//! elements, and the line and column of every event.

/// The [`Parser`] and its listener registry.
pub mod dispatcher;
/// Events handed to listeners.
pub mod event;

pub use dispatcher::{Listener, ListenerMark, Parser, fix_pos};
pub use event::{Event, EventDetail, EventKind};
