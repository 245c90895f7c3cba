//! HTML scanner and event dispatcher for the Lintel linter.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner** - a lazy, lossless tokenizer that splits a document into
//!   tags, attributes, text, comments, conditional comments, doctypes and
//!   character data, recovering from unterminated markup at the next tag
//!   boundary
//! - **Parser / Event Dispatcher** - turns tokens into typed events and
//!   delivers them synchronously to subscribed listeners
//! - **Position mapping** - line and column of every event, and of any
//!   offset inside an event via [`Event::fix_pos`]
//!
//! # Not Implemented
//!
//! - DOM construction
//! - Tree-construction error recovery
//! - Character reference decoding

/// Typed events and the dispatcher that delivers them.
pub mod parser;
/// Lossless HTML scanner.
pub mod tokenizer;

pub use parser::{Event, EventDetail, EventKind, Listener, ListenerMark, Parser, fix_pos};
pub use tokenizer::{Attribute, Quote, Scanner, Token, TokenKind};
