//! Common utilities for the Lintel HTML linter.
//!
//! This crate provides shared infrastructure used by the scanner, the event
//! dispatcher and the rule runtime:
//! - **Positions** - byte spans and 1-based line/column mapping
//! - **Warning System** - deduplicated engine warnings routed through `tracing`

pub mod position;
pub mod warning;

pub use position::{LineTracker, Position, Span};
