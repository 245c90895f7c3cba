//! HTML scanner module.
//!
//! Splits a document into the lexical units a linter needs (tags with their
//! attributes, text runs, comments, conditional comments, doctypes and
//! character data) while keeping every byte of the source. Tokenization
//! follows the shape of [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! without its error recovery or character reference decoding.

/// Cursor helpers used by the scanner.
pub mod helpers;
/// The lazy, lossless scanner.
pub mod scanner;
/// Token types produced by the scanner.
pub mod token;

pub use scanner::Scanner;
pub use token::{Attribute, Quote, Token, TokenKind};
