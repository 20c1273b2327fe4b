//! Incremental parser for a simplified tag markup language.
//!
//! # Scope
//!
//! This crate implements:
//! - **Streaming Parser** - an eleven-state machine that reads input one
//!   character at a time, across any number of `consume` calls, and builds
//!   a [`tagtree_dom::DomTree`] as it goes
//!   - Opening and closing tags, with close tags matched against the open element
//!   - Quoted attributes (`'` or `"`) and boolean attributes (`<a foo>`)
//!   - Character data between tags, never producing empty text nodes
//!
//! # Not Supported
//!
//! - Self-closing tags, comments, CDATA, doctype declarations
//! - Character entity decoding
//! - Error recovery: every grammar violation ends the parse

/// Terminal parse errors.
pub mod error;
/// The parser state machine.
pub mod parser;

pub use error::ParseError;
pub use parser::{MarkupParser, ParseStatus, ParserOptions, ParserState, parse, parse_with_options};
