//! The streaming markup parser.

/// Parser state machine and public entry points.
pub mod core;
/// Helper methods for state transitions and tree construction.
pub mod helpers;
/// Parser configuration.
pub mod options;

pub use self::core::{MarkupParser, ParseStatus, ParserState, parse, parse_with_options};
pub use options::ParserOptions;
