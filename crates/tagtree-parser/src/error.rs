//! Terminal parse failures.
//!
//! Every grammar violation is fatal to the current parse. There is no
//! recovery and no warning tier: the caller discards the parser and the
//! partial tree.

use thiserror::Error;

use crate::parser::ParserState;

/// Why a parse stopped.
///
/// Offsets are zero-based character indices into the whole input stream,
/// counted across every chunk passed to `consume`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character arrived in a state with no transition for it.
    #[error("{message}: found {found:?} at offset {offset} in state {state}")]
    UnexpectedInput {
        /// The offending character.
        found: char,
        /// Where it appeared.
        offset: usize,
        /// The state that rejected it.
        state: ParserState,
        /// Human-readable reason.
        message: &'static str,
    },

    /// A close tag did not name the innermost open element.
    #[error("mismatched close tag: expected </{expected}>, found </{found}> at offset {offset}")]
    MismatchedCloseTag {
        /// Name of the element still open.
        expected: String,
        /// Name read from the close tag.
        found: String,
        /// Offset of the close tag's `>`.
        offset: usize,
    },

    /// An element opened deeper than the configured nesting limit.
    #[error("element nesting exceeds the limit of {limit} at offset {offset}")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
        /// Offset of the character that terminated the element name.
        offset: usize,
    },

    /// Input ended before the root element was closed.
    ///
    /// Only `finish` reports this; `consume` treats a short input as
    /// "more to come".
    #[error("input ended in state {state} with {open_elements} open element(s)")]
    Incomplete {
        /// The state the parser stopped in.
        state: ParserState,
        /// Elements opened but not yet closed.
        open_elements: usize,
    },
}

impl ParseError {
    /// The stream offset the error points at, if it has one.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedInput { offset, .. }
            | Self::MismatchedCloseTag { offset, .. }
            | Self::NestingTooDeep { offset, .. } => Some(*offset),
            Self::Incomplete { .. } => None,
        }
    }

    /// The reason for the failure without its position or names.
    ///
    /// There is one reason per grammar rule, so this is a bounded set and
    /// suits deduplicated reporting.
    ///
    /// ```
    /// use tagtree_parser::parse;
    ///
    /// let first = parse("<a></b>").unwrap_err();
    /// let second = parse("<abc><d></e></abc>").unwrap_err();
    /// assert_ne!(first, second);
    /// assert_eq!(first.reason(), second.reason());
    /// ```
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::UnexpectedInput { message, .. } => message,
            Self::MismatchedCloseTag { .. } => "mismatched close tag",
            Self::NestingTooDeep { .. } => "element nesting exceeds the limit",
            Self::Incomplete { .. } => "input ended before the root element closed",
        }
    }
}
