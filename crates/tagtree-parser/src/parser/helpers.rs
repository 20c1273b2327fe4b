//! Helper functions for the markup parser.
//!
//! This module contains utility functions used throughout the state handlers:
//! - State transitions ("switch to", "reconsume in")
//! - Character classes (separators and quotes)
//! - Tree construction (opening and closing elements, flushing text)
//! - Error construction and reporting

use std::mem;

use tagtree_common::warning::warn_once;
#[cfg(feature = "parse-trace")]
use tagtree_common::warning::trace;

use super::core::{MarkupParser, ParserState};
use crate::error::ParseError;

/// Component name used for diagnostics.
const COMPONENT: &str = "Markup Parser";

// =============================================================================
// State Transition Helpers
// =============================================================================

impl MarkupParser {
    /// Transitions to a new state. The next character is read in it.
    pub(super) fn switch_to(&mut self, new_state: ParserState) {
        #[cfg(feature = "parse-trace")]
        trace(
            COMPONENT,
            &format!("{} -> {new_state} at offset {}", self.state, self.position),
        );
        self.state = new_state;
    }

    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) fn reconsume_in(&mut self, new_state: ParserState) {
        self.reconsume = true;
        self.switch_to(new_state);
    }
}

// =============================================================================
// Character Classes
// =============================================================================

impl MarkupParser {
    pub(super) const fn is_space(&self, c: char) -> bool {
        self.options.is_space(c)
    }

    pub(super) const fn is_quote(c: char) -> bool {
        matches!(c, '"' | '\'')
    }
}

// =============================================================================
// Tree Construction Helpers
// =============================================================================

impl MarkupParser {
    /// Create an element from the buffered name and make it the current
    /// element. With nothing open it becomes the root.
    ///
    /// `c` is the character that ended the name.
    pub(super) fn open_element(&mut self, c: char) -> Result<(), ParseError> {
        if self.element_name.is_empty() {
            return Err(self.unexpected(c, "unexpected input while waiting for element name"));
        }
        if let Some(limit) = self.options.max_depth()
            && self.depth >= limit
        {
            return Err(ParseError::NestingTooDeep {
                limit,
                offset: self.position,
            });
        }

        let name = mem::take(&mut self.element_name);
        let parent = self.current_element;
        let id = self.tree.create_element(parent, name);
        if let Some(parent) = parent {
            self.tree.append_child(parent, id);
        }
        self.current_element = Some(id);
        self.depth += 1;
        Ok(())
    }

    /// Check the buffered close tag name against the current element and
    /// make its parent current.
    pub(super) fn close_element(&mut self, c: char) -> Result<(), ParseError> {
        let Some(current) = self.current_element else {
            return Err(self.unexpected(c, "close tag with no open element"));
        };
        let expected = self
            .tree
            .as_element(current)
            .map(|e| e.tag_name.as_str())
            .unwrap_or_default();
        if self.element_name != expected {
            return Err(ParseError::MismatchedCloseTag {
                expected: expected.to_owned(),
                found: mem::take(&mut self.element_name),
                offset: self.position,
            });
        }

        self.element_name.clear();
        self.current_element = self.tree.parent_element(current);
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    /// Append pending character data to the current element as a text node.
    /// An empty buffer never produces a node.
    pub(super) fn flush_text(&mut self) {
        if self.element_text.is_empty() {
            return;
        }
        if let Some(parent) = self.current_element {
            let data = mem::take(&mut self.element_text);
            let id = self.tree.create_text(parent, data);
            self.tree.append_child(parent, id);
        }
    }

    /// Insert or overwrite an attribute on the element whose opening tag is
    /// being read.
    pub(super) fn set_current_attribute(&mut self, name: String, value: String) {
        if let Some(element) = self.current_element {
            self.tree.set_attribute(element, name, value);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl MarkupParser {
    /// Build an `UnexpectedInput` error for `c` in the current state.
    pub(super) const fn unexpected(&self, c: char, message: &'static str) -> ParseError {
        ParseError::UnexpectedInput {
            found: c,
            offset: self.position,
            state: self.state,
            message,
        }
    }

    /// Record `error` as terminal, report its reason once per process, and
    /// hand it back. The full error, offset included, travels in the result.
    pub(super) fn fail(&mut self, error: ParseError) -> ParseError {
        let _first = warn_once(COMPONENT, error.reason());
        self.failure = Some(error.clone());
        error
    }
}
