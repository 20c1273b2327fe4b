use strum_macros::{Display, EnumCount};

use tagtree_dom::{DomTree, NodeId};

use super::options::ParserOptions;
use crate::error::ParseError;

/// The parser state machine. The initial state is `BeforeElement`.
///
/// There is no terminal state: a parse is complete when the machine is back
/// in `InElement` after the root element has been closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumCount)]
#[strum(serialize_all = "snake_case")]
pub enum ParserState {
    /// Waiting for the `<` that opens the root element.
    BeforeElement,
    /// Just saw `<` inside content: either a child start tag or a close tag.
    BeforeTagStartOrClose,
    /// Close tag name read; skipping spaces up to `>`.
    ConsumeWhitespaceForCloseElement,
    /// Reading an opening tag name.
    InElementName,
    /// Reading a closing tag name after `</`.
    CloseElementName,
    /// Inside an opening tag, between attributes.
    BeforeAttributeName,
    /// Reading an attribute name.
    AttributeName,
    /// Attribute name ended with a space; waiting for `=`.
    AttributeSeparator,
    /// Saw `=`; waiting for the opening quote.
    BeforeAttributeValue,
    /// Reading a quoted attribute value.
    AttributeValue,
    /// Reading character data between tags.
    InElement,
}

/// Outcome of a successful `consume` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// The root element has been closed; the tree is finished.
    Complete,
    /// The input so far is a valid prefix; more is expected.
    Incomplete,
}

/// Incremental parser for simplified tag markup.
///
/// Feed input with [`consume`](Self::consume) as it arrives, in chunks of any
/// size split at any character boundary. The machine looks at one character
/// at a time; when a state needs to hand the current character to the next
/// state it sets a reconsume flag instead of moving a cursor backwards, so a
/// chunk boundary never falls inside a lookahead.
///
/// ```
/// use tagtree_parser::{MarkupParser, ParseStatus};
///
/// let mut parser = MarkupParser::new();
/// assert_eq!(parser.consume("<p class='x'>hel"), Ok(ParseStatus::Incomplete));
/// assert_eq!(parser.consume("lo</p>"), Ok(ParseStatus::Complete));
///
/// let tree = parser.finish().unwrap();
/// let root = tree.root().unwrap();
/// assert_eq!(tree.render(root), r#"<p class="x">hello</p>"#);
/// ```
#[derive(Debug)]
pub struct MarkupParser {
    pub(super) state: ParserState,
    pub(super) options: ParserOptions,
    pub(super) tree: DomTree,

    /// The innermost element still open. `None` before the root opens and
    /// after it closes.
    pub(super) current_element: Option<NodeId>,
    /// Number of open elements, i.e. the depth of `current_element`.
    pub(super) depth: usize,

    pub(super) element_name: String,
    pub(super) element_text: String,
    pub(super) attribute_name: String,
    pub(super) attribute_value: String,

    /// Characters consumed so far across all chunks.
    pub(super) position: usize,
    // When true, the current character is run again in the new state.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
    /// Set on the first error; every later call reports it again.
    pub(super) failure: Option<ParseError>,
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupParser {
    /// Create a parser with default options.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_options(ParserOptions::new())
    }

    /// Create a parser with the given options.
    #[must_use]
    pub const fn with_options(options: ParserOptions) -> Self {
        Self {
            state: ParserState::BeforeElement,
            options,
            tree: DomTree::new(),
            current_element: None,
            depth: 0,
            element_name: String::new(),
            element_text: String::new(),
            attribute_name: String::new(),
            attribute_value: String::new(),
            position: 0,
            reconsume: false,
            failure: None,
        }
    }

    /// The current machine state.
    #[must_use]
    pub const fn state(&self) -> ParserState {
        self.state
    }

    /// The options this parser was created with.
    #[must_use]
    pub const fn options(&self) -> ParserOptions {
        self.options
    }

    /// Characters consumed so far across all chunks.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Elements opened but not yet closed.
    #[must_use]
    pub const fn open_elements(&self) -> usize {
        self.depth
    }

    /// The tree built so far. Only meaningful as a finished document once
    /// [`is_complete`](Self::is_complete) returns true.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The root element, once its opening tag has been read.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.tree.root()
    }

    /// The error that stopped this parser, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&ParseError> {
        self.failure.as_ref()
    }

    /// Whether the root element has been opened and closed again.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failure.is_none()
            && matches!(self.state, ParserState::InElement)
            && self.current_element.is_none()
            && self.tree.root().is_some()
    }

    const fn status(&self) -> ParseStatus {
        if self.is_complete() {
            ParseStatus::Complete
        } else {
            ParseStatus::Incomplete
        }
    }

    /// Feed the next chunk of input.
    ///
    /// State carries over between calls, so a document may be split at any
    /// character boundary. Characters after a failure are not looked at.
    ///
    /// # Errors
    ///
    /// Returns the first grammar violation found. The tree built up to that
    /// point is left as it is and should be discarded. Once a call has
    /// failed, every later call returns the same error without reading its
    /// input.
    pub fn consume(&mut self, chunk: &str) -> Result<ParseStatus, ParseError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        for c in chunk.chars() {
            if let Err(error) = self.consume_character(c) {
                return Err(self.fail(error));
            }
            self.position += 1;
        }
        Ok(self.status())
    }

    /// Take the finished tree.
    ///
    /// # Errors
    ///
    /// Returns the stored error if a `consume` call failed, or
    /// [`ParseError::Incomplete`] if the root element is still open (or was
    /// never opened).
    pub fn finish(self) -> Result<DomTree, ParseError> {
        if self.is_complete() {
            return Ok(self.tree);
        }
        Err(self.failure.unwrap_or(ParseError::Incomplete {
            state: self.state,
            open_elements: self.depth,
        }))
    }

    /// Take the tree as it stands, finished or not.
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// Run one input character through the machine, reconsuming it as long
    /// as the handlers ask for that.
    fn consume_character(&mut self, c: char) -> Result<(), ParseError> {
        loop {
            self.reconsume = false;
            match self.state {
                ParserState::BeforeElement => self.handle_before_element_state(c)?,
                ParserState::InElementName => self.handle_in_element_name_state(c)?,
                ParserState::BeforeAttributeName => self.handle_before_attribute_name_state(c),
                ParserState::AttributeName => self.handle_attribute_name_state(c),
                ParserState::AttributeSeparator => self.handle_attribute_separator_state(c)?,
                ParserState::BeforeAttributeValue => {
                    self.handle_before_attribute_value_state(c)?;
                }
                ParserState::AttributeValue => self.handle_attribute_value_state(c),
                ParserState::InElement => self.handle_in_element_state(c)?,
                ParserState::BeforeTagStartOrClose => {
                    self.handle_before_tag_start_or_close_state(c);
                }
                ParserState::CloseElementName => self.handle_close_element_name_state(c),
                ParserState::ConsumeWhitespaceForCloseElement => {
                    self.handle_consume_whitespace_for_close_element_state(c)?;
                }
            }
            if !self.reconsume {
                return Ok(());
            }
        }
    }

    fn handle_before_element_state(&mut self, c: char) -> Result<(), ParseError> {
        match c {
            '<' => {
                self.switch_to(ParserState::InElementName);
                Ok(())
            }
            _ => Err(self.unexpected(c, "unexpected input while waiting for element start")),
        }
    }

    fn handle_in_element_name_state(&mut self, c: char) -> Result<(), ParseError> {
        match c {
            '>' => {
                self.open_element(c)?;
                self.switch_to(ParserState::InElement);
            }
            c if self.is_space(c) => {
                self.open_element(c)?;
                self.switch_to(ParserState::BeforeAttributeName);
            }
            c => self.element_name.push(c),
        }
        Ok(())
    }

    fn handle_before_attribute_name_state(&mut self, c: char) {
        match c {
            '>' => self.switch_to(ParserState::InElement),
            c if self.is_space(c) => {}
            _ => self.reconsume_in(ParserState::AttributeName),
        }
    }

    fn handle_attribute_name_state(&mut self, c: char) {
        match c {
            '>' => {
                // Boolean attribute: the value is the name itself.
                let name = std::mem::take(&mut self.attribute_name);
                self.set_current_attribute(name.clone(), name);
                self.switch_to(ParserState::InElement);
            }
            '=' => self.switch_to(ParserState::BeforeAttributeValue),
            c if self.is_space(c) => self.switch_to(ParserState::AttributeSeparator),
            c => self.attribute_name.push(c),
        }
    }

    fn handle_attribute_separator_state(&mut self, c: char) -> Result<(), ParseError> {
        match c {
            '=' => self.switch_to(ParserState::BeforeAttributeValue),
            c if self.is_space(c) => {}
            _ => {
                return Err(
                    self.unexpected(c, "unexpected input while waiting for attribute separator")
                );
            }
        }
        Ok(())
    }

    fn handle_before_attribute_value_state(&mut self, c: char) -> Result<(), ParseError> {
        match c {
            c if Self::is_quote(c) => self.switch_to(ParserState::AttributeValue),
            c if self.is_space(c) => {}
            _ => {
                return Err(
                    self.unexpected(c, "unexpected input while waiting for attribute value")
                );
            }
        }
        Ok(())
    }

    fn handle_attribute_value_state(&mut self, c: char) {
        if Self::is_quote(c) {
            let name = std::mem::take(&mut self.attribute_name);
            let value = std::mem::take(&mut self.attribute_value);
            self.set_current_attribute(name, value);
            self.switch_to(ParserState::BeforeAttributeName);
        } else {
            self.attribute_value.push(c);
        }
    }

    fn handle_in_element_state(&mut self, c: char) -> Result<(), ParseError> {
        if self.current_element.is_none() {
            // The root is closed; only trailing whitespace may follow it.
            if c.is_ascii_whitespace() {
                return Ok(());
            }
            return Err(self.unexpected(c, "unexpected input after the root element was closed"));
        }
        match c {
            '<' => {
                self.flush_text();
                self.switch_to(ParserState::BeforeTagStartOrClose);
            }
            c => self.element_text.push(c),
        }
        Ok(())
    }

    fn handle_before_tag_start_or_close_state(&mut self, c: char) {
        match c {
            '/' => self.switch_to(ParserState::CloseElementName),
            _ => self.reconsume_in(ParserState::InElementName),
        }
    }

    fn handle_close_element_name_state(&mut self, c: char) {
        match c {
            '>' => self.reconsume_in(ParserState::ConsumeWhitespaceForCloseElement),
            c if self.is_space(c) => self.switch_to(ParserState::ConsumeWhitespaceForCloseElement),
            c => self.element_name.push(c),
        }
    }

    fn handle_consume_whitespace_for_close_element_state(
        &mut self,
        c: char,
    ) -> Result<(), ParseError> {
        match c {
            '>' => {
                self.close_element(c)?;
                self.switch_to(ParserState::InElement);
            }
            c if self.is_space(c) => {}
            _ => {
                return Err(self.unexpected(
                    c,
                    "unexpected input while reading whitespace before element close",
                ));
            }
        }
        Ok(())
    }
}

/// Parse a complete document held in memory.
///
/// # Errors
///
/// Returns the first grammar violation, or [`ParseError::Incomplete`] if the
/// input ends before the root element is closed.
pub fn parse(input: &str) -> Result<DomTree, ParseError> {
    parse_with_options(input, ParserOptions::new())
}

/// Parse a complete document with the given options.
///
/// # Errors
///
/// As for [`parse`], plus [`ParseError::NestingTooDeep`] when a depth limit
/// is set and exceeded.
pub fn parse_with_options(input: &str, options: ParserOptions) -> Result<DomTree, ParseError> {
    let mut parser = MarkupParser::with_options(options);
    let _status = parser.consume(input)?;
    parser.finish()
}
