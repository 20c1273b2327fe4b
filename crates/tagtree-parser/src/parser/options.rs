//! Parser configuration.

/// Options controlling how strictly the parser reads its input.
///
/// Built in the same chained style as the rest of the parser API:
///
/// ```
/// use tagtree_parser::ParserOptions;
///
/// let options = ParserOptions::new().with_ascii_whitespace().with_max_depth(64);
/// assert!(options.is_space('\n'));
/// assert_eq!(options.max_depth(), Some(64));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    ascii_whitespace: bool,
    max_depth: Option<usize>,
}

impl ParserOptions {
    /// Default options: only U+0020 SPACE separates tokens, nesting is unlimited.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ascii_whitespace: false,
            max_depth: None,
        }
    }

    /// Accept TAB, LF, FF and CR wherever the grammar accepts a space.
    #[must_use]
    pub const fn with_ascii_whitespace(mut self) -> Self {
        self.ascii_whitespace = true;
        self
    }

    /// Fail with `NestingTooDeep` when an element would open deeper than
    /// `max_depth`. The root is at depth 1.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Whether ASCII whitespace is treated like a space.
    #[must_use]
    pub const fn ascii_whitespace(&self) -> bool {
        self.ascii_whitespace
    }

    /// The nesting limit, if any.
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Whether `c` counts as a separator under these options.
    #[must_use]
    pub const fn is_space(&self, c: char) -> bool {
        if self.ascii_whitespace {
            // TAB, LF, FF, CR, SPACE
            matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
        } else {
            c == ' '
        }
    }
}
