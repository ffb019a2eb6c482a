//! Failure tracking and parse-error formatting.
//!
//! During a parse the engine maintains a [`Frontier`]: the deepest offset
//! any primitive failed at, together with every terminal that was expected
//! there. Only the top-level entry point turns the frontier into a
//! [`ParseError`]; rule failures inside the grammar are plain values that
//! flow back through ordered-choice frames.

use std::fmt;

use indexmap::IndexSet;
use scalar_util::Source;

/// A terminal the parser was prepared to accept at some offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Expected {
    /// A literal character.
    Char(char),
    /// A literal string.
    Lit(&'static str),
    /// A character class, identified by its display label.
    Class(&'static str),
    /// An atomic token or named rule.
    Token(&'static str),
    /// End of input.
    End,
    /// A negative lookahead that matched where it should not have.
    Unexpected,
}

impl Expected {
    /// Renders the terminal the way it appears in an expected list.
    pub fn render(&self) -> String {
        match self {
            Expected::Char(c) => format!("\"{c}\""),
            Expected::Lit(s) => format!("\"{s}\""),
            Expected::Class(name) | Expected::Token(name) => (*name).to_string(),
            Expected::End => "end of input".to_string(),
            Expected::Unexpected => "something else".to_string(),
        }
    }
}

/// The deepest failure reached during a parse attempt.
///
/// A primitive failing at an offset strictly beyond the frontier replaces
/// it; a failure at the same offset extends the expected set. Failures
/// behind the frontier are ignored, so the frontier offset never decreases
/// within a run.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    pub(crate) offset: usize,
    pub(crate) expected: IndexSet<Expected>,
    pub(crate) trace: Vec<&'static str>,
}

impl Frontier {
    pub(crate) fn note(&mut self, offset: usize, expected: Expected, frames: &[&'static str]) {
        if offset < self.offset {
            return;
        }
        if offset > self.offset || self.expected.is_empty() {
            self.offset = offset;
            self.expected.clear();
            self.trace = frames.to_vec();
        }
        self.expected.insert(expected);
    }
}

/// How a [`ParseError`] came about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The grammar rejected the input.
    Syntax,
    /// The top rule succeeded but input remained. This is a misuse of the
    /// entry point rather than a user-facing parse failure.
    Incomplete,
}

/// A failed parse: position, expected terminals, and the named-rule stack
/// active at the deepest failure.
///
/// # Examples
///
/// ```
/// use scalar_peg::{ErrorKind, ParseError};
/// use scalar_util::Source;
///
/// let src = Source::new("val = 1");
/// let err = ParseError::incomplete(&src, 4);
/// assert_eq!(err.kind, ErrorKind::Incomplete);
/// assert_eq!((err.line, err.column), (1, 5));
/// ```
#[derive(Debug)]
pub struct ParseError {
    /// Failure offset in code units.
    pub offset: usize,
    /// 1-based line of the failure.
    pub line: usize,
    /// 1-based column of the failure, in code units.
    pub column: usize,
    /// Rendered expected terminals, unordered.
    pub expected: Vec<String>,
    /// Named rules active at the failure, outermost first.
    pub trace: Vec<&'static str>,
    /// How the error was classified.
    pub kind: ErrorKind,
    line_text: String,
}

impl ParseError {
    pub(crate) fn from_frontier(src: &Source, frontier: &Frontier) -> Self {
        let (line, column) = src.line_col(frontier.offset);
        Self {
            offset: frontier.offset,
            line,
            column,
            expected: frontier.expected.iter().map(Expected::render).collect(),
            trace: frontier.trace.clone(),
            kind: ErrorKind::Syntax,
            line_text: src.line_at(frontier.offset),
        }
    }

    /// Builds the error for input left over after a successful inner parse.
    pub fn incomplete(src: &Source, offset: usize) -> Self {
        let (line, column) = src.line_col(offset);
        Self {
            offset,
            line,
            column,
            expected: vec![Expected::End.render()],
            trace: Vec::new(),
            kind: ErrorKind::Incomplete,
            line_text: src.line_at(offset),
        }
    }

    /// Joins the expected terminals alphabetically: `", "` between entries,
    /// `" or "` before the last.
    pub fn formatted_expected(&self) -> String {
        let mut names = self.expected.clone();
        names.sort();
        names.dedup();
        match names.len() {
            0 => String::from("nothing"),
            1 => names.remove(0),
            _ => {
                let last = names.pop().unwrap_or_default();
                format!("{} or {}", names.join(", "), last)
            }
        }
    }

    /// Renders the failing source line with a caret under the column.
    pub fn formatted_line(&self) -> String {
        let caret_pad = " ".repeat(self.column.saturating_sub(1));
        format!("{}\n{caret_pad}^", self.line_text)
    }

    /// Renders the named-rule stack, outermost first, innermost last.
    pub fn formatted_trace(&self) -> String {
        self.trace.join(" > ")
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Incomplete => "incomplete parse",
        };
        write!(
            f,
            "{what} at {}:{}: expected {}",
            self.line,
            self.column,
            self.formatted_expected()
        )
    }
}

impl std::error::Error for ParseError {}
