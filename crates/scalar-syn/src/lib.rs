//! scalar-syn - The Scala syntax grammar.
//!
//! This crate recognizes whether a source text is a syntactically valid
//! compilation unit. It is a recognizer, not a tree builder: [`parse`]
//! answers yes or no, and on rejection reports where the parse got stuck
//! and which syntactic alternatives were expected there.
//!
//! The grammar consumes raw characters; there is no separate lexer. Token
//! shapes (identifiers, literals, comments) live in [`chars`], [`ident`]
//! and [`literal`], the phrase grammar in [`types`], [`pattern`], [`expr`]
//! and [`items`], all as plain functions over a [`scalar_peg::Parser`].
//!
//! Statement boundaries follow the recognized language's semicolon
//! inference: inside braces a newline can end a statement, inside
//! parentheses it cannot. The grammar threads that context through as an
//! explicit [`Newlines`] parameter, so backtracking restores it for free.

mod chars;
mod expr;
mod ident;
mod items;
mod literal;
mod pattern;
mod types;

use scalar_peg::Parser;
use scalar_util::Source;

pub use scalar_peg::{ErrorKind, ParseError};

/// Statement-boundary handling for the expression grammar.
///
/// The flag is fixed by the construct that introduced the current context
/// (braces are sensitive, parentheses are not) and does not change
/// mid-expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Newlines {
    /// Newlines can terminate statements.
    Sensitive,
    /// Newlines are ordinary whitespace.
    Insensitive,
}

/// Parses an entire compilation unit.
///
/// Succeeds only if the whole input is consumed.
///
/// # Examples
///
/// ```
/// assert!(scalar_syn::parse("package a.b\nclass C").is_ok());
///
/// let err = scalar_syn::parse("class C {").unwrap_err();
/// assert!(err.expected.iter().any(|e| e == "\"}\""));
/// ```
pub fn parse(source: &str) -> Result<(), ParseError> {
    let src = Source::new(source);
    let mut parser = Parser::new(&src);
    run(&mut parser)
}

/// Like [`parse`], with a hook invoked on every named-rule entry.
///
/// The hook receives the rule name and the cursor offset; the trace
/// instrument in the driver uses it to count invocations.
pub fn parse_traced<F>(source: &str, on_rule: F) -> Result<(), ParseError>
where
    F: FnMut(&'static str, usize),
{
    let src = Source::new(source);
    let mut parser = Parser::new(&src);
    parser.set_observer(Box::new(on_rule));
    run(&mut parser)
}

fn run(parser: &mut Parser) -> Result<(), ParseError> {
    match items::compilation_unit(parser) {
        Ok(()) if parser.at_end() => Ok(()),
        // The top rule ends with an end-of-input match, so leftover input
        // here means an internal misuse, not a syntax error.
        Ok(()) => Err(parser.incomplete_error()),
        Err(_) => Err(parser.error()),
    }
}
