//! scalar-peg - Grammar combinator runtime.
//!
//! This crate implements the machinery under the Scalar grammar: a
//! backtracking recursive-descent engine over a UTF-16 code-unit buffer.
//! Grammar rules are plain functions of the shape
//! `fn(&mut Parser) -> PResult`; sequencing is the `?` operator, ordered
//! choice is the [`alt!`] macro, and repetition, lookahead, and atomic
//! tokens are methods on [`Parser`].
//!
//! Failures are values, not exceptions. A failing primitive records what it
//! expected in the *frontier*, the deepest offset any attempt reached;
//! ordered choice restores the cursor and tries the next branch. When the
//! whole parse fails, the frontier becomes a [`ParseError`] carrying the
//! failure position, the set of expected terminals, and the stack of named
//! rules that were active at the deepest failure.
//!
//! The engine is single-threaded: one [`Parser`] per input, no shared state
//! between instances.

mod error;
mod parser;

pub use error::{ErrorKind, Expected, ParseError};
pub use parser::{PResult, Parser, Reject};
