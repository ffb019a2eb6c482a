//! scalar-util - Foundation types for the Scalar syntax recognizer.
//!
//! This crate provides the input representation shared by the parser
//! runtime and the grammar: an immutable source buffer addressed by
//! UTF-16 code unit, with line/column lookup for diagnostics.
//!
//! Nothing here knows about the grammar. The parser runtime lives in
//! `scalar-peg`, the grammar itself in `scalar-syn`.

mod source;

pub use source::Source;
