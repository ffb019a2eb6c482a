//! The pattern grammar.
//!
//! ```text
//! Pattern   ::= Pattern1 {'|' Pattern1}
//! Pattern1  ::= '_' ':' TypePat | varid ':' TypePat | Pattern2
//! Pattern2  ::= varid '@' Pattern3 | Pattern3 | varid
//! Pattern3  ::= '_' '*' | SimplePattern {id SimplePattern}
//! ```
//!
//! A bare lowercase identifier binds; `varid @ pattern` is tried before
//! the bare binder so that `x @ Some(_)` resolves the ambiguity.

use scalar_peg::{alt, PResult, Parser};

use crate::chars::tok;
use crate::ident::{id, op_tok, stable_id, underscore, var_id};
use crate::literal::literal;
use crate::types::typ;

/// A full pattern, including alternatives.
pub(crate) fn pattern(p: &mut Parser) -> PResult {
    p.rule("Pattern", |p| p.sep1(pattern1, |p| op_tok(p, "|")))
}

/// A pattern with an optional top-level type ascription.
pub(crate) fn pattern1(p: &mut Parser) -> PResult {
    alt!(p, wildcard_typed(p), var_typed(p), pattern2(p))
}

fn wildcard_typed(p: &mut Parser) -> PResult {
    underscore(p)?;
    op_tok(p, ":")?;
    typ(p)
}

fn var_typed(p: &mut Parser) -> PResult {
    var_id(p)?;
    op_tok(p, ":")?;
    typ(p)
}

/// A possibly-bound pattern: `x @ p`, a composite pattern, or a binder.
pub(crate) fn pattern2(p: &mut Parser) -> PResult {
    alt!(p, binder(p), pattern3(p), var_id(p))
}

fn binder(p: &mut Parser) -> PResult {
    var_id(p)?;
    op_tok(p, "@")?;
    pattern3(p)
}

fn pattern3(p: &mut Parser) -> PResult {
    alt!(p, seq_wildcard(p), infix_pattern(p))
}

fn seq_wildcard(p: &mut Parser) -> PResult {
    underscore(p)?;
    op_tok(p, "*")
}

fn infix_pattern(p: &mut Parser) -> PResult {
    simple_pattern(p)?;
    p.many0(|p| {
        id(p)?;
        simple_pattern(p)
    })
}

fn simple_pattern(p: &mut Parser) -> PResult {
    alt!(
        p,
        wildcard_pattern(p),
        literal(p),
        tuple_pattern(p),
        extractor(p),
        var_id(p),
    )
}

/// `'_' [':' TypePat]`, provided it is not the head of a sequence
/// wildcard.
fn wildcard_pattern(p: &mut Parser) -> PResult {
    underscore(p)?;
    p.opt(|p| {
        op_tok(p, ":")?;
        typ(p)
    })?;
    p.not_ahead(|p| {
        crate::chars::wl(p)?;
        p.ch('*')
    })
}

fn tuple_pattern(p: &mut Parser) -> PResult {
    tok(p, "(")?;
    p.opt(extractor_args)?;
    tok(p, ")")
}

fn extractor(p: &mut Parser) -> PResult {
    stable_id(p)?;
    p.opt(|p| {
        tok(p, "(")?;
        p.opt(extractor_args)?;
        tok(p, ")")
    })
}

fn extractor_args(p: &mut Parser) -> PResult {
    p.sep1(pattern, |p| tok(p, ","))
}
