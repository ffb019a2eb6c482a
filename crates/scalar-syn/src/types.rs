//! The type grammar.
//!
//! ```text
//! Type          ::= ('_' | FunctionArgTypes '=>' Type | InfixType ExistentialClause?) TypeBounds
//! InfixType     ::= CompoundType {id [nl] CompoundType}
//! CompoundType  ::= AnnotType {'with' AnnotType} Refinement? | Refinement
//! AnnotType     ::= SimpleType {Annotation}
//! SimpleType    ::= ('(' Types ')' | StableId '.' 'type' | StableId) {TypeArgs | '#' id}
//! TypeBounds    ::= ['>:' Type] ['<:' Type]
//! ```

use scalar_peg::{alt, PResult, Parser};

use crate::chars::{one_newline_max, opt_semis, semis, tok};
use crate::ident::{id, kw, op_tok, rarrow, stable_id, underscore};
use crate::items;

fn comma(p: &mut Parser) -> PResult {
    tok(p, ",")
}

/// A full type, including optional bounds.
pub(crate) fn typ(p: &mut Parser) -> PResult {
    p.rule("Type", |p| {
        alt!(p, underscore(p), fn_type(p), infix_headed(p))?;
        type_bounds(p)
    })
}

/// `Type {',' Type}`.
pub(crate) fn types(p: &mut Parser) -> PResult {
    p.sep1(typ, comma)
}

fn fn_type(p: &mut Parser) -> PResult {
    fn_arg_types(p)?;
    rarrow(p)?;
    typ(p)
}

fn fn_arg_types(p: &mut Parser) -> PResult {
    alt!(p, paren_param_types(p), infix_type(p))
}

fn paren_param_types(p: &mut Parser) -> PResult {
    tok(p, "(")?;
    p.opt(|p| p.sep1(param_type, comma))?;
    tok(p, ")")
}

/// A parameter type: by-name (`=> T`) or possibly repeated (`T*`).
pub(crate) fn param_type(p: &mut Parser) -> PResult {
    alt!(p, by_name_type(p), starred_type(p))
}

fn by_name_type(p: &mut Parser) -> PResult {
    rarrow(p)?;
    typ(p)
}

fn starred_type(p: &mut Parser) -> PResult {
    typ(p)?;
    p.opt(|p| op_tok(p, "*"))
}

fn infix_headed(p: &mut Parser) -> PResult {
    infix_type(p)?;
    p.opt(existential_clause)
}

/// `CompoundType {id [nl] CompoundType}`. A single newline may separate an
/// infix operator from its right operand.
pub(crate) fn infix_type(p: &mut Parser) -> PResult {
    p.rule("InfixType", |p| {
        compound_type(p)?;
        p.many0(|p| {
            id(p)?;
            one_newline_max(p)?;
            compound_type(p)
        })
    })
}

fn compound_type(p: &mut Parser) -> PResult {
    alt!(p, refinement(p), compound_parts(p))
}

fn compound_parts(p: &mut Parser) -> PResult {
    annot_type(p)?;
    p.many0(|p| {
        kw(p, "with")?;
        annot_type(p)
    })?;
    p.opt(refinement)
}

/// An annotated parent or component type, as used in `extends` clauses.
pub(crate) fn annot_type(p: &mut Parser) -> PResult {
    simple_type(p)?;
    p.many0(annotation)
}

/// `@' SimpleType {ArgumentExprs}`.
pub(crate) fn annotation(p: &mut Parser) -> PResult {
    op_tok(p, "@")?;
    simple_type(p)?;
    p.many0(crate::expr::argument_exprs)
}

fn simple_type(p: &mut Parser) -> PResult {
    p.rule("SimpleType", |p| {
        alt!(p, paren_types(p), singleton_type(p), stable_id(p))?;
        p.many0(type_suffix_part)
    })
}

fn paren_types(p: &mut Parser) -> PResult {
    tok(p, "(")?;
    p.opt(types)?;
    tok(p, ")")
}

fn singleton_type(p: &mut Parser) -> PResult {
    stable_id(p)?;
    tok(p, ".")?;
    kw(p, "type")
}

fn type_suffix_part(p: &mut Parser) -> PResult {
    alt!(p, type_args(p), type_projection(p))
}

fn type_projection(p: &mut Parser) -> PResult {
    op_tok(p, "#")?;
    id(p)
}

/// `'[' Types ']'`.
pub(crate) fn type_args(p: &mut Parser) -> PResult {
    tok(p, "[")?;
    types(p)?;
    tok(p, "]")
}

/// `['>:' Type] ['<:' Type]`.
pub(crate) fn type_bounds(p: &mut Parser) -> PResult {
    p.opt(|p| {
        op_tok(p, ">:")?;
        typ(p)
    })?;
    p.opt(|p| {
        op_tok(p, "<:")?;
        typ(p)
    })
}

fn existential_clause(p: &mut Parser) -> PResult {
    kw(p, "forSome")?;
    tok(p, "{")?;
    opt_semis(p)?;
    existential_dcl(p)?;
    p.many0(|p| {
        opt_semis(p)?;
        existential_dcl(p)
    })?;
    opt_semis(p)?;
    tok(p, "}")
}

fn existential_dcl(p: &mut Parser) -> PResult {
    alt!(p, existential_type_dcl(p), existential_val_dcl(p))
}

fn existential_type_dcl(p: &mut Parser) -> PResult {
    kw(p, "type")?;
    id(p)?;
    p.opt(type_param_clause)?;
    type_bounds(p)
}

fn existential_val_dcl(p: &mut Parser) -> PResult {
    kw(p, "val")?;
    id(p)?;
    op_tok(p, ":")?;
    typ(p)
}

/// `'[' VariantTypeParam {',' VariantTypeParam} ']'`.
pub(crate) fn type_param_clause(p: &mut Parser) -> PResult {
    tok(p, "[")?;
    p.sep1(variant_type_param, comma)?;
    tok(p, "]")
}

/// A type parameter with optional variance, higher-kinded parameters,
/// bounds, and view/context bounds.
fn variant_type_param(p: &mut Parser) -> PResult {
    p.many0(annotation)?;
    p.opt(variance)?;
    alt!(p, id(p), underscore(p))?;
    p.opt(type_param_clause)?;
    type_bounds(p)?;
    p.many0(|p| {
        op_tok(p, "<%")?;
        typ(p)
    })?;
    p.many0(|p| {
        op_tok(p, ":")?;
        typ(p)
    })
}

fn variance(p: &mut Parser) -> PResult {
    alt!(p, op_tok(p, "+"), op_tok(p, "-"))
}

/// `[nl] '{' RefineStat {semi RefineStat} '}'`.
fn refinement(p: &mut Parser) -> PResult {
    one_newline_max(p)?;
    tok(p, "{")?;
    opt_semis(p)?;
    p.opt(|p| p.sep1(refine_stat, semis))?;
    opt_semis(p)?;
    tok(p, "}")
}

fn refine_stat(p: &mut Parser) -> PResult {
    alt!(p, items::type_def(p), items::dcl(p))
}
