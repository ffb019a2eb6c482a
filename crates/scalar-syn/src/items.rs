//! Definitions, templates, imports, and the top level.
//!
//! ```text
//! CompilationUnit ::= optSemis TopPackageSeq optSemis TopStatSeq optSemis EOI
//! TopPackageSeq   ::= [FlatPackageStat {Semis FlatPackageStat}]
//! FlatPackageStat ::= 'package' QualId !'{'
//! TopStat         ::= Packaging | PackageObject | Import
//!                   | {Annotation} {Modifier} Def
//! ```
//!
//! Braced packagings go through `TopStat`; only brace-less `package a.b`
//! headers belong to the package sequence.

use scalar_peg::{alt, PResult, Parser};

use crate::chars::{one_newline_max, not_newline, opt_semis, semis, tok, wl};
use crate::expr::{block_expr, expr, paren_args};
use crate::ident::{id, kw, op_tok, qual_id, rarrow, underscore};
use crate::pattern::pattern2;
use crate::types::{annot_type, annotation, infix_type, param_type, type_bounds, type_param_clause, typ};
use crate::Newlines::{Insensitive, Sensitive};

fn comma(p: &mut Parser) -> PResult {
    tok(p, ",")
}

/// The top rule: the whole input must be one compilation unit.
pub(crate) fn compilation_unit(p: &mut Parser) -> PResult {
    p.rule("CompilationUnit", |p| {
        // A byte-order mark may precede everything.
        if p.current() == Some('\u{FEFF}') {
            p.advance(1);
        }
        opt_semis(p)?;
        p.opt(top_package_seq)?;
        opt_semis(p)?;
        p.opt(top_stat_seq)?;
        opt_semis(p)?;
        wl(p)?;
        p.eoi()
    })
}

fn top_package_seq(p: &mut Parser) -> PResult {
    p.sep1(flat_package_stat, semis)
}

/// `'package' QualId` not followed by a brace.
fn flat_package_stat(p: &mut Parser) -> PResult {
    kw(p, "package")?;
    qual_id(p)?;
    p.not_ahead(|p| {
        wl(p)?;
        p.ch('{')
    })
}

fn top_stat_seq(p: &mut Parser) -> PResult {
    p.sep1(top_stat, semis)
}

fn top_stat(p: &mut Parser) -> PResult {
    p.rule("TopStat", |p| {
        alt!(
            p,
            packaging(p),
            package_object(p),
            import_clause(p),
            top_def_stat(p),
        )
    })
}

fn packaging(p: &mut Parser) -> PResult {
    kw(p, "package")?;
    qual_id(p)?;
    one_newline_max(p)?;
    tok(p, "{")?;
    opt_semis(p)?;
    p.opt(top_stat_seq)?;
    opt_semis(p)?;
    tok(p, "}")
}

fn package_object(p: &mut Parser) -> PResult {
    kw(p, "package")?;
    kw(p, "object")?;
    object_def_rest(p)
}

fn top_def_stat(p: &mut Parser) -> PResult {
    p.many0(annotation)?;
    p.many0(modifier)?;
    definition(p)
}

// ----------------------------------------------------------------------
// Imports
// ----------------------------------------------------------------------

/// `'import' ImportExpr {',' ImportExpr}`.
pub(crate) fn import_clause(p: &mut Parser) -> PResult {
    kw(p, "import")?;
    p.sep1(import_expr, comma)
}

fn import_expr(p: &mut Parser) -> PResult {
    crate::ident::stable_id(p)?;
    p.opt(|p| {
        tok(p, ".")?;
        alt!(p, underscore(p), import_selectors(p))
    })
}

fn import_selectors(p: &mut Parser) -> PResult {
    tok(p, "{")?;
    p.sep1(import_selector, comma)?;
    tok(p, "}")
}

/// `x`, `x => y`, `x => _`, or `_`.
fn import_selector(p: &mut Parser) -> PResult {
    alt!(p, underscore(p), renamed_selector(p))
}

fn renamed_selector(p: &mut Parser) -> PResult {
    id(p)?;
    p.opt(|p| {
        rarrow(p)?;
        alt!(p, id(p), underscore(p))
    })
}

// ----------------------------------------------------------------------
// Definitions
// ----------------------------------------------------------------------

/// Any definition, including nested templates.
pub(crate) fn definition(p: &mut Parser) -> PResult {
    alt!(
        p,
        val_def(p),
        var_def(p),
        fun_def(p),
        type_def(p),
        tmpl_def(p),
    )
}

fn val_def(p: &mut Parser) -> PResult {
    kw(p, "val")?;
    pat_def_rest(p)
}

fn var_def(p: &mut Parser) -> PResult {
    kw(p, "var")?;
    pat_def_rest(p)
}

/// `Pattern2 {',' Pattern2} [':' Type] '=' Expr`.
fn pat_def_rest(p: &mut Parser) -> PResult {
    p.sep1(pattern2, comma)?;
    p.opt(type_ascribe)?;
    op_tok(p, "=")?;
    expr(p, Sensitive)
}

fn type_ascribe(p: &mut Parser) -> PResult {
    op_tok(p, ":")?;
    typ(p)
}

fn fun_def(p: &mut Parser) -> PResult {
    kw(p, "def")?;
    fun_sig(p)?;
    fun_rhs(p)
}

/// `(id | 'this') [TypeParamClause] ParamClauses`.
fn fun_sig(p: &mut Parser) -> PResult {
    alt!(p, id(p), kw(p, "this"))?;
    p.opt(type_param_clause)?;
    param_clauses(p)
}

fn fun_rhs(p: &mut Parser) -> PResult {
    alt!(p, eq_rhs(p), proc_body(p))
}

fn eq_rhs(p: &mut Parser) -> PResult {
    p.opt(type_ascribe)?;
    op_tok(p, "=")?;
    p.opt(|p| kw(p, "macro"))?;
    expr(p, Sensitive)
}

// Procedure syntax: a brace body with no result type.
fn proc_body(p: &mut Parser) -> PResult {
    one_newline_max(p)?;
    block_expr(p)
}

fn param_clauses(p: &mut Parser) -> PResult {
    p.many0(param_clause)
}

fn param_clause(p: &mut Parser) -> PResult {
    one_newline_max(p)?;
    tok(p, "(")?;
    p.opt(|p| kw(p, "implicit"))?;
    p.opt(|p| p.sep1(param, comma))?;
    tok(p, ")")
}

fn param(p: &mut Parser) -> PResult {
    p.many0(annotation)?;
    id(p)?;
    p.opt(|p| {
        op_tok(p, ":")?;
        param_type(p)
    })?;
    p.opt(default_value)
}

fn default_value(p: &mut Parser) -> PResult {
    op_tok(p, "=")?;
    expr(p, Insensitive)
}

/// `'type' id [TypeParamClause] ('=' Type | TypeBounds)` — covers both
/// aliases and abstract type members.
pub(crate) fn type_def(p: &mut Parser) -> PResult {
    kw(p, "type")?;
    id(p)?;
    p.opt(type_param_clause)?;
    alt!(p, type_alias(p), type_bounds(p))
}

fn type_alias(p: &mut Parser) -> PResult {
    op_tok(p, "=")?;
    typ(p)
}

// ----------------------------------------------------------------------
// Declarations (abstract members)
// ----------------------------------------------------------------------

/// `val`/`var`/`def` declarations without a right-hand side.
pub(crate) fn dcl(p: &mut Parser) -> PResult {
    alt!(p, val_dcl(p), var_dcl(p), fun_dcl(p))
}

fn ids(p: &mut Parser) -> PResult {
    p.sep1(id, comma)
}

fn val_dcl(p: &mut Parser) -> PResult {
    kw(p, "val")?;
    ids(p)?;
    type_ascribe(p)
}

fn var_dcl(p: &mut Parser) -> PResult {
    kw(p, "var")?;
    ids(p)?;
    type_ascribe(p)
}

fn fun_dcl(p: &mut Parser) -> PResult {
    kw(p, "def")?;
    fun_sig(p)?;
    p.opt(type_ascribe)
}

// ----------------------------------------------------------------------
// Modifiers
// ----------------------------------------------------------------------

pub(crate) fn modifier(p: &mut Parser) -> PResult {
    alt!(p, access_modifier(p), plain_modifier(p))
}

fn plain_modifier(p: &mut Parser) -> PResult {
    alt!(
        p,
        kw(p, "abstract"),
        kw(p, "final"),
        kw(p, "sealed"),
        kw(p, "implicit"),
        kw(p, "lazy"),
        kw(p, "override"),
    )
}

fn access_modifier(p: &mut Parser) -> PResult {
    alt!(p, kw(p, "private"), kw(p, "protected"))?;
    p.opt(access_qualifier)
}

fn access_qualifier(p: &mut Parser) -> PResult {
    tok(p, "[")?;
    alt!(p, kw(p, "this"), id(p))?;
    tok(p, "]")
}

// ----------------------------------------------------------------------
// Templates
// ----------------------------------------------------------------------

/// `'trait' ... | ['case'] 'class' ... | ['case'] 'object' ...`.
pub(crate) fn tmpl_def(p: &mut Parser) -> PResult {
    p.rule("TmplDef", |p| {
        alt!(p, trait_def(p), class_def(p), object_def(p))
    })
}

fn trait_def(p: &mut Parser) -> PResult {
    kw(p, "trait")?;
    id(p)?;
    p.opt(type_param_clause)?;
    trait_template_opt(p)
}

fn class_def(p: &mut Parser) -> PResult {
    p.opt(|p| kw(p, "case"))?;
    kw(p, "class")?;
    id(p)?;
    p.opt(type_param_clause)?;
    p.many0(annotation)?;
    p.opt(access_modifier)?;
    class_param_clauses(p)?;
    class_template_opt(p)
}

fn object_def(p: &mut Parser) -> PResult {
    p.opt(|p| kw(p, "case"))?;
    kw(p, "object")?;
    object_def_rest(p)
}

fn object_def_rest(p: &mut Parser) -> PResult {
    id(p)?;
    class_template_opt(p)
}

fn class_param_clauses(p: &mut Parser) -> PResult {
    p.many0(class_param_clause)
}

fn class_param_clause(p: &mut Parser) -> PResult {
    one_newline_max(p)?;
    tok(p, "(")?;
    p.opt(|p| kw(p, "implicit"))?;
    p.opt(|p| p.sep1(class_param, comma))?;
    tok(p, ")")
}

fn class_param(p: &mut Parser) -> PResult {
    p.many0(annotation)?;
    p.many0(modifier)?;
    p.opt(|p| alt!(p, kw(p, "val"), kw(p, "var")))?;
    id(p)?;
    op_tok(p, ":")?;
    param_type(p)?;
    p.opt(default_value)
}

fn class_template_opt(p: &mut Parser) -> PResult {
    alt!(p, extends_class_template(p), opt_body(p))
}

fn extends_class_template(p: &mut Parser) -> PResult {
    kw(p, "extends")?;
    class_template(p)
}

fn opt_body(p: &mut Parser) -> PResult {
    p.opt(template_body)
}

/// `[EarlyDefs] ClassParents [TemplateBody]`.
fn class_template(p: &mut Parser) -> PResult {
    p.opt(early_defs)?;
    class_parents(p)?;
    p.opt(template_body)
}

fn class_parents(p: &mut Parser) -> PResult {
    constr(p)?;
    p.many0(with_parent)
}

fn with_parent(p: &mut Parser) -> PResult {
    kw(p, "with")?;
    annot_type(p)
}

/// A parent constructor: an annotated type with parenthesized argument
/// lists. Brace arguments are excluded here so that a following template
/// body is not mistaken for one.
fn constr(p: &mut Parser) -> PResult {
    annot_type(p)?;
    p.many0(|p| {
        not_newline(p)?;
        paren_args(p)
    })
}

fn trait_template_opt(p: &mut Parser) -> PResult {
    alt!(p, extends_trait_template(p), opt_body(p))
}

fn extends_trait_template(p: &mut Parser) -> PResult {
    kw(p, "extends")?;
    trait_template(p)
}

fn trait_template(p: &mut Parser) -> PResult {
    p.opt(early_defs)?;
    trait_parents(p)?;
    p.opt(template_body)
}

fn trait_parents(p: &mut Parser) -> PResult {
    annot_type(p)?;
    p.many0(with_parent)
}

/// `'{' EarlyDef {Semis EarlyDef} '}' 'with'` — early field definitions
/// preceding the parents.
fn early_defs(p: &mut Parser) -> PResult {
    tok(p, "{")?;
    opt_semis(p)?;
    p.opt(|p| p.sep1(early_def, semis))?;
    opt_semis(p)?;
    tok(p, "}")?;
    kw(p, "with")
}

fn early_def(p: &mut Parser) -> PResult {
    p.many0(annotation)?;
    p.many0(modifier)?;
    alt!(p, val_def(p), var_def(p))
}

/// The template for `new`: either parents (with optional body) or a bare
/// body.
pub(crate) fn new_template(p: &mut Parser) -> PResult {
    alt!(p, class_template(p), template_body(p))
}

/// `[nl] '{' [SelfType] TemplateStat {Semis TemplateStat} '}'`.
pub(crate) fn template_body(p: &mut Parser) -> PResult {
    p.rule("TemplateBody", |p| {
        one_newline_max(p)?;
        tok(p, "{")?;
        p.opt(self_type)?;
        opt_semis(p)?;
        p.opt(|p| p.sep1(template_stat, semis))?;
        opt_semis(p)?;
        tok(p, "}")
    })
}

/// `(id | '_') [':' InfixType] '=>' | 'this' ':' InfixType '=>'`.
fn self_type(p: &mut Parser) -> PResult {
    alt!(p, this_self(p), named_self(p))
}

fn this_self(p: &mut Parser) -> PResult {
    kw(p, "this")?;
    op_tok(p, ":")?;
    infix_type(p)?;
    rarrow(p)
}

fn named_self(p: &mut Parser) -> PResult {
    alt!(p, id(p), underscore(p))?;
    p.opt(|p| {
        op_tok(p, ":")?;
        infix_type(p)
    })?;
    rarrow(p)
}

fn template_stat(p: &mut Parser) -> PResult {
    alt!(
        p,
        import_clause(p),
        member_def(p),
        member_dcl(p),
        template_expr_stat(p),
    )
}

fn member_def(p: &mut Parser) -> PResult {
    p.many0(annotation)?;
    p.many0(modifier)?;
    definition(p)
}

fn member_dcl(p: &mut Parser) -> PResult {
    p.many0(annotation)?;
    p.many0(modifier)?;
    dcl(p)
}

fn template_expr_stat(p: &mut Parser) -> PResult {
    expr(p, Sensitive)
}
