//! The expression grammar and semicolon inference.
//!
//! Every rule here threads a [`Newlines`] flag. In sensitive contexts
//! (inside braces) an infix operator must start on the same line as its
//! left operand, and at most one newline may separate it from its right
//! operand; in insensitive contexts (inside parentheses) newlines are
//! plain whitespace. The two behaviors differ only in [`maybe_not_newline`]
//! and [`maybe_one_newline`].
//!
//! Operator precedence is not resolved: an infix chain is accepted
//! left-to-right and reshaping is a downstream concern.

use scalar_peg::{alt, PResult, Parser, Reject};

use crate::chars::{newline, not_newline, one_newline_max, opt_semis, semi, semis, tok, ws};
use crate::ident::{id, kw, larrow, op_tok, rarrow, stable_id, underscore};
use crate::items;
use crate::literal::literal;
use crate::pattern::{pattern, pattern1};
use crate::types::{annotation, infix_type, typ, type_args};
use crate::Newlines::{self, Insensitive, Sensitive};

fn comma(p: &mut Parser) -> PResult {
    tok(p, ",")
}

fn maybe_not_newline(p: &mut Parser, nl: Newlines) -> PResult {
    match nl {
        Sensitive => not_newline(p),
        Insensitive => Ok(()),
    }
}

fn maybe_one_newline(p: &mut Parser, nl: Newlines) -> PResult {
    match nl {
        Sensitive => one_newline_max(p),
        Insensitive => Ok(()),
    }
}

/// Any expression: lambda heads, then one of the control-flow forms or an
/// operator chain.
pub(crate) fn expr(p: &mut Parser, nl: Newlines) -> PResult {
    p.rule("Expr", |p| {
        p.many0(lambda_head)?;
        expr1(p, nl)
    })
}

fn expr1(p: &mut Parser, nl: Newlines) -> PResult {
    alt!(
        p,
        if_expr(p, nl),
        while_expr(p, nl),
        try_expr(p, nl),
        do_expr(p, nl),
        for_expr(p, nl),
        throw_expr(p, nl),
        return_expr(p, nl),
        assign_expr(p, nl),
        postfix_headed(p, nl),
    )
}

/// `(Bindings | ['implicit'] (id | '_') [':' InfixType]) '=>'`.
fn lambda_head(p: &mut Parser) -> PResult {
    alt!(p, paren_bindings(p), simple_binding(p))?;
    rarrow(p)
}

fn paren_bindings(p: &mut Parser) -> PResult {
    tok(p, "(")?;
    p.opt(|p| p.sep1(binding, comma))?;
    tok(p, ")")
}

fn binding(p: &mut Parser) -> PResult {
    alt!(p, id(p), underscore(p))?;
    p.opt(|p| {
        op_tok(p, ":")?;
        typ(p)
    })
}

fn simple_binding(p: &mut Parser) -> PResult {
    p.opt(|p| kw(p, "implicit"))?;
    alt!(p, id(p), underscore(p))?;
    p.opt(|p| {
        op_tok(p, ":")?;
        infix_type(p)
    })
}

fn if_expr(p: &mut Parser, nl: Newlines) -> PResult {
    kw(p, "if")?;
    tok(p, "(")?;
    expr(p, Insensitive)?;
    tok(p, ")")?;
    expr(p, nl)?;
    p.opt(|p| else_part(p, nl))
}

fn else_part(p: &mut Parser, nl: Newlines) -> PResult {
    opt_semis(p)?;
    kw(p, "else")?;
    expr(p, nl)
}

fn while_expr(p: &mut Parser, nl: Newlines) -> PResult {
    kw(p, "while")?;
    tok(p, "(")?;
    expr(p, Insensitive)?;
    tok(p, ")")?;
    expr(p, nl)
}

fn try_expr(p: &mut Parser, nl: Newlines) -> PResult {
    kw(p, "try")?;
    expr(p, nl)?;
    p.opt(|p| {
        kw(p, "catch")?;
        expr(p, nl)
    })?;
    p.opt(|p| {
        kw(p, "finally")?;
        expr(p, nl)
    })
}

fn do_expr(p: &mut Parser, nl: Newlines) -> PResult {
    kw(p, "do")?;
    expr(p, nl)?;
    p.opt(semi)?;
    kw(p, "while")?;
    tok(p, "(")?;
    expr(p, Insensitive)?;
    tok(p, ")")
}

fn for_expr(p: &mut Parser, nl: Newlines) -> PResult {
    kw(p, "for")?;
    alt!(p, paren_enums(p), brace_enums(p))?;
    p.opt(|p| kw(p, "yield"))?;
    expr(p, nl)
}

fn paren_enums(p: &mut Parser) -> PResult {
    tok(p, "(")?;
    enumerators(p, Insensitive)?;
    tok(p, ")")
}

fn brace_enums(p: &mut Parser) -> PResult {
    tok(p, "{")?;
    enumerators(p, Sensitive)?;
    tok(p, "}")
}

/// `Generator {Semis Enumerator}`.
fn enumerators(p: &mut Parser, nl: Newlines) -> PResult {
    generator(p, nl)?;
    p.many0(|p| {
        semis(p)?;
        enumerator(p, nl)
    })
}

/// `Pattern1 '<-' Expr [Guard]`.
fn generator(p: &mut Parser, nl: Newlines) -> PResult {
    pattern1(p)?;
    larrow(p)?;
    expr(p, nl)?;
    p.opt(|p| guard(p, nl))
}

fn enumerator(p: &mut Parser, nl: Newlines) -> PResult {
    alt!(p, generator(p, nl), guard(p, nl), for_binding(p, nl))
}

fn for_binding(p: &mut Parser, nl: Newlines) -> PResult {
    pattern1(p)?;
    op_tok(p, "=")?;
    expr(p, nl)
}

fn guard(p: &mut Parser, nl: Newlines) -> PResult {
    kw(p, "if")?;
    postfix_expr(p, nl)
}

fn throw_expr(p: &mut Parser, nl: Newlines) -> PResult {
    kw(p, "throw")?;
    expr(p, nl)
}

/// `return` with an optional value; in a sensitive context the value must
/// start on the same line.
fn return_expr(p: &mut Parser, nl: Newlines) -> PResult {
    kw(p, "return")?;
    p.opt(|p| {
        maybe_not_newline(p, nl)?;
        expr(p, nl)
    })
}

/// `SimpleExpr '=' Expr`, recognized directly only where newlines are
/// insignificant; sensitive contexts reach assignment through the
/// postfix trailer.
fn assign_expr(p: &mut Parser, nl: Newlines) -> PResult {
    if nl == Sensitive {
        return Err(Reject);
    }
    simple_expr(p, nl)?;
    op_tok(p, "=")?;
    expr(p, nl)
}

fn postfix_headed(p: &mut Parser, nl: Newlines) -> PResult {
    postfix_expr(p, nl)?;
    p.opt(|p| expr_trailer(p, nl))
}

fn expr_trailer(p: &mut Parser, nl: Newlines) -> PResult {
    alt!(p, assign_trailer(p, nl), ascription(p), match_trailer(p))
}

fn assign_trailer(p: &mut Parser, nl: Newlines) -> PResult {
    op_tok(p, "=")?;
    expr(p, nl)
}

/// `':' ('_' '*' | Annotation+ | Type)`.
fn ascription(p: &mut Parser) -> PResult {
    op_tok(p, ":")?;
    alt!(p, seq_wildcard_ascription(p), annotations1(p), typ(p))
}

fn seq_wildcard_ascription(p: &mut Parser) -> PResult {
    underscore(p)?;
    op_tok(p, "*")
}

fn annotations1(p: &mut Parser) -> PResult {
    p.many1(annotation)
}

fn match_trailer(p: &mut Parser) -> PResult {
    kw(p, "match")?;
    case_block(p)
}

fn case_block(p: &mut Parser) -> PResult {
    tok(p, "{")?;
    case_clauses(p)?;
    tok(p, "}")
}

/// `PrefixExpr {InfixPart} [PostfixPart]`. Infix chains are accepted
/// left-to-right without precedence.
pub(crate) fn postfix_expr(p: &mut Parser, nl: Newlines) -> PResult {
    prefix_expr(p, nl)?;
    p.many0(|p| infix_part(p, nl))?;
    p.opt(postfix_part)
}

/// In a sensitive context the operator must start on the line of its left
/// operand, and one newline at most may precede the right operand.
fn infix_part(p: &mut Parser, nl: Newlines) -> PResult {
    maybe_not_newline(p, nl)?;
    id(p)?;
    p.opt(type_args)?;
    maybe_one_newline(p, nl)?;
    prefix_expr(p, nl)
}

fn postfix_part(p: &mut Parser) -> PResult {
    not_newline(p)?;
    id(p)?;
    p.opt(|p| {
        ws(p)?;
        newline(p)
    })
}

fn prefix_expr(p: &mut Parser, nl: Newlines) -> PResult {
    p.opt(prefix_op)?;
    simple_expr(p, nl)
}

/// A prefix operator is one of `- + ~ !` not followed by another operator
/// character.
fn prefix_op(p: &mut Parser) -> PResult {
    crate::chars::wl(p)?;
    p.atomic("prefix operator", |p| {
        p.class(|c| matches!(c, '-' | '+' | '~' | '!'), "prefix operator")?;
        p.not_ahead(crate::ident::op_continues)
    })
}

fn simple_expr(p: &mut Parser, nl: Newlines) -> PResult {
    p.rule("SimpleExpr", |p| {
        simple_expr_start(p)?;
        p.many0(|p| simple_expr_part(p, nl))?;
        p.opt(|p| method_value(p, nl))
    })
}

fn simple_expr_start(p: &mut Parser) -> PResult {
    alt!(
        p,
        new_expr(p),
        block_expr(p),
        literal(p),
        stable_id(p),
        underscore(p),
        paren_expr(p),
    )
}

fn new_expr(p: &mut Parser) -> PResult {
    kw(p, "new")?;
    items::new_template(p)
}

fn paren_expr(p: &mut Parser) -> PResult {
    tok(p, "(")?;
    p.opt(|p| p.sep1(|p| expr(p, Insensitive), comma))?;
    tok(p, ")")
}

fn simple_expr_part(p: &mut Parser, nl: Newlines) -> PResult {
    alt!(p, select_part(p), type_args(p), args_part(p, nl))
}

fn select_part(p: &mut Parser) -> PResult {
    tok(p, ".")?;
    id(p)
}

/// An argument list may not start on a new line in a sensitive context;
/// `f` and `(x)` on separate lines are two statements.
fn args_part(p: &mut Parser, nl: Newlines) -> PResult {
    maybe_not_newline(p, nl)?;
    argument_exprs(p)
}

/// A trailing `_` turns the preceding call chain into a method value.
fn method_value(p: &mut Parser, nl: Newlines) -> PResult {
    maybe_not_newline(p, nl)?;
    underscore(p)
}

/// `'(' [Exprs] ')'` or a block argument.
pub(crate) fn argument_exprs(p: &mut Parser) -> PResult {
    alt!(p, paren_args(p), block_expr(p))
}

/// `'(' [Exprs] ')'` — the parenthesized argument-list form alone.
pub(crate) fn paren_args(p: &mut Parser) -> PResult {
    tok(p, "(")?;
    p.opt(|p| p.sep1(|p| expr(p, Insensitive), comma))?;
    tok(p, ")")
}

/// `'{' (CaseClauses | Block) '}'`. Braces switch the grammar into the
/// newline-sensitive family.
pub(crate) fn block_expr(p: &mut Parser) -> PResult {
    tok(p, "{")?;
    alt!(p, case_clauses(p), block(p))?;
    tok(p, "}")
}

/// The interior of a brace block: statements separated by semicolons or
/// newlines, ending just before `}` or `case`.
pub(crate) fn block(p: &mut Parser) -> PResult {
    p.rule("Block", |p| {
        opt_semis(p)?;
        p.opt(|p| p.sep1(block_stat, semis))?;
        block_end(p)
    })
}

fn block_stat(p: &mut Parser) -> PResult {
    alt!(p, items::import_clause(p), block_def_stat(p), expr_stat(p))
}

fn block_def_stat(p: &mut Parser) -> PResult {
    p.many0(annotation)?;
    p.many0(items::modifier)?;
    items::definition(p)
}

fn expr_stat(p: &mut Parser) -> PResult {
    expr(p, Sensitive)
}

fn block_end(p: &mut Parser) -> PResult {
    opt_semis(p)?;
    p.peek(block_terminator)
}

fn block_terminator(p: &mut Parser) -> PResult {
    alt!(p, rbrace_ahead(p), kw(p, "case"))
}

fn rbrace_ahead(p: &mut Parser) -> PResult {
    crate::chars::wl(p)?;
    p.ch('}')
}

/// `CaseClause+`, with any trailing separators.
pub(crate) fn case_clauses(p: &mut Parser) -> PResult {
    p.many1(case_clause)?;
    opt_semis(p)
}

/// `'case' Pattern [Guard] '=>' Block`.
fn case_clause(p: &mut Parser) -> PResult {
    kw(p, "case")?;
    pattern(p)?;
    p.opt(|p| guard(p, Sensitive))?;
    rarrow(p)?;
    block(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalar_util::Source;

    fn accepts_in(input: &str, nl: Newlines) -> bool {
        let src = Source::new(input);
        let mut p = Parser::new(&src);
        expr(&mut p, nl).is_ok() && p.at_end()
    }

    fn accepts(input: &str) -> bool {
        accepts_in(input, Insensitive)
    }

    #[test]
    fn test_atoms() {
        assert!(accepts("42"));
        assert!(accepts("x"));
        assert!(accepts("a.b.c"));
        assert!(accepts("this"));
        assert!(accepts("\"text\""));
        assert!(accepts("_"));
        assert!(accepts("()"));
        assert!(accepts("(1, 2)"));
    }

    #[test]
    fn test_prefix_operators() {
        assert!(accepts("-x"));
        assert!(accepts("!done"));
        assert!(accepts("~bits"));
        assert!(accepts("+n"));
    }

    #[test]
    fn test_infix_chains() {
        assert!(accepts("1 + 2 * 3"));
        assert!(accepts("a :: b :: Nil"));
        assert!(accepts("x == y && y != z"));
        assert!(accepts("xs map f filter g"));
        assert!(accepts("a max[Int] b"));
    }

    #[test]
    fn test_postfix_operator() {
        assert!(accepts("xs size"));
    }

    #[test]
    fn test_calls_and_selections() {
        assert!(accepts("f(x, y)"));
        assert!(accepts("f(x)(y)"));
        assert!(accepts("a.b(c).d"));
        assert!(accepts("xs.map(f)"));
        assert!(accepts("pair[Int, String](1, \"a\")"));
        assert!(accepts("xs.foldLeft(0) { (a, b) => a + b }"));
    }

    #[test]
    fn test_method_values() {
        assert!(accepts("f _"));
        assert!(accepts("xs.map(g(_))"));
    }

    #[test]
    fn test_lambdas() {
        assert!(accepts("x => x + 1"));
        assert!(accepts("(x: Int, y: Int) => x * y"));
        assert!(accepts("_ => 0"));
        assert!(accepts("implicit ctx => run(ctx)"));
        assert!(accepts("x => y => x + y"));
    }

    #[test]
    fn test_if_while_do() {
        assert!(accepts("if (a) b else c"));
        assert!(accepts("if (a) b"));
        assert!(accepts("while (p) step()"));
        assert!(accepts("do step() while (p)"));
    }

    #[test]
    fn test_try_catch_finally() {
        assert!(accepts("try risky()"));
        assert!(accepts("try risky() catch { case e: Err => log(e) }"));
        assert!(accepts("try risky() finally close()"));
    }

    #[test]
    fn test_throw_and_return() {
        assert!(accepts("throw new Boom(\"x\")"));
        assert!(accepts("return"));
        assert!(accepts("return x + 1"));
    }

    #[test]
    fn test_for_comprehensions() {
        assert!(accepts("for (i <- 1 to 10) yield i * i"));
        assert!(accepts("for (i <- xs; if i % 2 == 0) yield i"));
        assert!(accepts("for (i <- xs; j = i + 1) f(j)"));
        assert!(accepts("for { i <- xs ; if i > 0 } yield i"));
        assert!(accepts("for ((k, v) <- pairs) f(k, v)"));
    }

    #[test]
    fn test_match_expressions() {
        assert!(accepts("x match { case 0 => a case _ => b }"));
        assert!(accepts("x match { case n if n > 0 => n }"));
    }

    #[test]
    fn test_assignment() {
        assert!(accepts("x = 5"));
        assert!(accepts("a(i) = v"));
        assert!(accepts("o.field = v"));
        assert!(accepts_in("{ x = 5 }", Sensitive));
    }

    #[test]
    fn test_ascription() {
        assert!(accepts("x: Int"));
        assert!(accepts("f(xs: _*)"));
    }

    #[test]
    fn test_blocks() {
        assert!(accepts("{ val x = 1 ; x + 1 }"));
        assert!(accepts("{ }"));
        assert!(accepts("{ a\nb\nc }"));
    }

    #[test]
    fn test_new_expressions() {
        assert!(accepts("new C"));
        assert!(accepts("new C(1)"));
        assert!(accepts("new A with B"));
        assert!(accepts("new { def f = 1 }"));
        assert!(accepts("new Iterator[Int] { def next() = 0 }"));
    }

    #[test]
    fn test_newline_after_operator_is_swallowed() {
        // Both modes accept a newline between an infix operator and its
        // right operand.
        assert!(accepts("1 + \n 2"));
        assert!(accepts_in("{ 1 + \n 2 }", Sensitive));
    }

    #[test]
    fn test_newline_before_operator_splits_statements() {
        let src = Source::new("1 \n + 2");
        let mut p = Parser::new(&src);
        assert!(expr(&mut p, Sensitive).is_ok());
        // In a sensitive context the expression ends at the line break.
        assert_eq!(p.pos(), 1);

        // In an insensitive context the chain continues across it.
        assert!(accepts("1 \n + 2"));
    }

    #[test]
    fn test_leading_dot_chains_continue() {
        assert!(accepts_in("{ builder\n  .add(1)\n  .build() }", Sensitive));
    }

    #[test]
    fn test_call_on_next_line_splits_in_sensitive_context() {
        let src = Source::new("f\n(x)");
        let mut p = Parser::new(&src);
        assert!(expr(&mut p, Sensitive).is_ok());
        assert_eq!(p.pos(), 1);
        assert!(accepts("f\n(x)"));
    }
}
