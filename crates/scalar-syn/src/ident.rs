//! Identifiers, keywords, and qualified names.
//!
//! Identifier shapes: a plain identifier (letter start, then letters,
//! digits and underscores, with an optional underscore-joined operator
//! tail), an operator identifier (a run of operator characters), or a
//! backquoted identifier. A shape that spells a reserved word or reserved
//! operator is not an `Id`.
//!
//! Keyword tokens are atomic and anchored: `classX` never matches the
//! keyword `class`, and `==` never matches the reserved operator `=`.

use scalar_peg::{alt, PResult, Parser, Reject};

use crate::chars::{is_op_char, wl};

pub(crate) fn is_id_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

pub(crate) fn is_id_part(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

/// The reserved words of the recognized language.
pub(crate) fn is_reserved_word(s: &str) -> bool {
    matches!(
        s,
        "abstract"
            | "case"
            | "catch"
            | "class"
            | "def"
            | "do"
            | "else"
            | "extends"
            | "false"
            | "final"
            | "finally"
            | "for"
            | "forSome"
            | "if"
            | "implicit"
            | "import"
            | "lazy"
            | "macro"
            | "match"
            | "new"
            | "null"
            | "object"
            | "override"
            | "package"
            | "private"
            | "protected"
            | "return"
            | "sealed"
            | "super"
            | "this"
            | "throw"
            | "trait"
            | "true"
            | "try"
            | "type"
            | "val"
            | "var"
            | "while"
            | "with"
            | "yield"
            | "_"
    )
}

/// The reserved operators, including the Unicode arrow aliases.
pub(crate) fn is_reserved_op(s: &str) -> bool {
    matches!(
        s,
        "=" | "=>" | "<-" | "<:" | ">:" | "<%" | "#" | "@" | ":" | "⇒" | "←"
    )
}

/// True if an operator would continue at the cursor: an operator
/// character that does not open a comment.
pub(crate) fn op_continues(p: &mut Parser) -> PResult {
    match p.current() {
        Some('/') if matches!(p.lookahead_char(1), Some('/') | Some('*')) => Err(Reject),
        Some(c) if is_op_char(c) => Ok(()),
        _ => Err(Reject),
    }
}

/// Consumes operator characters, stopping before a comment opener.
fn take_op_chars(p: &mut Parser) -> usize {
    let mut count = 0;
    while let Some(c) = p.current() {
        if !is_op_char(c) {
            break;
        }
        if c == '/' && matches!(p.lookahead_char(1), Some('/') | Some('*')) {
            break;
        }
        p.advance(1);
        count += 1;
    }
    count
}

/// A plain identifier, without the leading skip or reserved-word check.
fn plain_id_raw(p: &mut Parser) -> PResult {
    let first = p.current();
    p.class(is_id_start, "letter")?;
    // An underscore may switch into an operator tail, which ends the
    // identifier: `x_+`, `_+`.
    if first == Some('_') && p.current().is_some_and(is_op_char) {
        take_op_chars(p);
        return Ok(());
    }
    loop {
        match p.current() {
            Some('_') if p.lookahead_char(1).is_some_and(is_op_char) => {
                p.advance(1);
                take_op_chars(p);
                return Ok(());
            }
            Some(c) if is_id_part(c) => p.advance(1),
            _ => return Ok(()),
        }
    }
}

fn op_id_raw(p: &mut Parser) -> PResult {
    p.class(is_op_char, "operator character")?;
    take_op_chars(p);
    Ok(())
}

fn backtick_id_raw(p: &mut Parser) -> PResult {
    p.ch('`')?;
    if p.take_while(|c| c != '`' && c != '\n') == 0 {
        return Err(Reject);
    }
    p.ch('`')
}

fn id_raw(p: &mut Parser) -> PResult {
    let start = p.mark();
    alt!(p, backtick_id_raw(p), plain_id_raw(p), op_id_raw(p))?;
    let text = p.text_from(start);
    // Backquoting lifts the reservation: `type` is a legal identifier.
    if !text.starts_with('`') && (is_reserved_word(&text) || is_reserved_op(&text)) {
        p.reset(start);
        return Err(Reject);
    }
    Ok(())
}

/// Any identifier that is not a reserved word.
pub(crate) fn id(p: &mut Parser) -> PResult {
    wl(p)?;
    p.atomic("Id", id_raw)
}

fn var_id_raw(p: &mut Parser) -> PResult {
    let start = p.mark();
    match p.current() {
        Some(c) if c.is_lowercase() => {}
        _ => return Err(Reject),
    }
    plain_id_raw(p)?;
    if is_reserved_word(&p.text_from(start)) {
        p.reset(start);
        return Err(Reject);
    }
    Ok(())
}

/// An identifier whose first letter is lowercase. Patterns treat these as
/// binders.
pub(crate) fn var_id(p: &mut Parser) -> PResult {
    wl(p)?;
    p.atomic("VarId", var_id_raw)
}

/// An alphabetic keyword: the word itself, not followed by an identifier
/// character.
pub(crate) fn kw(p: &mut Parser, word: &'static str) -> PResult {
    wl(p)?;
    p.atomic(word, |p| {
        p.lit(word)?;
        p.not_ahead(|p| p.class(is_id_part, "identifier character"))
    })
}

/// A reserved operator: the symbol itself, not followed by another
/// operator character.
pub(crate) fn op_tok(p: &mut Parser, op: &'static str) -> PResult {
    wl(p)?;
    p.atomic(op, |p| {
        p.lit(op)?;
        p.not_ahead(op_continues)
    })
}

/// The wildcard token `_`, distinct from identifiers starting with an
/// underscore. An operator may follow (`_*` is two tokens).
pub(crate) fn underscore(p: &mut Parser) -> PResult {
    wl(p)?;
    p.atomic("_", |p| {
        p.lit("_")?;
        p.not_ahead(|p| p.class(is_id_part, "identifier character"))
    })
}

/// `=>`, in either spelling.
pub(crate) fn rarrow(p: &mut Parser) -> PResult {
    wl(p)?;
    p.atomic("=>", |p| {
        alt!(p, p.lit("=>"), p.lit("⇒"))?;
        p.not_ahead(op_continues)
    })
}

/// `<-`, in either spelling.
pub(crate) fn larrow(p: &mut Parser) -> PResult {
    wl(p)?;
    p.atomic("<-", |p| {
        alt!(p, p.lit("<-"), p.lit("←"))?;
        p.not_ahead(op_continues)
    })
}

/// `id { . id }` — dotted qualified name.
pub(crate) fn qual_id(p: &mut Parser) -> PResult {
    id(p)?;
    p.many0(|p| {
        crate::chars::tok(p, ".")?;
        id(p)
    })
}

fn class_qualifier(p: &mut Parser) -> PResult {
    crate::chars::tok(p, "[")?;
    id(p)?;
    crate::chars::tok(p, "]")
}

fn this_or_super(p: &mut Parser) -> PResult {
    alt!(p, kw(p, "this"), super_ref(p))
}

fn super_ref(p: &mut Parser) -> PResult {
    kw(p, "super")?;
    p.opt(class_qualifier)
}

fn qualified_this_super(p: &mut Parser) -> PResult {
    p.opt(|p| {
        id(p)?;
        crate::chars::tok(p, ".")
    })?;
    this_or_super(p)?;
    p.many0(|p| {
        crate::chars::tok(p, ".")?;
        id(p)
    })
}

/// A stable path: `a.b.C`, `this.x`, `a.super[B].f`, or a bare `this`.
pub(crate) fn stable_id(p: &mut Parser) -> PResult {
    alt!(p, qualified_this_super(p), qual_id(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalar_util::Source;

    fn accepts<F: FnMut(&mut Parser) -> PResult>(input: &str, mut f: F) -> bool {
        let src = Source::new(input);
        let mut p = Parser::new(&src);
        f(&mut p).is_ok() && p.at_end()
    }

    fn consumed<F: FnMut(&mut Parser) -> PResult>(input: &str, mut f: F) -> Option<usize> {
        let src = Source::new(input);
        let mut p = Parser::new(&src);
        f(&mut p).ok().map(|()| p.pos())
    }

    #[test]
    fn test_plain_ids() {
        assert!(accepts("foo", id));
        assert!(accepts("Foo_bar1", id));
        assert!(accepts("x$y", id));
        assert!(accepts("__init", id));
        assert!(accepts("αβ", id));
    }

    #[test]
    fn test_operator_tail() {
        assert!(accepts("x_+", id));
        assert!(accepts("unary_-", id));
        assert!(accepts("_+", id));
    }

    #[test]
    fn test_operator_ids() {
        assert!(accepts("+", id));
        assert!(accepts("::", id));
        assert!(accepts("<=", id));
        assert!(accepts("|", id));
    }

    #[test]
    fn test_backtick_ids() {
        assert!(accepts("`type`", id));
        assert!(accepts("`a b`", id));
        assert!(!accepts("``", id));
    }

    #[test]
    fn test_reserved_words_are_not_ids() {
        for word in ["class", "forSome", "yield", "val", "_", "true"] {
            assert!(!accepts(word, id), "{word} must not parse as Id");
        }
    }

    #[test]
    fn test_reserved_word_prefix_is_an_id() {
        assert!(accepts("classX", id));
        assert!(accepts("valued", id));
        assert!(accepts("iffy", id));
    }

    #[test]
    fn test_reserved_ops_are_not_ids() {
        for op in ["=", "=>", "<-", "<:", ">:", "<%", "#", "@", ":"] {
            assert!(!accepts(op, id), "{op} must not parse as Id");
        }
        assert!(accepts("==", id));
        assert!(accepts("<=", id));
        assert!(accepts(":+", id));
    }

    #[test]
    fn test_var_id_requires_lowercase() {
        assert!(accepts("xs", var_id));
        assert!(!accepts("Xs", var_id));
        assert!(!accepts("_x", var_id));
        assert!(!accepts("match", var_id));
    }

    #[test]
    fn test_keyword_anchoring() {
        assert!(accepts("class", |p| kw(p, "class")));
        assert!(!accepts("classX", |p| kw(p, "class")));
        assert_eq!(consumed("class X", |p| kw(p, "class")), Some(5));
    }

    #[test]
    fn test_op_tok_anchoring() {
        assert!(accepts("=", |p| op_tok(p, "=")));
        assert!(!accepts("==", |p| op_tok(p, "=")));
        assert!(!accepts("<:<", |p| op_tok(p, "<:")));
    }

    #[test]
    fn test_op_tok_allows_adjacent_comment() {
        // `=` directly followed by a comment is still the reserved `=`.
        assert_eq!(consumed("=/*c*/1", |p| op_tok(p, "=")), Some(1));
        assert_eq!(consumed("=//c", |p| op_tok(p, "=")), Some(1));
    }

    #[test]
    fn test_underscore_token() {
        assert!(accepts("_", underscore));
        assert!(!accepts("_x", underscore));
        // `_*` is the wildcard token followed by a star.
        assert_eq!(consumed("_*", underscore), Some(1));
    }

    #[test]
    fn test_arrows() {
        assert!(accepts("=>", rarrow));
        assert!(accepts("⇒", rarrow));
        assert!(accepts("<-", larrow));
        assert!(accepts("←", larrow));
    }

    #[test]
    fn test_qual_id() {
        assert!(accepts("a.b.c", qual_id));
        assert_eq!(consumed("a.b.", qual_id), Some(3));
    }

    #[test]
    fn test_stable_id() {
        assert!(accepts("a.b.C", stable_id));
        assert!(accepts("this", stable_id));
        assert!(accepts("C.this.x", stable_id));
        assert!(accepts("super[B].f", stable_id));
        assert!(accepts("a.super.f", stable_id));
    }

    #[test]
    fn test_stable_id_leaves_import_suffix() {
        // `a.b._` is a stable prefix plus a wildcard suffix for imports.
        assert_eq!(consumed("a.b._", stable_id), Some(3));
    }

    #[test]
    fn test_id_skips_leading_gap() {
        assert_eq!(consumed(" /* c */ name", id), Some(13));
    }

    #[test]
    fn test_operator_id_stops_before_comment() {
        assert_eq!(consumed("+//x", id), Some(1));
        assert_eq!(consumed("+/*x*/", id), Some(1));
    }
}
