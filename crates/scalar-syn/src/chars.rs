//! Character classes, comment skipping, and statement separators.
//!
//! Two skip policies cover the gap between tokens: [`ws`] consumes
//! whitespace and comments but never a newline, [`wl`] consumes newlines
//! too. Every token rule starts with a `wl` skip; the newline-sensitive
//! parts of the expression grammar constrain the gap with the lookahead
//! guards [`not_newline`] and [`one_newline_max`] instead of switching
//! skippers.

use scalar_peg::{alt, PResult, Parser};
use unicode_general_category::{get_general_category, GeneralCategory};

/// Space or tab. Newlines are handled separately.
pub(crate) fn is_whitespace_char(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_newline_char(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Operator characters: the printable ASCII operator set plus the Unicode
/// math and other-symbol categories.
pub(crate) fn is_op_char(c: char) -> bool {
    match c {
        '!' | '#' | '$' | '%' | '&' | '*' | '+' | '-' | '/' | ':' | '<' | '=' | '>' | '?'
        | '@' | '\\' | '^' | '|' | '~' => true,
        c if c.is_ascii() => false,
        c => matches!(
            get_general_category(c),
            GeneralCategory::MathSymbol | GeneralCategory::OtherSymbol
        ),
    }
}

/// A single newline: `\n` or `\r\n`.
pub(crate) fn newline(p: &mut Parser) -> PResult {
    p.atomic("newline", |p| alt!(p, p.lit("\r\n"), p.ch('\n')))
}

fn line_comment(p: &mut Parser) -> PResult {
    p.lit("//")?;
    p.take_while(|c| !is_newline_char(c));
    Ok(())
}

/// A block comment, with nesting tracked by a depth counter. An
/// unterminated comment fails expecting its closer.
fn block_comment(p: &mut Parser) -> PResult {
    p.lit("/*")?;
    let mut depth: u32 = 1;
    while depth > 0 {
        match (p.current(), p.lookahead_char(1)) {
            (Some('/'), Some('*')) => {
                p.advance(2);
                depth += 1;
            }
            (Some('*'), Some('/')) => {
                p.advance(2);
                depth -= 1;
            }
            (Some(_), _) => p.advance(1),
            (None, _) => return p.lit("*/"),
        }
    }
    Ok(())
}

fn comment(p: &mut Parser) -> PResult {
    alt!(p, line_comment(p), block_comment(p))
}

/// Skips whitespace and comments. Never crosses a newline: a line comment
/// stops just before its terminator.
pub(crate) fn ws(p: &mut Parser) -> PResult {
    loop {
        p.take_while(is_whitespace_char);
        let mark = p.mark();
        if comment(p).is_err() {
            p.reset(mark);
            break;
        }
    }
    Ok(())
}

/// Skips whitespace, comments, and newlines.
pub(crate) fn wl(p: &mut Parser) -> PResult {
    loop {
        p.take_while(|c| is_whitespace_char(c) || is_newline_char(c));
        let mark = p.mark();
        if comment(p).is_err() {
            p.reset(mark);
            break;
        }
    }
    Ok(())
}

/// A statement separator: an explicit `;` or one inferred newline.
pub(crate) fn semi(p: &mut Parser) -> PResult {
    ws(p)?;
    p.atomic("Semi", |p| alt!(p, p.ch(';'), newline(p)))
}

/// One or more statement separators.
pub(crate) fn semis(p: &mut Parser) -> PResult {
    p.many1(semi)
}

/// Zero or more statement separators.
pub(crate) fn opt_semis(p: &mut Parser) -> PResult {
    p.many0(semi)
}

/// Asserts that the gap up to the next token contains no newline. Pure
/// lookahead; consumes nothing.
pub(crate) fn not_newline(p: &mut Parser) -> PResult {
    p.peek(|p| {
        ws(p)?;
        p.not_ahead(|p| p.class(is_newline_char, "newline"))
    })
}

/// Asserts that the gap up to the next token contains at most one newline
/// and that the next line is not blank. Pure lookahead; consumes nothing.
pub(crate) fn one_newline_max(p: &mut Parser) -> PResult {
    p.peek(|p| {
        ws(p)?;
        p.opt(newline)?;
        ws(p)?;
        p.not_ahead(|p| p.class(is_newline_char, "newline"))
    })
}

/// A punctuation token, preceded by the standard token-gap skip.
pub(crate) fn tok(p: &mut Parser, s: &'static str) -> PResult {
    wl(p)?;
    p.lit(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalar_util::Source;

    fn at_end_after<F: FnMut(&mut Parser) -> PResult>(input: &str, mut f: F) -> bool {
        let src = Source::new(input);
        let mut p = Parser::new(&src);
        f(&mut p).is_ok() && p.at_end()
    }

    #[test]
    fn test_op_char_ascii() {
        for c in "!#$%&*+-/:<=>?@\\^|~".chars() {
            assert!(is_op_char(c), "{c} should be an operator character");
        }
        assert!(!is_op_char('a'));
        assert!(!is_op_char('('));
        assert!(!is_op_char('_'));
        assert!(!is_op_char('9'));
    }

    #[test]
    fn test_op_char_unicode_symbols() {
        assert!(is_op_char('±'));
        assert!(is_op_char('×'));
        assert!(is_op_char('→'));
        assert!(!is_op_char('α'));
    }

    #[test]
    fn test_newline_forms() {
        assert!(at_end_after("\n", newline));
        assert!(at_end_after("\r\n", newline));
        assert!(!at_end_after(" ", newline));
    }

    #[test]
    fn test_ws_skips_spaces_and_comments() {
        assert!(at_end_after("  \t ", ws));
        assert!(at_end_after("/* block */ ", ws));
        assert!(at_end_after(" // to the end", ws));
    }

    #[test]
    fn test_ws_stops_at_newline() {
        let src = Source::new("  \nx");
        let mut p = Parser::new(&src);
        assert!(ws(&mut p).is_ok());
        assert_eq!(p.pos(), 2);
    }

    #[test]
    fn test_wl_crosses_newlines() {
        assert!(at_end_after(" \n // c\n\t", wl));
    }

    #[test]
    fn test_nested_block_comment() {
        assert!(at_end_after("/* outer /* inner */ outer */", ws));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let src = Source::new("/* open /* deep */");
        let mut p = Parser::new(&src);
        assert!(ws(&mut p).is_ok());
        // The comment attempt failed and was rolled back.
        assert_eq!(p.pos(), 0);
        let err = p.error();
        assert_eq!(err.offset, 18);
        assert!(err.expected.iter().any(|e| e == "\"*/\""));
    }

    #[test]
    fn test_semi_forms() {
        assert!(at_end_after(";", semi));
        assert!(at_end_after(" \t;", semi));
        assert!(at_end_after("\n", semi));
        assert!(at_end_after(" // trailing\n", semi));
        assert!(!at_end_after("x", semi));
    }

    #[test]
    fn test_semis_absorb_blank_lines() {
        assert!(at_end_after("\n\n \n;", semis));
    }

    #[test]
    fn test_not_newline() {
        let src = Source::new("  + 2");
        let mut p = Parser::new(&src);
        assert!(not_newline(&mut p).is_ok());
        assert_eq!(p.pos(), 0, "the guard must not consume");

        let src = Source::new(" \n+ 2");
        let mut p = Parser::new(&src);
        assert!(not_newline(&mut p).is_err());
    }

    #[test]
    fn test_one_newline_max() {
        let src = Source::new(" \n  2");
        let mut p = Parser::new(&src);
        assert!(one_newline_max(&mut p).is_ok());
        assert_eq!(p.pos(), 0);

        let src = Source::new(" \n\n 2");
        let mut p = Parser::new(&src);
        assert!(one_newline_max(&mut p).is_err());
    }

    #[test]
    fn test_one_newline_max_comment_line_counts_as_blank() {
        let src = Source::new("\n// note\n2");
        let mut p = Parser::new(&src);
        assert!(one_newline_max(&mut p).is_err());
    }
}
