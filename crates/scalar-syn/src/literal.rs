//! Literal tokens: numbers, characters, strings, booleans, symbols.
//!
//! Each literal form is one atomic token; their interiors never leak into
//! the expected set. An identifier directly adjacent to a string literal
//! is an interpolated string and is recognized as a single token with an
//! opaque interior.

use scalar_peg::{alt, PResult, Parser, Reject};

use crate::chars::wl;
use crate::ident::kw;

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn decimal_digits(p: &mut Parser) -> PResult {
    p.class(is_digit, "digit")?;
    p.take_while(is_digit);
    Ok(())
}

fn hex_number(p: &mut Parser) -> PResult {
    alt!(p, p.lit("0x"), p.lit("0X"))?;
    p.class(is_hex_digit, "hexadecimal digit")?;
    p.take_while(is_hex_digit);
    Ok(())
}

fn integer_raw(p: &mut Parser) -> PResult {
    p.opt(|p| p.ch('-'))?;
    alt!(p, hex_number(p), decimal_digits(p))?;
    p.opt(|p| p.class(|c| c == 'L' || c == 'l', "integer suffix"))?;
    Ok(())
}

fn exponent(p: &mut Parser) -> PResult {
    p.class(|c| c == 'e' || c == 'E', "exponent")?;
    p.opt(|p| p.class(|c| c == '+' || c == '-', "sign"))?;
    decimal_digits(p)
}

fn float_suffix(p: &mut Parser) -> PResult {
    p.class(|c| matches!(c, 'f' | 'F' | 'd' | 'D'), "float suffix")
}

fn fraction_float(p: &mut Parser) -> PResult {
    decimal_digits(p)?;
    p.ch('.')?;
    decimal_digits(p)?;
    p.opt(exponent)?;
    p.opt(float_suffix)
}

fn exponent_float(p: &mut Parser) -> PResult {
    decimal_digits(p)?;
    exponent(p)?;
    p.opt(float_suffix)
}

fn suffix_float(p: &mut Parser) -> PResult {
    decimal_digits(p)?;
    float_suffix(p)
}

fn float_raw(p: &mut Parser) -> PResult {
    p.opt(|p| p.ch('-'))?;
    alt!(p, fraction_float(p), exponent_float(p), suffix_float(p))
}

fn unicode_escape_raw(p: &mut Parser) -> PResult {
    p.ch('u')?;
    p.take_while(|c| c == 'u');
    for _ in 0..4 {
        p.class(is_hex_digit, "hexadecimal digit")?;
    }
    Ok(())
}

/// A backslash escape: a unicode escape or a backslash followed by any
/// character.
fn escape_raw(p: &mut Parser) -> PResult {
    p.ch('\\')?;
    alt!(p, unicode_escape_raw(p), p.any())
}

fn char_literal_raw(p: &mut Parser) -> PResult {
    p.ch('\'')?;
    alt!(
        p,
        escape_raw(p),
        p.class(|c| c != '\'' && c != '\\' && c != '\n' && c != '\r', "character")
    )?;
    p.ch('\'')
}

fn single_quoted_raw(p: &mut Parser) -> PResult {
    p.ch('"')?;
    p.many0(|p| {
        alt!(
            p,
            escape_raw(p),
            p.class(
                |c| c != '"' && c != '\\' && c != '\n' && c != '\r',
                "string character"
            )
        )
    })?;
    p.ch('"')
}

/// A triple-quoted string. The closing delimiter is a `"""` that is not
/// followed by a further quote, so runs of quotes stay inside the literal.
fn triple_quoted_raw(p: &mut Parser) -> PResult {
    p.lit("\"\"\"")?;
    loop {
        if p.current().is_none() {
            return p.lit("\"\"\"");
        }
        if p.current() == Some('"')
            && p.lookahead_char(1) == Some('"')
            && p.lookahead_char(2) == Some('"')
            && p.lookahead_char(3) != Some('"')
        {
            p.advance(3);
            return Ok(());
        }
        p.advance(1);
    }
}

/// An optional interpolation prefix: a plain identifier immediately
/// followed by the opening quote, with no gap.
fn interp_prefix_raw(p: &mut Parser) -> PResult {
    let start = p.mark();
    match p.current() {
        Some(c) if crate::ident::is_id_start(c) => p.advance(1),
        _ => return Err(Reject),
    }
    p.take_while(crate::ident::is_id_part);
    if crate::ident::is_reserved_word(&p.text_from(start)) {
        p.reset(start);
        return Err(Reject);
    }
    p.peek(|p| p.ch('"'))
}

fn string_raw(p: &mut Parser) -> PResult {
    p.opt(interp_prefix_raw)?;
    alt!(p, triple_quoted_raw(p), single_quoted_raw(p))
}

fn symbol_raw(p: &mut Parser) -> PResult {
    p.ch('\'')?;
    p.class(crate::ident::is_id_start, "letter")?;
    p.take_while(crate::ident::is_id_part);
    Ok(())
}

fn integer_literal(p: &mut Parser) -> PResult {
    wl(p)?;
    p.atomic("IntegerLiteral", integer_raw)
}

fn float_literal(p: &mut Parser) -> PResult {
    wl(p)?;
    p.atomic("FloatLiteral", float_raw)
}

fn char_literal(p: &mut Parser) -> PResult {
    wl(p)?;
    p.atomic("CharLiteral", char_literal_raw)
}

pub(crate) fn string_literal(p: &mut Parser) -> PResult {
    wl(p)?;
    p.atomic("StringLiteral", string_raw)
}

fn symbol_literal(p: &mut Parser) -> PResult {
    wl(p)?;
    p.atomic("SymbolLiteral", symbol_raw)
}

/// Any literal token. Floats are tried before integers so that `1.5`
/// does not stop at `1`; character literals before symbols so that `'a'`
/// does not stop at `'a`.
pub(crate) fn literal(p: &mut Parser) -> PResult {
    alt!(
        p,
        float_literal(p),
        integer_literal(p),
        kw(p, "true"),
        kw(p, "false"),
        kw(p, "null"),
        char_literal(p),
        string_literal(p),
        symbol_literal(p),
    )
}
