//! Token-level helpers over `cssparser`.

use cssparser::{ParseError, ParseErrorKind, Parser, ParserInput, Token};

use crate::foundation::error::{SpriteError, SpriteResult};

/// Parse error carrying a [`SpriteError`] for value-level failures.
pub(crate) type CssError<'i> = ParseError<'i, SpriteError>;

/// Run `parse` over the whole of `text`. Leftover tokens are an error.
///
/// `what` names the expected value in messages for tokenizer-level failures.
pub(crate) fn parse_all<'i, T>(
    text: &'i str,
    what: &str,
    parse: impl FnOnce(&mut Parser<'i, '_>) -> Result<T, CssError<'i>>,
) -> SpriteResult<T> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    parser.parse_entirely(parse).map_err(|e| match e.kind {
        ParseErrorKind::Custom(err) => err,
        ParseErrorKind::Basic(kind) => SpriteError::style(format!(
            "expected {what}, got '{}' ({kind:?} at column {})",
            text.trim(),
            e.location.column
        )),
    })
}

/// A numeric token.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Numeric {
    /// Bare number.
    Number(f64),
    /// Percentage in percent (`25%` is `25.0`).
    Percentage(f64),
    /// Number with a lowercased unit.
    Dimension(f64, String),
}

impl Numeric {
    fn value(&self) -> f64 {
        match self {
            Self::Number(v) | Self::Percentage(v) | Self::Dimension(v, _) => *v,
        }
    }
}

/// Consume one numeric token.
///
/// Values are re-read from the source text: the tokenizer stores `f32`, which is too coarse
/// for serialized matrices.
pub(crate) fn numeric<'i>(p: &mut Parser<'i, '_>) -> Result<Numeric, CssError<'i>> {
    p.skip_whitespace();
    let start = p.position();
    let location = p.current_source_location();
    let token = p.next()?.clone();
    let text = p.slice_from(start);
    let parsed = match token {
        Token::Number { value, .. } => Numeric::Number(exact(text, value)),
        Token::Percentage { unit_value, .. } => Numeric::Percentage(exact(
            text.strip_suffix('%').unwrap_or(text),
            unit_value * 100.0,
        )),
        Token::Dimension {
            value, ref unit, ..
        } => {
            let digits = text
                .len()
                .checked_sub(unit.len())
                .and_then(|n| text.get(..n))
                .unwrap_or("");
            Numeric::Dimension(exact(digits, value), unit.to_ascii_lowercase())
        }
        other => return Err(location.new_unexpected_token_error(other)),
    };
    if !parsed.value().is_finite() {
        return Err(location.new_custom_error(SpriteError::style(format!(
            "number must be finite, got '{text}'"
        ))));
    }
    Ok(parsed)
}

fn exact(digits: &str, fallback: f32) -> f64 {
    digits.parse().unwrap_or(f64::from(fallback))
}

#[cfg(test)]
#[path = "../../tests/unit/css/syntax.rs"]
mod tests;
