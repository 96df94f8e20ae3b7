//! Scalar CSS value helpers: pixel lengths, edge shorthands and declaration lists.

use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, DeclarationParser, ParseError, Parser,
    ParserInput, ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use smallvec::SmallVec;

use crate::css::syntax::{CssError, Numeric, numeric, parse_all};
use crate::foundation::core::Edges;
use crate::foundation::error::{SpriteError, SpriteResult};

/// A single `name: value` pair from a style attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub name: String,
    /// Trimmed value text.
    pub value: String,
}

/// Parse a pixel length. Unitless numbers are accepted as pixels.
pub fn parse_px(s: &str) -> SpriteResult<f64> {
    parse_all(s, "a px length", px_length)
}

/// Parse a length that may be `auto`. `Ok(None)` means `auto`.
pub fn parse_px_or_auto(s: &str) -> SpriteResult<Option<f64>> {
    parse_all(s, "a px length or auto", px_or_auto)
}

fn px_length<'i>(p: &mut Parser<'i, '_>) -> Result<f64, CssError<'i>> {
    let location = p.current_source_location();
    match numeric(p)? {
        Numeric::Number(v) => Ok(v),
        Numeric::Dimension(v, unit) if unit == "px" => Ok(v),
        other => Err(location.new_custom_error(SpriteError::style(format!(
            "expected a px length, got {other:?}"
        )))),
    }
}

fn px_or_auto<'i>(p: &mut Parser<'i, '_>) -> Result<Option<f64>, CssError<'i>> {
    if p.try_parse(|p| p.expect_ident_matching("auto")).is_ok() {
        return Ok(None);
    }
    px_length(p).map(Some)
}

/// Format a number the way computed style serializes it (`-0` folds to `0`).
pub fn format_number(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v}")
}

/// Format a pixel length, e.g. `12.5px`.
pub fn format_px(v: f64) -> String {
    format!("{}px", format_number(v))
}

/// Expand a 1-4 value edge shorthand (`margin`, `padding`, `border-width`).
///
/// `auto` components resolve to zero.
pub fn parse_edges(s: &str) -> SpriteResult<Edges> {
    let parts = parse_all(s, "an edge shorthand", |p| {
        let mut parts = SmallVec::<[f64; 4]>::new();
        while !p.is_exhausted() {
            parts.push(px_or_auto(p)?.unwrap_or(0.0));
        }
        Ok(parts)
    })?;
    match parts.as_slice() {
        [a] => Ok(Edges::uniform(*a)),
        [v, h] => Ok(Edges {
            top: *v,
            right: *h,
            bottom: *v,
            left: *h,
        }),
        [t, h, b] => Ok(Edges {
            top: *t,
            right: *h,
            bottom: *b,
            left: *h,
        }),
        [t, r, b, l] => Ok(Edges {
            top: *t,
            right: *r,
            bottom: *b,
            left: *l,
        }),
        _ => Err(SpriteError::style(format!(
            "edge shorthand takes 1 to 4 values, got '{}'",
            s.trim()
        ))),
    }
}

/// Width component of a `border` shorthand (`2px solid blue`). Missing width is zero.
pub fn parse_border_shorthand_width(s: &str) -> SpriteResult<f64> {
    parse_all(s, "a border shorthand", |p| {
        let mut width = None;
        while !p.is_exhausted() {
            if let Ok(v) = p.try_parse(px_length) {
                width = width.or(Some(v));
                continue;
            }
            // Colors, styles and functions such as `rgb(...)` are skipped whole.
            if let Token::Ident(keyword) = p.next()? {
                width = width.or(border_keyword(keyword));
            }
        }
        Ok(width.unwrap_or(0.0))
    })
}

fn border_keyword(keyword: &str) -> Option<f64> {
    match keyword.to_ascii_lowercase().as_str() {
        "thin" => Some(1.0),
        "medium" => Some(3.0),
        "thick" => Some(5.0),
        "none" | "hidden" => Some(0.0),
        _ => None,
    }
}

/// Collects `name: value` pairs from a style attribute body. Rules are not allowed.
struct DeclarationListParser;

impl<'i> DeclarationParser<'i> for DeclarationListParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _declaration_start: &ParserState,
    ) -> Result<Declaration, ParseError<'i, ()>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let value = input.slice_from(start).trim();
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok(Declaration {
            name: name.to_ascii_lowercase(),
            value: value.to_string(),
        })
    }
}

impl<'i> AtRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<(), ParseError<'i, ()>> {
        Err(input.new_error(BasicParseErrorKind::AtRuleInvalid(name)))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: (),
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Declaration, ParseError<'i, ()>> {
        Err(input.new_error(BasicParseErrorKind::AtRuleBodyInvalid))
    }

    fn rule_without_block(
        &mut self,
        _prelude: (),
        _start: &ParserState,
    ) -> Result<Declaration, ()> {
        Err(())
    }
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();

    fn parse_prelude<'t>(&mut self, input: &mut Parser<'i, 't>) -> Result<(), ParseError<'i, ()>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: (),
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Declaration, ParseError<'i, ()>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Split style attribute text into declarations, in source order.
///
/// Entries without a `:` or with an empty name or value are skipped. Semicolons inside
/// strings, `url(...)` and other blocks do not end a declaration.
pub fn parse_declarations(css_text: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(css_text);
    let mut parser = Parser::new(&mut input);
    let mut list = DeclarationListParser;
    RuleBodyParser::new(&mut parser, &mut list)
        .filter_map(|item| match item {
            Ok(decl) => Some(decl),
            Err((_, skipped)) => {
                tracing::trace!(skipped, "dropping malformed declaration");
                None
            }
        })
        .collect()
}

/// Serialize declarations as style attribute text (`a: 1px; b: 2px;`).
pub fn serialize_declarations(decls: &[Declaration]) -> String {
    decls
        .iter()
        .map(|d| format!("{}: {};", d.name, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/css/value.rs"]
mod tests;
