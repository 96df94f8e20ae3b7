use cssparser::Parser;

use crate::css::property::Position;
use crate::css::syntax::{CssError, Numeric, numeric, parse_all};
use crate::css::transform::TransformList;
use crate::css::value::{
    Declaration, parse_border_shorthand_width, parse_edges, parse_px, parse_px_or_auto,
};
use crate::foundation::core::{Affine, Edges, Size, Vec2};
use crate::foundation::error::{SpriteError, SpriteResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum OriginComponent {
    Px(f64),
    Percent(f64),
}

impl OriginComponent {
    fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => extent * p / 100.0,
        }
    }
}

/// Cascaded inline style of one element. `None` lengths are `auto`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ResolvedStyle {
    pub(crate) position: Position,
    pub(crate) top: Option<f64>,
    pub(crate) left: Option<f64>,
    pub(crate) width: Option<f64>,
    pub(crate) height: Option<f64>,
    pub(crate) margin: Edges,
    pub(crate) border: Edges,
    pub(crate) padding: Edges,
    pub(crate) transform: Option<Affine>,
    pub(crate) origin: (OriginComponent, OriginComponent),
    pub(crate) scroll_x: bool,
    pub(crate) scroll_y: bool,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            position: Position::Static,
            top: None,
            left: None,
            width: None,
            height: None,
            margin: Edges::default(),
            border: Edges::default(),
            padding: Edges::default(),
            transform: None,
            origin: (
                OriginComponent::Percent(50.0),
                OriginComponent::Percent(50.0),
            ),
            scroll_x: false,
            scroll_y: false,
        }
    }
}

impl ResolvedStyle {
    pub(crate) fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    pub(crate) fn is_scroll_container(&self) -> bool {
        self.scroll_x || self.scroll_y
    }

    /// Transform origin relative to the border-box corner, for a border box of `size`.
    pub(crate) fn transform_origin(&self, size: Size) -> Vec2 {
        Vec2::new(
            self.origin.0.resolve(size.width),
            self.origin.1.resolve(size.height),
        )
    }

    /// Padding + border on the horizontal axis.
    pub(crate) fn frame_horizontal(&self) -> f64 {
        self.padding.horizontal() + self.border.horizontal()
    }

    /// Padding + border on the vertical axis.
    pub(crate) fn frame_vertical(&self) -> f64 {
        self.padding.vertical() + self.border.vertical()
    }
}

/// Apply declarations in order. Invalid values are dropped, as CSS does.
pub(crate) fn resolve_style(decls: &[Declaration]) -> ResolvedStyle {
    let mut style = ResolvedStyle::default();
    for d in decls {
        if let Err(e) = apply_declaration(&mut style, &d.name, &d.value) {
            tracing::debug!(
                property = %d.name,
                value = %d.value,
                error = %e,
                "ignoring declaration"
            );
        }
    }
    style
}

fn non_negative(v: f64, what: &str) -> SpriteResult<f64> {
    if v < 0.0 {
        return Err(SpriteError::style(format!("{what} must be non-negative")));
    }
    Ok(v)
}

fn size_value(value: &str, what: &str) -> SpriteResult<Option<f64>> {
    parse_px_or_auto(value)?
        .map(|v| non_negative(v, what))
        .transpose()
}

fn margin_value(value: &str) -> SpriteResult<f64> {
    Ok(parse_px_or_auto(value)?.unwrap_or(0.0))
}

fn padding_edges(value: &str) -> SpriteResult<Edges> {
    let e = parse_edges(value)?;
    for v in [e.top, e.right, e.bottom, e.left] {
        non_negative(v, "padding")?;
    }
    Ok(e)
}

fn scrolls(value: &str) -> SpriteResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "scroll" | "auto" | "hidden" => Ok(true),
        "visible" | "clip" => Ok(false),
        other => Err(SpriteError::style(format!("unknown overflow '{other}'"))),
    }
}

fn apply_declaration(s: &mut ResolvedStyle, name: &str, value: &str) -> SpriteResult<()> {
    match name {
        "position" => s.position = Position::parse(value)?,
        "top" => s.top = parse_px_or_auto(value)?,
        "left" => s.left = parse_px_or_auto(value)?,
        "width" => s.width = size_value(value, "width")?,
        "height" => s.height = size_value(value, "height")?,

        "margin" => s.margin = parse_edges(value)?,
        "margin-top" => s.margin.top = margin_value(value)?,
        "margin-right" => s.margin.right = margin_value(value)?,
        "margin-bottom" => s.margin.bottom = margin_value(value)?,
        "margin-left" => s.margin.left = margin_value(value)?,

        "padding" => s.padding = padding_edges(value)?,
        "padding-top" => s.padding.top = non_negative(parse_px(value)?, "padding")?,
        "padding-right" => s.padding.right = non_negative(parse_px(value)?, "padding")?,
        "padding-bottom" => s.padding.bottom = non_negative(parse_px(value)?, "padding")?,
        "padding-left" => s.padding.left = non_negative(parse_px(value)?, "padding")?,

        "border" => s.border = Edges::uniform(parse_border_shorthand_width(value)?),
        "border-width" => s.border = parse_edges(value)?,
        "border-top-width" => s.border.top = non_negative(parse_px(value)?, "border")?,
        "border-right-width" => s.border.right = non_negative(parse_px(value)?, "border")?,
        "border-bottom-width" => s.border.bottom = non_negative(parse_px(value)?, "border")?,
        "border-left-width" => s.border.left = non_negative(parse_px(value)?, "border")?,

        "transform" => {
            let list = TransformList::parse(value)?;
            s.transform = (!list.is_none()).then(|| list.to_affine());
        }
        "transform-origin" => s.origin = parse_origin(value)?,

        "overflow" => {
            let v = scrolls(value)?;
            s.scroll_x = v;
            s.scroll_y = v;
        }
        "overflow-x" => s.scroll_x = scrolls(value)?,
        "overflow-y" => s.scroll_y = scrolls(value)?,

        _ => {}
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OriginAxis {
    Horizontal,
    Vertical,
    Either,
}

fn origin_component<'i>(
    p: &mut Parser<'i, '_>,
) -> Result<(OriginComponent, OriginAxis), CssError<'i>> {
    if let Ok(keyword) = p.try_parse(|p| p.expect_ident_cloned()) {
        let component = match keyword.to_ascii_lowercase().as_str() {
            "left" => (OriginComponent::Percent(0.0), OriginAxis::Horizontal),
            "right" => (OriginComponent::Percent(100.0), OriginAxis::Horizontal),
            "top" => (OriginComponent::Percent(0.0), OriginAxis::Vertical),
            "bottom" => (OriginComponent::Percent(100.0), OriginAxis::Vertical),
            "center" => (OriginComponent::Percent(50.0), OriginAxis::Either),
            other => {
                return Err(p.new_custom_error(SpriteError::style(format!(
                    "unknown transform-origin keyword '{other}'"
                ))));
            }
        };
        return Ok(component);
    }
    let location = p.current_source_location();
    match numeric(p)? {
        Numeric::Percentage(v) => Ok((OriginComponent::Percent(v), OriginAxis::Either)),
        Numeric::Number(v) => Ok((OriginComponent::Px(v), OriginAxis::Either)),
        Numeric::Dimension(v, unit) if unit == "px" => {
            Ok((OriginComponent::Px(v), OriginAxis::Either))
        }
        other => Err(location.new_custom_error(SpriteError::style(format!(
            "invalid transform-origin component {other:?}"
        )))),
    }
}

fn parse_origin(value: &str) -> SpriteResult<(OriginComponent, OriginComponent)> {
    let parts = parse_all(value, "a transform-origin", |p| {
        let mut parts = Vec::new();
        while !p.is_exhausted() {
            parts.push(origin_component(p)?);
        }
        Ok(parts)
    })?;
    let center = OriginComponent::Percent(50.0);
    match parts.as_slice() {
        [(one, OriginAxis::Vertical)] => Ok((center, *one)),
        [(one, _)] => Ok((*one, center)),
        // The optional third (z) component does not affect 2D painting.
        [(a, a_axis), (b, b_axis)] | [(a, a_axis), (b, b_axis), _] => {
            if *a_axis == OriginAxis::Vertical || *b_axis == OriginAxis::Horizontal {
                Ok((*b, *a))
            } else {
                Ok((*a, *b))
            }
        }
        _ => Err(SpriteError::style(format!(
            "transform-origin takes 1 to 3 values, got '{}'",
            value.trim()
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/style.rs"]
mod tests;
