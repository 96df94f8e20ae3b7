//! Geometry-preserving switch to absolute positioning.
//!
//! Coordinate spaces:
//!
//! - **viewport**: what `bounding_client_rect` reports; every transform and scroll applied.
//! - **border-box relative**: a box's own untransformed layout space, origin at its
//!   border-box top-left corner.
//! - **local**: the containing block's content space in which `top`/`left` are
//!   interpreted. Origin at its padding-box corner, after its own scroll offset.
//!
//! All conversions between them live in this module.

use crate::css::property::{Position, StyleProperty};
use crate::css::value::format_px;
use crate::engine::transform::read_transform;
use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::host::{LayoutHost, ensure_attached};

const EPS: f64 = 1e-9;

/// Affine map from a containing block's local space to viewport space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalFrame {
    to_viewport: Affine,
}

impl LocalFrame {
    /// The initial containing block: local space is viewport space.
    pub const VIEWPORT: Self = Self {
        to_viewport: Affine::IDENTITY,
    };

    /// Wrap a local-to-viewport map.
    pub fn new(to_viewport: Affine) -> Self {
        Self { to_viewport }
    }

    /// Local-to-viewport map.
    pub fn to_viewport(&self) -> Affine {
        self.to_viewport
    }

    /// Linear part of the map (translation dropped).
    pub fn linear(&self) -> Affine {
        linear_part(self.to_viewport)
    }
}

fn linear_part(m: Affine) -> Affine {
    let [a, b, c, d, _, _] = m.as_coeffs();
    Affine::new([a, b, c, d, 0.0, 0.0])
}

/// Map a viewport point into the containing block's local space.
pub fn to_local_space(point: Point, frame: &LocalFrame) -> SpriteResult<Point> {
    let m = frame.to_viewport;
    if !m.is_finite() || m.determinant().abs() <= EPS {
        return Err(SpriteError::unsupported_transform(
            "containing block transform is not invertible",
        ));
    }
    Ok(m.inverse() * point)
}

/// Map a viewport rectangle into local space. Rotated frames yield the axis-aligned bounds.
pub fn rect_to_local_space(rect: Rect, frame: &LocalFrame) -> SpriteResult<Rect> {
    // Fails exactly when `to_local_space` would.
    to_local_space(rect.origin(), frame)?;
    Ok(frame.to_viewport.inverse().transform_rect_bbox(rect))
}

/// `m` applied about `origin` (border-box relative), as CSS `transform-origin` does.
pub fn transform_about_origin(m: Affine, origin: Vec2) -> Affine {
    Affine::translate(origin) * m * Affine::translate(-origin)
}

/// Build the local frame of a containing block (`None` = initial containing block).
///
/// Uses the host's exact border-box map when it has one. Otherwise ancestors above the
/// containing block are recovered as an axis-aligned scale from the ratio of its rendered
/// size to its own transformed size, and the containing block's own transform is inverted
/// exactly.
pub fn containing_block_frame<H: LayoutHost>(
    host: &mut H,
    containing_block: Option<H::Node>,
) -> SpriteResult<LocalFrame> {
    block_frame(host, containing_block, None)
}

/// Rendered and untransformed geometry of a box laid out inside the containing block.
///
/// Its rendered-to-painted ratio carries the same ancestor scale, which stands in on axes
/// where the containing block itself has no extent.
#[derive(Clone, Copy, Debug)]
struct Occupant {
    rendered: Rect,
    own_rel: Affine,
    border_box: Rect,
}

fn block_frame<H: LayoutHost>(
    host: &mut H,
    containing_block: Option<H::Node>,
    occupant: Option<Occupant>,
) -> SpriteResult<LocalFrame> {
    let Some(cb) = containing_block else {
        return Ok(LocalFrame::VIEWPORT);
    };
    ensure_attached(host, cb)?;
    let style = host.computed_style(cb)?;
    let scroll = host.scroll_offset(cb)?;
    let local_to_border = Affine::translate(style.border.top_left() - scroll);

    if let Some(border_to_viewport) = host.border_box_to_viewport(cb)? {
        return Ok(LocalFrame::new(border_to_viewport * local_to_border));
    }

    let rendered = host.bounding_client_rect(cb)?;
    let own = read_transform(host, cb)?;
    let own_rel = transform_about_origin(own.compensation_matrix(), style.transform_origin);
    let painted = own_rel.transform_rect_bbox(Rect::new(
        0.0,
        0.0,
        style.border_box_width(),
        style.border_box_height(),
    ));

    let (mut sx, mut sy) = axis_ratios(rendered, painted);
    if let Some(o) = occupant {
        let chain = linear_part(own_rel) * o.own_rel;
        let (ox, oy) = axis_ratios(o.rendered, chain.transform_rect_bbox(o.border_box));
        sx = sx.or(ox);
        sy = sy.or(oy);
    }
    let (sx, sy) = match (sx, sy) {
        (Some(x), Some(y)) => (x, y),
        (Some(x), None) => (x, x),
        (None, Some(y)) => (y, y),
        (None, None) => (1.0, 1.0),
    };
    tracing::trace!(?cb, sx, sy, "inferred ancestor scale");

    let border_to_viewport = Affine::translate(rendered.origin().to_vec2())
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate(-painted.origin().to_vec2())
        * own_rel;
    Ok(LocalFrame::new(border_to_viewport * local_to_border))
}

/// Per-axis `rendered / painted`; `None` on axes with no painted extent.
fn axis_ratios(rendered: Rect, painted: Rect) -> (Option<f64>, Option<f64>) {
    let ratio = |r: f64, p: f64| (p.abs() > EPS).then(|| r / p);
    (
        ratio(rendered.width(), painted.width()),
        ratio(rendered.height(), painted.height()),
    )
}

/// Inline style values that pin an element in place.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LockPlan {
    /// `absolute`, or `fixed` for elements that already were.
    pub position: Position,
    /// `top` in the containing block's local space.
    pub top: f64,
    /// `left` in the containing block's local space.
    pub left: f64,
    /// Content-box width.
    pub width: f64,
    /// Content-box height.
    pub height: f64,
}

impl LockPlan {
    /// Serialized inline values, `position` first. `transform` is never included.
    pub fn style_values(&self) -> [(StyleProperty, String); 5] {
        [
            (StyleProperty::Position, self.position.as_str().to_string()),
            (StyleProperty::Top, format_px(self.top)),
            (StyleProperty::Left, format_px(self.left)),
            (StyleProperty::Width, format_px(self.width)),
            (StyleProperty::Height, format_px(self.height)),
        ]
    }
}

/// Compute the absolute-position values that reproduce the element's current rendered box.
///
/// Reads only; nothing is written to the element.
#[tracing::instrument(level = "debug", skip(host))]
pub fn plan_lock<H: LayoutHost>(host: &mut H, node: H::Node) -> SpriteResult<LockPlan> {
    ensure_attached(host, node)?;
    let rendered = host.bounding_client_rect(node)?;
    let style = host.computed_style(node)?;
    let scheme = if style.position == Position::Fixed {
        Position::Fixed
    } else {
        Position::Absolute
    };
    let own = read_transform(host, node)?;
    let own_rel = transform_about_origin(own.compensation_matrix(), style.transform_origin);
    let border_box = Rect::new(0.0, 0.0, style.border_box_width(), style.border_box_height());

    let containing_block = host.offset_parent(node, scheme)?;
    let occupant = Occupant {
        rendered,
        own_rel,
        border_box,
    };
    let frame = block_frame(host, containing_block, Some(occupant))?;

    // Where the painted box sits relative to the border-box corner once mapped to viewport
    // space. Margins, padding and borders only matter through this offset and the final
    // margin subtraction.
    let painted = (frame.linear() * own_rel).transform_rect_bbox(border_box);
    let corner_viewport = rendered.origin() - painted.origin().to_vec2();
    let corner = to_local_space(corner_viewport, &frame)?;

    let plan = LockPlan {
        position: scheme,
        top: corner.y - style.margin.top,
        left: corner.x - style.margin.left,
        width: style.width,
        height: style.height,
    };
    tracing::debug!(
        ?containing_block,
        top = plan.top,
        left = plan.left,
        width = plan.width,
        height = plan.height,
        "planned lock"
    );
    Ok(plan)
}

/// Write a plan's values. The element's transform is left untouched.
pub fn apply_plan<H: LayoutHost>(host: &mut H, node: H::Node, plan: &LockPlan) {
    for (prop, value) in plan.style_values() {
        host.set_inline_style(node, prop, &value);
    }
}

/// Plan and apply in one step. On error nothing has been written.
pub fn lock_element<H: LayoutHost>(host: &mut H, node: H::Node) -> SpriteResult<LockPlan> {
    let plan = plan_lock(host, node)?;
    apply_plan(host, node, &plan);
    Ok(plan)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/locker.rs"]
mod tests;
