//! The rendering substrate seam.
//!
//! The engine never owns elements. Everything it knows about layout comes through
//! [`LayoutHost`], and the only mutations it performs are inline style writes of the
//! properties in [`crate::MANAGED_PROPERTIES`].

use std::fmt;

use crate::css::property::{Position, StyleProperty};
use crate::foundation::core::{Affine, Edges, Rect, Vec2};
use crate::foundation::error::{SpriteError, SpriteResult};

/// Computed style values the engine reads.
///
/// Lengths are used values in CSS px. `width`/`height` are the content-box size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComputedStyle {
    /// Computed `position`.
    pub position: Position,
    /// Serialized computed transform: `none`, `matrix(...)` or `matrix3d(...)`.
    pub transform: String,
    /// Transform origin relative to the border-box top-left corner.
    pub transform_origin: Vec2,
    /// Content-box width.
    pub width: f64,
    /// Content-box height.
    pub height: f64,
    /// Margin widths.
    pub margin: Edges,
    /// Border widths.
    pub border: Edges,
    /// Padding widths.
    pub padding: Edges,
}

impl ComputedStyle {
    /// Border-box width (content + padding + border).
    pub fn border_box_width(&self) -> f64 {
        self.width + self.padding.horizontal() + self.border.horizontal()
    }

    /// Border-box height (content + padding + border).
    pub fn border_box_height(&self) -> f64 {
        self.height + self.padding.vertical() + self.border.vertical()
    }
}

/// A document that can lay out, measure and restyle elements.
///
/// Measurement methods take `&mut self` because answering them may force a layout pass.
pub trait LayoutHost {
    /// Borrowed element handle.
    type Node: Copy + Eq + fmt::Debug;

    /// Whether the element is part of a renderable document.
    fn is_attached(&self, node: Self::Node) -> bool;

    /// Rendered border box in viewport coordinates, including every applied transform
    /// and scroll offset.
    fn bounding_client_rect(&mut self, node: Self::Node) -> SpriteResult<Rect>;

    /// Current computed style.
    fn computed_style(&mut self, node: Self::Node) -> SpriteResult<ComputedStyle>;

    /// Containing block the element would have under `scheme` (`Absolute` or `Fixed`).
    ///
    /// `None` is the initial containing block: viewport origin, untransformed, unscrolled.
    fn offset_parent(
        &mut self,
        node: Self::Node,
        scheme: Position,
    ) -> SpriteResult<Option<Self::Node>>;

    /// Scroll offset of a scroll container; zero for anything else.
    fn scroll_offset(&mut self, node: Self::Node) -> SpriteResult<Vec2>;

    /// Exact map from the element's untransformed border-box space to viewport space, for
    /// hosts that know their full transform chain.
    ///
    /// The default `None` makes the engine infer ancestor scaling from rendered sizes.
    fn border_box_to_viewport(&mut self, node: Self::Node) -> SpriteResult<Option<Affine>> {
        let _ = node;
        Ok(None)
    }

    /// Inline value of `prop`, or `None` when it is not set.
    fn inline_style(&self, node: Self::Node, prop: StyleProperty) -> Option<String>;

    /// Set an inline style value.
    fn set_inline_style(&mut self, node: Self::Node, prop: StyleProperty, value: &str);

    /// Clear an inline style value (not the same as setting it to an empty string).
    fn remove_inline_style(&mut self, node: Self::Node, prop: StyleProperty);

    /// Serialized style attribute, or `None` when the element has no attribute.
    fn style_attribute(&self, node: Self::Node) -> Option<String>;

    /// Drop the style attribute entirely.
    fn remove_style_attribute(&mut self, node: Self::Node);
}

/// Fail with [`SpriteError::DetachedElement`] unless `node` is attached.
pub fn ensure_attached<H: LayoutHost>(host: &H, node: H::Node) -> SpriteResult<()> {
    if host.is_attached(node) {
        Ok(())
    } else {
        Err(SpriteError::detached(format!(
            "{node:?} is not attached to a renderable document"
        )))
    }
}
