//! Block layout and painting for the in-memory document.
//!
//! Layout runs in untransformed, unscrolled document coordinates. Painting then maps each
//! box to the viewport through its own transform and the transforms and scroll offsets of
//! its containing-block chain.

use std::collections::VecDeque;

use crate::css::property::Position;
use crate::css::transform::serialize_matrix;
use crate::dom::document::{Document, NodeId};
use crate::dom::style::{ResolvedStyle, resolve_style};
use crate::foundation::core::{Affine, Point, Rect, Size, Vec2};
use crate::host::ComputedStyle;

/// Laid-out and painted box of one attached element.
#[derive(Clone, Debug)]
pub(crate) struct LayoutBox {
    pub(crate) style: ResolvedStyle,
    /// Border box in document coordinates.
    pub(crate) border_box: Rect,
    /// Maps document coordinates of this box to the viewport (own transform included).
    pub(crate) to_viewport: Affine,
    /// Same, for boxes whose containing block is this one (own scroll included).
    pub(crate) content_to_viewport: Affine,
}

impl LayoutBox {
    pub(crate) fn client_rect(&self) -> Rect {
        self.to_viewport.transform_rect_bbox(self.border_box)
    }

    /// Maps border-box relative coordinates to the viewport.
    pub(crate) fn border_box_to_viewport(&self) -> Affine {
        self.to_viewport * Affine::translate(self.border_box.origin().to_vec2())
    }

    pub(crate) fn padding_box(&self) -> Rect {
        padding_box(self.border_box, &self.style)
    }

    pub(crate) fn computed_style(&self) -> ComputedStyle {
        let s = &self.style;
        ComputedStyle {
            position: s.position,
            transform: s
                .transform
                .map_or_else(|| "none".to_string(), serialize_matrix),
            transform_origin: s.transform_origin(self.border_box.size()),
            width: (self.border_box.width() - s.frame_horizontal()).max(0.0),
            height: (self.border_box.height() - s.frame_vertical()).max(0.0),
            margin: s.margin,
            border: s.border,
            padding: s.padding,
        }
    }
}

/// Layout result, indexed by node. Detached nodes have no box.
#[derive(Clone, Debug, Default)]
pub(crate) struct LayoutTree {
    boxes: Vec<Option<LayoutBox>>,
}

impl LayoutTree {
    pub(crate) fn get(&self, node: NodeId) -> Option<&LayoutBox> {
        self.boxes.get(node.index()).and_then(Option::as_ref)
    }
}

fn padding_box(border_box: Rect, style: &ResolvedStyle) -> Rect {
    Rect::new(
        border_box.x0 + style.border.left,
        border_box.y0 + style.border.top,
        border_box.x1 - style.border.right,
        border_box.y1 - style.border.bottom,
    )
}

/// Nearest ancestor that contains a box positioned with `scheme`.
///
/// Transformed ancestors contain both schemes; positioned ancestors only contain
/// `absolute` boxes. `None` is the initial containing block.
pub(crate) fn find_containing_block(
    doc: &Document,
    node: NodeId,
    scheme: Position,
    style_of: impl Fn(NodeId) -> ResolvedStyle,
) -> Option<NodeId> {
    let mut cur = doc.parent(node);
    while let Some(id) = cur {
        let s = style_of(id);
        let contains = match scheme {
            Position::Fixed => s.has_transform(),
            _ => s.has_transform() || s.position.is_positioned(),
        };
        if contains {
            return Some(id);
        }
        cur = doc.parent(id);
    }
    None
}

struct Pending {
    node: NodeId,
    static_position: Point,
}

struct Builder<'a> {
    doc: &'a Document,
    styles: Vec<ResolvedStyle>,
    rects: Vec<Option<Rect>>,
    pending: VecDeque<Pending>,
}

impl Builder<'_> {
    fn style(&self, node: NodeId) -> ResolvedStyle {
        self.styles.get(node.index()).copied().unwrap_or_default()
    }

    fn containing_block(&self, node: NodeId, scheme: Position) -> Option<NodeId> {
        find_containing_block(self.doc, node, scheme, |id| self.style(id))
    }

    /// Lay out an in-flow box with its margin corner at `at`. Returns its margin-box height.
    fn flow(&mut self, node: NodeId, at: Point, avail_width: f64) -> f64 {
        let s = self.style(node);
        let content_width = s.width.unwrap_or_else(|| {
            (avail_width - s.margin.horizontal() - s.frame_horizontal()).max(0.0)
        });
        // Relative offsets move the box without affecting flow.
        let shift = match s.position {
            Position::Relative | Position::Sticky => {
                Vec2::new(s.left.unwrap_or(0.0), s.top.unwrap_or(0.0))
            }
            _ => Vec2::ZERO,
        };
        let content_height =
            self.lay_out_box(node, at + s.margin.top_left() + shift, content_width);
        content_height + s.margin.vertical() + s.frame_vertical()
    }

    /// Place the border box at `border_origin` and lay out children. Returns content height.
    fn lay_out_box(&mut self, node: NodeId, border_origin: Point, content_width: f64) -> f64 {
        let s = self.style(node);
        let content_origin = border_origin + s.border.top_left() + s.padding.top_left();
        let children_height = self.flow_children(node, content_origin, content_width);
        let content_height = s.height.unwrap_or(children_height);
        self.rects[node.index()] = Some(Rect::from_origin_size(
            border_origin,
            Size::new(
                content_width + s.frame_horizontal(),
                content_height + s.frame_vertical(),
            ),
        ));
        content_height
    }

    fn flow_children(&mut self, node: NodeId, origin: Point, width: f64) -> f64 {
        let doc = self.doc;
        let mut y = origin.y;
        for &child in doc.children(node) {
            if self.style(child).position.is_out_of_flow() {
                self.pending.push_back(Pending {
                    node: child,
                    static_position: Point::new(origin.x, y),
                });
            } else {
                y += self.flow(child, Point::new(origin.x, y), width);
            }
        }
        y - origin.y
    }

    fn place_out_of_flow(&mut self, p: Pending) {
        let s = self.style(p.node);
        let cb = self.containing_block(p.node, s.position);
        let viewport = Rect::from_origin_size(Point::ORIGIN, self.doc.viewport());
        let cb_padding = cb
            .and_then(|c| self.rects[c.index()].map(|r| padding_box(r, &self.style(c))))
            .unwrap_or(viewport);
        let margin_corner = Point::new(
            s.left.map_or(p.static_position.x, |l| cb_padding.x0 + l),
            s.top.map_or(p.static_position.y, |t| cb_padding.y0 + t),
        );
        let content_width = s
            .width
            .unwrap_or_else(|| self.preferred_content_width(p.node));
        self.lay_out_box(p.node, margin_corner + s.margin.top_left(), content_width);
    }

    /// Shrink-to-fit width: the widest in-flow child with an explicit width chain.
    fn preferred_content_width(&self, node: NodeId) -> f64 {
        self.doc
            .children(node)
            .iter()
            .map(|&c| (c, self.style(c)))
            .filter(|(_, s)| !s.position.is_out_of_flow())
            .map(|(c, s)| {
                s.margin.horizontal()
                    + s.frame_horizontal()
                    + s.width.unwrap_or_else(|| self.preferred_content_width(c))
            })
            .fold(0.0, f64::max)
    }
}

/// Lay out and paint every attached element of `doc`.
pub(crate) fn layout_document(doc: &Document) -> LayoutTree {
    let order = doc.preorder();
    let count = doc.node_count();

    let mut styles = vec![ResolvedStyle::default(); count];
    for &id in &order {
        styles[id.index()] = resolve_style(doc.declarations(id));
    }

    let mut b = Builder {
        doc,
        styles,
        rects: vec![None; count],
        pending: VecDeque::new(),
    };
    b.flow(doc.root(), Point::ORIGIN, doc.viewport().width);
    while let Some(p) = b.pending.pop_front() {
        b.place_out_of_flow(p);
    }

    let mut boxes: Vec<Option<LayoutBox>> = vec![None; count];
    for &id in &order {
        let style = b.style(id);
        let border_box = b.rects[id.index()].unwrap_or_default();
        let chain_parent = if style.position.is_out_of_flow() {
            b.containing_block(id, style.position)
        } else {
            doc.parent(id)
        };
        let base = chain_parent
            .and_then(|p| boxes[p.index()].as_ref())
            .map_or(Affine::IDENTITY, |p| p.content_to_viewport);

        let own = match style.transform {
            Some(m) => {
                let origin = border_box.origin().to_vec2()
                    + style.transform_origin(border_box.size());
                Affine::translate(origin) * m * Affine::translate(-origin)
            }
            None => Affine::IDENTITY,
        };
        let to_viewport = base * own;
        let scroll = if style.is_scroll_container() {
            doc.scroll(id)
        } else {
            Vec2::ZERO
        };
        boxes[id.index()] = Some(LayoutBox {
            style,
            border_box,
            to_viewport,
            content_to_viewport: to_viewport * Affine::translate(-scroll),
        });
    }
    LayoutTree { boxes }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/layout.rs"]
mod tests;
