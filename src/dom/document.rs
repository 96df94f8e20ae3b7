use crate::css::property::{Position, StyleProperty};
use crate::css::value::{Declaration, parse_declarations, serialize_declarations};
use crate::dom::layout::{LayoutBox, LayoutTree, find_containing_block, layout_document};
use crate::foundation::core::{Affine, Rect, Size, Vec2};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::host::{ComputedStyle, LayoutHost};

/// Handle to an element of a [`Document`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct NodeData {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    // `None` means the element has no style attribute at all.
    style: Option<Vec<Declaration>>,
    scroll: Vec2,
}

impl NodeData {
    fn new(name: String) -> Self {
        Self {
            name,
            parent: None,
            children: Vec::new(),
            style: None,
            scroll: Vec2::ZERO,
        }
    }
}

/// An in-memory box-model document.
///
/// Supports block flow, relative/absolute/fixed positioning, 2D transforms with
/// transform origins, and scroll containers. Layout is computed lazily and cached until
/// the next mutation.
///
/// Node handles index into the document that created them; passing a handle from another
/// document panics.
#[derive(Clone, Debug)]
pub struct Document {
    viewport: Size,
    nodes: Vec<NodeData>,
    layout: LayoutTree,
    dirty: bool,
    layout_passes: u64,
}

impl Document {
    /// Create a document whose root element spans a viewport of the given size.
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            viewport: Size::new(viewport_width, viewport_height),
            nodes: vec![NodeData::new("root".to_string())],
            layout: LayoutTree::default(),
            dirty: true,
            layout_passes: 0,
        }
    }

    /// Viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The root element. It is always attached.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData::new(name.into()));
        id
    }

    /// Append `child` as the last child of `parent`, moving it if it already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> SpriteResult<()> {
        if child == self.root() {
            return Err(SpriteError::invalid_state("the root element cannot be moved"));
        }
        if self.ancestors_inclusive(parent).any(|a| a == child) {
            return Err(SpriteError::invalid_state(format!(
                "{child:?} is an ancestor of {parent:?}"
            )));
        }
        self.unlink(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
        self.dirty = true;
        Ok(())
    }

    /// Remove `node` (and its subtree) from its parent.
    pub fn detach(&mut self, node: NodeId) -> SpriteResult<()> {
        if node == self.root() {
            return Err(SpriteError::invalid_state("the root element cannot be detached"));
        }
        self.unlink(node);
        self.dirty = true;
        Ok(())
    }

    fn unlink(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|&c| c != node);
        }
    }

    /// Parent element, if any.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    /// Children in document order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.index()].children
    }

    /// Element name given at creation.
    pub fn name(&self, node: NodeId) -> &str {
        &self.nodes[node.index()].name
    }

    /// First attached element named `name`, in document order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.preorder().into_iter().find(|&id| self.name(id) == name)
    }

    /// Whether `node` is connected to the root.
    pub fn contains(&self, node: NodeId) -> bool {
        self.ancestors_inclusive(node).any(|a| a == self.root())
    }

    fn ancestors_inclusive(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), |&n| self.parent(n))
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Attached elements in document order, root first.
    pub(crate) fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub(crate) fn declarations(&self, node: NodeId) -> &[Declaration] {
        self.nodes[node.index()].style.as_deref().unwrap_or(&[])
    }

    /// Inline value of `name`.
    pub fn style(&self, node: NodeId, name: &str) -> Option<&str> {
        let name = name.trim().to_ascii_lowercase();
        self.declarations(node)
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    /// Set an inline value. An empty value removes the property.
    pub fn set_style(&mut self, node: NodeId, name: &str, value: &str) {
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();
        if value.is_empty() {
            self.remove_style(node, &name);
            return;
        }
        let decls = self.nodes[node.index()].style.get_or_insert_with(Vec::new);
        match decls.iter_mut().find(|d| d.name == name) {
            Some(d) => d.value = value.to_string(),
            None => decls.push(Declaration {
                name,
                value: value.to_string(),
            }),
        }
        self.dirty = true;
    }

    /// Remove an inline value. The style attribute itself stays, possibly empty.
    pub fn remove_style(&mut self, node: NodeId, name: &str) {
        let name = name.trim().to_ascii_lowercase();
        if let Some(decls) = self.nodes[node.index()].style.as_mut() {
            decls.retain(|d| d.name != name);
            self.dirty = true;
        }
    }

    /// Replace the whole style attribute with `css_text`.
    pub fn set_style_attribute(&mut self, node: NodeId, css_text: &str) {
        self.nodes[node.index()].style = Some(parse_declarations(css_text));
        self.dirty = true;
    }

    /// Serialized style attribute, `None` when absent.
    pub fn style_attribute(&self, node: NodeId) -> Option<String> {
        self.nodes[node.index()]
            .style
            .as_deref()
            .map(serialize_declarations)
    }

    /// Drop the style attribute.
    pub fn remove_style_attribute(&mut self, node: NodeId) {
        self.nodes[node.index()].style = None;
        self.dirty = true;
    }

    /// Set a scroll offset. Negative components clamp to zero. Only scroll containers
    /// honour it.
    pub fn set_scroll(&mut self, node: NodeId, offset: Vec2) {
        self.nodes[node.index()].scroll = Vec2::new(offset.x.max(0.0), offset.y.max(0.0));
        self.dirty = true;
    }

    /// Stored scroll offset.
    pub fn scroll(&self, node: NodeId) -> Vec2 {
        self.nodes[node.index()].scroll
    }

    /// Number of layout passes run so far.
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    fn ensure_layout(&mut self) -> &LayoutTree {
        if self.dirty {
            self.layout = layout_document(self);
            self.dirty = false;
            self.layout_passes += 1;
            tracing::trace!(pass = self.layout_passes, "forced layout");
        }
        &self.layout
    }

    fn layout_box(&mut self, node: NodeId) -> SpriteResult<&LayoutBox> {
        if !self.contains(node) {
            return Err(SpriteError::detached(format!(
                "{node:?} ('{}') is not attached",
                self.name(node)
            )));
        }
        self.ensure_layout()
            .get(node)
            .ok_or_else(|| SpriteError::detached(format!("{node:?} has no layout box")))
    }

    /// Rendered border box in viewport coordinates.
    pub fn bounding_client_rect(&mut self, node: NodeId) -> SpriteResult<Rect> {
        Ok(self.layout_box(node)?.client_rect())
    }

    /// Padding box in untransformed document coordinates.
    pub fn padding_box(&mut self, node: NodeId) -> SpriteResult<Rect> {
        Ok(self.layout_box(node)?.padding_box())
    }

    /// Computed style of an attached element.
    pub fn computed_style(&mut self, node: NodeId) -> SpriteResult<ComputedStyle> {
        Ok(self.layout_box(node)?.computed_style())
    }

    /// Containing block for a box positioned with `scheme`; `None` is the viewport.
    pub fn containing_block(
        &mut self,
        node: NodeId,
        scheme: Position,
    ) -> SpriteResult<Option<NodeId>> {
        self.layout_box(node)?;
        let layout = &self.layout;
        Ok(find_containing_block(self, node, scheme, |id| {
            layout.get(id).map(|b| b.style).unwrap_or_default()
        }))
    }

    /// Map from the border-box relative space of `node` to the viewport.
    pub fn border_box_to_viewport(&mut self, node: NodeId) -> SpriteResult<Affine> {
        Ok(self.layout_box(node)?.border_box_to_viewport())
    }

    /// Scroll offset in effect: zero unless `node` is a scroll container.
    pub fn effective_scroll(&mut self, node: NodeId) -> SpriteResult<Vec2> {
        let scrolls = self.layout_box(node)?.style.is_scroll_container();
        Ok(if scrolls { self.scroll(node) } else { Vec2::ZERO })
    }
}

impl LayoutHost for Document {
    type Node = NodeId;

    fn is_attached(&self, node: NodeId) -> bool {
        self.contains(node)
    }

    fn bounding_client_rect(&mut self, node: NodeId) -> SpriteResult<Rect> {
        Document::bounding_client_rect(self, node)
    }

    fn computed_style(&mut self, node: NodeId) -> SpriteResult<ComputedStyle> {
        Document::computed_style(self, node)
    }

    fn offset_parent(&mut self, node: NodeId, scheme: Position) -> SpriteResult<Option<NodeId>> {
        self.containing_block(node, scheme)
    }

    fn scroll_offset(&mut self, node: NodeId) -> SpriteResult<Vec2> {
        self.effective_scroll(node)
    }

    fn border_box_to_viewport(&mut self, node: NodeId) -> SpriteResult<Option<Affine>> {
        Document::border_box_to_viewport(self, node).map(Some)
    }

    fn inline_style(&self, node: NodeId, prop: StyleProperty) -> Option<String> {
        self.style(node, prop.css_name()).map(str::to_string)
    }

    fn set_inline_style(&mut self, node: NodeId, prop: StyleProperty, value: &str) {
        self.set_style(node, prop.css_name(), value);
    }

    fn remove_inline_style(&mut self, node: NodeId, prop: StyleProperty) {
        self.remove_style(node, prop.css_name());
    }

    fn style_attribute(&self, node: NodeId) -> Option<String> {
        Document::style_attribute(self, node)
    }

    fn remove_style_attribute(&mut self, node: NodeId) {
        Document::remove_style_attribute(self, node);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/document.rs"]
mod tests;
