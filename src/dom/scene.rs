use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::dom::document::{Document, NodeId};
use crate::foundation::core::Vec2;
use crate::foundation::error::{SpriteError, SpriteResult};

/// JSON description of a [`Document`]: a viewport plus a tree of styled elements.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Viewport size in CSS px.
    pub viewport: ViewportSpec,
    /// Children of the root element.
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

/// Viewport dimensions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSpec {
    /// Width in CSS px.
    pub width: f64,
    /// Height in CSS px.
    pub height: f64,
}

/// One element and its subtree.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementSpec {
    /// Name used by [`Document::find`].
    pub name: String,
    /// Style attribute text, e.g. `"position: relative; width: 600px"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Vertical scroll offset.
    #[serde(default)]
    pub scroll_top: f64,
    /// Horizontal scroll offset.
    #[serde(default)]
    pub scroll_left: f64,
    /// Child elements in document order.
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SpriteResult<Self> {
        serde_json::from_reader(r).map_err(|e| SpriteError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from JSON text.
    pub fn from_json_str(s: &str) -> SpriteResult<Self> {
        serde_json::from_str(s).map_err(|e| SpriteError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SpriteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SpriteError::serde(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the viewport is usable.
    pub fn validate(&self) -> SpriteResult<()> {
        let ViewportSpec { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(SpriteError::serde(
                "scene viewport width/height must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Build a fresh document from the scene.
    pub fn build(&self) -> SpriteResult<Document> {
        self.validate()?;
        let mut doc = Document::new(self.viewport.width, self.viewport.height);
        let root = doc.root();
        for el in &self.elements {
            add_element(&mut doc, root, el)?;
        }
        Ok(doc)
    }
}

fn add_element(doc: &mut Document, parent: NodeId, spec: &ElementSpec) -> SpriteResult<NodeId> {
    let node = doc.create_element(spec.name.clone());
    if let Some(css) = &spec.style {
        doc.set_style_attribute(node, css);
    }
    if spec.scroll_top != 0.0 || spec.scroll_left != 0.0 {
        doc.set_scroll(node, Vec2::new(spec.scroll_left, spec.scroll_top));
    }
    doc.append_child(parent, node)?;
    for child in &spec.children {
        add_element(doc, node, child)?;
    }
    Ok(node)
}

#[cfg(test)]
#[path = "../../tests/unit/dom/scene.rs"]
mod tests;
