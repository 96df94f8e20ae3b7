pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Default tolerance for approximate geometry comparisons, in CSS pixels.
///
/// Rendering engines round layout values at roughly this granularity.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// A rectangle in viewport coordinates (CSS pixels).
///
/// Bounds are captured by value: once measured they never track the element.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Distance from the viewport's top edge.
    pub top: f64,
    /// Distance from the viewport's left edge.
    pub left: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Bounds {
    /// Build bounds from explicit components.
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Convert a kurbo rectangle (already in viewport space).
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            top: rect.y0,
            left: rect.x0,
            width: rect.width(),
            height: rect.height(),
        }
    }

    /// Top-left corner.
    pub fn origin(self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Component-wise comparison where every component may differ by at most `tolerance`.
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.top - other.top).abs() <= tolerance
            && (self.left - other.left).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }

    /// Offset from this rectangle's origin to `other`'s origin.
    pub fn offset_to(self, other: Self) -> Vec2 {
        other.origin() - self.origin()
    }
}

/// Four box edges (margin, border or padding widths).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edges {
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
}

impl Edges {
    /// Same width on every edge.
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// `left + right`.
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    /// `top + bottom`.
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }

    /// Offset of the inner edge's top-left corner.
    pub fn top_left(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
