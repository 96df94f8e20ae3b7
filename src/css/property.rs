use crate::foundation::error::{SpriteError, SpriteResult};

/// CSS `position` keyword.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Normal flow; `top`/`left` do not apply.
    #[default]
    Static,
    /// Normal flow, then offset by `top`/`left`.
    Relative,
    /// Out of flow, placed against the nearest positioned ancestor.
    Absolute,
    /// Out of flow, placed against the viewport (or a transformed ancestor).
    Fixed,
    /// Relative until a scroll threshold is crossed.
    Sticky,
}

impl Position {
    /// Parse a `position` keyword (ASCII case-insensitive).
    pub fn parse(s: &str) -> SpriteResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "relative" => Ok(Self::Relative),
            "absolute" => Ok(Self::Absolute),
            "fixed" => Ok(Self::Fixed),
            "sticky" => Ok(Self::Sticky),
            other => Err(SpriteError::style(format!(
                "unknown position keyword '{other}'"
            ))),
        }
    }

    /// Canonical CSS keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
            Self::Sticky => "sticky",
        }
    }

    /// Anything but `static` establishes a containing block for absolute descendants.
    pub fn is_positioned(self) -> bool {
        self != Self::Static
    }

    /// `absolute` and `fixed` boxes are taken out of normal flow.
    pub fn is_out_of_flow(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

/// Inline style properties the lock may write and must restore.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum StyleProperty {
    /// `position`
    Position,
    /// `top`
    Top,
    /// `left`
    Left,
    /// `width`
    Width,
    /// `height`
    Height,
    /// `transform`
    Transform,
}

/// The full property set snapshotted by [`crate::Sprite::lock`].
pub const MANAGED_PROPERTIES: [StyleProperty; 6] = [
    StyleProperty::Position,
    StyleProperty::Top,
    StyleProperty::Left,
    StyleProperty::Width,
    StyleProperty::Height,
    StyleProperty::Transform,
];

impl StyleProperty {
    /// CSS property name as written in a style attribute.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Top => "top",
            Self::Left => "left",
            Self::Width => "width",
            Self::Height => "height",
            Self::Transform => "transform",
        }
    }
}

impl std::fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/css/property.rs"]
mod tests;
