/// Convenience result type used across the crate.
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Error taxonomy for measurement, locking and the reference host.
#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    /// Operation not valid in the sprite's current lock state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The element is not attached to a renderable document.
    #[error("detached element: {0}")]
    DetachedElement(String),

    /// A transform could not be decomposed or inverted.
    #[error("unsupported transform: {0}")]
    UnsupportedTransform(String),

    /// Malformed CSS value text.
    #[error("style error: {0}")]
    Style(String),

    /// Errors when serializing or deserializing scenes and options.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteError {
    /// Build a [`SpriteError::InvalidState`] value.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build a [`SpriteError::DetachedElement`] value.
    pub fn detached(msg: impl Into<String>) -> Self {
        Self::DetachedElement(msg.into())
    }

    /// Build a [`SpriteError::UnsupportedTransform`] value.
    pub fn unsupported_transform(msg: impl Into<String>) -> Self {
        Self::UnsupportedTransform(msg.into())
    }

    /// Build a [`SpriteError::Style`] value.
    pub fn style(msg: impl Into<String>) -> Self {
        Self::Style(msg.into())
    }

    /// Build a [`SpriteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
