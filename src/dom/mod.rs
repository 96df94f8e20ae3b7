//! In-memory rendering substrate implementing [`crate::LayoutHost`].

pub(crate) mod document;
pub(crate) mod layout;
pub(crate) mod scene;
pub(crate) mod style;
