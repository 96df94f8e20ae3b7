//! Minimal CSS value handling shared by the engine and the reference host.

pub(crate) mod property;
pub(crate) mod syntax;
pub(crate) mod transform;
pub(crate) mod value;
