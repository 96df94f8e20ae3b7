//! flip-sprite captures an element's on-screen geometry around a layout change and can pin
//! the element with absolute positioning without moving it by a single pixel.
//!
//! This is the geometry half of a FLIP (First, Last, Invert, Play) transition. Timing,
//! easing and deciding which elements animate belong to the caller.
//!
//! # Flow
//!
//! 1. [`Sprite::new`] measures the element's **initial bounds**.
//! 2. The caller mutates layout.
//! 3. [`Sprite::measure_final_bounds`] measures the **final bounds**.
//! 4. [`Sprite::lock`] snapshots the managed inline styles and switches the element to
//!    `position: absolute` (or keeps `fixed`) with `top`/`left`/`width`/`height` chosen so
//!    its rendered box is unchanged.
//! 5. After the animation, [`Sprite::unlock`] restores the snapshot verbatim.
//!
//! The engine talks to the rendering substrate only through [`LayoutHost`]. [`Document`]
//! is an in-memory implementation with block layout, positioning, transforms and scroll
//! containers.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod css;
mod dom;
mod engine;
mod foundation;
mod host;

pub use css::property::{MANAGED_PROPERTIES, Position, StyleProperty};
pub use css::transform::{ComputedTransform, TransformFn, TransformList, parse_computed};
pub use css::value::{Declaration, format_px, parse_declarations, parse_px, parse_px_or_auto};
pub use dom::document::{Document, NodeId};
pub use dom::scene::{ElementSpec, Scene, ViewportSpec};
pub use engine::bounds::measure_bounds;
pub use engine::locker::{
    LocalFrame, LockPlan, apply_plan, containing_block_frame, lock_element, plan_lock,
    rect_to_local_space, to_local_space, transform_about_origin,
};
pub use engine::snapshot::StyleSnapshot;
pub use engine::sprite::{FlipDelta, LockState, Sprite};
pub use engine::transform::{AffineTransform2D, Fidelity, read_transform};
pub use foundation::core::{Affine, Bounds, DEFAULT_TOLERANCE, Edges, Point, Rect, Size, Vec2};
pub use foundation::error::{SpriteError, SpriteResult};
pub use foundation::opts::SpriteOpts;
pub use host::{ComputedStyle, LayoutHost, ensure_attached};
