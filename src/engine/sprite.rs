use std::fmt;

use crate::css::property::MANAGED_PROPERTIES;
use crate::engine::bounds::measure_bounds;
use crate::engine::locker::{LockPlan, apply_plan, plan_lock};
use crate::engine::snapshot::StyleSnapshot;
use crate::foundation::core::Bounds;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::foundation::opts::SpriteOpts;
use crate::host::LayoutHost;

/// Whether a sprite currently pins its element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    /// Element styles are the caller's.
    #[default]
    Unlocked,
    /// Element is absolutely positioned by the sprite.
    Locked,
}

/// Transform that makes the final box look like the initial one (the FLIP "invert" step).
///
/// Scales apply about the final box's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlipDelta {
    /// `initial.left - final.left`
    pub dx: f64,
    /// `initial.top - final.top`
    pub dy: f64,
    /// `initial.width / final.width` (1 when the final width is zero)
    pub scale_x: f64,
    /// `initial.height / final.height` (1 when the final height is zero)
    pub scale_y: f64,
}

impl FlipDelta {
    /// Delta that maps `last` onto `first`.
    pub fn between(first: Bounds, last: Bounds) -> Self {
        let ratio = |a: f64, b: f64| if b.abs() > f64::EPSILON { a / b } else { 1.0 };
        let offset = last.offset_to(first);
        Self {
            dx: offset.x,
            dy: offset.y,
            scale_x: ratio(first.width, last.width),
            scale_y: ratio(first.height, last.height),
        }
    }
}

#[derive(Clone, Debug)]
struct ActiveLock<N> {
    snapshot: StyleSnapshot<N>,
    plan: LockPlan,
}

/// Geometry and lock state for one element across a layout transition.
///
/// The sprite borrows its element: it never creates or removes nodes, and while locked it
/// only ever touches the properties in [`MANAGED_PROPERTIES`].
pub struct Sprite<N, C = ()> {
    element: N,
    component: Option<C>,
    initial_bounds: Bounds,
    final_bounds: Option<Bounds>,
    active: Option<ActiveLock<N>>,
    opts: SpriteOpts,
}

impl<N: fmt::Debug, C> fmt::Debug for Sprite<N, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("element", &self.element)
            .field("initial_bounds", &self.initial_bounds)
            .field("final_bounds", &self.final_bounds)
            .field("locked", &self.active.is_some())
            .finish_non_exhaustive()
    }
}

impl<N, C> Sprite<N, C>
where
    N: Copy + Eq + fmt::Debug,
{
    /// Track `element`, measuring its initial bounds immediately.
    pub fn new<H>(host: &mut H, element: N, component: Option<C>) -> SpriteResult<Self>
    where
        H: LayoutHost<Node = N>,
    {
        Self::with_opts(host, element, component, SpriteOpts::default())
    }

    /// Like [`Sprite::new`] with explicit options.
    pub fn with_opts<H>(
        host: &mut H,
        element: N,
        component: Option<C>,
        opts: SpriteOpts,
    ) -> SpriteResult<Self>
    where
        H: LayoutHost<Node = N>,
    {
        opts.validate()?;
        let mut sprite = Self {
            element,
            component,
            initial_bounds: Bounds::default(),
            final_bounds: None,
            active: None,
            opts,
        };
        sprite.measure_initial_bounds(host)?;
        Ok(sprite)
    }

    /// The tracked element.
    pub fn element(&self) -> N {
        self.element
    }

    /// Owner tag supplied at construction, unchanged.
    pub fn component(&self) -> Option<&C> {
        self.component.as_ref()
    }

    /// Bounds captured at construction (or the last [`Sprite::measure_initial_bounds`]).
    pub fn initial_bounds(&self) -> Bounds {
        self.initial_bounds
    }

    /// Bounds from the last [`Sprite::measure_final_bounds`], if any.
    pub fn final_bounds(&self) -> Option<Bounds> {
        self.final_bounds
    }

    /// Options in effect.
    pub fn opts(&self) -> SpriteOpts {
        self.opts
    }

    /// Current lock state.
    pub fn lock_state(&self) -> LockState {
        if self.active.is_some() {
            LockState::Locked
        } else {
            LockState::Unlocked
        }
    }

    /// Styles saved by the active lock.
    pub fn saved_style(&self) -> Option<&StyleSnapshot<N>> {
        self.active.as_ref().map(|a| &a.snapshot)
    }

    /// Values applied by the active lock.
    pub fn lock_plan(&self) -> Option<LockPlan> {
        self.active.as_ref().map(|a| a.plan)
    }

    /// Re-measure and store the initial bounds.
    pub fn measure_initial_bounds<H>(&mut self, host: &mut H) -> SpriteResult<Bounds>
    where
        H: LayoutHost<Node = N>,
    {
        self.initial_bounds = measure_bounds(host, self.element)?;
        Ok(self.initial_bounds)
    }

    /// Measure and store the final bounds. Works locked or unlocked.
    pub fn measure_final_bounds<H>(&mut self, host: &mut H) -> SpriteResult<Bounds>
    where
        H: LayoutHost<Node = N>,
    {
        let bounds = measure_bounds(host, self.element)?;
        self.final_bounds = Some(bounds);
        Ok(bounds)
    }

    /// Invert delta from final to initial bounds. `None` until final bounds are measured.
    pub fn flip_delta(&self) -> Option<FlipDelta> {
        self.final_bounds
            .map(|last| FlipDelta::between(self.initial_bounds, last))
    }

    /// Whether final bounds differ from initial bounds beyond the configured tolerance.
    pub fn has_moved(&self) -> Option<bool> {
        self.final_bounds
            .map(|last| !last.approx_eq(self.initial_bounds, self.opts.tolerance))
    }

    /// Pin the element with absolute positioning without moving it on screen.
    ///
    /// Fails with [`SpriteError::InvalidState`] when already locked and with
    /// [`SpriteError::DetachedElement`] for detached elements; in both cases nothing is
    /// written.
    #[tracing::instrument(level = "debug", skip_all, fields(element = ?self.element))]
    pub fn lock<H>(&mut self, host: &mut H) -> SpriteResult<()>
    where
        H: LayoutHost<Node = N>,
    {
        if self.active.is_some() {
            return Err(SpriteError::invalid_state(
                "lock() called while already locked; unlock() first",
            ));
        }
        let plan = plan_lock(host, self.element)?;
        let snapshot = StyleSnapshot::save(host, self.element, &MANAGED_PROPERTIES);
        apply_plan(host, self.element, &plan);
        self.active = Some(ActiveLock { snapshot, plan });
        Ok(())
    }

    /// Restore every style the lock touched. No-op when unlocked.
    #[tracing::instrument(level = "debug", skip_all, fields(element = ?self.element))]
    pub fn unlock<H>(&mut self, host: &mut H)
    where
        H: LayoutHost<Node = N>,
    {
        let Some(active) = self.active.take() else {
            tracing::trace!("unlock() on an unlocked sprite");
            return;
        };
        active.snapshot.restore(host, self.opts.prune_empty_style);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/sprite.rs"]
mod tests;
