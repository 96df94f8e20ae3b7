pub(crate) mod bounds;
pub(crate) mod locker;
pub(crate) mod snapshot;
pub(crate) mod sprite;
pub(crate) mod transform;
