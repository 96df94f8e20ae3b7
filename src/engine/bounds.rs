use crate::foundation::core::Bounds;
use crate::foundation::error::SpriteResult;
use crate::host::{LayoutHost, ensure_attached};

/// Rendered bounding box of `node` in viewport coordinates.
///
/// Includes ancestor transforms, scroll offsets, the element's own transform and its
/// border. Forces layout on the host.
pub fn measure_bounds<H: LayoutHost>(host: &mut H, node: H::Node) -> SpriteResult<Bounds> {
    ensure_attached(host, node)?;
    let rect = host.bounding_client_rect(node)?;
    let bounds = Bounds::from_rect(rect);
    tracing::trace!(?node, ?bounds, "measured bounds");
    Ok(bounds)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/bounds.rs"]
mod tests;
