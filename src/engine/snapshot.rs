use smallvec::SmallVec;

use crate::css::property::StyleProperty;
use crate::host::LayoutHost;

/// Inline style values recorded before a lock mutates them.
///
/// Restoring consumes the snapshot, so saved values can only be written back once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleSnapshot<N> {
    node: N,
    had_style_attribute: bool,
    saved: SmallVec<[(StyleProperty, Option<String>); 6]>,
}

impl<N: Copy> StyleSnapshot<N> {
    /// Record the current inline value (or absence) of each property.
    pub fn save<H>(host: &H, node: N, props: &[StyleProperty]) -> Self
    where
        H: LayoutHost<Node = N>,
    {
        let saved = props
            .iter()
            .map(|&prop| (prop, host.inline_style(node, prop)))
            .collect();
        Self {
            node,
            had_style_attribute: host.style_attribute(node).is_some(),
            saved,
        }
    }

    /// The element this snapshot belongs to.
    pub fn node(&self) -> N {
        self.node
    }

    /// Recorded value: `None` if `prop` was not saved, `Some(None)` if it was unset.
    pub fn get(&self, prop: StyleProperty) -> Option<Option<&str>> {
        self.saved
            .iter()
            .find(|(p, _)| *p == prop)
            .map(|(_, v)| v.as_deref())
    }

    /// Saved properties in save order.
    pub fn properties(&self) -> impl Iterator<Item = StyleProperty> + '_ {
        self.saved.iter().map(|(p, _)| *p)
    }

    /// Whether the element carried a style attribute when saved.
    pub fn had_style_attribute(&self) -> bool {
        self.had_style_attribute
    }

    /// Write every saved value back verbatim; unset properties are removed, not emptied.
    ///
    /// With `prune_empty_style`, a style attribute that did not exist at save time and is
    /// empty after restoration is removed as well.
    pub fn restore<H>(self, host: &mut H, prune_empty_style: bool)
    where
        H: LayoutHost<Node = N>,
    {
        for (prop, value) in &self.saved {
            match value {
                Some(v) => host.set_inline_style(self.node, *prop, v),
                None => host.remove_inline_style(self.node, *prop),
            }
        }
        if prune_empty_style
            && !self.had_style_attribute
            && host
                .style_attribute(self.node)
                .is_some_and(|s| s.trim().is_empty())
        {
            host.remove_style_attribute(self.node);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/snapshot.rs"]
mod tests;
