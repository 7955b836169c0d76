use crate::geometry::{Point, Rect};
use crate::options::TargetSelector;
use std::fmt::Debug;

/// Read-only view of the host's element tree.
///
/// Nodes are cheap handles owned by the host; the engine only compares,
/// clones and queries them, it never creates or destroys elements.
pub trait ElementTree {
    type Node: Clone + PartialEq + Debug;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether `node` carries the lockable marker.
    fn matches(&self, node: &Self::Node, selector: &TargetSelector) -> bool;

    /// Bounding box in the same coordinate space as pointer events.
    fn bounds(&self, node: &Self::Node) -> Rect;

    /// Whether `node` is still part of the live tree.
    fn contains(&self, node: &Self::Node) -> bool;

    /// Topmost element under `point`.
    fn node_at(&self, point: Point) -> Option<Self::Node>;
}

fn ancestors<T: ElementTree>(tree: &T, node: &T::Node) -> impl Iterator<Item = T::Node> {
    std::iter::successors(Some(node.clone()), move |n| tree.parent(n))
}

/// Nearest lockable element at or above `node`; the innermost match wins when
/// targets are nested.
pub fn closest_target<T: ElementTree>(
    tree: &T,
    node: &T::Node,
    selector: &TargetSelector,
) -> Option<T::Node> {
    ancestors(tree, node).find(|n| tree.matches(n, selector))
}

/// Whether `node` is `ancestor` or lies somewhere beneath it.
pub fn is_within<T: ElementTree>(tree: &T, node: &T::Node, ancestor: &T::Node) -> bool {
    ancestors(tree, node).any(|n| n == *ancestor)
}
