//! Markup access used by the engine.

use crate::style::StyleBatch;

pub const ATTR_ANIMATE: &str = "data-animate";
pub const ATTR_DELAY: &str = "data-delay";
pub const ATTR_DURATION: &str = "data-duration";
pub const ATTR_ANIMATE_CHILDREN: &str = "data-animate-children";
pub const ATTR_STAGGER: &str = "data-stagger";

/// The document the engine reads annotations from and writes styles to.
///
/// Methods take `&self`: hosts are expected to use interior mutability, the
/// same way DOM handles mutate through shared references.
pub trait RevealDocument {
    /// Opaque element handle. Equality must be identity.
    type Node: Clone + PartialEq;

    /// Elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<Self::Node>;
    /// Elements carrying attribute `name` (any value), in document order.
    fn elements_with_attribute(&self, name: &str) -> Vec<Self::Node>;
    /// Direct element children, in document order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    /// Write every property in `batch` to the node's inline style, in order.
    fn apply_styles(&self, node: &Self::Node, batch: &StyleBatch);

    /// Attribute value, treating an empty value as absent.
    fn non_empty_attribute(&self, node: &Self::Node, name: &str) -> Option<String> {
        self.attribute(node, name).filter(|v| !v.is_empty())
    }
}
