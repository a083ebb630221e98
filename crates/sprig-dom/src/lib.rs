//! Element tree for the sprig markup parser.
//!
//! This crate provides an arena-based tree of [`Element`]s plus the read-only
//! query layer (lookup by id, class and tag name).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! so a parsed tree can be moved, cloned or sent to another thread without any
//! dangling parent pointers. Nodes are only ever appended; once the parser
//! hands the tree to the caller it is immutable.
//!
//! Text is not a separate node type: a text node is an [`Element`] with an
//! empty tag and non-empty [`Element::inner_text`].

use std::collections::HashMap;

mod query;

pub use query::ElementRef;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Tag given to the synthetic root element of every tree.
pub const DOCUMENT_TAG: &str = "document";

/// A type-safe index into the element tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic document root is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node of the tree: either an element or a text run.
///
/// `class_list` and `id` are derived from `attributes` once, in
/// [`Element::new`], and are never recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name as written in the markup. Empty for text nodes.
    pub tag: String,
    /// Unescaped text. Only populated for text nodes.
    pub inner_text: String,
    /// Attribute name to value. The last duplicate in the source wins.
    pub attributes: AttributesMap,
    /// Whitespace-separated tokens of the `class` attribute, in source order.
    pub class_list: Vec<String>,
    /// Value of the `id` attribute, or empty.
    pub id: String,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Enclosing element. `None` only for the document root.
    pub parent: Option<NodeId>,
}

impl Element {
    /// Create an element node, deriving `class_list` and `id` from the
    /// attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>, attributes: AttributesMap) -> Self {
        let class_list = attributes
            .get("class")
            .map(|classes| classes.split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default();
        let id = attributes.get("id").cloned().unwrap_or_default();

        Self {
            tag: tag.into(),
            inner_text: String::new(),
            attributes,
            class_list,
            id,
            children: Vec::new(),
            parent: None,
        }
    }

    /// Create a text node.
    #[must_use]
    pub fn text(inner_text: impl Into<String>) -> Self {
        Self {
            inner_text: inner_text.into(),
            ..Self::default()
        }
    }

    /// Returns true if this node is a text run rather than an element.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.tag.is_empty() && !self.inner_text.is_empty()
    }

    /// Returns the value of the named attribute, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns true if `name` is one of this element's classes.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.class_list.iter().any(|class| class == name)
    }
}

/// Arena-based element tree with O(1) node access and traversal.
///
/// All elements live in one vector and refer to each other by [`NodeId`].
/// The document root is always present at [`NodeId::ROOT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Element>,
}

impl DomTree {
    /// Create a new tree holding only the synthetic `document` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new(DOCUMENT_TAG, AttributesMap::new())],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty. A tree always holds its root, so this
    /// only returns true for a tree with no nodes besides the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Append `element` as the last child of `parent` and return its ID.
    ///
    /// The element's `parent` field is overwritten and its `children` are
    /// cleared; links are only ever created through this method.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn append_child(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "append_child: unknown parent {parent:?}");

        let id = NodeId(self.nodes.len());
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over all descendants of a node in document order
    /// (depth-first, pre-order). The node itself is not yielded.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// Concatenated inner text of every text node below `id`, in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = self
            .get(id)
            .map(|n| n.inner_text.clone())
            .unwrap_or_default();
        for node in self.descendants(id).filter_map(|d| self.get(d)) {
            result.push_str(&node.inner_text);
        }
        result
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
///
/// Uses an explicit stack so deeply nested markup cannot overflow the call
/// stack.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> AttributesMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_new_tree_has_document_root() {
        let tree = DomTree::new();
        let root = tree.get(tree.root()).unwrap();
        assert_eq!(root.tag, DOCUMENT_TAG);
        assert_eq!(root.parent, None);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_class_list_and_id_are_derived() {
        let el = Element::new("p", attrs(&[("class", "a  b\tc"), ("id", "main")]));
        assert_eq!(el.class_list, vec!["a", "b", "c"]);
        assert_eq!(el.id, "main");
        assert!(el.has_class("b"));
        assert!(!el.has_class("d"));
    }

    #[test]
    fn test_missing_class_and_id_are_empty() {
        let el = Element::new("p", AttributesMap::new());
        assert!(el.class_list.is_empty());
        assert!(el.id.is_empty());
    }

    #[test]
    fn test_text_node_shape() {
        let text = Element::text("hi");
        assert!(text.is_text());
        assert!(text.tag.is_empty());
        assert!(text.attributes.is_empty());
        assert!(text.class_list.is_empty());
        assert!(text.id.is_empty());
    }

    #[test]
    fn test_descendants_are_pre_order() {
        let mut tree = DomTree::new();
        let a = tree.append_child(NodeId::ROOT, Element::new("a", AttributesMap::new()));
        let b = tree.append_child(a, Element::new("b", AttributesMap::new()));
        let c = tree.append_child(a, Element::new("c", AttributesMap::new()));
        let d = tree.append_child(NodeId::ROOT, Element::new("d", AttributesMap::new()));

        let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
        assert_eq!(order, vec![a, b, c, d]);
        assert_eq!(tree.descendants(b).count(), 0);
    }
}
