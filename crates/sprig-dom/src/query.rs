//! Read-only queries over a built tree.
//!
//! Every lookup walks the descendants of a scope node in document order
//! (depth-first, pre-order). The scope node itself never matches, and text
//! nodes are visited but can never match.

use std::ops::Deref;

use crate::{DomTree, Element, NodeId};

impl DomTree {
    /// First descendant of `scope` whose `id` equals `id`, in document order.
    ///
    /// Stops at the first match. Only nodes that carry an `id` attribute are
    /// candidates, so `<p id="">` is found by an empty `id` while elements
    /// without the attribute and text nodes never are.
    #[must_use]
    pub fn find_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.descendants(scope).find(|&node| {
            self.get(node)
                .is_some_and(|el| el.attributes.contains_key("id") && el.id == id)
        })
    }

    /// Every descendant of `scope` whose class list contains `name`.
    #[must_use]
    pub fn find_all_by_class_name(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&node| self.get(node).is_some_and(|el| el.has_class(name)))
            .collect()
    }

    /// Every descendant element of `scope` whose tag equals `tag` exactly.
    #[must_use]
    pub fn find_all_by_tag_name(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&node| {
                self.get(node)
                    .is_some_and(|el| !el.is_text() && el.tag == tag)
            })
            .collect()
    }

    /// Borrow a node together with the tree it lives in.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.get(id).map(|element| ElementRef {
            tree: self,
            id,
            element,
        })
    }

    /// Borrow the synthetic document root.
    #[must_use]
    pub fn document(&self) -> ElementRef<'_> {
        ElementRef {
            tree: self,
            id: NodeId::ROOT,
            element: &self.nodes[NodeId::ROOT.0],
        }
    }

    fn refs(&self, ids: Vec<NodeId>) -> Vec<ElementRef<'_>> {
        ids.into_iter().filter_map(|id| self.element(id)).collect()
    }
}

/// A non-owning reference to an element inside a [`DomTree`].
///
/// Dereferences to [`Element`], and carries the tree so that queries and
/// navigation can continue from it. Valid for as long as the tree is
/// borrowed.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
    element: &'a Element,
}

impl<'a> ElementRef<'a> {
    /// The arena index of this element.
    #[must_use]
    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    /// The tree this element belongs to.
    #[must_use]
    pub const fn tree(&self) -> &'a DomTree {
        self.tree
    }

    /// The enclosing element, or `None` for the document root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.element.parent.and_then(|id| self.tree.element(id))
    }

    /// Children in document order.
    pub fn children(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let tree = self.tree;
        self.element
            .children
            .iter()
            .filter_map(move |&id| tree.element(id))
    }

    /// Concatenated text of every text node below this element.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.tree.text_content(self.id)
    }

    /// See [`DomTree::find_by_id`].
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<Self> {
        self.tree
            .find_by_id(self.id, id)
            .and_then(|found| self.tree.element(found))
    }

    /// See [`DomTree::find_all_by_class_name`].
    #[must_use]
    pub fn find_all_by_class_name(&self, name: &str) -> Vec<Self> {
        self.tree
            .refs(self.tree.find_all_by_class_name(self.id, name))
    }

    /// See [`DomTree::find_all_by_tag_name`].
    #[must_use]
    pub fn find_all_by_tag_name(&self, tag: &str) -> Vec<Self> {
        self.tree.refs(self.tree.find_all_by_tag_name(self.id, tag))
    }
}

impl Deref for ElementRef<'_> {
    type Target = Element;

    fn deref(&self) -> &Element {
        self.element
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for ElementRef<'_> {}
