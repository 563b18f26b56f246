//! Hierarchy nodes: equivalence classes linked by covering edges.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Index of a node inside its owning [`Hierarchy`](crate::Hierarchy).
///
/// Ids are arena indices; they are only meaningful for the hierarchy that
/// issued them and stay stable for the lifetime of that hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// One node of the hierarchy: a non-empty class of mutually equivalent
/// elements, plus the covering edges to direct parents and children.
///
/// Parent/child edges form the transitive reduction of the underlying
/// partial order; ancestors and descendants are recovered by reachability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyNode<T: Ord> {
    equivalent: BTreeSet<T>,
    parents: HashSet<NodeId>,
    children: HashSet<NodeId>,
}

impl<T: Ord> HierarchyNode<T> {
    pub(crate) fn singleton(element: T) -> Self {
        let mut equivalent = BTreeSet::new();
        equivalent.insert(element);
        Self {
            equivalent,
            parents: HashSet::new(),
            children: HashSet::new(),
        }
    }

    pub(crate) fn from_class(equivalent: BTreeSet<T>) -> Self {
        debug_assert!(!equivalent.is_empty());
        Self {
            equivalent,
            parents: HashSet::new(),
            children: HashSet::new(),
        }
    }

    /// Canonical member of the equivalence class (the smallest one, so the
    /// choice is deterministic).
    pub fn representative(&self) -> &T {
        self.equivalent
            .iter()
            .next()
            .expect("hierarchy nodes are never empty")
    }

    /// All elements of this equivalence class.
    pub fn equivalent_elements(&self) -> &BTreeSet<T> {
        &self.equivalent
    }

    pub fn contains(&self, element: &T) -> bool {
        self.equivalent.contains(element)
    }

    /// Direct parent nodes (covering edges only).
    pub fn parent_nodes(&self) -> &HashSet<NodeId> {
        &self.parents
    }

    /// Direct child nodes (covering edges only).
    pub fn child_nodes(&self) -> &HashSet<NodeId> {
        &self.children
    }

    pub(crate) fn add_equivalent(&mut self, element: T) {
        self.equivalent.insert(element);
    }

    pub(crate) fn add_parent(&mut self, parent: NodeId) {
        self.parents.insert(parent);
    }

    pub(crate) fn add_child(&mut self, child: NodeId) {
        self.children.insert(child);
    }

    pub(crate) fn remove_parent(&mut self, parent: NodeId) {
        self.parents.remove(&parent);
    }

    pub(crate) fn remove_child(&mut self, child: NodeId) {
        self.children.remove(&child);
    }
}
