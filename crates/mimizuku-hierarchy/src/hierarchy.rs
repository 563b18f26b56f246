//! Arena-backed subsumption hierarchy (Hasse diagram over equivalence classes).

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

use crate::node::{HierarchyNode, NodeId};

/// A classified partial order: a DAG of equivalence-class nodes with a
/// distinguished top and bottom node connected by covering edges.
///
/// Every element of the classified universe belongs to exactly one node.
/// In the degenerate case (top equivalent to bottom) the hierarchy has a
/// single node containing the whole universe.
#[derive(Debug, Clone)]
pub struct Hierarchy<T: Ord> {
    nodes: Vec<HierarchyNode<T>>,
    element_index: HashMap<T, NodeId>,
    top: NodeId,
    bottom: NodeId,
}

impl<T: Clone + Eq + Hash + Ord> Hierarchy<T> {
    /// The two-node hierarchy containing only top and bottom, with a single
    /// covering edge between them. Starting point of incremental insertion.
    pub fn trivial(top_element: T, bottom_element: T) -> Self {
        let mut hierarchy = Self {
            nodes: Vec::new(),
            element_index: HashMap::new(),
            top: NodeId(0),
            bottom: NodeId(1),
        };
        let top = hierarchy.add_node(HierarchyNode::singleton(top_element));
        let bottom = hierarchy.add_node(HierarchyNode::singleton(bottom_element));
        hierarchy.add_edge(top, bottom);
        hierarchy
    }

    /// The one-node hierarchy for an unsatisfiable top: every element of the
    /// universe collapses into a single class and top == bottom.
    pub fn degenerate(top_element: T, bottom_element: T, elements: impl IntoIterator<Item = T>) -> Self {
        let mut class: BTreeSet<T> = elements.into_iter().collect();
        class.insert(top_element);
        class.insert(bottom_element);
        let mut hierarchy = Self {
            nodes: Vec::new(),
            element_index: HashMap::new(),
            top: NodeId(0),
            bottom: NodeId(0),
        };
        hierarchy.add_node(HierarchyNode::from_class(class));
        hierarchy
    }

    pub fn top_node(&self) -> NodeId {
        self.top
    }

    pub fn bottom_node(&self) -> NodeId {
        self.bottom
    }

    /// True when top and bottom coincide (the whole universe is one class).
    pub fn is_degenerate(&self) -> bool {
        self.top == self.bottom
    }

    pub fn node(&self, id: NodeId) -> &HierarchyNode<T> {
        &self.nodes[id.0]
    }

    /// The node an element was classified into, if the element belongs to
    /// this hierarchy's universe.
    pub fn node_for_element(&self, element: &T) -> Option<NodeId> {
        self.element_index.get(element).copied()
    }

    pub fn contains_element(&self, element: &T) -> bool {
        self.element_index.contains_key(element)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.element_index.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &HierarchyNode<T>> {
        self.nodes.iter()
    }

    pub fn elements(&self) -> impl Iterator<Item = &T> {
        self.element_index.keys()
    }

    /// All nodes reachable upwards from `id`, including `id` itself.
    pub fn ancestor_nodes(&self, id: NodeId) -> HashSet<NodeId> {
        self.reachable(id, |node| node.parent_nodes())
    }

    /// All nodes reachable downwards from `id`, including `id` itself.
    pub fn descendant_nodes(&self, id: NodeId) -> HashSet<NodeId> {
        self.reachable(id, |node| node.child_nodes())
    }

    /// Ancestors excluding the node itself; empty for the top node.
    pub fn proper_ancestor_nodes(&self, id: NodeId) -> HashSet<NodeId> {
        let mut ancestors = self.ancestor_nodes(id);
        ancestors.remove(&id);
        ancestors
    }

    /// Descendants excluding the node itself; empty for the bottom node.
    pub fn proper_descendant_nodes(&self, id: NodeId) -> HashSet<NodeId> {
        let mut descendants = self.descendant_nodes(id);
        descendants.remove(&id);
        descendants
    }

    fn reachable<'a, F>(&'a self, start: NodeId, next: F) -> HashSet<NodeId>
    where
        F: Fn(&'a HierarchyNode<T>) -> &'a HashSet<NodeId>,
    {
        let mut visited = HashSet::new();
        visited.insert(start);
        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            for &neighbour in next(self.node(current)) {
                if visited.insert(neighbour) {
                    queue.push_back(neighbour);
                }
            }
        }
        visited
    }

    /// Build a hierarchy from pre-computed nodes. Edges are wired afterwards
    /// with [`add_edge`](Self::add_edge); the element index is derived here.
    pub(crate) fn assemble(nodes: Vec<HierarchyNode<T>>, top: NodeId, bottom: NodeId) -> Self {
        let mut element_index = HashMap::new();
        for (index, node) in nodes.iter().enumerate() {
            for element in node.equivalent_elements() {
                element_index.insert(element.clone(), NodeId(index));
            }
        }
        Self {
            nodes,
            element_index,
            top,
            bottom,
        }
    }

    pub(crate) fn add_node(&mut self, node: HierarchyNode<T>) -> NodeId {
        let id = NodeId(self.nodes.len());
        for element in node.equivalent_elements() {
            self.element_index.insert(element.clone(), id);
        }
        self.nodes.push(node);
        id
    }

    pub(crate) fn add_edge(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].add_child(child);
        self.nodes[child.0].add_parent(parent);
    }

    pub(crate) fn remove_edge(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].remove_child(child);
        self.nodes[child.0].remove_parent(parent);
    }

    /// Merge an element into an existing node (the element turned out to be
    /// equivalent to that node's class).
    pub(crate) fn merge_element_into(&mut self, id: NodeId, element: T) {
        self.element_index.insert(element.clone(), id);
        self.nodes[id.0].add_equivalent(element);
    }

    /// Insert a fresh singleton node between the given parent and child
    /// nodes, removing the covering edges the new node now interposes.
    pub(crate) fn insert_between(
        &mut self,
        element: T,
        parents: &HashSet<NodeId>,
        children: &HashSet<NodeId>,
    ) -> NodeId {
        for &parent in parents {
            for &child in children {
                if self.node(parent).child_nodes().contains(&child) {
                    self.remove_edge(parent, child);
                }
            }
        }
        let id = self.add_node(HierarchyNode::singleton(element));
        for &parent in parents {
            self.add_edge(parent, id);
        }
        for &child in children {
            self.add_edge(id, child);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Hierarchy<&'static str> {
        // top -> {a, b} -> bottom
        let mut h = Hierarchy::trivial("top", "bottom");
        let top = h.top_node();
        let bottom = h.bottom_node();
        let parents: HashSet<NodeId> = [top].into_iter().collect();
        let children: HashSet<NodeId> = [bottom].into_iter().collect();
        h.insert_between("a", &parents, &children);
        h.insert_between("b", &parents, &children);
        h
    }

    #[test]
    fn test_trivial_hierarchy_shape() {
        let h = Hierarchy::trivial("top", "bottom");
        assert_eq!(h.node_count(), 2);
        assert!(!h.is_degenerate());
        assert!(h.node(h.top_node()).child_nodes().contains(&h.bottom_node()));
        assert!(h.node(h.bottom_node()).parent_nodes().contains(&h.top_node()));
        assert!(h.node(h.top_node()).parent_nodes().is_empty());
        assert!(h.node(h.bottom_node()).child_nodes().is_empty());
    }

    #[test]
    fn test_degenerate_hierarchy_contains_whole_universe() {
        let h = Hierarchy::degenerate("top", "bottom", vec!["a", "b"]);
        assert!(h.is_degenerate());
        assert_eq!(h.node_count(), 1);
        assert_eq!(h.top_node(), h.bottom_node());
        let node = h.node(h.top_node());
        assert_eq!(node.equivalent_elements().len(), 4);
        assert_eq!(h.node_for_element(&"a"), Some(h.top_node()));
    }

    #[test]
    fn test_insert_between_removes_covering_edge() {
        let h = diamond();
        let top = h.node(h.top_node());
        // top no longer covers bottom directly
        assert!(!top.child_nodes().contains(&h.bottom_node()));
        assert_eq!(top.child_nodes().len(), 2);
        let a = h.node_for_element(&"a").unwrap();
        assert!(h.node(a).parent_nodes().contains(&h.top_node()));
        assert!(h.node(a).child_nodes().contains(&h.bottom_node()));
    }

    #[test]
    fn test_ancestors_and_descendants() {
        let h = diamond();
        let a = h.node_for_element(&"a").unwrap();
        let ancestors = h.ancestor_nodes(a);
        assert!(ancestors.contains(&a));
        assert!(ancestors.contains(&h.top_node()));
        assert_eq!(ancestors.len(), 2);

        assert!(h.proper_ancestor_nodes(h.top_node()).is_empty());
        assert!(h.proper_descendant_nodes(h.bottom_node()).is_empty());

        let descendants = h.descendant_nodes(h.top_node());
        assert_eq!(descendants.len(), h.node_count());
    }
}
