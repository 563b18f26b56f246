//! Deterministic hierarchy construction from complete subsumer sets.
//!
//! When every element's full subsumer set is already known (the cheap,
//! deterministic case) the hierarchy can be built without a single oracle
//! call: group mutually subsuming elements into equivalence classes, then
//! take the transitive reduction of the induced strict order.

use itertools::Itertools;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use crate::hierarchy::Hierarchy;
use crate::node::{HierarchyNode, NodeId};

/// One classified element together with its complete subsumer set.
#[derive(Debug, Clone)]
pub struct GraphNode<T> {
    element: T,
    known_subsumers: HashSet<T>,
}

impl<T> GraphNode<T> {
    /// `known_subsumers` must be transitively closed and complete; it need
    /// not list the element itself or top, those are added during
    /// normalization.
    pub fn new(element: T, known_subsumers: HashSet<T>) -> Self {
        Self {
            element,
            known_subsumers,
        }
    }

    pub fn element(&self) -> &T {
        &self.element
    }
}

/// Builds a [`Hierarchy`] from complete subsumer sets, with zero oracle
/// calls.
#[derive(Debug)]
pub struct DeterministicHierarchyBuilder<T> {
    top: T,
    bottom: T,
    subsumers: HashMap<T, HashSet<T>>,
}

impl<T: Clone + Eq + Hash + Ord> DeterministicHierarchyBuilder<T> {
    pub fn new(top: T, bottom: T) -> Self {
        Self {
            top,
            bottom,
            subsumers: HashMap::new(),
        }
    }

    pub fn add_node(&mut self, node: GraphNode<T>) {
        self.subsumers.insert(node.element, node.known_subsumers);
    }

    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = GraphNode<T>>) -> Self {
        for node in nodes {
            self.add_node(node);
        }
        self
    }

    /// Construct the hierarchy. Elements whose subsumer set covers the whole
    /// universe collapse into the bottom node; if top itself collapses into
    /// bottom the result is the degenerate one-node hierarchy.
    pub fn build(mut self) -> Hierarchy<T> {
        let universe: HashSet<T> = self
            .subsumers
            .keys()
            .cloned()
            .chain([self.top.clone(), self.bottom.clone()])
            .collect();

        // Normalize: restrict to the universe, every element subsumes
        // itself, top subsumes everything, everything subsumes bottom.
        for element in &universe {
            let set = self
                .subsumers
                .entry(element.clone())
                .or_insert_with(HashSet::new);
            set.retain(|s| universe.contains(s));
            set.insert(element.clone());
            set.insert(self.top.clone());
        }
        self.subsumers
            .insert(self.bottom.clone(), universe.clone());

        // Equivalence classes: mutual membership of subsumer sets. Sorted
        // iteration keeps class numbering deterministic.
        let mut class_of: HashMap<&T, usize> = HashMap::new();
        let mut classes: Vec<BTreeSet<T>> = Vec::new();
        for element in universe.iter().sorted() {
            if class_of.contains_key(element) {
                continue;
            }
            let class: BTreeSet<T> = self.subsumers[element]
                .iter()
                .filter(|s| self.subsumers[*s].contains(element))
                .cloned()
                .collect();
            let index = classes.len();
            for member in &class {
                if let Some(member) = universe.get(member) {
                    class_of.insert(member, index);
                }
            }
            classes.push(class);
        }

        let top_class = class_of[&self.top];
        let bottom_class = class_of[&self.bottom];
        if top_class == bottom_class {
            return Hierarchy::degenerate(self.top, self.bottom, universe);
        }

        // Strict superclasses per class, via any representative.
        let strict_supers: Vec<HashSet<usize>> = classes
            .iter()
            .enumerate()
            .map(|(index, class)| {
                let representative = class.iter().next().expect("classes are never empty");
                self.subsumers[representative]
                    .iter()
                    .map(|s| class_of[s])
                    .filter(|&s| s != index)
                    .collect()
            })
            .collect();

        let nodes: Vec<HierarchyNode<T>> = classes.into_iter().map(HierarchyNode::from_class).collect();
        let mut hierarchy =
            Hierarchy::assemble(nodes, NodeId(top_class), NodeId(bottom_class));

        // Transitive reduction: keep only covering edges, i.e. parents not
        // reachable through another strict superclass.
        for (index, supers) in strict_supers.iter().enumerate() {
            for &parent in supers {
                let covered = supers
                    .iter()
                    .any(|&mid| mid != parent && strict_supers[mid].contains(&parent));
                if !covered {
                    hierarchy.add_edge(NodeId(parent), NodeId(index));
                }
            }
        }
        hierarchy
    }
}
