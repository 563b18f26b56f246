//! Oracle-driven incremental hierarchy construction.
//!
//! Elements are inserted one by one into a growing hierarchy. Each
//! insertion locates the element with two monotone frontier searches (one
//! downwards from top for the parents, one upwards from bottom for the
//! children) and either merges it into an equivalent node or splices a new
//! node between the frontiers. Subsumption tests are delegated to a
//! caller-supplied relation, typically backed by an expensive oracle.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

use mimizuku_core::InterruptFlag;

use crate::hierarchy::Hierarchy;
use crate::node::NodeId;
use crate::HierarchyError;

/// Where an element sits relative to an existing hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// The element belongs to an existing node's equivalence class.
    Equivalent(NodeId),
    /// The element lies strictly between these parent and child nodes.
    Between {
        parents: HashSet<NodeId>,
        children: HashSet<NodeId>,
    },
}

/// Monotone frontier search over a successor relation.
///
/// The start nodes are assumed to satisfy the predicate and are never
/// tested. The search expands only successors for which the predicate
/// holds and returns every visited node without a true successor. Answers
/// are memoized, so each reached node is tested at most once; successors of
/// a failed node are never reached through it.
pub fn search<U, FS, FP>(
    start: Vec<U>,
    mut successors: FS,
    mut holds: FP,
) -> Result<HashSet<U>, HierarchyError>
where
    U: Clone + Eq + Hash,
    FS: FnMut(&U) -> Vec<U>,
    FP: FnMut(&U) -> Result<bool, HierarchyError>,
{
    let mut answers: HashMap<U, bool> = HashMap::new();
    let mut visited: HashSet<U> = start.iter().cloned().collect();
    let mut queue: VecDeque<U> = start.into_iter().collect();
    let mut frontier = HashSet::new();
    while let Some(current) = queue.pop_front() {
        let mut expanded = false;
        for successor in successors(&current) {
            let answer = match answers.get(&successor) {
                Some(&answer) => answer,
                None => {
                    let answer = holds(&successor)?;
                    answers.insert(successor.clone(), answer);
                    answer
                }
            };
            if answer {
                expanded = true;
                if visited.insert(successor.clone()) {
                    queue.push_back(successor);
                }
            }
        }
        if !expanded {
            frontier.insert(current);
        }
    }
    Ok(frontier)
}

/// Incremental hierarchy builder over a subsumption relation.
///
/// `relation(parent, child)` answers whether `parent` subsumes `child`.
/// The relation may be called in any order and must answer consistently
/// with a preorder; it is polled against the interrupt flag before every
/// call, and an interruption discards all partial state.
pub struct HierarchyBuilder<'a, F> {
    relation: F,
    interrupt: InterruptFlag,
    progress: Option<&'a mut dyn FnMut(usize, usize)>,
}

impl<'a, F> HierarchyBuilder<'a, F> {
    pub fn new(relation: F) -> Self {
        Self {
            relation,
            interrupt: InterruptFlag::new(),
            progress: None,
        }
    }

    /// Share an interrupt flag with the caller so a long classification can
    /// be cancelled from another thread.
    pub fn with_interrupt(mut self, interrupt: InterruptFlag) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Report `(processed, total)` after every element.
    pub fn with_progress(mut self, progress: &'a mut dyn FnMut(usize, usize)) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Classify `elements` into a hierarchy between `top` and `bottom`.
    ///
    /// Elements equal to top or bottom, and duplicate elements, are skipped.
    pub fn build<T>(
        mut self,
        top: T,
        bottom: T,
        elements: impl IntoIterator<Item = T>,
    ) -> Result<Hierarchy<T>, HierarchyError>
    where
        T: Clone + Eq + Hash + Ord,
        F: FnMut(&T, &T) -> Result<bool, HierarchyError>,
    {
        let elements: Vec<T> = elements.into_iter().collect();
        let total = elements.len();
        let mut hierarchy = Hierarchy::trivial(top, bottom);
        for (done, element) in elements.into_iter().enumerate() {
            if !hierarchy.contains_element(&element) {
                match self.find_position(&hierarchy, &element)? {
                    Position::Equivalent(node) => hierarchy.merge_element_into(node, element),
                    Position::Between { parents, children } => {
                        hierarchy.insert_between(element, &parents, &children);
                    }
                }
            }
            if let Some(progress) = self.progress.as_deref_mut() {
                progress(done + 1, total);
            }
        }
        Ok(hierarchy)
    }

    /// Locate an element relative to an existing hierarchy without
    /// modifying it.
    ///
    /// Runs the downward parent search first; when it yields a single
    /// parent node that the element subsumes back, the element is
    /// equivalent to that node and the upward search is skipped entirely.
    pub fn find_position<T>(
        &mut self,
        hierarchy: &Hierarchy<T>,
        element: &T,
    ) -> Result<Position, HierarchyError>
    where
        T: Clone + Eq + Hash + Ord,
        F: FnMut(&T, &T) -> Result<bool, HierarchyError>,
    {
        let relation = &mut self.relation;
        let interrupt = &self.interrupt;
        let mut ask = |parent: &T, child: &T| -> Result<bool, HierarchyError> {
            if interrupt.is_interrupted() {
                return Err(HierarchyError::Interrupted);
            }
            relation(parent, child)
        };

        // Deepest nodes that still subsume the element.
        let parents = search(
            vec![hierarchy.top_node()],
            |id| hierarchy.node(*id).child_nodes().iter().copied().collect(),
            |id| ask(hierarchy.node(*id).representative(), element),
        )?;

        if parents.len() == 1 {
            let parent = *parents
                .iter()
                .next()
                .ok_or_else(|| HierarchyError::Internal("empty parent frontier".into()))?;
            if ask(element, hierarchy.node(parent).representative())? {
                return Ok(Position::Equivalent(parent));
            }
        }

        // Highest nodes the element itself subsumes.
        let children = search(
            vec![hierarchy.bottom_node()],
            |id| hierarchy.node(*id).parent_nodes().iter().copied().collect(),
            |id| ask(element, hierarchy.node(*id).representative()),
        )?;

        if parents == children {
            let node = *parents
                .iter()
                .next()
                .ok_or_else(|| HierarchyError::Internal("empty search frontier".into()))?;
            return Ok(Position::Equivalent(node));
        }
        Ok(Position::Between { parents, children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deterministic::{DeterministicHierarchyBuilder, GraphNode};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    const TOP: &str = "top";
    const BOTTOM: &str = "bottom";

    /// Table-driven subsumption: `subsumers[c]` lists the strict and
    /// non-strict subsumers of `c` (transitively closed).
    fn table_relation<'t>(
        table: &'t HashMap<&'static str, HashSet<&'static str>>,
    ) -> impl FnMut(&&'static str, &&'static str) -> Result<bool, HierarchyError> + 't {
        move |parent, child| {
            Ok(*child == BOTTOM
                || *parent == TOP
                || *parent == *child
                || table
                    .get(child)
                    .map(|s| s.contains(parent))
                    .unwrap_or(false))
        }
    }

    fn table(entries: &[(&'static str, &[&'static str])]) -> HashMap<&'static str, HashSet<&'static str>> {
        entries
            .iter()
            .map(|(element, supers)| (*element, supers.iter().copied().collect()))
            .collect()
    }

    #[test]
    fn test_incremental_build_matches_expected_shape() {
        // B and C strictly below A.
        let table = table(&[("B", &["A"]), ("C", &["A"])]);
        let hierarchy = HierarchyBuilder::new(table_relation(&table))
            .build(TOP, BOTTOM, vec!["A", "B", "C"])
            .unwrap();

        assert_eq!(hierarchy.node_count(), 5);
        let a = hierarchy.node_for_element(&"A").unwrap();
        let b = hierarchy.node_for_element(&"B").unwrap();
        let c = hierarchy.node_for_element(&"C").unwrap();
        assert_eq!(
            hierarchy.node(hierarchy.top_node()).child_nodes(),
            &[a].into_iter().collect()
        );
        assert_eq!(hierarchy.node(a).child_nodes(), &[b, c].into_iter().collect());
        assert_eq!(
            hierarchy.node(b).child_nodes(),
            &[hierarchy.bottom_node()].into_iter().collect()
        );
    }

    #[test]
    fn test_insertion_order_does_not_change_shape() {
        let table = table(&[("B", &["A"]), ("C", &["A"])]);
        let forwards = HierarchyBuilder::new(table_relation(&table))
            .build(TOP, BOTTOM, vec!["A", "B", "C"])
            .unwrap();
        let backwards = HierarchyBuilder::new(table_relation(&table))
            .build(TOP, BOTTOM, vec!["C", "B", "A"])
            .unwrap();

        for element in ["A", "B", "C"] {
            assert_eq!(
                ancestor_elements(&forwards, &element),
                ancestor_elements(&backwards, &element),
                "ancestors of {element} differ"
            );
        }
    }

    #[test]
    fn test_equivalent_elements_merge_into_one_node() {
        // A and B subsume each other; C strictly below both.
        let table = table(&[("A", &["B"]), ("B", &["A"]), ("C", &["A", "B"])]);
        let hierarchy = HierarchyBuilder::new(table_relation(&table))
            .build(TOP, BOTTOM, vec!["A", "B", "C"])
            .unwrap();

        let ab = hierarchy.node_for_element(&"A").unwrap();
        assert_eq!(hierarchy.node_for_element(&"B"), Some(ab));
        assert_eq!(hierarchy.node(ab).equivalent_elements().len(), 2);
        let c = hierarchy.node_for_element(&"C").unwrap();
        assert!(hierarchy.node(ab).child_nodes().contains(&c));
        assert_eq!(hierarchy.node_count(), 4);
    }

    #[test]
    fn test_unsatisfiable_element_merges_into_bottom() {
        // X is subsumed by everything, including bottom.
        let table = table(&[("A", &[]), ("X", &["A", "bottom"])]);
        let hierarchy = HierarchyBuilder::new(table_relation(&table))
            .build(TOP, BOTTOM, vec!["A", "X"])
            .unwrap();

        assert_eq!(
            hierarchy.node_for_element(&"X"),
            Some(hierarchy.bottom_node())
        );
        assert!(!hierarchy.is_degenerate());
    }

    #[test]
    fn test_element_equivalent_to_top_merges_into_top() {
        let table = table(&[("top", &["Y"]), ("A", &[])]);
        let hierarchy = HierarchyBuilder::new(table_relation(&table))
            .build(TOP, BOTTOM, vec!["Y", "A"])
            .unwrap();

        assert_eq!(hierarchy.node_for_element(&"Y"), Some(hierarchy.top_node()));
        assert!(hierarchy.node(hierarchy.top_node()).contains(&"Y"));
    }

    #[test]
    fn test_failed_branches_are_not_descended() {
        // Two siblings A and B under top, each with one child. Locating an
        // element below A must never query B's subtree.
        let table = table(&[("A1", &["A"]), ("B1", &["B"]), ("E", &["A"])]);
        let hierarchy = HierarchyBuilder::new(table_relation(&table))
            .build(TOP, BOTTOM, vec!["A", "B", "A1", "B1"])
            .unwrap();

        let mut log: Vec<(&str, &str)> = Vec::new();
        let mut inner = table_relation(&table);
        let mut builder = HierarchyBuilder::new(|parent: &&'static str, child: &&'static str| {
            log.push((*parent, *child));
            inner(parent, child)
        });
        let position = builder.find_position(&hierarchy, &"E").unwrap();
        drop(builder);

        let a = hierarchy.node_for_element(&"A").unwrap();
        match position {
            Position::Between { parents, .. } => {
                assert_eq!(parents, [a].into_iter().collect());
            }
            other => panic!("unexpected position: {other:?}"),
        }
        // B failed the downward test, so B1 is never tested downwards.
        assert!(log.contains(&("B", "E")));
        assert!(!log.contains(&("B1", "E")));
        // Memoization: no query pair is asked twice.
        let unique: HashSet<_> = log.iter().collect();
        assert_eq!(unique.len(), log.len());
    }

    #[test]
    fn test_interrupt_aborts_and_discards_state() {
        let table = table(&[("B", &["A"])]);
        let interrupt = InterruptFlag::new();
        interrupt.interrupt();
        let result = HierarchyBuilder::new(table_relation(&table))
            .with_interrupt(interrupt)
            .build(TOP, BOTTOM, vec!["A", "B"]);
        assert_eq!(result.unwrap_err(), HierarchyError::Interrupted);
    }

    #[test]
    fn test_progress_is_reported_per_element() {
        let table = table(&[("B", &["A"])]);
        let mut reports = Vec::new();
        let mut progress = |done: usize, total: usize| reports.push((done, total));
        HierarchyBuilder::new(table_relation(&table))
            .with_progress(&mut progress)
            .build(TOP, BOTTOM, vec!["A", "B", "A"])
            .unwrap();
        assert_eq!(reports, vec![(1, 3), (2, 3), (3, 3)]);
    }

    /// All elements strictly above `element`, pooled over ancestor nodes.
    fn ancestor_elements<T: Clone + Eq + std::hash::Hash + Ord>(
        hierarchy: &Hierarchy<T>,
        element: &T,
    ) -> BTreeSet<T> {
        let id = hierarchy.node_for_element(element).unwrap();
        hierarchy
            .proper_ancestor_nodes(id)
            .into_iter()
            .flat_map(|a| hierarchy.node(a).equivalent_elements().iter().cloned())
            .collect()
    }

    fn equivalent_elements<T: Clone + Eq + std::hash::Hash + Ord>(
        hierarchy: &Hierarchy<T>,
        element: &T,
    ) -> BTreeSet<T> {
        let id = hierarchy.node_for_element(element).unwrap();
        hierarchy.node(id).equivalent_elements().iter().cloned().collect()
    }

    proptest! {
        /// The deterministic and the oracle-driven builder agree on the
        /// bitmask-subset lattice, up to transitive closure.
        #[test]
        fn prop_fast_and_generic_paths_agree(masks in proptest::collection::vec(0u8..=15, 0..12)) {
            const MASK_TOP: u8 = 0x0F;
            const MASK_BOTTOM: u8 = 0x00;
            let universe: HashSet<u8> = masks.iter().copied().collect();

            let mut deterministic = DeterministicHierarchyBuilder::new(MASK_TOP, MASK_BOTTOM);
            for &mask in &universe {
                let supers: HashSet<u8> = universe
                    .iter()
                    .copied()
                    .chain([MASK_TOP, MASK_BOTTOM])
                    .filter(|&s| mask & s == mask)
                    .collect();
                deterministic.add_node(GraphNode::new(mask, supers));
            }
            let fast = deterministic.build();

            let generic = HierarchyBuilder::new(|parent: &u8, child: &u8| Ok(*child & *parent == *child))
                .build(MASK_TOP, MASK_BOTTOM, masks.clone())
                .unwrap();

            for mask in universe.iter().chain([&MASK_TOP, &MASK_BOTTOM]) {
                prop_assert_eq!(
                    equivalent_elements(&fast, mask),
                    equivalent_elements(&generic, mask)
                );
                prop_assert_eq!(
                    ancestor_elements(&fast, mask),
                    ancestor_elements(&generic, mask)
                );
            }
        }
    }
}
