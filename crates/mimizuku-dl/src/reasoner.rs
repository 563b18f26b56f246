//! 分類リーナー

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use tracing::{info, warn};

use mimizuku_core::{AtomicConcept, AtomicRole, Individual, InterruptFlag, Role};
use mimizuku_hierarchy::{
    DeterministicHierarchyBuilder, GraphNode, Hierarchy, HierarchyBuilder, HierarchyError, NodeId,
    Position,
};

use crate::ontology::DlOntology;
use crate::oracle::{InstanceOracle, SubsumptionOracle};
use crate::DlError;

/// Observer for long-running reasoning tasks.
pub trait ProgressMonitor {
    fn task_started(&mut self, task: &str);
    fn task_progress(&mut self, done: usize, total: usize);
    fn task_ended(&mut self);
}

/// The reasoner: owns the ontology, an oracle backend and the computed
/// hierarchies.
///
/// Classification and realization are one-shot per reasoner instance;
/// repeated calls return the cached result.
pub struct Reasoner<O> {
    ontology: DlOntology,
    pub(crate) oracle: O,
    pub(crate) interrupt: InterruptFlag,
    monitor: Option<Box<dyn ProgressMonitor>>,
    pub(crate) concept_hierarchy: Option<Hierarchy<AtomicConcept>>,
    object_role_hierarchy: Option<Hierarchy<Role>>,
    data_role_hierarchy: Option<Hierarchy<AtomicRole>>,
    pub(crate) direct_types: Option<HashMap<Individual, HashSet<NodeId>>>,
    pub(crate) direct_instances: Option<HashMap<AtomicConcept, HashSet<Individual>>>,
}

impl<O> Reasoner<O>
where
    O: SubsumptionOracle<AtomicConcept>
        + SubsumptionOracle<Role>
        + SubsumptionOracle<AtomicRole>
        + InstanceOracle,
{
    pub fn new(ontology: DlOntology, oracle: O) -> Self {
        Self {
            ontology,
            oracle,
            interrupt: InterruptFlag::new(),
            monitor: None,
            concept_hierarchy: None,
            object_role_hierarchy: None,
            data_role_hierarchy: None,
            direct_types: None,
            direct_instances: None,
        }
    }

    pub fn with_interrupt(mut self, interrupt: InterruptFlag) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn with_monitor(mut self, monitor: Box<dyn ProgressMonitor>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// A clone of the interrupt flag, for cancelling from another thread.
    pub fn interrupt_flag(&self) -> InterruptFlag {
        self.interrupt.clone()
    }

    pub fn ontology(&self) -> &DlOntology {
        &self.ontology
    }

    /// Compute the concept hierarchy. Idempotent.
    pub fn classify(&mut self) -> Result<(), DlError> {
        if self.concept_hierarchy.is_some() {
            return Ok(());
        }
        let elements: Vec<AtomicConcept> = self
            .ontology
            .concepts
            .iter()
            .filter(|c| !c.iri().is_internal())
            .cloned()
            .collect();
        info!(concepts = elements.len(), "classifying concept hierarchy");
        if let Some(m) = self.monitor.as_deref_mut() {
            m.task_started("concept classification");
        }
        let hierarchy = classify_universe(
            &mut self.oracle,
            &self.interrupt,
            self.monitor.as_deref_mut(),
            AtomicConcept::thing(),
            AtomicConcept::nothing(),
            elements,
        )?;
        if let Some(m) = self.monitor.as_deref_mut() {
            m.task_ended();
        }
        info!(nodes = hierarchy.node_count(), "concept classification finished");
        self.concept_hierarchy = Some(hierarchy);
        Ok(())
    }

    /// Compute the object role hierarchy over atomic roles and their
    /// inverses. Idempotent.
    pub fn classify_object_roles(&mut self) -> Result<(), DlError> {
        if self.object_role_hierarchy.is_some() {
            return Ok(());
        }
        let mut elements: Vec<Role> = Vec::new();
        for role in &self.ontology.object_roles {
            if role.iri().is_internal() {
                continue;
            }
            elements.push(Role::Atomic(role.clone()));
            elements.push(Role::Inverse(role.clone()));
        }
        info!(roles = elements.len(), "classifying object role hierarchy");
        if let Some(m) = self.monitor.as_deref_mut() {
            m.task_started("object role classification");
        }
        let hierarchy = classify_universe(
            &mut self.oracle,
            &self.interrupt,
            self.monitor.as_deref_mut(),
            Role::Atomic(AtomicRole::top_object_role()),
            Role::Atomic(AtomicRole::bottom_object_role()),
            elements,
        )?;
        if let Some(m) = self.monitor.as_deref_mut() {
            m.task_ended();
        }
        self.object_role_hierarchy = Some(hierarchy);
        Ok(())
    }

    /// Compute the data role hierarchy. Idempotent.
    pub fn classify_data_roles(&mut self) -> Result<(), DlError> {
        if self.data_role_hierarchy.is_some() {
            return Ok(());
        }
        let elements: Vec<AtomicRole> = self
            .ontology
            .data_roles
            .iter()
            .filter(|r| !r.iri().is_internal())
            .cloned()
            .collect();
        info!(roles = elements.len(), "classifying data role hierarchy");
        if let Some(m) = self.monitor.as_deref_mut() {
            m.task_started("data role classification");
        }
        let hierarchy = classify_universe(
            &mut self.oracle,
            &self.interrupt,
            self.monitor.as_deref_mut(),
            AtomicRole::top_data_role(),
            AtomicRole::bottom_data_role(),
            elements,
        )?;
        if let Some(m) = self.monitor.as_deref_mut() {
            m.task_ended();
        }
        self.data_role_hierarchy = Some(hierarchy);
        Ok(())
    }

    pub fn concept_hierarchy(&mut self) -> Result<&Hierarchy<AtomicConcept>, DlError> {
        self.classify()?;
        self.concept_hierarchy_ref()
    }

    pub fn object_role_hierarchy(&mut self) -> Result<&Hierarchy<Role>, DlError> {
        self.classify_object_roles()?;
        self.object_role_hierarchy
            .as_ref()
            .ok_or_else(|| DlError::Internal("object role hierarchy missing".to_string()))
    }

    pub fn data_role_hierarchy(&mut self) -> Result<&Hierarchy<AtomicRole>, DlError> {
        self.classify_data_roles()?;
        self.data_role_hierarchy
            .as_ref()
            .ok_or_else(|| DlError::Internal("data role hierarchy missing".to_string()))
    }

    pub(crate) fn concept_hierarchy_ref(&self) -> Result<&Hierarchy<AtomicConcept>, DlError> {
        self.concept_hierarchy
            .as_ref()
            .ok_or_else(|| DlError::Internal("concept hierarchy missing".to_string()))
    }

    /// Concepts equivalent to `concept`, itself included.
    pub fn equivalent_concepts(
        &mut self,
        concept: &AtomicConcept,
    ) -> Result<BTreeSet<AtomicConcept>, DlError> {
        let placement = self.place_concept(concept)?;
        let hierarchy = self.concept_hierarchy_ref()?;
        Ok(match placement.node {
            Some(node) => hierarchy.node(node).equivalent_elements().clone(),
            None => [concept.clone()].into_iter().collect(),
        })
    }

    /// Super concepts of `concept`; only covering parents when `direct`.
    pub fn super_concepts(
        &mut self,
        concept: &AtomicConcept,
        direct: bool,
    ) -> Result<BTreeSet<AtomicConcept>, DlError> {
        let placement = self.place_concept(concept)?;
        let hierarchy = self.concept_hierarchy_ref()?;
        let ids: HashSet<NodeId> = match (placement.node, direct) {
            (Some(node), true) => hierarchy.node(node).parent_nodes().clone(),
            (Some(node), false) => hierarchy.proper_ancestor_nodes(node),
            (None, true) => placement.parents,
            (None, false) => placement
                .parents
                .iter()
                .flat_map(|&p| hierarchy.ancestor_nodes(p))
                .collect(),
        };
        Ok(pool_elements(hierarchy, &ids))
    }

    /// Sub concepts of `concept`; only covering children when `direct`.
    pub fn sub_concepts(
        &mut self,
        concept: &AtomicConcept,
        direct: bool,
    ) -> Result<BTreeSet<AtomicConcept>, DlError> {
        let placement = self.place_concept(concept)?;
        let hierarchy = self.concept_hierarchy_ref()?;
        let ids: HashSet<NodeId> = match (placement.node, direct) {
            (Some(node), true) => hierarchy.node(node).child_nodes().clone(),
            (Some(node), false) => hierarchy.proper_descendant_nodes(node),
            (None, true) => placement.children,
            (None, false) => placement
                .children
                .iter()
                .flat_map(|&c| hierarchy.descendant_nodes(c))
                .collect(),
        };
        Ok(pool_elements(hierarchy, &ids))
    }

    /// A concept is satisfiable iff it does not sit in the bottom node.
    pub fn is_concept_satisfiable(&mut self, concept: &AtomicConcept) -> Result<bool, DlError> {
        let placement = self.place_concept(concept)?;
        let hierarchy = self.concept_hierarchy_ref()?;
        Ok(placement.node != Some(hierarchy.bottom_node()))
    }

    /// Every named concept equivalent to owl:Nothing.
    pub fn unsatisfiable_concepts(&mut self) -> Result<BTreeSet<AtomicConcept>, DlError> {
        self.classify()?;
        let hierarchy = self.concept_hierarchy_ref()?;
        let mut bottom = hierarchy
            .node(hierarchy.bottom_node())
            .equivalent_elements()
            .clone();
        bottom.remove(&AtomicConcept::nothing());
        Ok(bottom)
    }

    /// Whether `sub ⊑ sup` is entailed. Answered from the hierarchy when
    /// both concepts are classified, from the oracle otherwise.
    pub fn is_subsumption_entailed(
        &mut self,
        sub: &AtomicConcept,
        sup: &AtomicConcept,
    ) -> Result<bool, DlError> {
        self.classify()?;
        let hierarchy = self.concept_hierarchy_ref()?;
        if let (Some(sub_node), Some(sup_node)) = (
            hierarchy.node_for_element(sub),
            hierarchy.node_for_element(sup),
        ) {
            return Ok(hierarchy.ancestor_nodes(sub_node).contains(&sup_node));
        }
        let entailed = self.oracle.is_subsumed_by(sub, sup)?;
        Ok(entailed)
    }

    /// Super roles of an object role expression.
    pub fn super_object_roles(
        &mut self,
        role: &Role,
        direct: bool,
    ) -> Result<BTreeSet<Role>, DlError> {
        self.classify_object_roles()?;
        let hierarchy = self
            .object_role_hierarchy
            .as_ref()
            .ok_or_else(|| DlError::Internal("object role hierarchy missing".to_string()))?;
        let node = hierarchy
            .node_for_element(role)
            .ok_or_else(|| DlError::UnknownElement(role.to_string()))?;
        let ids = if direct {
            hierarchy.node(node).parent_nodes().clone()
        } else {
            hierarchy.proper_ancestor_nodes(node)
        };
        Ok(pool_elements(hierarchy, &ids))
    }

    /// Object roles equivalent to `role`, itself included.
    pub fn equivalent_object_roles(&mut self, role: &Role) -> Result<BTreeSet<Role>, DlError> {
        self.classify_object_roles()?;
        let hierarchy = self
            .object_role_hierarchy
            .as_ref()
            .ok_or_else(|| DlError::Internal("object role hierarchy missing".to_string()))?;
        let node = hierarchy
            .node_for_element(role)
            .ok_or_else(|| DlError::UnknownElement(role.to_string()))?;
        Ok(hierarchy.node(node).equivalent_elements().clone())
    }

    /// Locate a concept in the classified hierarchy, synthesizing a
    /// transient placement for concepts outside the universe.
    fn place_concept(&mut self, concept: &AtomicConcept) -> Result<ConceptPlacement, DlError> {
        self.classify()?;
        let hierarchy = self.concept_hierarchy_ref()?;
        if let Some(node) = hierarchy.node_for_element(concept) {
            return Ok(ConceptPlacement::known(node));
        }
        if hierarchy.is_degenerate() {
            // Everything is unsatisfiable, including the query concept.
            return Ok(ConceptPlacement::known(hierarchy.top_node()));
        }
        let hierarchy = self
            .concept_hierarchy
            .as_ref()
            .ok_or_else(|| DlError::Internal("concept hierarchy missing".to_string()))?;
        let oracle = &mut self.oracle;
        let mut builder = HierarchyBuilder::new(|parent: &AtomicConcept, child: &AtomicConcept| {
            oracle
                .is_subsumed_by(child, parent)
                .map_err(|e| HierarchyError::Oracle(e.to_string()))
        })
        .with_interrupt(self.interrupt.clone());
        match builder.find_position(hierarchy, concept)? {
            Position::Equivalent(node) => Ok(ConceptPlacement::known(node)),
            Position::Between { parents, children } => Ok(ConceptPlacement {
                node: None,
                parents,
                children,
            }),
        }
    }
}

struct ConceptPlacement {
    node: Option<NodeId>,
    parents: HashSet<NodeId>,
    children: HashSet<NodeId>,
}

impl ConceptPlacement {
    fn known(node: NodeId) -> Self {
        Self {
            node: Some(node),
            parents: HashSet::new(),
            children: HashSet::new(),
        }
    }
}

fn pool_elements<T: Clone + Eq + Hash + Ord>(
    hierarchy: &Hierarchy<T>,
    ids: &HashSet<NodeId>,
) -> BTreeSet<T> {
    ids.iter()
        .flat_map(|&id| hierarchy.node(id).equivalent_elements().iter().cloned())
        .collect()
}

/// Classify one universe: degenerate shortcut, then the deterministic path
/// when every subsumer set is cheaply available, then the oracle-driven
/// path.
fn classify_universe<T, O>(
    oracle: &mut O,
    interrupt: &InterruptFlag,
    mut monitor: Option<&mut (dyn ProgressMonitor + '_)>,
    top: T,
    bottom: T,
    elements: Vec<T>,
) -> Result<Hierarchy<T>, DlError>
where
    T: Clone + Eq + Hash + Ord,
    O: SubsumptionOracle<T>,
{
    if interrupt.is_interrupted() {
        return Err(DlError::Interrupted);
    }
    if !oracle.is_satisfiable(&top)? {
        warn!("top element is unsatisfiable, producing the degenerate hierarchy");
        return Ok(Hierarchy::degenerate(top, bottom, elements));
    }
    if oracle.subsumers_are_cheap() {
        match deterministic_universe(oracle, interrupt, &top, &bottom, &elements)? {
            Some(hierarchy) => return Ok(hierarchy),
            None => warn!("subsumer sets unavailable, falling back to oracle-driven classification"),
        }
    }
    let mut progress = |done: usize, total: usize| {
        if let Some(m) = monitor.as_deref_mut() {
            m.task_progress(done, total);
        }
    };
    let relation = |parent: &T, child: &T| {
        oracle
            .is_subsumed_by(child, parent)
            .map_err(|e| HierarchyError::Oracle(e.to_string()))
    };
    let hierarchy = HierarchyBuilder::new(relation)
        .with_interrupt(interrupt.clone())
        .with_progress(&mut progress)
        .build(top, bottom, elements)?;
    Ok(hierarchy)
}

/// Deterministic path. All-or-nothing: if any element's subsumer set is
/// unavailable the whole attempt is abandoned and `None` returned.
fn deterministic_universe<T, O>(
    oracle: &mut O,
    interrupt: &InterruptFlag,
    top: &T,
    bottom: &T,
    elements: &[T],
) -> Result<Option<Hierarchy<T>>, DlError>
where
    T: Clone + Eq + Hash + Ord,
    O: SubsumptionOracle<T>,
{
    let universal: HashSet<T> = elements
        .iter()
        .cloned()
        .chain([top.clone(), bottom.clone()])
        .collect();
    let mut nodes = Vec::with_capacity(elements.len() + 1);
    // Top participates so elements told-equivalent to it merge into its node.
    for element in elements.iter().chain([top]) {
        if interrupt.is_interrupted() {
            return Err(DlError::Interrupted);
        }
        let subsumers = if oracle.is_satisfiable(element)? {
            oracle.known_subsumers(element)?
        } else {
            // Unsatisfiable elements are subsumed by everything.
            Some(universal.clone())
        };
        match subsumers {
            Some(set) => nodes.push(GraphNode::new(element.clone(), set)),
            None => return Ok(None),
        }
    }
    let hierarchy = DeterministicHierarchyBuilder::new(top.clone(), bottom.clone())
        .with_nodes(nodes)
        .build();
    Ok(Some(hierarchy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::DlAxiom;
    use crate::oracle::OracleError;
    use crate::told::ToldOracle;
    use std::rc::Rc;
    use std::sync::Mutex;

    fn concept(name: &str) -> AtomicConcept {
        AtomicConcept::new(format!("ex:{name}"))
    }

    fn animals_ontology() -> DlOntology {
        let mut ontology = DlOntology::new();
        ontology.add_axiom(DlAxiom::ConceptInclusion(concept("Dog"), concept("Animal")));
        ontology.add_axiom(DlAxiom::ConceptInclusion(concept("Cat"), concept("Animal")));
        ontology.add_axiom(DlAxiom::ConceptEquivalence(concept("Dog"), concept("Canine")));
        ontology.add_axiom(DlAxiom::ConceptInclusion(concept("Broken"), AtomicConcept::nothing()));
        ontology
    }

    fn reasoner(ontology: DlOntology) -> Reasoner<ToldOracle> {
        let oracle = ToldOracle::from_ontology(&ontology).unwrap();
        Reasoner::new(ontology, oracle)
    }

    #[test]
    fn test_classify_builds_expected_concept_hierarchy() {
        let mut reasoner = reasoner(animals_ontology());
        assert_eq!(
            reasoner.super_concepts(&concept("Dog"), true).unwrap(),
            [concept("Animal")].into_iter().collect()
        );
        assert_eq!(
            reasoner.super_concepts(&concept("Dog"), false).unwrap(),
            [concept("Animal"), AtomicConcept::thing()].into_iter().collect()
        );
        assert_eq!(
            reasoner.equivalent_concepts(&concept("Dog")).unwrap(),
            [concept("Dog"), concept("Canine")].into_iter().collect()
        );
        let subs = reasoner.sub_concepts(&concept("Animal"), true).unwrap();
        assert!(subs.contains(&concept("Dog")));
        assert!(subs.contains(&concept("Cat")));
        assert!(!subs.contains(&concept("Broken")));
    }

    #[test]
    fn test_unsatisfiable_concept_sits_in_the_bottom_node() {
        let mut reasoner = reasoner(animals_ontology());
        assert!(!reasoner.is_concept_satisfiable(&concept("Broken")).unwrap());
        assert!(reasoner.is_concept_satisfiable(&concept("Dog")).unwrap());
        assert_eq!(
            reasoner.unsatisfiable_concepts().unwrap(),
            [concept("Broken")].into_iter().collect()
        );
    }

    #[test]
    fn test_subsumption_queries_follow_the_hierarchy() {
        let mut reasoner = reasoner(animals_ontology());
        assert!(reasoner
            .is_subsumption_entailed(&concept("Dog"), &concept("Animal"))
            .unwrap());
        assert!(reasoner
            .is_subsumption_entailed(&concept("Dog"), &AtomicConcept::thing())
            .unwrap());
        assert!(!reasoner
            .is_subsumption_entailed(&concept("Animal"), &concept("Dog"))
            .unwrap());
        // Unsatisfiable concepts are subsumed by everything.
        assert!(reasoner
            .is_subsumption_entailed(&concept("Broken"), &concept("Cat"))
            .unwrap());
    }

    #[test]
    fn test_unknown_concept_gets_a_transient_placement() {
        let mut reasoner = reasoner(animals_ontology());
        let unknown = concept("Mineral");
        assert_eq!(
            reasoner.super_concepts(&unknown, true).unwrap(),
            [AtomicConcept::thing()].into_iter().collect()
        );
        assert_eq!(
            reasoner.equivalent_concepts(&unknown).unwrap(),
            [unknown.clone()].into_iter().collect()
        );
        assert!(reasoner.is_concept_satisfiable(&unknown).unwrap());
        // The hierarchy itself is untouched.
        assert!(!reasoner
            .concept_hierarchy()
            .unwrap()
            .contains_element(&unknown));
    }

    #[test]
    fn test_degenerate_hierarchy_when_thing_is_unsatisfiable() {
        let mut ontology = DlOntology::new();
        ontology.add_axiom(DlAxiom::ConceptInclusion(
            AtomicConcept::thing(),
            AtomicConcept::nothing(),
        ));
        ontology.add_axiom(DlAxiom::ConceptInclusion(concept("Dog"), concept("Animal")));
        let mut reasoner = reasoner(ontology);

        reasoner.classify().unwrap();
        let hierarchy = reasoner.concept_hierarchy().unwrap();
        assert!(hierarchy.is_degenerate());
        assert_eq!(hierarchy.node_count(), 1);

        assert!(!reasoner.is_concept_satisfiable(&concept("Dog")).unwrap());
        let equivalents = reasoner.equivalent_concepts(&concept("Dog")).unwrap();
        assert!(equivalents.contains(&AtomicConcept::thing()));
        assert!(equivalents.contains(&AtomicConcept::nothing()));
        assert!(equivalents.contains(&concept("Animal")));
    }

    #[test]
    fn test_object_role_hierarchy_includes_inverses() {
        let mut ontology = DlOntology::new();
        let has_part = Role::Atomic(AtomicRole::new("ex:hasPart"));
        let has_component = Role::Atomic(AtomicRole::new("ex:hasComponent"));
        ontology.add_axiom(DlAxiom::ObjectRoleInclusion(
            has_component.clone(),
            has_part.clone(),
        ));
        let mut reasoner = reasoner(ontology);

        assert_eq!(
            reasoner.super_object_roles(&has_component, true).unwrap(),
            [has_part.clone()].into_iter().collect()
        );
        assert_eq!(
            reasoner
                .super_object_roles(&has_component.inverse(), true)
                .unwrap(),
            [has_part.inverse()].into_iter().collect()
        );
    }

    #[test]
    fn test_data_role_classification() {
        let mut ontology = DlOntology::new();
        ontology.add_axiom(DlAxiom::DataRoleInclusion(
            AtomicRole::new("ex:hasAge"),
            AtomicRole::new("ex:hasValue"),
        ));
        let mut reasoner = reasoner(ontology);
        let hierarchy = reasoner.data_role_hierarchy().unwrap();
        let age = hierarchy.node_for_element(&AtomicRole::new("ex:hasAge")).unwrap();
        let value = hierarchy
            .node_for_element(&AtomicRole::new("ex:hasValue"))
            .unwrap();
        assert!(hierarchy.node(age).parent_nodes().contains(&value));
    }

    #[test]
    fn test_interrupt_discards_classification() {
        let mut reasoner = reasoner(animals_ontology());
        reasoner.interrupt_flag().interrupt();
        assert_eq!(reasoner.classify(), Err(DlError::Interrupted));

        // Cleared flag lets a fresh attempt run.
        reasoner.interrupt_flag().clear();
        assert!(reasoner.classify().is_ok());
    }

    /// Oracle wrapper that disavows cheap subsumer sets, forcing the
    /// oracle-driven path.
    struct SlowOracle(ToldOracle);

    impl<T> SubsumptionOracle<T> for SlowOracle
    where
        ToldOracle: SubsumptionOracle<T>,
    {
        fn is_satisfiable(&mut self, element: &T) -> Result<bool, OracleError> {
            self.0.is_satisfiable(element)
        }

        fn is_subsumed_by(&mut self, sub: &T, sup: &T) -> Result<bool, OracleError> {
            self.0.is_subsumed_by(sub, sup)
        }

        fn known_subsumers(&mut self, _element: &T) -> Result<Option<HashSet<T>>, OracleError> {
            Ok(None)
        }

        fn subsumers_are_cheap(&self) -> bool {
            false
        }
    }

    impl InstanceOracle for SlowOracle {
        fn is_instance_of(
            &mut self,
            individual: &Individual,
            concept: &AtomicConcept,
        ) -> Result<bool, OracleError> {
            self.0.is_instance_of(individual, concept)
        }
    }

    #[test]
    fn test_oracle_driven_path_agrees_with_deterministic_path() {
        let ontology = animals_ontology();
        let mut fast = reasoner(ontology.clone());
        let slow_oracle = SlowOracle(ToldOracle::from_ontology(&ontology).unwrap());
        let mut slow = Reasoner::new(ontology.clone(), slow_oracle);

        for c in &ontology.concepts {
            assert_eq!(
                fast.equivalent_concepts(c).unwrap(),
                slow.equivalent_concepts(c).unwrap(),
                "equivalents of {c} differ"
            );
            assert_eq!(
                fast.super_concepts(c, false).unwrap(),
                slow.super_concepts(c, false).unwrap(),
                "ancestors of {c} differ"
            );
        }
    }

    #[derive(Clone)]
    struct RecordingMonitor(Rc<Mutex<Vec<String>>>);

    impl ProgressMonitor for RecordingMonitor {
        fn task_started(&mut self, task: &str) {
            self.0.lock().unwrap().push(format!("start:{task}"));
        }

        fn task_progress(&mut self, done: usize, total: usize) {
            self.0.lock().unwrap().push(format!("progress:{done}/{total}"));
        }

        fn task_ended(&mut self) {
            self.0.lock().unwrap().push("end".to_string());
        }
    }

    #[test]
    fn test_monitor_observes_every_classification_task() {
        let mut ontology = animals_ontology();
        ontology.add_axiom(DlAxiom::ObjectRoleInclusion(
            Role::Atomic(AtomicRole::new("ex:hasPet")),
            Role::Atomic(AtomicRole::new("ex:keeps")),
        ));
        ontology.add_axiom(DlAxiom::DataRoleInclusion(
            AtomicRole::new("ex:hasAge"),
            AtomicRole::new("ex:hasValue"),
        ));
        let events = Rc::new(Mutex::new(Vec::new()));
        let oracle = ToldOracle::from_ontology(&ontology).unwrap();
        let mut reasoner = Reasoner::new(ontology, oracle)
            .with_monitor(Box::new(RecordingMonitor(events.clone())));

        reasoner.classify().unwrap();
        reasoner.classify_object_roles().unwrap();
        reasoner.classify_data_roles().unwrap();

        let events = events.lock().unwrap();
        let starts: Vec<&str> = events
            .iter()
            .filter(|e| e.starts_with("start:"))
            .map(String::as_str)
            .collect();
        assert_eq!(
            starts,
            vec![
                "start:concept classification",
                "start:object role classification",
                "start:data role classification"
            ]
        );
        assert_eq!(events.iter().filter(|e| *e == "end").count(), 3);
    }

    #[test]
    fn test_monitor_observes_oracle_driven_classification() {
        let ontology = animals_ontology();
        let events = Rc::new(Mutex::new(Vec::new()));
        let slow_oracle = SlowOracle(ToldOracle::from_ontology(&ontology).unwrap());
        let mut reasoner = Reasoner::new(ontology, slow_oracle)
            .with_monitor(Box::new(RecordingMonitor(events.clone())));
        reasoner.classify().unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.first().map(String::as_str), Some("start:concept classification"));
        assert_eq!(events.last().map(String::as_str), Some("end"));
        assert!(events.iter().any(|e| e.starts_with("progress:")));
    }
}
