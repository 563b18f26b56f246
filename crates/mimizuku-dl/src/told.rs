//! Told-subsumption oracle.
//!
//! Answers every oracle question from the transitive closure of the
//! asserted axioms. All subsumer sets are cheaply available, so the
//! reasoner always takes the deterministic classification path with this
//! backend. Assertions are materialized into extension tables, one model
//! node per named individual.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use mimizuku_core::{AtomicConcept, AtomicRole, DlIri, Individual, ModelNodeId, Role};
use mimizuku_store::{ExtensionManager, FactTerm, View};

use crate::ontology::{DlAxiom, DlOntology};
use crate::oracle::{InstanceOracle, OracleError, SubsumptionOracle};

/// Transitive closure of a told subsumption relation over one universe.
#[derive(Debug, Clone)]
struct ToldSubsumption<T> {
    top: T,
    bottom: T,
    closure: HashMap<T, HashSet<T>>,
}

impl<T: Clone + Eq + Hash> ToldSubsumption<T> {
    fn new(top: T, bottom: T) -> Self {
        Self {
            top,
            bottom,
            closure: HashMap::new(),
        }
    }

    fn add(&mut self, sub: T, sup: T) {
        self.closure.entry(sub).or_default().insert(sup);
    }

    /// Fixpoint: propagate subsumers of subsumers until nothing changes.
    fn close(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            let keys: Vec<T> = self.closure.keys().cloned().collect();
            for key in &keys {
                let direct: Vec<T> = match self.closure.get(key) {
                    Some(supers) => supers.iter().cloned().collect(),
                    None => continue,
                };
                let mut inherited = HashSet::new();
                for sup in &direct {
                    if let Some(more) = self.closure.get(sup) {
                        inherited.extend(more.iter().cloned());
                    }
                }
                if let Some(entry) = self.closure.get_mut(key) {
                    for sup in inherited {
                        changed |= entry.insert(sup);
                    }
                }
            }
        }
    }

    fn is_satisfiable(&self, element: &T) -> bool {
        element != &self.bottom
            && !self
                .closure
                .get(element)
                .map(|supers| supers.contains(&self.bottom))
                .unwrap_or(false)
    }

    fn is_subsumed_by(&self, sub: &T, sup: &T) -> bool {
        sup == &self.top
            || sub == &self.bottom
            || sub == sup
            || self
                .closure
                .get(sub)
                .map(|supers| supers.contains(sup) || supers.contains(&self.bottom))
                .unwrap_or(false)
    }

    /// Told subsumers of an element, self and top included.
    fn subsumers_of(&self, element: &T) -> HashSet<T> {
        let mut supers: HashSet<T> = self.closure.get(element).cloned().unwrap_or_default();
        supers.insert(element.clone());
        supers.insert(self.top.clone());
        supers
    }
}

/// Oracle backed by told axioms only.
#[derive(Debug, Clone)]
pub struct ToldOracle {
    concepts: ToldSubsumption<AtomicConcept>,
    object_roles: ToldSubsumption<Role>,
    data_roles: ToldSubsumption<AtomicRole>,
    assertions: ExtensionManager,
    node_ids: HashMap<Individual, ModelNodeId>,
    individuals: HashMap<ModelNodeId, Individual>,
}

impl ToldOracle {
    /// Digest an ontology: build the three subsumption closures and
    /// materialize every assertion into the extension tables.
    pub fn from_ontology(ontology: &DlOntology) -> Result<Self, OracleError> {
        let mut oracle = Self {
            concepts: ToldSubsumption::new(AtomicConcept::thing(), AtomicConcept::nothing()),
            object_roles: ToldSubsumption::new(
                Role::Atomic(AtomicRole::top_object_role()),
                Role::Atomic(AtomicRole::bottom_object_role()),
            ),
            data_roles: ToldSubsumption::new(
                AtomicRole::top_data_role(),
                AtomicRole::bottom_data_role(),
            ),
            assertions: ExtensionManager::new(),
            node_ids: HashMap::new(),
            individuals: HashMap::new(),
        };
        for axiom in &ontology.axioms {
            match axiom {
                DlAxiom::ConceptInclusion(sub, sup) => {
                    oracle.concepts.add(sub.clone(), sup.clone());
                }
                DlAxiom::ConceptEquivalence(a, b) => {
                    oracle.concepts.add(a.clone(), b.clone());
                    oracle.concepts.add(b.clone(), a.clone());
                }
                DlAxiom::ObjectRoleInclusion(sub, sup) => {
                    // r ⊑ s entails inv(r) ⊑ inv(s).
                    oracle.object_roles.add(sub.clone(), sup.clone());
                    oracle.object_roles.add(sub.inverse(), sup.inverse());
                }
                DlAxiom::DataRoleInclusion(sub, sup) => {
                    oracle.data_roles.add(sub.clone(), sup.clone());
                }
                DlAxiom::ClassAssertion(concept, individual) => {
                    let node = oracle.node_for(individual);
                    oracle
                        .assertions
                        .add_fact(
                            vec![
                                FactTerm::Predicate(concept.iri().clone()),
                                FactTerm::Node(node),
                            ],
                            true,
                        )
                        .map_err(|e| OracleError::Store(e.to_string()))?;
                }
                DlAxiom::RoleAssertion(role, from, to) => {
                    let from_node = oracle.node_for(from);
                    let to_node = oracle.node_for(to);
                    oracle
                        .assertions
                        .add_fact(
                            vec![
                                FactTerm::Predicate(role.iri().clone()),
                                FactTerm::Node(from_node),
                                FactTerm::Node(to_node),
                            ],
                            true,
                        )
                        .map_err(|e| OracleError::Store(e.to_string()))?;
                }
            }
        }
        oracle.concepts.close();
        oracle.object_roles.close();
        oracle.data_roles.close();
        Ok(oracle)
    }

    fn node_for(&mut self, individual: &Individual) -> ModelNodeId {
        if let Some(&node) = self.node_ids.get(individual) {
            return node;
        }
        let node = ModelNodeId(self.node_ids.len() as u32);
        self.node_ids.insert(individual.clone(), node);
        self.individuals.insert(node, individual.clone());
        node
    }

    /// The extension tables holding the materialized assertions.
    pub fn assertions(&self) -> &ExtensionManager {
        &self.assertions
    }

    pub fn node_id(&self, individual: &Individual) -> Option<ModelNodeId> {
        self.node_ids.get(individual).copied()
    }

    pub fn individual_for_node(&self, node: ModelNodeId) -> Option<&Individual> {
        self.individuals.get(&node)
    }

    /// Role fillers of an individual, subroles of `role` included.
    pub fn role_successors(
        &self,
        individual: &Individual,
        role: &AtomicRole,
    ) -> Result<Vec<Individual>, OracleError> {
        let node = match self.node_ids.get(individual) {
            Some(&node) => node,
            None => return Ok(Vec::new()),
        };
        let table = match self.assertions.table(3) {
            Some(table) => table,
            None => return Ok(Vec::new()),
        };
        let mut retrieval = table
            .create_retrieval(vec![false, true, false], View::Total)
            .map_err(|e| OracleError::Store(e.to_string()))?;
        retrieval.bindings_mut()[1] = Some(FactTerm::Node(node));
        retrieval
            .open()
            .map_err(|e| OracleError::Store(e.to_string()))?;

        let target = Role::Atomic(role.clone());
        let mut successors = Vec::new();
        while let Some(tuple) = retrieval.current_tuple() {
            if let (FactTerm::Predicate(iri), FactTerm::Node(to)) = (&tuple[0], &tuple[2]) {
                let asserted = Role::Atomic(AtomicRole(iri.clone()));
                if self.object_roles.is_subsumed_by(&asserted, &target) {
                    if let Some(filler) = self.individuals.get(to) {
                        successors.push(filler.clone());
                    }
                }
            }
            retrieval.next();
        }
        Ok(successors)
    }
}

impl SubsumptionOracle<AtomicConcept> for ToldOracle {
    fn is_satisfiable(&mut self, element: &AtomicConcept) -> Result<bool, OracleError> {
        Ok(self.concepts.is_satisfiable(element))
    }

    fn is_subsumed_by(
        &mut self,
        sub: &AtomicConcept,
        sup: &AtomicConcept,
    ) -> Result<bool, OracleError> {
        Ok(self.concepts.is_subsumed_by(sub, sup))
    }

    fn known_subsumers(
        &mut self,
        element: &AtomicConcept,
    ) -> Result<Option<HashSet<AtomicConcept>>, OracleError> {
        Ok(Some(self.concepts.subsumers_of(element)))
    }

    fn subsumers_are_cheap(&self) -> bool {
        true
    }
}

impl SubsumptionOracle<Role> for ToldOracle {
    fn is_satisfiable(&mut self, element: &Role) -> Result<bool, OracleError> {
        Ok(self.object_roles.is_satisfiable(element))
    }

    fn is_subsumed_by(&mut self, sub: &Role, sup: &Role) -> Result<bool, OracleError> {
        Ok(self.object_roles.is_subsumed_by(sub, sup))
    }

    fn known_subsumers(&mut self, element: &Role) -> Result<Option<HashSet<Role>>, OracleError> {
        Ok(Some(self.object_roles.subsumers_of(element)))
    }

    fn subsumers_are_cheap(&self) -> bool {
        true
    }
}

impl SubsumptionOracle<AtomicRole> for ToldOracle {
    fn is_satisfiable(&mut self, element: &AtomicRole) -> Result<bool, OracleError> {
        Ok(self.data_roles.is_satisfiable(element))
    }

    fn is_subsumed_by(&mut self, sub: &AtomicRole, sup: &AtomicRole) -> Result<bool, OracleError> {
        Ok(self.data_roles.is_subsumed_by(sub, sup))
    }

    fn known_subsumers(
        &mut self,
        element: &AtomicRole,
    ) -> Result<Option<HashSet<AtomicRole>>, OracleError> {
        Ok(Some(self.data_roles.subsumers_of(element)))
    }

    fn subsumers_are_cheap(&self) -> bool {
        true
    }
}

impl InstanceOracle for ToldOracle {
    fn is_instance_of(
        &mut self,
        individual: &Individual,
        concept: &AtomicConcept,
    ) -> Result<bool, OracleError> {
        if *concept == AtomicConcept::thing() {
            return Ok(true);
        }
        let node = match self.node_ids.get(individual) {
            Some(&node) => node,
            None => return Ok(false),
        };
        let table = match self.assertions.table(2) {
            Some(table) => table,
            None => return Ok(false),
        };
        let mut retrieval = table
            .create_retrieval(vec![false, true], View::Total)
            .map_err(|e| OracleError::Store(e.to_string()))?;
        retrieval.bindings_mut()[1] = Some(FactTerm::Node(node));
        retrieval
            .open()
            .map_err(|e| OracleError::Store(e.to_string()))?;

        while let Some(tuple) = retrieval.current_tuple() {
            if let FactTerm::Predicate(iri) = &tuple[0] {
                let asserted = AtomicConcept(DlIri::new(iri.as_str()));
                if self.concepts.is_subsumed_by(&asserted, concept) {
                    return Ok(true);
                }
            }
            retrieval.next();
        }
        Ok(false)
    }
}
