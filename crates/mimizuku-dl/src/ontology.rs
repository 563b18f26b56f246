//! Told ontology model: axioms plus the signature they mention.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use mimizuku_core::{AtomicConcept, AtomicRole, Individual, Role};

/// Axioms understood by the told reasoning backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DlAxiom {
    /// `sub ⊑ sup`
    ConceptInclusion(AtomicConcept, AtomicConcept),
    /// `a ≡ b`
    ConceptEquivalence(AtomicConcept, AtomicConcept),
    /// `sub ⊑ sup` over object role expressions (inverses included).
    ObjectRoleInclusion(Role, Role),
    /// `sub ⊑ sup` over data roles.
    DataRoleInclusion(AtomicRole, AtomicRole),
    /// `individual : concept`
    ClassAssertion(AtomicConcept, Individual),
    /// `(from, to) : role`
    RoleAssertion(AtomicRole, Individual, Individual),
}

/// An ontology as loaded: the axioms and the signature collected from them.
///
/// The signature sets drive the classification universes; owl:Thing and
/// owl:Nothing are implicit and never registered here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DlOntology {
    pub concepts: HashSet<AtomicConcept>,
    pub object_roles: HashSet<AtomicRole>,
    pub data_roles: HashSet<AtomicRole>,
    pub individuals: HashSet<Individual>,
    pub axioms: Vec<DlAxiom>,
}

impl DlOntology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an axiom and register every identifier it mentions.
    pub fn add_axiom(&mut self, axiom: DlAxiom) {
        match &axiom {
            DlAxiom::ConceptInclusion(sub, sup) | DlAxiom::ConceptEquivalence(sub, sup) => {
                self.declare_concept(sub.clone());
                self.declare_concept(sup.clone());
            }
            DlAxiom::ObjectRoleInclusion(sub, sup) => {
                self.declare_object_role(sub.atomic_role().clone());
                self.declare_object_role(sup.atomic_role().clone());
            }
            DlAxiom::DataRoleInclusion(sub, sup) => {
                self.declare_data_role(sub.clone());
                self.declare_data_role(sup.clone());
            }
            DlAxiom::ClassAssertion(concept, individual) => {
                self.declare_concept(concept.clone());
                self.declare_individual(individual.clone());
            }
            DlAxiom::RoleAssertion(role, from, to) => {
                self.declare_object_role(role.clone());
                self.declare_individual(from.clone());
                self.declare_individual(to.clone());
            }
        }
        self.axioms.push(axiom);
    }

    pub fn declare_concept(&mut self, concept: AtomicConcept) {
        if concept != AtomicConcept::thing() && concept != AtomicConcept::nothing() {
            self.concepts.insert(concept);
        }
    }

    pub fn declare_object_role(&mut self, role: AtomicRole) {
        if role != AtomicRole::top_object_role() && role != AtomicRole::bottom_object_role() {
            self.object_roles.insert(role);
        }
    }

    pub fn declare_data_role(&mut self, role: AtomicRole) {
        if role != AtomicRole::top_data_role() && role != AtomicRole::bottom_data_role() {
            self.data_roles.insert(role);
        }
    }

    pub fn declare_individual(&mut self, individual: Individual) {
        self.individuals.insert(individual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_axiom_registers_signature() {
        let mut ontology = DlOntology::new();
        ontology.add_axiom(DlAxiom::ConceptInclusion(
            AtomicConcept::new("ex:Person"),
            AtomicConcept::new("ex:Animal"),
        ));
        ontology.add_axiom(DlAxiom::ClassAssertion(
            AtomicConcept::new("ex:Person"),
            Individual::new("ex:john"),
        ));
        ontology.add_axiom(DlAxiom::RoleAssertion(
            AtomicRole::new("ex:knows"),
            Individual::new("ex:john"),
            Individual::new("ex:mary"),
        ));

        assert_eq!(ontology.concepts.len(), 2);
        assert_eq!(ontology.individuals.len(), 2);
        assert!(ontology.object_roles.contains(&AtomicRole::new("ex:knows")));
        assert_eq!(ontology.axioms.len(), 3);
    }

    #[test]
    fn test_thing_and_nothing_are_not_part_of_the_signature() {
        let mut ontology = DlOntology::new();
        ontology.add_axiom(DlAxiom::ConceptInclusion(
            AtomicConcept::new("ex:Broken"),
            AtomicConcept::nothing(),
        ));
        assert_eq!(ontology.concepts.len(), 1);
        assert!(ontology.concepts.contains(&AtomicConcept::new("ex:Broken")));
    }
}
