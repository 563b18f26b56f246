//! Realization: direct types of individuals, computed with the same
//! monotone frontier search that drives incremental classification.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::info;

use mimizuku_core::{AtomicConcept, AtomicRole, Individual, Role};
use mimizuku_hierarchy::{search, HierarchyError, NodeId};

use crate::oracle::{InstanceOracle, SubsumptionOracle};
use crate::reasoner::Reasoner;
use crate::DlError;

impl<O> Reasoner<O>
where
    O: SubsumptionOracle<AtomicConcept>
        + SubsumptionOracle<Role>
        + SubsumptionOracle<AtomicRole>
        + InstanceOracle,
{
    /// Compute the direct types of every named individual. Idempotent.
    ///
    /// For each individual, a downward search from owl:Thing keeps to the
    /// nodes whose representative has the individual as an instance; the
    /// frontier of that search is exactly the set of direct type nodes.
    pub fn realise(&mut self) -> Result<(), DlError> {
        if self.direct_types.is_some() {
            return Ok(());
        }
        self.classify()?;
        let individuals: Vec<Individual> = self.ontology().individuals.iter().cloned().collect();
        info!(individuals = individuals.len(), "realising individuals");

        let hierarchy = self
            .concept_hierarchy
            .as_ref()
            .ok_or_else(|| DlError::Internal("concept hierarchy missing".to_string()))?;
        let oracle = &mut self.oracle;
        let interrupt = &self.interrupt;
        let mut direct_types: HashMap<Individual, HashSet<NodeId>> = HashMap::new();
        for individual in individuals {
            let nodes = if hierarchy.is_degenerate() {
                [hierarchy.top_node()].into_iter().collect()
            } else {
                search(
                    vec![hierarchy.top_node()],
                    |id| hierarchy.node(*id).child_nodes().iter().copied().collect(),
                    |id| {
                        if interrupt.is_interrupted() {
                            return Err(HierarchyError::Interrupted);
                        }
                        // Nothing never has instances.
                        if *id == hierarchy.bottom_node() {
                            return Ok(false);
                        }
                        oracle
                            .is_instance_of(&individual, hierarchy.node(*id).representative())
                            .map_err(|e| HierarchyError::Oracle(e.to_string()))
                    },
                )?
            };
            direct_types.insert(individual, nodes);
        }

        // Inverted index: every concept of a direct-type node's class maps
        // to the individuals realized at that node.
        let mut direct_instances: HashMap<AtomicConcept, HashSet<Individual>> = HashMap::new();
        for (individual, nodes) in &direct_types {
            for &node in nodes {
                for concept in hierarchy.node(node).equivalent_elements() {
                    direct_instances
                        .entry(concept.clone())
                        .or_default()
                        .insert(individual.clone());
                }
            }
        }

        self.direct_types = Some(direct_types);
        self.direct_instances = Some(direct_instances);
        info!("realisation finished");
        Ok(())
    }

    /// Types of an individual; only the direct ones when `direct`.
    pub fn types(
        &mut self,
        individual: &Individual,
        direct: bool,
    ) -> Result<BTreeSet<AtomicConcept>, DlError> {
        self.realise()?;
        let hierarchy = self.concept_hierarchy_ref()?;
        let direct_types = self
            .direct_types
            .as_ref()
            .ok_or_else(|| DlError::Internal("realization missing".to_string()))?;
        let nodes = direct_types
            .get(individual)
            .ok_or_else(|| DlError::UnknownElement(individual.to_string()))?;
        let ids: HashSet<NodeId> = if direct {
            nodes.clone()
        } else {
            nodes
                .iter()
                .flat_map(|&node| hierarchy.ancestor_nodes(node))
                .collect()
        };
        Ok(ids
            .into_iter()
            .flat_map(|id| hierarchy.node(id).equivalent_elements().iter().cloned())
            .collect())
    }

    /// Whether the individual has the concept among its (direct) types.
    pub fn has_type(
        &mut self,
        individual: &Individual,
        concept: &AtomicConcept,
        direct: bool,
    ) -> Result<bool, DlError> {
        Ok(self.types(individual, direct)?.contains(concept))
    }

    /// Instances of a classified concept, answered from the inverted
    /// realization index; only the individuals realized at the concept's
    /// own node when `direct`.
    pub fn instances(
        &mut self,
        concept: &AtomicConcept,
        direct: bool,
    ) -> Result<BTreeSet<Individual>, DlError> {
        self.realise()?;
        let hierarchy = self.concept_hierarchy_ref()?;
        let direct_instances = self
            .direct_instances
            .as_ref()
            .ok_or_else(|| DlError::Internal("realization missing".to_string()))?;
        let node = hierarchy
            .node_for_element(concept)
            .ok_or_else(|| DlError::UnknownElement(concept.to_string()))?;
        if direct {
            return Ok(direct_instances
                .get(concept)
                .into_iter()
                .flatten()
                .cloned()
                .collect());
        }
        Ok(hierarchy
            .descendant_nodes(node)
            .into_iter()
            .filter_map(|id| direct_instances.get(hierarchy.node(id).representative()))
            .flatten()
            .cloned()
            .collect())
    }
}
