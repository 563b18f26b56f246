//! Oracle traits: the seam between the classification engine and whatever
//! decision procedure answers subsumption and instance questions.

use std::collections::HashSet;
use thiserror::Error;

use mimizuku_core::{AtomicConcept, Individual};

/// Errors raised by an oracle backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("oracle failure: {0}")]
    Failed(String),

    #[error("fact store error: {0}")]
    Store(String),
}

/// Answers subsumption questions over one universe of elements.
///
/// Oracles take `&mut self` so implementations can cache: a model-building
/// backend typically remembers satisfiability witnesses across calls.
pub trait SubsumptionOracle<T> {
    /// Whether the element can have any instance at all.
    fn is_satisfiable(&mut self, element: &T) -> Result<bool, OracleError>;

    /// Whether `sub ⊑ sup` holds.
    fn is_subsumed_by(&mut self, sub: &T, sup: &T) -> Result<bool, OracleError>;

    /// The complete subsumer set of `element`, if it is cheaply available.
    ///
    /// `None` means only the expensive query path can decide; the caller
    /// then abandons the deterministic construction for the whole universe.
    fn known_subsumers(&mut self, element: &T) -> Result<Option<HashSet<T>>, OracleError>;

    /// True when [`known_subsumers`](Self::known_subsumers) is expected to
    /// be cheap for every element of the universe.
    fn subsumers_are_cheap(&self) -> bool;
}

/// Answers instance questions for realization.
pub trait InstanceOracle {
    fn is_instance_of(
        &mut self,
        individual: &Individual,
        concept: &AtomicConcept,
    ) -> Result<bool, OracleError>;
}
