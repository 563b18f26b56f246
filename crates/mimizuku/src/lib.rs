//! # 🦉 Mimizuku - Description Logic Classification Engine
//!
//! Mimizuku is a Rust engine for building subsumption hierarchies over
//! description logic ontologies. It combines a deterministic classification
//! path (when complete subsumer sets are cheaply available) with an
//! oracle-driven incremental path, realizes the types of named individuals
//! and stores assertions in indexed extension tables.
//!
//! ## Features
//!
//! - **Two classification paths**: deterministic construction from told
//!   subsumer sets, oracle-driven frontier search otherwise
//! - **Concept, object role and data role hierarchies** (inverses included)
//! - **Realization**: direct types and instance retrieval per individual
//! - **Indexed fact store**: arity-partitioned extension tables with
//!   binding-pattern retrieval cursors
//! - **Cooperative cancellation**: interruptible from another thread
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mimizuku::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut ontology = DlOntology::new();
//!     ontology.add_axiom(DlAxiom::ConceptInclusion(
//!         AtomicConcept::new("ex:Dog"),
//!         AtomicConcept::new("ex:Animal"),
//!     ));
//!     ontology.add_axiom(DlAxiom::ClassAssertion(
//!         AtomicConcept::new("ex:Dog"),
//!         Individual::new("ex:rex"),
//!     ));
//!
//!     let oracle = ToldOracle::from_ontology(&ontology)?;
//!     let mut reasoner = Reasoner::new(ontology, oracle);
//!
//!     reasoner.classify()?;
//!     let supers = reasoner.super_concepts(&AtomicConcept::new("ex:Dog"), true)?;
//!     let types = reasoner.types(&Individual::new("ex:rex"), false)?;
//!
//!     println!("{} direct supers, {} types", supers.len(), types.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Mimizuku consists of several specialized crates:
//!
//! - **`mimizuku-core`**: identifier models and the interrupt flag
//! - **`mimizuku-hierarchy`**: generic hierarchy construction engine
//! - **`mimizuku-store`**: extension tables and retrieval cursors
//! - **`mimizuku-dl`**: reasoner, oracle traits and realization
//!
//! ## Feature Flags
//!
//! - `full` (default): all crates included
//! - `core`: only identifier models
//! - `hierarchy`: hierarchy construction engine
//! - `store`: extension tables
//! - `dl`: reasoner and oracles

// Re-export all public APIs from sub-crates (feature-gated)

#[cfg(feature = "mimizuku-core")]
pub use mimizuku_core as core;

#[cfg(feature = "mimizuku-hierarchy")]
pub use mimizuku_hierarchy as hierarchy;

#[cfg(feature = "mimizuku-store")]
pub use mimizuku_store as store;

#[cfg(feature = "mimizuku-dl")]
pub use mimizuku_dl as dl;

// Convenience re-exports for common types (feature-gated)
#[cfg(feature = "mimizuku-core")]
pub use mimizuku_core::{
    AtomicConcept, AtomicRole, DlIri, Individual, InterruptFlag, ModelNodeId, Role,
};

#[cfg(feature = "mimizuku-hierarchy")]
pub use mimizuku_hierarchy::{
    DeterministicHierarchyBuilder, Hierarchy, HierarchyBuilder, HierarchyError, HierarchyNode,
    NodeId,
};

#[cfg(feature = "mimizuku-store")]
pub use mimizuku_store::{ExtensionManager, ExtensionTable, FactTerm, Retrieval, StoreError, View};

#[cfg(feature = "mimizuku-dl")]
pub use mimizuku_dl::{
    DlAxiom, DlError, DlOntology, InstanceOracle, ProgressMonitor, Reasoner, SubsumptionOracle,
    ToldOracle,
};

// Commonly used external dependencies
pub use anyhow;
pub use serde;
pub use serde_json;

/// Prelude module for convenient imports
///
/// ```rust
/// use mimizuku::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "mimizuku-core")]
    pub use crate::{AtomicConcept, AtomicRole, DlIri, Individual, InterruptFlag, Role};

    #[cfg(feature = "mimizuku-hierarchy")]
    pub use crate::{Hierarchy, HierarchyBuilder, NodeId};

    #[cfg(feature = "mimizuku-store")]
    pub use crate::{ExtensionManager, ExtensionTable, FactTerm, View};

    #[cfg(feature = "mimizuku-dl")]
    pub use crate::{DlAxiom, DlError, DlOntology, Reasoner, ToldOracle};

    // Common external types
    pub use anyhow::Result as AnyResult;
    pub use serde::{Deserialize, Serialize};
}

// Version information
/// Current version of Mimizuku
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
