//! DL 識別子モデル
//!
//! Elements of the three classification universes: atomic concepts, object
//! roles (atomic roles and their inverses) and data roles. All identifiers
//! are immutable values with full `Eq + Hash + Ord`, so they can be used as
//! set members and map keys everywhere in the engine.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// DL IRI wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DlIri(pub String);

impl DlIri {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Internal IRIs (fresh query concepts etc.) are excluded from
    /// classification universes.
    pub fn is_internal(&self) -> bool {
        self.0.starts_with("internal:")
    }
}

impl std::fmt::Display for DlIri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
pub const OWL_NOTHING: &str = "http://www.w3.org/2002/07/owl#Nothing";
pub const OWL_TOP_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#topObjectProperty";
pub const OWL_BOTTOM_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#bottomObjectProperty";
pub const OWL_TOP_DATA_PROPERTY: &str = "http://www.w3.org/2002/07/owl#topDataProperty";
pub const OWL_BOTTOM_DATA_PROPERTY: &str = "http://www.w3.org/2002/07/owl#bottomDataProperty";

lazy_static! {
    static ref THING: AtomicConcept = AtomicConcept(DlIri::new(OWL_THING));
    static ref NOTHING: AtomicConcept = AtomicConcept(DlIri::new(OWL_NOTHING));
    static ref TOP_OBJECT_ROLE: AtomicRole = AtomicRole(DlIri::new(OWL_TOP_OBJECT_PROPERTY));
    static ref BOTTOM_OBJECT_ROLE: AtomicRole = AtomicRole(DlIri::new(OWL_BOTTOM_OBJECT_PROPERTY));
    static ref TOP_DATA_ROLE: AtomicRole = AtomicRole(DlIri::new(OWL_TOP_DATA_PROPERTY));
    static ref BOTTOM_DATA_ROLE: AtomicRole = AtomicRole(DlIri::new(OWL_BOTTOM_DATA_PROPERTY));
}

/// Atomic (named) concept
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AtomicConcept(pub DlIri);

impl AtomicConcept {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(DlIri::new(iri))
    }

    /// owl:Thing (⊤)
    pub fn thing() -> Self {
        THING.clone()
    }

    /// owl:Nothing (⊥)
    pub fn nothing() -> Self {
        NOTHING.clone()
    }

    pub fn iri(&self) -> &DlIri {
        &self.0
    }
}

impl std::fmt::Display for AtomicConcept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Atomic (named) role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AtomicRole(pub DlIri);

impl AtomicRole {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(DlIri::new(iri))
    }

    pub fn top_object_role() -> Self {
        TOP_OBJECT_ROLE.clone()
    }

    pub fn bottom_object_role() -> Self {
        BOTTOM_OBJECT_ROLE.clone()
    }

    pub fn top_data_role() -> Self {
        TOP_DATA_ROLE.clone()
    }

    pub fn bottom_data_role() -> Self {
        BOTTOM_DATA_ROLE.clone()
    }

    pub fn iri(&self) -> &DlIri {
        &self.0
    }
}

impl std::fmt::Display for AtomicRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role expression: an atomic role or the inverse of one.
///
/// Object role classification runs over atomic roles and their inverses;
/// data role classification only ever uses `Role::Atomic`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Role {
    Atomic(AtomicRole),
    Inverse(AtomicRole),
}

impl Role {
    /// The inverse role; inv(inv(r)) = r.
    pub fn inverse(&self) -> Role {
        match self {
            Role::Atomic(r) => Role::Inverse(r.clone()),
            Role::Inverse(r) => Role::Atomic(r.clone()),
        }
    }

    pub fn atomic_role(&self) -> &AtomicRole {
        match self {
            Role::Atomic(r) | Role::Inverse(r) => r,
        }
    }

    pub fn is_inverse(&self) -> bool {
        matches!(self, Role::Inverse(_))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Atomic(r) => write!(f, "{}", r),
            Role::Inverse(r) => write!(f, "inv({})", r),
        }
    }
}

impl From<AtomicRole> for Role {
    fn from(role: AtomicRole) -> Self {
        Role::Atomic(role)
    }
}

/// Named individual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Individual(pub DlIri);

impl Individual {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(DlIri::new(iri))
    }

    pub fn iri(&self) -> &DlIri {
        &self.0
    }
}

impl std::fmt::Display for Individual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id of a node in the oracle's internal model (e.g. a tableau node).
///
/// Extension table tuples reference model nodes by this id; the owning
/// oracle keeps the id → individual mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ModelNodeId(pub u32);

impl std::fmt::Display for ModelNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
