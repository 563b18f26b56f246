//! 包含階層の構築エンジン
//!
//! このクレートは要素集合の包摂関係から DAG 階層 (Hasse 図) を構築します:
//! - `Hierarchy` / `HierarchyNode`: 同値類をノードとする被覆関係の DAG
//! - `DeterministicHierarchyBuilder`: 既知の包摂集合からの決定的構築
//! - `HierarchyBuilder`: オラクル駆動のインクリメンタル構築
//! - `search`: 単調フロンティア探索 (実体化にも再利用)

pub mod builder;
pub mod deterministic;
pub mod hierarchy;
pub mod node;

pub use builder::{search, HierarchyBuilder, Position};
pub use deterministic::{DeterministicHierarchyBuilder, GraphNode};
pub use hierarchy::Hierarchy;
pub use node::{HierarchyNode, NodeId};

use thiserror::Error;

/// Errors raised while building or querying a hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// The interrupt flag was raised; partial classification state has been
    /// discarded.
    #[error("hierarchy construction interrupted")]
    Interrupted,

    /// The subsumption oracle failed to answer a query.
    #[error("oracle error: {0}")]
    Oracle(String),

    /// An internal consistency check failed.
    #[error("internal hierarchy error: {0}")]
    Internal(String),
}
