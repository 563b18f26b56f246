//! DL 分類・実体化エンジン
//!
//! このクレートは Mimizuku 推論エンジンの中核を提供します:
//! - オラクル抽象 (包摂・インスタンス判定の差し替え可能な判定器)
//! - 概念・オブジェクトロール・データロールの分類
//! - 個体の実体化 (direct types / instances)
//! - told 公理のみで答える `ToldOracle` 実装

pub mod ontology;
pub mod oracle;
pub mod reasoner;
pub mod told;

mod realization;

pub use ontology::{DlAxiom, DlOntology};
pub use oracle::{InstanceOracle, OracleError, SubsumptionOracle};
pub use reasoner::{ProgressMonitor, Reasoner};
pub use told::ToldOracle;

use mimizuku_hierarchy::HierarchyError;
use thiserror::Error;

/// Errors raised by the reasoner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DlError {
    /// The interrupt flag was raised; partial results were discarded.
    #[error("reasoning interrupted")]
    Interrupted,

    #[error("oracle error: {0}")]
    Oracle(String),

    #[error("fact store error: {0}")]
    Store(String),

    /// A query named an element outside the classified universe where a
    /// transient placement is not available.
    #[error("unknown element: {0}")]
    UnknownElement(String),

    #[error("internal reasoner error: {0}")]
    Internal(String),
}

impl From<HierarchyError> for DlError {
    fn from(e: HierarchyError) -> Self {
        match e {
            HierarchyError::Interrupted => DlError::Interrupted,
            HierarchyError::Oracle(msg) => DlError::Oracle(msg),
            HierarchyError::Internal(msg) => DlError::Internal(msg),
        }
    }
}

impl From<OracleError> for DlError {
    fn from(e: OracleError) -> Self {
        match e {
            OracleError::Failed(msg) => DlError::Oracle(msg),
            OracleError::Store(msg) => DlError::Store(msg),
        }
    }
}
