//! 拡張テーブル (ファクトストア)
//!
//! このクレートは推論モデルのアサーション (概念・ロールのファクト) を
//! アリティ別のテーブルに格納し、束縛パターンによる索引付き検索カーソルを
//! 提供します。

pub mod manager;
pub mod table;

pub use manager::ExtensionManager;
pub use table::{ExtensionTable, FactTerm, FactTuple, Retrieval, View};

use thiserror::Error;

/// Errors raised by extension tables and retrievals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A tuple of the wrong length was offered to a table.
    #[error("arity mismatch: table holds {expected}-tuples, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// A retrieval was opened with a bound position left without a binding.
    #[error("no binding for bound position {0}")]
    UnboundPosition(usize),

    /// No table exists for the requested tuple arity.
    #[error("no extension table for arity {0}")]
    UnknownArity(usize),
}
