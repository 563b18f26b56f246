//! Routing of facts to per-arity extension tables.

use std::collections::BTreeMap;

use crate::table::{ExtensionTable, FactTuple, Retrieval, View};
use crate::StoreError;

/// Owns one [`ExtensionTable`] per tuple arity and routes facts by length.
#[derive(Debug, Clone, Default)]
pub struct ExtensionManager {
    tables: BTreeMap<usize, ExtensionTable>,
}

impl ExtensionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fact to the table of its arity, creating the table on first
    /// use. Returns `true` if the fact was not present before.
    pub fn add_fact(
        &mut self,
        tuple: impl Into<FactTuple>,
        permanent: bool,
    ) -> Result<bool, StoreError> {
        let tuple: FactTuple = tuple.into();
        let arity = tuple.len();
        self.tables
            .entry(arity)
            .or_insert_with(|| ExtensionTable::new(arity))
            .add_tuple(tuple, permanent)
    }

    pub fn table(&self, arity: usize) -> Option<&ExtensionTable> {
        self.tables.get(&arity)
    }

    pub fn tables(&self) -> impl Iterator<Item = &ExtensionTable> {
        self.tables.values()
    }

    pub fn fact_count(&self) -> usize {
        self.tables.values().map(ExtensionTable::len).sum()
    }

    /// Create a retrieval on the table of the given arity.
    pub fn create_retrieval(
        &self,
        arity: usize,
        bound: Vec<bool>,
        view: View,
    ) -> Result<Retrieval<'_>, StoreError> {
        self.tables
            .get(&arity)
            .ok_or(StoreError::UnknownArity(arity))?
            .create_retrieval(bound, view)
    }
}
