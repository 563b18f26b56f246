//! Arity-partitioned fact tables with indexed retrieval cursors.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

use mimizuku_core::{DlIri, ModelNodeId};

use crate::StoreError;

/// One position of a stored fact: a predicate identifier or a model node.
///
/// Concept assertions are 2-tuples `[Predicate(concept), Node(instance)]`,
/// role assertions 3-tuples `[Predicate(role), Node(from), Node(to)]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactTerm {
    Predicate(DlIri),
    Node(ModelNodeId),
}

/// A stored fact, one term per position. Assertions are 2- or 3-tuples, so
/// tuples stay inline.
pub type FactTuple = SmallVec<[FactTerm; 4]>;

/// Which facts a retrieval sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Every fact currently in the table.
    Total,
    /// Only facts added as permanent (asserted, as opposed to derived).
    Permanent,
}

#[derive(Debug, Clone)]
struct StoredFact {
    tuple: FactTuple,
    permanent: bool,
}

/// Append-mostly table of facts with a fixed arity.
///
/// Each logical tuple is stored at most once; adding an existing tuple is a
/// no-op, except that re-adding it as permanent upgrades the stored fact.
/// Every position carries an index from term to posting list, and a
/// retrieval picks the most selective index for its bound positions.
#[derive(Debug, Clone)]
pub struct ExtensionTable {
    arity: usize,
    facts: Vec<StoredFact>,
    by_tuple: HashMap<FactTuple, usize>,
    by_position: Vec<HashMap<FactTerm, Vec<usize>>>,
}

impl ExtensionTable {
    pub fn new(arity: usize) -> Self {
        Self {
            arity,
            facts: Vec::new(),
            by_tuple: HashMap::new(),
            by_position: (0..arity).map(|_| HashMap::new()).collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Add a tuple. Returns `true` if the tuple was not present before.
    pub fn add_tuple(
        &mut self,
        tuple: impl Into<FactTuple>,
        permanent: bool,
    ) -> Result<bool, StoreError> {
        let tuple = tuple.into();
        if tuple.len() != self.arity {
            return Err(StoreError::ArityMismatch {
                expected: self.arity,
                actual: tuple.len(),
            });
        }
        if let Some(&index) = self.by_tuple.get(&tuple) {
            if permanent {
                self.facts[index].permanent = true;
            }
            return Ok(false);
        }
        let index = self.facts.len();
        for (position, term) in tuple.iter().enumerate() {
            self.by_position[position]
                .entry(term.clone())
                .or_default()
                .push(index);
        }
        self.by_tuple.insert(tuple.clone(), index);
        self.facts.push(StoredFact { tuple, permanent });
        Ok(true)
    }

    pub fn contains(&self, tuple: &[FactTerm]) -> bool {
        self.by_tuple.contains_key(&FactTuple::from(tuple))
    }

    /// Create a cursor over facts matching a binding pattern.
    ///
    /// `bound` marks which positions will carry a binding; it must have one
    /// entry per position. Fill the bindings buffer, then call
    /// [`Retrieval::open`].
    pub fn create_retrieval(&self, bound: Vec<bool>, view: View) -> Result<Retrieval<'_>, StoreError> {
        if bound.len() != self.arity {
            return Err(StoreError::ArityMismatch {
                expected: self.arity,
                actual: bound.len(),
            });
        }
        Ok(Retrieval {
            table: self,
            bindings: vec![None; self.arity],
            bound,
            view,
            candidates: Candidates::All(0),
            buffer: FactTuple::new(),
            opened: false,
        })
    }
}

#[derive(Debug)]
enum Candidates<'a> {
    /// Scan the whole table from the given fact index.
    All(usize),
    /// Walk a posting list from the given list offset.
    Posting(&'a [usize], usize),
}

/// Cursor over the facts of one table that match a binding pattern.
///
/// Usage mirrors the table's expected access pattern: write the bindings
/// for the bound positions into [`bindings_mut`](Self::bindings_mut), call
/// [`open`](Self::open), then step with [`next`](Self::next) until
/// [`after_last`](Self::after_last) holds. The fact under the cursor is
/// copied into the cursor's own buffer; internal table storage is never
/// handed out.
#[derive(Debug)]
pub struct Retrieval<'a> {
    table: &'a ExtensionTable,
    bound: Vec<bool>,
    bindings: Vec<Option<FactTerm>>,
    view: View,
    candidates: Candidates<'a>,
    buffer: FactTuple,
    opened: bool,
}

impl<'a> Retrieval<'a> {
    /// The bindings buffer; one slot per position, only bound positions are
    /// consulted.
    pub fn bindings_mut(&mut self) -> &mut [Option<FactTerm>] {
        &mut self.bindings
    }

    /// Position the cursor on the first matching fact.
    ///
    /// Picks the bound position with the shortest posting list as the scan
    /// source; with no bound positions the whole table is scanned.
    pub fn open(&mut self) -> Result<(), StoreError> {
        let mut best: Option<(usize, &'a [usize])> = None;
        for position in 0..self.table.arity {
            if !self.bound[position] {
                continue;
            }
            let term = self.bindings[position]
                .as_ref()
                .ok_or(StoreError::UnboundPosition(position))?;
            let posting: &'a [usize] = self.table.by_position[position]
                .get(term)
                .map(|list| list.as_slice())
                .unwrap_or(&[]);
            if best.map(|(_, b)| posting.len() < b.len()).unwrap_or(true) {
                best = Some((position, posting));
            }
        }
        self.candidates = match best {
            Some((_, posting)) => Candidates::Posting(posting, 0),
            None => Candidates::All(0),
        };
        self.opened = true;
        self.skip_to_match();
        Ok(())
    }

    /// True once the cursor has moved past the last matching fact.
    pub fn after_last(&self) -> bool {
        !self.opened || self.current_index().is_none()
    }

    /// The fact under the cursor, read from the cursor's buffer, or `None`
    /// when after the last match.
    pub fn current_tuple(&self) -> Option<&[FactTerm]> {
        if !self.opened || self.current_index().is_none() {
            return None;
        }
        Some(self.buffer.as_slice())
    }

    /// Advance to the next matching fact.
    pub fn next(&mut self) {
        match &mut self.candidates {
            Candidates::All(cursor) => *cursor += 1,
            Candidates::Posting(_, cursor) => *cursor += 1,
        }
        self.skip_to_match();
    }

    fn current_index(&self) -> Option<usize> {
        match &self.candidates {
            Candidates::All(cursor) => (*cursor < self.table.facts.len()).then_some(*cursor),
            Candidates::Posting(posting, cursor) => posting.get(*cursor).copied(),
        }
    }

    /// Advance to the next fact matching the bindings and the view, and
    /// copy it into the buffer.
    fn skip_to_match(&mut self) {
        while let Some(index) = self.current_index() {
            if self.matches(&self.table.facts[index]) {
                break;
            }
            match &mut self.candidates {
                Candidates::All(cursor) => *cursor += 1,
                Candidates::Posting(_, cursor) => *cursor += 1,
            }
        }
        self.buffer.clear();
        if let Some(index) = self.current_index() {
            self.buffer
                .extend(self.table.facts[index].tuple.iter().cloned());
        }
    }

    fn matches(&self, fact: &StoredFact) -> bool {
        if self.view == View::Permanent && !fact.permanent {
            return false;
        }
        for position in 0..self.table.arity {
            if !self.bound[position] {
                continue;
            }
            match &self.bindings[position] {
                Some(term) if *term == fact.tuple[position] => {}
                _ => return false,
            }
        }
        true
    }
}
