//! # Term Dictionary
//!
//! Interns [`Term`]s into compact [`TermId`] handles.
//!
//! Ids are assigned sequentially in insertion order and never reused, so a
//! given graph always yields the same ids when loaded in the same order.

use crate::{Term, TermId};
use std::collections::BTreeMap;

/// Bidirectional Term ↔ TermId mapping.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    ids: BTreeMap<Term, TermId>,
    terms: Vec<Term>,
}

impl Dictionary {
    /// Create an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a term, returning its existing id if already present.
    pub fn intern(&mut self, term: Term) -> TermId {
        if let Some(&id) = self.ids.get(&term) {
            return id;
        }
        let id = TermId(self.terms.len() as u64);
        self.terms.push(term.clone());
        self.ids.insert(term, id);
        id
    }

    /// Look up the id of a term without interning it.
    #[must_use]
    pub fn id_of(&self, term: &Term) -> Option<TermId> {
        self.ids.get(term).copied()
    }

    /// Resolve an id back to its term.
    #[must_use]
    pub fn term(&self, id: TermId) -> Option<&Term> {
        usize::try_from(id.0).ok().and_then(|i| self.terms.get(i))
    }

    /// Number of interned terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
