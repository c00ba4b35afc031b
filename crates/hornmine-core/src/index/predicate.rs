//! Per-predicate forward/backward adjacency.

use crate::TermId;
use std::collections::{BTreeMap, BTreeSet};

/// Shared empty set returned for every missing key.
static EMPTY: BTreeSet<TermId> = BTreeSet::new();

/// Adjacency of a single predicate.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    /// subject → objects
    forwards: BTreeMap<TermId, BTreeSet<TermId>>,
    /// object → subjects
    backwards: BTreeMap<TermId, BTreeSet<TermId>>,
}

impl Adjacency {
    fn record(&mut self, lhs: TermId, rhs: TermId) {
        self.forwards.entry(lhs).or_default().insert(rhs);
        self.backwards.entry(rhs).or_default().insert(lhs);
    }

    /// Objects reachable from `lhs`; empty if none recorded.
    #[must_use]
    pub fn forwards(&self, lhs: TermId) -> &BTreeSet<TermId> {
        self.forwards.get(&lhs).unwrap_or(&EMPTY)
    }

    /// Subjects pointing at `rhs`; empty if none recorded.
    #[must_use]
    pub fn backwards(&self, rhs: TermId) -> &BTreeSet<TermId> {
        self.backwards.get(&rhs).unwrap_or(&EMPTY)
    }

    /// Whether `lhs` has at least one outgoing edge.
    #[must_use]
    pub fn has_subject(&self, lhs: TermId) -> bool {
        self.forwards.contains_key(&lhs)
    }

    /// Number of edges recorded for this predicate.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.forwards.values().map(BTreeSet::len).sum()
    }
}

/// `predicate → Adjacency` for every predicate observed in the graph.
#[derive(Debug, Clone, Default)]
pub struct PredicateMap {
    predicates: BTreeMap<TermId, Adjacency>,
}

impl PredicateMap {
    /// Build from `(lhs, predicate, rhs)` triples in a single pass.
    pub fn from_triples(triples: impl IntoIterator<Item = (TermId, TermId, TermId)>) -> Self {
        let mut map = Self::default();
        for (lhs, predicate, rhs) in triples {
            map.predicates.entry(predicate).or_default().record(lhs, rhs);
        }
        map
    }

    /// Adjacency of a predicate, if it occurs in the graph.
    #[must_use]
    pub fn get(&self, predicate: TermId) -> Option<&Adjacency> {
        self.predicates.get(&predicate)
    }

    /// `forwards[predicate][lhs]`, empty for unknown keys.
    #[must_use]
    pub fn forwards(&self, predicate: TermId, lhs: TermId) -> &BTreeSet<TermId> {
        self.get(predicate).map_or(&EMPTY, |adj| adj.forwards(lhs))
    }

    /// `backwards[predicate][rhs]`, empty for unknown keys.
    #[must_use]
    pub fn backwards(&self, predicate: TermId, rhs: TermId) -> &BTreeSet<TermId> {
        self.get(predicate).map_or(&EMPTY, |adj| adj.backwards(rhs))
    }

    /// Whether `lhs` appears as a subject of `predicate`.
    #[must_use]
    pub fn has_subject(&self, predicate: TermId, lhs: TermId) -> bool {
        self.get(predicate).is_some_and(|adj| adj.has_subject(lhs))
    }

    /// All predicates in id order.
    pub fn predicates(&self) -> impl Iterator<Item = TermId> + '_ {
        self.predicates.keys().copied()
    }

    /// Number of distinct predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}
