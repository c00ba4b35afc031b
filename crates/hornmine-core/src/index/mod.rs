//! # Graph Index
//!
//! The three read-only lookup structures every evaluator call consults:
//!
//! | Map | Keyed by | Yields |
//! |-----|----------|--------|
//! | `predicates` | predicate, entity | forward objects / backward subjects |
//! | `object_types` | IRI subject | its class |
//! | `data_types` | literal | its datatype |
//!
//! A `GraphIndex` is built once per [`KnowledgeGraph`] and never mutated
//! afterwards. It is `Send + Sync`, so any number of evaluations may share
//! it without locking.

mod predicate;
mod types;

pub use predicate::{Adjacency, PredicateMap};
pub use types::TypeMap;

use crate::graph::KnowledgeGraph;
use serde::{Deserialize, Serialize};

/// Read-only indexes of one knowledge graph.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    pub predicates: PredicateMap,
    pub object_types: TypeMap,
    pub data_types: TypeMap,
}

impl GraphIndex {
    /// Build all three maps from the graph.
    #[must_use]
    pub fn build(graph: &KnowledgeGraph) -> Self {
        let index = Self {
            predicates: PredicateMap::from_triples(graph.triples()),
            object_types: TypeMap::object_types(graph),
            data_types: TypeMap::data_types(graph),
        };

        let stats = index.stats();
        tracing::debug!(
            triples = graph.len(),
            predicates = stats.predicates,
            typed_objects = stats.typed_objects,
            classes = stats.classes,
            typed_literals = stats.typed_literals,
            datatypes = stats.datatypes,
            "built graph index"
        );

        index
    }

    /// Size statistics of the index.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            predicates: self.predicates.len(),
            edges: self
                .predicates
                .predicates()
                .filter_map(|p| self.predicates.get(p))
                .map(Adjacency::edge_count)
                .sum(),
            typed_objects: self.object_types.len(),
            classes: self.object_types.types().count(),
            typed_literals: self.data_types.len(),
            datatypes: self.data_types.types().count(),
        }
    }
}

/// Sizes of a [`GraphIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub predicates: usize,
    pub edges: usize,
    pub typed_objects: usize,
    pub classes: usize,
    pub typed_literals: usize,
    pub datatypes: usize,
}
