//! Resource ↔ type maps for object types (classes) and data types.

use crate::TermId;
use crate::graph::KnowledgeGraph;
use crate::types::Term;
use std::collections::{BTreeMap, BTreeSet};

/// Bidirectional `object → type` / `type → objects` map.
///
/// Each resource has exactly one recorded type.
#[derive(Debug, Clone, Default)]
pub struct TypeMap {
    object_to_type: BTreeMap<TermId, TermId>,
    type_to_objects: BTreeMap<TermId, BTreeSet<TermId>>,
}

impl TypeMap {
    fn record(&mut self, object: TermId, ty: TermId) {
        self.object_to_type.insert(object, ty);
        self.type_to_objects.entry(ty).or_default().insert(object);
    }

    /// Class of every IRI subject of the graph.
    ///
    /// The class is the first `rdf:type` value in id order, or `rdfs:Class`
    /// when the subject has none. Blank nodes are not typed.
    #[must_use]
    pub fn object_types(graph: &KnowledgeGraph) -> Self {
        let vocab = graph.vocabulary();
        let mut map = Self::default();
        for subject in graph.subjects() {
            if !graph.term(subject).is_some_and(Term::is_iri) {
                continue;
            }
            let class = graph
                .value(subject, vocab.rdf_type)
                .unwrap_or(vocab.rdfs_class);
            map.record(subject, class);
        }
        map
    }

    /// Datatype of every literal object of the graph.
    ///
    /// Literals without explicit datatype are `xsd:string` when language
    /// tagged and `xsd:anyType` otherwise.
    #[must_use]
    pub fn data_types(graph: &KnowledgeGraph) -> Self {
        let vocab = graph.vocabulary();
        let mut map = Self::default();
        for object in graph.objects() {
            let Some(lit) = graph.term(object).and_then(Term::as_literal) else {
                continue;
            };
            let datatype = match (&lit.datatype, &lit.language) {
                // Interned on insert, see `KnowledgeGraph::insert`.
                (Some(dt), _) => graph.iri_id(dt),
                (None, Some(_)) => Some(vocab.xsd_string),
                (None, None) => Some(vocab.xsd_any_type),
            };
            if let Some(datatype) = datatype {
                map.record(object, datatype);
            }
        }
        map
    }

    /// Recorded type of a resource, if it was indexed.
    #[must_use]
    pub fn type_of(&self, object: TermId) -> Option<TermId> {
        self.object_to_type.get(&object).copied()
    }

    /// Whether `object` is recorded with type `ty`.
    #[must_use]
    pub fn has_type(&self, object: TermId, ty: TermId) -> bool {
        self.type_of(object) == Some(ty)
    }

    /// Resources recorded with type `ty`; `None` if the type is unknown.
    #[must_use]
    pub fn members_of(&self, ty: TermId) -> Option<&BTreeSet<TermId>> {
        self.type_to_objects.get(&ty)
    }

    /// All typed resources in id order.
    pub fn objects(&self) -> impl Iterator<Item = TermId> + '_ {
        self.object_to_type.keys().copied()
    }

    /// All types in id order.
    pub fn types(&self) -> impl Iterator<Item = TermId> + '_ {
        self.type_to_objects.keys().copied()
    }

    /// Number of typed resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.object_to_type.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.object_to_type.is_empty()
    }
}
