//! # Knowledge Graph
//!
//! In-memory, interned triple set consumed by the index builder.
//!
//! All data structures use `BTreeSet`/`BTreeMap` for deterministic ordering.
//! Triples are stored as `(subject, predicate, object)` id tuples, so a
//! subject/predicate prefix range yields that pair's objects in id order.

use crate::dictionary::Dictionary;
use crate::primitives::{RDF_TYPE, RDFS_CLASS, XSD_ANY_TYPE, XSD_STRING};
use crate::{Term, TermId, Triple};
use std::collections::BTreeSet;

/// Ids of the vocabulary terms every graph pre-interns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub rdf_type: TermId,
    pub rdfs_class: TermId,
    pub xsd_string: TermId,
    pub xsd_any_type: TermId,
}

/// The triple set of one input graph.
#[derive(Debug, Clone)]
pub struct KnowledgeGraph {
    dictionary: Dictionary,
    spo: BTreeSet<(TermId, TermId, TermId)>,
    vocabulary: Vocabulary,
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeGraph {
    /// Create an empty graph with the vocabulary terms interned.
    #[must_use]
    pub fn new() -> Self {
        let mut dictionary = Dictionary::new();
        let vocabulary = Vocabulary {
            rdf_type: dictionary.intern(Term::iri(RDF_TYPE)),
            rdfs_class: dictionary.intern(Term::iri(RDFS_CLASS)),
            xsd_string: dictionary.intern(Term::iri(XSD_STRING)),
            xsd_any_type: dictionary.intern(Term::iri(XSD_ANY_TYPE)),
        };
        Self {
            dictionary,
            spo: BTreeSet::new(),
            vocabulary,
        }
    }

    /// Insert a triple without validation. Returns `true` if it was new.
    ///
    /// A literal object's datatype IRI is interned as well, so that index
    /// construction can resolve datatypes without touching the dictionary.
    /// Use [`crate::Ingestor`] for validated insertion.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if let Some(dt) = triple.object.as_literal().and_then(|l| l.datatype.clone()) {
            self.dictionary.intern(Term::Iri(dt));
        }
        let s = self.dictionary.intern(triple.subject);
        let p = self.dictionary.intern(triple.predicate);
        let o = self.dictionary.intern(triple.object);
        self.spo.insert((s, p, o))
    }

    /// Insert many triples without validation. Returns how many were new.
    pub fn insert_all(&mut self, triples: impl IntoIterator<Item = Triple>) -> usize {
        triples
            .into_iter()
            .map(|t| self.insert(t))
            .filter(|&inserted| inserted)
            .count()
    }

    /// Check whether an interned triple is present.
    #[must_use]
    pub fn contains(&self, subject: TermId, predicate: TermId, object: TermId) -> bool {
        self.spo.contains(&(subject, predicate, object))
    }

    /// Number of distinct triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spo.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spo.is_empty()
    }

    /// All triples in deterministic order.
    pub fn triples(&self) -> impl Iterator<Item = (TermId, TermId, TermId)> + '_ {
        self.spo.iter().copied()
    }

    /// Distinct subjects in id order.
    #[must_use]
    pub fn subjects(&self) -> BTreeSet<TermId> {
        self.spo.iter().map(|&(s, _, _)| s).collect()
    }

    /// Distinct objects in id order.
    #[must_use]
    pub fn objects(&self) -> BTreeSet<TermId> {
        self.spo.iter().map(|&(_, _, o)| o).collect()
    }

    /// Objects of `(subject, predicate, ?)` in id order.
    pub fn objects_of(
        &self,
        subject: TermId,
        predicate: TermId,
    ) -> impl Iterator<Item = TermId> + '_ {
        self.spo
            .range((subject, predicate, TermId(0))..=(subject, predicate, TermId(u64::MAX)))
            .map(|&(_, _, o)| o)
    }

    /// First object of `(subject, predicate, ?)`, if any.
    #[must_use]
    pub fn value(&self, subject: TermId, predicate: TermId) -> Option<TermId> {
        self.objects_of(subject, predicate).next()
    }

    /// Resolve an id to its term.
    #[must_use]
    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.dictionary.term(id)
    }

    /// Look up the id of a term.
    #[must_use]
    pub fn id_of(&self, term: &Term) -> Option<TermId> {
        self.dictionary.id_of(term)
    }

    /// Look up the id of an IRI.
    #[must_use]
    pub fn iri_id(&self, iri: &str) -> Option<TermId> {
        self.dictionary.id_of(&Term::iri(iri))
    }

    /// The pre-interned vocabulary ids.
    #[must_use]
    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    /// Number of interned terms (including vocabulary).
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.dictionary.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
