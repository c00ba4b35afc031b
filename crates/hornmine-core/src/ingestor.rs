//! # Ingestor Module
//!
//! Triple validation and ingestion protocol.
//!
//! - Validate triples before graph mutation
//! - Reject malformed input
//! - Deduplicate identical triples
//! - No inference or enrichment

use crate::graph::KnowledgeGraph;
use crate::primitives::{MAX_IRI_LENGTH, MAX_LITERAL_LENGTH, MAX_TRIPLE_BATCH};
use crate::{HornError, Term, Triple};

/// The Ingestor validates triples and inserts them into a [`KnowledgeGraph`].
pub struct Ingestor;

impl Ingestor {
    /// Validate a triple.
    ///
    /// A triple is valid if:
    /// - The subject is an IRI or blank node
    /// - The predicate is an IRI
    /// - Every identifier is non-empty and within length limits
    /// - A literal carries at most one of datatype and language tag
    pub fn validate(triple: &Triple) -> Result<(), HornError> {
        match &triple.subject {
            Term::Iri(s) | Term::Blank(s) => Self::validate_identifier(s, "subject")?,
            Term::Literal(_) => {
                return Err(HornError::InvalidTriple(
                    "subject may not be a literal".to_string(),
                ));
            }
        }

        match &triple.predicate {
            Term::Iri(p) => Self::validate_identifier(p, "predicate")?,
            _ => {
                return Err(HornError::InvalidTriple(
                    "predicate must be an IRI".to_string(),
                ));
            }
        }

        match &triple.object {
            Term::Iri(o) | Term::Blank(o) => Self::validate_identifier(o, "object")?,
            Term::Literal(lit) => {
                if lit.lexical.len() > MAX_LITERAL_LENGTH {
                    return Err(HornError::InvalidTriple(format!(
                        "literal exceeds {} bytes",
                        MAX_LITERAL_LENGTH
                    )));
                }
                if lit.datatype.is_some() && lit.language.is_some() {
                    return Err(HornError::InvalidTriple(
                        "literal has both datatype and language tag".to_string(),
                    ));
                }
                if let Some(dt) = &lit.datatype {
                    Self::validate_identifier(dt, "datatype")?;
                }
            }
        }

        Ok(())
    }

    fn validate_identifier(value: &str, position: &str) -> Result<(), HornError> {
        if value.is_empty() {
            return Err(HornError::InvalidTriple(format!("empty {position}")));
        }
        if value.len() > MAX_IRI_LENGTH {
            return Err(HornError::InvalidTriple(format!(
                "{position} exceeds {} bytes",
                MAX_IRI_LENGTH
            )));
        }
        Ok(())
    }

    /// Validate and insert a single triple.
    ///
    /// Returns `true` if the triple was not yet present.
    pub fn ingest_triple(graph: &mut KnowledgeGraph, triple: Triple) -> Result<bool, HornError> {
        Self::validate(&triple)?;
        Ok(graph.insert(triple))
    }

    /// Validate and insert a batch of triples.
    ///
    /// The whole batch is validated before anything is inserted, so a
    /// rejected batch leaves the graph untouched. Returns the number of
    /// newly inserted triples.
    ///
    /// # Errors
    /// Returns `HornError::InvalidTriple` if:
    /// - The batch exceeds `MAX_TRIPLE_BATCH`
    /// - Any triple in the batch is invalid
    pub fn ingest_all(graph: &mut KnowledgeGraph, triples: Vec<Triple>) -> Result<usize, HornError> {
        if triples.len() > MAX_TRIPLE_BATCH {
            return Err(HornError::InvalidTriple(format!(
                "batch of {} triples exceeds maximum {}",
                triples.len(),
                MAX_TRIPLE_BATCH
            )));
        }

        for triple in &triples {
            Self::validate(triple)?;
        }

        let inserted = graph.insert_all(triples);

        tracing::debug!(inserted, total = graph.len(), "ingested triple batch");
        Ok(inserted)
    }
}

// =============================================================================
// TESTS
// =============================================================================
