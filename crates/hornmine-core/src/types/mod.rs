//! # Core Type Definitions
//!
//! This module contains the value types shared by every layer of hornmine-core:
//! - Interned identifiers (`TermId`)
//! - RDF-style terms (`Term`, `Literal`) and statements (`Triple`)
//! - Error types (`HornError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Carry no floating-point state

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::pattern::AssertionId;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Interned handle for a [`Term`].
///
/// Entities, literals, predicates, classes and datatypes are all addressed by
/// `TermId`. Two ids are equal iff they were interned from equal terms, so
/// comparing ids is both value and identity comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TermId(pub u64);

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// TERMS
// =============================================================================

/// A literal value with optional datatype IRI or language tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// The lexical form.
    pub lexical: String,
    /// Explicit datatype IRI, if any.
    #[serde(default)]
    pub datatype: Option<String>,
    /// Language tag, if any.
    #[serde(default)]
    pub language: Option<String>,
}

impl Literal {
    /// A plain literal without datatype or language.
    #[must_use]
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    /// A literal with an explicit datatype IRI.
    #[must_use]
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// A language-tagged literal.
    #[must_use]
    pub fn tagged(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }
}

/// A node or edge label of the knowledge graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    /// A named resource.
    Iri(String),
    /// An anonymous resource.
    Blank(String),
    /// A literal value.
    Literal(Literal),
}

impl Term {
    /// Create an IRI term.
    #[must_use]
    pub fn iri(s: impl Into<String>) -> Self {
        Self::Iri(s.into())
    }

    /// Create a blank node term.
    #[must_use]
    pub fn blank(s: impl Into<String>) -> Self {
        Self::Blank(s.into())
    }

    /// Create a plain literal term.
    #[must_use]
    pub fn literal(s: impl Into<String>) -> Self {
        Self::Literal(Literal::plain(s))
    }

    #[must_use]
    pub fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Get the literal payload, if this is a literal.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::Blank(label) => write!(f, "_:{label}"),
            Self::Literal(lit) => {
                write!(f, "\"{}\"", lit.lexical)?;
                if let Some(lang) = &lit.language {
                    write!(f, "@{lang}")?;
                } else if let Some(dt) = &lit.datatype {
                    write!(f, "^^<{dt}>")?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// TRIPLE
// =============================================================================

/// A `(subject, predicate, object)` statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    /// Create a new triple.
    #[must_use]
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in hornmine.
///
/// Falling below a support threshold is NOT an error; it is reported through
/// `SupportOutcome::BelowThreshold`. Variants here are either bad input data
/// or contract violations by the rule generator, and abort the evaluation of
/// the candidate at hand.
#[derive(Debug, Error)]
pub enum HornError {
    /// A triple failed validation and was not inserted.
    #[error("Invalid triple: {0}")]
    InvalidTriple(String),

    /// A term referenced by a rule does not occur in the graph dictionary.
    #[error("Unknown term: {0}")]
    UnknownTerm(String),

    /// A rule pattern violates the evaluator's structural contract.
    #[error("Malformed pattern: {0}")]
    MalformedPattern(String),

    /// An assertion was reached again on its own recursion path.
    #[error("Cyclic pattern: assertion {0} revisited during evaluation")]
    CyclicPattern(AssertionId),

    /// Evaluation was cancelled by the caller.
    #[error("Evaluation cancelled")]
    Cancelled,

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A configuration value could not be used.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================
