//! # hornmine-core
//!
//! Graph indexes and rule scoring for Horn-clause mining - THE LOGIC.
//!
//! A rule generator proposes candidate clauses `head ← body` over a knowledge
//! graph; this crate decides which of them are worth keeping:
//!
//! 1. [`KnowledgeGraph`] interns the input triples ([`Ingestor`] validates them).
//! 2. [`GraphIndex::build`] derives the predicate, object-type and data-type maps.
//! 3. [`Evaluator::support_of`] computes the minimal image-based support of a
//!    body, abandoning a branch as soon as it cannot reach `min_support`.
//! 4. [`Evaluator::confidence_of`] counts the body-satisfying entities that
//!    also satisfy the head.
//! 5. [`score_clause`] / [`score_batch`] combine both into a [`Verdict`].
//!
//! ## Constraints
//!
//! - Deterministic: `BTreeMap`/`BTreeSet` only, counts are integers
//! - The index is read-only after construction; evaluators only borrow it
//! - No async, no file I/O, no network

// =============================================================================
// MODULES
// =============================================================================

pub mod dictionary;
pub mod evaluate;
pub mod graph;
pub mod index;
pub mod ingestor;
pub mod pattern;
pub mod primitives;
pub mod scoring;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{HornError, Literal, Term, TermId, Triple};

// =============================================================================
// RE-EXPORTS: Graph & Indexes
// =============================================================================

pub use dictionary::Dictionary;
pub use graph::{KnowledgeGraph, Vocabulary};
pub use index::{Adjacency, GraphIndex, IndexStats, PredicateMap, TypeMap};
pub use ingestor::Ingestor;

// =============================================================================
// RE-EXPORTS: Patterns & Evaluation
// =============================================================================

pub use evaluate::{Evaluator, Matched, SupportOutcome};
pub use pattern::{Assertion, AssertionId, Clause, GraphPattern, Rhs, Variable};
pub use scoring::{Thresholds, Verdict, score_batch, score_clause};
