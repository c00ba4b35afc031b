//! # Clause Scoring
//!
//! Combines the evaluators into the keep/discard decision for a candidate
//! clause: body support first, head confidence over the surviving domain
//! second. Scores are written back into the [`Clause`].

use crate::evaluate::Evaluator;
use crate::pattern::Clause;
use crate::{HornError, TermId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Minimum support and confidence a clause must reach to be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_support: usize,
    pub min_confidence: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_support: 1,
            min_confidence: 1,
        }
    }
}

/// Decision for a scored clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Support and confidence both reach their thresholds.
    Accepted,
    /// The body was pruned; support and domain were left untouched.
    BelowSupport,
    /// The body is supported but the head is not confident enough.
    BelowConfidence,
}

impl Verdict {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Score one clause in place.
///
/// The body is evaluated from its root over `clause.domain`. The matched
/// entities are restricted to that candidate domain, and the clause support
/// is the number of candidates left. When it reaches the support threshold,
/// `support` and the narrowed `domain` are written back and the head's
/// confidence is computed over that domain.
pub fn score_clause(
    evaluator: &Evaluator<'_>,
    clause: &mut Clause,
    thresholds: Thresholds,
) -> Result<Verdict, HornError> {
    let outcome = evaluator.support_of(
        &clause.body,
        clause.body.root(),
        &clause.domain,
        thresholds.min_support,
    )?;

    if !outcome.meets(thresholds.min_support) {
        return Ok(Verdict::BelowSupport);
    }

    // An internal root maps back through the backward adjacency, which can
    // reach entities outside the candidate domain.
    let narrowed: BTreeSet<TermId> = outcome
        .into_domain()
        .intersection(&clause.domain)
        .copied()
        .collect();
    if narrowed.len() < thresholds.min_support {
        tracing::trace!(
            support = narrowed.len(),
            min_support = thresholds.min_support,
            "body support below threshold within candidate domain"
        );
        return Ok(Verdict::BelowSupport);
    }

    clause.support = narrowed.len();
    clause.domain = narrowed;

    let confidence = evaluator.confidence_of(&clause.head, &clause.domain)?;
    clause.confidence = confidence.count;

    if clause.confidence >= thresholds.min_confidence {
        Ok(Verdict::Accepted)
    } else {
        Ok(Verdict::BelowConfidence)
    }
}

/// Score many clauses in parallel against one shared index.
///
/// Results are returned in input order. One clause failing does not stop
/// the others.
pub fn score_batch(
    evaluator: &Evaluator<'_>,
    clauses: &mut [Clause],
    thresholds: Thresholds,
) -> Vec<Result<Verdict, HornError>> {
    let verdicts: Vec<_> = clauses
        .par_iter_mut()
        .map(|clause| score_clause(evaluator, clause, thresholds))
        .collect();

    let accepted = verdicts
        .iter()
        .filter(|v| matches!(v, Ok(Verdict::Accepted)))
        .count();
    tracing::debug!(clauses = verdicts.len(), accepted, "scored clause batch");

    verdicts
}

// =============================================================================
// TESTS
// =============================================================================
