//! # Rule Evaluation
//!
//! Support and confidence of candidate rules against a [`GraphIndex`].
//!
//! - [`Evaluator::confidence_of`] counts the domain entities satisfying a head
//!   assertion.
//! - [`Evaluator::support_of`] computes the minimal image-based support of a
//!   rule body, pruning every branch that can no longer reach `min_support`.
//!
//! Evaluation never mutates the index and keeps no state between calls, so an
//! `Evaluator` can be copied freely across threads.

mod confidence;
mod support;

use crate::index::GraphIndex;
use crate::pattern::{Rhs, Variable};
use crate::{HornError, TermId};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// Result of a confidence computation or a successful support computation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Matched {
    /// Number of satisfying entities (see `support_of` for the internal case).
    pub count: usize,
    /// The satisfying entities.
    pub domain: BTreeSet<TermId>,
}

impl Matched {
    fn from_domain(domain: BTreeSet<TermId>) -> Self {
        Self {
            count: domain.len(),
            domain,
        }
    }
}

/// Outcome of [`Evaluator::support_of`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportOutcome {
    /// Support cannot reach the threshold; the candidate should be discarded.
    BelowThreshold,
    /// Support was computed.
    Measured(Matched),
}

impl SupportOutcome {
    /// Support as a signed value, `-1` for [`SupportOutcome::BelowThreshold`].
    #[must_use]
    pub fn value(&self) -> i64 {
        match self {
            Self::BelowThreshold => -1,
            Self::Measured(m) => m.count as i64,
        }
    }

    /// Whether the outcome reaches `min_support`.
    #[must_use]
    pub fn meets(&self, min_support: usize) -> bool {
        matches!(self, Self::Measured(m) if m.count >= min_support)
    }

    /// The matched entities; empty when below threshold.
    #[must_use]
    pub fn into_domain(self) -> BTreeSet<TermId> {
        match self {
            Self::BelowThreshold => BTreeSet::new(),
            Self::Measured(m) => m.domain,
        }
    }
}

/// Stateless evaluator over a borrowed index.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    index: &'a GraphIndex,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over a built index.
    #[must_use]
    pub fn new(index: &'a GraphIndex) -> Self {
        Self {
            index,
            cancel: None,
        }
    }

    /// Abort with `HornError::Cancelled` once `flag` is set.
    ///
    /// The flag is checked before every recursive support step.
    #[must_use]
    pub fn with_cancellation(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn check_cancelled(&self) -> Result<(), HornError> {
        if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(HornError::Cancelled);
        }
        Ok(())
    }

    /// Reject right-hand sides no evaluator branch can score.
    fn ensure_scorable(predicate: TermId, rhs: Rhs) -> Result<(), HornError> {
        if rhs == Rhs::Variable(Variable::Untyped) {
            return Err(HornError::MalformedPattern(format!(
                "untyped variable on predicate {predicate}"
            )));
        }
        Ok(())
    }

    /// Whether `predicate(entity, rhs)` holds.
    fn holds(&self, predicate: TermId, rhs: Rhs, entity: TermId) -> bool {
        let forwards = self.index.predicates.forwards(predicate, entity);
        match rhs {
            Rhs::Value(value) => forwards.contains(&value),
            Rhs::Variable(Variable::ObjectType(class)) => forwards
                .iter()
                .any(|&r| self.index.object_types.has_type(r, class)),
            Rhs::Variable(Variable::DataType(datatype)) => forwards
                .iter()
                .any(|&r| self.index.data_types.has_type(r, datatype)),
            Rhs::Variable(Variable::Untyped) => false,
        }
    }

    /// Entities of `domain` for which `predicate(e, rhs)` holds.
    fn matching(
        &self,
        predicate: TermId,
        rhs: Rhs,
        domain: &BTreeSet<TermId>,
    ) -> Result<Matched, HornError> {
        Self::ensure_scorable(predicate, rhs)?;
        let matched = domain
            .iter()
            .copied()
            .filter(|&entity| self.holds(predicate, rhs, entity))
            .collect();
        Ok(Matched::from_domain(matched))
    }
}
