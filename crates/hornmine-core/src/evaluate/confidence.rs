//! Confidence of a rule head over a body-satisfying domain.

use super::{Evaluator, Matched};
use crate::pattern::Assertion;
use crate::{HornError, TermId};
use std::collections::BTreeSet;

impl Evaluator<'_> {
    /// Count the entities of `domain` that satisfy `assertion`.
    ///
    /// `domain` is expected to satisfy the rule body already, so this is a
    /// plain count over the whole domain without pruning. An identity head
    /// is satisfied by every entity.
    pub fn confidence_of(
        &self,
        assertion: &Assertion,
        domain: &BTreeSet<TermId>,
    ) -> Result<Matched, HornError> {
        match *assertion {
            Assertion::Identity => Ok(Matched::from_domain(domain.clone())),
            Assertion::Edge { predicate, rhs } => self.matching(predicate, rhs, domain),
        }
    }
}
