//! Minimal image-based support of a rule body.
//!
//! The body is walked depth-first along `GraphPattern::connections`. For an
//! internal assertion the candidate range behind it is computed from the
//! domain, narrowed by every connected sub-pattern, and then mapped back to
//! the domain side through the backward adjacency. A branch is abandoned as
//! soon as the running range drops below `min_support`.

use super::{Evaluator, Matched, SupportOutcome};
use crate::pattern::{Assertion, AssertionId, GraphPattern, Rhs, Variable};
use crate::primitives::MAX_PATTERN_DEPTH;
use crate::{HornError, TermId};
use std::collections::BTreeSet;

impl Evaluator<'_> {
    /// Support of the body rooted at `assertion` over `domain`.
    ///
    /// Returns [`SupportOutcome::BelowThreshold`] as soon as the support is
    /// known to stay below `min_support`. For a leaf the support is the
    /// number of satisfying domain entities. For an internal edge it is the
    /// sum, over the narrowed range, of each resource's backward adjacency,
    /// so a resource reached from several entities counts once per entity.
    pub fn support_of(
        &self,
        pattern: &GraphPattern,
        assertion: AssertionId,
        domain: &BTreeSet<TermId>,
        min_support: usize,
    ) -> Result<SupportOutcome, HornError> {
        let mut path = Vec::new();
        self.support_step(pattern, assertion, domain, min_support, &mut path)
    }

    fn support_step(
        &self,
        pattern: &GraphPattern,
        id: AssertionId,
        domain: &BTreeSet<TermId>,
        min_support: usize,
        path: &mut Vec<AssertionId>,
    ) -> Result<SupportOutcome, HornError> {
        self.check_cancelled()?;

        let assertion = *pattern.assertion(id)?;
        let connections = pattern.connections(id);

        if connections.is_empty() {
            let matched = match assertion {
                Assertion::Identity => Matched::from_domain(domain.clone()),
                Assertion::Edge { predicate, rhs } => self.matching(predicate, rhs, domain)?,
            };
            if matched.count < min_support {
                tracing::trace!(assertion = %id, support = matched.count, min_support, "leaf below threshold");
                return Ok(SupportOutcome::BelowThreshold);
            }
            return Ok(SupportOutcome::Measured(matched));
        }

        if path.contains(&id) {
            return Err(HornError::CyclicPattern(id));
        }
        if path.len() >= MAX_PATTERN_DEPTH {
            return Err(HornError::MalformedPattern(format!(
                "pattern deeper than {MAX_PATTERN_DEPTH} assertions"
            )));
        }

        let range = self.range_of(assertion, domain)?;

        path.push(id);
        let narrowed = self.narrow(pattern, connections, range, min_support, path);
        path.pop();

        match narrowed? {
            Some(range) => Ok(SupportOutcome::Measured(self.back_propagate(assertion, range))),
            None => {
                tracing::trace!(assertion = %id, min_support, "range pruned below threshold");
                Ok(SupportOutcome::BelowThreshold)
            }
        }
    }

    /// Resources reachable across `assertion` from `domain`.
    fn range_of(
        &self,
        assertion: Assertion,
        domain: &BTreeSet<TermId>,
    ) -> Result<BTreeSet<TermId>, HornError> {
        match assertion {
            Assertion::Identity => Ok(domain.clone()),
            Assertion::Edge {
                predicate,
                rhs: Rhs::Variable(Variable::ObjectType(class)),
            } => Ok(domain
                .iter()
                .flat_map(|&entity| self.index.predicates.forwards(predicate, entity))
                .copied()
                .filter(|&resource| self.index.object_types.has_type(resource, class))
                .collect()),
            Assertion::Edge { predicate, .. } => Err(HornError::MalformedPattern(format!(
                "connected assertion on predicate {predicate} needs an object-typed variable"
            ))),
        }
    }

    /// Narrow `range` by every connection; `None` once it falls below
    /// `min_support`.
    fn narrow(
        &self,
        pattern: &GraphPattern,
        connections: &[AssertionId],
        mut range: BTreeSet<TermId>,
        min_support: usize,
        path: &mut Vec<AssertionId>,
    ) -> Result<Option<BTreeSet<TermId>>, HornError> {
        // Structural pass: a resource can only continue into a connection if
        // it is a subject of that connection's predicate.
        for &connection in connections {
            if range.len() < min_support {
                return Ok(None);
            }
            if let Some(predicate) = pattern.assertion(connection)?.predicate() {
                range.retain(|&resource| self.index.predicates.has_subject(predicate, resource));
            }
        }

        for &connection in connections {
            if range.len() < min_support {
                return Ok(None);
            }
            match self.support_step(pattern, connection, &range, min_support, path)? {
                SupportOutcome::Measured(matched) if matched.count >= min_support => {
                    range.retain(|resource| matched.domain.contains(resource));
                }
                _ => return Ok(None),
            }
        }

        if range.len() < min_support {
            return Ok(None);
        }
        Ok(Some(range))
    }

    /// Map a narrowed range back onto the domain side of `assertion`.
    fn back_propagate(&self, assertion: Assertion, range: BTreeSet<TermId>) -> Matched {
        match assertion {
            Assertion::Identity => Matched::from_domain(range),
            Assertion::Edge { predicate, .. } => {
                let mut count: usize = 0;
                let mut domain = BTreeSet::new();
                for resource in range {
                    let subjects = self.index.predicates.backwards(predicate, resource);
                    count = count.saturating_add(subjects.len());
                    domain.extend(subjects.iter().copied());
                }
                Matched { count, domain }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::KnowledgeGraph;
    use crate::index::GraphIndex;
    use crate::primitives::RDF_TYPE;
    use crate::{Literal, Term, Triple};
    use std::sync::atomic::AtomicBool;

    /// a --p1--> x1 --p2--> y
    /// b --p1--> x2 --p2--> z
    /// c --p1--> x3
    /// x1, x2, x3 are of class X.
    fn fixture() -> (KnowledgeGraph, GraphIndex) {
        let mut g = KnowledgeGraph::new();
        let iri = Term::iri;
        for (s, p, o) in [
            ("a", "p1", "x1"),
            ("b", "p1", "x2"),
            ("c", "p1", "x3"),
            ("x1", "p2", "y"),
            ("x2", "p2", "z"),
            ("x1", RDF_TYPE, "X"),
            ("x2", RDF_TYPE, "X"),
            ("x3", RDF_TYPE, "X"),
        ] {
            g.insert(Triple::new(iri(s), iri(p), iri(o)));
        }
        let index = GraphIndex::build(&g);
        (g, index)
    }

    fn id(g: &KnowledgeGraph, name: &str) -> TermId {
        g.iri_id(name).expect("term")
    }

    fn entities(g: &KnowledgeGraph, names: &[&str]) -> BTreeSet<TermId> {
        names.iter().map(|n| id(g, n)).collect()
    }

    #[test]
    fn leaf_counts_matching_entities() {
        let (g, index) = fixture();
        let pattern = GraphPattern::new(Assertion::value(id(&g, "p1"), id(&g, "x1")));

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &entities(&g, &["a", "b", "c"]), 1)
            .expect("support");

        assert_eq!(outcome.value(), 1);
        assert_eq!(outcome.into_domain(), entities(&g, &["a"]));
    }

    #[test]
    fn leaf_below_threshold_is_pruned() {
        let (g, index) = fixture();
        let pattern = GraphPattern::new(Assertion::value(id(&g, "p1"), id(&g, "x1")));

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &entities(&g, &["a", "b", "c"]), 2)
            .expect("support");

        assert_eq!(outcome, SupportOutcome::BelowThreshold);
    }

    #[test]
    fn identity_leaf_passes_domain_through() {
        let (g, index) = fixture();
        let pattern = GraphPattern::new(Assertion::Identity);
        let domain = entities(&g, &["a", "c"]);

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &domain, 0)
            .expect("support");

        assert_eq!(outcome, SupportOutcome::Measured(Matched::from_domain(domain)));
    }

    #[test]
    fn identity_leaf_below_threshold_is_pruned() {
        let (g, index) = fixture();
        let pattern = GraphPattern::new(Assertion::Identity);

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &entities(&g, &["a", "c"]), 3)
            .expect("support");

        assert_eq!(outcome, SupportOutcome::BelowThreshold);
    }

    #[test]
    fn data_type_leaf_counts_literal_defaults() {
        let (mut g, _) = fixture();
        for (subject, name) in [
            ("a", Literal::tagged("Ann", "en")),
            ("b", Literal::tagged("Bea", "nl")),
            ("c", Literal::plain("Cor")),
        ] {
            g.insert(Triple::new(
                Term::iri(subject),
                Term::iri("name"),
                Term::Literal(name),
            ));
        }
        let index = GraphIndex::build(&g);
        let vocab = g.vocabulary();
        let evaluator = Evaluator::new(&index);
        let domain = entities(&g, &["a", "b", "c"]);

        let tagged = GraphPattern::new(Assertion::data_typed(id(&g, "name"), vocab.xsd_string));
        let outcome = evaluator
            .support_of(&tagged, tagged.root(), &domain, 2)
            .expect("support");
        assert_eq!(outcome.value(), 2);
        assert_eq!(outcome.into_domain(), entities(&g, &["a", "b"]));

        let plain = GraphPattern::new(Assertion::data_typed(id(&g, "name"), vocab.xsd_any_type));
        let outcome = evaluator
            .support_of(&plain, plain.root(), &domain, 1)
            .expect("support");
        assert_eq!(outcome.into_domain(), entities(&g, &["c"]));

        let outcome = evaluator
            .support_of(&plain, plain.root(), &domain, 2)
            .expect("support");
        assert_eq!(outcome, SupportOutcome::BelowThreshold);
    }

    #[test]
    fn second_hop_narrows_domain() {
        let (g, index) = fixture();
        let mut pattern = GraphPattern::new(Assertion::Identity);
        let hop = pattern
            .attach(pattern.root(), Assertion::object_typed(id(&g, "p1"), id(&g, "X")))
            .expect("attach");
        pattern
            .attach(hop, Assertion::value(id(&g, "p2"), id(&g, "y")))
            .expect("attach");

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &entities(&g, &["a", "b", "c"]), 1)
            .expect("support");

        assert_eq!(outcome.value(), 1);
        assert_eq!(outcome.into_domain(), entities(&g, &["a"]));
    }

    #[test]
    fn structural_pass_drops_resources_without_next_edge() {
        let (g, index) = fixture();
        let mut pattern = GraphPattern::new(Assertion::object_typed(id(&g, "p1"), id(&g, "X")));
        pattern
            .attach(pattern.root(), Assertion::object_typed(id(&g, "p2"), id(&g, "X")))
            .expect("attach");

        // x3 has no p2 edge, so c can never satisfy the body; y and z are
        // not of class X, so nobody does.
        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &entities(&g, &["a", "b", "c"]), 1)
            .expect("support");

        assert_eq!(outcome, SupportOutcome::BelowThreshold);
    }

    #[test]
    fn internal_edge_sums_backward_sets() {
        let (g, index) = fixture();
        let mut pattern = GraphPattern::new(Assertion::object_typed(id(&g, "p1"), id(&g, "X")));
        pattern
            .attach(pattern.root(), Assertion::Identity)
            .expect("attach");

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &entities(&g, &["a", "b", "c"]), 3)
            .expect("support");

        assert_eq!(outcome.value(), 3);
        assert_eq!(outcome.into_domain(), entities(&g, &["a", "b", "c"]));
    }

    #[test]
    fn internal_edge_without_object_type_is_malformed() {
        let (g, index) = fixture();
        let mut pattern = GraphPattern::new(Assertion::value(id(&g, "p1"), id(&g, "x1")));
        pattern
            .attach(pattern.root(), Assertion::Identity)
            .expect("attach");

        let result = Evaluator::new(&index).support_of(
            &pattern,
            pattern.root(),
            &entities(&g, &["a"]),
            0,
        );
        assert!(matches!(result, Err(HornError::MalformedPattern(_))));
    }

    #[test]
    fn cyclic_connections_are_rejected() {
        let (g, index) = fixture();
        let mut pattern = GraphPattern::new(Assertion::Identity);
        let first = pattern
            .attach(pattern.root(), Assertion::object_typed(id(&g, "p1"), id(&g, "X")))
            .expect("attach");
        let second = pattern
            .attach(first, Assertion::object_typed(id(&g, "p2"), id(&g, "X")))
            .expect("attach");
        pattern.connect(second, first).expect("connect");

        let result = Evaluator::new(&index).support_of(
            &pattern,
            pattern.root(),
            &entities(&g, &["a", "b", "c"]),
            0,
        );
        assert!(matches!(result, Err(HornError::CyclicPattern(a)) if a == first));
    }

    #[test]
    fn cancelled_evaluation_aborts() {
        let (g, index) = fixture();
        let pattern = GraphPattern::new(Assertion::Identity);
        let flag = AtomicBool::new(true);

        let result = Evaluator::new(&index)
            .with_cancellation(&flag)
            .support_of(&pattern, pattern.root(), &entities(&g, &["a"]), 0);
        assert!(matches!(result, Err(HornError::Cancelled)));
    }
}
