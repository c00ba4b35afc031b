//! # Rule Patterns
//!
//! Structures a candidate Horn clause is made of:
//! - [`Assertion`]: one edge template `predicate(e, rhs)`, or the identity hop
//! - [`GraphPattern`]: a rule body, i.e. assertions plus their connections
//! - [`Clause`]: head assertion, body pattern and the scores written back
//!
//! Patterns are produced by a rule generator and only read by the evaluators.

use crate::{HornError, TermId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// =============================================================================
// VARIABLES & ASSERTIONS
// =============================================================================

/// A typed placeholder on the right-hand side of an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// Marker without type constraint. Never scorable on its own.
    Untyped,
    /// Any entity whose class is the given class.
    ObjectType(TermId),
    /// Any literal whose datatype is the given datatype.
    DataType(TermId),
}

/// Right-hand side of an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rhs {
    /// A concrete entity or literal.
    Value(TermId),
    /// A typed variable.
    Variable(Variable),
}

/// One edge constraint of a rule: "for e in the domain, predicate(e, rhs)".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Assertion {
    /// The domain entity itself; passes the domain through unchanged.
    Identity,
    /// A predicate edge from the domain entity to `rhs`.
    Edge { predicate: TermId, rhs: Rhs },
}

impl Assertion {
    /// `predicate(e, value)` for a concrete value.
    #[must_use]
    pub fn value(predicate: TermId, value: TermId) -> Self {
        Self::Edge {
            predicate,
            rhs: Rhs::Value(value),
        }
    }

    /// `predicate(e, ?x)` with `type(?x, class)`.
    #[must_use]
    pub fn object_typed(predicate: TermId, class: TermId) -> Self {
        Self::Edge {
            predicate,
            rhs: Rhs::Variable(Variable::ObjectType(class)),
        }
    }

    /// `predicate(e, ?x)` with `datatype(?x, datatype)`.
    #[must_use]
    pub fn data_typed(predicate: TermId, datatype: TermId) -> Self {
        Self::Edge {
            predicate,
            rhs: Rhs::Variable(Variable::DataType(datatype)),
        }
    }

    /// The predicate, or `None` for the identity hop.
    #[must_use]
    pub fn predicate(&self) -> Option<TermId> {
        match self {
            Self::Identity => None,
            Self::Edge { predicate, .. } => Some(*predicate),
        }
    }
}

// =============================================================================
// GRAPH PATTERN
// =============================================================================

/// Handle of an assertion inside a [`GraphPattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssertionId(pub usize);

impl fmt::Display for AssertionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rule body.
///
/// Assertions live in an arena; `connections[a]` lists the assertions
/// attached to the far end of `a`. Patterns grown with [`GraphPattern::attach`]
/// are trees rooted at `root`. [`GraphPattern::connect`] can add further
/// edges; evaluation rejects a pattern whose connections loop back onto the
/// current path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPattern {
    assertions: Vec<Assertion>,
    root: AssertionId,
    connections: BTreeMap<AssertionId, Vec<AssertionId>>,
    /// depth → assertions at that depth
    distances: BTreeMap<usize, Vec<AssertionId>>,
    depths: Vec<usize>,
}

impl GraphPattern {
    /// Create a pattern holding only its root assertion (at depth 0).
    #[must_use]
    pub fn new(root: Assertion) -> Self {
        let root_id = AssertionId(0);
        Self {
            assertions: vec![root],
            root: root_id,
            connections: BTreeMap::from([(root_id, Vec::new())]),
            distances: BTreeMap::from([(0, vec![root_id])]),
            depths: vec![0],
        }
    }

    /// Attach `assertion` to the far end of `parent`, one level deeper.
    pub fn attach(
        &mut self,
        parent: AssertionId,
        assertion: Assertion,
    ) -> Result<AssertionId, HornError> {
        let parent_depth = self.depth_of(parent)?;
        let id = AssertionId(self.assertions.len());
        let depth = parent_depth.saturating_add(1);

        self.assertions.push(assertion);
        self.depths.push(depth);
        self.connections.insert(id, Vec::new());
        self.connections.entry(parent).or_default().push(id);
        self.distances.entry(depth).or_default().push(id);

        Ok(id)
    }

    /// Add a connection `from → to` between two existing assertions.
    pub fn connect(&mut self, from: AssertionId, to: AssertionId) -> Result<(), HornError> {
        self.assertion(from)?;
        self.assertion(to)?;
        let targets = self.connections.entry(from).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
        Ok(())
    }

    /// The assertion behind an id.
    pub fn assertion(&self, id: AssertionId) -> Result<&Assertion, HornError> {
        self.assertions
            .get(id.0)
            .ok_or_else(|| HornError::MalformedPattern(format!("unknown assertion {id}")))
    }

    /// Assertions directly connected to `id`; empty for leaves.
    #[must_use]
    pub fn connections(&self, id: AssertionId) -> &[AssertionId] {
        self.connections.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Depth of an assertion below the root.
    pub fn depth_of(&self, id: AssertionId) -> Result<usize, HornError> {
        self.depths
            .get(id.0)
            .copied()
            .ok_or_else(|| HornError::MalformedPattern(format!("unknown assertion {id}")))
    }

    #[must_use]
    pub fn root(&self) -> AssertionId {
        self.root
    }

    /// depth → assertions at that depth.
    #[must_use]
    pub fn distances(&self) -> &BTreeMap<usize, Vec<AssertionId>> {
        &self.distances
    }

    /// Deepest level of the pattern.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.distances.keys().next_back().copied().unwrap_or(0)
    }

    /// All assertions with their ids.
    pub fn assertions(&self) -> impl Iterator<Item = (AssertionId, &Assertion)> {
        self.assertions
            .iter()
            .enumerate()
            .map(|(i, a)| (AssertionId(i), a))
    }

    /// Number of assertions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }
}

// =============================================================================
// CLAUSE
// =============================================================================

/// A candidate rule `head ← body` with its scores.
///
/// `domain` holds the candidate entities before scoring and the entities
/// satisfying the body afterwards. The probabilities are owned by the rule
/// generator and carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub head: Assertion,
    pub body: GraphPattern,
    pub domain: BTreeSet<TermId>,
    pub support: usize,
    pub confidence: usize,
    pub domain_probability: f64,
    pub range_probability: f64,
}

impl Clause {
    /// Create an unscored clause over a candidate domain.
    #[must_use]
    pub fn new(head: Assertion, body: GraphPattern, domain: BTreeSet<TermId>) -> Self {
        Self {
            head,
            body,
            domain,
            support: 0,
            confidence: 0,
            domain_probability: 1.0,
            range_probability: 1.0,
        }
    }

    /// Depth of the body.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.body.depth()
    }
}

// =============================================================================
// TESTS
// =============================================================================
