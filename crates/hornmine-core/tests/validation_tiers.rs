//! # Validation Tier Tests (T0-T3)
//!
//! If ANY tier fails, rule scoring is INVALID.
//!
//! ## Tiers
//! - T0: Ingestion & Index Construction
//! - T1: Confidence & Single-Assertion Support
//! - T2: Multi-Hop Support
//! - T3: Contract Violations & Cancellation

use hornmine_core::primitives::RDF_TYPE;
use hornmine_core::{
    Assertion, Evaluator, GraphIndex, GraphPattern, HornError, Ingestor, KnowledgeGraph, Literal,
    SupportOutcome, Term, TermId, Triple,
};
use std::collections::BTreeSet;

fn graph_of(triples: &[(&str, &str, &str)]) -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::new();
    let triples = triples
        .iter()
        .map(|&(s, p, o)| Triple::new(Term::iri(s), Term::iri(p), Term::iri(o)))
        .collect();
    Ingestor::ingest_all(&mut graph, triples).expect("ingest");
    graph
}

fn id(graph: &KnowledgeGraph, iri: &str) -> TermId {
    graph.iri_id(iri).expect("term")
}

fn set(graph: &KnowledgeGraph, iris: &[&str]) -> BTreeSet<TermId> {
    iris.iter().map(|iri| id(graph, iri)).collect()
}

/// (a, livesIn, nl), (b, livesIn, nl), (c, livesIn, be)
fn lives_in() -> KnowledgeGraph {
    graph_of(&[
        ("a", "livesIn", "nl"),
        ("b", "livesIn", "nl"),
        ("c", "livesIn", "be"),
    ])
}

// =============================================================================
// TIER T0: INGESTION & INDEX CONSTRUCTION
// =============================================================================

mod t0_index_construction {
    use super::*;

    /// T0.1: Forward and backward adjacency mirror each other.
    #[test]
    fn predicate_map_is_bidirectional() {
        let graph = lives_in();
        let index = GraphIndex::build(&graph);
        let lives = id(&graph, "livesIn");

        assert_eq!(
            index.predicates.forwards(lives, id(&graph, "a")),
            &set(&graph, &["nl"])
        );
        assert_eq!(
            index.predicates.backwards(lives, id(&graph, "nl")),
            &set(&graph, &["a", "b"])
        );
        assert!(index.predicates.forwards(lives, id(&graph, "nl")).is_empty());
    }

    /// T0.2: Untyped IRI subjects default to rdfs:Class.
    #[test]
    fn untyped_subject_defaults_to_class() {
        let graph = lives_in();
        let index = GraphIndex::build(&graph);
        let class = graph.vocabulary().rdfs_class;

        assert_eq!(index.object_types.type_of(id(&graph, "a")), Some(class));
        // Objects that never appear as subjects are not typed.
        assert_eq!(index.object_types.type_of(id(&graph, "nl")), None);
    }

    /// T0.3: Literal objects are typed by their datatype.
    #[test]
    fn literals_are_typed() {
        let mut graph = KnowledgeGraph::new();
        Ingestor::ingest_triple(
            &mut graph,
            Triple::new(
                Term::iri("a"),
                Term::iri("age"),
                Term::Literal(Literal::typed("41", "http://www.w3.org/2001/XMLSchema#integer")),
            ),
        )
        .expect("ingest");
        let index = GraphIndex::build(&graph);

        let literal = graph
            .id_of(&Term::Literal(Literal::typed(
                "41",
                "http://www.w3.org/2001/XMLSchema#integer",
            )))
            .expect("literal");
        let integer = id(&graph, "http://www.w3.org/2001/XMLSchema#integer");
        assert_eq!(index.data_types.type_of(literal), Some(integer));
    }

    /// T0.4: Invalid triples are rejected before anything is stored.
    #[test]
    fn literal_subject_rejected() {
        let mut graph = KnowledgeGraph::new();
        let triple = Triple::new(Term::literal("x"), Term::iri("p"), Term::iri("o"));

        let result = Ingestor::ingest_triple(&mut graph, triple);
        assert!(matches!(result, Err(HornError::InvalidTriple(_))));
        assert!(graph.is_empty());
    }

    /// T0.5: Building twice yields the same statistics.
    #[test]
    fn index_build_is_deterministic() {
        let graph = lives_in();
        assert_eq!(
            GraphIndex::build(&graph).stats(),
            GraphIndex::build(&graph).stats()
        );
    }
}

// =============================================================================
// TIER T1: CONFIDENCE & SINGLE-ASSERTION SUPPORT
// =============================================================================

mod t1_single_assertion {
    use super::*;

    /// T1.1: Concrete value, no connections → support 2, domain {a, b}.
    #[test]
    fn concrete_value_support() {
        let graph = lives_in();
        let index = GraphIndex::build(&graph);
        let pattern = GraphPattern::new(Assertion::value(id(&graph, "livesIn"), id(&graph, "nl")));

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &set(&graph, &["a", "b", "c"]), 1)
            .expect("support");

        assert_eq!(outcome.value(), 2);
        assert_eq!(outcome.into_domain(), set(&graph, &["a", "b"]));
    }

    /// T1.2: The same assertion with min_support 3 is abandoned → -1.
    #[test]
    fn threshold_abort_yields_sentinel() {
        let graph = lives_in();
        let index = GraphIndex::build(&graph);
        let pattern = GraphPattern::new(Assertion::value(id(&graph, "livesIn"), id(&graph, "nl")));

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &set(&graph, &["a", "b", "c"]), 3)
            .expect("support");

        assert_eq!(outcome, SupportOutcome::BelowThreshold);
        assert_eq!(outcome.value(), -1);
        assert!(outcome.into_domain().is_empty());
    }

    /// T1.3: Object-type variable over a shared class → support 3.
    #[test]
    fn object_type_variable_support() {
        let mut graph = lives_in();
        for country in ["nl", "be"] {
            graph.insert(Triple::new(
                Term::iri(country),
                Term::iri(RDF_TYPE),
                Term::iri("Country"),
            ));
        }
        let index = GraphIndex::build(&graph);
        let pattern = GraphPattern::new(Assertion::object_typed(
            id(&graph, "livesIn"),
            id(&graph, "Country"),
        ));

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &set(&graph, &["a", "b", "c"]), 1)
            .expect("support");

        assert_eq!(outcome.value(), 3);
        assert_eq!(outcome.into_domain(), set(&graph, &["a", "b", "c"]));
    }

    /// T1.4: Confidence counts without pruning.
    #[test]
    fn confidence_counts_head_matches() {
        let graph = lives_in();
        let index = GraphIndex::build(&graph);

        let matched = Evaluator::new(&index)
            .confidence_of(
                &Assertion::value(id(&graph, "livesIn"), id(&graph, "be")),
                &set(&graph, &["a", "b", "c"]),
            )
            .expect("confidence");

        assert_eq!(matched.count, 1);
        assert_eq!(matched.domain, set(&graph, &["c"]));
    }

    /// T1.5: An identity leaf passes its domain through unchanged.
    #[test]
    fn identity_passes_through() {
        let graph = lives_in();
        let index = GraphIndex::build(&graph);
        let pattern = GraphPattern::new(Assertion::Identity);
        let domain = set(&graph, &["a", "c"]);

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &domain, 2)
            .expect("support");

        assert_eq!(outcome.value(), 2);
        assert_eq!(outcome.into_domain(), domain);
    }

    /// T1.6: Data-type variables use the literal's datatype, `xsd:string`
    /// for language-tagged and `xsd:anyType` for plain literals.
    #[test]
    fn data_type_variable_support_and_confidence() {
        let integer = "http://www.w3.org/2001/XMLSchema#integer";
        let mut graph = lives_in();
        for (subject, population) in [
            ("nl", Literal::typed("17000000", integer)),
            ("be", Literal::tagged("elf miljoen", "nl")),
            ("de", Literal::plain("many")),
        ] {
            Ingestor::ingest_triple(
                &mut graph,
                Triple::new(
                    Term::iri(subject),
                    Term::iri("population"),
                    Term::Literal(population),
                ),
            )
            .expect("ingest");
        }
        let index = GraphIndex::build(&graph);
        let vocab = graph.vocabulary();
        let evaluator = Evaluator::new(&index);
        let population = id(&graph, "population");
        let countries = set(&graph, &["nl", "be", "de"]);

        let numeric = GraphPattern::new(Assertion::data_typed(population, id(&graph, integer)));
        let outcome = evaluator
            .support_of(&numeric, numeric.root(), &countries, 1)
            .expect("support");
        assert_eq!(outcome.value(), 1);
        assert_eq!(outcome.into_domain(), set(&graph, &["nl"]));

        let outcome = evaluator
            .support_of(&numeric, numeric.root(), &countries, 2)
            .expect("support");
        assert_eq!(outcome.value(), -1);

        let tagged = evaluator
            .confidence_of(
                &Assertion::data_typed(population, vocab.xsd_string),
                &countries,
            )
            .expect("confidence");
        assert_eq!(tagged.domain, set(&graph, &["be"]));

        let plain = evaluator
            .confidence_of(
                &Assertion::data_typed(population, vocab.xsd_any_type),
                &countries,
            )
            .expect("confidence");
        assert_eq!(plain.domain, set(&graph, &["de"]));
    }
}

// =============================================================================
// TIER T2: MULTI-HOP SUPPORT
// =============================================================================

mod t2_multi_hop {
    use super::*;

    /// a --p1--> x --p2--> y, b --p1--> w (no p2), c --p1--> v --p2--> z.
    fn path_graph() -> KnowledgeGraph {
        graph_of(&[
            ("a", "p1", "x"),
            ("b", "p1", "w"),
            ("c", "p1", "v"),
            ("x", "p2", "y"),
            ("v", "p2", "z"),
            ("x", RDF_TYPE, "Hub"),
            ("w", RDF_TYPE, "Hub"),
            ("v", RDF_TYPE, "Hub"),
        ])
    }

    fn path_pattern(graph: &KnowledgeGraph, target: &str) -> GraphPattern {
        let mut pattern = GraphPattern::new(Assertion::Identity);
        let hop = pattern
            .attach(
                pattern.root(),
                Assertion::object_typed(id(graph, "p1"), id(graph, "Hub")),
            )
            .expect("attach");
        pattern
            .attach(hop, Assertion::value(id(graph, "p2"), id(graph, target)))
            .expect("attach");
        pattern
    }

    /// T2.1: Entities reachable only through resources failing the second
    /// hop are excluded.
    #[test]
    fn second_hop_narrows_range() {
        let graph = path_graph();
        let index = GraphIndex::build(&graph);
        let pattern = path_pattern(&graph, "y");

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &set(&graph, &["a", "b", "c"]), 1)
            .expect("support");

        assert_eq!(outcome.value(), 1);
        assert_eq!(outcome.into_domain(), set(&graph, &["a"]));
    }

    /// T2.2: The threshold is checked after narrowing as well.
    #[test]
    fn narrowed_range_below_threshold_is_pruned() {
        let graph = path_graph();
        let index = GraphIndex::build(&graph);
        let pattern = path_pattern(&graph, "y");

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &set(&graph, &["a", "b", "c"]), 2)
            .expect("support");

        assert_eq!(outcome.value(), -1);
    }

    /// T2.3: Support over a path is the same on every run.
    #[test]
    fn multi_hop_is_deterministic() {
        let graph = path_graph();
        let index = GraphIndex::build(&graph);
        let pattern = path_pattern(&graph, "z");
        let evaluator = Evaluator::new(&index);
        let domain = set(&graph, &["a", "b", "c"]);

        let first = evaluator
            .support_of(&pattern, pattern.root(), &domain, 1)
            .expect("support");
        let second = evaluator
            .support_of(&pattern, pattern.root(), &domain, 1)
            .expect("support");

        assert_eq!(first, second);
        assert_eq!(first.into_domain(), set(&graph, &["c"]));
    }
}

// =============================================================================
// TIER T3: CONTRACT VIOLATIONS & CANCELLATION
// =============================================================================

mod t3_contracts {
    use super::*;
    use hornmine_core::{AssertionId, Rhs, Variable};
    use std::sync::atomic::AtomicBool;

    /// T3.1: An untyped variable is never scored silently.
    #[test]
    fn untyped_variable_is_malformed() {
        let graph = lives_in();
        let index = GraphIndex::build(&graph);
        let pattern = GraphPattern::new(Assertion::Edge {
            predicate: id(&graph, "livesIn"),
            rhs: Rhs::Variable(Variable::Untyped),
        });

        let result = Evaluator::new(&index).support_of(
            &pattern,
            pattern.root(),
            &set(&graph, &["a"]),
            0,
        );
        assert!(matches!(result, Err(HornError::MalformedPattern(_))));
    }

    /// T3.2: Unknown assertion ids are rejected.
    #[test]
    fn unknown_assertion_is_malformed() {
        let graph = lives_in();
        let index = GraphIndex::build(&graph);
        let pattern = GraphPattern::new(Assertion::Identity);

        let result =
            Evaluator::new(&index).support_of(&pattern, AssertionId(5), &BTreeSet::new(), 0);
        assert!(matches!(result, Err(HornError::MalformedPattern(_))));
    }

    /// T3.3: A connection looping back onto the recursion path terminates
    /// with an error.
    #[test]
    fn cyclic_pattern_terminates() {
        let graph = graph_of(&[
            ("a", "p", "b"),
            ("b", "p", "a"),
            ("a", RDF_TYPE, "Node"),
            ("b", RDF_TYPE, "Node"),
        ]);
        let index = GraphIndex::build(&graph);
        let mut pattern =
            GraphPattern::new(Assertion::object_typed(id(&graph, "p"), id(&graph, "Node")));
        pattern
            .connect(pattern.root(), pattern.root())
            .expect("connect");

        let result = Evaluator::new(&index).support_of(
            &pattern,
            pattern.root(),
            &set(&graph, &["a", "b"]),
            0,
        );
        assert!(matches!(result, Err(HornError::CyclicPattern(_))));
    }

    /// T3.4: A set cancellation flag aborts evaluation.
    #[test]
    fn cancellation_aborts() {
        let graph = lives_in();
        let index = GraphIndex::build(&graph);
        let pattern = GraphPattern::new(Assertion::value(id(&graph, "livesIn"), id(&graph, "nl")));
        let flag = AtomicBool::new(true);

        let result = Evaluator::new(&index)
            .with_cancellation(&flag)
            .support_of(&pattern, pattern.root(), &set(&graph, &["a", "b", "c"]), 1);
        assert!(matches!(result, Err(HornError::Cancelled)));
    }

    /// T3.5: Resources missing from the type maps simply never match.
    #[test]
    fn missing_index_entry_never_matches() {
        let graph = lives_in();
        let index = GraphIndex::build(&graph);
        // nl is never a subject, so it has no class at all.
        let pattern = GraphPattern::new(Assertion::object_typed(
            id(&graph, "livesIn"),
            graph.vocabulary().rdfs_class,
        ));

        let outcome = Evaluator::new(&index)
            .support_of(&pattern, pattern.root(), &set(&graph, &["a", "b", "c"]), 0)
            .expect("support");
        assert_eq!(outcome.value(), 0);
    }
}
