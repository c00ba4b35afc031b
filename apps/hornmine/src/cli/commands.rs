//! # CLI Command Implementations

use crate::documents::{GraphDocument, RuleDocument};
use hornmine_core::{
    Evaluator, GraphIndex, HornError, KnowledgeGraph, Thresholds, Verdict, score_clause,
};
use std::path::Path;

/// Load a graph document and build its indexes.
fn load_indexed(path: &Path) -> Result<(KnowledgeGraph, GraphIndex), HornError> {
    let graph = GraphDocument::load(path)?.into_graph()?;
    let index = GraphIndex::build(&graph);
    Ok((graph, index))
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Accepted => "accepted",
        Verdict::BelowSupport => "below_support",
        Verdict::BelowConfidence => "below_confidence",
    }
}

// =============================================================================
// INDEX COMMAND
// =============================================================================

/// Build the indexes of a graph and print their sizes.
pub fn cmd_index(graph_path: &Path, json_mode: bool) -> Result<(), HornError> {
    tracing::info!("Indexing {:?}", graph_path);

    let (graph, index) = load_indexed(graph_path)?;
    let stats = index.stats();

    if json_mode {
        let output = serde_json::json!({
            "graph": graph_path.to_string_lossy(),
            "triples": graph.len(),
            "terms": graph.term_count(),
            "index": stats,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Hornmine Graph Index");
    println!("====================");
    println!("Graph: {:?}", graph_path);
    println!();
    println!("Triples:        {}", graph.len());
    println!("Terms:          {}", graph.term_count());
    println!("Predicates:     {}", stats.predicates);
    println!("Edges:          {}", stats.edges);
    println!("Typed Objects:  {}", stats.typed_objects);
    println!("Classes:        {}", stats.classes);
    println!("Typed Literals: {}", stats.typed_literals);
    println!("Datatypes:      {}", stats.datatypes);

    Ok(())
}

// =============================================================================
// SCORE COMMAND
// =============================================================================

/// Score one rule document against a graph.
pub fn cmd_score(
    graph_path: &Path,
    rule_path: &Path,
    thresholds: Thresholds,
    json_mode: bool,
) -> Result<(), HornError> {
    tracing::info!(
        min_support = thresholds.min_support,
        min_confidence = thresholds.min_confidence,
        "Scoring {:?} against {:?}",
        rule_path,
        graph_path
    );

    let (graph, index) = load_indexed(graph_path)?;
    let rule = RuleDocument::load(rule_path)?;
    let mut clause = rule.resolve(&graph, &index)?;
    let candidates = clause.domain.len();

    let verdict = score_clause(&Evaluator::new(&index), &mut clause, thresholds)?;
    let support: i64 = match verdict {
        Verdict::BelowSupport => -1,
        _ => clause.support as i64,
    };
    let confidence = match verdict {
        Verdict::BelowSupport => None,
        _ => Some(clause.confidence),
    };

    if json_mode {
        let domain: Vec<String> = match verdict {
            Verdict::BelowSupport => Vec::new(),
            _ => clause
                .domain
                .iter()
                .filter_map(|&id| graph.term(id))
                .map(ToString::to_string)
                .collect(),
        };
        let output = serde_json::json!({
            "verdict": verdict_label(verdict),
            "support": support,
            "confidence": confidence,
            "candidates": candidates,
            "domain": domain,
            "min_support": thresholds.min_support,
            "min_confidence": thresholds.min_confidence,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Hornmine Rule Score");
    println!("===================");
    println!("Rule:       {:?}", rule_path);
    println!("Candidates: {}", candidates);
    println!();
    println!("Support:    {} (min {})", support, thresholds.min_support);
    match confidence {
        Some(confidence) => println!(
            "Confidence: {} (min {})",
            confidence, thresholds.min_confidence
        ),
        None => println!("Confidence: -"),
    }
    println!("Verdict:    {}", verdict_label(verdict));

    Ok(())
}
