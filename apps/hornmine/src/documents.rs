//! # Input Documents
//!
//! JSON documents read by the CLI and their resolution against a graph.
//!
//! Graph document:
//!
//! ```json
//! {"triples": [{"subject": {"iri": "a"}, "predicate": {"iri": "livesIn"}, "object": {"iri": "nl"}}]}
//! ```
//!
//! Rule document (body entry 0 is the root, later entries name their parent):
//!
//! ```json
//! {
//!   "domain_class": "Person",
//!   "head": {"kind": "value", "predicate": "speaks", "value": {"iri": "dutch"}},
//!   "body": [
//!     {"assertion": {"kind": "identity"}},
//!     {"parent": 0, "assertion": {"kind": "object_type", "predicate": "livesIn", "class": "City"}}
//!   ]
//! }
//! ```

use hornmine_core::{
    Assertion, AssertionId, Clause, GraphIndex, GraphPattern, HornError, Ingestor,
    KnowledgeGraph, Rhs, Term, TermId, Triple, Variable,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a graph document (100 MB).
pub const MAX_GRAPH_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum size of a rule document (1 MB).
pub const MAX_RULE_FILE_SIZE: u64 = 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), HornError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| HornError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(HornError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize `path` and ensure it names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, HornError> {
    let canonical = path.canonicalize().map_err(|e| {
        HornError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(HornError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read and parse a JSON document of at most `max_size` bytes.
pub fn read_json<T: DeserializeOwned>(path: &Path, max_size: u64) -> Result<T, HornError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, max_size)?;

    let contents = std::fs::read(&validated)
        .map_err(|e| HornError::IoError(format!("Read file: {}", e)))?;
    serde_json::from_slice(&contents).map_err(|e| {
        HornError::SerializationError(format!("Parse '{}': {}", path.display(), e))
    })
}

// =============================================================================
// GRAPH DOCUMENT
// =============================================================================

/// A set of triples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    pub triples: Vec<Triple>,
}

impl GraphDocument {
    pub fn load(path: &Path) -> Result<Self, HornError> {
        read_json(path, MAX_GRAPH_FILE_SIZE)
    }

    /// Validate and intern all triples into a fresh graph.
    pub fn into_graph(self) -> Result<KnowledgeGraph, HornError> {
        let mut graph = KnowledgeGraph::new();
        Ingestor::ingest_all(&mut graph, self.triples)?;
        Ok(graph)
    }
}

// =============================================================================
// RULE DOCUMENT
// =============================================================================

/// One assertion, with terms given as IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssertionDoc {
    Identity,
    Value { predicate: String, value: Term },
    ObjectType { predicate: String, class: String },
    DataType { predicate: String, datatype: String },
    Untyped { predicate: String },
}

/// A body assertion and the entry it hangs off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyEntry {
    #[serde(default)]
    pub parent: Option<usize>,
    pub assertion: AssertionDoc,
}

/// A candidate rule `head ← body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDocument {
    /// Restrict the candidate domain to members of this class.
    #[serde(default)]
    pub domain_class: Option<String>,
    pub head: AssertionDoc,
    pub body: Vec<BodyEntry>,
}

impl RuleDocument {
    pub fn load(path: &Path) -> Result<Self, HornError> {
        read_json(path, MAX_RULE_FILE_SIZE)
    }

    /// Resolve every IRI against `graph` and build an unscored clause.
    ///
    /// Without `domain_class` the candidate domain is every typed IRI subject.
    pub fn resolve(&self, graph: &KnowledgeGraph, index: &GraphIndex) -> Result<Clause, HornError> {
        let head = resolve_assertion(graph, &self.head)?;
        let body = self.resolve_body(graph)?;

        let domain: BTreeSet<TermId> = match &self.domain_class {
            Some(class) => {
                let class = resolve_iri(graph, class)?;
                index
                    .object_types
                    .members_of(class)
                    .cloned()
                    .unwrap_or_default()
            }
            None => index.object_types.objects().collect(),
        };

        Ok(Clause::new(head, body, domain))
    }

    fn resolve_body(&self, graph: &KnowledgeGraph) -> Result<GraphPattern, HornError> {
        let (root, rest) = self
            .body
            .split_first()
            .ok_or_else(|| HornError::MalformedPattern("rule body is empty".to_string()))?;
        if root.parent.is_some() {
            return Err(HornError::MalformedPattern(
                "the first body entry is the root and cannot have a parent".to_string(),
            ));
        }

        let mut pattern = GraphPattern::new(resolve_assertion(graph, &root.assertion)?);
        for (offset, entry) in rest.iter().enumerate() {
            let position = offset + 1;
            let parent = match entry.parent {
                Some(parent) if parent < position => AssertionId(parent),
                Some(parent) => {
                    return Err(HornError::MalformedPattern(format!(
                        "body entry {position} refers to later entry {parent}"
                    )));
                }
                None => {
                    return Err(HornError::MalformedPattern(format!(
                        "body entry {position} has no parent"
                    )));
                }
            };
            pattern.attach(parent, resolve_assertion(graph, &entry.assertion)?)?;
        }
        Ok(pattern)
    }
}

fn resolve_iri(graph: &KnowledgeGraph, iri: &str) -> Result<TermId, HornError> {
    graph
        .iri_id(iri)
        .ok_or_else(|| HornError::UnknownTerm(iri.to_string()))
}

fn resolve_assertion(graph: &KnowledgeGraph, doc: &AssertionDoc) -> Result<Assertion, HornError> {
    let assertion = match doc {
        AssertionDoc::Identity => Assertion::Identity,
        AssertionDoc::Value { predicate, value } => Assertion::value(
            resolve_iri(graph, predicate)?,
            graph
                .id_of(value)
                .ok_or_else(|| HornError::UnknownTerm(value.to_string()))?,
        ),
        AssertionDoc::ObjectType { predicate, class } => {
            Assertion::object_typed(resolve_iri(graph, predicate)?, resolve_iri(graph, class)?)
        }
        AssertionDoc::DataType {
            predicate,
            datatype,
        } => Assertion::data_typed(resolve_iri(graph, predicate)?, resolve_iri(graph, datatype)?),
        AssertionDoc::Untyped { predicate } => Assertion::Edge {
            predicate: resolve_iri(graph, predicate)?,
            rhs: Rhs::Variable(Variable::Untyped),
        },
    };
    Ok(assertion)
}

// =============================================================================
// TESTS
// =============================================================================
