//! # Innate Primitives
//!
//! Vocabulary constants and input limits for hornmine-core.
//!
//! These values are compiled into the binary and are immutable at runtime.

// =============================================================================
// VOCABULARY
// =============================================================================

/// The type-assigning relation used to build the object-type index.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Class assigned to IRI subjects that carry no `rdf:type`.
pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";

/// Datatype assigned to language-tagged literals without explicit datatype.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Datatype assigned to plain literals without datatype or language.
pub const XSD_ANY_TYPE: &str = "http://www.w3.org/2001/XMLSchema#anyType";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for IRIs and blank node labels.
///
/// Longer identifiers are rejected by the Ingestor.
pub const MAX_IRI_LENGTH: usize = 4096;

/// Maximum length for literal lexical forms (1 MB).
pub const MAX_LITERAL_LENGTH: usize = 1024 * 1024;

/// Maximum number of triples accepted in a single batch insert.
pub const MAX_TRIPLE_BATCH: usize = 10_000_000;

/// Maximum recursion depth of a rule body during support evaluation.
///
/// Rule bodies produced by depth-bounded generation stay far below this.
pub const MAX_PATTERN_DEPTH: usize = 64;
