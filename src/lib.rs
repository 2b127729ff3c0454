//! Depmine: syntactic pattern mining over annotated news corpora
//!
//! Loads corpora of annotated feed items (XML, JSON or binary, all
//! round-trip safe), matches recurring dependency patterns such as
//! verb-object and coordination chains, and aggregates them into counted,
//! deterministically sorted reports.

pub mod binary; // Binary corpus codec
pub mod corpus; // Corpus, item and token data model
pub mod format; // Format resolution and load/save entry points
pub mod json; // JSON corpus codec
pub mod pattern; // Pattern templates and the form-index matcher
pub mod report; // Aggregation, counting and report output
pub mod xml; // XML corpus codec

// Re-exports for convenience
pub use corpus::{Corpus, Item, Token};
pub use format::{CodecError, Format, load_corpus, read_corpus, save_corpus, write_corpus};
pub use pattern::{FormIndex, PatternInstance, TEMPLATES, Template};
pub use report::{extract_all, simple_pattern_table, tally, write_export};
