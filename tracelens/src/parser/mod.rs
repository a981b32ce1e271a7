//! Input schema and component classification.
//!
//! The engine takes an in-memory circuit description; ingestion from any
//! document format is the caller's concern. Parsing is best-effort: bad
//! records are skipped with a logged diagnostic and recorded in the
//! result, never raised.

pub mod classifier;
pub mod schema;

pub use classifier::{classify_component, parse_components, ParsedComponents};
pub use schema::{ComponentRecord, SchematicDescription};
