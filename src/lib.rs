//! # xmlpipe
//!
//! Audited four-stage XML processing pipeline for Rust.
//!
//! A run validates an input document against a schema, applies a
//! structural transform, validates the transformed result against a
//! second schema, and writes the rendered output atomically. Any stage
//! failure aborts the run without partial output, records a detailed
//! diagnostic to an append-only log, and surfaces a terse error.
//!
//! ## Quick Start
//!
//! ```no_run
//! use xmlpipe::{process_file, FileLog};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let log = FileLog::open("logs.txt")?;
//!     process_file(
//!         "order.xml",
//!         "order-schema.xml",
//!         "order-to-invoice.xml",
//!         "invoice-schema.xml",
//!         "invoice.xml",
//!         &log,
//!     )?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Fail-fast stages**: load, validate, transform, re-validate, serialize
//! - **Two-tier errors**: detailed causes in the log, terse error surfaced
//! - **Pluggable engines**: validation and transformation behind traits
//! - **Deterministic output**: identical inputs render identical bytes
//! - **Injected diagnostics**: file-backed in production, in-memory in tests

pub mod diag;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod transform;

// Re-export commonly used types
pub use diag::{DiagnosticSink, FileLog, MemoryLog};
pub use error::{Error, Result};
pub use model::{Attribute, Document, Element, Node};
pub use pipeline::{FailureKind, Pipeline, PipelineError, PipelineInputs, ValidationStage};
pub use schema::{RulesetValidator, Schema, SchemaValidator};
pub use transform::{RuleTransformer, Ruleset, Transformer};

use std::path::PathBuf;

/// Run the pipeline once over five resource paths with the built-in
/// engines.
///
/// The paths keep their fixed order: input document, input schema
/// definition, transform definition, output schema definition, output
/// path.
///
/// # Example
///
/// ```no_run
/// use xmlpipe::{process_file, MemoryLog};
///
/// let log = MemoryLog::new();
/// process_file("a.xml", "s1.xml", "t.xml", "s2.xml", "b.xml", &log)?;
/// assert_eq!(log.len(), 4);
/// # Ok::<(), xmlpipe::PipelineError>(())
/// ```
pub fn process_file(
    input: impl Into<PathBuf>,
    input_schema: impl Into<PathBuf>,
    transform: impl Into<PathBuf>,
    output_schema: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
    sink: &dyn DiagnosticSink,
) -> std::result::Result<(), PipelineError> {
    let inputs = PipelineInputs::new(input, input_schema, transform, output_schema, output);
    Pipeline::new(sink).run(&inputs)
}
