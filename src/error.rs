//! Error types for xmlpipe library.
//!
//! These are the *detailed* errors produced by parsing, schema, and
//! transform code. The pipeline runner records them to the diagnostic
//! log and surfaces only a terse [`crate::PipelineError`] to callers.

use std::io;
use thiserror::Error;

/// Result type alias for xmlpipe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, checking, or rewriting documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The resource is not well-formed XML.
    #[error("XML syntax error: {0}")]
    XmlSyntax(String),

    /// The schema definition itself is invalid and could not be compiled.
    #[error("schema compilation error: {0}")]
    SchemaCompile(String),

    /// A document failed validation against a compiled schema.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// The transform definition is invalid and could not be compiled.
    #[error("transform compilation error: {0}")]
    TransformCompile(String),

    /// The transform compiled but failed while being applied.
    #[error("transform application error: {0}")]
    TransformApply(String),
}
