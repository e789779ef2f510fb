//! Schema validation module.
//!
//! The pipeline consumes validation through the [`SchemaValidator`]
//! capability trait, so any engine that can check a document against a
//! schema definition can be plugged in. The built-in engine,
//! [`RulesetValidator`], compiles a compact XML schema vocabulary (element
//! declarations with child occurrence bounds, attribute requirements, and
//! text pattern facets) and checks documents against it.
//!
//! # Example
//!
//! ```
//! use xmlpipe::parser::parse_str;
//! use xmlpipe::schema::{RulesetValidator, SchemaValidator};
//!
//! let schema_def = parse_str(r#"<schema root="note">
//!   <element name="note"><child name="body"/></element>
//!   <element name="body"><text pattern=".+"/></element>
//! </schema>"#).unwrap();
//!
//! let doc = parse_str("<note><body>hello</body></note>").unwrap();
//! assert!(RulesetValidator::new().validate(&doc, &schema_def).is_ok());
//! ```

mod compile;
mod validate;

pub use compile::{ChildRule, ElementDecl, Occurs, Schema};

use crate::error::Result;
use crate::model::Document;

/// Capability interface for schema validation engines.
///
/// `validate` compiles the schema definition and checks the document in
/// one call; both compilation failures and violations surface as errors
/// carrying the engine's detailed diagnostic text.
pub trait SchemaValidator {
    /// Check `doc` against the schema described by `schema_def`.
    fn validate(&self, doc: &Document, schema_def: &Document) -> Result<()>;
}

impl<V: SchemaValidator + ?Sized> SchemaValidator for &V {
    fn validate(&self, doc: &Document, schema_def: &Document) -> Result<()> {
        (**self).validate(doc, schema_def)
    }
}

/// The built-in validator backed by the compact ruleset vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct RulesetValidator;

impl RulesetValidator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }
}

impl SchemaValidator for RulesetValidator {
    fn validate(&self, doc: &Document, schema_def: &Document) -> Result<()> {
        let schema = Schema::compile(schema_def)?;
        schema.check(doc)
    }
}
