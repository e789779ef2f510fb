//! Document transformation module.
//!
//! Mirrors the schema module's shape: the pipeline consumes
//! transformation through the [`Transformer`] capability trait, and the
//! built-in engine, [`RuleTransformer`], compiles a declarative rule
//! vocabulary and applies it by rebuilding the tree. The input document
//! is never mutated; application always produces a fresh tree.
//!
//! # Example
//!
//! ```
//! use xmlpipe::parser::parse_str;
//! use xmlpipe::transform::{RuleTransformer, Transformer};
//!
//! let transform_def = parse_str(r#"<transform>
//!   <rule match="catalog"><rename to="inventory"/></rule>
//! </transform>"#).unwrap();
//!
//! let doc = parse_str("<catalog><item/></catalog>").unwrap();
//! let out = RuleTransformer::new().apply(&doc, &transform_def).unwrap();
//! assert_eq!(out.root_name(), "inventory");
//! ```

mod apply;
mod compile;

pub use compile::{Action, Rule, Ruleset};

use crate::error::Result;
use crate::model::Document;

/// Capability interface for transformation engines.
///
/// `apply` compiles the transform definition and applies it in one call,
/// producing a new document tree distinct from the input.
pub trait Transformer {
    /// Transform `doc` according to `transform_def`.
    fn apply(&self, doc: &Document, transform_def: &Document) -> Result<Document>;
}

impl<T: Transformer + ?Sized> Transformer for &T {
    fn apply(&self, doc: &Document, transform_def: &Document) -> Result<Document> {
        (**self).apply(doc, transform_def)
    }
}

/// The built-in transformer backed by the declarative rule vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTransformer;

impl RuleTransformer {
    /// Create a new transformer.
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for RuleTransformer {
    fn apply(&self, doc: &Document, transform_def: &Document) -> Result<Document> {
        let ruleset = Ruleset::compile(transform_def)?;
        ruleset.apply(doc)
    }
}
