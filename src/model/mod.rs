//! Document model types for XML content representation.
//!
//! This module defines the in-memory tree that bridges XML parsing and
//! the validation, transformation, and rendering stages. The model keeps
//! only what those stages need: element structure, attribute order, and
//! text content. Comments, processing instructions, and declarations are
//! discarded at parse time.

mod document;
mod node;

pub use document::Document;
pub use node::{Attribute, Element, Node};
