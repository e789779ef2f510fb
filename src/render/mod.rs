//! Rendering module for serializing documents back to XML text.

mod xml;

pub use xml::to_xml;
