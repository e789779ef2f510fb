//! XML parsing module.
//!
//! Builds [`crate::model::Document`] trees from XML text using a
//! streaming [`quick_xml`] reader.

mod xml;

pub use xml::{parse_file, parse_str};
