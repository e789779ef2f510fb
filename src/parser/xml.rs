//! Event-driven XML parser building model trees.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{Attribute, Document, Element, Node};

/// Parse an XML document from a file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parse an XML document from a string.
///
/// Comments, processing instructions, XML declarations, and DOCTYPE
/// declarations are skipped. CDATA sections become ordinary text.
/// Whitespace-only text between elements is dropped.
///
/// # Errors
///
/// Returns [`Error::XmlSyntax`] if the content is not well-formed or
/// does not contain exactly one root element.
pub fn parse_str(content: &str) -> Result<Document> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text_start = false;
    reader.config_mut().trim_text_end = false;

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(element_from_tag(&e)?);
            }
            Ok(Event::End(e)) => {
                let element = stack.pop().ok_or_else(|| {
                    Error::XmlSyntax(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                let end_name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if element.name != end_name {
                    return Err(Error::XmlSyntax(format!(
                        "expected closing tag </{}>, found </{}>",
                        element.name, end_name
                    )));
                }
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Empty(e)) => {
                let element = element_from_tag(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::XmlSyntax(format!("invalid text content: {}", err)))?;
                if let Some(parent) = stack.last_mut() {
                    if !text.trim().is_empty() {
                        parent.children.push(Node::Text(text.into_owned()));
                    }
                } else if !text.trim().is_empty() {
                    return Err(Error::XmlSyntax(
                        "text content outside the root element".to_string(),
                    ));
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).to_string();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(text));
                } else if !text.trim().is_empty() {
                    return Err(Error::XmlSyntax(
                        "text content outside the root element".to_string(),
                    ));
                }
            }
            Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlSyntax(format!(
                    "{} at position {}",
                    e,
                    reader.error_position()
                )));
            }
        }
    }

    if let Some(unclosed) = stack.last() {
        return Err(Error::XmlSyntax(format!(
            "unexpected end of input, <{}> is not closed",
            unclosed.name
        )));
    }

    root.map(Document::new)
        .ok_or_else(|| Error::XmlSyntax("document has no root element".to_string()))
}

/// Build an element (name plus attributes) from a start or empty tag.
fn element_from_tag(e: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut element = Element::new(name);

    for attr_result in e.attributes() {
        let attr = attr_result
            .map_err(|err| Error::XmlSyntax(format!("invalid attribute: {}", err)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| Error::XmlSyntax(format!("invalid attribute value: {}", err)))?;
        element.attributes.push(Attribute::new(key, value.into_owned()));
    }

    Ok(element)
}

/// Hand a completed element to its parent, or install it as the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else {
        if root.is_some() {
            return Err(Error::XmlSyntax(
                "document has more than one root element".to_string(),
            ));
        }
        *root = Some(element);
    }
    Ok(())
}
