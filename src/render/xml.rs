//! Deterministic XML pretty-printer.
//!
//! The output style is fixed: two-space indentation, no XML declaration,
//! attributes in tree order, elements whose content is pure text rendered
//! on one line, and childless elements collapsed to `<name/>`. Rendering
//! the same tree always yields the same bytes.

use crate::model::{Document, Element, Node};

const INDENT: &str = "  ";

/// Render a document to its canonical textual form.
pub fn to_xml(doc: &Document) -> String {
    let mut out = String::new();
    write_element(&mut out, &doc.root, 0);
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(&element.name);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(&attr.value));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>\n");
        return;
    }

    if !element.has_element_children() {
        // Pure text content stays on one line
        out.push('>');
        out.push_str(&escape_text(&element.text()));
        out.push_str("</");
        out.push_str(&element.name);
        out.push_str(">\n");
        return;
    }

    out.push_str(">\n");
    for child in &element.children {
        match child {
            Node::Element(el) => write_element(out, el, depth + 1),
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push_str(&INDENT.repeat(depth + 1));
                    out.push_str(&escape_text(trimmed));
                    out.push('\n');
                }
            }
        }
    }
    out.push_str(&pad);
    out.push_str("</");
    out.push_str(&element.name);
    out.push_str(">\n");
}

fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
