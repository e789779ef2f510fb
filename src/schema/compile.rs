//! Schema definition compiler.
//!
//! A schema definition is itself an XML document:
//!
//! ```xml
//! <schema root="catalog">
//!   <element name="catalog">
//!     <attribute name="version" required="true"/>
//!     <child name="item" min="1" max="unbounded"/>
//!   </element>
//!   <element name="item">
//!     <child name="title"/>
//!   </element>
//!   <element name="title"><text pattern=".+"/></element>
//! </schema>
//! ```
//!
//! `child` occurrence bounds default to `min="1" max="1"`. Every name a
//! `child` rule references must itself be declared with an `element`.

use std::collections::HashMap;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Document, Element};

/// Occurrence bounds for a child rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    /// Minimum number of occurrences.
    pub min: u32,

    /// Maximum number of occurrences, `None` for unbounded.
    pub max: Option<u32>,
}

impl Occurs {
    /// Whether `count` falls within the bounds.
    pub fn allows(&self, count: u32) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

/// A constraint on how often a named child element may appear.
#[derive(Debug, Clone)]
pub struct ChildRule {
    /// Child element name.
    pub name: String,

    /// Allowed occurrence range.
    pub occurs: Occurs,
}

/// A required or optional attribute on a declared element.
#[derive(Debug, Clone)]
pub(crate) struct AttributeRule {
    pub(crate) name: String,
    pub(crate) required: bool,
}

/// Declaration of one element kind.
#[derive(Debug, Clone, Default)]
pub struct ElementDecl {
    /// Allowed child elements, in declaration order.
    pub children: Vec<ChildRule>,

    pub(crate) attributes: Vec<AttributeRule>,

    /// Anchored pattern the element's text content must match, if any.
    pub(crate) text_pattern: Option<Regex>,
}

/// A compiled validation ruleset.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) root: String,
    pub(crate) elements: HashMap<String, ElementDecl>,
}

impl Schema {
    /// Compile a schema from its definition document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaCompile`] when the definition is malformed:
    /// wrong vocabulary, duplicate declarations, inverted occurrence
    /// bounds, child rules referencing undeclared elements, or invalid
    /// text patterns.
    pub fn compile(definition: &Document) -> Result<Schema> {
        let root_el = &definition.root;
        if root_el.name != "schema" {
            return Err(compile_err(format!(
                "expected <schema> root, found <{}>",
                root_el.name
            )));
        }
        let root = root_el
            .attribute("root")
            .ok_or_else(|| compile_err("<schema> is missing the root attribute"))?
            .to_string();

        let mut elements: HashMap<String, ElementDecl> = HashMap::new();
        for decl in root_el.child_elements() {
            if decl.name != "element" {
                return Err(compile_err(format!(
                    "unexpected <{}> in <schema>, only <element> is allowed",
                    decl.name
                )));
            }
            let name = decl
                .attribute("name")
                .ok_or_else(|| compile_err("<element> is missing the name attribute"))?
                .to_string();
            if elements.contains_key(&name) {
                return Err(compile_err(format!("duplicate declaration of element {}", name)));
            }
            elements.insert(name, compile_decl(decl)?);
        }

        if !elements.contains_key(&root) {
            return Err(compile_err(format!("root element {} is not declared", root)));
        }
        for (name, decl) in &elements {
            for child in &decl.children {
                if !elements.contains_key(&child.name) {
                    return Err(compile_err(format!(
                        "element {} allows child {}, which is not declared",
                        name, child.name
                    )));
                }
            }
        }

        Ok(Schema { root, elements })
    }
}

fn compile_decl(decl: &Element) -> Result<ElementDecl> {
    let mut compiled = ElementDecl::default();
    for rule in decl.child_elements() {
        match rule.name.as_str() {
            "child" => {
                let name = rule
                    .attribute("name")
                    .ok_or_else(|| compile_err("<child> is missing the name attribute"))?
                    .to_string();
                compiled.children.push(ChildRule {
                    name,
                    occurs: parse_occurs(rule)?,
                });
            }
            "attribute" => {
                let name = rule
                    .attribute("name")
                    .ok_or_else(|| compile_err("<attribute> is missing the name attribute"))?
                    .to_string();
                let required = parse_flag(rule.attribute("required"))?;
                compiled.attributes.push(AttributeRule { name, required });
            }
            "text" => {
                let pattern = rule
                    .attribute("pattern")
                    .ok_or_else(|| compile_err("<text> is missing the pattern attribute"))?;
                // Anchor so the whole text content must match, XSD-facet style
                let anchored = format!("^(?:{})$", pattern);
                let regex = Regex::new(&anchored).map_err(|err| {
                    compile_err(format!("invalid text pattern {:?}: {}", pattern, err))
                })?;
                compiled.text_pattern = Some(regex);
            }
            other => {
                return Err(compile_err(format!(
                    "unexpected <{}> in <element>, expected child, attribute, or text",
                    other
                )));
            }
        }
    }
    Ok(compiled)
}

fn parse_occurs(rule: &Element) -> Result<Occurs> {
    let min = match rule.attribute("min") {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| compile_err(format!("invalid min occurrence {:?}", raw)))?,
        None => 1,
    };
    let max = match rule.attribute("max") {
        Some("unbounded") => None,
        Some(raw) => Some(
            raw.parse::<u32>()
                .map_err(|_| compile_err(format!("invalid max occurrence {:?}", raw)))?,
        ),
        None => Some(1),
    };
    if let Some(max) = max {
        if min > max {
            return Err(compile_err(format!(
                "min occurrence {} exceeds max occurrence {}",
                min, max
            )));
        }
    }
    Ok(Occurs { min, max })
}

fn parse_flag(value: Option<&str>) -> Result<bool> {
    match value {
        None | Some("false") => Ok(false),
        Some("true") => Ok(true),
        Some(other) => Err(compile_err(format!(
            "invalid boolean {:?}, expected true or false",
            other
        ))),
    }
}

fn compile_err(message: impl Into<String>) -> Error {
    Error::SchemaCompile(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    fn compile(source: &str) -> Result<Schema> {
        Schema::compile(&parse_str(source).unwrap())
    }

    #[test]
    fn test_compile_minimal_schema() {
        let schema = compile(r#"<schema root="note"><element name="note"/></schema>"#).unwrap();
        assert_eq!(schema.root, "note");
        assert!(schema.elements.contains_key("note"));
    }

    #[test]
    fn test_compile_occurrence_defaults() {
        let schema = compile(
            r#"<schema root="a">
                 <element name="a"><child name="b"/></element>
                 <element name="b"/>
               </schema>"#,
        )
        .unwrap();
        let occurs = schema.elements["a"].children[0].occurs;
        assert_eq!(occurs, Occurs { min: 1, max: Some(1) });
        assert!(occurs.allows(1));
        assert!(!occurs.allows(0));
        assert!(!occurs.allows(2));
    }

    #[test]
    fn test_compile_unbounded_max() {
        let schema = compile(
            r#"<schema root="a">
                 <element name="a"><child name="b" min="0" max="unbounded"/></element>
                 <element name="b"/>
               </schema>"#,
        )
        .unwrap();
        let occurs = schema.elements["a"].children[0].occurs;
        assert!(occurs.allows(0));
        assert!(occurs.allows(10_000));
    }

    #[test]
    fn test_compile_rejects_missing_root_attribute() {
        let err = compile("<schema><element name=\"a\"/></schema>").unwrap_err();
        assert!(matches!(err, Error::SchemaCompile(_)));
    }

    #[test]
    fn test_compile_rejects_undeclared_root() {
        let err = compile(r#"<schema root="b"><element name="a"/></schema>"#).unwrap_err();
        assert!(err.to_string().contains("not declared"));
    }

    #[test]
    fn test_compile_rejects_undeclared_child_reference() {
        let err = compile(
            r#"<schema root="a"><element name="a"><child name="ghost"/></element></schema>"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_compile_rejects_duplicate_declaration() {
        let err = compile(
            r#"<schema root="a"><element name="a"/><element name="a"/></schema>"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_compile_rejects_inverted_bounds() {
        let err = compile(
            r#"<schema root="a">
                 <element name="a"><child name="b" min="3" max="2"/></element>
                 <element name="b"/>
               </schema>"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::SchemaCompile(_)));
    }

    #[test]
    fn test_compile_rejects_bad_pattern() {
        let err = compile(
            r#"<schema root="a"><element name="a"><text pattern="["/></element></schema>"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::SchemaCompile(_)));
    }

    #[test]
    fn test_compile_rejects_unknown_vocabulary() {
        let err = compile(r#"<schema root="a"><element name="a"><rule/></element></schema>"#)
            .unwrap_err();
        assert!(matches!(err, Error::SchemaCompile(_)));
    }
}
