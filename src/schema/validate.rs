//! Document checking against a compiled schema.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{Document, Element};
use crate::schema::Schema;

impl Schema {
    /// Check a document against this schema.
    ///
    /// The whole tree is walked and every violation is collected, so the
    /// resulting [`Error::SchemaViolation`] names all problems at once
    /// rather than just the first.
    pub fn check(&self, doc: &Document) -> Result<()> {
        let mut checker = Checker {
            schema: self,
            violations: Vec::new(),
        };
        if doc.root.name != self.root {
            checker.violations.push(format!(
                "root element is <{}>, schema requires <{}>",
                doc.root.name, self.root
            ));
        } else {
            checker.check_element(&doc.root, &doc.root.name);
        }

        if checker.violations.is_empty() {
            Ok(())
        } else {
            Err(Error::SchemaViolation(checker.violations.join("; ")))
        }
    }
}

struct Checker<'a> {
    schema: &'a Schema,
    violations: Vec<String>,
}

impl Checker<'_> {
    fn check_element(&mut self, element: &Element, path: &str) {
        let Some(decl) = self.schema.elements.get(&element.name) else {
            self.violations
                .push(format!("{}: element <{}> is not declared", path, element.name));
            return;
        };

        self.check_attributes(element, decl, path);
        self.check_children(element, decl, path);

        if let Some(pattern) = &decl.text_pattern {
            let text = element.text();
            let text = text.trim();
            if !pattern.is_match(text) {
                self.violations.push(format!(
                    "{}: text {:?} does not match pattern {}",
                    path,
                    text,
                    pattern.as_str()
                ));
            }
        }
    }

    fn check_attributes(
        &mut self,
        element: &Element,
        decl: &super::ElementDecl,
        path: &str,
    ) {
        for rule in &decl.attributes {
            if rule.required && element.attribute(&rule.name).is_none() {
                self.violations.push(format!(
                    "{}: required attribute {} is missing",
                    path, rule.name
                ));
            }
        }
        for attr in &element.attributes {
            if !decl.attributes.iter().any(|rule| rule.name == attr.name) {
                self.violations.push(format!(
                    "{}: attribute {} is not declared",
                    path, attr.name
                ));
            }
        }
    }

    fn check_children(&mut self, element: &Element, decl: &super::ElementDecl, path: &str) {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        let mut seen: HashMap<&str, u32> = HashMap::new();

        for child in element.child_elements() {
            *counts.entry(child.name.as_str()).or_default() += 1;
        }

        for rule in &decl.children {
            let count = counts.get(rule.name.as_str()).copied().unwrap_or(0);
            if !rule.occurs.allows(count) {
                let bound = match rule.occurs.max {
                    Some(max) => format!("{}..={}", rule.occurs.min, max),
                    None => format!("{}..", rule.occurs.min),
                };
                self.violations.push(format!(
                    "{}: child <{}> occurs {} times, allowed {}",
                    path, rule.name, count, bound
                ));
            }
        }

        for child in element.child_elements() {
            let allowed = decl.children.iter().any(|rule| rule.name == child.name);
            if !allowed {
                self.violations.push(format!(
                    "{}: child <{}> is not allowed here",
                    path, child.name
                ));
                continue;
            }
            let index = seen.entry(child.name.as_str()).or_default();
            *index += 1;
            let child_path = format!("{}/{}[{}]", path, child.name, index);
            self.check_element(child, &child_path);
        }
    }
}
