//! Rule application: rebuilding a document tree under a ruleset.

use crate::error::{Error, Result};
use crate::model::{Document, Element, Node};
use crate::transform::{Action, Ruleset};

impl Ruleset {
    /// Apply this ruleset to a document, producing a new tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransformApply`] when a rule drops the document
    /// root; a document must keep exactly one root element.
    pub fn apply(&self, doc: &Document) -> Result<Document> {
        match self.rewrite(&doc.root)? {
            Some(root) => Ok(Document::new(root)),
            None => Err(Error::TransformApply(format!(
                "rule for <{}> dropped the document root",
                doc.root.name
            ))),
        }
    }

    /// Rewrite one element. Returns `None` when the element is dropped.
    fn rewrite(&self, element: &Element) -> Result<Option<Element>> {
        let mut result = Element::new(element.name.clone());
        result.attributes = element.attributes.clone();

        for child in &element.children {
            match child {
                Node::Element(el) => {
                    if let Some(rewritten) = self.rewrite(el)? {
                        result.children.push(Node::Element(rewritten));
                    }
                }
                Node::Text(text) => result.children.push(Node::Text(text.clone())),
            }
        }

        let Some(rule) = self.rule_for(&element.name) else {
            return Ok(Some(result));
        };

        for action in &rule.actions {
            match action {
                Action::Rename(to) => result.name = to.clone(),
                Action::Drop => return Ok(None),
                Action::SetAttribute { name, value } => {
                    result.set_attribute(name.clone(), value.clone());
                }
                Action::DropAttribute(name) => result.remove_attribute(name),
                Action::RewriteText { pattern, replacement } => {
                    for child in &mut result.children {
                        if let Node::Text(text) = child {
                            *text = pattern.replace_all(text, replacement.as_str()).into_owned();
                        }
                    }
                }
            }
        }

        Ok(Some(result))
    }
}
