//! Transform definition compiler.
//!
//! A transform definition is itself an XML document:
//!
//! ```xml
//! <transform>
//!   <rule match="catalog"><rename to="inventory"/></rule>
//!   <rule match="internal-note"><drop/></rule>
//!   <rule match="price"><set-attribute name="currency" value="USD"/></rule>
//!   <rule match="title"><rewrite-text pattern="\s+" with=" "/></rule>
//! </transform>
//! ```
//!
//! The first rule whose `match` equals an element's name wins; elements
//! without a matching rule copy through unchanged. An empty
//! `<transform/>` is the identity transform.

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Document, Element};

/// One rewriting action inside a rule.
#[derive(Debug, Clone)]
pub enum Action {
    /// Rename the matched element.
    Rename(String),

    /// Remove the matched element and its subtree.
    Drop,

    /// Set (or overwrite) an attribute on the matched element.
    SetAttribute {
        /// Attribute name.
        name: String,
        /// Attribute value.
        value: String,
    },

    /// Remove an attribute from the matched element.
    DropAttribute(String),

    /// Replace every regex match in the element's direct text children.
    RewriteText {
        /// Compiled search pattern.
        pattern: Regex,
        /// Replacement text, `$1`-style group references allowed.
        replacement: String,
    },
}

/// A rule: an element name to match plus the actions to apply.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Element name the rule applies to.
    pub matches: String,

    /// Actions in definition order.
    pub actions: Vec<Action>,
}

/// A compiled transformation program.
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    pub(crate) rules: Vec<Rule>,
}

impl Ruleset {
    /// Compile a ruleset from its definition document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransformCompile`] when the definition is
    /// malformed: wrong vocabulary, missing action attributes, or an
    /// invalid `rewrite-text` pattern.
    pub fn compile(definition: &Document) -> Result<Ruleset> {
        let root = &definition.root;
        if root.name != "transform" {
            return Err(compile_err(format!(
                "expected <transform> root, found <{}>",
                root.name
            )));
        }

        let mut rules = Vec::new();
        for rule_el in root.child_elements() {
            if rule_el.name != "rule" {
                return Err(compile_err(format!(
                    "unexpected <{}> in <transform>, only <rule> is allowed",
                    rule_el.name
                )));
            }
            let matches = rule_el
                .attribute("match")
                .ok_or_else(|| compile_err("<rule> is missing the match attribute"))?
                .to_string();
            let mut actions = Vec::new();
            for action_el in rule_el.child_elements() {
                actions.push(compile_action(action_el)?);
            }
            rules.push(Rule { matches, actions });
        }

        Ok(Ruleset { rules })
    }

    /// First rule matching the given element name, if any.
    pub(crate) fn rule_for(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches == name)
    }
}

fn compile_action(action: &Element) -> Result<Action> {
    match action.name.as_str() {
        "rename" => {
            let to = require(action, "to")?;
            Ok(Action::Rename(to))
        }
        "drop" => Ok(Action::Drop),
        "set-attribute" => Ok(Action::SetAttribute {
            name: require(action, "name")?,
            value: require(action, "value")?,
        }),
        "drop-attribute" => Ok(Action::DropAttribute(require(action, "name")?)),
        "rewrite-text" => {
            let raw = require(action, "pattern")?;
            let pattern = Regex::new(&raw).map_err(|err| {
                compile_err(format!("invalid rewrite-text pattern {:?}: {}", raw, err))
            })?;
            Ok(Action::RewriteText {
                pattern,
                replacement: require(action, "with")?,
            })
        }
        other => Err(compile_err(format!("unknown action <{}>", other))),
    }
}

fn require(action: &Element, attr: &str) -> Result<String> {
    action
        .attribute(attr)
        .map(str::to_string)
        .ok_or_else(|| compile_err(format!("<{}> is missing the {} attribute", action.name, attr)))
}

fn compile_err(message: impl Into<String>) -> Error {
    Error::TransformCompile(message.into())
}
