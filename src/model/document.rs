//! Document-level types.

use super::Element;

/// A parsed XML document.
///
/// A document is a thin wrapper around its root element. It is built once
/// by the parser (or by a transform producing a fresh tree) and treated as
/// immutable by the validation and rendering stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The single root element.
    pub root: Element,
}

impl Document {
    /// Create a document from its root element.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Name of the root element.
    pub fn root_name(&self) -> &str {
        &self.root.name
    }

    /// Total number of elements in the tree, root included.
    pub fn element_count(&self) -> usize {
        fn count(el: &Element) -> usize {
            1 + el.child_elements().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// Structural equality ignoring text formatting differences.
    ///
    /// Two documents are structurally equivalent when their trees match
    /// element-for-element and attribute-for-attribute, with text runs
    /// compared after trimming surrounding whitespace.
    pub fn structurally_equals(&self, other: &Document) -> bool {
        fn eq(a: &Element, b: &Element) -> bool {
            if a.name != b.name || a.attributes != b.attributes {
                return false;
            }
            let a_kids: Vec<_> = a.child_elements().collect();
            let b_kids: Vec<_> = b.child_elements().collect();
            if a_kids.len() != b_kids.len() {
                return false;
            }
            if a.text().trim() != b.text().trim() {
                return false;
            }
            a_kids.iter().zip(b_kids.iter()).all(|(x, y)| eq(x, y))
        }
        eq(&self.root, &other.root)
    }
}
