//! Element and node-level types.

/// An attribute on an element.
///
/// Attributes keep their source order so that rendering is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written, including any namespace prefix.
    pub name: String,

    /// Unescaped attribute value.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A child of an element: a nested element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),

    /// Unescaped character data (includes CDATA content).
    Text(String),
}

impl Node {
    /// Return the contained element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Return the contained text, if this node is a text run.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Element(_) => None,
            Node::Text(text) => Some(text),
        }
    }
}

/// An XML element: name, ordered attributes, and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element name as written, including any namespace prefix.
    pub name: String,

    /// Attributes in source order.
    pub attributes: Vec<Attribute>,

    /// Child nodes in source order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create a new element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Add an attribute, preserving insertion order.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.attributes.iter_mut().find(|attr| attr.name == name) {
            attr.value = value;
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
    }

    /// Remove an attribute by name, if present.
    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|attr| attr.name != name);
    }

    /// Add a child element.
    pub fn add_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Add a text child.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Iterate over child elements only, skipping text runs.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Child elements with the given name.
    ///
    /// The yielded elements borrow only from `self`, not from `name`.
    pub fn children_named<'s, 'n: 's>(
        &'s self,
        name: &'n str,
    ) -> impl Iterator<Item = &'s Element> + 's {
        self.child_elements().filter(move |el| el.name == name)
    }

    /// First child element with the given name.
    pub fn child_named(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.name == name)
    }

    /// Whether this element contains any child elements.
    pub fn has_element_children(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(Node::as_text)
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        let mut item = Element::new("item");
        item.set_attribute("id", "42");
        let mut title = Element::new("title");
        title.add_text("Widget");
        item.add_child(title);
        item
    }

    #[test]
    fn test_attribute_lookup() {
        let el = sample();
        assert_eq!(el.attribute("id"), Some("42"));
        assert_eq!(el.attribute("missing"), None);
    }

    #[test]
    fn test_set_attribute_overwrites_in_place() {
        let mut el = sample();
        el.set_attribute("id", "43");
        el.set_attribute("lang", "en");
        assert_eq!(el.attribute("id"), Some("43"));
        // Order is insertion order, updates do not reorder
        assert_eq!(el.attributes[0].name, "id");
        assert_eq!(el.attributes[1].name, "lang");
    }

    #[test]
    fn test_remove_attribute() {
        let mut el = sample();
        el.remove_attribute("id");
        assert_eq!(el.attribute("id"), None);
        el.remove_attribute("id");
    }

    #[test]
    fn test_child_navigation() {
        let el = sample();
        assert!(el.has_element_children());
        assert_eq!(el.child_named("title").unwrap().text(), "Widget");
        assert!(el.child_named("price").is_none());
        assert_eq!(el.children_named("title").count(), 1);
    }

    #[test]
    fn test_child_named_outlives_lookup_key() {
        let el = sample();
        // The returned reference borrows from the element, not the key
        let found = {
            let key = String::from("title");
            el.child_named(&key)
        };
        assert_eq!(found.unwrap().text(), "Widget");
    }

    #[test]
    fn test_text_concatenation() {
        let mut el = Element::new("p");
        el.add_text("hello ");
        el.add_child(Element::new("br"));
        el.add_text("world");
        assert_eq!(el.text(), "hello world");
    }
}
