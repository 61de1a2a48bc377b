//! Owned HTML element tree.
//!
//! This is the target-format tree the transforms operate on: element nodes
//! with a tag, an insertion-ordered property map, and ordered children; text
//! nodes; and raw HTML passed through verbatim from the source.
//!
//! Property names are stored the way the stage that set them wrote them.
//! Camel-case `data*` names (`dataKey`) are turned into kebab-case attributes
//! (`data-key`) by the serializer.

/// Insertion-ordered property map of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(Vec<(String, String)>);

impl Properties {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether a property is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a property. An existing value keeps its position and is replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.0.iter().position(|(key, _)| key == name)?;
        Some(self.0.remove(index).1)
    }

    /// Copy every property of `other` into this map.
    pub fn extend_from(&mut self, other: &Properties) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

/// A node of the HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element with tag, properties, and children.
    Element(Element),
    /// Literal text, escaped on output.
    Text(String),
    /// Raw HTML, written verbatim on output.
    Raw(String),
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    /// The element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Mutable access to the element, if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Whether this node is an element with the given tag.
    pub fn is_element(&self, tag: &str) -> bool {
        self.as_element().is_some_and(|el| el.tag == tag)
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(value) => out.push_str(value),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Node::Raw(_) => {}
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name, lowercase.
    pub tag: String,
    /// Properties rendered as attributes.
    pub properties: Properties,
    /// Child nodes, in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no properties or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name, value);
        self
    }

    /// Builder: replace all properties.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Builder: append children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Get a property value by name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name)
    }

    /// Iterate over child elements, skipping text and raw nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// The last child that is an element.
    pub fn last_element_child(&self) -> Option<&Element> {
        self.children.iter().rev().find_map(Node::as_element)
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

/// Root of an HTML tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Root {
    /// Top-level nodes, in document order.
    pub children: Vec<Node>,
}

impl Root {
    /// Create a root from top-level nodes.
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Iterate over top-level elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Visit every element in the tree, depth first, in document order.
    pub fn visit_elements_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        for child in &mut self.children {
            if let Node::Element(el) = child {
                visit_element_mut(el, visit);
            }
        }
    }
}

fn visit_element_mut(el: &mut Element, visit: &mut impl FnMut(&mut Element)) {
    visit(el);
    for child in &mut el.children {
        if let Node::Element(inner) = child {
            visit_element_mut(inner, visit);
        }
    }
}
