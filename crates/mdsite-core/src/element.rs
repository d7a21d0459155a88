//! HTML element tree produced by the document assembler.
//!
//! The tree is built bottom-up and then serialized once with
//! [`Element::to_html`]. There are two node shapes:
//!
//! - [`Leaf`]: an optional tag around an optional text value. A leaf with no
//!   tag serializes to its raw value, which is how plain text is emitted.
//! - [`Parent`]: a tag around an ordered list of owned child elements.
//!
//! Values and attribute values are written verbatim. No HTML escaping is
//! performed, so an attribute value containing `"` produces malformed markup.

use crate::error::{Result, StructureError};

/// Element attributes, serialized in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    ///
    /// Re-inserting an existing key replaces its value but keeps its
    /// original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as ` key="value"` pairs; empty when there are no attributes.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        for (key, value) in self.iter() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// A terminal node: optional tag, optional value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaf {
    /// Wrapping tag. `None` emits the value without any markup.
    pub tag: Option<String>,
    /// Text content. `None` serializes as an empty string.
    pub value: Option<String>,
    pub attributes: Attributes,
}

impl Leaf {
    pub fn new(tag: Option<&str>, value: Option<&str>) -> Self {
        Self {
            tag: tag.map(str::to_owned),
            value: value.map(str::to_owned),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

/// A node wrapping an ordered sequence of children.
///
/// A parent must have a non-empty tag and at least one child; both are
/// checked when the tree is serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parent {
    pub tag: String,
    pub children: Vec<Element>,
    pub attributes: Attributes,
}

impl Parent {
    pub fn new(tag: impl Into<String>, children: Vec<Element>) -> Self {
        Self {
            tag: tag.into(),
            children,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }
}

/// A node in the output HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Leaf(Leaf),
    Parent(Parent),
}

impl Element {
    /// Untagged leaf holding raw text.
    pub fn text(value: impl Into<String>) -> Self {
        Element::Leaf(Leaf {
            tag: None,
            value: Some(value.into()),
            attributes: Attributes::new(),
        })
    }

    /// Tagged leaf holding text.
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Element::Leaf(Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: Attributes::new(),
        })
    }

    pub fn parent(tag: impl Into<String>, children: Vec<Element>) -> Self {
        Element::Parent(Parent::new(tag, children))
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Element::Leaf(leaf) => leaf.tag.as_deref(),
            Element::Parent(parent) => Some(&parent.tag),
        }
    }

    pub fn children(&self) -> &[Element] {
        match self {
            Element::Leaf(_) => &[],
            Element::Parent(parent) => &parent.children,
        }
    }

    /// Serialize this element and its descendants to HTML.
    ///
    /// Fails with a [`StructureError`] if any parent in the tree has an
    /// empty tag or no children. On failure nothing is returned.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            Element::Leaf(leaf) => {
                let value = leaf.value.as_deref().unwrap_or("");
                match leaf.tag.as_deref() {
                    Some(tag) => {
                        out.push('<');
                        out.push_str(tag);
                        leaf.attributes.write_html(out);
                        out.push('>');
                        out.push_str(value);
                        out.push_str("</");
                        out.push_str(tag);
                        out.push('>');
                    }
                    None => out.push_str(value),
                }
            }
            Element::Parent(parent) => {
                if parent.tag.is_empty() {
                    return Err(StructureError::MissingTag.into());
                }
                if parent.children.is_empty() {
                    return Err(StructureError::MissingChildren.into());
                }
                out.push('<');
                out.push_str(&parent.tag);
                parent.attributes.write_html(out);
                out.push('>');
                for child in &parent.children {
                    child.write_html(out)?;
                }
                out.push_str("</");
                out.push_str(&parent.tag);
                out.push('>');
            }
        }
        Ok(())
    }
}

impl From<Leaf> for Element {
    fn from(leaf: Leaf) -> Self {
        Element::Leaf(leaf)
    }
}

impl From<Parent> for Element {
    fn from(parent: Parent) -> Self {
        Element::Parent(parent)
    }
}
