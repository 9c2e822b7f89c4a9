//! Generic XML element tree for ODF parts.
//!
//! Every ODF part (content, styles, meta, or a whole flat XML document) is read
//! into an owned tree of [`Element`]s. Mixed content is kept in document order
//! as [`Node`]s, so adjacent text runs and spans can be reasoned about, and a
//! payload moved out of the tree leaves a [`Node::Tombstone`] behind.

use crate::common::{Error, Result};
use quick_xml::events::{BytesStart, Event};

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A nested element
    Element(Element),
    /// Character data (already unescaped)
    Text(String),
    /// Placeholder for a payload that was moved out of the tree; carries the
    /// fingerprint of what used to be here
    Tombstone(String),
}

impl Node {
    /// Get the element if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get the mutable element if this node is one
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get the text if this node is character data
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// An XML element with ordered attributes and mixed content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    tag_name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create a new element
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get the qualified tag name (`text:p`)
    #[inline]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Check the qualified tag name
    #[inline]
    pub fn is(&self, tag_name: &str) -> bool {
        self.tag_name == tag_name
    }

    /// Get the local name (without namespace prefix)
    pub fn local_name(&self) -> &str {
        self.tag_name
            .split_once(':')
            .map(|(_, local)| local)
            .unwrap_or(&self.tag_name)
    }

    /// Get attribute value by qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Get a non-empty attribute value
    pub fn non_empty_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).filter(|value| !value.is_empty())
    }

    /// Get boolean attribute value
    pub fn bool_attribute(&self, name: &str) -> Option<bool> {
        self.attribute(name).and_then(|s| match s {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        })
    }

    /// Get integer attribute value
    pub fn int_attribute(&self, name: &str) -> Option<i64> {
        self.attribute(name).and_then(|s| s.trim().parse().ok())
    }

    /// All attributes in document order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Set attribute value, replacing an existing one in place
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove attribute
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child appender
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_element(child);
        self
    }

    /// Builder-style text appender
    pub fn with_text(mut self, text: &str) -> Self {
        self.push_text(text);
        self
    }

    /// Child nodes in document order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Mutable access to the child nodes
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Move the child nodes out, leaving the element empty
    pub fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    /// Child elements, skipping character data
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Mutable child elements, skipping character data
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// First child element with the given tag name
    pub fn first_child_element(&self, tag_name: &str) -> Option<&Element> {
        self.child_elements().find(|child| child.is(tag_name))
    }

    /// First descendant element (depth first) with the given tag name
    pub fn find_descendant(&self, tag_name: &str) -> Option<&Element> {
        for child in self.child_elements() {
            if child.is(tag_name) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(tag_name) {
                return Some(found);
            }
        }
        None
    }

    /// The element at child position `index`, if that child is an element
    pub fn child_element_at(&self, index: usize) -> Option<&Element> {
        self.children.get(index).and_then(Node::as_element)
    }

    /// Mutable element at child position `index`
    pub fn child_element_at_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.children.get_mut(index).and_then(Node::as_element_mut)
    }

    /// Position of the next element sibling after child `index`.
    ///
    /// Whitespace-only character data between the two is skipped; any other
    /// content breaks adjacency.
    pub fn next_sibling_element_index(&self, index: usize) -> Option<usize> {
        for (offset, node) in self.children.iter().enumerate().skip(index + 1) {
            match node {
                Node::Element(_) => return Some(offset),
                Node::Text(text) if text.trim().is_empty() => continue,
                _ => return None,
            }
        }
        None
    }

    /// Append a child element
    pub fn push_element(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Append character data, merging with a preceding text node
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    /// Append any node, merging adjacent text
    pub fn push_node(&mut self, node: Node) {
        match node {
            Node::Text(text) => self.push_text(&text),
            other => self.children.push(other),
        }
    }

    /// Text content of this element and all descendants.
    ///
    /// ODF whitespace elements are expanded: `text:s` to its space count,
    /// `text:tab` to a tab and `text:line-break` to a newline.
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => match e.tag_name() {
                    "text:s" => {
                        let count = e.int_attribute("text:c").unwrap_or(1).max(1) as usize;
                        out.extend(std::iter::repeat_n(' ', count));
                    },
                    "text:tab" => out.push('\t'),
                    "text:line-break" => out.push('\n'),
                    _ => e.collect_text(out),
                },
                Node::Tombstone(_) => {},
            }
        }
    }

    /// Parse an element tree from XML bytes, returning the root element
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = quick_xml::Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    stack.push(Self::from_start(e)?);
                },
                Event::Empty(ref e) => {
                    let element = Self::from_start(e)?;
                    match stack.last_mut() {
                        Some(parent) => parent.push_element(element),
                        None => return Ok(element),
                    }
                },
                Event::Text(ref t) => {
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&t.unescape()?);
                    }
                },
                Event::CData(ref c) => {
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&String::from_utf8_lossy(c));
                    }
                },
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.push_element(element),
                            None => return Ok(element),
                        }
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if stack.is_empty() {
            Err(Error::XmlError("No root element found".to_string()))
        } else {
            Err(Error::XmlError("Unexpected end of document".to_string()))
        }
    }

    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let qname = e.name();
        let tag_name = std::str::from_utf8(qname.as_ref())
            .map_err(|_| Error::XmlError("Invalid UTF-8 in tag name".to_string()))?;
        let mut element = Element::new(tag_name);

        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|_| Error::XmlError("Invalid UTF-8 in attribute key".to_string()))?;
            // Namespace declarations carry no document semantics here
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            let value = attr.unescape_value()?;
            element.attributes.push((key.to_string(), value.into_owned()));
        }

        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_content() {
        let xml = br#"<?xml version="1.0"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0">
  <text:p text:style-name="P1">Hello <text:span text:style-name="T1">big</text:span> world&amp;co</text:p>
</office:document-content>"#;
        let root = Element::from_bytes(xml).unwrap();
        assert_eq!(root.tag_name(), "office:document-content");
        assert!(root.attributes().is_empty());

        let para = root.first_child_element("text:p").unwrap();
        assert_eq!(para.attribute("text:style-name"), Some("P1"));
        assert_eq!(para.children().len(), 3);
        assert_eq!(para.children()[0].as_text(), Some("Hello "));
        assert_eq!(para.text(), "Hello big world&co");
        assert_eq!(para.local_name(), "p");
    }

    #[test]
    fn test_start_tags_keep_qualified_names() {
        let root = Element::from_bytes(br#"<style:style style:name="Heading" xmlns:style="urn:style"/>"#).unwrap();
        assert_eq!(root.tag_name(), "style:style");
        assert_eq!(root.attributes(), &[("style:name".to_string(), "Heading".to_string())]);

        let nested = Element::from_bytes(b"<office:styles><style:default-style style:family=\"paragraph\"/></office:styles>").unwrap();
        let default = nested.first_child_element("style:default-style").unwrap();
        assert_eq!(default.attribute("style:family"), Some("paragraph"));
    }

    #[test]
    fn test_whitespace_elements_expand() {
        let xml = br#"<text:p>a<text:s text:c="3"/>b<text:tab/>c<text:line-break/>d</text:p>"#;
        let para = Element::from_bytes(xml).unwrap();
        assert_eq!(para.text(), "a   b\tc\nd");
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(Element::from_bytes(b"<a><b></a>").is_err());
        assert!(Element::from_bytes(b"<a><b>").is_err());
        assert!(Element::from_bytes(b"   ").is_err());
    }

    #[test]
    fn test_sibling_navigation() {
        let frame = Element::new("draw:frame")
            .with_child(Element::new("draw:image").with_attribute("xlink:href", "a.svm"))
            .with_text("\n   ")
            .with_child(Element::new("draw:image").with_attribute("xlink:href", "a.png"));
        assert_eq!(frame.next_sibling_element_index(0), Some(2));
        assert_eq!(frame.next_sibling_element_index(2), None);

        let blocked = Element::new("draw:frame")
            .with_child(Element::new("draw:image"))
            .with_text("caption")
            .with_child(Element::new("draw:image"));
        assert_eq!(blocked.next_sibling_element_index(0), None);
    }

    #[test]
    fn test_attribute_editing() {
        let mut element = Element::new("style:style").with_attribute("style:name", "P1");
        element.set_attribute("style:name", "P2");
        element.set_attribute("style:family", "paragraph");
        assert_eq!(element.attributes().len(), 2);
        assert_eq!(element.attribute("style:name"), Some("P2"));
        assert_eq!(element.remove_attribute("style:family").as_deref(), Some("paragraph"));
        assert_eq!(element.attribute("style:family"), None);
    }
}
