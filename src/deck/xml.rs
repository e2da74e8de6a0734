//! A small mutable XML tree for OPC package parts.
//!
//! Parts are read with `quick-xml` into a tree that keeps character data and
//! attribute values in their escaped form, so untouched content is written
//! back exactly as it was read.

use std::borrow::Cow;
use std::fmt::Write;

use quick_xml::Reader;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesStart, Event};

use super::error::{DeckError, Result};

/// A node of an XML part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data, escaped.
    Text(String),
    /// Declaration, comment, CDATA section or processing instruction, verbatim.
    Raw(String),
}

/// An element with its attributes (escaped values) and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element holding a single text node.
    ///
    /// Control characters XML cannot carry are written as `_xHHHH_`.
    pub fn with_text(name: impl Into<String>, text: &str) -> Self {
        let mut element = Self::new(name);
        if !text.is_empty() {
            let encoded = encode_control_chars(text);
            element.children.push(Node::Text(escape(&*encoded).into_owned()));
        }
        element
    }

    fn from_start(part: &str, start: &BytesStart<'_>) -> Result<Self> {
        let name = utf8(part, start.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| DeckError::xml(part, e))?;
            attributes.push((
                utf8(part, attribute.key.as_ref())?.to_string(),
                utf8(part, &attribute.value)?.to_string(),
            ));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Name without its namespace prefix (`p:sp` -> `sp`).
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Namespace prefix, if any (`a:t` -> `a`).
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Unescaped value of the attribute with the given qualified name.
    pub fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| unescape(value).unwrap_or(Cow::Borrowed(value.as_str())))
    }

    /// Sets an attribute, replacing any existing value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let escaped = escape(value).into_owned();
        if let Some(slot) = self.attributes.iter_mut().find(|(key, _)| key == name) {
            slot.1 = escaped;
        } else {
            self.attributes.push((name.to_string(), escaped));
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Self> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First child element with the given local name.
    pub fn child(&self, local_name: &str) -> Option<&Self> {
        self.elements().find(|e| e.local_name() == local_name)
    }

    pub fn child_mut(&mut self, local_name: &str) -> Option<&mut Self> {
        self.elements_mut().find(|e| e.local_name() == local_name)
    }

    /// Unescaped concatenation of the direct text and CDATA children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(raw) => Some(unescape(raw).unwrap_or(Cow::Borrowed(raw.as_str()))),
                Node::Raw(raw) => raw
                    .strip_prefix("<![CDATA[")
                    .and_then(|rest| rest.strip_suffix("]]>"))
                    .map(Cow::Borrowed),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Removes child elements matching the predicate, keeping everything else.
    pub fn remove_elements(&mut self, mut predicate: impl FnMut(&Self) -> bool) {
        self.children.retain(|node| match node {
            Node::Element(element) => !predicate(element),
            _ => true,
        });
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            // Values read from single-quoted attributes may carry a raw `"`.
            let quote = if value.contains('"') { '\'' } else { '"' };
            let _ = write!(out, " {key}={quote}{value}{quote}");
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl Node {
    fn write_to(&self, out: &mut String) {
        match self {
            Self::Element(element) => element.write_to(out),
            Self::Text(text) | Self::Raw(text) => out.push_str(text),
        }
    }
}

/// A parsed XML part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    nodes: Vec<Node>,
}

impl XmlDocument {
    /// Parses a part; `part` names it in error messages.
    pub fn parse(part: &str, bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<Element> = Vec::new();
        let mut nodes = Vec::new();
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| DeckError::xml(part, e))?;

            let node = match event {
                Event::Start(start) => {
                    stack.push(Element::from_start(part, &start)?);
                    None
                }
                Event::Empty(start) => Some(Node::Element(Element::from_start(part, &start)?)),
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| DeckError::xml(part, "unexpected closing tag"))?;
                    Some(Node::Element(element))
                }
                Event::Text(text) => Some(Node::Text(utf8(part, &text)?.to_string())),
                Event::CData(data) => Some(Node::Raw(format!(
                    "<![CDATA[{}]]>",
                    utf8(part, &data)?
                ))),
                Event::Comment(comment) => {
                    Some(Node::Raw(format!("<!--{}-->", utf8(part, &comment)?)))
                }
                Event::Decl(decl) => Some(Node::Raw(format!("<?{}?>", utf8(part, &decl)?))),
                Event::PI(pi) => Some(Node::Raw(format!("<?{}?>", utf8(part, &pi)?))),
                Event::DocType(doctype) => Some(Node::Raw(format!(
                    "<!DOCTYPE {}>",
                    utf8(part, &doctype)?
                ))),
                Event::Eof => break,
            };

            if let Some(node) = node {
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => nodes.push(node),
                }
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(DeckError::xml(part, format!("unclosed element <{}>", open.name)));
        }
        if !nodes.iter().any(|node| matches!(node, Node::Element(_))) {
            return Err(DeckError::xml(part, "no root element"));
        }

        Ok(Self { nodes })
    }

    pub fn root(&self) -> &Element {
        self.nodes
            .iter()
            .find_map(|node| match node {
                Node::Element(element) => Some(element),
                _ => None,
            })
            .unwrap_or_else(|| unreachable!("parse guarantees a root element"))
    }

    pub fn root_mut(&mut self) -> &mut Element {
        self.nodes
            .iter_mut()
            .find_map(|node| match node {
                Node::Element(element) => Some(element),
                _ => None,
            })
            .unwrap_or_else(|| unreachable!("parse guarantees a root element"))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_to(&mut out);
        }
        out.into_bytes()
    }
}

fn utf8<'a>(part: &str, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| DeckError::xml(part, e))
}

/// Replaces C0 control characters other than tab and line feed (carriage
/// return included) with the `_xHHHH_` form used in OOXML string content.
fn encode_control_chars(text: &str) -> Cow<'_, str> {
    let is_control = |c: char| c < '\u{20}' && c != '\t' && c != '\n';
    if !text.contains(is_control) {
        return Cow::Borrowed(text);
    }

    let mut encoded = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if is_control(c) {
            let _ = write!(encoded, "_x{:04X}_", u32::from(c));
        } else {
            encoded.push(c);
        }
    }
    Cow::Owned(encoded)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="urn:a" xmlns:p="urn:p"><!-- note --><p:txBody><a:p><a:r><a:t>Fish &amp; Chips</a:t></a:r></a:p></p:txBody><a:empty/></p:sld>"#;

    #[test]
    fn test_untouched_document_serializes_identically() {
        let doc = XmlDocument::parse("sample.xml", SAMPLE.as_bytes()).unwrap();
        assert_eq!(String::from_utf8(doc.to_bytes()).unwrap(), SAMPLE);
    }

    #[test]
    fn test_text_is_unescaped() {
        let doc = XmlDocument::parse("sample.xml", SAMPLE.as_bytes()).unwrap();
        let t = doc
            .root()
            .child("txBody")
            .and_then(|b| b.child("p"))
            .and_then(|p| p.child("r"))
            .and_then(|r| r.child("t"))
            .unwrap();
        assert_eq!(t.text(), "Fish & Chips");
    }

    #[test]
    fn test_local_name_and_prefix() {
        let element = Element::new("p:spTree");
        assert_eq!(element.local_name(), "spTree");
        assert_eq!(element.prefix(), Some("p"));

        let bare = Element::new("Relationships");
        assert_eq!(bare.local_name(), "Relationships");
        assert_eq!(bare.prefix(), None);
    }

    #[test]
    fn test_with_text_escapes() {
        let mut out = String::new();
        Element::with_text("a:t", "<b> & \"c\"").write_to(&mut out);
        assert_eq!(out, "<a:t>&lt;b&gt; &amp; &quot;c&quot;</a:t>");
    }

    #[test]
    fn test_with_text_encodes_control_characters() {
        let mut out = String::new();
        Element::with_text("a:t", "a\u{1}b\rc\u{1f}\td & e").write_to(&mut out);
        assert_eq!(out, "<a:t>a_x0001_b_x000D_c_x001F_\td &amp; e</a:t>");

        let wrapped = format!("<p:sp xmlns:a=\"urn:a\" xmlns:p=\"urn:p\">{out}</p:sp>");
        let doc = XmlDocument::parse("slide.xml", wrapped.as_bytes()).unwrap();
        assert_eq!(doc.root().child("t").unwrap().text(), "a_x0001_b_x000D_c_x001F_\td & e");
    }

    #[test]
    fn test_text_includes_cdata() {
        let xml = "<a:r xmlns:a=\"urn:a\"><a:t>x &amp; <![CDATA[R&D <y>]]></a:t></a:r>";
        let doc = XmlDocument::parse("slide.xml", xml.as_bytes()).unwrap();
        let t = doc.root().child("t").unwrap();
        assert_eq!(t.text(), "x & R&D <y>");
        assert_eq!(String::from_utf8(doc.to_bytes()).unwrap(), xml);
    }

    #[test]
    fn test_set_attribute_replaces_value() {
        let mut element = Element::new("a:rPr");
        element.set_attribute("sz", "1800");
        element.set_attribute("lang", "ko-KR");
        element.set_attribute("sz", "1000");
        assert_eq!(element.attribute("sz").as_deref(), Some("1000"));
        assert_eq!(element.attributes.len(), 2);
    }

    #[test]
    fn test_single_quoted_attribute_round_trip() {
        let xml = r#"<root name='say "hi"'/>"#;
        let doc = XmlDocument::parse("q.xml", xml.as_bytes()).unwrap();
        assert_eq!(doc.root().attribute("name").as_deref(), Some("say \"hi\""));
        assert_eq!(String::from_utf8(doc.to_bytes()).unwrap(), xml);
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        assert!(XmlDocument::parse("bad.xml", b"<a><b></a>").is_err());
        assert!(XmlDocument::parse("bad.xml", b"<a>").is_err());
        assert!(XmlDocument::parse("bad.xml", b"").is_err());
    }

    #[test]
    fn test_remove_elements_keeps_other_nodes() {
        let xml = "<r><a/>text<b/><a/></r>";
        let mut doc = XmlDocument::parse("r.xml", xml.as_bytes()).unwrap();
        doc.root_mut().remove_elements(|e| e.name == "a");
        assert_eq!(String::from_utf8(doc.to_bytes()).unwrap(), "<r>text<b/></r>");
    }
}
