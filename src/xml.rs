//! XML Tree Adapter.
//!
//! Converts raw XML into a generic element tree with typed accessors, so the
//! XLIFF extractor never depends on the parser library's event shape. The
//! adapter normalizes the "one-or-many" ambiguity of repeated child tags:
//! [`XmlNode::children`] always returns a list, whether a tag occurs once or
//! many times.

use quick_xml::{Reader, events::Event};

use crate::error::Error;

/// One parsed XML element: tag name, attributes, child elements in document
/// order, and direct text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
    text: String,
}

impl XmlNode {
    /// Tag name of this element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All direct children with the given tag, in document order.
    pub fn children(&self, tag: &str) -> Vec<&XmlNode> {
        self.children.iter().filter(|c| c.name == tag).collect()
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == tag)
    }

    /// All direct children in document order, regardless of tag.
    pub fn all_children(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter()
    }

    /// Direct text content of this element, or empty if none.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Parses a raw XML string into an element tree.
///
/// Returns [`Error::MalformedDocument`] when the input is not well-formed
/// XML or carries no root element. Whitespace-only text between elements is
/// dropped; CDATA sections contribute to the surrounding element's text.
pub fn parse_document(input: &str) -> Result<XmlNode, Error> {
    let mut reader = Reader::from_reader(input.as_bytes());
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(node_from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let node = node_from_start(e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| Error::malformed("unexpected closing tag"))?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(ref t)) => {
                if let Some(top) = stack.last_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| Error::MalformedDocument(e.to_string()))?;
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(ref c)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(c.as_ref()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // declaration, comments, processing instructions
            Err(e) => return Err(Error::MalformedDocument(e.to_string())),
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(Error::malformed("unexpected end of input"));
    }
    root.ok_or_else(|| Error::malformed("document has no root element"))
}

fn node_from_start(e: &quick_xml::events::BytesStart) -> Result<XmlNode, Error> {
    let mut node = XmlNode {
        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
        ..XmlNode::default()
    };
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::MalformedDocument(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::MalformedDocument(e.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> Result<(), Error> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::malformed("multiple root elements"));
    }
    *root = Some(node);
    Ok(())
}
