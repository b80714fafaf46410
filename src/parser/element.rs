//! Generic XML element tree
//!
//! Just enough of a document model to carry built-in atoms: a name, ordered
//! attributes, child elements and character content.

use std::io::Cursor;

use indexmap::IndexMap;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{SwrlError, SwrlResult};

/// An XML element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    // ========================================================================
    // Writing
    // ========================================================================

    /// Serialize as an XML fragment without declaration
    pub fn to_xml(&self) -> SwrlResult<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        self.write(&mut writer)?;
        String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| SwrlError::xml(e.to_string()))
    }

    fn write(&self, writer: &mut Writer<Cursor<Vec<u8>>>) -> SwrlResult<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.text.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if !self.text.is_empty() {
            writer.write_event(Event::Text(BytesText::new(&self.text)))?;
        }
        for child in &self.children {
            child.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }

    // ========================================================================
    // Reading
    // ========================================================================

    /// Parse a document holding exactly one root element
    ///
    /// Declarations, comments and processing instructions are skipped.
    /// Whitespace between child elements is dropped; the text of leaf
    /// elements is kept verbatim.
    pub fn from_xml(input: &str) -> SwrlResult<Element> {
        let mut reader = Reader::from_str(input);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(Element::from_start(&e)?),
                Event::Empty(e) => {
                    let element = Element::from_start(&e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| SwrlError::xml("Closing tag without opening tag"))?;
                    if !element.children.is_empty() && element.text.trim().is_empty() {
                        element.text.clear();
                    }
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(t) => {
                    let text = t.unescape()?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(c) => {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    push_text(&mut stack, &text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(SwrlError::xml(format!("Element <{}> is not closed", open.name)));
        }
        root.ok_or_else(|| SwrlError::xml("Document has no root element"))
    }

    fn from_start(start: &BytesStart<'_>) -> SwrlResult<Element> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| SwrlError::xml(e.to_string()))?
            .to_string();
        let mut element = Element::new(name);
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| SwrlError::xml(e.to_string()))?
                .to_string();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.insert(key, value);
        }
        Ok(element)
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> SwrlResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(SwrlError::xml(format!(
            "Second root element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> SwrlResult<()> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(SwrlError::xml("Text outside the root element")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_write_empty_element() {
        let element = Element::new("Variable").with_attribute("IRI", "urn:swrl#X");
        assert_eq!(element.to_xml().unwrap(), r#"<Variable IRI="urn:swrl#X"/>"#);
    }

    #[test]
    fn test_write_escapes() {
        let element = Element::new("Literal")
            .with_attribute("note", "a \"b\" & c")
            .with_text("x < y & z");
        let xml = element.to_xml().unwrap();
        assert_eq!(
            xml,
            r#"<Literal note="a &quot;b&quot; &amp; c">x &lt; y &amp; z</Literal>"#
        );
        assert_eq!(Element::from_xml(&xml).unwrap(), element);
    }

    #[test]
    fn test_read_nested() {
        let xml = r#"<?xml version="1.0"?>
            <!-- an atom -->
            <BuiltInAtom IRI="http://www.w3.org/2003/11/swrlb#mod">
                <Variable IRI="urn:swrl#X"/>
                <Literal datatypeIRI="int"> 5 </Literal>
            </BuiltInAtom>"#;
        let element = Element::from_xml(xml).unwrap();
        assert_eq!(element.name(), "BuiltInAtom");
        assert_eq!(element.text(), "");
        assert_eq!(element.children().len(), 2);
        assert_eq!(element.children()[0].attribute("IRI"), Some("urn:swrl#X"));
        assert_eq!(element.children()[1].text(), " 5 ");
    }

    #[test]
    fn test_read_cdata() {
        let element = Element::from_xml("<Literal><![CDATA[a<b]]></Literal>").unwrap();
        assert_eq!(element.text(), "a<b");
    }

    #[test]
    fn test_attribute_order_preserved() {
        let element = Element::from_xml(r#"<a z="1" b="2" m="3"/>"#).unwrap();
        let keys: Vec<&str> = element.attributes().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "b", "m"]);
    }

    #[test]
    fn test_read_errors() {
        assert_eq!(Element::from_xml("").unwrap_err().code, ErrorCode::InvalidXml);
        assert_eq!(Element::from_xml("<a/><b/>").unwrap_err().code, ErrorCode::InvalidXml);
        assert_eq!(Element::from_xml("<a><b></a>").unwrap_err().code, ErrorCode::InvalidXml);
        assert_eq!(Element::from_xml("<a>").unwrap_err().code, ErrorCode::InvalidXml);
        assert_eq!(Element::from_xml("stray <a/>").unwrap_err().code, ErrorCode::InvalidXml);
    }
}
