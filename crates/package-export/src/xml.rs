//! Minimal XML element tree and its writer.

use gtcompose_common::error::{GtError, GtResult};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

/// An element with ordered attributes and ordered children.
///
/// Attribute order is preserved on output; the consuming application does
/// not care, but stable order keeps exports byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: append an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    /// Builder: append an attribute only when `value` is present.
    pub fn attr_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.attr(key, v),
            None => self,
        }
    }

    /// Builder: append a child element.
    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn find_child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// How a document is laid out on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Spaces per nesting level; 0 writes everything on one line.
    pub indent: usize,

    /// Encoding label for the `<?xml ..?>` line. `None` omits the line.
    pub declared_encoding: Option<String>,
}

impl XmlOptions {
    pub fn compact() -> Self {
        Self {
            indent: 0,
            declared_encoding: None,
        }
    }

    pub fn with_declaration(mut self, encoding: impl Into<String>) -> Self {
        self.declared_encoding = Some(encoding.into());
        self
    }
}

/// Serialize `root` to UTF-8 bytes.
///
/// The declaration only labels the document; the bytes are always UTF-8
/// whatever `declared_encoding` says.
pub fn write_document(root: &XmlElement, options: &XmlOptions) -> GtResult<Vec<u8>> {
    let mut buffer = Vec::new();
    if let Some(encoding) = &options.declared_encoding {
        buffer.extend_from_slice(
            format!("<?xml version='1.0' encoding='{encoding}'?>\n").as_bytes(),
        );
    }

    let mut writer = if options.indent > 0 {
        Writer::new_with_indent(buffer, b' ', options.indent)
    } else {
        Writer::new(buffer)
    };
    write_element(&mut writer, root)?;
    Ok(writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> GtResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        write_element(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> GtResult<()> {
    writer
        .write_event(event)
        .map_err(|e| GtError::xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(root: &XmlElement, options: &XmlOptions) -> String {
        String::from_utf8(write_document(root, options).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_element_without_declaration() {
        let out = to_string(&XmlElement::new("Resources"), &XmlOptions::compact());
        assert_eq!(out, "<Resources/>");
    }

    #[test]
    fn test_declaration_uses_given_label() {
        let options = XmlOptions::compact().with_declaration("utf-16");
        let out = to_string(&XmlElement::new("A"), &options);
        assert!(out.starts_with("<?xml version='1.0' encoding='utf-16'?>\n<A"));
    }

    #[test]
    fn test_indented_nesting_and_attribute_order() {
        let root = XmlElement::new("Composition")
            .attr("Width", 1920)
            .attr("Height", 1080)
            .child(XmlElement::new("Layer").attr("Name", "L1"));
        let options = XmlOptions {
            indent: 2,
            declared_encoding: None,
        };
        let out = to_string(&root, &options);
        assert_eq!(
            out,
            "<Composition Width=\"1920\" Height=\"1080\">\n  <Layer Name=\"L1\"/>\n</Composition>"
        );
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let root = XmlElement::new("TextBlock").attr("Text", "a < b & \"c\"");
        let out = to_string(&root, &XmlOptions::compact());
        assert!(out.contains("&lt;"));
        assert!(out.contains("&amp;"));
        assert!(out.contains("&quot;"));
    }

    #[test]
    fn test_attr_opt_skips_none() {
        let el = XmlElement::new("X")
            .attr_opt("A", Some(1))
            .attr_opt::<i32>("B", None);
        assert_eq!(el.attribute("A"), Some("1"));
        assert!(el.attribute("B").is_none());
    }
}
