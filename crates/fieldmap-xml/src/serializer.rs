//! Nested tree to XML text
//!
//! Encoding rules:
//! - an object value becomes one child element per key, in key order
//! - an array value repeats the element once per item
//! - keys starting with `@` become attributes of the enclosing element
//! - the `#` key becomes the enclosing element's text
//! - `true`/`false` render as `1`/`0`, `null` as an empty element
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::error::{XmlError, XmlResult};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{Map, Value};
use std::io::Write;

/// Prefix marking an attribute key
pub const ATTRIBUTE_PREFIX: char = '@';

/// Key holding an element's text content
pub const TEXT_KEY: &str = "#";

/// Renders a nested tree under a root element
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlSerializer;

impl XmlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Render `tree` as the content of `<root>`, preceded by an XML declaration
    pub fn serialize(&self, root: &str, tree: &Map<String, Value>) -> XmlResult<String> {
        check_name(root)?;

        let mut xml = Writer::new(Vec::new());
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml.get_mut().write_all(b"\n")?;
        write_object(&mut xml, root, tree)?;
        xml.get_mut().write_all(b"\n")?;

        Ok(String::from_utf8(xml.into_inner())?)
    }
}

fn write_value(xml: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> XmlResult<()> {
    match value {
        Value::Array(items) => {
            for item in items {
                write_value(xml, name, item)?;
            }
            Ok(())
        }
        Value::Object(children) => write_object(xml, name, children),
        Value::Null => {
            check_name(name)?;
            xml.write_event(Event::Empty(BytesStart::new(name)))?;
            Ok(())
        }
        scalar => {
            check_name(name)?;
            xml.write_event(Event::Start(BytesStart::new(name)))?;
            xml.write_event(Event::Text(BytesText::new(&scalar_text(scalar))))?;
            xml.write_event(Event::End(BytesEnd::new(name)))?;
            Ok(())
        }
    }
}

fn write_object(xml: &mut Writer<Vec<u8>>, name: &str, children: &Map<String, Value>) -> XmlResult<()> {
    check_name(name)?;

    let mut start = BytesStart::new(name);
    let mut text = None;
    let mut elements = Vec::new();

    for (key, value) in children {
        if let Some(attribute) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            check_name(attribute)?;
            start.push_attribute((attribute, scalar_text(value).as_str()));
        } else if key == TEXT_KEY {
            text = Some(scalar_text(value));
        } else {
            elements.push((key, value));
        }
    }

    if text.is_none() && elements.is_empty() {
        xml.write_event(Event::Empty(start))?;
        return Ok(());
    }

    xml.write_event(Event::Start(start))?;
    if let Some(text) = text {
        xml.write_event(Event::Text(BytesText::new(&text)))?;
    }
    for (key, value) in elements {
        write_value(xml, key, value)?;
    }
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Text form of a value used as element text or attribute value
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Element and attribute names: a letter or `_` first, then letters,
/// digits, `_`, `-`, `.` or `:`
pub fn check_name(name: &str) -> XmlResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(XmlError::invalid_name(name))
    }
}
