//! Re-indents XML text
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use crate::error::{XmlError, XmlResult};
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};

/// Indent width in spaces
pub const INDENT: usize = 2;

/// Pretty-prints XML with two-space indentation
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlPrettier;

impl XmlPrettier {
    pub fn new() -> Self {
        Self
    }

    /// Re-indent `xml`, keeping its declaration and content.
    ///
    /// Adjacent text, entity references and CDATA form one text run that is
    /// written verbatim. A whitespace-only run is dropped unless it is the
    /// whole content of an element, so elements holding only text stay on
    /// one line. The result ends with a newline.
    pub fn pretty(&self, xml: &str) -> XmlResult<String> {
        let mut reader = Reader::from_str(xml);
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
        let mut run: Vec<u8> = Vec::new();
        let mut just_opened = false;
        let mut depth = 0usize;

        loop {
            let event = reader.read_event()?;
            match &event {
                Event::Text(text) => {
                    run.extend_from_slice(text);
                    continue;
                }
                Event::GeneralRef(name) => {
                    run.push(b'&');
                    run.extend_from_slice(name);
                    run.push(b';');
                    continue;
                }
                Event::CData(data) => {
                    run.extend_from_slice(b"<![CDATA[");
                    run.extend_from_slice(data);
                    run.extend_from_slice(b"]]>");
                    continue;
                }
                _ => {}
            }

            let closes_text_only = just_opened && matches!(event, Event::End(_));
            flush_run(&mut writer, &mut run, closes_text_only)?;

            match event {
                Event::Eof => break,
                Event::Start(_) => depth += 1,
                Event::End(_) => depth = depth.saturating_sub(1),
                _ => {}
            }
            just_opened = matches!(event, Event::Start(_));
            writer.write_event(event)?;
        }

        if depth != 0 {
            return Err(XmlError::Read(format!("{} element(s) left unclosed", depth)));
        }

        let mut pretty = String::from_utf8(writer.into_inner())?;
        pretty.push('\n');
        Ok(pretty)
    }
}

/// Write the pending text run as one event, or drop it if it is only layout
fn flush_run(writer: &mut Writer<Vec<u8>>, run: &mut Vec<u8>, keep_blank: bool) -> XmlResult<()> {
    if run.is_empty() {
        return Ok(());
    }

    let bytes = std::mem::take(run);
    if !keep_blank && bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }

    let text = String::from_utf8(bytes)?;
    writer.write_event(Event::Text(BytesText::from_escaped(text)))?;
    Ok(())
}
