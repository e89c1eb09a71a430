/*!
 * Document rendering for folder-to-llm
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;

use crate::config::Format;
use crate::error::Result;
use crate::types::{Document, RenderedOutput};

/// Separator line framing each document in the delimited text format
const SEPARATOR: &str = "---";

/// Renders documents in one of the supported output formats
pub struct DocumentWriter {
    format: Format,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    folder_structure: &'a str,
    documents: &'a [Document],
}

impl DocumentWriter {
    /// Create a new document writer
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    /// Render the documents, preceded by the structure view when one is given
    pub fn render(&self, structure: Option<&str>, documents: &[Document]) -> Result<RenderedOutput> {
        let text = match self.format {
            Format::Xml => self.render_xml(structure, documents)?,
            Format::Json => self.render_json(structure, documents)?,
            Format::Markdown => self.render_text(structure, documents),
        };

        Ok(RenderedOutput {
            format: self.format,
            text,
        })
    }

    fn render_xml(&self, structure: Option<&str>, documents: &[Document]) -> Result<String> {
        let mut xml_writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        if let Some(structure) = structure {
            write_text_element(&mut xml_writer, "folder_structure", structure)?;
        }

        xml_writer.write_event(Event::Start(BytesStart::new("documents")))?;
        for document in documents {
            let mut start_tag = BytesStart::new("document");
            start_tag.push_attribute(("index", document.index.to_string().as_str()));
            xml_writer.write_event(Event::Start(start_tag))?;

            write_text_element(&mut xml_writer, "source", &document.source)?;
            write_text_element(&mut xml_writer, "document_content", &document.document_content)?;

            xml_writer.write_event(Event::End(BytesEnd::new("document")))?;
        }
        xml_writer.write_event(Event::End(BytesEnd::new("documents")))?;

        String::from_utf8(xml_writer.into_inner())
            .map_err(|e| crate::error!(Writer, "XML output is not UTF-8: {}", e))
    }

    fn render_json(&self, structure: Option<&str>, documents: &[Document]) -> Result<String> {
        let output = JsonOutput {
            folder_structure: structure.unwrap_or_default(),
            documents,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn render_text(&self, structure: Option<&str>, documents: &[Document]) -> String {
        let mut out = String::new();

        if let Some(structure) = structure {
            out.push_str("Project Structure:\n```\n");
            out.push_str(structure);
            out.push_str("\n```\n\n");
        }

        for document in documents {
            out.push_str(&document.source);
            out.push('\n');
            out.push_str(SEPARATOR);
            out.push('\n');
            out.push_str(&document.document_content);
            out.push('\n');
            out.push_str(SEPARATOR);
            out.push('\n');
        }

        out
    }
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write the rendered text to `destination`, or to stdout when it is `None`
pub fn write_output(output: &RenderedOutput, destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(output.text.as_bytes())?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(output.text.as_bytes())?;
            if !output.text.ends_with('\n') {
                handle.write_all(b"\n")?;
            }
            handle.flush()?;
        }
    }
    Ok(())
}
