/*!
 * Core types and data structures for the folder-to-llm application
 */

use serde::Serialize;

use crate::config::Format;

/// Classification of a file by the content reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Text file with readable content
    TextFile,
    /// Binary or otherwise unreadable file
    BinaryFile,
}

/// One path discovered while walking the target directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Relative path from the scan root, always with forward slashes
    pub path: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
    /// Number of path components (top-level entries have depth 1)
    pub depth: usize,
    /// Whether the content reader may look at this entry
    pub read_content: bool,
}

impl Entry {
    /// Final path segment
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// A readable file destined for the rendered output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// 1-based position among readable files
    pub index: usize,
    /// Relative path of the source file
    pub source: String,
    /// Verbatim file content
    pub document_content: String,
}

/// The final rendered string and the format it was rendered in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub format: Format,
    pub text: String,
}
