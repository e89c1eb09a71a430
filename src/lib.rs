/*!
 * folder-to-llm - Convert a folder into an LLM prompt document
 *
 * Walks a directory, renders its structure, and serializes the readable
 * text files as a tagged XML document list, a JSON object, or delimited
 * plain text.
 */

pub mod config;
pub mod confirm;
pub mod error;
pub mod matcher;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, Config, Format, LlmPreset};
pub use confirm::{confirm, Confirmation};
pub use error::{FolderToLlmError, Result};
pub use matcher::{Exclusion, ExclusionRule, PathMatcher};
pub use report::{FileReportInfo, Reporter, ScanReport};
pub use scanner::Scanner;
pub use tree::{render_structure, TreeStyle};
pub use types::{Document, Entry, FileType, RenderedOutput};
pub use writer::{write_output, DocumentWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Walk, read and render the target directory in one pass
pub fn render_folder(scanner: &Scanner, config: &Config) -> Result<RenderedOutput> {
    let matcher = PathMatcher::new(&config.exclude_patterns);
    let entries = scanner.walk(&matcher)?;
    log::debug!("Walked {} entries", entries.len());

    let structure = if config.include_structure {
        Some(render_structure(
            &scanner.root_name()?,
            &entries,
            config.tree_style,
        ))
    } else {
        None
    };

    let documents = scanner.collect_documents(&entries)?;
    DocumentWriter::new(config.format).render(structure.as_deref(), &documents)
}
