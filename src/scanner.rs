/*!
 * Directory walking and file content reading
 */

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use walkdir::WalkDir;

use crate::config::Config;
use crate::matcher::{Exclusion, PathMatcher};
use crate::report::FileReportInfo;
use crate::types::{Document, Entry, FileType};

/// Number of leading bytes inspected by the binary heuristic
const SAMPLE_SIZE: usize = 8192;

/// Scanner statistics
#[derive(Debug, Clone, Default)]
pub struct ScannerStatistics {
    /// Number of files turned into documents
    pub files_processed: usize,
    /// Number of files skipped as binary or unreadable
    pub binary_skipped: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Details for each document, in document order
    pub file_details: Vec<(String, FileReportInfo)>,
}

/// Walks the target directory and reads the files it finds
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Progress bar
    pub progress: ProgressBar,
    /// Scanner statistics
    statistics: RefCell<ScannerStatistics>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: ProgressBar) -> Self {
        Self {
            config,
            progress,
            statistics: RefCell::new(ScannerStatistics::default()),
        }
    }

    /// Get scanner statistics
    pub fn get_statistics(&self) -> ScannerStatistics {
        self.statistics.borrow().clone()
    }

    /// Absolute path of the target directory
    pub fn root(&self) -> io::Result<PathBuf> {
        fs::canonicalize(&self.config.target_dir)
    }

    /// Name shown on the first line of the structure view
    pub fn root_name(&self) -> io::Result<String> {
        let root = self.root()?;
        Ok(root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.to_string_lossy().to_string()))
    }

    /// Walk the target directory depth-first, siblings sorted by name.
    ///
    /// Fully excluded paths are dropped along with their subtree. Directories
    /// excluded contents-only are listed but not descended into. Directories
    /// that cannot be listed end up as empty leaves.
    pub fn walk(&self, matcher: &PathMatcher) -> io::Result<Vec<Entry>> {
        let root = self.root()?;
        let root_name = self.root_name()?;

        match matcher.classify(&root_name, true) {
            Exclusion::None => {}
            Exclusion::Full | Exclusion::ContentsOnly => {
                log::info!("Root directory '{}' matches an exclusion rule", root_name);
                return Ok(Vec::new());
            }
        }

        let output_file = self.output_path();
        let mut entries = Vec::new();
        let mut walker = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(result) = walker.next() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Skipping unreadable path: {}", err);
                    continue;
                }
            };

            if output_file.as_deref() == Some(entry.path()) {
                continue;
            }

            let rel_path = match entry.path().strip_prefix(&root) {
                Ok(p) => to_posix(p),
                Err(_) => continue,
            };
            let is_dir = entry.file_type().is_dir();

            let read_content = match matcher.classify(&rel_path, is_dir) {
                Exclusion::Full => {
                    if is_dir {
                        walker.skip_current_dir();
                    }
                    continue;
                }
                Exclusion::ContentsOnly => {
                    walker.skip_current_dir();
                    false
                }
                Exclusion::None => !is_dir,
            };

            entries.push(Entry {
                path: rel_path,
                is_dir,
                depth: entry.depth(),
                read_content,
            });
        }

        Ok(entries)
    }

    /// Read every readable entry and number the resulting documents from 1.
    /// Binary and unreadable files do not consume an index.
    pub fn collect_documents(&self, entries: &[Entry]) -> io::Result<Vec<Document>> {
        let root = self.root()?;
        let candidates: Vec<&Entry> = entries.iter().filter(|e| e.read_content).collect();
        self.progress.set_length(candidates.len() as u64);

        let mut documents = Vec::new();
        for entry in candidates {
            self.progress.inc(1);
            self.progress
                .set_message(format!("Current file: {}", entry.name()));

            match read_text(&root.join(&entry.path), self.config.max_file_size) {
                Some(content) => {
                    self.record(&entry.path, &content);
                    documents.push(Document {
                        index: documents.len() + 1,
                        source: entry.path.clone(),
                        document_content: content,
                    });
                }
                None => {
                    log::debug!("Skipping binary or unreadable file: {}", entry.path);
                    self.statistics.borrow_mut().binary_skipped += 1;
                }
            }
        }

        Ok(documents)
    }

    fn record(&self, path: &str, content: &str) {
        let info = FileReportInfo {
            lines: content.lines().count(),
            chars: content.chars().count(),
        };
        let mut stats = self.statistics.borrow_mut();
        stats.files_processed += 1;
        stats.total_lines += info.lines;
        stats.total_chars += info.chars;
        stats.file_details.push((path.to_string(), info));
    }

    /// Absolute location of the output file, so it never lists itself
    fn output_path(&self) -> Option<PathBuf> {
        let file = self.config.output_file.as_ref()?;
        let parent = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        Some(fs::canonicalize(parent).ok()?.join(file.file_name()?))
    }
}

fn to_posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Classify raw bytes: a NUL byte or more than 10% control characters in the
/// leading sample means binary, as does content that is not valid UTF-8.
pub fn detect_file_type(bytes: &[u8]) -> FileType {
    let sample = &bytes[..bytes.len().min(SAMPLE_SIZE)];

    if sample.contains(&0) {
        return FileType::BinaryFile;
    }

    // Count binary characters (0x00-0x08, 0x0E-0x1F)
    let binary_count = sample
        .iter()
        .filter(|&&b| (b < 9) || (b > 13 && b < 32))
        .count();
    if !sample.is_empty() && binary_count as f32 / sample.len() as f32 >= 0.1 {
        return FileType::BinaryFile;
    }

    if std::str::from_utf8(bytes).is_err() {
        return FileType::BinaryFile;
    }

    FileType::TextFile
}

/// Read a file as UTF-8 text. Every failure (open, read, size limit,
/// binary content) yields `None`.
pub fn read_text(path: &Path, max_size: Option<u64>) -> Option<String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("Cannot open {}: {}", path.display(), err);
            return None;
        }
    };

    if let Some(limit) = max_size {
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);
        if size > limit {
            log::debug!("{} exceeds the size limit ({} bytes)", path.display(), size);
            return None;
        }
    }

    let mut bytes = Vec::new();
    if let Err(err) = file.read_to_end(&mut bytes) {
        log::warn!("Cannot read {}: {}", path.display(), err);
        return None;
    }

    match detect_file_type(&bytes) {
        FileType::TextFile => String::from_utf8(bytes).ok(),
        FileType::BinaryFile => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_detect_text() {
        assert_eq!(detect_file_type(b"hello\nworld\n"), FileType::TextFile);
        assert_eq!(detect_file_type(b""), FileType::TextFile);
        assert_eq!(detect_file_type("héllo wörld".as_bytes()), FileType::TextFile);
        assert_eq!(detect_file_type(b"tabs\tand\r\nlines"), FileType::TextFile);
    }

    #[test]
    fn test_detect_binary() {
        assert_eq!(detect_file_type(&[0x89, b'P', b'N', b'G', 0, 0]), FileType::BinaryFile);
        assert_eq!(detect_file_type(b"mostly text\0"), FileType::BinaryFile);
        assert_eq!(detect_file_type(&[0xff, 0xfe, b'a', b'b']), FileType::BinaryFile);
        assert_eq!(detect_file_type(&[1, 2, 3, 4, b'a']), FileType::BinaryFile);
    }

    #[test]
    fn test_read_text_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "  leading\ntrailing  \n\n").unwrap();
        assert_eq!(
            read_text(&path, None).as_deref(),
            Some("  leading\ntrailing  \n\n")
        );
    }

    #[test]
    fn test_read_text_failures_are_none() {
        let dir = tempdir().unwrap();
        assert!(read_text(&dir.path().join("missing.txt"), None).is_none());
        assert!(read_text(dir.path(), None).is_none());

        let big = dir.path().join("big.txt");
        fs::write(&big, "x".repeat(100)).unwrap();
        assert!(read_text(&big, Some(10)).is_none());
        assert!(read_text(&big, Some(100)).is_some());
    }
}
