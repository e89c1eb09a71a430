/*!
 * Exclusion pattern matching
 *
 * Patterns are shell globs checked against both the final path segment and
 * the full relative path. A trailing separator turns a pattern into a
 * contents-only rule: the directory stays visible but nothing below it is
 * walked or read.
 */

use glob_match::glob_match;

/// How a path is affected by the configured exclusion rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Not excluded
    None,
    /// Directory is listed but its descendants are hidden
    ContentsOnly,
    /// Path and everything below it is hidden
    Full,
}

/// A single exclusion pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    /// Glob pattern with any trailing separator stripped
    pub pattern: String,
    /// Set when the raw pattern ended in a path separator
    pub contents_only: bool,
}

impl ExclusionRule {
    /// Parse a raw pattern as given on the command line. Returns `None` for
    /// patterns that are empty once trimmed.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let contents_only = raw.ends_with('/') || raw.ends_with('\\');
        let pattern = raw.trim_end_matches(['/', '\\']);

        if pattern.is_empty() {
            return None;
        }

        Some(Self {
            pattern: pattern.to_string(),
            contents_only,
        })
    }

    /// Check the rule against a relative posix path
    pub fn matches(&self, rel_path: &str) -> bool {
        let name = rel_path.rsplit('/').next().unwrap_or(rel_path);
        glob_match(&self.pattern, name) || glob_match(&self.pattern, rel_path)
    }
}

/// Decides which paths are hidden from the structure view and the documents
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    rules: Vec<ExclusionRule>,
}

impl PathMatcher {
    /// Build a matcher from raw patterns
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self::with_rules(
            patterns
                .iter()
                .filter_map(|p| ExclusionRule::parse(p.as_ref()))
                .collect(),
        )
    }

    pub fn with_rules(rules: Vec<ExclusionRule>) -> Self {
        Self { rules }
    }

    /// Append one more raw pattern
    pub fn push(&mut self, raw: &str) {
        if let Some(rule) = ExclusionRule::parse(raw) {
            self.rules.push(rule);
        }
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify a relative path. Full rules take precedence over
    /// contents-only ones, and contents-only rules never apply to files.
    pub fn classify(&self, rel_path: &str, is_dir: bool) -> Exclusion {
        let mut result = Exclusion::None;

        for rule in &self.rules {
            if !rule.matches(rel_path) {
                continue;
            }
            if !rule.contents_only {
                return Exclusion::Full;
            }
            if is_dir {
                result = Exclusion::ContentsOnly;
            }
        }

        result
    }

    /// Whether the path is hidden entirely
    pub fn is_excluded(&self, rel_path: &str, is_dir: bool) -> bool {
        self.classify(rel_path, is_dir) == Exclusion::Full
    }

    /// Whether only the directory's contents are hidden
    pub fn is_contents_excluded(&self, rel_path: &str, is_dir: bool) -> bool {
        self.classify(rel_path, is_dir) == Exclusion::ContentsOnly
    }
}
