/*!
 * Configuration handling for folder-to-llm
 */

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::Result;
use crate::tree::TreeStyle;
use crate::{bail, ensure};

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    /// Tagged document list (`<documents><document index="1">...`)
    Xml,
    /// Single JSON object with `folder_structure` and `documents`
    Json,
    /// Delimited plain text: path, `---`, content, `---`
    Markdown,
}

/// Target LLM preset, controlling the default format and which formats are allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum LlmPreset {
    #[default]
    Claude,
    Gemini,
    Openai,
}

impl LlmPreset {
    /// Format used when `--format` is not given
    pub fn default_format(self) -> Format {
        match self {
            Self::Claude => Format::Xml,
            Self::Gemini | Self::Openai => Format::Markdown,
        }
    }

    /// Whether the preset accepts the given format
    pub fn permits(self, format: Format) -> bool {
        match self {
            Self::Claude => true,
            Self::Gemini | Self::Openai => format != Format::Xml,
        }
    }

    /// Formats accepted by the preset, for error messages
    pub fn permitted_formats(self) -> Vec<Format> {
        Format::iter().filter(|f| self.permits(*f)).collect()
    }
}

/// Command-line arguments for folder-to-llm
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "folder-to-llm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Convert folder structure to LLM prompt format",
    long_about = "Walks a folder and renders its structure and text file contents as a single document for Large Language Model prompts.\n\nAdd a trailing '/' to an exclude pattern to keep a directory in the structure but drop its contents."
)]
pub struct Args {
    /// Path to the folder to process
    #[clap(required_unless_present = "generate")]
    pub folder_path: Option<String>,

    /// Output format (defaults to the preset's format)
    #[clap(short, long, value_enum)]
    pub format: Option<Format>,

    /// Target LLM preset
    #[clap(short, long, value_enum, default_value_t = LlmPreset::default())]
    pub llm: LlmPreset,

    /// Glob patterns to exclude (add '/' suffix to keep a directory but drop its contents)
    #[clap(short, long, num_args = 1..)]
    pub exclude: Vec<String>,

    /// Skip outputting the folder structure
    #[clap(short, long)]
    pub skip_structure: bool,

    /// Skip the confirmation step
    #[clap(short = 'y', long)]
    pub no_confirm: bool,

    /// Output file (default: print to stdout)
    #[clap(short, long)]
    pub output: Option<String>,

    /// Style of the folder structure view
    #[clap(long, value_enum, default_value_t = TreeStyle::default())]
    pub tree_style: TreeStyle,

    /// Treat files larger than this many bytes as unreadable
    #[clap(long, value_name = "BYTES")]
    pub max_size: Option<u64>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory to process
    pub target_dir: PathBuf,

    /// Output format
    pub format: Format,

    /// Target LLM preset
    pub llm: LlmPreset,

    /// Raw exclusion patterns
    pub exclude_patterns: Vec<String>,

    /// Whether to include the structure view in the output
    pub include_structure: bool,

    /// Whether to ask before processing
    pub confirm: bool,

    /// Output file, stdout when absent
    pub output_file: Option<PathBuf>,

    /// Style of the structure view
    pub tree_style: TreeStyle,

    /// Size limit above which files are treated as unreadable
    pub max_file_size: Option<u64>,

    /// Whether `format` was given explicitly rather than taken from the preset
    explicit_format: bool,
}

impl Config {
    /// Create a configuration for `target_dir` with every option at its default
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        let llm = LlmPreset::default();
        Self {
            target_dir: target_dir.into(),
            format: llm.default_format(),
            llm,
            exclude_patterns: Vec::new(),
            include_structure: true,
            confirm: true,
            output_file: None,
            tree_style: TreeStyle::default(),
            max_file_size: None,
            explicit_format: false,
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let format = args.format.unwrap_or_else(|| args.llm.default_format());
        Self {
            target_dir: PathBuf::from(args.folder_path.unwrap_or_else(|| ".".to_string())),
            format,
            llm: args.llm,
            exclude_patterns: args.exclude,
            include_structure: !args.skip_structure,
            confirm: !args.no_confirm,
            output_file: args.output.map(PathBuf::from),
            tree_style: args.tree_style,
            max_file_size: args.max_size,
            explicit_format: args.format.is_some(),
        }
    }

    /// Select a format explicitly, as `--format` does
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self.explicit_format = true;
        self
    }

    /// Select a preset; the format follows the preset unless chosen explicitly
    pub fn with_llm(mut self, llm: LlmPreset) -> Self {
        self.llm = llm;
        if !self.explicit_format {
            self.format = llm.default_format();
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            PathNotFound,
            "'{}' is not a valid directory",
            self.target_dir.display()
        );

        if !self.llm.permits(self.format) {
            let permitted: Vec<String> = self
                .llm
                .permitted_formats()
                .iter()
                .map(ToString::to_string)
                .collect();
            bail!(
                InvalidArgument,
                "format '{}' is not supported with the '{}' preset (supported: {})",
                self.format,
                self.llm,
                permitted.join(", ")
            );
        }

        // Check if output file directory exists
        if let Some(parent) = self.output_file.as_ref().and_then(|p| p.parent()) {
            ensure!(
                parent.as_os_str().is_empty() || parent.is_dir(),
                Config,
                "output directory not found: {}",
                parent.display()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolderToLlmError;
    use tempfile::tempdir;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(parse(&["folder-to-llm", "."]));
        assert_eq!(config.llm, LlmPreset::Claude);
        assert_eq!(config.format, Format::Xml);
        assert!(config.include_structure);
        assert!(config.confirm);
        assert!(config.output_file.is_none());
        assert_eq!(config.tree_style, TreeStyle::Connectors);
    }

    #[test]
    fn test_short_flags() {
        let config = Config::from_args(parse(&[
            "folder-to-llm",
            "src",
            "-f",
            "json",
            "-s",
            "-y",
            "-o",
            "out.json",
            "-e",
            "target/",
            "*.lock",
        ]));
        assert_eq!(config.target_dir, PathBuf::from("src"));
        assert_eq!(config.format, Format::Json);
        assert!(!config.include_structure);
        assert!(!config.confirm);
        assert_eq!(config.output_file, Some(PathBuf::from("out.json")));
        assert_eq!(config.exclude_patterns, vec!["target/", "*.lock"]);
    }

    #[test]
    fn test_preset_selects_default_format() {
        let config = Config::from_args(parse(&["folder-to-llm", ".", "-l", "openai"]));
        assert_eq!(config.format, Format::Markdown);

        let config = Config::new(".").with_llm(LlmPreset::Gemini);
        assert_eq!(config.format, Format::Markdown);

        let config = Config::new(".")
            .with_format(Format::Json)
            .with_llm(LlmPreset::Gemini);
        assert_eq!(config.format, Format::Json);
    }

    #[test]
    fn test_xml_rejected_for_non_claude_presets() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path())
            .with_format(Format::Xml)
            .with_llm(LlmPreset::Openai);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, FolderToLlmError::InvalidArgument(_)));
        assert!(err.to_string().contains("markdown"));
        assert!(err.to_string().contains("'openai'"));
    }

    #[test]
    fn test_missing_directory_fails_validation() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().join("nope"));
        assert!(matches!(
            config.validate(),
            Err(FolderToLlmError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_missing_output_directory_fails_validation() {
        let dir = tempdir().unwrap();
        let mut config = Config::new(dir.path());
        config.output_file = Some(dir.path().join("missing").join("out.xml"));
        assert!(matches!(config.validate(), Err(FolderToLlmError::Config(_))));

        config.output_file = Some(PathBuf::from("out.xml"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_folder_path_required_without_generate() {
        assert!(Args::try_parse_from(["folder-to-llm"]).is_err());
        assert!(Args::try_parse_from(["folder-to-llm", "--generate", "bash"]).is_ok());
    }
}
