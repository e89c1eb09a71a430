/*!
 * Reporting functionality for folder-to-llm
 *
 * Prints a short summary after the output has been written to a file,
 * using the tabled library for table rendering.
 */

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::scanner::ScannerStatistics;

/// Number of largest files listed in the report
const TOP_FILES: usize = 10;

/// Information about a file in the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Format the output was rendered in
    pub format: String,
    /// Statistics gathered while reading files
    pub statistics: ScannerStatistics,
}

/// Report generator for scan results
pub struct Reporter;

impl Reporter {
    /// Rough token estimate used for prompt sizing
    pub fn estimate_tokens(chars: usize) -> usize {
        chars / 4
    }

    /// Format a number with human-readable units
    fn format_number(num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate the report text
    pub fn generate_report(report: &ScanReport) -> String {
        let files_title = if report.statistics.file_details.len() > TOP_FILES {
            "LARGEST FILES BY CHARACTER COUNT"
        } else {
            "PROCESSED FILES"
        };

        format!(
            "{}\n{}\n\nSUMMARY\n{}",
            files_title,
            Self::create_files_table(report),
            Self::create_summary_table(report)
        )
    }

    fn create_summary_table(report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.statistics;
        let rows = vec![
            SummaryRow {
                key: "Output File",
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "Format",
                value: report.format.clone(),
            },
            SummaryRow {
                key: "Documents",
                value: Self::format_number(stats.files_processed),
            },
            SummaryRow {
                key: "Binary Files Skipped",
                value: Self::format_number(stats.binary_skipped),
            },
            SummaryRow {
                key: "Total Lines",
                value: Self::format_number(stats.total_lines),
            },
            SummaryRow {
                key: "LLM Tokens",
                value: format!(
                    "{} (estimated)",
                    Self::format_number(Self::estimate_tokens(stats.total_chars))
                ),
            },
        ];

        Self::style(Table::new(rows))
    }

    fn create_files_table(report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let mut files: Vec<_> = report.statistics.file_details.iter().collect();
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));
        files.truncate(TOP_FILES);

        let rows: Vec<FileRow> = files
            .into_iter()
            .map(|(path, info)| FileRow {
                path: path.clone(),
                lines: Self::format_number(info.lines),
                tokens: Self::format_number(Self::estimate_tokens(info.chars)),
            })
            .collect();

        Self::style(Table::new(rows))
    }

    fn style(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }
}
