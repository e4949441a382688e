/*!
 * Reporting functionality for dirbundle
 *
 * Renders a console summary of a run with the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{FileStatus, WalkOutput, WalkStatistics};
use crate::utils::{format_file_size, format_number};

/// Files shown in full below this count, otherwise only the largest ones
const FULL_LISTING_LIMIT: usize = 15;
const TOP_FILES: usize = 10;

/// Per-file line and character counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Relative path of the file
    pub path: String,
    /// Number of lines in the content block
    pub lines: usize,
    /// Number of characters in the content block
    pub chars: usize,
}

/// Summary of one bundling run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Size of the written bundle in bytes
    pub output_size: u64,
    /// Time taken to walk and write
    pub duration: Duration,
    /// Aggregate walk statistics
    pub statistics: WalkStatistics,
    /// Files that produced a content block
    pub file_details: Vec<FileReportInfo>,
}

impl ScanReport {
    /// Build a report from the walk results
    pub fn new(
        output: &WalkOutput,
        output_file: impl Into<String>,
        output_size: u64,
        duration: Duration,
    ) -> Self {
        let file_details = output
            .files
            .iter()
            .filter_map(|entry| match &entry.status {
                FileStatus::Content(text) => Some(FileReportInfo {
                    path: entry.relative_path.clone(),
                    lines: text.lines().count(),
                    chars: text.chars().count(),
                }),
                _ => None,
            })
            .collect();

        Self {
            output_file: output_file.into(),
            output_size,
            duration,
            statistics: output.statistics(),
            file_details,
        }
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the tail of long paths, it carries the file name
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut segments = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.split('/').rev() {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            let tail: String = path.chars().rev().take(max_len.saturating_sub(3)).collect();
            return format!("...{}", tail.chars().rev().collect::<String>());
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.statistics;
        let row = |key: &str, value: String| SummaryRow {
            key: key.to_string(),
            value,
        };

        let rows = vec![
            row("📂 Output File", report.output_file.clone()),
            row("💾 Output Size", format_file_size(report.output_size)),
            row("⏱️ Process Time", format!("{:.4?}", report.duration)),
            row("🗂️ Directories", format_number(stats.directories)),
            row("📄 Files Listed", format_number(stats.files_listed)),
            row("📑 Content Blocks", format_number(stats.files_with_content)),
            row("🙈 Content Skipped", format_number(stats.files_skipped)),
            row("⚠️ Read Errors", format_number(stats.read_errors)),
            row("📝 Total Lines", format_number(stats.total_lines)),
            row(
                "📦 LLM Tokens",
                format!("{} tokens (estimated)", format_number(stats.total_chars / 4)),
            ),
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|a, b| b.chars.cmp(&a.chars));

        if files.len() > FULL_LISTING_LIMIT {
            files.truncate(TOP_FILES);
        }

        let rows: Vec<FileRow> = files
            .iter()
            .map(|info| FileRow {
                path: self.format_path(&info.path, 60),
                lines: format_number(info.lines),
                tokens: format_number(info.chars / 4),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        let summary_title = "✅  BUNDLE COMPLETE";
        let files_title = if report.file_details.len() > FULL_LISTING_LIMIT {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  BUNDLED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BundleEntry;

    fn entry(path: &str, status: FileStatus) -> BundleEntry {
        BundleEntry {
            relative_path: path.to_string(),
            status,
        }
    }

    #[test]
    fn test_report_counts_content_only() {
        let output = WalkOutput {
            tree: String::new(),
            files: vec![
                entry("p/a.rs", FileStatus::Content("fn a() {}\nfn b() {}\n".to_string())),
                entry("p/logo.png", FileStatus::Skipped),
                entry("p/locked", FileStatus::Error("denied".to_string())),
            ],
            directories: 1,
        };

        let report = ScanReport::new(&output, "ai/out.txt", 100, Duration::from_millis(5));
        assert_eq!(report.file_details.len(), 1);
        assert_eq!(report.file_details[0].lines, 2);
        assert_eq!(report.statistics.files_listed, 3);
        assert_eq!(report.statistics.files_skipped, 1);
        assert_eq!(report.statistics.read_errors, 1);

        let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&report);
        assert!(text.contains("p/a.rs"));
        assert!(!text.contains("p/logo.png"));
        assert!(text.contains("ai/out.txt"));
        assert!(text.contains("BUNDLE COMPLETE"));
    }

    #[test]
    fn test_format_path_truncates_from_the_left() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        assert_eq!(reporter.format_path("a/b.rs", 60), "a/b.rs");

        let long = "project/some/deeply/nested/module/path/file.rs";
        let formatted = reporter.format_path(long, 20);
        assert!(formatted.starts_with("..."));
        assert!(formatted.ends_with("/file.rs"));
        assert!(formatted.chars().count() <= 20);
    }
}
