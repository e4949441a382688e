/*!
 * Utility functions for dirbundle
 */

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

/// strftime pattern for generated bundle names
pub const OUTPUT_NAME_FORMAT: &str = "state-%Y-%m-%d-%H-%M-%S.txt";

/// Bundle file name for the given moment
pub fn timestamped_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(OUTPUT_NAME_FORMAT).to_string()
}

/// Bundle path inside `dir`, named after the current local time
pub fn timestamped_output_path(dir: &Path) -> PathBuf {
    dir.join(timestamped_file_name(&Local::now()))
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Format a count with K/M suffixes
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}
