/*!
 * Text bundle writer for dirbundle
 */

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::types::{BundleEntry, FileStatus, WalkOutput};

/// Greeting written before the tree when none is configured
pub const DEFAULT_PROMPT: &str = "Hello dear AI, please upgrade the application I have described in below files and enhance it for\n........................";

/// Marker framing the Start/End lines of a block
pub const BLOCK_MARKER: &str = "---";

/// Writer for the final text bundle
pub struct BundleWriter {
    /// Banner text preceding the tree
    prompt: String,
}

impl Default for BundleWriter {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}

impl BundleWriter {
    /// Create a new bundle writer with the given banner
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Write the bundle to `path`, creating parent directories as needed
    pub fn write_file(&self, output: &WalkOutput, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(output, &mut writer)?;
        writer.flush()
    }

    /// Write the bundle to any writer
    pub fn write_to<W: Write>(&self, output: &WalkOutput, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", self.prompt.trim_end_matches('\n'))?;
        writeln!(writer)?;
        writer.write_all(output.tree.as_bytes())?;

        for entry in &output.files {
            self.write_entry(entry, writer)?;
        }

        Ok(())
    }

    /// Render the bundle into a string
    pub fn render(&self, output: &WalkOutput) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(output, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Write a Start/End block, nothing for skipped entries
    fn write_entry<W: Write>(&self, entry: &BundleEntry, writer: &mut W) -> io::Result<()> {
        let path = &entry.relative_path;
        let body = match &entry.status {
            FileStatus::Content(text) => text.clone(),
            FileStatus::Error(reason) => format!("Could not read {}: {}", path, reason),
            FileStatus::Skipped => return Ok(()),
        };

        write!(
            writer,
            "\n\n{m} Start of {p} {m}\n\n{body}\n\n{m} End of {p} {m}\n\n",
            m = BLOCK_MARKER,
            p = path,
            body = body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_output() -> WalkOutput {
        WalkOutput {
            tree: "proj/\n    a.txt\n    logo.png\n    secret.txt\n".to_string(),
            files: vec![
                BundleEntry {
                    relative_path: "proj/a.txt".to_string(),
                    status: FileStatus::Content("alpha".to_string()),
                },
                BundleEntry {
                    relative_path: "proj/logo.png".to_string(),
                    status: FileStatus::Skipped,
                },
                BundleEntry {
                    relative_path: "proj/secret.txt".to_string(),
                    status: FileStatus::Error("Permission denied (os error 13)".to_string()),
                },
            ],
            directories: 1,
        }
    }

    #[test]
    fn test_render_layout() {
        let rendered = BundleWriter::new("Review this").render(&sample_output());

        let expected = "Review this\n\nproj/\n    a.txt\n    logo.png\n    secret.txt\n\
            \n\n--- Start of proj/a.txt ---\n\nalpha\n\n--- End of proj/a.txt ---\n\n\
            \n\n--- Start of proj/secret.txt ---\n\n\
            Could not read proj/secret.txt: Permission denied (os error 13)\
            \n\n--- End of proj/secret.txt ---\n\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_skipped_entries_have_no_block() {
        let rendered = BundleWriter::default().render(&sample_output());

        assert!(rendered.starts_with(DEFAULT_PROMPT));
        assert!(rendered.contains("    logo.png\n"));
        assert!(!rendered.contains("Start of proj/logo.png"));
        assert_eq!(rendered.matches(" Start of ").count(), 2);
        assert_eq!(rendered.matches(" End of ").count(), 2);
    }
}
