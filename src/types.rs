/*!
 * Core types and data structures for dirbundle
 */

use std::path::{Path, PathBuf};

/// Kind of filesystem entry the walker cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory containing other entries
    Directory,
    /// Anything read as a file (regular files and non-directory symlinks)
    File,
}

/// A filesystem node visited during the walk
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Absolute path
    pub path: PathBuf,
    /// Base name
    pub name: String,
    /// Directory or file
    pub kind: EntryKind,
    /// Platform hidden attribute, false where the platform has none
    pub hidden_attribute: bool,
}

impl DirectoryEntry {
    /// Create an entry, taking the base name from `path`
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, hidden_attribute: bool) -> Self {
        let path = path.into();
        let name = base_name(&path);
        Self {
            path,
            name,
            kind,
            hidden_attribute,
        }
    }
}

/// What happened to a file that made it into the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Full text content (lossily decoded)
    Content(String),
    /// Listed in the tree only
    Skipped,
    /// Read failed; human-readable reason
    Error(String),
}

/// One file result of a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    /// Path relative to the scan root's parent, `/`-separated
    pub relative_path: String,
    /// Content, skip marker or read error
    pub status: FileStatus,
}

impl BundleEntry {
    /// Whether this entry produces a Start/End block in the bundle
    pub fn has_block(&self) -> bool {
        !matches!(self.status, FileStatus::Skipped)
    }
}

/// Both artifacts of a single walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOutput {
    /// Indented tree rendering, one line per visible directory/file
    pub tree: String,
    /// File results in traversal order
    pub files: Vec<BundleEntry>,
    /// Number of directories rendered, root included
    pub directories: usize,
}

/// Aggregate numbers about a walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStatistics {
    /// Directories rendered
    pub directories: usize,
    /// Files rendered in the tree
    pub files_listed: usize,
    /// Files with content blocks
    pub files_with_content: usize,
    /// Files listed but not read
    pub files_skipped: usize,
    /// Files whose read failed
    pub read_errors: usize,
    /// Lines across all content blocks
    pub total_lines: usize,
    /// Characters across all content blocks
    pub total_chars: usize,
}

impl WalkOutput {
    /// Compute statistics over the collected results
    pub fn statistics(&self) -> WalkStatistics {
        let mut stats = WalkStatistics {
            directories: self.directories,
            files_listed: self.files.len(),
            ..Default::default()
        };

        for entry in &self.files {
            match &entry.status {
                FileStatus::Content(text) => {
                    stats.files_with_content += 1;
                    stats.total_lines += text.lines().count();
                    stats.total_chars += text.chars().count();
                }
                FileStatus::Skipped => stats.files_skipped += 1,
                FileStatus::Error(_) => stats.read_errors += 1,
            }
        }

        stats
    }
}

/// Base name of a path as a lossy string, empty for roots like `/`
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
