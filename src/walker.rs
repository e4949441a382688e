/*!
 * Single-pass directory walk producing the tree and the file results
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Result;
use crate::rules::VisibilityRules;
use crate::types::{base_name, BundleEntry, DirectoryEntry, EntryKind, FileStatus, WalkOutput};

/// Spaces per depth level in the tree rendering
pub const INDENT_WIDTH: usize = 4;

/// Suffix marking a directory line in the tree
pub const DIR_MARKER: char = '/';

/// Name rendered for a root without a base name, such as `/`
pub const ROOT_FALLBACK: &str = ".";

/// Accumulates both artifacts while the walk descends
#[derive(Debug, Default)]
struct Accumulator {
    tree: String,
    files: Vec<BundleEntry>,
    directories: usize,
}

impl Accumulator {
    fn push_line(&mut self, depth: usize, name: &str, is_dir: bool) {
        self.tree.push_str(&" ".repeat(INDENT_WIDTH * depth));
        self.tree.push_str(name);
        if is_dir {
            self.tree.push(DIR_MARKER);
        }
        self.tree.push('\n');
    }

    fn finish(self) -> WalkOutput {
        WalkOutput {
            tree: self.tree,
            files: self.files,
            directories: self.directories,
        }
    }
}

/// Retained children of one directory, sorted by name
#[derive(Debug, Default)]
struct Children {
    dirs: Vec<DirectoryEntry>,
    files: Vec<DirectoryEntry>,
}

/// Walks a directory tree under a fixed set of visibility rules
pub struct Walker {
    /// Rules applied to every entry
    rules: VisibilityRules,
    /// Resolved absolute paths never included (e.g. the bundle being written)
    excluded: Vec<PathBuf>,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Walker {
    /// Create a new walker
    pub fn new(rules: VisibilityRules, progress: Arc<ProgressBar>) -> Self {
        Self {
            rules,
            excluded: Vec::new(),
            progress,
        }
    }

    /// Walker for a configured run: rules for its root, its output file excluded
    pub fn for_config(config: &Config, progress: Arc<ProgressBar>) -> Self {
        let rules = VisibilityRules::for_root(&config.rules, &config.target_dir);
        Self::new(rules, progress).exclude_path(&config.output_file)
    }

    /// Rules used by this walker
    pub fn rules(&self) -> &VisibilityRules {
        &self.rules
    }

    /// Exclude a path from both the tree and the content dump
    ///
    /// The path does not need to exist yet; it is resolved against its
    /// parent directory so that the output file of the current run can be
    /// registered before it is created.
    pub fn exclude_path(mut self, path: impl AsRef<Path>) -> Self {
        self.excluded.push(resolve_path(path.as_ref()));
        self
    }

    /// Walk `root` and return the tree rendering and the file results
    ///
    /// Fails only if `root` is missing or not a directory, before anything
    /// is produced. Unreadable files become [`FileStatus::Error`] entries.
    pub fn walk(&self, root: &Path) -> Result<WalkOutput> {
        crate::ensure!(root.exists(), RootNotFound, "{}", root.display());
        crate::ensure!(root.is_dir(), NotADirectory, "{}", root.display());

        let abs_root = fs::canonicalize(root)?;
        let root_name = match base_name(&abs_root) {
            name if name.is_empty() => ROOT_FALLBACK.to_string(),
            name => name,
        };
        info!("Walking {}", abs_root.display());

        let mut acc = Accumulator::default();
        self.walk_directory(&abs_root, &root_name, &root_name, 0, &mut acc);

        let output = acc.finish();
        info!(
            "Walk finished: {} directories, {} files",
            output.directories,
            output.files.len()
        );
        Ok(output)
    }

    /// Render one directory, then its files, then recurse into subdirectories
    fn walk_directory(
        &self,
        abs_path: &Path,
        name: &str,
        rel_path: &str,
        depth: usize,
        acc: &mut Accumulator,
    ) {
        acc.directories += 1;
        acc.push_line(depth, name, true);

        let children = self.list_children(abs_path);

        for file in &children.files {
            acc.push_line(depth + 1, &file.name, false);
            let rel = format!("{}/{}", rel_path, file.name);
            let status = self.process_file(file);
            acc.files.push(BundleEntry {
                relative_path: rel,
                status,
            });
        }

        for dir in &children.dirs {
            let rel = format!("{}/{}", rel_path, dir.name);
            self.walk_directory(&dir.path, &dir.name, &rel, depth + 1, acc);
        }
    }

    /// List and filter the immediate children of `dir`
    fn list_children(&self, dir: &Path) -> Children {
        let mut children = Children::default();

        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Could not list entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if self.is_excluded(path) {
                debug!("Excluding output path {}", path.display());
                continue;
            }

            let file_type = entry.file_type();
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_symlink() && path.is_dir() {
                debug!("Not following directory symlink {}", path.display());
                continue;
            } else {
                EntryKind::File
            };

            let child = self.rules.entry(path, kind);
            match kind {
                EntryKind::Directory if self.rules.keeps_directory(&child) => {
                    children.dirs.push(child)
                }
                EntryKind::File if self.rules.keeps_file(&child) => children.files.push(child),
                _ => {}
            }
        }

        children
    }

    /// Decide content inclusion for a listed file and read it if needed
    fn process_file(&self, file: &DirectoryEntry) -> FileStatus {
        self.progress.inc(1);

        // Keep the message short to avoid wrapping the bar
        let display_name = if file.name.chars().count() > 40 {
            let tail: String = file.name.chars().rev().take(37).collect();
            format!("...{}", tail.chars().rev().collect::<String>())
        } else {
            file.name.clone()
        };
        self.progress
            .set_message(format!("Current file: {}", display_name));

        if self.rules.is_content_skipped(&file.name) {
            debug!("Listing without content: {}", file.path.display());
            return FileStatus::Skipped;
        }

        match fs::read(&file.path) {
            Ok(bytes) => FileStatus::Content(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                warn!("Could not read {}: {}", file.path.display(), e);
                FileStatus::Error(e.to_string())
            }
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded.iter().any(|p| p == path)
    }
}

/// Resolve `path` to an absolute path without requiring it to exist
///
/// Existing paths are canonicalized. Otherwise the parent is canonicalized
/// and the file name appended, falling back to joining with the current
/// directory.
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    if let (Some(parent), Some(name)) = (absolute.parent(), absolute.file_name()) {
        if let Ok(parent) = fs::canonicalize(parent) {
            return parent.join(name);
        }
    }
    absolute
}
