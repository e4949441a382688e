//! Visibility rules for directory entries
//!
//! A [`VisibilityRules`] value is built once per run from a [`RuleConfig`]
//! plus the patterns loaded from the root's ignore file, and is never
//! mutated afterwards. The walker asks it three questions per entry:
//!
//! 1. [`is_hidden_and_excluded`](VisibilityRules::is_hidden_and_excluded),
//!    checked first; a hidden name on the allow-list is kept without
//!    consulting any pattern rule;
//! 2. [`is_directory_pruned`](VisibilityRules::is_directory_pruned) or
//!    [`is_file_excluded_from_tree`](VisibilityRules::is_file_excluded_from_tree);
//! 3. for listed files only, [`is_content_skipped`](VisibilityRules::is_content_skipped).

mod hidden;
mod patterns;

pub use hidden::{platform_default, AlwaysVisible, HiddenAttribute};
pub use patterns::{load_external_patterns, matches_any, parse_patterns, DEFAULT_IGNORE_FILE};

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{DirectoryEntry, EntryKind};

/// Leading character marking a hidden name
pub const HIDDEN_MARKER: char = '.';

/// Hidden names kept by default
pub static DEFAULT_ALLOWED_HIDDEN: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".github",
        ".gitignore",
        ".gitattributes",
        ".dockerignore",
        ".editorconfig",
    ]
});

/// Directory name patterns pruned by default
pub static DEFAULT_IGNORE_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Dependencies
        "node_modules",
        "bower_components",
        "vendor",
        // Build output
        "target",
        "dist",
        "build",
        "out",
        "bin",
        "obj",
        // Python
        "__pycache__",
        "venv",
        "env",
        "*.egg-info",
        // Tooling
        "coverage",
        "Pods",
        "DerivedData",
    ]
});

/// Extensions listed but never read by default
pub static DEFAULT_SKIP_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Images
        ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".webp", ".tiff", ".psd", ".svg",
        // Audio & video
        ".mp3", ".wav", ".ogg", ".flac", ".mp4", ".mov", ".avi", ".mkv", ".webm",
        // Archives
        ".zip", ".tar", ".gz", ".tgz", ".bz2", ".xz", ".7z", ".rar",
        // Compiled artifacts
        ".exe", ".dll", ".so", ".dylib", ".a", ".o", ".class", ".jar", ".pyc", ".pyo",
        ".wasm", ".bin",
        // Documents
        ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
        // Fonts
        ".ttf", ".otf", ".woff", ".woff2", ".eot",
        // Databases
        ".db", ".sqlite", ".sqlite3",
    ]
});

/// Base names (without extension) listed but never read by default
pub static DEFAULT_SKIP_BASE_NAMES: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["license", "licence", "copying", "notice", "package-lock"]);

/// Lowercase base-name patterns listed but never read by default
pub static DEFAULT_SKIP_PATTERNS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "*.lock",
        "*-lock.json",
        "*-lock.yaml",
        "*.min.js",
        "*.min.css",
        "*.map",
    ]
});

/// User-facing rule configuration with documented defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Exact hidden names (directories or files) that stay visible
    pub allowed_hidden: Vec<String>,
    /// Case-sensitive glob patterns on directory base names; a match prunes the subtree
    pub ignore_dir_names: Vec<String>,
    /// Extensions, with leading dot, whose files are listed but not read
    pub skip_content_extensions: Vec<String>,
    /// Base names without extension whose files (and `name.*`) are listed but not read
    pub skip_content_base_names: Vec<String>,
    /// Glob patterns on the lowercase base name; a match skips content
    pub skip_content_patterns: Vec<String>,
    /// Ignore file read from the scan root, `None` to disable
    pub ignore_file: Option<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            allowed_hidden: owned(&DEFAULT_ALLOWED_HIDDEN),
            ignore_dir_names: owned(&DEFAULT_IGNORE_DIRS),
            skip_content_extensions: owned(&DEFAULT_SKIP_EXTENSIONS),
            skip_content_base_names: owned(&DEFAULT_SKIP_BASE_NAMES),
            skip_content_patterns: owned(&DEFAULT_SKIP_PATTERNS),
            ignore_file: Some(DEFAULT_IGNORE_FILE.to_string()),
        }
    }
}

impl RuleConfig {
    /// Configuration with every list empty and no ignore file
    pub fn empty() -> Self {
        Self {
            allowed_hidden: Vec::new(),
            ignore_dir_names: Vec::new(),
            skip_content_extensions: Vec::new(),
            skip_content_base_names: Vec::new(),
            skip_content_patterns: Vec::new(),
            ignore_file: None,
        }
    }

    /// Load a JSON rule file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Immutable per-run visibility rules
#[derive(Debug, Clone)]
pub struct VisibilityRules {
    allowed_hidden: HashSet<String>,
    ignore_dir_names: Vec<String>,
    skip_content_extensions: HashSet<String>,
    skip_content_base_names: HashSet<String>,
    skip_content_patterns: Vec<String>,
    external_patterns: Vec<String>,
    hidden_check: Arc<dyn HiddenAttribute>,
}

impl VisibilityRules {
    /// Build rules from a configuration and already loaded external patterns
    pub fn new(config: &RuleConfig, external_patterns: Vec<String>) -> Self {
        let skip_content_extensions = config
            .skip_content_extensions
            .iter()
            .map(|ext| {
                let ext = ext.to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{}", ext)
                }
            })
            .collect();

        Self {
            allowed_hidden: config.allowed_hidden.iter().cloned().collect(),
            ignore_dir_names: config.ignore_dir_names.clone(),
            skip_content_extensions,
            skip_content_base_names: config
                .skip_content_base_names
                .iter()
                .map(|n| n.to_lowercase())
                .collect(),
            skip_content_patterns: config
                .skip_content_patterns
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
            external_patterns,
            hidden_check: platform_default(),
        }
    }

    /// Build rules for `root`, loading its ignore file if one is configured
    pub fn for_root(config: &RuleConfig, root: &Path) -> Self {
        let external = match &config.ignore_file {
            Some(name) => load_external_patterns(root, name),
            None => Vec::new(),
        };
        Self::new(config, external)
    }

    /// Replace the platform hidden-attribute check
    pub fn with_hidden_attribute(mut self, check: Arc<dyn HiddenAttribute>) -> Self {
        self.hidden_check = check;
        self
    }

    /// Patterns loaded from the external ignore file
    pub fn external_patterns(&self) -> &[String] {
        &self.external_patterns
    }

    /// Describe `path` as a walk entry, querying the hidden attribute
    pub fn entry(&self, path: &Path, kind: EntryKind) -> DirectoryEntry {
        DirectoryEntry::new(path, kind, self.hidden_check.is_hidden(path))
    }

    /// Hidden entries are excluded unless their exact name is allow-listed
    pub fn is_hidden_and_excluded(&self, entry: &DirectoryEntry) -> bool {
        if self.allowed_hidden.contains(&entry.name) {
            return false;
        }
        is_hidden(entry)
    }

    /// Hidden entry kept through the allow-list; pattern rules do not apply to it
    pub fn is_allowed_hidden(&self, entry: &DirectoryEntry) -> bool {
        is_hidden(entry) && self.allowed_hidden.contains(&entry.name)
    }

    /// Directory name matches a built-in or external ignore pattern
    pub fn is_directory_pruned(&self, name: &str) -> bool {
        matches_any(&self.ignore_dir_names, name) || matches_any(&self.external_patterns, name)
    }

    /// File name matches an external ignore pattern
    pub fn is_file_excluded_from_tree(&self, name: &str) -> bool {
        matches_any(&self.external_patterns, name)
    }

    /// Listed file whose content must not be read
    pub fn is_content_skipped(&self, base_name: &str) -> bool {
        let lower = base_name.to_lowercase();
        let path = Path::new(&lower);

        if let Some(ext) = path.extension() {
            let ext = format!(".{}", ext.to_string_lossy());
            if self.skip_content_extensions.contains(&ext) {
                return true;
            }
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.skip_content_base_names.contains(&stem)
            || self
                .skip_content_base_names
                .iter()
                .any(|name| lower.starts_with(&format!("{}.", name)))
        {
            return true;
        }

        matches_any(&self.skip_content_patterns, &lower)
    }

    /// Whether a directory entry is walked into
    pub fn keeps_directory(&self, entry: &DirectoryEntry) -> bool {
        if self.is_allowed_hidden(entry) {
            return true;
        }
        if self.is_hidden_and_excluded(entry) {
            debug!("Skipping hidden directory {}", entry.path.display());
            return false;
        }
        if self.is_directory_pruned(&entry.name) {
            debug!("Pruning directory {}", entry.path.display());
            return false;
        }
        true
    }

    /// Whether a file entry appears in the tree
    pub fn keeps_file(&self, entry: &DirectoryEntry) -> bool {
        if self.is_allowed_hidden(entry) {
            return true;
        }
        if self.is_hidden_and_excluded(entry) {
            debug!("Skipping hidden file {}", entry.path.display());
            return false;
        }
        if self.is_file_excluded_from_tree(&entry.name) {
            debug!("Excluding file {}", entry.path.display());
            return false;
        }
        true
    }
}

fn is_hidden(entry: &DirectoryEntry) -> bool {
    entry.name.starts_with(HIDDEN_MARKER) || entry.hidden_attribute
}

impl Default for VisibilityRules {
    fn default() -> Self {
        Self::new(&RuleConfig::default(), Vec::new())
    }
}
