/*!
 * dirbundle - Bundle a filtered directory tree and its file contents
 *
 * This library walks a directory once under a fixed set of visibility rules
 * and produces an indented tree rendering together with the text content of
 * every visible file, ready to be written as a single review bundle.
 */

pub mod config;
pub mod error;
pub mod report;
pub mod rules;
pub mod types;
pub mod utils;
pub mod walker;
pub mod writer;


use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;

// Re-export main components for easier access
pub use config::Config;
pub use error::{BundleError, Result};
pub use report::{ReportFormat, Reporter, ScanReport};
pub use rules::{load_external_patterns, HiddenAttribute, RuleConfig, VisibilityRules};
pub use types::{BundleEntry, DirectoryEntry, EntryKind, FileStatus, WalkOutput, WalkStatistics};
pub use walker::Walker;
pub use writer::BundleWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Walk `root` with `rules` and no progress display
pub fn walk(root: &Path, rules: &VisibilityRules) -> Result<WalkOutput> {
    Walker::new(rules.clone(), Arc::new(ProgressBar::hidden())).walk(root)
}
