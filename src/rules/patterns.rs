/*!
 * Base-name glob patterns and the external ignore file
 *
 * Patterns are glob-match wildcards matched against a bare base name:
 * `*` and `?`, plus character classes (`[...]`), alternatives (`{a,b}`)
 * and `\` escapes. Names containing `[` or `{` need escaping to match
 * literally. This is a subset of `.gitignore` syntax: anchoring (`/`),
 * directory-only suffixes and `**` scoping are not interpreted, so such
 * lines never match a base name. Negated (`!`) lines are dropped when the
 * ignore file is parsed.
 */

use std::fs;
use std::io;
use std::path::Path;

use glob_match::glob_match;
use log::{debug, warn};

/// Default name of the ignore file looked up at the scan root
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Whether `name` matches any of `patterns`
pub fn matches_any<S: AsRef<str>>(patterns: &[S], name: &str) -> bool {
    patterns.iter().any(|p| glob_match(p.as_ref(), name))
}

/// Parse newline-delimited patterns, dropping blanks, `#` comments and `!` negations
pub fn parse_patterns(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| {
            // glob-match reads a leading `!` as "everything but", which would prune the whole tree
            if line.starts_with('!') {
                debug!("Ignoring unsupported negated pattern {}", line);
                return false;
            }
            true
        })
        .map(str::to_string)
        .collect()
}

/// Load patterns from `file_name` at `root`
///
/// A missing file yields no patterns. A file that exists but cannot be
/// read is logged and also yields no patterns; the run continues.
pub fn load_external_patterns(root: &Path, file_name: &str) -> Vec<String> {
    let path = root.join(file_name);

    match fs::read(&path) {
        Ok(bytes) => {
            let patterns = parse_patterns(&String::from_utf8_lossy(&bytes));
            debug!(
                "Loaded {} ignore patterns from {}",
                patterns.len(),
                path.display()
            );
            patterns
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No ignore file at {}", path.display());
            Vec::new()
        }
        Err(e) => {
            warn!(
                "Could not read ignore file {}, continuing without it: {}",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_parse_patterns() {
        let text = "# comment\n\n  *.log  \nbuild\n\t\n   # indented comment\nfoo?.txt\r\n";
        assert_eq!(parse_patterns(text), vec!["*.log", "build", "foo?.txt"]);
    }

    #[test]
    fn test_negated_lines_are_dropped() {
        let patterns = parse_patterns("*.log\n!keep.log\n  !.gitkeep\nbuild\n");
        assert_eq!(patterns, vec!["*.log", "build"]);
        assert!(!matches_any(&patterns, "main.rs"));
        assert!(!matches_any(&patterns, "src"));
    }

    #[test]
    fn test_bracket_names_need_escaping() {
        assert!(!matches_any(&["file[1].txt"], "file[1].txt"));
        assert!(matches_any(&["file[1].txt"], "file1.txt"));
    }

    #[test]
    fn test_matches_any() {
        let patterns = vec!["*.log".to_string(), "tmp?".to_string()];
        assert!(matches_any(&patterns, "debug.log"));
        assert!(matches_any(&patterns, ".log"));
        assert!(matches_any(&patterns, "tmp1"));
        assert!(!matches_any(&patterns, "tmp"));
        assert!(!matches_any(&patterns, "tmp12"));
        assert!(!matches_any(&patterns, "debug.LOG"));
        assert!(!matches_any::<String>(&[], "anything"));
    }

    #[test]
    fn test_gitignore_syntax_is_not_interpreted() {
        // Directory-only and anchored forms never match a bare base name
        let patterns = vec!["build/".to_string(), "/dist".to_string()];
        assert!(!matches_any(&patterns, "build"));
        assert!(!matches_any(&patterns, "dist"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        assert!(load_external_patterns(temp_dir.path(), DEFAULT_IGNORE_FILE).is_empty());
    }

    #[test]
    fn test_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let mut file = File::create(temp_dir.path().join(".gitignore")).unwrap();
        writeln!(file, "# logs\n*.log\n\nnode_modules").unwrap();

        assert_eq!(
            load_external_patterns(temp_dir.path(), DEFAULT_IGNORE_FILE),
            vec!["*.log", "node_modules"]
        );
    }

    #[test]
    fn test_load_unreadable_file_is_not_fatal() {
        let temp_dir = tempdir().unwrap();
        // A directory in place of the file cannot be read as text
        fs::create_dir(temp_dir.path().join(".gitignore")).unwrap();
        assert!(load_external_patterns(temp_dir.path(), DEFAULT_IGNORE_FILE).is_empty());
    }
}
