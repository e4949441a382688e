/*!
 * Integration test for bundling a project through the public API
 */

use std::fs;
use std::sync::Arc;

use indicatif::ProgressBar;
use tempfile::tempdir;

use dirbundle::{BundleWriter, FileStatus, RuleConfig, VisibilityRules, Walker};

#[test]
fn test_bundle_round_trip() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("app");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("node_modules").join("left-pad")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();

    fs::write(root.join("README.md"), "# App\n").unwrap();
    fs::write(root.join("LICENSE"), "MIT").unwrap();
    fs::write(root.join(".gitignore"), "*.log\n").unwrap();
    fs::write(root.join("server.log"), "noise").unwrap();
    fs::write(root.join("src").join("main.rs"), "fn main() {}\n").unwrap();
    fs::write(root.join("node_modules").join("left-pad").join("index.js"), "x").unwrap();
    fs::write(root.join(".git").join("HEAD"), "ref: refs/heads/main").unwrap();

    let output_path = root.join("ai").join("state.txt");
    let rules = VisibilityRules::for_root(&RuleConfig::default(), &root);
    let walker = Walker::new(rules, Arc::new(ProgressBar::hidden()))
        .exclude_path(&output_path)
        .exclude_path(root.join("ai"));

    let output = walker.walk(&root).unwrap();
    BundleWriter::new("Please review").write_file(&output, &output_path).unwrap();

    let bundle = fs::read_to_string(&output_path).unwrap();
    let expected_tree = "app/\n    .gitignore\n    LICENSE\n    README.md\n    src/\n        main.rs\n";
    assert!(bundle.starts_with(&format!("Please review\n\n{}", expected_tree)));

    assert!(bundle.contains("--- Start of app/README.md ---\n\n# App\n"));
    assert!(bundle.contains("--- Start of app/src/main.rs ---\n\nfn main() {}\n"));
    assert!(bundle.contains("--- Start of app/.gitignore ---"));
    assert!(!bundle.contains("Start of app/LICENSE"));
    assert!(!bundle.contains("server.log"));
    assert!(!bundle.contains("node_modules"));
    assert!(!bundle.contains("HEAD"));

    assert_eq!(
        output
            .files
            .iter()
            .find(|e| e.relative_path == "app/LICENSE")
            .map(|e| &e.status),
        Some(&FileStatus::Skipped)
    );

    // Walking again with the bundle on disk gives the same result
    let again = walker.walk(&root).unwrap();
    assert_eq!(again, output);

    // Without the exclusions the bundle directory shows up
    let unfiltered =
        dirbundle::walk(&root, &VisibilityRules::for_root(&RuleConfig::default(), &root)).unwrap();
    assert!(unfiltered.tree.contains("    ai/\n        state.txt\n"));
}
