/*!
 * Configuration handling for dirbundle
 */

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::error::Result;
use crate::rules::RuleConfig;
use crate::utils::timestamped_output_path;
use crate::writer::DEFAULT_PROMPT;

/// Command-line arguments for dirbundle
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "dirbundle",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bundle a filtered directory tree and its file contents into one text file",
    long_about = "Walks a directory, filters hidden entries, ignored directories and ignore-file patterns, then writes an indented tree followed by the content of every remaining file, ready to hand to a reviewer or a language model."
)]
pub struct Args {
    /// Directory to bundle
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output file (defaults to a timestamped file in --output-dir)
    #[clap(short, long)]
    pub output: Option<String>,

    /// Directory for timestamped output files
    #[clap(long, default_value = "ai")]
    pub output_dir: String,

    /// JSON file overriding the default rule configuration
    #[clap(long)]
    pub rules: Option<String>,

    /// Hidden names to keep (comma-separated, repeatable)
    #[clap(long, value_delimiter = ',')]
    pub allow_hidden: Vec<String>,

    /// Directory name patterns to prune (comma-separated, repeatable)
    #[clap(long, value_delimiter = ',')]
    pub ignore_dir: Vec<String>,

    /// Extensions to list without content (comma-separated, repeatable)
    #[clap(long, value_delimiter = ',')]
    pub skip_ext: Vec<String>,

    /// Base names to list without content (comma-separated, repeatable)
    #[clap(long, value_delimiter = ',')]
    pub skip_name: Vec<String>,

    /// File name patterns to list without content (comma-separated, repeatable)
    #[clap(long, value_delimiter = ',')]
    pub skip_pattern: Vec<String>,

    /// Name of the ignore-pattern file read from the root
    #[clap(long)]
    pub ignore_file: Option<String>,

    /// Do not read an ignore-pattern file
    #[clap(long, conflicts_with = "ignore_file")]
    pub no_ignore_file: bool,

    /// Text written before the tree
    #[clap(long)]
    pub prompt: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silence all log output
    #[clap(short, long)]
    pub quiet: bool,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to bundle
    pub target_dir: PathBuf,

    /// Bundle file path
    pub output_file: PathBuf,

    /// Visibility rule configuration
    pub rules: RuleConfig,

    /// Banner text written before the tree
    pub prompt: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let mut rules = match &args.rules {
            Some(path) => {
                let path = PathBuf::from(path);
                crate::ensure!(
                    path.is_file(),
                    Config,
                    "Rule file not found: {}",
                    path.display()
                );
                RuleConfig::from_json_file(&path)?
            }
            None => RuleConfig::default(),
        };

        rules.allowed_hidden.extend(args.allow_hidden);
        rules.ignore_dir_names.extend(args.ignore_dir);
        rules.skip_content_extensions.extend(args.skip_ext);
        rules.skip_content_base_names.extend(args.skip_name);
        rules.skip_content_patterns.extend(args.skip_pattern);

        if args.no_ignore_file {
            rules.ignore_file = None;
        } else if let Some(name) = args.ignore_file {
            crate::ensure!(
                !name.trim().is_empty(),
                InvalidArgument,
                "--ignore-file needs a file name"
            );
            rules.ignore_file = Some(name);
        }

        let output_file = match args.output {
            Some(path) => PathBuf::from(path),
            None => timestamped_output_path(&PathBuf::from(&args.output_dir)),
        };

        Ok(Self {
            target_dir: PathBuf::from(args.directory_path),
            output_file,
            rules,
            prompt: args.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.target_dir.exists(),
            RootNotFound,
            "{}",
            self.target_dir.display()
        );
        crate::ensure!(
            self.target_dir.is_dir(),
            NotADirectory,
            "{}",
            self.target_dir.display()
        );
        crate::ensure!(
            !self.output_file.is_dir(),
            Config,
            "Output path is a directory: {}",
            self.output_file.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("dirbundle").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(parse(&[])).unwrap();

        assert_eq!(config.target_dir, PathBuf::from("."));
        assert_eq!(config.output_file.parent(), Some(PathBuf::from("ai").as_path()));
        assert_eq!(config.rules, RuleConfig::default());
        assert_eq!(config.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn test_cli_extends_rules() {
        let config = Config::from_args(parse(&[
            "src",
            "--output",
            "bundle.txt",
            "--ignore-dir",
            "generated,fixtures",
            "--skip-ext",
            ".csv",
            "--allow-hidden",
            ".env",
            "--no-ignore-file",
        ]))
        .unwrap();

        assert_eq!(config.target_dir, PathBuf::from("src"));
        assert_eq!(config.output_file, PathBuf::from("bundle.txt"));
        assert!(config.rules.ignore_dir_names.contains(&"generated".to_string()));
        assert!(config.rules.ignore_dir_names.contains(&"fixtures".to_string()));
        assert!(config.rules.ignore_dir_names.contains(&"node_modules".to_string()));
        assert!(config.rules.skip_content_extensions.contains(&".csv".to_string()));
        assert!(config.rules.allowed_hidden.contains(&".env".to_string()));
        assert_eq!(config.rules.ignore_file, None);
    }

    #[test]
    fn test_rules_file() {
        let temp_dir = tempdir().unwrap();
        let rules_path = temp_dir.path().join("rules.json");
        fs::write(
            &rules_path,
            r#"{ "ignore_dir_names": ["only_this"], "ignore_file": ".bundleignore" }"#,
        )
        .unwrap();

        let config = Config::from_args(parse(&["--rules", rules_path.to_str().unwrap()])).unwrap();
        assert_eq!(config.rules.ignore_dir_names, vec!["only_this"]);
        assert_eq!(config.rules.ignore_file.as_deref(), Some(".bundleignore"));

        let missing = temp_dir.path().join("missing.json");
        assert!(Config::from_args(parse(&["--rules", missing.to_str().unwrap()])).is_err());
    }

    #[test]
    fn test_validate_root() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let mut config = Config::from_args(parse(&[])).unwrap();
        config.target_dir = temp_dir.path().to_path_buf();
        assert!(config.validate().is_ok());

        config.target_dir = temp_dir.path().join("missing");
        assert!(matches!(
            config.validate(),
            Err(crate::error::BundleError::RootNotFound(_))
        ));

        config.target_dir = file;
        assert!(matches!(
            config.validate(),
            Err(crate::error::BundleError::NotADirectory(_))
        ));
    }
}
