/*!
 * Command-line interface for dirbundle
 */

use std::fs;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use dirbundle::config::{Args, Config};
use dirbundle::report::{ReportFormat, Reporter, ScanReport};
use dirbundle::walker::Walker;
use dirbundle::writer::BundleWriter;

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    setup_logging(args.quiet, args.verbose);

    let config = Config::from_args(args)?;
    config.validate()?;
    log::debug!("Running with config: {:?}", config);

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {pos} files {wide_msg:.dim.white}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📂 Bundling");
    progress.set_message(format!("{}", config.target_dir.display()));

    let walker = Walker::for_config(&config, Arc::new(progress.clone()));
    if !walker.rules().external_patterns().is_empty() {
        log::info!(
            "Using {} patterns from the ignore file",
            walker.rules().external_patterns().len()
        );
    }
    let writer = BundleWriter::new(config.prompt.clone());

    let start_time = Instant::now();

    let output = walker.walk(&config.target_dir)?;
    writer.write_file(&output, &config.output_file)?;

    let duration = start_time.elapsed();
    progress.finish_and_clear();

    let output_size = fs::metadata(&config.output_file)
        .map(|m| m.len())
        .unwrap_or(0);
    let report = ScanReport::new(
        &output,
        config.output_file.display().to_string(),
        output_size,
        duration,
    );
    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);

    Ok(())
}
