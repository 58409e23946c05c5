/// VNG Analyzer - a cross-file comparison tool for VNG test reports
///
/// The main entry point for the analyzer. It parses command-line arguments,
/// loads the requested reports in order, and prints the cross-file
/// comparison.

use anyhow::Result;
use clap::{ArgAction, Parser};
use colored::Colorize;
use log::{error, info, LevelFilter};
use std::process;

mod core;
mod utils;

use crate::core::analyzer::analyze_files;
use crate::core::models::ParsedFile;
use crate::core::parser::parse_report_text;
use crate::utils::file_utils::{display_name, read_report_text, validate_report_file};
use crate::utils::output_formatter;

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "vng_analyzer",
    version,
    about = "Compare VNG test reports across files",
    long_about = "Parses plain-text VNG (videonystagmography) reports and compares the \
metrics common to all of them. The first file is the baseline: with exactly two files \
the tool reports delta and percent change, and with two or more it reports the sample \
standard deviation per metric."
)]
struct Args {
    /// Paths to the report files, in comparison order (first = baseline)
    #[arg(name = "reports", required = true, num_args = 1..)]
    reports: Vec<String>,

    /// Print results as JSON instead of formatted text
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Show only summary information
    #[arg(long = "summary-only", action = ArgAction::SetTrue)]
    summary_only: bool,

    /// Set logging level (default: warn)
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,
}

/// Main entry point function
fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args);

    // Load reports in argument order; the order defines the baseline
    let mut parsed_files = Vec::with_capacity(args.reports.len());
    for path_str in &args.reports {
        let path = std::path::Path::new(path_str);

        if let Err(e) = validate_report_file(path) {
            error!("Validation failed for {}: {}", path.display(), e);
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }

        let text = match read_report_text(path) {
            Ok(text) => text,
            Err(e) => {
                error!("Read failed for {}: {}", path.display(), e);
                eprintln!("{} {}", "Error:".red().bold(), e);
                process::exit(1);
            }
        };

        let data = parse_report_text(&text);
        let file = ParsedFile::new(display_name(path), data, text.len() as u64);
        info!(
            "Parsed {}: {} metric(s) in {} categories",
            file.name,
            file.metric_count(),
            file.data.len()
        );
        parsed_files.push(file);
    }

    let file_names: Vec<String> = parsed_files.iter().map(|f| f.name.clone()).collect();
    let results = analyze_files(&parsed_files);

    if args.json {
        println!("{}", output_formatter::results_to_json(&results)?);
        return Ok(());
    }

    println!("{}", output_formatter::create_summary(&results, &file_names));

    if !args.summary_only {
        println!("{}", output_formatter::format_results(&results, &file_names));
    }

    Ok(())
}

/// Set up logging to stderr with timestamps
fn setup_logging(args: &Args) {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(args.log_level);

    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    builder.init();
}
