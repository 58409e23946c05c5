/// VNG Analyzer - a cross-file comparison tool for VNG test reports
///
/// This library parses plain-text VNG (videonystagmography) reports into
/// structured category/metric measurements and compares them across an
/// arbitrary number of files, computing per-metric statistics for the
/// metrics common to all of them.

// Re-export core modules
pub mod core;
pub mod utils;

// Re-export the main types and entry points for convenience
pub use crate::core::analyzer::analyze_files;
pub use crate::core::models::{AnalysisResults, CategoryMap, MetricData, MetricValue, ParsedFile};
pub use crate::core::parser::{classify_line, parse_report_text, LineKind};

use std::path::Path;

use crate::utils::file_utils::{read_report_text, validate_report_file};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Validate, read, and parse a single report file.
///
/// # Arguments
///
/// * `path` - Path to the report file
///
/// # Returns
///
/// The parsed file, named after the file on disk
pub fn parse_report_file<P: AsRef<Path>>(path: P) -> anyhow::Result<ParsedFile> {
    let path = path.as_ref();
    validate_report_file(path)?;

    let text = read_report_text(path)?;
    let data = parse_report_text(&text);

    Ok(ParsedFile::new(
        utils::file_utils::display_name(path),
        data,
        text.len() as u64,
    ))
}

/// Parse and compare a list of report files.
///
/// This is a convenience function for simple use cases; the argument order
/// is the comparison order, with the first file as the baseline.
///
/// # Arguments
///
/// * `paths` - Paths to the report files to compare
///
/// # Returns
///
/// Analysis results covering the metrics common to all files
pub fn compare_report_files<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<AnalysisResults> {
    let mut parsed = Vec::with_capacity(paths.len());
    for path in paths {
        parsed.push(parse_report_file(path)?);
    }

    Ok(analyze_files(&parsed))
}
