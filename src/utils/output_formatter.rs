/// Output formatter for analysis results
///
/// This module renders analysis results for the console and serializes them
/// to JSON. Statistics that are undefined for the current file count are
/// shown as "N/A", never as a stand-in number.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::models::{AnalysisResults, MetricData};
use crate::utils::statistics::{trend_slope, MIN_FILES_FOR_TRENDLINE};

/// Format an optional number with a fixed number of decimal places.
///
/// # Arguments
///
/// * `value` - The number, or `None` when not applicable
/// * `decimals` - Number of decimal places
///
/// # Returns
///
/// The formatted string, or "N/A" for `None`
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "N/A".to_string(),
    }
}

/// Format an optional percentage with a trailing percent sign
pub fn format_percentage(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}%", decimals, v),
        None => "N/A".to_string(),
    }
}

/// Format analysis results for console output.
///
/// # Arguments
///
/// * `results` - The analysis results to render
/// * `file_names` - Names of the compared files, in comparison order
///
/// # Returns
///
/// Formatted string with one section per category
pub fn format_results(results: &AnalysisResults, file_names: &[String]) -> String {
    let mut output = String::new();

    if results.total_metrics == 0 {
        return "No common metrics found across the selected files.\n".to_string();
    }

    for (category, metrics) in &results.results {
        output.push_str(&format!("{}\n", category.yellow().bold()));

        for (metric, data) in metrics {
            output.push_str(&format!("  {}\n", metric.cyan().bold()));
            output.push_str(&format!("    {}\n", format_value_row(data, file_names)));

            if results.file_count == 2 {
                output.push_str(&format!(
                    "    delta: {}  percent change: {}\n",
                    format_delta(data.delta),
                    format_percentage(data.percent_change, 2)
                ));
            }

            if results.file_count >= 2 {
                output.push_str(&format!(
                    "    std dev: {}\n",
                    format_number(data.std_dev, 2)
                ));
            }

            if results.file_count >= MIN_FILES_FOR_TRENDLINE {
                let slope = trend_slope(&data.values);
                output.push_str(&format!(
                    "    trend: {} per file\n",
                    format_delta(slope)
                ));
            }
        }

        output.push('\n');
    }

    output
}

/// One row of per-file values with names and flag markers
fn format_value_row(data: &MetricData, file_names: &[String]) -> String {
    let cells: Vec<String> = data
        .values
        .iter()
        .zip(data.flags.iter())
        .enumerate()
        .map(|(i, (value, flagged))| {
            let name = file_names.get(i).map(String::as_str).unwrap_or("?");
            let cell = format!("{}: {:.2}", name, value);
            if *flagged {
                format!("{} {}", cell, "[FLAG]".red().bold())
            } else {
                cell
            }
        })
        .collect();

    cells.join("  |  ")
}

/// A signed value colored by direction: increases green, decreases red
fn format_delta(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{:.2}", v).green().to_string(),
        Some(v) if v < 0.0 => format!("{:.2}", v).red().to_string(),
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

/// Create a summary of an analysis run.
///
/// # Arguments
///
/// * `results` - The analysis results
/// * `file_names` - Names of the compared files, in comparison order
///
/// # Returns
///
/// Summary string
pub fn create_summary(results: &AnalysisResults, file_names: &[String]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "Comparison Summary".yellow().bold()));
    output.push_str(&format!("Files compared: {}\n", results.file_count));
    for (i, name) in file_names.iter().enumerate() {
        if i == 0 {
            output.push_str(&format!("  {}. {} (baseline)\n", i + 1, name));
        } else {
            output.push_str(&format!("  {}. {}\n", i + 1, name));
        }
    }

    output.push_str(&format!("Common metrics: {}\n", results.total_metrics));

    // Count flagged readings across all included metrics
    let flagged: usize = results
        .results
        .values()
        .flat_map(|metrics| metrics.values())
        .map(|data| data.flags.iter().filter(|f| **f).count())
        .sum();
    output.push_str(&format!("Flagged readings: {}\n", flagged));

    if !results.results.is_empty() {
        output.push_str(&format!("{}\n", "Categories".cyan().bold()));

        let mut categories: Vec<(&String, usize)> = results
            .results
            .iter()
            .map(|(category, metrics)| (category, metrics.len()))
            .collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1));

        for (i, (category, count)) in categories.iter().enumerate() {
            output.push_str(&format!("{}. {}: {} metric(s)\n", i + 1, category, count));
        }
    }

    output
}

/// Serialize analysis results to pretty-printed JSON
pub fn results_to_json(results: &AnalysisResults) -> Result<String> {
    serde_json::to_string_pretty(results).context("Failed to serialize analysis results")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analyzer::analyze_files;
    use crate::core::models::ParsedFile;
    use crate::core::parser::parse_report_text;

    fn two_file_results() -> (AnalysisResults, Vec<String>) {
        let a = ParsedFile::new(
            "a.txt",
            parse_report_text("Saccades:\nLatency: 100.0 msec\n"),
            0,
        );
        let b = ParsedFile::new(
            "b.txt",
            parse_report_text("Saccades:\nLatency: 110.0 msec | FLAG\n"),
            0,
        );
        let names = vec![a.name.clone(), b.name.clone()];
        (analyze_files(&[a, b]), names)
    }

    #[test]
    fn test_format_number_handles_none() {
        assert_eq!(format_number(None, 2), "N/A");
        assert_eq!(format_number(Some(1.2345), 2), "1.23");
    }

    #[test]
    fn test_format_percentage_handles_none() {
        assert_eq!(format_percentage(None, 2), "N/A");
        assert_eq!(format_percentage(Some(10.0), 2), "10.00%");
    }

    #[test]
    fn test_format_results_includes_stats() {
        colored::control::set_override(false);
        let (results, names) = two_file_results();
        let formatted = format_results(&results, &names);

        assert!(formatted.contains("Saccades"));
        assert!(formatted.contains("Latency"));
        assert!(formatted.contains("+10.00"));
        assert!(formatted.contains("10.00%"));
        assert!(formatted.contains("[FLAG]"));
    }

    #[test]
    fn test_format_results_no_common_metrics() {
        let results = AnalysisResults::empty();
        let formatted = format_results(&results, &[]);
        assert!(formatted.contains("No common metrics"));
    }

    #[test]
    fn test_summary_counts_flags() {
        colored::control::set_override(false);
        let (results, names) = two_file_results();
        let summary = create_summary(&results, &names);

        assert!(summary.contains("Files compared: 2"));
        assert!(summary.contains("Common metrics: 1"));
        assert!(summary.contains("Flagged readings: 1"));
        assert!(summary.contains("a.txt (baseline)"));
    }

    #[test]
    fn test_results_to_json_round_trips_fields() {
        let (results, _) = two_file_results();
        let json = results_to_json(&results).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["file_count"], 2);
        assert_eq!(value["total_metrics"], 1);
        assert_eq!(value["results"]["Saccades"]["Latency"]["delta"], 10.0);
        assert!(value["results"]["Saccades"]["Latency"]["percent_change"].is_number());
    }
}
