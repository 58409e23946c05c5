/// Cross-file analyzer for parsed VNG reports
///
/// This module compares an ordered list of parsed files, restricts the
/// comparison to (category, metric) pairs present in every file, and
/// computes per-metric statistics. Input order is semantically meaningful:
/// the first file is the baseline, and every output value/flag sequence is
/// aligned to the input order.

use std::collections::HashSet;

use chrono::Local;
use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::core::models::{AnalysisResults, MetricData, ParsedFile};
use crate::utils::statistics::{percent_change, sample_std_dev};

/// Analyze the data from multiple parsed files.
///
/// # Arguments
///
/// * `files` - Parsed files in comparison order; position 0 is the baseline
///
/// # Returns
///
/// Analysis results keyed by category and metric, covering only the
/// (category, metric) pairs present in every input file. An empty input
/// list yields an empty, well-formed result. Categories and metrics are
/// emitted in the order they appear in the baseline file.
pub fn analyze_files(files: &[ParsedFile]) -> AnalysisResults {
    if files.is_empty() {
        return AnalysisResults::empty();
    }

    let file_count = files.len();
    info!("Analyzing {} file(s)", file_count);

    // 1. Find (category, metric) pairs common to all files. Presence is the
    // only criterion; differing values do not affect inclusion.
    let mut common_pairs = pair_set(&files[0]);
    for file in &files[1..] {
        let file_pairs = pair_set(file);
        common_pairs.retain(|pair| file_pairs.contains(pair));
    }
    debug!("{} common metric pair(s)", common_pairs.len());

    // 2. Collect values and flags per pair, walking the baseline file's maps
    // so the output order is deterministic.
    let mut results: IndexMap<String, IndexMap<String, MetricData>> = IndexMap::new();
    let mut total_metrics = 0;

    for (category, metrics) in &files[0].data {
        for metric in metrics.keys() {
            if !common_pairs.contains(&(category.as_str(), metric.as_str())) {
                continue;
            }

            let mut values = Vec::with_capacity(file_count);
            let mut flags = Vec::with_capacity(file_count);
            for file in files {
                if let Some(mv) = file.data.get(category).and_then(|m| m.get(metric)) {
                    values.push(mv.value);
                    flags.push(mv.is_flagged);
                }
            }

            // A pair that passed the intersection must resolve in every
            // file; a short row indicates a logic defect, so the pair is
            // excluded rather than emitted partially.
            if values.len() != file_count {
                debug_assert!(
                    false,
                    "common pair ({}, {}) resolved {} of {} files",
                    category,
                    metric,
                    values.len(),
                    file_count
                );
                warn!(
                    "Excluding inconsistent pair ({}, {}): {} of {} values",
                    category,
                    metric,
                    values.len(),
                    file_count
                );
                continue;
            }

            // 3. Statistics. Delta and percent change are pairwise notions
            // and exist only for exactly two files; the standard deviation
            // needs at least two.
            let delta = if file_count == 2 {
                Some(values[1] - values[0])
            } else {
                None
            };
            let pct_change = if file_count == 2 {
                percent_change(values[0], values[1])
            } else {
                None
            };
            let std_dev = sample_std_dev(&values);

            results.entry(category.clone()).or_default().insert(
                metric.clone(),
                MetricData {
                    values,
                    flags,
                    delta,
                    percent_change: pct_change,
                    std_dev,
                },
            );
            total_metrics += 1;
        }
    }

    info!(
        "Analysis produced {} metric(s) across {} categories",
        total_metrics,
        results.len()
    );

    AnalysisResults {
        results,
        file_count,
        total_metrics,
        created_at: Local::now(),
    }
}

/// Build the set of (category, metric) pairs present in one file
fn pair_set(file: &ParsedFile) -> HashSet<(&str, &str)> {
    let mut pairs = HashSet::new();
    for (category, metrics) in &file.data {
        for metric in metrics.keys() {
            pairs.insert((category.as_str(), metric.as_str()));
        }
    }
    pairs
}
