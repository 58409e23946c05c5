/// Domain models for VNG report analysis
///
/// This module contains the data structures shared by the parser and the
/// analyzer: single metric readings, per-file parse results, and the
/// cross-file statistics container.

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default category for value lines that appear before any section header
pub const DEFAULT_CATEGORY: &str = "General";

/// Nested category -> metric -> value mapping produced by the parser.
///
/// `IndexMap` preserves insertion order, so categories and metrics iterate
/// in the order they first appeared in the report text.
pub type CategoryMap = IndexMap<String, IndexMap<String, MetricValue>>;

/// A single measurement extracted from a report
///
/// Immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    /// The numeric reading
    pub value: f64,

    /// True when the source report marked this value as outside its
    /// normative range (the `| FLAG` suffix)
    #[serde(default)]
    pub is_flagged: bool,
}

/// One report's extracted data
#[derive(Debug, Clone, Serialize)]
pub struct ParsedFile {
    /// Identifier for the file, typically the original filename
    pub name: String,

    /// Category -> metric -> value mapping recovered from the text
    pub data: CategoryMap,

    /// Size of the source text in bytes
    pub size_bytes: u64,

    /// When this file was parsed
    pub parsed_at: DateTime<Local>,
}

impl ParsedFile {
    /// Create a ParsedFile from already-parsed data
    pub fn new(name: impl Into<String>, data: CategoryMap, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            data,
            size_bytes,
            parsed_at: Local::now(),
        }
    }

    /// Total number of metrics across all categories in this file
    pub fn metric_count(&self) -> usize {
        self.data.values().map(|metrics| metrics.len()).sum()
    }
}

/// Cross-file statistics for one (category, metric) pair
///
/// `values` and `flags` are ordered by input file position; position 0 is
/// always the baseline file. The optional statistics are `None` whenever
/// they are not defined for the file count being compared - never a
/// sentinel number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricData {
    /// One value per file, in input order
    pub values: Vec<f64>,

    /// One flag per file, parallel to `values`
    pub flags: Vec<bool>,

    /// `values[1] - values[0]`; defined only for exactly two files
    pub delta: Option<f64>,

    /// Percent change from the baseline to the second file; defined only
    /// for exactly two files, and `None` when the baseline is zero and the
    /// new value is not
    pub percent_change: Option<f64>,

    /// Sample standard deviation (n-1 divisor); defined for two or more files
    pub std_dev: Option<f64>,
}

/// Container for one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResults {
    /// Category -> metric -> statistics, restricted to pairs present in
    /// every input file
    pub results: IndexMap<String, IndexMap<String, MetricData>>,

    /// Number of files that went into the comparison
    pub file_count: usize,

    /// Sum of metric counts across all included categories
    pub total_metrics: usize,

    /// When this analysis was produced
    pub created_at: DateTime<Local>,
}

impl AnalysisResults {
    /// Empty result for an empty input list
    pub fn empty() -> Self {
        Self {
            results: IndexMap::new(),
            file_count: 0,
            total_metrics: 0,
            created_at: Local::now(),
        }
    }
}
