/// VNG report text parser
///
/// This module converts the raw text of a VNG report into a structured
/// category -> metric -> value mapping. Parsing is deliberately permissive:
/// lines that match neither the value pattern nor the header pattern are
/// inert, so a best-effort extraction is always produced even from partially
/// malformed input.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::core::models::{CategoryMap, MetricValue, DEFAULT_CATEGORY};

lazy_static! {
    /// Matches a value line: the LAST colon on the line, followed by a
    /// numeric token, optional unit text, and an optional `| FLAG` marker
    /// anchored at end of line. The unit class excludes `:` so the match
    /// always lands on the last colon.
    static ref VALUE_LINE_RE: Regex =
        Regex::new(r":\s*([\d.-]+)[\s%a-zA-Z/°]*?(\| FLAG)?$").unwrap();

    /// Trailing parenthesized annotation on a metric name, e.g. "(left eye)"
    static ref PAREN_SUFFIX_RE: Regex = Regex::new(r"\s*\([^)]+\)$").unwrap();
}

/// Header prefix for the terminal summary section of a report; lines in that
/// section must not fork a new category
const SUMMARY_HEADER_PREFIX: &str = "Summary of Flagged Findings";

/// Decoration suffix on some section headers, e.g. "VISUOMOTOR //"
const HEADER_DECORATION: &str = "//";

/// Classification of a single report line
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// A metric reading, e.g. "Latency: 210.5 msec | FLAG"
    Value {
        metric: String,
        value: f64,
        flagged: bool,
    },

    /// A category header, e.g. "Saccades:"
    Header { name: String },

    /// Anything else: blank lines, prose, the flagged-findings summary
    /// header, and value lines whose numeric token fails to parse
    Ignored,
}

/// Classify a single line of report text.
///
/// # Arguments
///
/// * `line` - One line of the report, trimmed or not
///
/// # Returns
///
/// The classification of the line; pure function of the line text
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Ignored;
    }

    if let Some(caps) = VALUE_LINE_RE.captures(trimmed) {
        let token = &caps[1];
        let value: f64 = match token.parse() {
            Ok(v) => v,
            Err(_) => {
                // Claimed a numeric value but the token does not convert;
                // skip the line without touching parser state
                debug!("Skipping line with unparseable numeric token: {}", trimmed);
                return LineKind::Ignored;
            }
        };
        let flagged = caps.get(2).is_some();

        // Metric name is everything before the last colon, minus any
        // trailing parenthesized annotation
        let colon_pos = trimmed.rfind(':').unwrap_or(0);
        let raw_name = trimmed[..colon_pos].trim();
        let metric = PAREN_SUFFIX_RE.replace(raw_name, "").trim().to_string();

        return LineKind::Value {
            metric,
            value,
            flagged,
        };
    }

    if let Some(name) = header_name(trimmed) {
        if name.starts_with(SUMMARY_HEADER_PREFIX) {
            // Terminal summary section: leave the current category alone
            return LineKind::Ignored;
        }
        return LineKind::Header { name };
    }

    LineKind::Ignored
}

/// Extract a header name from a line that ends with a colon or a `//`
/// decoration, stripping both when present
fn header_name(trimmed: &str) -> Option<String> {
    let mut name = if let Some(stripped) = trimmed.strip_suffix(':') {
        stripped.trim()
    } else if trimmed.ends_with(HEADER_DECORATION) {
        trimmed
    } else {
        return None;
    };

    if let Some(stripped) = name.strip_suffix(HEADER_DECORATION) {
        name = stripped.trim();
    }

    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// Parse the raw text of a VNG report into a structured mapping.
///
/// # Arguments
///
/// * `text` - The raw text content of the report
///
/// # Returns
///
/// A nested mapping where the outer key is the category name (e.g.
/// "Saccades"), the inner key is the metric name (e.g. "Latency"), and the
/// value carries the reading and its out-of-range flag. Value lines seen
/// before any header are assigned to the "General" category; a metric name
/// recurring within one category overwrites the earlier entry.
pub fn parse_report_text(text: &str) -> CategoryMap {
    let mut data_map = CategoryMap::new();
    let mut current_category = DEFAULT_CATEGORY.to_string();

    for line in text.lines() {
        match classify_line(line) {
            LineKind::Value {
                metric,
                value,
                flagged,
            } => {
                data_map
                    .entry(current_category.clone())
                    .or_default()
                    .insert(
                        metric,
                        MetricValue {
                            value,
                            is_flagged: flagged,
                        },
                    );
            }
            LineKind::Header { name } => {
                current_category = name;
            }
            LineKind::Ignored => {}
        }
    }

    data_map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_report() {
        let text = "Saccades:\nLatency: 210.5 msec\nVelocity: 450.0 deg/sec | FLAG\n";
        let parsed = parse_report_text(text);

        let saccades = parsed.get("Saccades").expect("Saccades category missing");
        assert_eq!(saccades["Latency"].value, 210.5);
        assert!(!saccades["Latency"].is_flagged);
        assert_eq!(saccades["Velocity"].value, 450.0);
        assert!(saccades["Velocity"].is_flagged);
    }

    #[test]
    fn test_default_category_before_any_header() {
        let parsed = parse_report_text("Latency: 210.5 msec\n");
        assert_eq!(parsed["General"]["Latency"].value, 210.5);
    }

    #[test]
    fn test_parenthetical_annotation_stripped() {
        let parsed = parse_report_text("Gain (left eye): 0.95\n");
        let general = &parsed["General"];
        assert!(general.contains_key("Gain"));
        assert!(!general.contains_key("Gain (left eye)"));
        assert_eq!(general["Gain"].value, 0.95);
    }

    #[test]
    fn test_decorated_header_normalized() {
        let parsed = parse_report_text("VISUOMOTOR //\nLatency: 200.0 msec\n");
        assert_eq!(parsed["VISUOMOTOR"]["Latency"].value, 200.0);

        // Same decoration with a trailing colon normalizes identically
        let parsed = parse_report_text("VISUOMOTOR //:\nLatency: 200.0 msec\n");
        assert_eq!(parsed["VISUOMOTOR"]["Latency"].value, 200.0);
    }

    #[test]
    fn test_summary_header_does_not_change_category() {
        let text = "Saccades:\nLatency: 210.5 msec\nSummary of Flagged Findings:\nVelocity: 450.0 deg/sec\n";
        let parsed = parse_report_text(text);

        // Value lines after the summary header still belong to Saccades
        let saccades = &parsed["Saccades"];
        assert_eq!(saccades["Velocity"].value, 450.0);
        assert!(!parsed.contains_key("Summary of Flagged Findings"));
    }

    #[test]
    fn test_last_write_wins_within_category() {
        let text = "Saccades:\nLatency: 210.5 msec\nLatency: 215.0 msec | FLAG\n";
        let parsed = parse_report_text(text);

        let latency = &parsed["Saccades"]["Latency"];
        assert_eq!(latency.value, 215.0);
        assert!(latency.is_flagged);
        assert_eq!(parsed["Saccades"].len(), 1);
    }

    #[test]
    fn test_unparseable_numeric_token_skipped() {
        let text = "Saccades:\nLatency: 210.5 msec\nNoise: 1.2.3.4\n";
        let parsed = parse_report_text(text);

        assert!(!parsed["Saccades"].contains_key("Noise"));
        assert_eq!(parsed["Saccades"].len(), 1);
    }

    #[test]
    fn test_prose_lines_are_inert() {
        let text = "Patient was cooperative throughout.\nSaccades:\nLatency: 210.5 msec\n";
        let parsed = parse_report_text(text);
        assert_eq!(parsed.len(), 1);
        assert!(parsed.contains_key("Saccades"));
    }

    #[test]
    fn test_negative_and_percent_values() {
        let text = "Pursuit:\nAsymmetry: -3.2 %\nGain: 0.85\n";
        let parsed = parse_report_text(text);
        assert_eq!(parsed["Pursuit"]["Asymmetry"].value, -3.2);
        assert_eq!(parsed["Pursuit"]["Gain"].value, 0.85);
    }

    #[test]
    fn test_classify_line_variants() {
        assert_eq!(classify_line("   "), LineKind::Ignored);
        assert_eq!(
            classify_line("Saccades:"),
            LineKind::Header {
                name: "Saccades".to_string()
            }
        );
        assert_eq!(
            classify_line("Latency: 210.5 msec | FLAG"),
            LineKind::Value {
                metric: "Latency".to_string(),
                value: 210.5,
                flagged: true,
            }
        );
        assert_eq!(classify_line("Summary of Flagged Findings:"), LineKind::Ignored);
    }

    #[test]
    fn test_empty_text_yields_empty_map() {
        assert!(parse_report_text("").is_empty());
        assert!(parse_report_text("\n\n  \n").is_empty());
    }
}
