/// Simple example demonstrating how to use the VNG analyzer library

use anyhow::Result;
use vng_analyzer::compare_report_files;
use vng_analyzer::utils::output_formatter::{format_number, format_percentage};

fn main() -> Result<()> {
    // Create two sample reports
    let dir = std::env::temp_dir();
    let baseline = dir.join("vng_baseline.txt");
    let follow_up = dir.join("vng_follow_up.txt");

    std::fs::write(
        &baseline,
        r#"Saccades:
Latency: 210.5 msec
Velocity: 450.0 deg/sec

Pursuit:
Gain: 0.95
"#,
    )?;

    std::fs::write(
        &follow_up,
        r#"Saccades:
Latency: 231.6 msec | FLAG
Velocity: 445.0 deg/sec

Pursuit:
Gain: 0.97
"#,
    )?;

    // Compare the reports; the first file is the baseline
    let results = compare_report_files(&[&baseline, &follow_up])?;

    println!(
        "Compared {} files, {} common metrics\n",
        results.file_count, results.total_metrics
    );

    for (category, metrics) in &results.results {
        println!("{}", category);
        for (metric, data) in metrics {
            println!(
                "  {}: {:?}  delta={}  change={}",
                metric,
                data.values,
                format_number(data.delta, 2),
                format_percentage(data.percent_change, 2)
            );
        }
    }

    Ok(())
}
