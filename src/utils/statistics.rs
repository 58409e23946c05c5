/// Statistical helper functions for VNG data analysis

/// Minimum number of files before a trendline is reported
pub const MIN_FILES_FOR_TRENDLINE: usize = 3;

/// Calculate the sample standard deviation (n-1 divisor) of a slice of values.
///
/// # Arguments
///
/// * `values` - The values to aggregate
///
/// # Returns
///
/// The sample standard deviation, or `None` for fewer than two values
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0);

    Some(variance.sqrt())
}

/// Calculate the percent change from a baseline value to a new value.
///
/// # Arguments
///
/// * `baseline` - The first file's value
/// * `new_value` - The compared file's value
///
/// # Returns
///
/// The percent change. A zero baseline with a zero new value is 0% change;
/// a zero baseline with a non-zero new value has no defined percent change
/// and yields `None`.
pub fn percent_change(baseline: f64, new_value: f64) -> Option<f64> {
    if baseline == 0.0 {
        return if new_value == 0.0 { Some(0.0) } else { None };
    }

    Some((new_value - baseline) / baseline * 100.0)
}

/// Calculate an ordinary-least-squares trendline over a value sequence.
///
/// The x coordinate of each point is its index. Missing (`None`) or NaN
/// entries are excluded from the fit but still receive a fitted value in the
/// output, which always has the same length as the input.
///
/// # Arguments
///
/// * `y_values` - The sequence to fit, one entry per file
///
/// # Returns
///
/// The fitted line evaluated at every input index, or a sequence of `None`
/// of the same length when fewer than two valid points exist
pub fn linear_trendline(y_values: &[Option<f64>]) -> Vec<Option<f64>> {
    let n = y_values.len();

    let valid_points: Vec<(f64, f64)> = y_values
        .iter()
        .enumerate()
        .filter_map(|(x, y)| y.filter(|v| !v.is_nan()).map(|v| (x as f64, v)))
        .collect();

    if valid_points.len() < 2 {
        return vec![None; n];
    }

    let vn = valid_points.len() as f64;
    let sum_x: f64 = valid_points.iter().map(|p| p.0).sum();
    let sum_y: f64 = valid_points.iter().map(|p| p.1).sum();
    let sum_xy: f64 = valid_points.iter().map(|p| p.0 * p.1).sum();
    let sum_xx: f64 = valid_points.iter().map(|p| p.0 * p.0).sum();

    let denominator = vn * sum_xx - sum_x * sum_x;
    let (slope, intercept) = if denominator == 0.0 {
        // Degenerate fit: fall back to a flat line through the mean
        (0.0, sum_y / vn)
    } else {
        let slope = (vn * sum_xy - sum_x * sum_y) / denominator;
        (slope, (sum_y - slope * sum_x) / vn)
    };

    (0..n).map(|x| Some(slope * x as f64 + intercept)).collect()
}

/// Slope of the OLS trendline over a fully-populated value sequence, or
/// `None` when no line can be fit
pub fn trend_slope(values: &[f64]) -> Option<f64> {
    let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    let line = linear_trendline(&wrapped);
    match (line.first().copied().flatten(), line.get(1).copied().flatten()) {
        (Some(first), Some(second)) => Some(second - first),
        _ => None,
    }
}
