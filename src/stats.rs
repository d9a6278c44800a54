//! Small-sample statistics used by the forecast. Every function is total:
//! an empty sample yields `None` instead of a NaN.

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Keep the values within `threshold` of the sample mean, in their original order.
pub fn remove_outliers(values: &[f64], threshold: f64) -> Vec<f64> {
    let Some(avg) = mean(values) else {
        return Vec::new();
    };
    values
        .iter()
        .copied()
        .filter(|v| {
            let keep = (v - avg).abs() <= threshold;
            if !keep {
                log::debug!("outlier {v:.2} removed (mean {avg:.2}, threshold {threshold})");
            }
            keep
        })
        .collect()
}

/// Recency-weighted average: the i-th value gets weight i + 1.
pub fn weighted_average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let (weighted_sum, total_weight) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sum, total), (i, v)| {
            let weight = (i + 1) as f64;
            (sum + v * weight, total + weight)
        });
    Some(weighted_sum / total_weight)
}

/// Population standard deviation around a given reference value
/// rather than the sample's own mean.
pub fn std_deviation_around(values: &[f64], reference: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let variance =
        values.iter().map(|v| (v - reference).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}
