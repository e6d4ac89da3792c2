//! Shared rolling and recursive numeric primitives.
//!
//! Everything here is a pure function over a borrowed slice. Degenerate
//! inputs (empty slices, zero windows, zero variance) return defined neutral
//! values rather than NaN.

/// Relative tolerance under which a standard deviation counts as zero.
const ZERO_VARIANCE_EPSILON: f64 = 1e-12;

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, 0 for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Whether `std` is indistinguishable from zero at the scale of `mean`.
pub fn is_zero_variance(std: f64, mean: f64) -> bool {
    std <= ZERO_VARIANCE_EPSILON * mean.abs().max(1.0)
}

/// Mean of each full contiguous window.
///
/// Output has `len - window + 1` entries; empty when the window does not fit.
pub fn rolling_mean(series: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || series.len() < window {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(series.len() - window + 1);
    let mut sum: f64 = series[..window].iter().sum();
    out.push(sum / window as f64);
    for i in window..series.len() {
        sum += series[i] - series[i - window];
        out.push(sum / window as f64);
    }
    out
}

/// Exponential moving average seeded with the first element.
///
/// `ema[i] = series[i] * k + ema[i-1] * (1 - k)` with `k = 2 / (period + 1)`.
pub fn ema(series: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = series.first() else {
        return Vec::new();
    };

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(series.len());
    out.push(first);
    for &value in &series[1..] {
        let prev = out[out.len() - 1];
        out.push(value * multiplier + prev * (1.0 - multiplier));
    }
    out
}

/// Population standard deviation over each trailing window.
///
/// Indices before a full window use every element seen so far, so the output
/// is aligned 1:1 with the input.
pub fn rolling_std(series: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..series.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            population_std(&series[start..=i])
        })
        .collect()
}

/// Left-pad `series` to `len` by repeating its first value.
pub fn pad_left(series: &[f64], len: usize) -> Vec<f64> {
    let Some(&first) = series.first() else {
        return Vec::new();
    };
    if series.len() >= len {
        return series.to_vec();
    }

    let mut out = vec![first; len - series.len()];
    out.extend_from_slice(series);
    out
}

/// Simple returns `(p[i+1] - p[i]) / p[i]`. A zero base price yields a 0 return.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|w| if w[0] != 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

/// Z-score every value against the mean and std of the whole slice.
///
/// Returns `None` for empty or zero-variance input.
pub fn z_scores(values: &[f64]) -> Option<Vec<f64>> {
    if values.is_empty() {
        return None;
    }
    let m = mean(values);
    let std = population_std(values);
    if is_zero_variance(std, m) {
        return None;
    }
    Some(values.iter().map(|v| (v - m) / std).collect())
}

/// Percentile with linear interpolation between closest ranks.
///
/// `pct` is in [0, 100]. Returns 0 for an empty slice.
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {} ≈ {}", a, b);
    }

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_close(mean(&values), 5.0);
        assert_close(population_std(&values), 2.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(population_std(&[]), 0.0);
    }

    #[test]
    fn test_rolling_mean_full_windows_only() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out.len(), 3);
        assert_close(out[0], 2.0);
        assert_close(out[1], 3.0);
        assert_close(out[2], 4.0);
    }

    #[test]
    fn test_rolling_mean_window_too_large() {
        assert!(rolling_mean(&[1.0, 2.0], 3).is_empty());
        assert!(rolling_mean(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_ema_seeded_with_first_element() {
        let out = ema(&[10.0, 11.0, 12.0], 3);
        // k = 0.5
        assert_close(out[0], 10.0);
        assert_close(out[1], 10.5);
        assert_close(out[2], 11.25);
    }

    #[test]
    fn test_ema_empty() {
        assert!(ema(&[], 12).is_empty());
    }

    #[test]
    fn test_ema_constant_series() {
        let out = ema(&[5.0; 30], 12);
        assert!(out.iter().all(|v| (*v - 5.0).abs() < 1e-12));
    }

    #[test]
    fn test_rolling_std_uses_partial_prefix() {
        let series = [1.0, 3.0, 5.0, 7.0];
        let out = rolling_std(&series, 2);
        assert_eq!(out.len(), 4);
        assert_close(out[0], 0.0);
        assert_close(out[1], 1.0);
        assert_close(out[2], 1.0);
        assert_close(out[3], 1.0);

        let wide = rolling_std(&series, 10);
        assert_close(wide[3], population_std(&series));
    }

    #[test]
    fn test_pad_left_repeats_first() {
        assert_eq!(pad_left(&[3.0, 4.0], 4), vec![3.0, 3.0, 3.0, 4.0]);
        assert_eq!(pad_left(&[3.0, 4.0], 1), vec![3.0, 4.0]);
        assert!(pad_left(&[], 3).is_empty());
    }

    #[test]
    fn test_simple_returns_guard_zero_price() {
        let out = simple_returns(&[0.0, 10.0, 11.0]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], 0.0);
        assert_close(out[1], 0.1);
    }

    #[test]
    fn test_z_scores_zero_variance() {
        assert!(z_scores(&[4.0; 10]).is_none());
        assert!(z_scores(&[0.1; 7]).is_none());
        assert!(z_scores(&[]).is_none());
    }

    #[test]
    fn test_z_scores_values() {
        let z = z_scores(&[1.0, 3.0]).unwrap();
        assert_close(z[0], -1.0);
        assert_close(z[1], 1.0);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let values: Vec<f64> = (1..=5).map(|v| v as f64).collect();
        assert_close(percentile(&values, 0.0), 1.0);
        assert_close(percentile(&values, 50.0), 3.0);
        assert_close(percentile(&values, 100.0), 5.0);
        assert_close(percentile(&values, 90.0), 4.6);
    }

    #[test]
    fn test_percentile_unsorted_input() {
        assert_close(percentile(&[5.0, 1.0, 3.0], 50.0), 3.0);
        assert_eq!(percentile(&[], 95.0), 0.0);
    }
}
