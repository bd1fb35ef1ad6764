//! Pure trailing-window statistics over slices.
//!
//! Windows shrink at the start of the series: the window ending at `index`
//! covers the last `min(window, index + 1)` values. There is no hidden state;
//! index + slice fully determine the result.

/// Mean of the trailing window ending at `index`.
///
/// Defined for every index of a non-empty slice (the window never has fewer
/// than one value).
pub fn rolling_mean(values: &[f64], window: usize, index: usize) -> f64 {
    let slice = trailing(values, window, index);
    slice.iter().sum::<f64>() / slice.len() as f64
}

/// Sample standard deviation of the trailing window ending at `index`.
///
/// `None` when the window holds fewer than two values.
pub fn rolling_std_dev(values: &[f64], window: usize, index: usize) -> Option<f64> {
    sample_std(trailing(values, window, index))
}

/// Sample standard deviation (denominator n − 1); `None` for n < 2.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(variance.sqrt())
}

fn trailing(values: &[f64], window: usize, index: usize) -> &[f64] {
    let start = (index + 1).saturating_sub(window.max(1));
    &values[start..=index]
}
