//! Rolling metrics and summary statistics.
//!
//! Everything here is a pure function over an explicit slice and index; there
//! is no accumulator state between calls. `derive` is the single place that
//! turns clean bars into derived bars, so every query sees identical numbers
//! for identical input.

pub mod rolling;
pub mod summary;

pub use summary::{summary_stats, SummaryStats};

use crate::domain::{Bar, DerivedBar};

/// Trailing window for the moving average of close.
pub const MA_WINDOW: usize = 7;
/// Trailing window for return volatility.
pub const VOLATILITY_WINDOW: usize = 30;

/// Enrich clean bars with `daily_return`, `MA7`, and `volatility30`.
pub fn derive(bars: &[Bar]) -> Vec<DerivedBar> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let returns: Vec<Option<f64>> = bars.iter().map(daily_return).collect();

    bars.iter()
        .enumerate()
        .map(|(i, bar)| DerivedBar {
            bar: bar.clone(),
            daily_return: returns[i],
            ma7: rolling::rolling_mean(&closes, MA_WINDOW, i),
            volatility30: windowed_return_volatility(&returns, i),
        })
        .collect()
}

/// Same-bar return: (close − open) / open.
///
/// A zero open makes the return undefined for that bar; the bar itself is
/// kept and the absence is excluded from downstream aggregates.
fn daily_return(bar: &Bar) -> Option<f64> {
    if bar.open == 0.0 {
        return None;
    }
    let r = (bar.close - bar.open) / bar.open;
    r.is_finite().then_some(r)
}

/// Sample stddev of the defined returns in the trailing 30-bar window.
fn windowed_return_volatility(returns: &[Option<f64>], index: usize) -> Option<f64> {
    let start = (index + 1).saturating_sub(VOLATILITY_WINDOW);
    let window: Vec<f64> = returns[start..=index].iter().flatten().copied().collect();
    rolling::sample_std(&window)
}

#[cfg(test)]
pub(crate) fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

#[cfg(test)]
pub(crate) const DEFAULT_EPSILON: f64 = 1e-10;
