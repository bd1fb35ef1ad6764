//! Series-level summary statistics.

use crate::domain::DerivedBar;
use serde::{Deserialize, Serialize};

/// Max high, min low, and mean close over the whole series.
///
/// The wire names say "52 week" but the window is whatever history the source
/// holds — the loader never trims to a calendar year. Every field is `None`
/// for an empty series; `/summary` on an empty source is a legitimate query
/// and must not raise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    #[serde(rename = "52_week_high")]
    pub high: Option<f64>,
    #[serde(rename = "52_week_low")]
    pub low: Option<f64>,
    pub avg_close: Option<f64>,
}

/// Compute summary statistics over a full series.
pub fn summary_stats(bars: &[DerivedBar]) -> SummaryStats {
    if bars.is_empty() {
        return SummaryStats {
            high: None,
            low: None,
            avg_close: None,
        };
    }

    let mut high = f64::MIN;
    let mut low = f64::MAX;
    let mut close_sum = 0.0;
    for bar in bars {
        high = high.max(bar.bar.high);
        low = low.min(bar.bar.low);
        close_sum += bar.bar.close;
    }

    SummaryStats {
        high: Some(high),
        low: Some(low),
        avg_close: Some(close_sum / bars.len() as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{assert_approx, derive, make_bars, DEFAULT_EPSILON};

    #[test]
    fn stats_cover_the_whole_series() {
        let derived = derive(&make_bars(&[10.0, 30.0, 20.0]));
        let stats = summary_stats(&derived);
        // make_bars: high = max(open, close) + 1, low = min(open, close) - 1.
        assert_approx(stats.high.unwrap(), 31.0, DEFAULT_EPSILON);
        assert_approx(stats.low.unwrap(), 9.0, DEFAULT_EPSILON);
        assert_approx(stats.avg_close.unwrap(), 20.0, DEFAULT_EPSILON);
    }

    #[test]
    fn empty_series_has_all_fields_absent() {
        let stats = summary_stats(&[]);
        assert_eq!(
            stats,
            SummaryStats {
                high: None,
                low: None,
                avg_close: None,
            }
        );
    }

    #[test]
    fn wire_names_use_52_week_prefix() {
        let stats = summary_stats(&derive(&make_bars(&[10.0])));
        let value = serde_json::to_value(stats).unwrap();
        assert!(value.get("52_week_high").is_some());
        assert!(value.get("52_week_low").is_some());
        assert!(value.get("avg_close").is_some());
    }

    #[test]
    fn single_bar_stats_are_defined() {
        let stats = summary_stats(&derive(&make_bars(&[42.0])));
        assert_eq!(stats.avg_close, Some(42.0));
    }
}
