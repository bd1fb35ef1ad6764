//! Bar — the fundamental market data unit.

use super::Symbol;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Clean OHLCV bar for a single symbol on a single day.
///
/// Every field is fully populated: the loader drops rows whose date or close
/// cannot be coerced and forward/back-fills the remaining gaps before a `Bar`
/// is ever constructed. Filled values are estimates, not observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A `Bar` plus the per-bar derived metrics.
///
/// `daily_return` and `volatility30` are `None` when the metric is undefined
/// for this bar (zero open, or fewer than two defined returns in the window).
/// Absence is explicit; it never degrades to zero or NaN, and aggregate math
/// excludes absent values instead of propagating them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedBar {
    #[serde(flatten)]
    pub bar: Bar,
    /// (close − open) / open for this same bar; `None` when open is zero.
    pub daily_return: Option<f64>,
    /// Mean close over the trailing window of up to 7 bars ending here.
    #[serde(rename = "MA7")]
    pub ma7: f64,
    /// Sample stddev of daily returns over the trailing 30-bar window;
    /// `None` with fewer than two defined observations.
    pub volatility30: Option<f64>,
}

/// Ordered sequence of derived bars for one symbol.
///
/// Produced fresh on each load and never mutated afterwards. Bars are sorted
/// ascending by date; duplicate dates, if the source contains them, are kept
/// in arrival order (a preserved quirk of the source format — see the loader).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub symbol: Symbol,
    pub bars: Vec<DerivedBar>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Close of the most recent bar, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.bar.close)
    }
}
