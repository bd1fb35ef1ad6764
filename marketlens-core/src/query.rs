//! Query service — the four supported read operations.
//!
//! Each operation is a stateless pure function of the current external data:
//! list symbols, tail window, summary, and two-symbol compare. Every call
//! loads its series fresh and owns it privately, so concurrent queries need
//! no coordination. The optional series cache changes only the amount of
//! work, never the result.

use crate::data::{SeriesCache, SeriesLoader, SymbolCatalog};
use crate::domain::{DerivedBar, Series, Symbol};
use crate::error::DataError;
use crate::metrics::{summary_stats, SummaryStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Bars looked back for the compare percentage change.
pub const COMPARE_LOOKBACK: usize = 30;

/// Default tail window when the caller does not specify one.
pub const DEFAULT_TAIL: usize = 30;

/// `Tail` result: the trailing bars plus series-wide summary stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailReport {
    pub symbol: Symbol,
    pub bars: Vec<DerivedBar>,
    pub summary: SummaryStats,
}

/// `Summary` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub symbol: Symbol,
    #[serde(flatten)]
    pub stats: SummaryStats,
}

/// One side of a `Compare` result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparePoint {
    /// Close of the most recent bar; absent for an empty series.
    pub last_close: Option<f64>,
    /// Change vs the close 30 bars earlier; absent when the series is too
    /// short for that index to exist (or the base close is zero).
    pub pct_30: Option<f64>,
}

impl ComparePoint {
    fn of(series: &Series) -> Self {
        Self {
            last_close: series.last_close(),
            pct_30: pct_change(&series.bars, COMPARE_LOOKBACK),
        }
    }
}

/// `Compare` result: canonical symbol → point, for both requested symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompareReport {
    pub entries: BTreeMap<String, ComparePoint>,
}

/// Percentage change of the last close vs the close `lookback` bars earlier.
fn pct_change(bars: &[DerivedBar], lookback: usize) -> Option<f64> {
    let last = bars.last()?.bar.close;
    let base_index = bars.len().checked_sub(lookback + 1)?;
    let base = bars[base_index].bar.close;
    if base == 0.0 {
        return None;
    }
    let pct = (last - base) / base;
    pct.is_finite().then_some(pct)
}

/// Composes catalog, loader, and metrics into the four queries.
pub struct QueryService {
    catalog: SymbolCatalog,
    loader: SeriesLoader,
    cache: Option<SeriesCache>,
}

impl QueryService {
    /// Service that recomputes every series from scratch per call.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            catalog: SymbolCatalog::new(&data_dir),
            loader: SeriesLoader::new(&data_dir),
            cache: None,
        }
    }

    /// Service with the fingerprint-keyed series cache enabled.
    pub fn with_cache(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache: Some(SeriesCache::new()),
            ..Self::new(data_dir)
        }
    }

    /// Every symbol with a data source, lexicographically ascending.
    pub fn list_symbols(&self) -> Result<Vec<Symbol>, DataError> {
        self.catalog.list()
    }

    /// The last `min(n, len)` derived bars in ascending date order, with the
    /// series-wide summary attached as a side payload.
    pub fn tail(&self, symbol: &str, n: usize) -> Result<TailReport, DataError> {
        let symbol = Symbol::new(symbol);
        let series = self.series(&symbol)?;
        let bars = series.bars[series.len().saturating_sub(n)..].to_vec();
        debug!(symbol = %symbol, returned = bars.len(), total = series.len(), "tail query");
        Ok(TailReport {
            summary: summary_stats(&series.bars),
            symbol,
            bars,
        })
    }

    /// Summary statistics over the whole series.
    pub fn summary(&self, symbol: &str) -> Result<SummaryReport, DataError> {
        let symbol = Symbol::new(symbol);
        let series = self.series(&symbol)?;
        Ok(SummaryReport {
            stats: summary_stats(&series.bars),
            symbol,
        })
    }

    /// Compare two symbols: last close and 30-bar change for each.
    ///
    /// A missing symbol on either side surfaces as the combined
    /// `PairNotFound`, not a per-symbol error.
    pub fn compare(&self, first: &str, second: &str) -> Result<CompareReport, DataError> {
        let first = Symbol::new(first);
        let second = Symbol::new(second);
        let series_a = self.series(&first).map_err(combine_not_found)?;
        let series_b = self.series(&second).map_err(combine_not_found)?;

        let mut entries = BTreeMap::new();
        entries.insert(first.into_string(), ComparePoint::of(&series_a));
        entries.insert(second.into_string(), ComparePoint::of(&series_b));
        Ok(CompareReport { entries })
    }

    fn series(&self, symbol: &Symbol) -> Result<Arc<Series>, DataError> {
        match &self.cache {
            Some(cache) => {
                let path = self.loader.resolve(symbol)?;
                cache.get_or_load(symbol.as_str(), &path, || {
                    self.loader.load_path(&path, symbol)
                })
            }
            None => Ok(Arc::new(self.loader.load(symbol)?)),
        }
    }
}

fn combine_not_found(err: DataError) -> DataError {
    match err {
        DataError::SymbolNotFound { .. } => DataError::PairNotFound,
        other => other,
    }
}
