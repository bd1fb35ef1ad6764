//! Series loader — raw CSV rows to a clean, metric-enriched series.
//!
//! The sanitation pipeline, in order:
//! 1. resolve the symbol's CSV (case-insensitive against the canonical name)
//! 2. header check — all six required columns must exist (else SchemaError)
//! 3. per-value coercion — a row whose date or close fails to parse is dropped
//! 4. stable sort ascending by date
//! 5. forward/back gap fill (`data::fill`)
//! 6. metric derivation (`metrics::derive`)
//!
//! Duplicate dates are retained in arrival order rather than deduplicated.
//! That makes the ordering invariant non-strict for such sources; the original
//! data feed behaves this way and we preserve it instead of guessing a dedup
//! rule. An empty result is not an error — queries handle zero-length series.

use super::fill::{fill_gaps, PartialBar};
use crate::domain::{Bar, Series, Symbol};
use crate::error::DataError;
use crate::metrics;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The six required source columns, in canonical order.
const REQUIRED_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// Loads and sanitizes one symbol's series from the CSV data directory.
#[derive(Debug, Clone)]
pub struct SeriesLoader {
    data_dir: PathBuf,
}

impl SeriesLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the full cleaned series for a symbol.
    pub fn load(&self, symbol: &Symbol) -> Result<Series, DataError> {
        let path = self.resolve(symbol)?;
        self.load_path(&path, symbol)
    }

    /// Resolve the CSV file backing a symbol.
    ///
    /// Tries the canonical `{SYMBOL}.csv` first, then falls back to a
    /// case-insensitive scan so sources written as `reliance.csv` still match.
    pub fn resolve(&self, symbol: &Symbol) -> Result<PathBuf, DataError> {
        let exact = self.data_dir.join(format!("{symbol}.csv"));
        if exact.is_file() {
            return Ok(exact);
        }

        if let Ok(entries) = std::fs::read_dir(&self.data_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                let is_csv = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
                if !is_csv {
                    continue;
                }
                let stem_matches = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .is_some_and(|s| s.eq_ignore_ascii_case(symbol.as_str()));
                if stem_matches && path.is_file() {
                    return Ok(path);
                }
            }
        }

        Err(DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        })
    }

    /// Load an already-resolved CSV path into a clean series.
    pub fn load_path(&self, path: &Path, symbol: &Symbol) -> Result<Series, DataError> {
        let mut rows = read_rows(path)?;

        // Stable sort: duplicate dates keep their arrival order.
        rows.sort_by_key(|r| r.date);
        fill_gaps(&mut rows);

        // A field can only still be missing if its whole column never parsed;
        // such rows cannot satisfy the clean-bar invariant and are dropped.
        let dropped = rows.iter().filter(|r| !r.is_complete()).count();
        if dropped > 0 {
            debug!(symbol = %symbol, dropped, "dropping rows with unfillable columns");
        }
        let bars: Vec<Bar> = rows
            .into_iter()
            .filter_map(|r| {
                Some(Bar {
                    date: r.date,
                    open: r.open?,
                    high: r.high?,
                    low: r.low?,
                    close: r.close?,
                    volume: r.volume?,
                })
            })
            .collect();

        Ok(Series {
            symbol: symbol.clone(),
            bars: metrics::derive(&bars),
        })
    }
}

/// Read and coerce every row of a source file.
///
/// Column presence is checked against the header; a completely missing column
/// means the source does not meet the minimum contract and the load aborts.
/// Individual unparsable values coerce to `None` and are tolerated.
fn read_rows(path: &Path) -> Result<Vec<PartialBar>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| map_csv_error(e, path))?;

    let headers = reader.headers().map_err(|e| map_csv_error(e, path))?.clone();
    let mut indices = [0usize; 6];
    for (i, column) in REQUIRED_COLUMNS.iter().enumerate() {
        indices[i] = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(column))
            .ok_or_else(|| DataError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            })?;
    }
    let [date_idx, open_idx, high_idx, low_idx, close_idx, volume_idx] = indices;

    let mut rows = Vec::new();
    for record in reader.records() {
        // A ragged record (fewer fields than the header) is a structural
        // defect, not a value defect: abort instead of patching.
        let record = record.map_err(|e| map_csv_error(e, path))?;

        let date = record.get(date_idx).and_then(parse_date);
        let close = record.get(close_idx).and_then(parse_number);

        // Rows without a usable date or close carry no usable observation.
        let (Some(date), Some(_)) = (date, close) else {
            continue;
        };

        rows.push(PartialBar {
            date,
            open: record.get(open_idx).and_then(parse_number),
            high: record.get(high_idx).and_then(parse_number),
            low: record.get(low_idx).and_then(parse_number),
            close,
            volume: record.get(volume_idx).and_then(parse_number),
        });
    }
    Ok(rows)
}

fn map_csv_error(err: csv::Error, path: &Path) -> DataError {
    let detail = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => DataError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => DataError::MalformedRow {
            path: path.to_path_buf(),
            detail,
        },
    }
}

/// Coerce a date cell. Accepts ISO dates, ISO datetimes (date part taken),
/// and US-style `m/d/Y`.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(prefix) = raw.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}

/// Coerce a numeric cell; anything unparsable or non-finite is absent.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
