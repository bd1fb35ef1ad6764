//! MarketLens Core — the data pipeline behind the query API.
//!
//! This crate contains everything with real invariants:
//! - Domain types (symbols, bars, derived bars, series)
//! - Symbol catalog (which symbols have data right now)
//! - Series loader (CSV → validated, chronologically ordered, gap-filled series)
//! - Rolling metrics (daily return, MA7, 30-bar volatility, summary stats)
//! - Query service (list / tail / summary / compare)
//!
//! Transport (HTTP routing, status codes) lives in `marketlens-server` and is
//! deliberately thin. Raw data acquisition is an external process that drops
//! per-symbol CSV files into the data directory; this crate only reads them.

pub mod data;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod query;

pub use error::DataError;
