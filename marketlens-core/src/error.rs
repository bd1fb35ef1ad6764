//! Structured error types for the data pipeline.
//!
//! Two classes matter at the boundary: "symbol not found" (recoverable by the
//! caller) and "schema violation" (the source does not meet the minimum
//! contract — never silently patched). Everything else is infrastructure.
//!
//! Note what is NOT here: an empty series and an uncomputable metric are not
//! errors. They are `Option`-typed absences in the domain model, and every
//! consumer is required to produce well-defined output from them.

use std::path::PathBuf;
use thiserror::Error;

/// Structured error types for catalog, loader, and query operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// No data source exists for this symbol (case-insensitive match).
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    /// A compare query where at least one of the two symbols has no source.
    /// Reported as a single combined condition, not per-symbol.
    #[error("one of the symbols not found")]
    PairNotFound,

    /// A required column is entirely absent from the source header.
    #[error("missing required column '{column}' in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A row is structurally broken (fewer fields than the header declares).
    /// Distinct from a single unparsable value, which is coerced and tolerated.
    #[error("malformed source {path}: {detail}")]
    MalformedRow { path: PathBuf, detail: String },

    /// Filesystem failure reading the data directory or a source file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DataError {
    /// True for the "symbol not found" class (404 at the transport boundary).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DataError::SymbolNotFound { .. } | DataError::PairNotFound
        )
    }

    /// True for the "source violates the minimum contract" class
    /// (bad request / data error at the transport boundary).
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            DataError::MissingColumn { .. } | DataError::MalformedRow { .. }
        )
    }
}
