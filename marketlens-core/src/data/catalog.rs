//! Symbol catalog — which symbols currently have data.
//!
//! A symbol exists exactly when `{data_dir}/{SYMBOL}.csv` exists. The catalog
//! is a pure enumeration of the directory at call time; an external process
//! populates the files on its own schedule, so consecutive calls may differ.

use crate::domain::Symbol;
use crate::error::DataError;
use std::path::{Path, PathBuf};

/// Enumerates available symbols from the CSV data directory.
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    data_dir: PathBuf,
}

impl SymbolCatalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// List every symbol with a data source, lexicographically ascending.
    ///
    /// File stems canonicalize to uppercase, so `reliance.csv` and
    /// `RELIANCE.csv` are one symbol. Failure to read the directory is an
    /// infrastructure failure and propagates.
    pub fn list(&self) -> Result<Vec<Symbol>, DataError> {
        let entries = std::fs::read_dir(&self.data_dir).map_err(|source| DataError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DataError::Io {
                path: self.data_dir.clone(),
                source,
            })?;
            let path = entry.path();
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if !is_csv || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                symbols.push(Symbol::new(stem));
            }
        }

        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}
