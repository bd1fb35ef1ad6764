//! Data access: symbol discovery, series loading, gap filling, optional cache.

pub mod cache;
pub mod catalog;
pub mod fill;
pub mod loader;

pub use cache::{SeriesCache, SourceFingerprint};
pub use catalog::SymbolCatalog;
pub use fill::{fill_gaps, PartialBar};
pub use loader::SeriesLoader;
