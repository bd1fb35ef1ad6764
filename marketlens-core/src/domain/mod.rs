//! Domain types for MarketLens.

pub mod bar;
pub mod symbol;

pub use bar::{Bar, DerivedBar, Series};
pub use symbol::Symbol;
