//! Terminal chart previews.

pub mod ascii;

pub use ascii::*;
