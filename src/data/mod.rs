//! Data acquisition: World Bank API client and table flattening.

pub mod tables;
pub mod worldbank;

pub use tables::*;
pub use worldbank::*;
