//! Input/output helpers.
//!
//! - flattened table exports to CSV (`export`)
//! - figure bundle JSON read/write (`figures`)

pub mod export;
pub mod figures;

pub use export::*;
pub use figures::*;
