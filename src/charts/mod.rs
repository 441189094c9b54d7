//! Chart descriptor construction.
//!
//! Responsibilities:
//!
//! - derive the canonical country order from the first indicator
//! - build the six report descriptors in their fixed order
//! - render descriptors as plotly.js figures for the dashboard

pub mod builder;
pub mod plotly;

pub use builder::*;
