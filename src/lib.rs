//! `wb-charts` library crate.
//!
//! The binary (`wbc`) is a thin wrapper around this library so that:
//!
//! - the fetch -> table -> descriptor pipeline is testable without the network
//! - the descriptors can be produced in-process by a web backend
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod charts;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
