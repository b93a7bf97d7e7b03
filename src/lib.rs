//! Treemap view for analytics reports.
//!
//! Configures the treemap visualization ([`config::TreemapConfig`]), adapts
//! incoming report requests before data loading ([`visualization::Treemap`]),
//! and shapes the loaded tables into the node tree the client widget renders
//! ([`generator::TreemapDataGenerator`]).

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod period;
pub mod pipeline;
pub mod request;
pub mod table;
pub mod util;
pub mod visualization;

pub use error::{Error, Result};
