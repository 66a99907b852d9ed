//! Nearest large airport for every US postal code.
//!
//! Airports and postal codes are partitioned by state, every postal code is
//! matched against the in-scope airports of its own state by great-circle
//! distance, and the results are written as per-postal-code, per-state and
//! combined CSV tables.

pub mod config;
pub mod distance;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod partition;
pub mod pipeline;
pub mod resolver;
pub mod runner;
pub mod writer;

pub use error::MatchError;
pub use pipeline::{run, RunConfig, RunSummary};
