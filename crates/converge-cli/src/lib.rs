//! converge-cli library root.
//!
//! Re-exports the binary's modules so integration tests can exercise
//! argument parsing and config loading without touching AWS.

pub mod aws;
pub mod cli;
pub mod config;
pub mod report;
