//! Core functionality: grading, aggregation, projection, and the record-store boundary

pub mod aggregator;
pub mod api;
pub mod auth;
pub mod config;
pub mod grades;
pub mod models;
pub mod projection;
pub mod report;
pub mod tracker;

/// Returns the current version of the `cgpa-tracker` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
