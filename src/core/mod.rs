//! Core calculator functionality shared by every front end

pub mod config;
pub mod metrics;
pub mod models;
pub mod range_filter;
pub mod report;
pub mod session;
pub mod storage;
pub mod validation;

/// Returns the current version of the `gwa-calc` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
