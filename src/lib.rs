//! Grade-weighted average calculator library
//!
//! Tracks subject grades over a configurable year/semester structure, computes
//! semester and cumulative GWA, persists state to a key-value store and exports
//! summary reports.

pub mod core;

pub use self::core::config;
pub use self::core::get_version;
pub use self::core::models;
pub use self::core::session::{EditError, GwaSession};
