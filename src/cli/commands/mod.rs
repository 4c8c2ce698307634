//! CLI command handlers for `gwacalc`.
//!
//! Each command is implemented in its own submodule. Commands that touch
//! calculator state open a session over the configured data directory, run
//! one operation and return; the session saves itself after each mutation.

pub mod clear;
pub mod config;
pub mod profile;
pub mod range;
pub mod report;
pub mod subject;
pub mod summary;

use gwa_calc::config::Config;
use gwa_calc::core::storage::FileStore;
use gwa_calc::GwaSession;
use std::io::{self, Write};

/// Session over the file store in the configured data directory
pub fn open_session(config: &Config) -> GwaSession<FileStore> {
    let data_dir = config.data_dir();
    logger::debug!("Using data directory {}", data_dir.display());
    GwaSession::load(
        FileStore::new(data_dir),
        config.academic_structure(),
        config.grading_bounds(),
    )
}

/// Ask a y/n question on stdin; anything but y/yes is a no
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    if io::stdin().read_line(&mut response).is_err() {
        return false;
    }

    let answer = response.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
