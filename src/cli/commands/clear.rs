//! Clear command handler

use super::{confirm, open_session};
use gwa_calc::config::Config;

/// Wipe all calculator data after confirmation
pub fn run(config: &Config, skip_confirmation: bool) {
    let mut session = open_session(config);

    if !session.has_data() {
        println!("No data to clear.");
        return;
    }

    if !skip_confirmation
        && !confirm("Are you sure you want to clear all data? This cannot be undone.")
    {
        println!("✗ Clear cancelled");
        return;
    }

    if session.clear_all() {
        println!("✓ All data cleared");
    }
}
