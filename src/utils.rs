//! Utility functions for formatting.
//!
//! This module provides helper functions for the fixed-width strings the
//! dashboard and activity log display.

use std::time::Duration;

/// Formats an elapsed duration as zero-padded `HH:MM:SS`.
///
/// Hours are not wrapped into days; a session longer than 99 hours simply
/// shows more hour digits.
///
/// # Example
///
/// ```ignore
/// assert_eq!(format_elapsed(Duration::from_secs(3661)), "01:01:01");
/// ```
pub fn format_elapsed(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Formats a rate in Mbps with exactly two decimals.
pub fn format_rate(mbps: f64) -> String {
    format!("{mbps:.2} {}", crate::constants::RATE_UNIT)
}

/// Truncates a string to a maximum number of characters.
///
/// If the string exceeds `max_chars`, it is truncated and "..." is appended.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}

/// Returns the current local time formatted as HH:MM:SS.
///
/// Uses `std::process` to call `date` command for local time formatting.
pub fn format_local_time() -> String {
    std::process::Command::new("date")
        .arg("+%H:%M:%S")
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "00:00:00".to_string(), |s| s.trim().to_string())
}
