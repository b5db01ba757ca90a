//! Application-wide constants and configuration values.
//!
//! This module defines all static configuration values used throughout driftvpn,
//! including stage timings, simulated telemetry ranges, API endpoints, and UI messages.

use std::time::Duration;

// === Application Metadata ===

/// Application name used in the header and user agent.
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version from Cargo.toml.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Timing Configuration ===

/// UI refresh rate in milliseconds.
///
/// Finer than the session periods so the 1.2s rate sampler is observed on time.
pub const DEFAULT_TICK_RATE: u64 = 100;
/// Time spent in each transient connection stage.
pub const STAGE_DWELL: Duration = Duration::from_secs(1);
/// Elapsed-time counter period.
pub const ELAPSED_TICK: Duration = Duration::from_secs(1);
/// Rate sampler period.
pub const RATE_SAMPLE_PERIOD: Duration = Duration::from_millis(1200);
/// Time the simulated browser takes to "load" a destination.
pub const BROWSE_DWELL: Duration = Duration::from_millis(1500);
/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);
/// Maximum number of activity log lines kept in memory.
pub const MAX_LOG_LINES: usize = 1000;

// === Simulated Telemetry ===

/// Download rate bounds in Mbps (inclusive).
pub const DOWNLOAD_RANGE: (f64, f64) = (20.0, 95.0);
/// Upload rate bounds in Mbps (inclusive).
pub const UPLOAD_RANGE: (f64, f64) = (5.0, 25.0);
/// Unit suffix for simulated rates.
pub const RATE_UNIT: &str = "Mbps";
/// Host octet bounds for the generated session address (inclusive).
pub const HOST_OCTET_RANGE: (u8, u8) = (1, 253);
/// Elapsed display shown when no session is active.
pub const ELAPSED_ZERO: &str = "00:00:00";

// === Suggestion API ===

/// Environment variable holding the suggestion API credential.
pub const API_KEY_ENV: &str = "API_KEY";
/// Default completion model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Base URL of the completion API; the model and method are appended.
pub const COMPLETION_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Header carrying the API credential.
pub const API_KEY_HEADER: &str = "x-goog-api-key";
/// Timeout for the completion call in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;
/// Country returned when the model answer is unusable and the list is empty.
pub const FALLBACK_COUNTRY: &str = "United States";

// === UI Messages ===

/// Backend initialization message.
pub const MSG_BACKEND_INIT: &str = "IO: Loading server catalog...";
/// Ready state message.
pub const MSG_READY: &str = "SUCCESS: Simulator ready. Press [?] for help.";
/// Shown when the suggestion credential is absent at startup.
pub const MSG_NO_API_KEY: &str = "WARN: API_KEY not set. AI suggestions are disabled.";
/// Placeholder for values that only exist while connected.
pub const MSG_NO_DATA: &str = "---";
