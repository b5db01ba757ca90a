//! Simulated "secure browser".
//!
//! A destination typed while connected "loads" for a fixed dwell and then
//! yields a confirmation naming the exit country. No request is ever sent.

use crate::constants::BROWSE_DWELL;
use crate::timer::Deadline;
use std::time::Instant;
use thiserror::Error;
use url::Url;

/// Reasons a destination is rejected before the simulated load starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrowseError {
    /// Nothing was typed.
    #[error("Enter a website to visit")]
    EmptyDestination,
    /// The text does not form a URL.
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),
    /// A previous destination is still loading.
    #[error("Page is still loading")]
    Busy,
    /// Browsing is only simulated inside an active session.
    #[error("Connect before browsing")]
    NotConnected,
}

/// Progress of the simulated browser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BrowseState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A destination is loading.
    Loading {
        /// Normalized destination.
        url: String,
        /// When the load completes.
        due: Deadline,
    },
    /// The last destination loaded.
    Done {
        /// Confirmation shown to the user.
        message: String,
    },
}

/// Per-session browser simulation.
#[derive(Clone, Debug, Default)]
pub struct Browser {
    state: BrowseState,
}

impl Browser {
    /// Starts loading `input`, returning the normalized destination.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError`] for empty or malformed input, or while a
    /// previous load is in progress. The browser state is unchanged on error.
    pub fn request(&mut self, input: &str, now: Instant) -> Result<String, BrowseError> {
        if self.is_loading() {
            return Err(BrowseError::Busy);
        }
        let url = normalize_destination(input)?;
        self.state = BrowseState::Loading {
            url: url.clone(),
            due: Deadline::after(now, BROWSE_DWELL),
        };
        Ok(url)
    }

    /// Completes a due load, returning the confirmation message once.
    pub fn advance(&mut self, now: Instant, country: &str) -> Option<String> {
        let BrowseState::Loading { url, due } = &self.state else {
            return None;
        };
        if !due.is_due(now) {
            return None;
        }

        let message = format!("✅ Successfully accessed {url} via {country}.");
        self.state = BrowseState::Done {
            message: message.clone(),
        };
        Some(message)
    }

    /// Returns `true` while a destination is loading.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, BrowseState::Loading { .. })
    }

    /// Current state.
    pub fn state(&self) -> &BrowseState {
        &self.state
    }
}

/// Trims the input and prefixes `https://` unless it already carries an http(s) scheme.
///
/// # Errors
///
/// Returns [`BrowseError::EmptyDestination`] for blank input and
/// [`BrowseError::InvalidDestination`] when the result does not parse as a URL.
pub fn normalize_destination(input: &str) -> Result<String, BrowseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BrowseError::EmptyDestination);
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    match Url::parse(&candidate) {
        Ok(url) if url.host_str().is_some() => Ok(candidate),
        _ => Err(BrowseError::InvalidDestination(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_normalize_adds_scheme() {
        assert_eq!(
            normalize_destination("example.com").as_deref(),
            Ok("https://example.com")
        );
        assert_eq!(
            normalize_destination("  example.com/path ").as_deref(),
            Ok("https://example.com/path")
        );
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(
            normalize_destination("http://example.com").as_deref(),
            Ok("http://example.com")
        );
    }

    #[test]
    fn test_normalize_host_starting_with_http() {
        assert_eq!(
            normalize_destination("httpbin.org").as_deref(),
            Ok("https://httpbin.org")
        );
    }

    #[test]
    fn test_normalize_rejects_blank() {
        assert_eq!(normalize_destination("   "), Err(BrowseError::EmptyDestination));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(matches!(
            normalize_destination("exa mple"),
            Err(BrowseError::InvalidDestination(_))
        ));
    }

    #[test]
    fn test_load_completes_after_dwell() {
        let t0 = Instant::now();
        let mut b = Browser::default();
        b.request("example.com", t0).unwrap();
        assert!(b.is_loading());

        assert_eq!(b.advance(t0 + Duration::from_millis(1499), "Germany"), None);
        let msg = b.advance(t0 + BROWSE_DWELL, "Germany").unwrap();
        assert_eq!(msg, "✅ Successfully accessed https://example.com via Germany.");
        assert!(!b.is_loading());

        // Reported only once
        assert_eq!(b.advance(t0 + Duration::from_secs(5), "Germany"), None);
    }

    #[test]
    fn test_request_while_loading_is_rejected() {
        let t0 = Instant::now();
        let mut b = Browser::default();
        b.request("example.com", t0).unwrap();
        assert_eq!(b.request("other.org", t0), Err(BrowseError::Busy));
    }

    #[test]
    fn test_empty_request_leaves_state_untouched() {
        let t0 = Instant::now();
        let mut b = Browser::default();
        assert_eq!(b.request("", t0), Err(BrowseError::EmptyDestination));
        assert_eq!(b.state(), &BrowseState::Idle);
    }
}
