//! AI-assisted server suggestions.
//!
//! A free-text request ("fastest server for gaming in EU") is turned into an
//! instruction prompt, sent once to a text-completion backend, and the answer
//! is mapped back onto the country list. Answers outside the list fall back to
//! the first country instead of failing.
//!
//! The backend sits behind [`CompletionProvider`]; [`GeminiClient`] is the
//! production implementation. [`spawn_resolver`] runs a resolution on a
//! background thread so the dashboard keeps rendering while it waits.

use crate::constants::{
    API_KEY_HEADER, APP_NAME, APP_VERSION, COMPLETION_API_BASE, FALLBACK_COUNTRY,
    HTTP_TIMEOUT_SECS,
};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Reasons a suggestion could not be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SuggestError {
    /// The request was blank; nothing was sent.
    #[error("Describe what you need first")]
    EmptyQuery,
    /// No credential is configured; nothing was sent.
    #[error("Suggestion API key is not configured (set API_KEY)")]
    MissingApiKey,
    /// The backend failed or answered with something unusable.
    #[error("Suggestion unavailable: {0}")]
    Unavailable(String),
}

/// Text-in, text-out completion backend.
pub trait CompletionProvider {
    /// Returns the backend's raw answer to `prompt`.
    ///
    /// # Errors
    ///
    /// [`SuggestError::MissingApiKey`] when no credential is configured,
    /// [`SuggestError::Unavailable`] for transport or service failures.
    fn complete(&self, prompt: &str) -> Result<String, SuggestError>;
}

/// Outcome of a successful resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Suggestion {
    /// The answer named a listed country.
    Matched(String),
    /// The answer was not in the list; `country` is the fallback.
    Fallback {
        /// Cleaned answer from the backend.
        answer: String,
        /// Country used instead.
        country: String,
    },
}

impl Suggestion {
    /// The country to select.
    pub fn country(&self) -> &str {
        match self {
            Self::Matched(country) | Self::Fallback { country, .. } => country,
        }
    }
}

/// Resolves `query` to one entry of `countries`.
///
/// # Errors
///
/// [`SuggestError::EmptyQuery`] for a blank query (the provider is not
/// called), otherwise whatever the provider fails with.
pub fn resolve<P>(provider: &P, query: &str, countries: &[&str]) -> Result<Suggestion, SuggestError>
where
    P: CompletionProvider + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Err(SuggestError::EmptyQuery);
    }

    let raw = provider.complete(&build_prompt(query, countries))?;
    let answer = clean_answer(&raw);
    let needle = answer.to_lowercase();

    if let Some(country) = countries.iter().find(|c| c.to_lowercase() == needle) {
        return Ok(Suggestion::Matched((*country).to_string()));
    }

    let country = countries.first().copied().unwrap_or(FALLBACK_COUNTRY);
    Ok(Suggestion::Fallback {
        answer,
        country: country.to_string(),
    })
}

/// Builds the instruction sent to the backend.
pub fn build_prompt(query: &str, countries: &[&str]) -> String {
    format!(
        "You are an intelligent VPN server recommendation assistant.\n\
         Based on the user's request, suggest the single best country from the provided list.\n\
         Your response MUST be ONLY the name of the country from the list, \
         with no additional text, explanation, or punctuation.\n\
         \n\
         User Request: \"{query}\"\n\
         \n\
         Available Countries:\n\
         {}\n\
         \n\
         Your Answer (just the country name):",
        countries.join(", ")
    )
}

/// Keeps only ASCII letters and whitespace, then trims.
pub fn clean_answer(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Runs [`resolve`] on a background thread.
///
/// # Returns
///
/// A receiver that yields exactly one result. If the worker dies the channel
/// disconnects without a value.
pub fn spawn_resolver(
    provider: Arc<dyn CompletionProvider + Send + Sync>,
    query: String,
    countries: Vec<&'static str>,
) -> Receiver<Result<Suggestion, SuggestError>> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = resolve(provider.as_ref(), &query, &countries);
        let _ = tx.send(result);
    });

    rx
}

// === Gemini backend ===

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

impl GenerateRequest {
    fn new(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated, trimmed text of the first candidate.
    ///
    /// `None` only when there is no candidate content; blank text is kept so
    /// the resolver falls back like any other unusable answer.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        Some(text.trim().to_string())
    }
}

/// Google Gemini `generateContent` client.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    /// Creates a client. A blank key counts as missing.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
        }
    }

    /// Returns `true` if a credential is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Model the client asks.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{COMPLETION_API_BASE}/{}:generateContent", self.model)
    }
}

impl CompletionProvider for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String, SuggestError> {
        let api_key = self.api_key.as_deref().ok_or(SuggestError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(format!("{APP_NAME}/{APP_VERSION}"))
            .build()
            .map_err(|e| SuggestError::Unavailable(format!("HTTP client: {e}")))?;

        let response = client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateRequest::new(prompt))
            .send()
            .map_err(|e| SuggestError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestError::Unavailable(format!("server returned {status}")));
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| SuggestError::Unavailable(format!("malformed response: {e}")))?;

        body.text()
            .ok_or_else(|| SuggestError::Unavailable("empty response".to_string()))
    }
}
