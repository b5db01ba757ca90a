//! Runtime settings resolved from the command line and environment.

use crate::cli::args::Args;
use crate::suggest::GeminiClient;

/// Fastest accepted dashboard refresh, in milliseconds.
const MIN_TICK_RATE: u64 = 10;
/// Slowest accepted dashboard refresh, in milliseconds.
const MAX_TICK_RATE: u64 = 1000;

/// Settings shared by the dashboard and the CLI subcommands.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Suggestion API credential, if any.
    pub api_key: Option<String>,
    /// Completion model name.
    pub model: String,
    /// Dashboard refresh rate in milliseconds.
    pub tick_rate: u64,
}

impl Settings {
    /// Builds settings from parsed arguments.
    ///
    /// The tick rate is clamped so stage changes are never observed more
    /// than a second late.
    pub fn from_args(args: &Args) -> Self {
        Self {
            api_key: args.api_key.clone(),
            model: args.model.clone(),
            tick_rate: args.tick_rate.clamp(MIN_TICK_RATE, MAX_TICK_RATE),
        }
    }

    /// Completion client for these settings.
    pub fn provider(&self) -> GeminiClient {
        GeminiClient::new(self.api_key.clone(), self.model.clone())
    }
}
