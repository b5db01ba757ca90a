//! CLI command handlers.

use crate::catalog::{self, ServerLocation, SERVERS};
use crate::cli::args::Commands;
use crate::config::Settings;
use crate::constants::API_KEY_ENV;
use crate::suggest::{self, SuggestError, Suggestion};
use color_eyre::Result;

/// Handles CLI commands that don't require the TUI.
///
/// Returns `true` if the command was handled and the program should exit,
/// or `false` if the TUI should be started.
#[allow(clippy::unnecessary_wraps)]
pub fn handle_command(command: &Commands, settings: &Settings) -> Result<bool> {
    match command {
        Commands::Servers { filter } => {
            handle_servers(filter.as_deref().unwrap_or(""));
            Ok(true)
        }
        Commands::Suggest { query } => {
            handle_suggest(&query.join(" "), settings);
            Ok(true)
        }
    }
}

/// Prints the catalog, optionally filtered.
fn handle_servers(filter: &str) {
    let servers = catalog::filter(SERVERS, filter);
    if servers.is_empty() {
        eprintln!("❌ No servers match \"{filter}\"");
        std::process::exit(1);
    }

    for server in servers {
        println!("{}", format_server_line(server));
    }
}

/// Resolves a free-text request and prints the chosen server.
fn handle_suggest(query: &str, settings: &Settings) {
    let provider = settings.provider();
    let countries = catalog::countries();

    if provider.is_configured() {
        eprintln!("🤖 Asking {} ...", provider.model());
    }

    match suggest::resolve(&provider, query, &countries) {
        Ok(suggestion) => {
            if let Suggestion::Fallback { answer, country } = &suggestion {
                eprintln!("⚠️  Suggested country \"{answer}\" is not in the server list, using {country}");
            }
            match catalog::find_by_country(suggestion.country()) {
                Some(server) => println!("✅ Suggested server: {}", format_server_line(server)),
                None => println!("✅ Suggested country: {}", suggestion.country()),
            }
        }
        Err(SuggestError::MissingApiKey) => {
            eprintln!("❌ {}", SuggestError::MissingApiKey);
            eprintln!("   Set {API_KEY_ENV} or pass --api-key <KEY>.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}

/// One-line catalog entry, e.g. `🇩🇪 Germany, Frankfurt  [193.176.86.x]`.
fn format_server_line(server: &ServerLocation) -> String {
    format!(
        "{} {:<16} {:<14} [{}.x]",
        server.flag,
        format!("{},", server.country),
        server.city,
        server.ip_prefix
    )
}
