//! Command-line argument definitions.

use crate::constants::{API_KEY_ENV, DEFAULT_MODEL, DEFAULT_TICK_RATE};
use clap::{Parser, Subcommand};

/// driftvpn - Simulated VPN client for the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Subcommand to execute (starts the dashboard when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// API key for AI server suggestions
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Completion model used for AI server suggestions
    #[arg(long, default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Dashboard refresh rate in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    pub tick_rate: u64,
}

/// Available CLI commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List the server catalog
    Servers {
        /// Only show servers whose country or city contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Ask the AI for the best server for a request
    Suggest {
        /// What the connection is for, e.g. "fastest server for gaming in EU"
        #[arg(required = true)]
        query: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_starts_dashboard() {
        let args = Args::try_parse_from(["driftvpn"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.model, DEFAULT_MODEL);
        assert_eq!(args.tick_rate, DEFAULT_TICK_RATE);
    }

    #[test]
    fn test_servers_filter() {
        let args = Args::try_parse_from(["driftvpn", "servers", "-f", "tok"]).unwrap();
        assert_eq!(
            args.command,
            Some(Commands::Servers {
                filter: Some("tok".to_string())
            })
        );
    }

    #[test]
    fn test_suggest_joins_unquoted_words() {
        let args =
            Args::try_parse_from(["driftvpn", "suggest", "gaming", "in", "EU", "--model", "m"])
                .unwrap();
        let Some(Commands::Suggest { query }) = args.command else {
            panic!("expected suggest");
        };
        assert_eq!(query.join(" "), "gaming in EU");
        assert_eq!(args.model, "m");
    }

    #[test]
    fn test_suggest_requires_query() {
        assert!(Args::try_parse_from(["driftvpn", "suggest"]).is_err());
    }

    #[test]
    fn test_api_key_flag() {
        let args = Args::try_parse_from(["driftvpn", "--api-key", "secret"]).unwrap();
        assert_eq!(args.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_api_key_reads_shared_env_name() {
        use clap::CommandFactory;

        let cmd = Args::command();
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id() == "api_key")
            .unwrap();
        assert_eq!(
            arg.get_env().and_then(|e| e.to_str()),
            Some(API_KEY_ENV)
        );
    }
}
