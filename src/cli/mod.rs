//! Command-line interface: argument definitions and non-TUI subcommands.

pub mod args;
pub mod commands;
