//! Command-line interface for the helpdesk backend.

pub mod commands;

use clap::{Parser, Subcommand};

/// Helpdesk - ticket tracking backend
#[derive(Parser)]
#[command(name = "helpdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Write a default config.toml in the current directory
    Init,

    /// Canonicalize a status token and print the result
    Status {
        /// Status to canonicalize, e.g. "in-progress" or "OPEN"
        #[arg(required = true)]
        input: Vec<String>,
    },

    /// List stored tickets
    #[command(alias = "ls")]
    Tickets,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_joins_words() {
        let cli = Cli::try_parse_from(["helpdesk", "status", "in", "progress"]).unwrap();
        match cli.command {
            Some(Commands::Status { input }) => assert_eq!(input.join(" "), "in progress"),
            _ => panic!("expected status command"),
        }
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["helpdesk"]).unwrap();
        assert!(cli.command.is_none());
    }
}
