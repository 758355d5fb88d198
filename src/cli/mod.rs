//! CLI module for the claim checker
//!
//! Subcommands:
//! - `check`: verify one claim and print the report
//! - `interactive`: prompt for claims in a loop
//! - `serve`: expose the checker over HTTP

pub mod check;
pub mod interactive;
pub mod output;
pub mod serve;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Claim Checker - judge claims against a small fact corpus
#[derive(Parser)]
#[command(name = "claim-checker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a single claim
    Check(check::CheckArgs),

    /// Check claims typed at a prompt
    Interactive(interactive::InteractiveArgs),

    /// Run the HTTP API
    Serve(serve::ServeArgs),
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct SharedArgs {
    /// CSV knowledge base with `id` and `text` columns
    #[arg(long, value_name = "PATH")]
    pub facts: Option<PathBuf>,

    /// API key for the judgment model (overrides the environment)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

impl SharedArgs {
    /// Load layered configuration and apply command-line overrides
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        dotenvy::dotenv().ok();

        let mut config = AppConfig::load().context("Failed to load configuration")?;
        if let Some(path) = &self.facts {
            config.knowledge_base.path = path.clone();
        }

        Ok(config)
    }
}

pub(crate) fn init_logging(config: &AppConfig) {
    logging::init_logging(&config.logging);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "claim-checker",
            "check",
            "The sky is green.",
            "--facts",
            "data/facts.csv",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.claim, "The sky is green.");
                assert_eq!(args.shared.facts, Some(PathBuf::from("data/facts.csv")));
                assert_eq!(args.format, output::OutputFormat::Json);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_serve_port() {
        let cli = Cli::try_parse_from(["claim-checker", "serve", "--port", "9000"]).unwrap();

        match cli.command {
            Command::Serve(args) => assert_eq!(args.port, Some(9000)),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_check_requires_claim() {
        assert!(Cli::try_parse_from(["claim-checker", "check"]).is_err());
    }
}
