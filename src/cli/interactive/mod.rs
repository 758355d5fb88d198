//! Interactive command - read claims from stdin until EOF or `quit`

use std::io::Write;

use anyhow::Context;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use super::output::{self, OutputFormat};
use super::SharedArgs;

/// Claim offered when the user just presses enter
pub const DEFAULT_CLAIM: &str =
    "The Indian government has announced free electricity to all farmers starting July 2025.";

#[derive(Args, Debug, Clone, Default)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub shared: SharedArgs,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Claim(String),
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" => Input::Claim(DEFAULT_CLAIM.to_string()),
        "quit" | "exit" | ":q" => Input::Quit,
        claim => Input::Claim(claim.to_string()),
    }
}

fn prompt(text: &str) -> anyhow::Result<()> {
    print!("{}", text);
    std::io::stdout().flush().context("Failed to flush stdout")
}

/// Run the prompt loop
pub async fn run(args: InteractiveArgs) -> anyhow::Result<()> {
    let config = args.shared.load_config()?;
    super::init_logging(&config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut api_key = args.shared.api_key.clone();
    let judgment = &config.judgment;
    if judgment.needs_api_key() && judgment.resolve_api_key(api_key.as_deref()).is_none() {
        prompt(&format!("Enter {} API key: ", judgment.provider))?;
        api_key = lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string())
            .filter(|key| !key.is_empty());
    }

    let (service, summary) = crate::create_fact_check_service(&config, api_key.as_deref()).await?;
    println!("{}", summary);
    println!("Type a claim and press enter (empty line checks the example claim, `quit` exits).");

    loop {
        prompt(&format!("\nClaim [{}]: ", DEFAULT_CLAIM))?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let claim = match parse_input(&line) {
            Input::Quit => break,
            Input::Claim(claim) => claim,
        };

        println!("Consulting knowledge base...");
        match service.check_claim(&claim).await {
            Ok(report) => println!("{}", output::render(&report, OutputFormat::Pretty)?),
            Err(e) => {
                warn!(error = %e, "Claim check failed");
                eprintln!("Check failed: {}", e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_uses_default_claim() {
        assert_eq!(parse_input("  \n"), Input::Claim(DEFAULT_CLAIM.to_string()));
    }

    #[test]
    fn test_quit_words() {
        assert_eq!(parse_input("quit"), Input::Quit);
        assert_eq!(parse_input(" exit "), Input::Quit);
    }

    #[test]
    fn test_claim_is_trimmed() {
        assert_eq!(
            parse_input("  The sky is green.\n"),
            Input::Claim("The sky is green.".to_string())
        );
    }
}
