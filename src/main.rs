use clap::Parser;
use claim_checker::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => cli::check::run(args).await,
        Command::Interactive(args) => cli::interactive::run(args).await,
        Command::Serve(args) => cli::serve::run(args).await,
    }
}
