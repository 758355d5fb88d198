//! Check command - verify one claim and print the report

use clap::Args;

use super::output::{self, OutputFormat};
use super::SharedArgs;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// The claim to verify
    pub claim: String,

    #[command(flatten)]
    pub shared: SharedArgs,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Load the knowledge base, check the claim and print the report
pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    let config = args.shared.load_config()?;
    super::init_logging(&config);

    let (service, _) =
        crate::create_fact_check_service(&config, args.shared.api_key.as_deref()).await?;

    let report = service.check_claim(&args.claim).await?;
    println!("{}", output::render(&report, args.format)?);

    Ok(())
}
