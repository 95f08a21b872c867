//! Deploys the StarshipTicket game pass with the Arbitrum Nova parameters.

use helpers::{deploy_ticket, setup_deployer, TicketParams};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        // Stdout carries only the report; diagnostics go to stderr.
        .with_writer(std::io::stderr)
        .init();

    let setup = setup_deployer()?;
    let report = deploy_ticket(&setup, TicketParams::arbitrum_nova()).await?;
    println!("{report}");
    Ok(())
}
