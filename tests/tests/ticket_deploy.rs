use alloy::{primitives::U256, providers::Provider};
use helpers::{deploy_ticket, TicketParams};
use tests::setup_anvil_deployer;

#[tokio::test]
#[ignore = "requires an anvil binary on PATH"]
async fn deployment_reports_the_balance_delta_as_gas() -> anyhow::Result<()> {
    let (_anvil, setup) = setup_anvil_deployer()?;

    let report = deploy_ticket(&setup, TicketParams::arbitrum_nova()).await?;

    assert_eq!(report.deployer, setup.deployer);
    assert_eq!(report.begin_balance - report.end_balance, report.gas_spent);
    assert!(report.gas_spent > U256::ZERO);

    // The creation transaction must have left code behind.
    let code = setup.provider.get_code_at(report.contract_address).await?;
    assert!(!code.is_empty(), "no code at the reported contract address");
    Ok(())
}

#[tokio::test]
#[ignore = "requires an anvil binary on PATH"]
async fn both_variants_deploy_with_their_own_parameters() -> anyhow::Result<()> {
    let (_anvil, setup) = setup_anvil_deployer()?;

    let one = deploy_ticket(&setup, TicketParams::arbitrum_one()).await?;
    let nova = deploy_ticket(&setup, TicketParams::arbitrum_nova()).await?;

    assert_ne!(one.contract_address, nova.contract_address);
    // The second run starts from the first run's closing balance.
    assert_eq!(nova.begin_balance, one.end_balance);
    Ok(())
}
