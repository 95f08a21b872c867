//! Shared setup for the anvil-backed deployment tests.

use alloy::{
    node_bindings::{Anvil, AnvilInstance},
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use helpers::DeployerSetup;

/// Spawn a local anvil node and wrap its first funded account as the deployer.
///
/// The instance is returned alongside the setup so the node stays alive for
/// the duration of the test.
pub fn setup_anvil_deployer() -> anyhow::Result<(AnvilInstance, DeployerSetup)> {
    let anvil = Anvil::new().try_spawn()?;
    let signer: PrivateKeySigner = anvil.keys()[0].clone().into();
    let deployer = signer.address();
    let provider = ProviderBuilder::new()
        .wallet(signer)
        .connect_http(anvil.endpoint_url())
        .erased();
    Ok((anvil, DeployerSetup { provider, deployer }))
}
