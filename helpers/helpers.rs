//! Common helper functions for deployment scripts and tests

use std::{env, fmt};

use alloy::{
    contract,
    primitives::{
        address,
        utils::format_ether,
        Address, TxHash, U256,
    },
    providers::{DynProvider, PendingTransactionError, Provider, ProviderBuilder},
    signers::local::{LocalSignerError, PrivateKeySigner},
    sol,
    transports::{RpcError, TransportErrorKind},
};
use tracing::debug;
use url::Url;

// Wraps the pre-compiled StarshipTicket artifact with a deployable binding.
// The constructor is (name, symbol, startId, saleStartTime, serverRole, paymentToken).
sol!(
    #[sol(rpc)]
    StarshipTicket,
    "resources/StarshipTicket.json"
);

/// Token name passed to every deployment.
pub const TICKET_NAME: &str = "StarshipTicket";
/// Token symbol passed to every deployment.
pub const TICKET_SYMBOL: &str = "ST";
/// Public sale opening time, shared by both variants (Unix seconds).
pub const SALE_START_TIME: u64 = 1_687_003_200;

pub type DeployResult<T> = Result<T, DeployError>;

#[derive(thiserror::Error, Debug)]
pub enum DeployError {
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),
    #[error("invalid RPC url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid deployer key: {0}")]
    InvalidKey(#[from] LocalSignerError),
    #[error(transparent)]
    Contract(#[from] contract::Error),
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
    #[error(transparent)]
    Confirmation(#[from] PendingTransactionError),
    #[error("deployment transaction {0} reverted")]
    Reverted(TxHash),
    #[error("receipt for deployment transaction {0} carries no contract address")]
    MissingContractAddress(TxHash),
    #[error("deployer balance increased during deployment")]
    BalanceIncreased,
}

/// Constructor arguments for one StarshipTicket deployment variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketParams {
    pub name: String,
    pub symbol: String,
    pub start_id: U256,
    pub sale_start_time: U256,
    pub server_role: String,
    pub payment_token: Address,
}

impl TicketParams {
    /// Parameters for the Arbitrum One deployment.
    pub fn arbitrum_one() -> Self {
        Self {
            start_id: U256::from(1_000_000u64),
            payment_token: address!("0x912CE59144191C1204E64559FE8253a0e49E6548"),
            ..Self::base()
        }
    }

    /// Parameters for the Arbitrum Nova deployment.
    pub fn arbitrum_nova() -> Self {
        Self {
            start_id: U256::ZERO,
            payment_token: address!("0xf823C3cD3CeBE0a1fA952ba88Dc9EEf8e0Bf46AD"),
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            name: TICKET_NAME.to_string(),
            symbol: TICKET_SYMBOL.to_string(),
            start_id: U256::ZERO,
            sale_start_time: U256::from(SALE_START_TIME),
            // Opaque role string, passed through verbatim.
            server_role: String::new(),
            payment_token: Address::ZERO,
        }
    }
}

/// Deployer setup configuration
pub struct DeployerSetup {
    pub provider: DynProvider,
    pub deployer: Address,
}

/// Resolve the deployer from the process environment: JSON-RPC endpoint in
/// `RPC_URL`, funded signing key in `DEPLOYER_PRIVATE_KEY`.
pub fn setup_deployer() -> DeployResult<DeployerSetup> {
    let rpc_url = required_env("RPC_URL")?;
    let private_key = required_env("DEPLOYER_PRIVATE_KEY")?;
    connect_deployer(&rpc_url, &private_key)
}

/// Build a wallet-backed provider from an endpoint URL and a hex private key.
pub fn connect_deployer(rpc_url: &str, private_key: &str) -> DeployResult<DeployerSetup> {
    let url: Url = rpc_url.parse()?;
    let signer: PrivateKeySigner = private_key.parse()?;
    let deployer = signer.address();
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url).erased();
    Ok(DeployerSetup { provider, deployer })
}

fn required_env(key: &'static str) -> DeployResult<String> {
    env::var(key).map_err(|_| DeployError::MissingEnv(key))
}

/// Outcome of a single deployment run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentReport {
    pub deployer: Address,
    pub begin_balance: U256,
    pub contract_address: Address,
    pub end_balance: U256,
    pub gas_spent: U256,
}

impl fmt::Display for DeploymentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deployer: {}", self.deployer)?;
        writeln!(f, "Balance: {}", format_ether(self.begin_balance))?;
        writeln!(f, "GamePass Contract: {}", self.contract_address)?;
        writeln!(f)?;
        writeln!(f, "Latest balance: {}", format_ether(self.end_balance))?;
        write!(f, "Gas: {}", format_ether(self.gas_spent))
    }
}

/// Deploy one StarshipTicket variant and report the balance movement.
///
/// Single attempt: any failure from the provider, the submission, or the
/// receipt propagates to the caller unchanged.
pub async fn deploy_ticket(
    setup: &DeployerSetup,
    params: TicketParams,
) -> DeployResult<DeploymentReport> {
    let begin_balance = setup.provider.get_balance(setup.deployer).await?;

    let pending = StarshipTicket::deploy_builder(
        setup.provider.clone(),
        params.name,
        params.symbol,
        params.start_id,
        params.sale_start_time,
        params.server_role,
        params.payment_token,
    )
    .send()
    .await?;
    debug!("deployment transaction {} sent, awaiting receipt", pending.tx_hash());

    let receipt = pending.get_receipt().await?;
    let tx_hash = receipt.transaction_hash;
    if !receipt.status() {
        return Err(DeployError::Reverted(tx_hash));
    }
    let contract_address = receipt
        .contract_address
        .ok_or(DeployError::MissingContractAddress(tx_hash))?;
    debug!(
        "deployment mined in block {:?} using {} gas",
        receipt.block_number, receipt.gas_used
    );

    let end_balance = setup.provider.get_balance(setup.deployer).await?;
    let gas_spent = gas_spent(begin_balance, end_balance)?;

    Ok(DeploymentReport {
        deployer: setup.deployer,
        begin_balance,
        contract_address,
        end_balance,
        gas_spent,
    })
}

// Gas spent is the balance delta; assumes no concurrent transactions from
// the same signer, so a negative delta is an anomaly rather than a refund.
fn gas_spent(begin_balance: U256, end_balance: U256) -> DeployResult<U256> {
    begin_balance
        .checked_sub(end_balance)
        .ok_or(DeployError::BalanceIncreased)
}
