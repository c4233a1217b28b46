//! The deployment run.
//!
//! One signer lookup, one contract-creation transaction, one confirmation
//! wait and one `name()` call. Nothing is retried.

use std::io::Write;

use alloy::primitives::{Address, TxHash};

use crate::blockchain::transaction::wait_for_confirmation;
use crate::blockchain::{BlockchainClient, DeployResult, Deployment, DeploymentReport};
use crate::contract::{Artifacts, ContractFactory};

/// The network operations a deployment run needs.
#[allow(async_fn_in_trait)]
pub trait Chain {
    /// Address of the signer chosen when connecting.
    fn deployer(&self) -> Address;

    /// Submit the contract-creation transaction.
    async fn submit_deployment(&self, factory: &ContractFactory) -> DeployResult<TxHash>;

    /// Block until the deployment is confirmed.
    async fn await_confirmation(&self, tx_hash: TxHash) -> DeployResult<Deployment>;

    /// Read the deployed contract's `name()`.
    async fn token_name(&self, address: Address) -> DeployResult<String>;
}

impl Chain for BlockchainClient {
    fn deployer(&self) -> Address {
        BlockchainClient::deployer(self)
    }

    async fn submit_deployment(&self, factory: &ContractFactory) -> DeployResult<TxHash> {
        self.send_deployment(factory.bytecode().clone()).await
    }

    async fn await_confirmation(&self, tx_hash: TxHash) -> DeployResult<Deployment> {
        wait_for_confirmation(self, tx_hash).await
    }

    async fn token_name(&self, address: Address) -> DeployResult<String> {
        BlockchainClient::token_name(self, address).await
    }
}

/// Deploy `contract_name` and write the summary lines to `out`.
pub async fn run<C, W>(
    chain: &C,
    artifacts: &Artifacts,
    contract_name: &str,
    out: &mut W,
) -> DeployResult<DeploymentReport>
where
    C: Chain,
    W: Write,
{
    let deployer = chain.deployer();
    writeln!(out, "Deploying contracts with the account: {deployer}")?;

    let factory = ContractFactory::load(artifacts, contract_name)?;

    let tx_hash = chain.submit_deployment(&factory).await?;
    tracing::info!(contract = factory.name(), tx_hash = %tx_hash, "Deployment transaction sent");

    let deployment = chain.await_confirmation(tx_hash).await?;
    tracing::info!(
        contract = factory.name(),
        address = %deployment.address,
        block_number = deployment.block_number,
        "Deployment confirmed"
    );
    writeln!(out, "{} deployed to: {}", factory.name(), deployment.address)?;

    let token_name = chain.token_name(deployment.address).await?;
    writeln!(out, "Token name: {token_name}")?;
    out.flush()?;

    Ok(DeploymentReport {
        deployer,
        contract_name: factory.name().to_string(),
        address: deployment.address,
        tx_hash,
        block_number: deployment.block_number,
        token_name,
    })
}
