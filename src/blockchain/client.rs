//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint with the resolved signer
//! - Verify the chain ID when one is configured
//! - Submit the contract-creation transaction
//! - Query receipts, block height and the deployed contract's `name()`
//! - Bound every request by the configured RPC timeout

use std::future::IntoFuture;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use tokio::time::timeout;

use crate::blockchain::types::{ChainId, DeployError, DeployResult, SignerKind};
use crate::blockchain::wallet::{Wallet, PRIVATE_KEY_ENV_VAR};
use crate::config::NetworkConfig;
use crate::contract::TokenMetadata;

/// RPC client bound to one network and one signer.
#[derive(Clone)]
pub struct BlockchainClient {
    provider: DynProvider,
    config: NetworkConfig,
    deployer: Address,
    signer_kind: SignerKind,
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Connect to a network.
    ///
    /// With a local `wallet` the provider signs transactions itself.
    /// Without one, the first account the node reports (`eth_accounts`) is
    /// used and the node signs.
    pub async fn connect(config: NetworkConfig, wallet: Option<Wallet>) -> DeployResult<Self> {
        let timeout_duration = config.rpc_timeout();
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            DeployError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let (provider, deployer, signer_kind) = match wallet {
            Some(wallet) => {
                let deployer = wallet.address();
                let provider = ProviderBuilder::new()
                    .wallet(wallet.into_signer())
                    .connect_http(url)
                    .erased();
                (provider, deployer, SignerKind::Local)
            }
            None => {
                // The node signs, so it also fills nonce, gas and fees.
                let provider = ProviderBuilder::new()
                    .disable_recommended_fillers()
                    .connect_http(url)
                    .erased();
                let accounts =
                    with_timeout(timeout_duration, "eth_accounts", provider.get_accounts()).await?;
                let deployer = accounts.first().copied().ok_or(DeployError::NoSigner {
                    env_var: PRIVATE_KEY_ENV_VAR,
                })?;
                (provider, deployer, SignerKind::Node)
            }
        };

        let client = Self {
            provider,
            config,
            deployer,
            signer_kind,
            timeout_duration,
        };

        if let Some(expected) = client.config.chain_id {
            client.verify_chain_id(expected).await?;
        }

        tracing::info!(
            rpc_url = %client.config.rpc_url,
            deployer = %client.deployer,
            signer = ?client.signer_kind,
            "Blockchain client initialized"
        );

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self, expected: u64) -> DeployResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != expected {
            return Err(DeployError::ChainMismatch {
                expected,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> DeployResult<ChainId> {
        self.rpc("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> DeployResult<u64> {
        self.rpc("eth_blockNumber", self.provider.get_block_number())
            .await
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> DeployResult<Option<TransactionReceipt>> {
        self.rpc(
            "eth_getTransactionReceipt",
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await
    }

    /// Submit a contract-creation transaction and return its hash.
    ///
    /// Nonce, gas and fees are filled by the provider (or by the node for
    /// node-managed accounts).
    pub async fn send_deployment(&self, bytecode: Bytes) -> DeployResult<TxHash> {
        let tx = TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(bytecode);

        let pending = self
            .rpc("send_transaction", self.provider.send_transaction(tx))
            .await?;
        Ok(*pending.tx_hash())
    }

    /// Call `name()` on a deployed contract.
    pub async fn token_name(&self, address: Address) -> DeployResult<String> {
        let token = TokenMetadata::new(address, self.provider.clone());
        let call = token.name();
        match timeout(self.timeout_duration, call.call()).await {
            Ok(Ok(name)) => Ok(name),
            Ok(Err(e)) => Err(DeployError::Call {
                function: "name()",
                address,
                reason: e.to_string(),
            }),
            Err(_) => Err(DeployError::Timeout {
                operation: "eth_call",
                seconds: self.timeout_duration.as_secs(),
            }),
        }
    }

    /// Address that signs the deployment.
    pub fn deployer(&self) -> Address {
        self.deployer
    }

    pub fn signer_kind(&self) -> SignerKind {
        self.signer_kind
    }

    /// Get the configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    async fn rpc<F, T, E>(&self, operation: &'static str, fut: F) -> DeployResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        with_timeout(self.timeout_duration, operation, fut).await
    }
}

/// Run one RPC request under a deadline.
async fn with_timeout<F, T, E>(
    timeout_duration: Duration,
    operation: &'static str,
    fut: F,
) -> DeployResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    match timeout(timeout_duration, fut).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => {
            tracing::warn!(operation, error = %e, "RPC error");
            Err(DeployError::Rpc(format!("{} failed: {}", operation, e)))
        }
        Err(_) => {
            tracing::warn!(operation, "RPC timeout");
            Err(DeployError::Timeout {
                operation,
                seconds: timeout_duration.as_secs(),
            })
        }
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("deployer", &self.deployer)
            .field("signer_kind", &self.signer_kind)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
