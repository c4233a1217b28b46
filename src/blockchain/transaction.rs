//! Deployment confirmation monitoring.
//!
//! # Responsibilities
//! - Poll for the deployment receipt
//! - Count confirmations (the inclusion block counts as one)
//! - Surface reverts and receipts without a created contract

use alloy::primitives::{Address, TxHash};
use alloy::rpc::types::TransactionReceipt;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{ConfirmationStatus, DeployError, DeployResult, Deployment};

/// The receipt fields confirmation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub success: bool,
    pub block_number: Option<u64>,
    pub contract_address: Option<Address>,
}

impl From<&TransactionReceipt> for ReceiptSummary {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            success: receipt.status(),
            block_number: receipt.block_number,
            contract_address: receipt.contract_address,
        }
    }
}

/// Decide where a deployment stands given its receipt and the chain head.
pub fn evaluate(
    tx_hash: TxHash,
    receipt: Option<ReceiptSummary>,
    current_block: u64,
    required_confirmations: u32,
) -> DeployResult<ConfirmationStatus> {
    let Some(receipt) = receipt else {
        return Ok(ConfirmationStatus::Pending);
    };

    if !receipt.success {
        return Err(DeployError::Reverted(tx_hash));
    }

    let contract_address = receipt
        .contract_address
        .ok_or(DeployError::NoContractAddress(tx_hash))?;

    // A receipt without a block number is still pending inclusion.
    let Some(tx_block) = receipt.block_number else {
        return Ok(ConfirmationStatus::Pending);
    };

    let confirmations = current_block.saturating_sub(tx_block).saturating_add(1);
    let confirmations = u32::try_from(confirmations).unwrap_or(u32::MAX);

    if confirmations >= required_confirmations {
        Ok(ConfirmationStatus::Confirmed {
            block_number: tx_block,
            contract_address,
        })
    } else {
        Ok(ConfirmationStatus::Confirming {
            current: confirmations,
            required: required_confirmations,
        })
    }
}

/// Wait for a deployment transaction to be confirmed.
///
/// Waits indefinitely unless the network config sets
/// `confirmation_timeout_secs`.
pub async fn wait_for_confirmation(
    client: &BlockchainClient,
    tx_hash: TxHash,
) -> DeployResult<Deployment> {
    match client.config().confirmation_timeout() {
        Some(limit) => timeout(limit, poll_until_confirmed(client, tx_hash))
            .await
            .map_err(|_| DeployError::ConfirmationTimeout {
                tx_hash,
                seconds: limit.as_secs(),
            })?,
        None => poll_until_confirmed(client, tx_hash).await,
    }
}

async fn poll_until_confirmed(
    client: &BlockchainClient,
    tx_hash: TxHash,
) -> DeployResult<Deployment> {
    let required_confirmations = client.config().confirmation_blocks;
    let mut ticker = interval(client.config().poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let receipt = client.get_transaction_receipt(tx_hash).await?;
        let current_block = match receipt {
            Some(_) => client.get_block_number().await?,
            None => 0,
        };

        let status = evaluate(
            tx_hash,
            receipt.as_ref().map(ReceiptSummary::from),
            current_block,
            required_confirmations,
        )?;

        match status {
            ConfirmationStatus::Confirmed {
                block_number,
                contract_address,
            } => {
                return Ok(Deployment {
                    tx_hash,
                    address: contract_address,
                    block_number,
                });
            }
            ConfirmationStatus::Confirming { current, required } => {
                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = current,
                    required = required,
                    "Waiting for confirmations"
                );
            }
            ConfirmationStatus::Pending => {
                tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
            }
        }
    }
}
