use std::sync::Arc;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, signature::Signature,
    transaction::Transaction,
};
use tracing::debug;

use super::ChainClient;
use crate::core::{LaunchResult, WalletError};

/// Base RPC client wrapper for the queries and submissions a launch needs
pub struct BaseClient {
    rpc: Arc<RpcClient>,
}

impl BaseClient {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: Arc::new(RpcClient::new_with_commitment(
                rpc_url.to_string(),
                commitment,
            )),
        }
    }

    /// Get the RPC endpoint URL
    pub fn rpc_url(&self) -> String {
        self.rpc.url()
    }

    /// Submit a fully signed transaction and wait for confirmation
    pub async fn send_and_confirm(&self, tx: &Transaction) -> Result<Signature, WalletError> {
        Ok(self.rpc.send_and_confirm_transaction(tx).await?)
    }
}

#[async_trait]
impl ChainClient for BaseClient {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> LaunchResult<u64> {
        let lamports = self
            .rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await?;
        debug!(data_len, lamports, "Fetched rent-exempt minimum");
        Ok(lamports)
    }

    async fn latest_blockhash(&self) -> LaunchResult<Hash> {
        Ok(self.rpc.get_latest_blockhash().await?)
    }
}
