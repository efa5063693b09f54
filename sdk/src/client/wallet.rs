use std::sync::Arc;

use async_trait::async_trait;
use solana_sdk::{
    signature::{read_keypair_file, Keypair, Signature},
    transaction::Transaction,
};
use tracing::info;

use super::{BaseClient, WalletSigner};
use crate::{
    core::{LaunchError, LaunchResult, WalletError},
    prelude::*,
};

/// Wallet backed by a local keypair file
///
/// Adds the payer signature to a transaction that may already carry other
/// partial signatures, then submits it through the RPC client.
pub struct KeypairWallet {
    keypair: Keypair,
    base: Arc<BaseClient>,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair, base: Arc<BaseClient>) -> Self {
        Self { keypair, base }
    }

    /// Load the keypair at `path`, expanding a leading `~`
    pub fn from_file(path: &str, base: Arc<BaseClient>) -> LaunchResult<Self> {
        Ok(Self::new(load_keypair(path)?, base))
    }
}

#[async_trait]
impl WalletSigner for KeypairWallet {
    fn identity(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    async fn sign_and_send(&self, mut transaction: Transaction) -> Result<Signature, WalletError> {
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| WalletError::Signing(e.to_string()))?;

        if !transaction.is_signed() {
            return Err(WalletError::Signing(
                "transaction is missing required signatures".to_string(),
            ));
        }

        info!(payer = %self.keypair.pubkey(), "Submitting transaction");
        self.base.send_and_confirm(&transaction).await
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> LaunchResult<String> {
    if let Some(rest) = path.strip_prefix('~') {
        let home = std::env::var("HOME")
            .map_err(|_| LaunchError::Config("HOME environment variable not set".to_string()))?;
        Ok(format!("{}{}", home, rest))
    } else {
        Ok(path.to_string())
    }
}

/// Load a keypair from a file path, expanding ~ if needed
pub fn load_keypair(path: &str) -> LaunchResult<Keypair> {
    let expanded = expand_home(path)?;
    read_keypair_file(&expanded).map_err(|e| {
        LaunchError::Config(format!("Failed to load keypair from {}: {}", expanded, e))
    })
}
