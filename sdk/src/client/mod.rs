//! Chain and wallet collaborators

pub mod base;
pub mod wallet;

use async_trait::async_trait;
use solana_sdk::{hash::Hash, signature::Signature, transaction::Transaction};

use crate::{
    core::{LaunchResult, WalletError},
    prelude::*,
};

pub use base::BaseClient;
pub use wallet::{expand_home, load_keypair, KeypairWallet};

/// Read-only chain queries used while assembling a launch
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Lamports an account of `data_len` bytes must hold to be rent exempt
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> LaunchResult<u64>;

    /// Recent blockhash to anchor the transaction
    async fn latest_blockhash(&self) -> LaunchResult<Hash>;
}

/// Wallet that owns the payer identity
///
/// The launch never holds the payer's secret key; it hands over a transaction
/// already partially signed by the new mint and gets back its signature.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Connected payer identity, `None` while no wallet is connected
    fn identity(&self) -> Option<Pubkey>;

    /// Add the payer signature and submit the transaction
    async fn sign_and_send(&self, transaction: Transaction) -> Result<Signature, WalletError>;
}
