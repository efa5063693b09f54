//! Test helpers
//!
//! Recording stand-ins for the pinning service, the chain and the wallet.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use launchpad_sdk::{
    config::LaunchSettings,
    core::{ContentUri, ImageAsset, LaunchResult, PinningError, WalletError},
    ChainClient, Launchpad, MetadataDocument, PinningService, WalletSigner,
};
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

pub const GATEWAY: &str = "https://gateway.test";

/// Pinning service that records calls and can be told to fail
#[derive(Default)]
pub struct MockPinning {
    pub asset_calls: AtomicUsize,
    pub metadata_calls: AtomicUsize,
    pub fail_asset: bool,
    pub fail_metadata: bool,
    pub documents: Mutex<Vec<MetadataDocument>>,
}

impl MockPinning {
    pub fn failing_asset() -> Self {
        Self {
            fail_asset: true,
            ..Default::default()
        }
    }

    pub fn failing_metadata() -> Self {
        Self {
            fail_metadata: true,
            ..Default::default()
        }
    }

    pub fn asset_calls(&self) -> usize {
        self.asset_calls.load(Ordering::SeqCst)
    }

    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PinningService for MockPinning {
    async fn upload_asset(&self, asset: &ImageAsset) -> Result<ContentUri, PinningError> {
        self.asset_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_asset {
            return Err(PinningError::Status {
                status: 500,
                body: "pinning unavailable".to_string(),
            });
        }
        Ok(ContentUri::from_cid(GATEWAY, &format!("image-{}", asset.file_name)))
    }

    async fn upload_metadata(
        &self,
        document: &MetadataDocument,
    ) -> Result<ContentUri, PinningError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_metadata {
            return Err(PinningError::Transport("connection reset".to_string()));
        }
        self.documents.lock().unwrap().push(document.clone());
        Ok(ContentUri::from_cid(GATEWAY, "metadata-cid"))
    }
}

/// Chain client with a fixed rent schedule
#[derive(Default)]
pub struct MockChain {
    pub rent_calls: AtomicUsize,
    pub blockhash_calls: AtomicUsize,
    pub rent_queries: Mutex<Vec<usize>>,
}

impl MockChain {
    /// Lamports per byte-year times two years, over the data and account header
    pub fn rent_for(data_len: usize) -> u64 {
        (128 + data_len as u64) * 3480 * 2
    }

    pub fn rent_calls(&self) -> usize {
        self.rent_calls.load(Ordering::SeqCst)
    }

    pub fn blockhash_calls(&self) -> usize {
        self.blockhash_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> LaunchResult<u64> {
        self.rent_calls.fetch_add(1, Ordering::SeqCst);
        self.rent_queries.lock().unwrap().push(data_len);
        Ok(Self::rent_for(data_len))
    }

    async fn latest_blockhash(&self) -> LaunchResult<Hash> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Hash::new_unique())
    }
}

/// Wallet that signs locally and records what it was asked to submit
pub struct MockWallet {
    pub keypair: Option<Keypair>,
    pub reject: bool,
    pub calls: AtomicUsize,
    pub submitted: Mutex<Vec<Transaction>>,
    /// Held by `sign_and_send` until released, to keep an attempt in flight
    pub gate: Option<Arc<tokio::sync::Notify>>,
}

impl MockWallet {
    pub fn connected() -> Self {
        Self {
            keypair: Some(Keypair::new()),
            reject: false,
            calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn disconnected() -> Self {
        Self {
            keypair: None,
            ..Self::connected()
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::connected()
        }
    }

    pub fn gated(gate: Arc<tokio::sync::Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::connected()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_submitted(&self) -> Option<Transaction> {
        self.submitted.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl WalletSigner for MockWallet {
    fn identity(&self) -> Option<Pubkey> {
        self.keypair.as_ref().map(|keypair| keypair.pubkey())
    }

    async fn sign_and_send(&self, mut transaction: Transaction) -> Result<Signature, WalletError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.reject {
            return Err(WalletError::Rejected("user declined".to_string()));
        }

        let keypair = self
            .keypair
            .as_ref()
            .ok_or_else(|| WalletError::Signing("no wallet".to_string()))?;
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[keypair], blockhash)
            .map_err(|e| WalletError::Signing(e.to_string()))?;

        let signature = transaction.signatures[0];
        self.submitted.lock().unwrap().push(transaction);
        Ok(signature)
    }
}

/// Collaborators wired into a controller, kept for later inspection
pub struct Harness {
    pub pinning: Arc<MockPinning>,
    pub chain: Arc<MockChain>,
    pub wallet: Arc<MockWallet>,
    pub launchpad: Launchpad,
}

impl Harness {
    pub fn new(pinning: MockPinning, wallet: MockWallet, settings: LaunchSettings) -> Self {
        let pinning = Arc::new(pinning);
        let chain = Arc::new(MockChain::default());
        let wallet = Arc::new(wallet);
        let launchpad = Launchpad::new(pinning.clone(), chain.clone(), wallet.clone(), settings);
        Self {
            pinning,
            chain,
            wallet,
            launchpad,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            MockPinning::default(),
            MockWallet::connected(),
            LaunchSettings::default(),
        )
    }

    pub fn payer(&self) -> Pubkey {
        self.wallet.identity().unwrap()
    }
}

pub fn png(name: &str) -> ImageAsset {
    ImageAsset::new(name, vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a])
}
