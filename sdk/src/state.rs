//! Launch state controller
//!
//! Owns the collaborators, runs one pipeline attempt at a time and publishes
//! the current [`LaunchPhase`] to any number of observers.

use std::{fmt, sync::Arc};

use solana_sdk::signature::Signature;
use tokio::sync::{watch, Mutex};
use tracing::{error, info};

use crate::{
    client::{ChainClient, WalletSigner},
    config::LaunchSettings,
    core::{CreationOutcome, LaunchError, LaunchResult, TokenForm},
    pinning::PinningService,
    pipeline,
    prelude::*,
};

/// Where the current launch attempt is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LaunchPhase {
    #[default]
    Idle,
    UploadingAsset,
    UploadingMetadata,
    BuildingTransaction,
    AwaitingSignature,
    Succeeded { mint: Pubkey, signature: Signature },
    Failed(String),
}

impl LaunchPhase {
    /// Whether an attempt is between validation and its final outcome
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            LaunchPhase::UploadingAsset
                | LaunchPhase::UploadingMetadata
                | LaunchPhase::BuildingTransaction
                | LaunchPhase::AwaitingSignature
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LaunchPhase::Succeeded { .. } | LaunchPhase::Failed(_))
    }
}

impl fmt::Display for LaunchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchPhase::Idle => write!(f, "idle"),
            LaunchPhase::UploadingAsset => write!(f, "uploading image"),
            LaunchPhase::UploadingMetadata => write!(f, "uploading metadata"),
            LaunchPhase::BuildingTransaction => write!(f, "building transaction"),
            LaunchPhase::AwaitingSignature => write!(f, "awaiting wallet signature"),
            LaunchPhase::Succeeded { mint, .. } => write!(f, "token created at {}", mint),
            LaunchPhase::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Token launch controller
pub struct Launchpad {
    pinning: Arc<dyn PinningService>,
    chain: Arc<dyn ChainClient>,
    wallet: Arc<dyn WalletSigner>,
    settings: LaunchSettings,
    phase: watch::Sender<LaunchPhase>,
    in_flight: Mutex<()>,
}

impl Launchpad {
    pub fn new(
        pinning: Arc<dyn PinningService>,
        chain: Arc<dyn ChainClient>,
        wallet: Arc<dyn WalletSigner>,
        settings: LaunchSettings,
    ) -> Self {
        let (phase, _) = watch::channel(LaunchPhase::Idle);
        Self {
            pinning,
            chain,
            wallet,
            settings,
            phase,
            in_flight: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &LaunchSettings {
        &self.settings
    }

    /// Subscribe to phase changes
    pub fn subscribe(&self) -> watch::Receiver<LaunchPhase> {
        self.phase.subscribe()
    }

    /// Current phase
    pub fn phase(&self) -> LaunchPhase {
        self.phase.borrow().clone()
    }

    /// Whether an attempt is currently running
    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Run one launch attempt
    ///
    /// Fails with [`LaunchError::AttemptInProgress`] without touching the
    /// phase when another attempt holds the controller.
    pub async fn submit(&self, form: TokenForm) -> LaunchResult<CreationOutcome> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| LaunchError::AttemptInProgress)?;

        self.set_phase(LaunchPhase::Idle);
        match self.run(form).await {
            Ok(outcome) => {
                self.set_phase(LaunchPhase::Succeeded {
                    mint: outcome.mint,
                    signature: outcome.signature,
                });
                Ok(outcome)
            }
            Err(err) => {
                error!(kind = ?err.kind(), "Launch failed: {}", err);
                self.set_phase(LaunchPhase::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn run(&self, form: TokenForm) -> LaunchResult<CreationOutcome> {
        let launch = pipeline::validate(form, self.wallet.identity(), &self.settings)?;
        info!(payer = %launch.payer(), raw_amount = launch.raw_amount(), "Starting launch");

        if launch.uploads_image() {
            self.set_phase(LaunchPhase::UploadingAsset);
        }
        let assets = launch.upload_asset(self.pinning.as_ref()).await?;

        if assets.image_uri().is_some() {
            self.set_phase(LaunchPhase::UploadingMetadata);
        }
        let metadata = assets.upload_metadata(self.pinning.as_ref()).await?;

        self.set_phase(LaunchPhase::BuildingTransaction);
        let assembled = metadata
            .generate_identity()
            .assemble(self.chain.as_ref())
            .await?;

        self.set_phase(LaunchPhase::AwaitingSignature);
        assembled.submit(self.wallet.as_ref()).await
    }

    fn set_phase(&self, phase: LaunchPhase) {
        self.phase.send_replace(phase);
    }
}
