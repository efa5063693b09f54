//! Token creation pipeline
//!
//! Each stage consumes the previous one, so a launch can only move forward:
//! validate, upload the image, upload the metadata document, generate the mint
//! identity, assemble the transaction, then hand it to the wallet.

use solana_sdk::{
    signature::{Keypair, Signature},
    transaction::Transaction,
};
use tracing::{debug, info, warn};

use crate::{
    amount,
    client::{ChainClient, WalletSigner},
    config::LaunchSettings,
    core::{
        ContentUri, CreationOutcome, ImagePolicy, LaunchError, LaunchResult, MetadataMode,
        TokenForm,
    },
    instructions::{MintInstructionBuilder, MintParams, OnChainMetadata},
    metadata::MetadataDocument,
    pinning::PinningService,
    prelude::*,
};

/// Form that passed every precondition
#[derive(Debug)]
pub struct ValidatedLaunch {
    form: TokenForm,
    payer: Pubkey,
    raw_amount: u64,
    settings: LaunchSettings,
}

/// Output of the asset upload stage
#[derive(Debug)]
pub struct AssetStage {
    launch: ValidatedLaunch,
    image_uri: Option<ContentUri>,
}

/// Output of the metadata upload stage
#[derive(Debug)]
pub struct MetadataStage {
    launch: ValidatedLaunch,
    metadata_uri: Option<ContentUri>,
}

/// Launch with a fresh mint identity
pub struct IdentityStage {
    launch: ValidatedLaunch,
    metadata_uri: Option<ContentUri>,
    mint: Keypair,
}

/// Transaction signed by the mint and awaiting the payer signature
pub struct AssembledLaunch {
    transaction: Transaction,
    mint: Pubkey,
    associated_account: Pubkey,
    raw_amount: u64,
    metadata_uri: Option<ContentUri>,
}

/// Check the preconditions of a launch
///
/// Runs before any collaborator is contacted. The checks are ordered so the
/// reported error is the first thing the user needs to fix.
pub fn validate(
    form: TokenForm,
    payer: Option<Pubkey>,
    settings: &LaunchSettings,
) -> LaunchResult<ValidatedLaunch> {
    let payer = payer.ok_or(LaunchError::WalletNotConnected)?;

    if form.name.trim().is_empty() {
        return Err(LaunchError::MissingField("name"));
    }
    if form.symbol.trim().is_empty() {
        return Err(LaunchError::MissingField("symbol"));
    }
    if settings.image_upload == ImagePolicy::Required && form.image.is_none() {
        return Err(LaunchError::MissingImage);
    }

    let raw_amount = amount::raw_amount(&form.supply, form.decimals)?;
    debug!(
        name = %form.name.trim(),
        symbol = %form.symbol.trim(),
        decimals = form.decimals,
        raw_amount,
        "Launch validated"
    );

    Ok(ValidatedLaunch {
        form,
        payer,
        raw_amount,
        settings: settings.clone(),
    })
}

impl ValidatedLaunch {
    pub fn payer(&self) -> Pubkey {
        self.payer
    }

    pub fn raw_amount(&self) -> u64 {
        self.raw_amount
    }

    /// Whether the asset stage will contact the pinning service
    pub fn uploads_image(&self) -> bool {
        self.form.image.is_some() && self.settings.image_upload != ImagePolicy::Disabled
    }

    /// Pin the image, if there is one to pin
    pub async fn upload_asset(self, pinning: &dyn PinningService) -> LaunchResult<AssetStage> {
        let image_uri = match &self.form.image {
            Some(image) if self.settings.image_upload != ImagePolicy::Disabled => {
                info!(file_name = %image.file_name, "Uploading image");
                let uri = pinning
                    .upload_asset(image)
                    .await
                    .map_err(LaunchError::AssetUpload)?;
                Some(uri)
            }
            Some(image) => {
                warn!(file_name = %image.file_name, "Image uploads are disabled, ignoring image");
                None
            }
            None => {
                debug!("No image supplied, skipping asset upload");
                None
            }
        };

        Ok(AssetStage {
            launch: self,
            image_uri,
        })
    }

    /// URI written into the on-chain metadata
    fn onchain_uri(&self, metadata_uri: Option<&ContentUri>) -> String {
        match (metadata_uri, &self.form.uri_override) {
            (Some(uri), _) => uri.to_string(),
            (None, Some(uri)) => uri.trim().to_string(),
            (None, None) => self.settings.default_metadata_uri.clone(),
        }
    }
}

impl AssetStage {
    pub fn image_uri(&self) -> Option<&ContentUri> {
        self.image_uri.as_ref()
    }

    /// Pin the metadata document describing the uploaded image
    pub async fn upload_metadata(
        self,
        pinning: &dyn PinningService,
    ) -> LaunchResult<MetadataStage> {
        let embedded = self.launch.settings.metadata == MetadataMode::Embedded;
        let metadata_uri = match (&self.image_uri, &self.launch.form.image) {
            (Some(image_uri), Some(image)) if embedded => {
                let document = MetadataDocument::for_token(&self.launch.form, image, image_uri);
                info!(name = %document.pin_name(), "Uploading metadata");
                let uri = pinning
                    .upload_metadata(&document)
                    .await
                    .map_err(LaunchError::MetadataUpload)?;
                Some(uri)
            }
            (Some(_), Some(_)) => {
                warn!("Metadata is not embedded on the mint, skipping metadata upload");
                None
            }
            _ => None,
        };

        Ok(MetadataStage {
            launch: self.launch,
            metadata_uri,
        })
    }
}

impl MetadataStage {
    pub fn metadata_uri(&self) -> Option<&ContentUri> {
        self.metadata_uri.as_ref()
    }

    /// URI written into the on-chain metadata
    pub fn onchain_uri(&self) -> String {
        self.launch.onchain_uri(self.metadata_uri.as_ref())
    }

    /// Generate the keypair whose public key becomes the mint address
    pub fn generate_identity(self) -> IdentityStage {
        let mint = Keypair::new();
        debug!(mint = %mint.pubkey(), "Generated mint identity");
        IdentityStage {
            launch: self.launch,
            metadata_uri: self.metadata_uri,
            mint,
        }
    }
}

impl IdentityStage {
    pub fn mint(&self) -> Pubkey {
        self.mint.pubkey()
    }

    fn params(&self) -> MintParams {
        let metadata = match self.launch.settings.metadata {
            MetadataMode::Embedded => Some(OnChainMetadata {
                name: self.launch.form.name.trim().to_string(),
                symbol: self.launch.form.symbol.trim().to_string(),
                uri: self.launch.onchain_uri(self.metadata_uri.as_ref()),
            }),
            MetadataMode::Omitted => None,
        };

        MintParams {
            payer: self.launch.payer,
            mint: self.mint.pubkey(),
            decimals: self.launch.form.decimals,
            raw_amount: self.launch.raw_amount,
            metadata,
        }
    }

    /// Build the creation transaction and add the mint signature
    pub async fn assemble(self, chain: &dyn ChainClient) -> LaunchResult<AssembledLaunch> {
        let builder = MintInstructionBuilder::new();
        let params = self.params();

        let layout = builder.layout(&params)?;
        let lamports = chain
            .minimum_balance_for_rent_exemption(layout.rent_space)
            .await?;
        let instructions = builder.build(&params, &layout, lamports)?;
        info!(
            mint = %params.mint,
            mint_space = layout.mint_space,
            rent_space = layout.rent_space,
            lamports,
            instructions = instructions.len(),
            "Assembling transaction"
        );

        let blockhash = chain.latest_blockhash().await?;
        let mut transaction = Transaction::new_with_payer(&instructions, Some(&params.payer));
        transaction.try_partial_sign(&[&self.mint], blockhash)?;

        Ok(AssembledLaunch {
            transaction,
            mint: params.mint,
            associated_account: builder.associated_account(&params),
            raw_amount: params.raw_amount,
            metadata_uri: self.metadata_uri,
        })
    }
}

impl AssembledLaunch {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn mint(&self) -> Pubkey {
        self.mint
    }

    /// Ask the wallet to co-sign and submit
    pub async fn submit(self, wallet: &dyn WalletSigner) -> LaunchResult<CreationOutcome> {
        info!(mint = %self.mint, "Requesting wallet signature");
        let signature: Signature = wallet.sign_and_send(self.transaction).await?;
        info!(mint = %self.mint, %signature, "Token created");

        Ok(CreationOutcome {
            signature,
            mint: self.mint,
            associated_account: self.associated_account,
            raw_amount: self.raw_amount,
            metadata_uri: self.metadata_uri,
        })
    }
}
