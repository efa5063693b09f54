// Token creation command

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Args;
use launchpad_sdk::{
    core::{ImageAsset, ImagePolicy, TokenForm, DEFAULT_DECIMALS, DEFAULT_SUPPLY},
    BaseClient, KeypairWallet, Launchpad, LaunchpadConfig, PinataClient,
};
use rust_decimal::Decimal;

use super::utils::{error, info, success, warn};

#[derive(Args)]
pub struct CreateCmd {
    /// Token name
    #[arg(long)]
    name: String,

    /// Token symbol
    #[arg(long)]
    symbol: String,

    /// Decimal places of the mint
    #[arg(long, default_value_t = DEFAULT_DECIMALS)]
    decimals: u8,

    /// Whole-token supply minted to the wallet
    #[arg(long, default_value = DEFAULT_SUPPLY)]
    supply: Decimal,

    /// Description stored in the metadata document
    #[arg(long, default_value = "")]
    description: String,

    /// Image to pin alongside the metadata
    #[arg(long)]
    image: Option<PathBuf>,

    /// On-chain metadata URI used when nothing is uploaded
    #[arg(long)]
    uri: Option<String>,
}

impl CreateCmd {
    async fn form(&self) -> Result<TokenForm> {
        let mut form = TokenForm::new(self.name.clone(), self.symbol.clone())
            .with_decimals(self.decimals)
            .with_supply(self.supply)
            .with_description(self.description.clone());

        if let Some(path) = &self.image {
            let image = ImageAsset::from_path(path)
                .await
                .with_context(|| format!("Failed to read image {}", path.display()))?;
            form = form.with_image(image);
        }
        if let Some(uri) = &self.uri {
            form = form.with_uri(uri.clone());
        }

        Ok(form)
    }
}

pub async fn execute(cmd: &CreateCmd, config: &LaunchpadConfig) -> Result<()> {
    let form = cmd.form().await?;

    if form.image.is_some() {
        match config.launch.image_upload {
            ImagePolicy::Disabled => warn("Image uploads are disabled, the image will be ignored"),
            _ if !config.pinning.has_credential() => {
                warn("No pinning JWT configured, set LAUNCHPAD__PINNING__JWT")
            }
            _ => {}
        }
    }

    let base = Arc::new(BaseClient::new(
        &config.cluster.rpc_url,
        config.cluster.commitment_config()?,
    ));
    let wallet = KeypairWallet::from_file(&config.wallet.keypair_path, base.clone())?;
    let pinning = PinataClient::from_config(&config.pinning)?;

    let launchpad = Launchpad::new(
        Arc::new(pinning),
        base.clone(),
        Arc::new(wallet),
        config.launch.clone(),
    );

    info(&format!(
        "Creating {} ({}) on {}",
        form.name.trim(),
        form.symbol.trim(),
        base.rpc_url()
    ));

    let mut phases = launchpad.subscribe();
    let progress = tokio::spawn(async move {
        while phases.changed().await.is_ok() {
            let phase = phases.borrow_and_update().clone();
            if phase.is_active() {
                info(&format!("{}...", phase));
            }
            if phase.is_terminal() {
                break;
            }
        }
    });

    let result = launchpad.submit(form).await;
    // Closes the phase channel so the watcher always exits
    drop(launchpad);
    let _ = progress.await;

    match result {
        Ok(outcome) => {
            success("Token created");
            println!("  Mint:               {}", outcome.mint);
            println!("  Signature:          {}", outcome.signature);
            println!("  Associated account: {}", outcome.associated_account);
            println!("  Raw amount:         {}", outcome.raw_amount);
            if let Some(uri) = &outcome.metadata_uri {
                println!("  Metadata:           {}", uri);
            }
            println!(
                "  Explorer:           {}",
                outcome.explorer_url(&config.cluster.explorer_cluster)
            );
            Ok(())
        }
        Err(err) => {
            error(&err.to_string());
            Err(err.into())
        }
    }
}
