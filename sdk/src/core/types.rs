use std::{fmt, path::Path};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solana_sdk::signature::Signature;

use crate::{
    core::{LaunchResult, DEFAULT_DECIMALS, EXPLORER_URL},
    metadata::content_type_for,
    prelude::*,
};

/// User-entered token parameters, read once at submission time
#[derive(Clone, Debug)]
pub struct TokenForm {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Whole-token supply; scaled by `10^decimals` when minted
    pub supply: Decimal,
    pub description: String,
    pub image: Option<ImageAsset>,
    /// On-chain URI to use when no metadata document is uploaded
    pub uri_override: Option<String>,
}

impl Default for TokenForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            decimals: DEFAULT_DECIMALS,
            supply: Decimal::ONE_HUNDRED,
            description: String::new(),
            image: None,
            uri_override: None,
        }
    }
}

impl TokenForm {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_supply(mut self, supply: Decimal) -> Self {
        self.supply = supply;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: ImageAsset) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri_override = Some(uri.into());
        self
    }
}

/// Image blob selected by the user
#[derive(Clone)]
pub struct ImageAsset {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAsset {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image from disk, inferring its content type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> LaunchResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

impl fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAsset")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Gateway URL of a pinned object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentUri(String);

impl ContentUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Build the public URL for a content identifier served by `gateway`
    pub fn from_cid(gateway: &str, cid: &str) -> Self {
        Self(format!("{}/ipfs/{}", gateway.trim_end_matches('/'), cid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the launch treats the optional image
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImagePolicy {
    /// Never upload, even if an image is supplied
    Disabled,
    /// Upload when an image is supplied
    #[default]
    Optional,
    /// Refuse to launch without an image
    Required,
}

/// Whether token metadata lives on the mint itself
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetadataMode {
    /// Metadata pointer and token metadata extensions on the mint
    #[default]
    Embedded,
    /// Bare mint with no extensions
    Omitted,
}

/// Result of a successful launch
#[derive(Clone, Debug)]
pub struct CreationOutcome {
    pub signature: Signature,
    pub mint: Pubkey,
    pub associated_account: Pubkey,
    pub raw_amount: u64,
    pub metadata_uri: Option<ContentUri>,
}

impl CreationOutcome {
    /// Explorer link for the new mint
    pub fn explorer_url(&self, cluster: &str) -> String {
        match cluster {
            "" | "mainnet" | "mainnet-beta" => format!("{}/address/{}", EXPLORER_URL, self.mint),
            cluster => format!("{}/address/{}?cluster={}", EXPLORER_URL, self.mint, cluster),
        }
    }
}
