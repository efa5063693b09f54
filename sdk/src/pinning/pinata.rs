//! Pinata HTTP client
//!
//! Files are pinned with a multipart `pinFileToIPFS` request and metadata
//! documents with `pinJSONToIPFS`. Both answer with the content identifier of
//! the pinned object, which is turned into a gateway URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use super::PinningService;
use crate::{
    config::PinningConfig,
    core::{
        ContentUri, ImageAsset, LaunchError, LaunchResult, PinningError, PIN_FILE_PATH,
        PIN_JSON_PATH,
    },
    metadata::MetadataDocument,
};

/// Pin response body
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// JSON pin request body
#[derive(Serialize)]
struct PinJsonRequest<'a> {
    #[serde(rename = "pinataContent")]
    content: &'a MetadataDocument,
    #[serde(rename = "pinataMetadata")]
    metadata: PinMetadata,
}

#[derive(Serialize)]
struct PinMetadata {
    name: String,
}

/// Pinata client authenticated with a JWT
pub struct PinataClient {
    http: Client,
    api_url: String,
    gateway_url: String,
    jwt: Option<String>,
}

impl PinataClient {
    pub fn new(
        api_url: impl Into<String>,
        gateway_url: impl Into<String>,
        jwt: Option<String>,
        timeout: Duration,
    ) -> LaunchResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LaunchError::Config(e.to_string()))?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            gateway_url: gateway_url.into(),
            jwt: jwt.filter(|token| !token.trim().is_empty()),
        })
    }

    pub fn from_config(config: &PinningConfig) -> LaunchResult<Self> {
        Self::new(
            config.api_url.clone(),
            config.gateway_url.clone(),
            config.jwt.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn credential(&self) -> Result<&str, PinningError> {
        self.jwt.as_deref().ok_or(PinningError::MissingCredential)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Map a pin response to the gateway URI of the pinned object
    async fn pinned_uri(&self, response: Response) -> Result<ContentUri, PinningError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PinningError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let pinned: PinResponse = response
            .json()
            .await
            .map_err(|e| PinningError::InvalidResponse(e.to_string()))?;

        if pinned.ipfs_hash.is_empty() {
            return Err(PinningError::InvalidResponse("empty IpfsHash".to_string()));
        }

        Ok(ContentUri::from_cid(&self.gateway_url, &pinned.ipfs_hash))
    }
}

#[async_trait]
impl PinningService for PinataClient {
    async fn upload_asset(&self, asset: &ImageAsset) -> Result<ContentUri, PinningError> {
        let jwt = self.credential()?;
        debug!(
            file_name = %asset.file_name,
            content_type = %asset.content_type,
            bytes = asset.bytes.len(),
            "Pinning asset"
        );

        let file = Part::bytes(asset.bytes.clone())
            .file_name(asset.file_name.clone())
            .mime_str(&asset.content_type)?;
        let form = Form::new()
            .part("file", file)
            .text("pinataMetadata", json!({ "name": asset.file_name }).to_string());

        let response = self
            .http
            .post(self.endpoint(PIN_FILE_PATH))
            .bearer_auth(jwt)
            .multipart(form)
            .send()
            .await?;

        let uri = self.pinned_uri(response).await?;
        info!(uri = %uri, "Asset pinned");
        Ok(uri)
    }

    async fn upload_metadata(
        &self,
        document: &MetadataDocument,
    ) -> Result<ContentUri, PinningError> {
        let jwt = self.credential()?;
        let request = PinJsonRequest {
            content: document,
            metadata: PinMetadata {
                name: document.pin_name(),
            },
        };
        debug!(name = %request.metadata.name, "Pinning metadata document");

        let response = self
            .http
            .post(self.endpoint(PIN_JSON_PATH))
            .bearer_auth(jwt)
            .json(&request)
            .send()
            .await?;

        let uri = self.pinned_uri(response).await?;
        info!(uri = %uri, "Metadata pinned");
        Ok(uri)
    }
}
