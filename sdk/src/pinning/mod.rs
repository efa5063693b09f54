//! Pinning service port and its Pinata adapter

pub mod pinata;

use async_trait::async_trait;

use crate::{
    core::{ContentUri, ImageAsset, PinningError},
    metadata::MetadataDocument,
};

pub use pinata::PinataClient;

/// Content-addressed storage for the token image and its metadata document
#[async_trait]
pub trait PinningService: Send + Sync {
    /// Pin a binary asset and return its public URI
    async fn upload_asset(&self, asset: &ImageAsset) -> Result<ContentUri, PinningError>;

    /// Pin a metadata document as JSON and return its public URI
    async fn upload_metadata(
        &self,
        document: &MetadataDocument,
    ) -> Result<ContentUri, PinningError>;
}
