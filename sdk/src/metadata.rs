//! Off-chain metadata document pinned alongside the token image

use serde::{Deserialize, Serialize};

use crate::core::{ContentUri, ImageAsset, TokenForm, METADATA_CATEGORY};

/// JSON document referenced by the on-chain metadata URI
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<MetadataAttribute>,
    pub properties: MetadataProperties,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub trait_type: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataProperties {
    pub files: Vec<MetadataFile>,
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataFile {
    pub uri: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl MetadataDocument {
    /// Describe `form` with its image pinned at `image_uri`
    pub fn for_token(form: &TokenForm, image: &ImageAsset, image_uri: &ContentUri) -> Self {
        Self {
            name: form.name.trim().to_string(),
            symbol: form.symbol.trim().to_string(),
            description: form.description.clone(),
            image: image_uri.to_string(),
            attributes: Vec::new(),
            properties: MetadataProperties {
                files: vec![MetadataFile {
                    uri: image_uri.to_string(),
                    content_type: image.content_type.clone(),
                }],
                category: METADATA_CATEGORY.to_string(),
            },
        }
    }

    /// Name under which the document is pinned
    pub fn pin_name(&self) -> String {
        format!("{}-metadata.json", self.symbol.to_lowercase())
    }
}

/// Content type for an image file name, by extension
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
