//! Launchpad configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `LAUNCHPAD__<SECTION>__<KEY>` environment variables. The pinning JWT is
//! expected to arrive through the environment and is never printed.

use std::{fmt, path::Path, str::FromStr};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use validator::Validate;

use crate::core::{
    ImagePolicy, LaunchError, LaunchResult, MetadataMode, DEVNET_RPC_URL, PINATA_API_URL,
    PINATA_GATEWAY_URL,
};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "LAUNCHPAD";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LaunchpadConfig {
    pub cluster: ClusterConfig,
    pub wallet: WalletConfig,
    pub pinning: PinningConfig,
    pub launch: LaunchSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClusterConfig {
    #[validate(url)]
    pub rpc_url: String,
    /// processed, confirmed or finalized
    pub commitment: String,
    /// Cluster name used in explorer links
    pub explorer_cluster: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WalletConfig {
    /// Keypair file of the paying wallet, `~` is expanded
    pub keypair_path: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PinningConfig {
    #[validate(url)]
    pub api_url: String,
    #[validate(url)]
    pub gateway_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwt: Option<String>,
    #[validate(range(min = 1, max = 600))]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LaunchSettings {
    pub image_upload: ImagePolicy,
    pub metadata: MetadataMode,
    /// On-chain URI used when no metadata document is uploaded
    pub default_metadata_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Emit JSON log lines instead of human readable ones
    pub structured: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEVNET_RPC_URL.to_string(),
            commitment: "confirmed".to_string(),
            explorer_cluster: "devnet".to_string(),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            keypair_path: "~/.config/solana/id.json".to_string(),
        }
    }
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            api_url: PINATA_API_URL.to_string(),
            gateway_url: PINATA_GATEWAY_URL.to_string(),
            jwt: None,
            request_timeout_secs: 60,
        }
    }
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            image_upload: ImagePolicy::Optional,
            metadata: MetadataMode::Embedded,
            default_metadata_uri: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            structured: false,
        }
    }
}

impl fmt::Debug for PinningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinningConfig")
            .field("api_url", &self.api_url)
            .field("gateway_url", &self.gateway_url)
            .field("jwt", &self.jwt.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl PinningConfig {
    pub fn has_credential(&self) -> bool {
        self.jwt.as_deref().is_some_and(|jwt| !jwt.trim().is_empty())
    }
}

impl ClusterConfig {
    pub fn commitment_config(&self) -> LaunchResult<CommitmentConfig> {
        let commitment = CommitmentLevel::from_str(&self.commitment).map_err(|_| {
            LaunchError::Config(format!("unknown commitment level: {}", self.commitment))
        })?;
        Ok(CommitmentConfig { commitment })
    }
}

impl LaunchpadConfig {
    /// Load configuration from an optional TOML file and the environment
    pub fn load(path: Option<&Path>) -> LaunchResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        Self::finish(builder.add_source(env_source()))
    }

    /// Parse configuration from TOML text, ignoring the environment
    pub fn from_toml_str(content: &str) -> LaunchResult<Self> {
        Self::finish(Config::builder().add_source(File::from_str(content, FileFormat::Toml)))
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> LaunchResult<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate_sections()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate_sections(&self) -> LaunchResult<()> {
        self.cluster.validate()?;
        self.pinning.validate()?;
        self.cluster.commitment_config()?;

        if self.launch.image_upload == ImagePolicy::Required && !self.pinning.has_credential() {
            return Err(LaunchError::Config(
                "image uploads are required but no pinning JWT is configured \
                 (set LAUNCHPAD__PINNING__JWT)"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Render an example configuration file
    pub fn example_toml() -> LaunchResult<String> {
        let body = toml::to_string_pretty(&Self::default())
            .map_err(|e| LaunchError::Config(format!("Failed to serialize config: {}", e)))?;
        Ok(format!(
            "# Token launchpad configuration\n\
             #\n\
             # The pinning JWT is read from LAUNCHPAD__PINNING__JWT.\n\
             # Any key can be overridden as LAUNCHPAD__<SECTION>__<KEY>.\n\n{}",
            body
        ))
    }

    /// Write the example configuration to `path`
    pub fn write_example(path: &Path) -> LaunchResult<()> {
        std::fs::write(path, Self::example_toml()?)?;
        Ok(())
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}
