//! Centralized error types for the launchpad

use thiserror::Error;

/// Main launch error type
///
/// The `Display` output of every variant is the single message a front end
/// shows when an attempt ends.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Connect your wallet first")]
    WalletNotConnected,

    #[error("Token {0} is required")]
    MissingField(&'static str),

    #[error("An image is required for this launch")]
    MissingImage,

    #[error("Invalid supply: {0}")]
    Amount(#[from] AmountError),

    #[error("A token launch is already in progress")]
    AttemptInProgress,

    #[error("asset upload failed: {0}")]
    AssetUpload(#[source] PinningError),

    #[error("metadata upload failed: {0}")]
    MetadataUpload(#[source] PinningError),

    #[error("Mint layout error: {0}")]
    Layout(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Token creation failed: {0}")]
    Submission(#[from] WalletError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used by front ends and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any collaborator was contacted
    Precondition,
    /// The pinning service refused or failed a request
    Upload,
    /// Assembly, signing or submission of the transaction failed
    Submission,
    /// Startup configuration problem
    Configuration,
}

impl LaunchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LaunchError::WalletNotConnected
            | LaunchError::MissingField(_)
            | LaunchError::MissingImage
            | LaunchError::Amount(_)
            | LaunchError::AttemptInProgress => ErrorKind::Precondition,
            LaunchError::AssetUpload(_) | LaunchError::MetadataUpload(_) => ErrorKind::Upload,
            LaunchError::Layout(_)
            | LaunchError::Rpc(_)
            | LaunchError::Signing(_)
            | LaunchError::Submission(_) => ErrorKind::Submission,
            LaunchError::Config(_) | LaunchError::Io(_) => ErrorKind::Configuration,
        }
    }
}

/// Mint amount arithmetic errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("supply must be greater than zero")]
    NonPositive,

    #[error("decimals must be at most {max}, got {decimals}")]
    DecimalsOutOfRange { decimals: u8, max: u8 },

    #[error("supply has more fractional digits than {decimals} decimals allow")]
    FractionalRemainder { decimals: u8 },

    #[error("supply overflows the mint amount range")]
    Overflow,
}

/// Pinning service errors
#[derive(Error, Debug)]
pub enum PinningError {
    #[error("pinning service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("pinning credential is not configured")]
    MissingCredential,
}

impl From<reqwest::Error> for PinningError {
    fn from(err: reqwest::Error) -> Self {
        PinningError::Transport(err.to_string())
    }
}

/// Wallet collaborator errors
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("wallet rejected the transaction: {0}")]
    Rejected(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("network rejected the transaction: {0}")]
    Rpc(String),
}

impl From<solana_client::client_error::ClientError> for WalletError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        WalletError::Rpc(err.to_string())
    }
}

impl From<solana_client::client_error::ClientError> for LaunchError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        LaunchError::Rpc(err.to_string())
    }
}

impl From<solana_sdk::program_error::ProgramError> for LaunchError {
    fn from(err: solana_sdk::program_error::ProgramError) -> Self {
        LaunchError::Layout(err.to_string())
    }
}

impl From<solana_sdk::signer::SignerError> for LaunchError {
    fn from(err: solana_sdk::signer::SignerError) -> Self {
        LaunchError::Signing(err.to_string())
    }
}

impl From<config::ConfigError> for LaunchError {
    fn from(err: config::ConfigError) -> Self {
        LaunchError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for LaunchError {
    fn from(err: validator::ValidationErrors) -> Self {
        LaunchError::Config(err.to_string())
    }
}

/// Result type alias for launchpad operations
pub type LaunchResult<T> = Result<T, LaunchError>;
