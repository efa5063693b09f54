/// Token Launchpad SDK
///
/// Launches fungible Token-2022 tokens on Solana:
/// - Image and metadata pinning
/// - Mint layout and instruction assembly
/// - Wallet signing and submission
/// - Launch phase tracking
pub mod amount;
pub mod client;
pub mod config;
pub mod core;
pub mod instructions;
pub mod logging;
pub mod metadata;
pub mod pinning;
pub mod pipeline;
pub mod prelude;
pub mod state;

pub use client::{BaseClient, ChainClient, KeypairWallet, WalletSigner};
pub use config::LaunchpadConfig;
pub use crate::core::*;
pub use metadata::MetadataDocument;
pub use pinning::{PinataClient, PinningService};
pub use state::{LaunchPhase, Launchpad};

// Re-export the token program used for every launch
pub use spl_token_2022::ID as TOKEN_PROGRAM_ID;
