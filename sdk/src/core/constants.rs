use crate::prelude::*;

/// Token program every launch is created under
pub fn token_program_id() -> Pubkey {
    spl_token_2022::id()
}

/// Largest decimals value whose scale factor still fits the mint amount domain
pub const MAX_DECIMALS: u8 = 18;

/// Form defaults
pub const DEFAULT_DECIMALS: u8 = 9;
pub const DEFAULT_SUPPLY: &str = "100";

/// Cluster endpoints
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const EXPLORER_URL: &str = "https://explorer.solana.com";

/// Pinata endpoints
pub const PINATA_API_URL: &str = "https://api.pinata.cloud";
pub const PINATA_GATEWAY_URL: &str = "https://gateway.pinata.cloud";
pub const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";
pub const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";

/// Category recorded in the off-chain metadata document
pub const METADATA_CATEGORY: &str = "image";
