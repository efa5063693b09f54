// CLI tool for launching tokens
//
// Creates Token-2022 fungible tokens with optional pinned image and metadata,
// paying and signing with a local wallet keypair.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use launchpad_sdk::{logging, LaunchpadConfig};

/// Configuration file read when `--config` is not given
const DEFAULT_CONFIG_PATH: &str = "launchpad.toml";

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Token-2022 launchpad CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./launchpad.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RPC URL to connect to (overrides the config file)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Path to wallet keypair file (overrides the config file)
    #[arg(long)]
    wallet: Option<String>,

    /// Log level (overrides the config file, RUST_LOG wins over both)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new token
    Create(commands::create::CreateCmd),

    /// Write an example configuration file
    InitConfig(commands::init_config::InitConfigCmd),
}

impl Cli {
    fn load_config(&self) -> Result<LaunchpadConfig> {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                default.exists().then_some(default)
            }
        };

        let mut config = LaunchpadConfig::load(path.as_deref()).with_context(|| match &path {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Failed to load config from the environment".to_string(),
        })?;

        if let Some(rpc_url) = &self.rpc_url {
            config.cluster.rpc_url = rpc_url.clone();
        }
        if let Some(wallet) = &self.wallet {
            config.wallet.keypair_path = wallet.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        config.validate_sections()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::InitConfig(ref cmd) => commands::init_config::execute(cmd),
        Commands::Create(ref cmd) => {
            let config = cli.load_config()?;
            logging::init(&config.logging)?;
            commands::create::execute(cmd, &config).await
        }
    }
}
