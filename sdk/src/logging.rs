//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    config::LoggingConfig,
    core::{LaunchError, LaunchResult},
};

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> LaunchResult<()> {
    let log_level = config
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("launchpad={0},launchpad_sdk={0},reqwest=warn", log_level).into()
    });

    let result = if config.structured {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init()
    };

    result.map_err(|e| LaunchError::Config(format!("Failed to initialize logging: {}", e)))
}
