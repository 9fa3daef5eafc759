//! Boot: logging init, config load and validation, state creation.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::SentinelConfig;
use crate::error::ConfigError;
use crate::state::{SentinelState, SharedState};

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr so stdout stays a clean JSON stream.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentinel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load and validate config, then build the shared engine state.
///
/// Table errors are caught here so the engines never see them at request time.
pub fn boot(config_path: Option<&str>) -> Result<SharedState, ConfigError> {
    info!("Starting netsentinel v{}", env!("CARGO_PKG_VERSION"));

    let config = SentinelConfig::load(config_path)?;
    config.validate().map_err(|e| {
        error!("Configuration rejected: {}", e);
        e
    })?;

    info!(
        "Loaded configuration: attack_log={}, static_root={}",
        config.attack_log_path, config.static_root
    );
    info!(
        "Zone gating: {}, clusters: {}, listing cache: {}",
        config.status.zone_gating.as_str(),
        config.artifacts.clusters.len(),
        config.artifacts.listing_cache
    );

    Ok(Arc::new(SentinelState::new(config)))
}
