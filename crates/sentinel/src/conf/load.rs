//! Load: config loading from file and environment variables, plus startup
//! validation of the static tables.

use std::collections::HashSet;
use std::path::Path;

use super::model::SentinelConfig;
use crate::error::ConfigError;
use crate::status::ZoneGating;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/netsentinel/sentinel.toml";

/// Delimiter between filename segments; tokens must not contain it.
const SEGMENT_DELIMITER: char = '_';

impl SentinelConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// An explicit `path` must exist and parse. Otherwise `SENTINEL_CONFIG_FILE`
    /// or [`DEFAULT_CONFIG_PATH`] is used when present, falling back to defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            tracing::info!("Loading configuration from: {}", path);
            let mut config = Self::from_file(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            return Ok(config);
        }

        let config_path = std::env::var("SENTINEL_CONFIG_FILE")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            let mut config = Self::from_file(&config_path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            Ok(config)
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Ok(Self::from_env())
        }
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply `SENTINEL_*` overrides read through `lookup`.
    ///
    /// Unparseable values are ignored with a warning and the current value kept.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SENTINEL_LOG_PATH") {
            self.attack_log_path = path;
        }
        if let Some(root) = lookup("SENTINEL_STATIC_ROOT") {
            self.static_root = root;
        }
        if let Some(dir) = lookup("SENTINEL_GRAPHS_DIR") {
            self.artifacts.graphs_dir = dir;
        }
        if let Some(raw) = lookup("SENTINEL_ZONE_GATING") {
            match ZoneGating::from_name(&raw) {
                Some(gating) => self.status.zone_gating = gating,
                None => tracing::warn!("Ignoring SENTINEL_ZONE_GATING={}: expected unconditional or confirmed_clear", raw),
            }
        }
        if let Some(raw) = lookup("SENTINEL_LISTING_CACHE") {
            match raw.trim().parse::<bool>() {
                Ok(enabled) => self.artifacts.listing_cache = enabled,
                Err(_) => tracing::warn!("Ignoring SENTINEL_LISTING_CACHE={}: expected true or false", raw),
            }
        }
    }

    /// Validate configuration values and the cluster table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attack_log_path.is_empty() {
            return Err(ConfigError::invalid("attack_log_path must not be empty"));
        }
        if self.static_root.is_empty() {
            return Err(ConfigError::invalid("static_root must not be empty"));
        }

        let artifacts = &self.artifacts;
        if artifacts.graphs_dir.is_empty() {
            return Err(ConfigError::invalid("artifacts.graphs_dir must not be empty"));
        }
        if artifacts.url_prefix.is_empty() {
            return Err(ConfigError::invalid("artifacts.url_prefix must not be empty"));
        }
        if artifacts.file_stem.is_empty() {
            return Err(ConfigError::invalid("artifacts.file_stem must not be empty"));
        }
        if artifacts.extension.is_empty() || artifacts.extension.contains('.') {
            return Err(ConfigError::invalid(
                "artifacts.extension must be non-empty and given without a leading dot",
            ));
        }

        let mut seen = HashSet::new();
        for cluster in &artifacts.clusters {
            if !seen.insert(cluster.id) {
                return Err(ConfigError::invalid(format!("duplicate cluster id {}", cluster.id)));
            }
            validate_segment(&cluster.token, cluster.id, "token")?;
            if let Some(prefix) = &cluster.discovery_prefix {
                validate_segment(prefix, cluster.id, "discovery_prefix")?;
                if !cluster.token.starts_with(prefix.as_str()) {
                    return Err(ConfigError::invalid(format!(
                        "cluster {}: token {} does not start with discovery_prefix {}",
                        cluster.id, cluster.token, prefix
                    )));
                }
            }
        }
        Ok(())
    }
}

fn validate_segment(value: &str, cluster_id: u32, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::invalid(format!("cluster {}: {} must not be empty", cluster_id, field)));
    }
    if value.contains(SEGMENT_DELIMITER) {
        return Err(ConfigError::invalid(format!(
            "cluster {}: {} {} must not contain '{}'",
            cluster_id, field, value, SEGMENT_DELIMITER
        )));
    }
    Ok(())
}
