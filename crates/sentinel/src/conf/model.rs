//! Model: SentinelConfig and related structs.

use serde::{Deserialize, Serialize};

use crate::artifact::table::{default_clusters, ClusterEntry};
use crate::artifact::ArtifactLayout;
use crate::status::{Zone, ZoneGating};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    /// Intrusion detector output scanned for zone status
    pub attack_log_path: String,
    /// Root of the static asset tree holding generated reports
    pub static_root: String,
    pub status: StatusConfig,
    pub artifacts: ArtifactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub zone_gating: ZoneGating,
    /// Zones whose "no attack detected" marker overrides their danger marker
    pub negatable_zones: Vec<Zone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Report directory, relative to `static_root`
    pub graphs_dir: String,
    /// URL prefix prepended to every resolved report
    pub url_prefix: String,
    pub file_stem: String,
    pub extension: String,
    pub listing_cache: bool,
    pub clusters: Vec<ClusterEntry>,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            attack_log_path: "attack_log.txt".to_string(),
            static_root: "static".to_string(),
            status: StatusConfig::default(),
            artifacts: ArtifactConfig::default(),
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            zone_gating: ZoneGating::Unconditional,
            negatable_zones: vec![Zone::Hostel],
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        let layout = ArtifactLayout::default();
        Self {
            graphs_dir: "graphs".to_string(),
            url_prefix: layout.url_prefix,
            file_stem: layout.stem,
            extension: layout.extension,
            listing_cache: false,
            clusters: default_clusters(),
        }
    }
}

impl ArtifactConfig {
    pub fn layout(&self) -> ArtifactLayout {
        ArtifactLayout {
            url_prefix: self.url_prefix.clone(),
            stem: self.file_stem.clone(),
            extension: self.extension.clone(),
        }
    }
}
