//! Sentinel state: configured engines built once at boot.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::artifact::{ArtifactResolver, ClusterDirectory, ClusterIdentity, ResolvedArtifacts};
use crate::conf::SentinelConfig;
use crate::status::{LogStatusParser, ZoneStatusMap};

/// Immutable bundle handed to every request.
///
/// Holds no per-request state; the only interior mutability is the optional
/// listing cache inside the resolver.
#[derive(Debug)]
pub struct SentinelState {
    pub config: SentinelConfig,
    pub status_parser: LogStatusParser,
    pub artifact_resolver: ArtifactResolver,
}

impl SentinelState {
    /// Build engines from an already validated config.
    pub fn new(config: SentinelConfig) -> Self {
        let status_parser = LogStatusParser::new(
            config.status.zone_gating,
            &config.status.negatable_zones,
        );

        let mut artifact_resolver = ArtifactResolver::new(
            config.artifacts.layout(),
            ClusterDirectory::new(config.artifacts.clusters.clone()),
            config.artifacts.graphs_dir.as_str(),
        );
        if config.artifacts.listing_cache {
            artifact_resolver = artifact_resolver.with_listing_cache();
        }

        Self {
            config,
            status_parser,
            artifact_resolver,
        }
    }

    pub fn attack_log_path(&self) -> &Path {
        Path::new(&self.config.attack_log_path)
    }

    pub fn static_root(&self) -> PathBuf {
        PathBuf::from(&self.config.static_root)
    }

    /// Zone status from the configured attack log.
    pub fn zone_status(&self) -> ZoneStatusMap {
        self.status_parser.parse_file(self.attack_log_path())
    }

    /// Area and naming token for `cluster_id`, without listing any directory.
    pub fn identity(&self, cluster_id: u32) -> ClusterIdentity {
        self.artifact_resolver.identify(cluster_id)
    }

    /// Report paths for `cluster_id` under the configured static root.
    pub fn artifacts(&self, cluster_id: u32) -> ResolvedArtifacts {
        self.artifact_resolver.resolve(cluster_id, &self.static_root())
    }
}

pub type SharedState = Arc<SentinelState>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::TokenSource;
    use crate::status::{Zone, ZoneGating, ZoneStatus};

    fn config_in(dir: &Path) -> SentinelConfig {
        SentinelConfig {
            attack_log_path: dir.join("attack_log.txt").to_string_lossy().into_owned(),
            static_root: dir.join("static").to_string_lossy().into_owned(),
            ..SentinelConfig::default()
        }
    }

    #[test]
    fn test_zone_status_reads_configured_log() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("attack_log.txt"), "ATTACK DETECTED AT CC3").unwrap();
        let state = SentinelState::new(config_in(dir.path()));
        assert_eq!(state.zone_status().get(Zone::Housing), &ZoneStatus::danger(None));
    }

    #[test]
    fn test_gating_policy_flows_from_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("attack_log.txt"), "ATTACK DETECTED AT CC3").unwrap();
        let mut config = config_in(dir.path());
        config.status.zone_gating = ZoneGating::ConfirmedClear;
        let state = SentinelState::new(config);
        assert_eq!(state.status_parser.gating(), ZoneGating::ConfirmedClear);
        assert_eq!(state.zone_status().get(Zone::Housing), &ZoneStatus::normal());
    }

    #[test]
    fn test_artifacts_use_configured_static_root() {
        let dir = tempfile::tempdir().unwrap();
        let graphs = dir.path().join("static").join("graphs");
        std::fs::create_dir_all(&graphs).unwrap();
        std::fs::write(graphs.join("network_stats_3e-ad-42_Total_Bytes.html"), "").unwrap();

        let mut config = config_in(dir.path());
        config.artifacts.listing_cache = true;
        let state = SentinelState::new(config);
        let resolved = state.artifacts(3);
        assert_eq!(resolved.naming.source, TokenSource::Discovered);
        assert_eq!(resolved.naming.value, "3e-ad-42");
    }

    #[test]
    fn test_identity_ignores_drifted_reports() {
        let dir = tempfile::tempdir().unwrap();
        let graphs = dir.path().join("static").join("graphs");
        std::fs::create_dir_all(&graphs).unwrap();
        std::fs::write(graphs.join("network_stats_3e-ad-42_Total_Bytes.html"), "").unwrap();

        let state = SentinelState::new(config_in(dir.path()));
        let identity = state.identity(3);
        assert_eq!(identity.area, "Housing Area");
        assert_eq!(identity.token, "3e-ad-ec-b3-cc-5f");
        assert!(!state.identity(42).is_known());
    }
}
