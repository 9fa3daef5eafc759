//! Resolver: cluster id + static root → report path for every metric.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::cache::ListingCache;
use super::discover::{list_report_names, recover_token};
use super::model::{ArtifactLayout, NamingToken, ResolvedArtifactMap};
use super::table::{ClusterDirectory, ClusterIdentity};

/// Resolution result handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArtifacts {
    #[serde(flatten)]
    pub identity: ClusterIdentity,
    /// Token actually used to render `artifacts`
    pub naming: NamingToken,
    pub artifacts: ResolvedArtifactMap,
}

/// Maps logical metrics to generated report locations.
///
/// Read-only with respect to the filesystem. Without a listing cache the
/// resolver holds no mutable state; with one, state is confined to the
/// instance and invalidated by directory mtime.
#[derive(Debug)]
pub struct ArtifactResolver {
    layout: ArtifactLayout,
    directory: ClusterDirectory,
    /// Report directory, relative to the static root passed to `resolve`
    graphs_dir: PathBuf,
    cache: Option<ListingCache>,
}

impl ArtifactResolver {
    pub fn new(layout: ArtifactLayout, directory: ClusterDirectory, graphs_dir: impl Into<PathBuf>) -> Self {
        Self {
            layout,
            directory,
            graphs_dir: graphs_dir.into(),
            cache: None,
        }
    }

    /// Enable the mtime-keyed listing cache for this instance.
    pub fn with_listing_cache(mut self) -> Self {
        self.cache = Some(ListingCache::new());
        self
    }

    pub fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    pub fn clusters(&self) -> &ClusterDirectory {
        &self.directory
    }

    /// Static lookup only; never touches the filesystem.
    pub fn identify(&self, cluster_id: u32) -> ClusterIdentity {
        self.directory.lookup(cluster_id)
    }

    /// Resolve every metric for `cluster_id`.
    ///
    /// Clusters with a discovery prefix get their token from the report
    /// directory when a matching report exists; the whole map is then rendered
    /// from that token. Any listing failure falls back to the configured token.
    pub fn resolve(&self, cluster_id: u32, static_root: &Path) -> ResolvedArtifacts {
        let identity = self.directory.lookup(cluster_id);

        let naming = if !identity.is_known() {
            NamingToken::unknown()
        } else {
            identity
                .discovery_prefix
                .as_deref()
                .and_then(|prefix| self.discover(&static_root.join(&self.graphs_dir), prefix))
                .map(NamingToken::discovered)
                .unwrap_or_else(|| NamingToken::configured(identity.token.as_str()))
        };

        if naming.value != identity.token {
            info!(
                cluster_id,
                configured = %identity.token,
                discovered = %naming.value,
                "Report naming drifted from configured token"
            );
        }

        let artifacts = self.layout.render(&naming.value);
        ResolvedArtifacts {
            identity,
            naming,
            artifacts,
        }
    }

    fn discover(&self, dir: &Path, prefix: &str) -> Option<String> {
        let token = match &self.cache {
            Some(cache) => recover_token(&self.layout, &cache.listing(dir)?, prefix),
            None => recover_token(&self.layout, &list_report_names(dir)?, prefix),
        };
        if token.is_none() {
            debug!(dir = %dir.display(), prefix, "No report matches discovery prefix");
        }
        token
    }
}

impl Default for ArtifactResolver {
    fn default() -> Self {
        Self::new(ArtifactLayout::default(), ClusterDirectory::default(), "graphs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::model::{MetricKey, TokenSource};
    use std::fs;

    fn static_root_with(files: &[&str]) -> tempfile::TempDir {
        let root = tempfile::tempdir().expect("tempdir");
        let graphs = root.path().join("graphs");
        fs::create_dir_all(&graphs).expect("mkdir");
        for name in files {
            fs::write(graphs.join(name), "<html></html>").expect("write");
        }
        root
    }

    fn assert_single_token(resolved: &ResolvedArtifacts, token: &str) {
        assert_eq!(resolved.artifacts.len(), MetricKey::ALL.len());
        for key in MetricKey::ALL {
            let expected = format!("/static/graphs/network_stats_{}_{}.html", token, key.suffix());
            assert_eq!(resolved.artifacts.get(key), expected);
        }
    }

    // ── Primary scheme ───────────────────────────────────────────

    #[test]
    fn test_primary_map_for_stable_cluster() {
        let root = static_root_with(&[]);
        let resolved = ArtifactResolver::default().resolve(1, root.path());
        assert_eq!(resolved.identity.area, "Academic Area");
        assert_eq!(resolved.naming.source, TokenSource::Configured);
        assert_single_token(&resolved, "1e-97-ec-b3-cc-5f");
    }

    #[test]
    fn test_stable_cluster_ignores_directory_contents() {
        let root = static_root_with(&["network_stats_1e-97-ff-ff_Total_Bytes.html"]);
        let resolved = ArtifactResolver::default().resolve(1, root.path());
        assert_single_token(&resolved, "1e-97-ec-b3-cc-5f");
    }

    #[test]
    fn test_unstable_cluster_without_directory() {
        let root = tempfile::tempdir().expect("tempdir");
        let resolved = ArtifactResolver::default().resolve(2, root.path());
        assert_eq!(resolved.naming.source, TokenSource::Configured);
        assert_single_token(&resolved, "2e-bc-ec-b3-cc-5f");
    }

    #[test]
    fn test_unstable_cluster_without_matching_files() {
        let root = static_root_with(&["network_stats_3e-ad-01_Total_Bytes.html", "README"]);
        let resolved = ArtifactResolver::default().resolve(2, root.path());
        assert_single_token(&resolved, "2e-bc-ec-b3-cc-5f");
    }

    // ── Discovery ────────────────────────────────────────────────

    #[test]
    fn test_drifted_token_replaces_whole_map() {
        let root = static_root_with(&[
            "network_stats_2e-bc-de-ad-be-ef_Total_Bytes.html",
            "network_stats_2e-bc-de-ad-be-ef_Average_Throughput_(Mbps).html",
        ]);
        let resolved = ArtifactResolver::default().resolve(2, root.path());
        assert_eq!(resolved.naming, NamingToken::discovered("2e-bc-de-ad-be-ef"));
        assert_single_token(&resolved, "2e-bc-de-ad-be-ef");
    }

    #[test]
    fn test_configured_files_present_still_discovered() {
        let root = static_root_with(&["network_stats_3e-ad-ec-b3-cc-5f_Total_Bytes.html"]);
        let resolved = ArtifactResolver::default().resolve(3, root.path());
        assert_eq!(resolved.naming.source, TokenSource::Discovered);
        assert_single_token(&resolved, "3e-ad-ec-b3-cc-5f");
    }

    #[test]
    fn test_multiple_candidates_sorted_tie_break() {
        let root = static_root_with(&[
            "network_stats_3e-ad-zz_Total_Bytes.html",
            "network_stats_3e-ad-aa_Total_Bytes.html",
            "network_stats_3e-ad-mm_Total_Bytes.html",
        ]);
        let resolved = ArtifactResolver::default().resolve(3, root.path());
        assert_single_token(&resolved, "3e-ad-aa");
    }

    #[test]
    fn test_graphs_path_is_a_file() {
        let root = tempfile::tempdir().expect("tempdir");
        fs::write(root.path().join("graphs"), "").expect("write");
        let resolved = ArtifactResolver::default().resolve(2, root.path());
        assert_single_token(&resolved, "2e-bc-ec-b3-cc-5f");
    }

    #[test]
    fn test_resolve_does_not_touch_filesystem() {
        let root = tempfile::tempdir().expect("tempdir");
        ArtifactResolver::default().resolve(2, root.path());
        assert!(!root.path().join("graphs").exists());
    }

    // ── Identity ─────────────────────────────────────────────────

    #[test]
    fn test_identify_matches_directory_lookup() {
        let resolver = ArtifactResolver::default();
        for id in [1, 2, 3, 0, 99] {
            assert_eq!(resolver.identify(id), resolver.clusters().lookup(id));
        }
        assert_eq!(resolver.identify(3).area, "Housing Area");
        assert_eq!(resolver.identify(99).area, "Unknown Area");
    }

    #[test]
    fn test_identify_never_lists_directory() {
        let root = static_root_with(&["network_stats_2e-bc-01_Total_Bytes.html"]);
        let resolver = ArtifactResolver::new(
            ArtifactLayout::default(),
            ClusterDirectory::default(),
            root.path().join("graphs"),
        )
        .with_listing_cache();

        let identity = resolver.identify(2);
        assert_eq!(identity.token, "2e-bc-ec-b3-cc-5f");
        assert!(resolver.cache.as_ref().is_some_and(ListingCache::is_empty));
    }

    // ── Unknown clusters ─────────────────────────────────────────

    #[test]
    fn test_unknown_cluster_is_total() {
        let root = static_root_with(&["network_stats_2e-bc-01_Total_Bytes.html"]);
        let resolved = ArtifactResolver::default().resolve(99, root.path());
        assert_eq!(resolved.identity.area, "Unknown Area");
        assert_eq!(resolved.naming, NamingToken::unknown());
        assert_single_token(&resolved, "unknown");
    }

    // ── Determinism ──────────────────────────────────────────────

    #[test]
    fn test_resolve_is_idempotent() {
        let root = static_root_with(&[
            "network_stats_2e-bc-b_Total_Bytes.html",
            "network_stats_2e-bc-a_Total_Bytes.html",
        ]);
        let resolver = ArtifactResolver::default();
        let first = resolver.resolve(2, root.path());
        let second = resolver.resolve(2, root.path());
        assert_eq!(first, second);
    }

    #[test]
    fn test_cached_resolver_matches_uncached() {
        let root = static_root_with(&["network_stats_2e-bc-77_Total_Bytes.html"]);
        let plain = ArtifactResolver::default();
        let cached = ArtifactResolver::default().with_listing_cache();
        for _ in 0..2 {
            assert_eq!(plain.resolve(2, root.path()), cached.resolve(2, root.path()));
        }
    }

    #[test]
    fn test_custom_graphs_dir_and_layout() {
        let root = tempfile::tempdir().expect("tempdir");
        let reports = root.path().join("reports");
        fs::create_dir(&reports).unwrap();
        fs::write(reports.join("stats_2e-bc-9_Total_Bytes.png"), "").unwrap();

        let layout = ArtifactLayout {
            url_prefix: "/reports".to_string(),
            stem: "stats".to_string(),
            extension: "png".to_string(),
        };
        let resolver = ArtifactResolver::new(layout, ClusterDirectory::default(), "reports");
        let resolved = resolver.resolve(2, root.path());
        assert_eq!(
            resolved.artifacts.get(MetricKey::TotalBytes),
            "/reports/stats_2e-bc-9_Total_Bytes.png"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let root = tempfile::tempdir().expect("tempdir");
        let resolved = ArtifactResolver::default().resolve(1, root.path());
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["cluster_id"], 1);
        assert_eq!(json["area"], "Academic Area");
        assert_eq!(json["naming"]["source"], "configured");
        assert_eq!(
            json["artifacts"]["rx_bytes"],
            "/static/graphs/network_stats_1e-97-ec-b3-cc-5f_Average_Rx_Bytes.html"
        );
    }
}
