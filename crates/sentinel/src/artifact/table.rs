//! Table: static cluster id → zone / naming token lookup.

use serde::{Deserialize, Serialize};

use super::model::UNKNOWN_TOKEN;
use crate::status::Zone;

pub const UNKNOWN_AREA: &str = "Unknown Area";

/// One row of the cluster table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterEntry {
    pub id: u32,
    pub zone: Zone,
    /// Canonical token used in report filenames
    pub token: String,
    /// Stable leading part of the token. Present only for clusters whose
    /// generated filenames are known to drift; enables directory discovery.
    #[serde(default)]
    pub discovery_prefix: Option<String>,
}

/// Result of a cluster lookup. Unknown ids resolve to sentinel values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterIdentity {
    pub cluster_id: u32,
    pub zone: Option<Zone>,
    pub area: String,
    pub token: String,
    pub discovery_prefix: Option<String>,
}

impl ClusterIdentity {
    pub fn is_known(&self) -> bool {
        self.zone.is_some()
    }
}

/// Total lookup over the configured cluster table.
#[derive(Debug, Clone)]
pub struct ClusterDirectory {
    entries: Vec<ClusterEntry>,
}

impl ClusterDirectory {
    pub fn new(entries: Vec<ClusterEntry>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, cluster_id: u32) -> ClusterIdentity {
        match self.entries.iter().find(|e| e.id == cluster_id) {
            Some(entry) => ClusterIdentity {
                cluster_id,
                zone: Some(entry.zone),
                area: entry.zone.display_name().to_string(),
                token: entry.token.clone(),
                discovery_prefix: entry.discovery_prefix.clone(),
            },
            None => ClusterIdentity {
                cluster_id,
                zone: None,
                area: UNKNOWN_AREA.to_string(),
                token: UNKNOWN_TOKEN.to_string(),
                discovery_prefix: None,
            },
        }
    }

    /// Identities of every configured cluster, ordered by id.
    pub fn identities(&self) -> Vec<ClusterIdentity> {
        let mut ids: Vec<u32> = self.entries.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.into_iter().map(|id| self.lookup(id)).collect()
    }
}

/// The deployed campus layout. Clusters 2 and 3 regenerate their reports with
/// a drifting hardware suffix, so only their prefixes are trusted.
pub fn default_clusters() -> Vec<ClusterEntry> {
    vec![
        ClusterEntry {
            id: 1,
            zone: Zone::Academic,
            token: "1e-97-ec-b3-cc-5f".to_string(),
            discovery_prefix: None,
        },
        ClusterEntry {
            id: 2,
            zone: Zone::Hostel,
            token: "2e-bc-ec-b3-cc-5f".to_string(),
            discovery_prefix: Some("2e-bc".to_string()),
        },
        ClusterEntry {
            id: 3,
            zone: Zone::Housing,
            token: "3e-ad-ec-b3-cc-5f".to_string(),
            discovery_prefix: Some("3e-ad".to_string()),
        },
    ]
}

impl Default for ClusterDirectory {
    fn default() -> Self {
        Self::new(default_clusters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_cluster() {
        let identity = ClusterDirectory::default().lookup(2);
        assert_eq!(identity.zone, Some(Zone::Hostel));
        assert_eq!(identity.area, "Hostel Area");
        assert_eq!(identity.token, "2e-bc-ec-b3-cc-5f");
        assert_eq!(identity.discovery_prefix.as_deref(), Some("2e-bc"));
        assert!(identity.is_known());
    }

    #[test]
    fn test_lookup_stable_cluster_has_no_prefix() {
        let identity = ClusterDirectory::default().lookup(1);
        assert_eq!(identity.area, "Academic Area");
        assert!(identity.discovery_prefix.is_none());
    }

    #[test]
    fn test_lookup_unknown_cluster() {
        let identity = ClusterDirectory::default().lookup(42);
        assert_eq!(identity.cluster_id, 42);
        assert_eq!(identity.zone, None);
        assert_eq!(identity.area, "Unknown Area");
        assert_eq!(identity.token, "unknown");
        assert!(identity.discovery_prefix.is_none());
        assert!(!identity.is_known());
    }

    #[test]
    fn test_lookup_zero_is_unknown() {
        assert!(!ClusterDirectory::default().lookup(0).is_known());
    }

    #[test]
    fn test_identities_sorted_by_id() {
        let mut entries = default_clusters();
        entries.reverse();
        let ids: Vec<u32> = ClusterDirectory::new(entries)
            .identities()
            .iter()
            .map(|i| i.cluster_id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_default_tokens_start_with_prefix() {
        for entry in default_clusters() {
            if let Some(prefix) = &entry.discovery_prefix {
                assert!(entry.token.starts_with(prefix.as_str()));
            }
        }
    }
}
