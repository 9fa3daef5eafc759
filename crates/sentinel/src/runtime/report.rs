//! Report: JSON envelopes written by the CLI for the presentation layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::artifact::ClusterIdentity;
use crate::state::SentinelState;
use crate::status::ZoneStatusMap;

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub generated_at: DateTime<Utc>,
    pub attack_log: String,
    pub zones: ZoneStatusMap,
}

impl StatusReport {
    pub fn new(attack_log: impl Into<String>, zones: ZoneStatusMap) -> Self {
        Self {
            generated_at: Utc::now(),
            attack_log: attack_log.into(),
            zones,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterListing {
    pub clusters: Vec<ClusterIdentity>,
}

impl ClusterListing {
    pub fn from_state(state: &SentinelState) -> Self {
        Self {
            clusters: state.artifact_resolver.clusters().identities(),
        }
    }
}
