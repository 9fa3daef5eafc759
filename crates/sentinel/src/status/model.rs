//! Model: zones, per-zone status and the raw log evidence.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Named operational area of the monitored network.
///
/// Each zone is bound to exactly one log code (`CC1`..`CC3`) used by the
/// intrusion detector when it writes its findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Academic,
    Hostel,
    Housing,
}

impl Zone {
    /// Evaluation order. Gating policies depend on it.
    pub const ALL: [Zone; 3] = [Zone::Academic, Zone::Hostel, Zone::Housing];

    /// Log code the detector uses for this zone.
    pub fn code(&self) -> &'static str {
        match self {
            Zone::Academic => "CC1",
            Zone::Hostel => "CC2",
            Zone::Housing => "CC3",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Zone::Academic => "Academic Area",
            Zone::Hostel => "Hostel Area",
            Zone::Housing => "Housing Area",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Academic => "academic",
            Zone::Hostel => "hostel",
            Zone::Housing => "housing",
        }
    }

    /// Parse a zone from its snake_case name or its log code.
    pub fn from_name(value: &str) -> Option<Self> {
        let value = value.trim();
        Zone::ALL
            .into_iter()
            .find(|z| z.as_str().eq_ignore_ascii_case(value) || z.code().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneState {
    Normal,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStatus {
    pub state: ZoneState,
    /// Empty when the zone is normal and the log said nothing about it
    pub message: String,
}

impl ZoneStatus {
    pub fn normal() -> Self {
        Self {
            state: ZoneState::Normal,
            message: String::new(),
        }
    }

    /// Normal state backed by an explicit "no attack" marker.
    pub fn cleared() -> Self {
        Self {
            state: ZoneState::Normal,
            message: "No attack detected".to_string(),
        }
    }

    pub fn danger(label: Option<&str>) -> Self {
        let message = match label {
            Some(label) => format!("Possible {} attack detected", label),
            None => "Attack detected".to_string(),
        };
        Self {
            state: ZoneState::Danger,
            message,
        }
    }

    pub fn is_danger(&self) -> bool {
        self.state == ZoneState::Danger
    }
}

impl Default for ZoneStatus {
    fn default() -> Self {
        Self::normal()
    }
}

/// Total map from every [`Zone`] to its status.
///
/// The inner map is private so the one-entry-per-zone invariant cannot be
/// broken by callers; it serializes as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ZoneStatusMap(BTreeMap<Zone, ZoneStatus>);

impl ZoneStatusMap {
    pub fn all_normal() -> Self {
        Self(Zone::ALL.into_iter().map(|z| (z, ZoneStatus::normal())).collect())
    }

    pub fn get(&self, zone: Zone) -> &ZoneStatus {
        // Constructed total; every zone is present.
        &self.0[&zone]
    }

    pub(crate) fn set(&mut self, zone: Zone, status: ZoneStatus) {
        self.0.insert(zone, status);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Zone, &ZoneStatus)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn any_danger(&self) -> bool {
        self.0.values().any(ZoneStatus::is_danger)
    }
}

impl Default for ZoneStatusMap {
    fn default() -> Self {
        Self::all_normal()
    }
}

/// Raw text of an operational log, treated as opaque bytes.
#[derive(Debug, Clone)]
pub struct LogEvidence {
    raw: Bytes,
}

impl LogEvidence {
    pub fn new(raw: impl Into<Bytes>) -> Self {
        Self { raw: raw.into() }
    }

    /// Read the log at `path`.
    ///
    /// Returns `None` when the file is missing or unreadable. A missing log is
    /// the normal state of a quiet network, so it is only logged at debug level.
    pub fn load(path: &Path) -> Option<Self> {
        match std::fs::read(path) {
            Ok(raw) => {
                tracing::debug!(path = %path.display(), bytes = raw.len(), "Loaded attack log");
                Some(Self::new(raw))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Attack log not present, assuming all zones normal");
                None
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Attack log unreadable, assuming all zones normal");
                None
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
