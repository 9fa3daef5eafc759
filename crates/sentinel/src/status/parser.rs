//! Parser: turns attack-log evidence into a per-zone status map.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grammar::ZoneMarkers;
use super::model::{LogEvidence, Zone, ZoneStatus, ZoneStatusMap};

/// Whether the Housing zone is evaluated independently of the Hostel zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneGating {
    /// Every zone is evaluated on its own evidence.
    #[default]
    Unconditional,
    /// Housing is only evaluated once Hostel has been explicitly cleared by a
    /// "no attack detected" marker; otherwise it stays normal.
    #[serde(alias = "gated")]
    ConfirmedClear,
}

impl ZoneGating {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneGating::Unconditional => "unconditional",
            ZoneGating::ConfirmedClear => "confirmed_clear",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "unconditional" => Some(ZoneGating::Unconditional),
            "confirmed_clear" | "gated" => Some(ZoneGating::ConfirmedClear),
            _ => None,
        }
    }
}

/// What the log says about one zone.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Verdict {
    Silent,
    Cleared,
    Attack(Option<String>),
}

impl Verdict {
    fn into_status(self) -> ZoneStatus {
        match self {
            Verdict::Silent => ZoneStatus::normal(),
            Verdict::Cleared => ZoneStatus::cleared(),
            Verdict::Attack(label) => ZoneStatus::danger(label.as_deref()),
        }
    }
}

/// Attack-log status parser.
///
/// Stateless between calls: the only fields are the policy and the marker
/// phrases, all fixed at construction.
#[derive(Debug, Clone)]
pub struct LogStatusParser {
    gating: ZoneGating,
    negatable: Vec<Zone>,
    markers: [(Zone, ZoneMarkers); 3],
}

impl LogStatusParser {
    /// Parser with the given gating policy. `negatable` lists the zones whose
    /// "no attack detected" marker overrides their danger marker.
    pub fn new(gating: ZoneGating, negatable: &[Zone]) -> Self {
        Self {
            gating,
            negatable: negatable.to_vec(),
            markers: Zone::ALL.map(|z| (z, ZoneMarkers::for_code(z.code()))),
        }
    }

    pub fn gating(&self) -> ZoneGating {
        self.gating
    }

    /// Parse log evidence into a complete status map. `None` means no log.
    pub fn parse(&self, evidence: Option<&[u8]>) -> ZoneStatusMap {
        let mut statuses = ZoneStatusMap::all_normal();
        let Some(text) = evidence else {
            return statuses;
        };

        let mut hostel_cleared = false;
        for (zone, markers) in &self.markers {
            if *zone == Zone::Housing
                && self.gating == ZoneGating::ConfirmedClear
                && !hostel_cleared
            {
                debug!(zone = zone.as_str(), "Skipping zone: hostel not confirmed clear");
                continue;
            }

            let verdict = self.evaluate(*zone, markers, text);
            if *zone == Zone::Hostel {
                hostel_cleared = verdict == Verdict::Cleared;
            }
            if verdict != Verdict::Silent {
                debug!(zone = zone.as_str(), verdict = ?verdict, "Zone evidence found");
            }
            statuses.set(*zone, verdict.into_status());
        }

        statuses
    }

    /// Read the log at `path` and parse it. A missing or unreadable file gives
    /// the all-normal map.
    pub fn parse_file(&self, path: &Path) -> ZoneStatusMap {
        let evidence = LogEvidence::load(path);
        self.parse(evidence.as_ref().map(LogEvidence::as_bytes))
    }

    fn evaluate(&self, zone: Zone, markers: &ZoneMarkers, text: &[u8]) -> Verdict {
        // The clearance phrase contains the danger phrase, so it is checked first.
        if self.negatable.contains(&zone) && markers.clearance.is_present(text) {
            return Verdict::Cleared;
        }
        if markers.danger.is_present(text) {
            return Verdict::Attack(markers.capture_label(text));
        }
        Verdict::Silent
    }
}

impl Default for LogStatusParser {
    fn default() -> Self {
        Self::new(ZoneGating::default(), &[Zone::Hostel])
    }
}
