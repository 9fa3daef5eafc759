//! Model: metric keys, naming tokens and the resolved artifact map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Report metrics rendered per cluster. Identifiers are stable across
/// deployments; the presentation layer keys its chart slots on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    RxTotalPackets,
    RxAvgPackets,
    RxMinPackets,
    RxMaxPackets,
    TxTotalPackets,
    TxAvgPackets,
    TxMinPackets,
    TxMaxPackets,
    RxBytes,
    TxBytes,
    RxErrors,
    TxErrors,
    RxUtilization,
    TxUtilization,
    BufferOccupancy,
    Throughput,
    TotalBytes,
    TotalErrors,
    TotalPackets,
    LatestTimestamp,
    NumberOfPorts,
}

/// Key → filename suffix. Single source for every naming scheme.
const SUFFIXES: [(MetricKey, &str); 21] = [
    (MetricKey::RxTotalPackets, "Total_Rx_Packets"),
    (MetricKey::RxAvgPackets, "Average_Rx_Packets"),
    (MetricKey::RxMinPackets, "Min_Rx_Packets"),
    (MetricKey::RxMaxPackets, "Max_Rx_Packets"),
    (MetricKey::TxTotalPackets, "Total_Tx_Packets"),
    (MetricKey::TxAvgPackets, "Average_Tx_Packets"),
    (MetricKey::TxMinPackets, "Min_Tx_Packets"),
    (MetricKey::TxMaxPackets, "Max_Tx_Packets"),
    (MetricKey::RxBytes, "Average_Rx_Bytes"),
    (MetricKey::TxBytes, "Average_Tx_Bytes"),
    (MetricKey::RxErrors, "Average_Rx_Errors"),
    (MetricKey::TxErrors, "Average_Tx_Errors"),
    (MetricKey::RxUtilization, "Average_Rx_Utilization"),
    (MetricKey::TxUtilization, "Average_Tx_Utilization"),
    (MetricKey::BufferOccupancy, "Average_Buffer_Occupancy"),
    (MetricKey::Throughput, "Average_Throughput_(Mbps)"),
    (MetricKey::TotalBytes, "Total_Bytes"),
    (MetricKey::TotalErrors, "Total_Errors"),
    (MetricKey::TotalPackets, "Total_Packets"),
    (MetricKey::LatestTimestamp, "Latest_Timestamp"),
    (MetricKey::NumberOfPorts, "Number_of_Ports"),
];

impl MetricKey {
    pub const ALL: [MetricKey; 21] = [
        MetricKey::RxTotalPackets,
        MetricKey::RxAvgPackets,
        MetricKey::RxMinPackets,
        MetricKey::RxMaxPackets,
        MetricKey::TxTotalPackets,
        MetricKey::TxAvgPackets,
        MetricKey::TxMinPackets,
        MetricKey::TxMaxPackets,
        MetricKey::RxBytes,
        MetricKey::TxBytes,
        MetricKey::RxErrors,
        MetricKey::TxErrors,
        MetricKey::RxUtilization,
        MetricKey::TxUtilization,
        MetricKey::BufferOccupancy,
        MetricKey::Throughput,
        MetricKey::TotalBytes,
        MetricKey::TotalErrors,
        MetricKey::TotalPackets,
        MetricKey::LatestTimestamp,
        MetricKey::NumberOfPorts,
    ];

    /// Filename suffix of the generated report for this metric.
    pub fn suffix(&self) -> &'static str {
        SUFFIXES
            .iter()
            .find(|(key, _)| key == self)
            .map(|(_, suffix)| *suffix)
            .unwrap_or_default()
    }
}

/// Where a naming token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    /// Static cluster table
    Configured,
    /// Recovered from a report file present on disk
    Discovered,
    /// Sentinel for cluster ids missing from the table
    Unknown,
}

/// Variable filename segment identifying a cluster's report set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingToken {
    pub value: String,
    pub source: TokenSource,
}

pub const UNKNOWN_TOKEN: &str = "unknown";

impl NamingToken {
    pub fn configured(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            source: TokenSource::Configured,
        }
    }

    pub fn discovered(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            source: TokenSource::Discovered,
        }
    }

    pub fn unknown() -> Self {
        Self {
            value: UNKNOWN_TOKEN.to_string(),
            source: TokenSource::Unknown,
        }
    }
}

/// Filename template shared by every naming scheme:
/// `{url_prefix}/{stem}_{token}_{suffix}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    pub url_prefix: String,
    pub stem: String,
    pub extension: String,
}

impl ArtifactLayout {
    /// Filename prefix shared by every report whose token starts with `token_prefix`.
    pub fn file_prefix(&self, token_prefix: &str) -> String {
        format!("{}_{}", self.stem, token_prefix)
    }

    pub fn file_name(&self, token: &str, key: MetricKey) -> String {
        format!("{}_{}_{}.{}", self.stem, token, key.suffix(), self.extension)
    }

    pub fn path(&self, token: &str, key: MetricKey) -> String {
        let prefix = self.url_prefix.trim_end_matches('/');
        format!("{}/{}", prefix, self.file_name(token, key))
    }

    /// Render the full map for one token.
    pub fn render(&self, token: &str) -> ResolvedArtifactMap {
        ResolvedArtifactMap(
            MetricKey::ALL
                .into_iter()
                .map(|key| (key, self.path(token, key)))
                .collect(),
        )
    }
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self {
            url_prefix: "/static/graphs".to_string(),
            stem: "network_stats".to_string(),
            extension: "html".to_string(),
        }
    }
}

/// Total map from every [`MetricKey`] to a report path.
///
/// Only [`ArtifactLayout::render`] builds one, so every map carries all keys
/// and a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedArtifactMap(BTreeMap<MetricKey, String>);

impl ResolvedArtifactMap {
    pub fn get(&self, key: MetricKey) -> &str {
        &self.0[&key]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MetricKey, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
