//! Artifact module: metric report path resolution with naming-drift discovery.

pub mod cache;
pub mod discover;
pub mod model;
pub mod resolver;
pub mod table;

pub use model::{ArtifactLayout, MetricKey, NamingToken, ResolvedArtifactMap, TokenSource};
pub use resolver::{ArtifactResolver, ResolvedArtifacts};
pub use table::{ClusterDirectory, ClusterEntry, ClusterIdentity};
