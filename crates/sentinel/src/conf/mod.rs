//! Conf module: configuration model, loading, and startup validation.

pub mod model;
pub mod load;

pub use load::DEFAULT_CONFIG_PATH;
pub use model::{ArtifactConfig, SentinelConfig, StatusConfig};
