//! State module: engines configured at boot.

pub mod sentinel;

pub use sentinel::{SentinelState, SharedState};
