//! Runtime module: process lifecycle with logging, boot, report envelopes.

pub mod boot;
pub mod report;
