// Domain-driven module structure for the netsentinel status engine.

// Core infrastructure
pub mod conf;
pub mod error;
pub mod state;

// Domain modules
pub mod artifact;
pub mod status;
pub mod runtime;
