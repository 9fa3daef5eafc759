//! Status module: incident status inference from the attack log.

pub mod grammar;
pub mod model;
pub mod parser;

pub use model::{LogEvidence, Zone, ZoneState, ZoneStatus, ZoneStatusMap};
pub use parser::{LogStatusParser, ZoneGating};
