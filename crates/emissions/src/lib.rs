//! Helium Emission Schedule
//!
//! Pure schedule math behind the network stats dashboard:
//! - Emission-year calendar anchored to August 1st, 2023
//! - Halvening decay: yearly rates halve every two emission years
//! - Closed-form remaining-supply integration
//! - Stepped IOT/MOBILE sub-network schedule lookup
//!
//! Everything here is a pure function of `(instant, token class)` or
//! `(instant, table)`; there is no I/O and no shared mutable state.

pub mod calendar;
pub mod errors;
pub mod schedule;
pub mod subnetwork;
pub mod supply;
pub mod types;

pub use calendar::*;
pub use errors::*;
pub use schedule::*;
pub use subnetwork::*;
pub use types::*;

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
