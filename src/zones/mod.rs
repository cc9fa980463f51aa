//! Zone management for card locations.
//!
//! Every card on the table is in exactly one zone: a battlefield, a
//! graveyard, an exile or a sacrifice pool, on one of the two sides.

pub mod registry;

pub use registry::{Zone, ZoneKind, ZoneRegistry};
