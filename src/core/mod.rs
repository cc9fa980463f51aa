//! Core types shared by every component: sides, card identity,
//! configuration, deterministic RNG and errors.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;
pub mod side;

pub use config::{MatchConfig, UrgencyThresholds};
pub use entity::{CardSku, EntityId};
pub use error::{ContentError, DuplicatePlay, RulesError};
pub use rng::GameRng;
pub use side::{PlayerSide, SideMap};
