//! Outbound events and the per-tick log they are buffered in.
//!
//! ## Key Types
//!
//! - [`MatchEvent`]: one state change, tagged by name for collaborators
//! - [`EventLog`]: ordered buffer drained by the orchestrator
//! - [`DiscardReason`], [`TurnEndReason`]: why a card or turn went away

mod event;
mod log;

pub use event::{DiscardReason, MatchEvent, TurnEndReason};
pub use log::EventLog;
