//! Match orchestration.
//!
//! `MatchContext` owns every rules component for one match and is the only
//! entry point collaborators call:
//! - Turn structure (start, end, tick)
//! - Card decisions (scan, play, discard)
//! - Ability resolution, creature death and zone changes
//!
//! `MatchSnapshot` captures its runtime state for resync.

pub mod context;
pub mod snapshot;

pub use context::{AbilityResolution, MatchContext, MatchInput, ResolvedAbility};
pub use snapshot::MatchSnapshot;
