//! # arena-ccg
//!
//! Deterministic rules core for a two-sided card battle game played with
//! scanned physical cards.
//!
//! ## Design Principles
//!
//! 1. **Guards before mutation**: every input is checked in full before any
//!    state changes. A rejected input returns a [`RulesError`] and leaves the
//!    match as it was.
//!
//! 2. **Events out, effects relayed**: state changes are announced as
//!    [`MatchEvent`]s in the order they happen. Effects (combo bonuses,
//!    sacrifice effects, arena rules) are described, never resolved.
//!
//! 3. **Content is data**: arenas, combos and cards load from JSON. Unknown
//!    trigger kinds, objective kinds, abilities and effects load as inert
//!    values instead of failing.
//!
//! ## Modules
//!
//! - `core`: sides, card identity, configuration, RNG and errors
//! - `resources`: energy and six-color mana, affordability and spending
//! - `timers`: the turn clock and per-card decision clocks
//! - `arena`: arena content, passive bonuses, special rules, objectives
//! - `cards`: abilities, card definitions, instances and registry
//! - `zones`: where every card on the table is
//! - `uniqueness`: once-per-game and legendary rules
//! - `combos`: multi-ability chains with a rolling window
//! - `effects`: effect descriptions relayed to resolution
//! - `events`: outbound events
//! - `rules`: the `MatchContext` orchestrator and snapshots

pub mod arena;
pub mod cards;
pub mod combos;
pub mod core;
pub mod effects;
pub mod events;
pub mod resources;
pub mod rules;
pub mod timers;
pub mod uniqueness;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    CardSku, ContentError, DuplicatePlay, EntityId, GameRng, MatchConfig, PlayerSide, RulesError, SideMap,
};

pub use crate::resources::{Cost, ManaColor, ManaPool, ResourceLedger, ResourcePool};

pub use crate::timers::{CardDecisionClock, TurnClock, TurnTimers, Urgency};

pub use crate::arena::{Arena, ArenaCatalog, ArenaEffectEngine, ObjectiveKind, RuleTrigger};

pub use crate::cards::{AbilityKind, CardDefinition, CardKind, CardRegistry};

pub use crate::zones::{Zone, ZoneKind, ZoneRegistry};

pub use crate::uniqueness::UniquenessGuard;

pub use crate::combos::{ComboDefinition, ComboTracker};

pub use crate::effects::{DamageType, Effect};

pub use crate::events::{EventLog, MatchEvent};

pub use crate::rules::{AbilityResolution, MatchContext, MatchInput, MatchSnapshot};
