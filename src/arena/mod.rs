//! Arena-driven environmental modifiers.
//!
//! Every match is fought in one arena, selected once at setup. The arena
//! fixes which mana color is generated each turn and adds passive bonuses,
//! special rules and objectives on top of the base game.
//!
//! ## Key Types
//!
//! - [`Arena`]: immutable authored content
//! - [`ArenaCatalog`]: validated content set with seeded selection
//! - [`ArenaEffectEngine`]: the selected arena plus its runtime state
//! - [`RuleTrigger`], [`SpecialRule`]: the special-rule trigger set
//! - [`ObjectiveKind`], [`Objective`]: objectives and their progress

mod catalog;
mod definition;
mod engine;
mod objectives;
mod rules;

pub use catalog::ArenaCatalog;
pub use definition::{Arena, ArenaId, HeroBonus, PassiveEffects};
pub use engine::{ArenaEffectEngine, ArenaState, ManaGrant};
pub use objectives::{Objective, ObjectiveDefinition, ObjectiveKind};
pub use rules::{RuleContext, RuleEvent, RuleTrigger, SpecialRule, SpecialRuleResult};
