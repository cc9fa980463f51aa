//! Arena special-rule triggers.
//!
//! A special rule pairs a trigger with an [`Effect`]. The trigger decides
//! *when* the rule fires; firing only announces the effect, it never applies
//! it to combat state.

use serde::{Deserialize, Serialize};

use crate::core::PlayerSide;
use crate::effects::Effect;

/// When a special rule fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTrigger {
    /// Player-activated, at most once per turn per side.
    OncePerTurn,
    /// At the start of every third turn.
    #[serde(rename = "every_3_turns")]
    Every3Turns,
    /// At the start of every fourth turn.
    #[serde(rename = "every_4_turns")]
    Every4Turns,
    /// At the start of every turn.
    TurnStart,
    /// When a creature of the other side dies.
    OnEnemyDeath,
    /// When a creature of this side dies.
    OnDeath,
    /// Trigger kinds this build does not recognise never fire.
    #[serde(other)]
    Unknown,
}

/// Authored special rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRule {
    pub trigger: RuleTrigger,
    pub effect: Effect,
    #[serde(default)]
    pub description: String,
}

impl SpecialRule {
    pub fn new(trigger: RuleTrigger, effect: Effect) -> Self {
        Self {
            trigger,
            effect,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// What happened that might fire a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleEvent {
    TurnStart,
    CreatureDied { owner: PlayerSide },
    /// The side asked to use the rule.
    Activated,
}

/// The side a rule is evaluated for, and why.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContext {
    pub side: PlayerSide,
    pub event: RuleEvent,
}

impl RuleContext {
    #[must_use]
    pub const fn new(side: PlayerSide, event: RuleEvent) -> Self {
        Self { side, event }
    }

    #[must_use]
    pub const fn turn_start(side: PlayerSide) -> Self {
        Self::new(side, RuleEvent::TurnStart)
    }

    #[must_use]
    pub const fn activated(side: PlayerSide) -> Self {
        Self::new(side, RuleEvent::Activated)
    }
}

/// Outcome of executing a rule, for the orchestrator to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecialRuleResult {
    pub rule: String,
    pub side: PlayerSide,
    pub effect: Effect,
}

impl RuleTrigger {
    /// Whether this trigger matches an event on the given turn.
    ///
    /// Once-per-turn history is checked by the engine, not here.
    #[must_use]
    pub fn matches(self, turn_number: u32, context: &RuleContext) -> bool {
        match (self, context.event) {
            (RuleTrigger::TurnStart, RuleEvent::TurnStart) => true,
            (RuleTrigger::Every3Turns, RuleEvent::TurnStart) => turn_number > 0 && turn_number % 3 == 0,
            (RuleTrigger::Every4Turns, RuleEvent::TurnStart) => turn_number > 0 && turn_number % 4 == 0,
            (RuleTrigger::OncePerTurn, RuleEvent::Activated) => true,
            (RuleTrigger::OnDeath, RuleEvent::CreatureDied { owner }) => owner == context.side,
            (RuleTrigger::OnEnemyDeath, RuleEvent::CreatureDied { owner }) => owner != context.side,
            _ => false,
        }
    }
}
