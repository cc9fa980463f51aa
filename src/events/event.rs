//! Outbound match events.
//!
//! Every state change the UI, network sync or analytics collaborators need
//! to hear about is one `MatchEvent` variant. Events are appended to the
//! match's [`EventLog`](super::EventLog) in the order they happen and drained
//! by the caller once per tick.

use serde::{Deserialize, Serialize};

use crate::arena::ArenaId;
use crate::combos::ComboId;
use crate::core::{CardSku, EntityId, PlayerSide};
use crate::effects::Effect;
use crate::resources::{ManaPool, MissingResource};
use crate::timers::Urgency;

/// Why a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnEndReason {
    /// The active player ended it.
    Ended,
    /// The turn clock ran out.
    TimerExpired,
}

/// Why a scanned card left the pending set without being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// The player chose to discard it.
    Requested,
    /// The turn ended while it was still pending.
    TurnEnded,
}

/// A state change emitted by the rules core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    // === Resources ===
    EnergyChanged {
        side: PlayerSide,
        current: u32,
        max: u32,
    },
    ManaChanged {
        side: PlayerSide,
        mana: ManaPool,
    },
    ResourceInsufficient {
        side: PlayerSide,
        missing: MissingResource,
    },

    // === Turn structure ===
    TurnStarted {
        side: PlayerSide,
        turn_number: u32,
    },
    TurnEnded {
        side: PlayerSide,
        turn_number: u32,
        reason: TurnEndReason,
    },
    TurnTimerUpdated {
        time_remaining: f64,
        urgency: Urgency,
    },
    TurnTimerExpired {
        turn_number: u32,
    },

    // === Card decisions ===
    CardTimerStarted {
        card: EntityId,
        duration: f64,
    },
    CardTimerUpdated {
        card: EntityId,
        time_remaining: f64,
        validating: bool,
    },
    CardTimerExpired {
        card: EntityId,
    },
    CardPlayed {
        side: PlayerSide,
        card: EntityId,
        sku: CardSku,
    },
    CardDiscarded {
        card: EntityId,
        reason: DiscardReason,
    },

    // === Combos ===
    ComboChainStarted {
        side: PlayerSide,
        combo: ComboId,
    },
    ComboChainCompleted {
        side: PlayerSide,
        combo: ComboId,
        bonus_effects: Vec<Effect>,
    },
    ComboChainExpired {
        side: PlayerSide,
        combo: ComboId,
    },

    // === Arena ===
    ArenaSelected {
        arena: ArenaId,
    },
    ArenaEffectTriggered {
        rule: String,
        side: PlayerSide,
        effect: Effect,
    },
    ArenaObjectiveCompleted {
        objective: String,
        side: PlayerSide,
        reward: Option<Effect>,
    },

    // === Zones and uniqueness ===
    CardSentToGraveyard {
        card: EntityId,
        side: PlayerSide,
    },
    CardExiled {
        card: EntityId,
        side: PlayerSide,
    },
    LegendaryRuleTriggered {
        side: PlayerSide,
        name: String,
    },
    SacrificePerformed {
        card: EntityId,
        owner: PlayerSide,
        beneficiary: Option<PlayerSide>,
        effects: Vec<Effect>,
    },
    CardTransformed {
        card: EntityId,
        from: CardSku,
        to: CardSku,
    },
}

impl MatchEvent {
    /// Stable snake_case name, matching the serialized `event` tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            MatchEvent::EnergyChanged { .. } => "energy_changed",
            MatchEvent::ManaChanged { .. } => "mana_changed",
            MatchEvent::ResourceInsufficient { .. } => "resource_insufficient",
            MatchEvent::TurnStarted { .. } => "turn_started",
            MatchEvent::TurnEnded { .. } => "turn_ended",
            MatchEvent::TurnTimerUpdated { .. } => "turn_timer_updated",
            MatchEvent::TurnTimerExpired { .. } => "turn_timer_expired",
            MatchEvent::CardTimerStarted { .. } => "card_timer_started",
            MatchEvent::CardTimerUpdated { .. } => "card_timer_updated",
            MatchEvent::CardTimerExpired { .. } => "card_timer_expired",
            MatchEvent::CardPlayed { .. } => "card_played",
            MatchEvent::CardDiscarded { .. } => "card_discarded",
            MatchEvent::ComboChainStarted { .. } => "combo_chain_started",
            MatchEvent::ComboChainCompleted { .. } => "combo_chain_completed",
            MatchEvent::ComboChainExpired { .. } => "combo_chain_expired",
            MatchEvent::ArenaSelected { .. } => "arena_selected",
            MatchEvent::ArenaEffectTriggered { .. } => "arena_effect_triggered",
            MatchEvent::ArenaObjectiveCompleted { .. } => "arena_objective_completed",
            MatchEvent::CardSentToGraveyard { .. } => "card_sent_to_graveyard",
            MatchEvent::CardExiled { .. } => "card_exiled",
            MatchEvent::LegendaryRuleTriggered { .. } => "legendary_rule_triggered",
            MatchEvent::SacrificePerformed { .. } => "sacrifice_performed",
            MatchEvent::CardTransformed { .. } => "card_transformed",
        }
    }
}
