//! Dual-timer turn structure.
//!
//! A match runs one [`TurnClock`] and, during the active turn, any number of
//! independent [`CardDecisionClock`] countdowns. [`TurnTimers`] owns both so
//! that ending a turn (explicitly or by expiry) cancels every outstanding
//! card timer in the same step.

mod decision;
mod turn_clock;

pub use decision::{CardDecisionClock, PendingCard};
pub use turn_clock::{ClockTick, TurnClock, Urgency};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, MatchConfig, RulesError};
use crate::events::EventLog;

/// Outcome of one timer tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimerTick {
    /// The turn clock ran out on this tick.
    pub turn_expired: bool,
    /// Cards discarded because the turn expired.
    pub force_discarded: Vec<EntityId>,
    /// Cards whose own decision clock ran out.
    pub card_expired: SmallVec<[EntityId; 4]>,
}

/// The turn clock together with its card decision clocks.
///
/// ```
/// use arena_ccg::core::{EntityId, MatchConfig};
/// use arena_ccg::events::EventLog;
/// use arena_ccg::timers::TurnTimers;
///
/// let mut events = EventLog::new();
/// let mut timers = TurnTimers::new(&MatchConfig::default());
/// timers.start_turn(1).unwrap();
/// timers.start_card_timer(EntityId(10), &mut events).unwrap();
///
/// let discarded = timers.end_turn(&mut events);
/// assert_eq!(discarded, vec![EntityId(10)]);
/// assert!(!timers.turn_clock().is_running());
/// assert!(timers.cards().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnTimers {
    turn: TurnClock,
    cards: CardDecisionClock,
}

impl TurnTimers {
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            turn: TurnClock::new(config),
            cards: CardDecisionClock::new(config),
        }
    }

    pub fn start_turn(&mut self, turn_number: u32) -> Result<(), RulesError> {
        self.turn.start_turn(turn_number)
    }

    /// Start a decision timer. Only accepted while a turn is running.
    pub fn start_card_timer(&mut self, card: EntityId, events: &mut EventLog) -> Result<(), RulesError> {
        if !self.turn.is_running() {
            return Err(RulesError::NoActiveTurn);
        }
        self.cards.start(card, events)
    }

    /// Advance both clocks.
    ///
    /// Turn expiry is resolved first: if the turn clock runs out, every
    /// pending card is force-discarded before card clocks would advance, so
    /// no card both times out and is discarded on the same tick.
    pub fn tick(&mut self, dt: f64, events: &mut EventLog) -> TimerTick {
        let mut outcome = TimerTick::default();

        if self.turn.tick(dt, events) == ClockTick::Expired {
            outcome.turn_expired = true;
            outcome.force_discarded = self.cards.discard_all(events);
            return outcome;
        }

        outcome.card_expired = self.cards.tick(dt, events);
        outcome
    }

    /// Stop the turn clock and discard every pending card, as one step.
    ///
    /// Returns the discarded cards. Safe to call when no turn is running.
    pub fn end_turn(&mut self, events: &mut EventLog) -> Vec<EntityId> {
        self.turn.stop();
        self.cards.discard_all(events)
    }

    #[must_use]
    pub fn turn_clock(&self) -> &TurnClock {
        &self.turn
    }

    #[must_use]
    pub fn cards(&self) -> &CardDecisionClock {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut CardDecisionClock {
        &mut self.cards
    }
}
