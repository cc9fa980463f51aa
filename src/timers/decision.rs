//! Per-card decision clocks.
//!
//! Every card scanned during the active turn gets its own countdown. While
//! it runs the player decides to play or discard the card; if it runs out
//! the card is lost. The first part of the window models scan validation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, MatchConfig, RulesError};
use crate::events::{DiscardReason, EventLog, MatchEvent};

/// A scanned card waiting for a decision.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingCard {
    pub card: EntityId,
    pub time_remaining: f64,
    pub validating: bool,
}

/// Concurrent decision timers, one per pending card.
///
/// Pending cards are kept in scan order so events come out deterministically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDecisionClock {
    duration: f64,
    validation_window: f64,
    pending: Vec<PendingCard>,
}

impl CardDecisionClock {
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            duration: config.card_decision_duration,
            validation_window: config.validation_window,
            pending: Vec::new(),
        }
    }

    /// Start a decision timer for a freshly scanned card.
    pub fn start(&mut self, card: EntityId, events: &mut EventLog) -> Result<(), RulesError> {
        if self.is_pending(card) {
            return Err(RulesError::CardAlreadyPending { card });
        }

        self.pending.push(PendingCard {
            card,
            time_remaining: self.duration,
            validating: self.validation_window > 0.0,
        });
        tracing::debug!(%card, duration = self.duration, "card decision started");
        events.push(MatchEvent::CardTimerStarted {
            card,
            duration: self.duration,
        });
        Ok(())
    }

    /// Advance every pending timer by `dt`.
    ///
    /// Returns the cards that expired on this tick; they have already been
    /// removed and announced with `CardTimerExpired`.
    pub fn tick(&mut self, dt: f64, events: &mut EventLog) -> SmallVec<[EntityId; 4]> {
        let mut expired = SmallVec::new();
        if !(dt.is_finite() && dt > 0.0) || self.pending.is_empty() {
            return expired;
        }

        let validation_ends_at = self.duration - self.validation_window;
        for pending in &mut self.pending {
            pending.time_remaining = (pending.time_remaining - dt).max(0.0);
            pending.validating = pending.time_remaining > validation_ends_at;

            if pending.time_remaining <= 0.0 {
                expired.push(pending.card);
            } else {
                events.push(MatchEvent::CardTimerUpdated {
                    card: pending.card,
                    time_remaining: pending.time_remaining,
                    validating: pending.validating,
                });
            }
        }

        if !expired.is_empty() {
            self.pending.retain(|p| p.time_remaining > 0.0);
            for card in &expired {
                tracing::debug!(card = %card, "card decision timed out");
                events.push(MatchEvent::CardTimerExpired { card: *card });
            }
        }

        expired
    }

    /// Resolve a pending card as played. Rejected while it is validating.
    pub fn play(&mut self, card: EntityId) -> Result<PendingCard, RulesError> {
        let index = self.position(card)?;
        if self.pending[index].validating {
            return Err(RulesError::CardValidating { card });
        }
        Ok(self.pending.remove(index))
    }

    /// Check that a card could be played right now, without removing it.
    pub fn check_playable(&self, card: EntityId) -> Result<(), RulesError> {
        let index = self.position(card)?;
        if self.pending[index].validating {
            return Err(RulesError::CardValidating { card });
        }
        Ok(())
    }

    /// Resolve a pending card as discarded by the player.
    pub fn discard(&mut self, card: EntityId, events: &mut EventLog) -> Result<PendingCard, RulesError> {
        let index = self.position(card)?;
        let pending = self.pending.remove(index);
        events.push(MatchEvent::CardDiscarded {
            card,
            reason: DiscardReason::Requested,
        });
        Ok(pending)
    }

    /// Discard every pending card because the turn ended.
    pub fn discard_all(&mut self, events: &mut EventLog) -> Vec<EntityId> {
        let discarded: Vec<_> = self.pending.drain(..).map(|p| p.card).collect();
        for card in &discarded {
            events.push(MatchEvent::CardDiscarded {
                card: *card,
                reason: DiscardReason::TurnEnded,
            });
        }
        discarded
    }

    #[must_use]
    pub fn get(&self, card: EntityId) -> Option<&PendingCard> {
        self.pending.iter().find(|p| p.card == card)
    }

    #[must_use]
    pub fn is_pending(&self, card: EntityId) -> bool {
        self.get(card).is_some()
    }

    /// Pending cards in scan order.
    #[must_use]
    pub fn pending(&self) -> &[PendingCard] {
        &self.pending
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn position(&self, card: EntityId) -> Result<usize, RulesError> {
        self.pending
            .iter()
            .position(|p| p.card == card)
            .ok_or(RulesError::CardNotPending { card })
    }
}
