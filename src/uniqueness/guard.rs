//! Once-per-game and legendary uniqueness rules.

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};

use crate::core::{CardSku, DuplicatePlay, PlayerSide, RulesError, SideMap};
use crate::events::{EventLog, MatchEvent};

/// Match-scoped uniqueness ledgers.
///
/// - The played-card ledger records the turn each once-per-game sku was
///   played; a recorded sku can never be played again.
/// - The legendary registry holds, per side, the names of legendary
///   creatures in play.
///
/// ```
/// use arena_ccg::core::{CardSku, PlayerSide};
/// use arena_ccg::uniqueness::UniquenessGuard;
///
/// let mut guard = UniquenessGuard::new();
/// let hero = CardSku::new("HERO_001");
///
/// assert!(guard.mark_played(&hero, 3));
/// assert!(!guard.can_play_once_per_game(&hero));
/// assert!(!guard.mark_played(&hero, 4));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniquenessGuard {
    played: OrdMap<CardSku, u32>,
    legendaries: SideMap<OrdSet<String>>,
}

impl UniquenessGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn can_play_once_per_game(&self, sku: &CardSku) -> bool {
        !self.played.contains_key(sku)
    }

    /// Turn the sku was played on, if it has been.
    #[must_use]
    pub fn played_on(&self, sku: &CardSku) -> Option<u32> {
        self.played.get(sku).copied()
    }

    /// Record a once-per-game play. Returns `false` if already recorded.
    pub fn mark_played(&mut self, sku: &CardSku, turn_number: u32) -> bool {
        if self.played.contains_key(sku) {
            return false;
        }
        self.played.insert(sku.clone(), turn_number);
        tracing::debug!(%sku, turn_number, "once-per-game card recorded");
        true
    }

    #[must_use]
    pub fn can_play_legendary(&self, name: &str, side: PlayerSide) -> bool {
        !self.legendaries[side].contains(name)
    }

    /// Register a legendary in play. Returns `false` on a duplicate name,
    /// after announcing `LegendaryRuleTriggered`.
    pub fn add_legendary(&mut self, name: &str, side: PlayerSide, events: &mut EventLog) -> bool {
        if self.legendaries[side].contains(name) {
            tracing::debug!(name, %side, "legendary rule triggered");
            events.push(MatchEvent::LegendaryRuleTriggered {
                side,
                name: name.to_string(),
            });
            return false;
        }
        self.legendaries[side].insert(name.to_string());
        true
    }

    /// Release a legendary name. Returns `false` if it was not registered.
    pub fn remove_legendary(&mut self, name: &str, side: PlayerSide) -> bool {
        self.legendaries[side].remove(name).is_some()
    }

    /// Check both rules for a card without recording anything.
    pub fn check(
        &self,
        sku: &CardSku,
        once_per_game: bool,
        legendary_name: Option<&str>,
        side: PlayerSide,
    ) -> Result<(), RulesError> {
        if once_per_game {
            if let Some(played_on_turn) = self.played_on(sku) {
                return Err(RulesError::DuplicatePlay(DuplicatePlay::OncePerGame {
                    sku: sku.clone(),
                    played_on_turn,
                }));
            }
        }
        if let Some(name) = legendary_name {
            if !self.can_play_legendary(name, side) {
                return Err(RulesError::DuplicatePlay(DuplicatePlay::Legendary {
                    name: name.to_string(),
                    side,
                }));
            }
        }
        Ok(())
    }

    pub fn legendaries(&self, side: PlayerSide) -> impl Iterator<Item = &str> {
        self.legendaries[side].iter().map(String::as_str)
    }
}
