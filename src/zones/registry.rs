//! Zone registry for card locations and movement.
//!
//! The `ZoneRegistry` tracks which zone every card on the table is in. It
//! supports:
//! - Four zone kinds per side (battlefield, graveyard, exile, sacrifice pool)
//! - Moves that keep each card in exactly one zone
//! - Sacrifice from the battlefield or sacrifice pool
//!
//! Cards in hand are not tracked; a played card enters tracking with
//! [`ZoneRegistry::place`].

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerSide, RulesError};
use crate::effects::Effect;
use crate::events::{EventLog, MatchEvent};

/// Kind of zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Battlefield,
    Graveyard,
    Exile,
    SacrificePool,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 4] = [
        ZoneKind::Battlefield,
        ZoneKind::Graveyard,
        ZoneKind::Exile,
        ZoneKind::SacrificePool,
    ];
}

/// A zone kind on one side of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    pub side: PlayerSide,
}

impl Zone {
    #[must_use]
    pub const fn new(kind: ZoneKind, side: PlayerSide) -> Self {
        Self { kind, side }
    }

    #[must_use]
    pub const fn battlefield(side: PlayerSide) -> Self {
        Self::new(ZoneKind::Battlefield, side)
    }

    #[must_use]
    pub const fn graveyard(side: PlayerSide) -> Self {
        Self::new(ZoneKind::Graveyard, side)
    }

    #[must_use]
    pub const fn exile(side: PlayerSide) -> Self {
        Self::new(ZoneKind::Exile, side)
    }

    #[must_use]
    pub const fn sacrifice_pool(side: PlayerSide) -> Self {
        Self::new(ZoneKind::SacrificePool, side)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:?}", self.side, self.kind)
    }
}

/// Tracks where cards are on the table.
///
/// Backed by persistent maps so cloning for a snapshot is O(1).
///
/// ## Usage
///
/// ```
/// use arena_ccg::core::{EntityId, PlayerSide};
/// use arena_ccg::events::EventLog;
/// use arena_ccg::zones::{Zone, ZoneRegistry};
///
/// let mut events = EventLog::new();
/// let mut zones = ZoneRegistry::new();
/// let card = EntityId(7);
///
/// zones.place(card, Zone::battlefield(PlayerSide::Player), &mut events);
/// zones.move_card(card, Zone::graveyard(PlayerSide::Player), &mut events).unwrap();
///
/// assert_eq!(zones.zone_of(card), Some(Zone::graveyard(PlayerSide::Player)));
/// assert_eq!(events.count("card_sent_to_graveyard"), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRegistry {
    zones: OrdMap<Zone, OrdSet<EntityId>>,
}

impl ZoneRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a card into a zone, whether or not it is already tracked.
    ///
    /// Returns the zone it left, if any.
    pub fn place(&mut self, card: EntityId, zone: Zone, events: &mut EventLog) -> Option<Zone> {
        let from = self.detach(card);
        let mut cards = self.zones.get(&zone).cloned().unwrap_or_default();
        cards.insert(card);
        self.zones.insert(zone, cards);

        tracing::debug!(%card, to = %zone, from = ?from, "card placed");
        match zone.kind {
            ZoneKind::Graveyard => events.push(MatchEvent::CardSentToGraveyard { card, side: zone.side }),
            ZoneKind::Exile => events.push(MatchEvent::CardExiled { card, side: zone.side }),
            ZoneKind::Battlefield | ZoneKind::SacrificePool => {}
        }
        from
    }

    /// Move a tracked card to another zone.
    ///
    /// Returns the zone it left. An untracked card is rejected and nothing
    /// changes.
    pub fn move_card(&mut self, card: EntityId, to: Zone, events: &mut EventLog) -> Result<Zone, RulesError> {
        if self.zone_of(card).is_none() {
            tracing::warn!(%card, to = %to, "move of untracked card ignored");
            return Err(RulesError::InvalidZoneTransition { card });
        }

        self.place(card, to, events)
            .ok_or(RulesError::InvalidZoneTransition { card })
    }

    /// Move a card to its side's graveyard.
    pub fn send_to_graveyard(&mut self, card: EntityId, events: &mut EventLog) -> Result<Zone, RulesError> {
        let side = self.side_of(card)?;
        self.move_card(card, Zone::graveyard(side), events)
    }

    /// Move a card to its side's exile.
    pub fn exile(&mut self, card: EntityId, events: &mut EventLog) -> Result<Zone, RulesError> {
        let side = self.side_of(card)?;
        self.move_card(card, Zone::exile(side), events)
    }

    /// Sacrifice a card from a battlefield or sacrifice pool.
    ///
    /// The card goes to its side's graveyard, then `SacrificePerformed`
    /// relays `effects` to external resolution. Returns the side that owned
    /// the card.
    pub fn sacrifice(
        &mut self,
        card: EntityId,
        beneficiary: Option<PlayerSide>,
        effects: Vec<Effect>,
        events: &mut EventLog,
    ) -> Result<PlayerSide, RulesError> {
        let zone = self.zone_of(card).ok_or(RulesError::InvalidZoneTransition { card })?;
        if !matches!(zone.kind, ZoneKind::Battlefield | ZoneKind::SacrificePool) {
            tracing::warn!(%card, from = %zone, "sacrifice outside battlefield ignored");
            return Err(RulesError::InvalidZoneTransition { card });
        }

        let owner = zone.side;
        self.move_card(card, Zone::graveyard(owner), events)?;
        tracing::debug!(%card, %owner, effects = effects.len(), "card sacrificed");
        events.push(MatchEvent::SacrificePerformed {
            card,
            owner,
            beneficiary,
            effects,
        });
        Ok(owner)
    }

    /// Stop tracking a card. Returns the zone it was in.
    pub fn remove(&mut self, card: EntityId) -> Option<Zone> {
        self.detach(card)
    }

    #[must_use]
    pub fn zone_of(&self, card: EntityId) -> Option<Zone> {
        self.zones
            .iter()
            .find(|(_, cards)| cards.contains(&card))
            .map(|(zone, _)| *zone)
    }

    #[must_use]
    pub fn contains(&self, card: EntityId) -> bool {
        self.zone_of(card).is_some()
    }

    /// Cards in a zone, in id order.
    pub fn cards_in(&self, zone: Zone) -> impl Iterator<Item = EntityId> + '_ {
        self.zones.get(&zone).into_iter().flat_map(|cards| cards.iter().copied())
    }

    #[must_use]
    pub fn count(&self, zone: Zone) -> usize {
        self.zones.get(&zone).map_or(0, OrdSet::len)
    }

    /// Number of zones that contain the card. At most one.
    #[must_use]
    pub fn memberships(&self, card: EntityId) -> usize {
        self.zones.values().filter(|cards| cards.contains(&card)).count()
    }

    fn side_of(&self, card: EntityId) -> Result<PlayerSide, RulesError> {
        self.zone_of(card)
            .map(|zone| zone.side)
            .ok_or(RulesError::InvalidZoneTransition { card })
    }

    /// Remove the card from every zone that lists it.
    fn detach(&mut self, card: EntityId) -> Option<Zone> {
        let holding: Vec<Zone> = self
            .zones
            .iter()
            .filter(|(_, cards)| cards.contains(&card))
            .map(|(zone, _)| *zone)
            .collect();

        for zone in &holding {
            if let Some(cards) = self.zones.get_mut(zone) {
                cards.remove(&card);
            }
        }
        holding.first().copied()
    }
}
