//! Per-side resource ledger: affordability, spending and income.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::ManaColor;
use super::pool::{Cost, ManaPool, ResourcePool};
use crate::core::{PlayerSide, RulesError};
use crate::events::{EventLog, MatchEvent};

/// Which resource a cost line refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "color")]
pub enum ResourceKind {
    Energy,
    Mana(ManaColor),
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Energy => write!(f, "energy"),
            ResourceKind::Mana(color) => write!(f, "{color} mana"),
        }
    }
}

/// One resource the pool is short of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingResource {
    pub kind: ResourceKind,
    pub required: u32,
    pub available: u32,
}

impl MissingResource {
    #[must_use]
    pub const fn new(kind: ResourceKind, required: u32, available: u32) -> Self {
        Self {
            kind,
            required,
            available,
        }
    }
}

impl std::fmt::Display for MissingResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (need {}, have {})",
            self.kind, self.required, self.available
        )
    }
}

/// Result of an affordability check.
///
/// `missing` lists energy first, then each short color in canonical order,
/// so the UI can show every shortfall at once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affordability {
    pub affordable: bool,
    pub missing: SmallVec<[MissingResource; 4]>,
}

/// Tracks one side's energy and mana.
///
/// ## Usage
///
/// ```
/// use arena_ccg::core::PlayerSide;
/// use arena_ccg::events::EventLog;
/// use arena_ccg::resources::{Cost, ManaColor, ManaPool, ResourceLedger};
///
/// let mut events = EventLog::new();
/// let mut ledger = ResourceLedger::new(PlayerSide::Player, false);
///
/// ledger.start_new_turn(3, ManaPool::single(ManaColor::Crimson, 2), &mut events);
/// assert_eq!(ledger.energy(), 3);
///
/// let cost = Cost::energy(2).with_mana(ManaColor::Crimson, 1);
/// assert!(ledger.can_afford(&cost).affordable);
/// ledger.spend(&cost, &mut events).unwrap();
/// assert_eq!(ledger.energy(), 1);
/// assert_eq!(ledger.mana(ManaColor::Crimson), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    side: PlayerSide,
    pool: ResourcePool,
    mana_persists: bool,
}

impl ResourceLedger {
    #[must_use]
    pub fn new(side: PlayerSide, mana_persists: bool) -> Self {
        Self {
            side,
            pool: ResourcePool::default(),
            mana_persists,
        }
    }

    #[must_use]
    pub fn side(&self) -> PlayerSide {
        self.side
    }

    #[must_use]
    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    #[must_use]
    pub fn energy(&self) -> u32 {
        self.pool.energy_current
    }

    #[must_use]
    pub fn energy_max(&self) -> u32 {
        self.pool.energy_max
    }

    #[must_use]
    pub fn mana(&self, color: ManaColor) -> u32 {
        self.pool.mana[color]
    }

    /// Reset the pool for a new turn.
    ///
    /// Energy is refilled to the turn number. Mana is zeroed unless the
    /// ledger persists mana, then `arena_mana` is added on top.
    pub fn start_new_turn(&mut self, turn_number: u32, arena_mana: ManaPool, events: &mut EventLog) {
        self.pool.energy_max = turn_number;
        self.pool.energy_current = turn_number;

        if !self.mana_persists {
            self.pool.mana = ManaPool::default();
        }
        self.pool.mana.add(&arena_mana);

        tracing::debug!(
            side = %self.side,
            turn_number,
            mana = self.pool.mana.total(),
            "resources reset for turn"
        );
        self.emit_energy(events);
        self.emit_mana(events);
    }

    /// Check a cost without touching the pool.
    #[must_use]
    pub fn can_afford(&self, cost: &Cost) -> Affordability {
        let mut missing = SmallVec::new();

        if cost.energy > self.pool.energy_current {
            missing.push(MissingResource::new(
                ResourceKind::Energy,
                cost.energy,
                self.pool.energy_current,
            ));
        }

        for (color, required) in cost.mana.non_zero() {
            let available = self.pool.mana[color];
            if required > available {
                missing.push(MissingResource::new(ResourceKind::Mana(color), required, available));
            }
        }

        Affordability {
            affordable: missing.is_empty(),
            missing,
        }
    }

    /// Pay a cost in full or not at all.
    ///
    /// On failure one `ResourceInsufficient` event is emitted per missing
    /// resource and the pool is untouched.
    pub fn spend(&mut self, cost: &Cost, events: &mut EventLog) -> Result<(), RulesError> {
        let check = self.can_afford(cost);
        if !check.affordable {
            return Err(self.reject(check.missing, events));
        }

        match self.debit(cost) {
            Some(pool) => self.pool = pool,
            None => {
                // The pool changed between the check and the debit; nothing
                // was committed, so report against the current pool.
                let missing = self.can_afford(cost).missing;
                return Err(self.reject(missing, events));
            }
        }

        tracing::debug!(side = %self.side, energy = cost.energy, mana = cost.mana.total(), "spent");
        if cost.energy > 0 {
            self.emit_energy(events);
        }
        if !cost.mana.is_empty() {
            self.emit_mana(events);
        }
        Ok(())
    }

    /// Give back a cost that was spent earlier this turn.
    ///
    /// Energy is still capped at the turn's maximum.
    pub fn refund(&mut self, cost: &Cost, events: &mut EventLog) {
        self.add_energy(cost.energy, events);
        if !cost.mana.is_empty() {
            self.pool.mana.add(&cost.mana);
            self.emit_mana(events);
        }
    }

    /// Card-effect energy income, capped at `energy_max`.
    pub fn add_energy(&mut self, amount: u32, events: &mut EventLog) {
        if amount == 0 {
            return;
        }
        let next = self.pool.energy_current.saturating_add(amount);
        self.pool.energy_current = next.min(self.pool.energy_max);
        self.emit_energy(events);
    }

    /// Card-effect mana income.
    pub fn add_mana(&mut self, color: ManaColor, amount: u32, events: &mut EventLog) {
        if amount == 0 {
            return;
        }
        self.pool.mana[color] = self.pool.mana[color].saturating_add(amount);
        self.emit_mana(events);
    }

    /// Debit energy, then each mana color, against a scratch copy.
    ///
    /// Returns the debited pool, or `None` if any step would underflow; the
    /// scratch copy is dropped so earlier debits never reach `self.pool`.
    fn debit(&self, cost: &Cost) -> Option<ResourcePool> {
        let mut next = self.pool;
        next.energy_current = next.energy_current.checked_sub(cost.energy)?;
        for (color, amount) in cost.mana.non_zero() {
            next.mana = next.mana.checked_sub(color, amount)?;
        }
        Some(next)
    }

    /// Announce every missing resource and build the matching error.
    pub(crate) fn reject(
        &self,
        missing: SmallVec<[MissingResource; 4]>,
        events: &mut EventLog,
    ) -> RulesError {
        for item in &missing {
            events.push(MatchEvent::ResourceInsufficient {
                side: self.side,
                missing: *item,
            });
        }
        tracing::debug!(side = %self.side, missing = missing.len(), "cost rejected");
        RulesError::InsufficientResource { missing }
    }

    fn emit_energy(&self, events: &mut EventLog) {
        events.push(MatchEvent::EnergyChanged {
            side: self.side,
            current: self.pool.energy_current,
            max: self.pool.energy_max,
        });
    }

    fn emit_mana(&self, events: &mut EventLog) {
        events.push(MatchEvent::ManaChanged {
            side: self.side,
            mana: self.pool.mana,
        });
    }
}
