//! Resource pools and costs.
//!
//! Amounts are unsigned, so "mana never goes negative" holds by
//! construction; every debit goes through `checked_sub`.

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::color::ManaColor;

/// Mana amounts for all six colors.
///
/// Serializes as a color → amount map, omitting empty colors:
///
/// ```
/// use arena_ccg::resources::{ManaColor, ManaPool};
///
/// let pool: ManaPool = serde_json::from_str(r#"{ "azure": 2 }"#).unwrap();
/// assert_eq!(pool[ManaColor::Azure], 2);
/// assert_eq!(pool[ManaColor::Crimson], 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ManaColor, u32>", into = "BTreeMap<ManaColor, u32>")]
pub struct ManaPool {
    amounts: [u32; ManaColor::COUNT],
}

impl ManaPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool holding `amount` of a single color.
    #[must_use]
    pub fn single(color: ManaColor, amount: u32) -> Self {
        let mut pool = Self::default();
        pool[color] = amount;
        pool
    }

    /// Add a color amount (builder pattern).
    #[must_use]
    pub fn with(mut self, color: ManaColor, amount: u32) -> Self {
        self[color] = self[color].saturating_add(amount);
        self
    }

    /// Add every color of `other` into this pool.
    pub fn add(&mut self, other: &ManaPool) {
        for color in ManaColor::ALL {
            self[color] = self[color].saturating_add(other[color]);
        }
    }

    /// Subtract `amount` of one color, or `None` if that would go negative.
    #[must_use]
    pub fn checked_sub(&self, color: ManaColor, amount: u32) -> Option<Self> {
        let mut next = *self;
        next[color] = self[color].checked_sub(amount)?;
        Some(next)
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.amounts.iter().fold(0u32, |total, &n| total.saturating_add(n))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.iter().all(|&a| a == 0)
    }

    /// Iterate over (color, amount) pairs, including zero amounts.
    pub fn iter(&self) -> impl Iterator<Item = (ManaColor, u32)> + '_ {
        ManaColor::ALL.into_iter().map(move |c| (c, self[c]))
    }

    /// Iterate over colors with a non-zero amount.
    pub fn non_zero(&self) -> impl Iterator<Item = (ManaColor, u32)> + '_ {
        self.iter().filter(|(_, amount)| *amount > 0)
    }
}

impl Index<ManaColor> for ManaPool {
    type Output = u32;

    fn index(&self, color: ManaColor) -> &Self::Output {
        &self.amounts[color.index()]
    }
}

impl IndexMut<ManaColor> for ManaPool {
    fn index_mut(&mut self, color: ManaColor) -> &mut Self::Output {
        &mut self.amounts[color.index()]
    }
}

impl From<BTreeMap<ManaColor, u32>> for ManaPool {
    fn from(map: BTreeMap<ManaColor, u32>) -> Self {
        map.into_iter().fold(Self::default(), |pool, (c, a)| pool.with(c, a))
    }
}

impl From<ManaPool> for BTreeMap<ManaColor, u32> {
    fn from(pool: ManaPool) -> Self {
        pool.non_zero().collect()
    }
}

impl FromIterator<(ManaColor, u32)> for ManaPool {
    fn from_iter<I: IntoIterator<Item = (ManaColor, u32)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |pool, (c, a)| pool.with(c, a))
    }
}

/// A side's spendable resources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub energy_current: u32,
    pub energy_max: u32,
    pub mana: ManaPool,
}

/// What a card costs to play.
///
/// ```
/// use arena_ccg::resources::{Cost, ManaColor};
///
/// let cost = Cost::energy(2).with_mana(ManaColor::Azure, 1);
/// assert_eq!(cost.energy, 2);
/// assert_eq!(cost.mana[ManaColor::Azure], 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Cost {
    pub energy: u32,
    pub mana: ManaPool,
}

impl Cost {
    /// A free card.
    #[must_use]
    pub fn free() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn energy(energy: u32) -> Self {
        Self {
            energy,
            mana: ManaPool::default(),
        }
    }

    #[must_use]
    pub fn with_mana(mut self, color: ManaColor, amount: u32) -> Self {
        self.mana = self.mana.with(color, amount);
        self
    }
}
