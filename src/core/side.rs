//! Match sides and per-side data storage.
//!
//! ## PlayerSide
//!
//! A match is always two-sided: the local player and the opponent.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `PlayerSide`, used for resource
//! pools, legendary registries and objective progress.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSide {
    Player,
    Opponent,
}

impl PlayerSide {
    /// Both sides, in index order.
    pub const ALL: [PlayerSide; 2] = [PlayerSide::Player, PlayerSide::Opponent];

    /// Slot index (0 for `Player`, 1 for `Opponent`).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerSide::Player => 0,
            PlayerSide::Opponent => 1,
        }
    }

    /// The other side.
    ///
    /// ```
    /// use arena_ccg::core::PlayerSide;
    ///
    /// assert_eq!(PlayerSide::Player.opponent(), PlayerSide::Opponent);
    /// assert_eq!(PlayerSide::Opponent.opponent(), PlayerSide::Player);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerSide::Player => PlayerSide::Opponent,
            PlayerSide::Opponent => PlayerSide::Player,
        }
    }
}

impl std::fmt::Display for PlayerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerSide::Player => write!(f, "player"),
            PlayerSide::Opponent => write!(f, "opponent"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use arena_ccg::core::{PlayerSide, SideMap};
///
/// let mut progress: SideMap<u32> = SideMap::with_value(0);
/// progress[PlayerSide::Opponent] += 3;
///
/// assert_eq!(progress[PlayerSide::Player], 0);
/// assert_eq!(progress[PlayerSide::Opponent], 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerSide) -> T) -> Self {
        Self {
            data: [factory(PlayerSide::Player), factory(PlayerSide::Opponent)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    #[must_use]
    pub fn get(&self, side: PlayerSide) -> &T {
        &self.data[side.index()]
    }

    pub fn get_mut(&mut self, side: PlayerSide) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (PlayerSide, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerSide, &T)> {
        PlayerSide::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerSide, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerSide, &mut T)> {
        PlayerSide::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerSide> for SideMap<T> {
    type Output = T;

    fn index(&self, side: PlayerSide) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<PlayerSide> for SideMap<T> {
    fn index_mut(&mut self, side: PlayerSide) -> &mut Self::Output {
        self.get_mut(side)
    }
}
