//! The six mana colors and their opposition table.
//!
//! Both the enumeration and the table are versioned constants shared with
//! content authoring. The table is deliberately not symmetric: Verdant opposes
//! Golden, but Golden opposes Shadow. Do not "fix" it here; changes go
//! through content.

use serde::{Deserialize, Serialize};

/// A mana color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManaColor {
    Crimson,
    Azure,
    Verdant,
    Golden,
    Shadow,
    Aether,
}

impl ManaColor {
    /// Every color, in canonical order.
    pub const ALL: [ManaColor; 6] = [
        ManaColor::Crimson,
        ManaColor::Azure,
        ManaColor::Verdant,
        ManaColor::Golden,
        ManaColor::Shadow,
        ManaColor::Aether,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The color this one is weak against when generating arena mana.
    ///
    /// ```
    /// use arena_ccg::resources::ManaColor;
    ///
    /// assert_eq!(ManaColor::Crimson.opposite(), ManaColor::Azure);
    /// assert_eq!(ManaColor::Verdant.opposite(), ManaColor::Golden);
    /// // Not reciprocal:
    /// assert_eq!(ManaColor::Golden.opposite(), ManaColor::Shadow);
    /// ```
    #[must_use]
    pub const fn opposite(self) -> ManaColor {
        match self {
            ManaColor::Crimson => ManaColor::Azure,
            ManaColor::Azure => ManaColor::Crimson,
            ManaColor::Verdant => ManaColor::Golden,
            ManaColor::Golden => ManaColor::Shadow,
            ManaColor::Shadow => ManaColor::Golden,
            ManaColor::Aether => ManaColor::Shadow,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ManaColor::Crimson => "crimson",
            ManaColor::Azure => "azure",
            ManaColor::Verdant => "verdant",
            ManaColor::Golden => "golden",
            ManaColor::Shadow => "shadow",
            ManaColor::Aether => "aether",
        }
    }
}

impl std::fmt::Display for ManaColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
