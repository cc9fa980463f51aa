//! Card identification.
//!
//! Two kinds of identity matter to the rules core:
//!
//! - `EntityId`: one physical card instance in this match. Zones, timers and
//!   combos refer to cards by instance.
//! - `CardSku`: the printed card product. The once-per-game ledger is keyed
//!   by sku, because two scans of the same physical product must collide.
//!
//! ```
//! use arena_ccg::core::{CardSku, EntityId};
//!
//! let card = EntityId(12);
//! let sku = CardSku::new("HERO_001");
//!
//! assert_eq!(card.raw(), 12);
//! assert_eq!(sku.as_str(), "HERO_001");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Printed card product identifier (e.g. `"HERO_001"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardSku(String);

impl CardSku {
    pub fn new(sku: impl Into<String>) -> Self {
        Self(sku.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardSku {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for CardSku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
