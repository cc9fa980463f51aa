//! Card instances - scanned physical cards.
//!
//! A `CardInstance` is one physical card in one match: the entity the zones,
//! timers and uniqueness rules refer to. It carries the definition it
//! currently shows, which a transform can replace.

use serde::{Deserialize, Serialize};

use super::definition::CardDefinition;
use crate::core::{CardSku, EntityId, PlayerSide};

/// A card instance in a match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardInstance {
    pub id: EntityId,
    pub owner: PlayerSide,
    pub definition: CardDefinition,
}

impl CardInstance {
    #[must_use]
    pub fn new(id: EntityId, owner: PlayerSide, definition: CardDefinition) -> Self {
        Self { id, owner, definition }
    }

    #[must_use]
    pub fn sku(&self) -> &CardSku {
        &self.definition.sku
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Replace the shown definition, returning the previous one.
    pub fn transform(&mut self, into: CardDefinition) -> CardDefinition {
        std::mem::replace(&mut self.definition, into)
    }

    /// Identity without the definition body, for snapshots.
    #[must_use]
    pub fn summary(&self) -> CardSummary {
        CardSummary {
            id: self.id,
            owner: self.owner,
            sku: self.definition.sku.clone(),
        }
    }
}

/// Compact, serializable view of a card instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSummary {
    pub id: EntityId,
    pub owner: PlayerSide,
    pub sku: CardSku,
}
