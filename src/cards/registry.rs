//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every card definition a match can scan, keyed
//! by sku. A scan names a sku; the registry turns it into a definition.

use rustc_hash::FxHashMap;

use super::definition::CardDefinition;
use crate::core::{CardSku, ContentError};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use arena_ccg::cards::{CardDefinition, CardKind, CardRegistry};
/// use arena_ccg::core::CardSku;
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardDefinition::new("SPL_001", "Fireball", CardKind::Spell))
///     .unwrap();
///
/// let found = registry.get(&CardSku::new("SPL_001")).unwrap();
/// assert_eq!(found.name, "Fireball");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardSku, CardDefinition>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of card definitions.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let cards: Vec<CardDefinition> = serde_json::from_str(json)?;

        let mut registry = Self::new();
        for card in cards {
            registry.register(card)?;
        }
        tracing::info!(cards = registry.len(), "card registry loaded");
        Ok(registry)
    }

    /// Register a card definition. Skus must be unique.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), ContentError> {
        if self.cards.contains_key(&card.sku) {
            return Err(ContentError::invalid("card", format!("duplicate sku {}", card.sku)));
        }
        if card.legendary && card.name.trim().is_empty() {
            return Err(ContentError::invalid(
                "card",
                format!("legendary {} needs a name", card.sku),
            ));
        }
        for ability in card.abilities.iter().filter(|a| a.is_unknown()) {
            tracing::warn!(sku = %card.sku, %ability, "unknown ability");
        }

        self.cards.insert(card.sku.clone(), card);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, sku: &CardSku) -> Option<&CardDefinition> {
        self.cards.get(sku)
    }

    #[must_use]
    pub fn contains(&self, sku: &CardSku) -> bool {
        self.cards.contains_key(sku)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}
