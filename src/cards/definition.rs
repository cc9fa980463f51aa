//! Card definitions - static card data.
//!
//! `CardDefinition` holds what is printed on a card product: its cost, its
//! uniqueness rules, the abilities it can resolve and what it offers when
//! sacrificed. The match never mutates a definition; a transform swaps one
//! definition for another.

use serde::{Deserialize, Serialize};

use super::ability::AbilityKind;
use crate::core::CardSku;
use crate::effects::Effect;
use crate::resources::Cost;

/// Broad card category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Stays on the battlefield after it is played.
    #[default]
    Creature,
    /// Resolves and goes to the graveyard.
    Spell,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use arena_ccg::cards::{AbilityKind, CardDefinition, CardKind};
/// use arena_ccg::resources::{Cost, ManaColor};
///
/// let ignis = CardDefinition::new("HERO_001", "Ignis", CardKind::Creature)
///     .with_cost(Cost::energy(3).with_mana(ManaColor::Crimson, 1))
///     .legendary()
///     .with_ability(AbilityKind::FireDamage);
///
/// assert!(ignis.legendary);
/// assert_eq!(ignis.cost.energy, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub sku: CardSku,

    /// Display name. Legendary uniqueness is keyed by this name.
    pub name: String,

    #[serde(default)]
    pub kind: CardKind,

    #[serde(default)]
    pub cost: Cost,

    /// At most one in play per side under this name.
    #[serde(default)]
    pub legendary: bool,

    /// Can be played once per match.
    #[serde(default)]
    pub once_per_game: bool,

    #[serde(default)]
    pub abilities: Vec<AbilityKind>,

    /// Relayed to effect resolution when the card is sacrificed.
    #[serde(default)]
    pub sacrifice_effects: Vec<Effect>,
}

impl CardDefinition {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            sku: CardSku::new(sku),
            name: name.into(),
            kind,
            cost: Cost::free(),
            legendary: false,
            once_per_game: false,
            abilities: Vec::new(),
            sacrifice_effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn legendary(mut self) -> Self {
        self.legendary = true;
        self
    }

    #[must_use]
    pub fn once_per_game(mut self) -> Self {
        self.once_per_game = true;
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: AbilityKind) -> Self {
        self.abilities.push(ability);
        self
    }

    #[must_use]
    pub fn with_sacrifice_effect(mut self, effect: Effect) -> Self {
        self.sacrifice_effects.push(effect);
        self
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.kind == CardKind::Creature
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.kind == CardKind::Spell
    }
}
