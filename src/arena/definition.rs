//! Arena content definitions.
//!
//! An `Arena` is authored content: it never changes once loaded. Runtime
//! state derived from it (objective progress, rule firing history) lives in
//! the [`ArenaEffectEngine`](super::ArenaEffectEngine).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::objectives::ObjectiveDefinition;
use super::rules::SpecialRule;
use crate::effects::DamageType;
use crate::resources::ManaColor;

/// Content identifier of an arena (e.g. `"volcanic_forge"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArenaId(String);

impl ArenaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArenaId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ArenaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Always-on modifiers the arena applies to every ability.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassiveEffects {
    /// Added to damage whose school matches the arena's mana color.
    pub color_damage_bonus: i32,
    /// Added to damage of a given school.
    pub type_damage_bonus: BTreeMap<DamageType, i32>,
    /// Added to every heal.
    pub healing_bonus: i32,
}

/// Extra bonuses for heroes of one color affinity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroBonus {
    pub damage_bonus: i32,
    pub healing_bonus: i32,
}

/// A selectable battleground.
///
/// ```
/// use arena_ccg::arena::Arena;
/// use arena_ccg::resources::ManaColor;
///
/// let arena: Arena = serde_json::from_str(r#"{
///     "id": "frozen_lake",
///     "name": "Frozen Lake",
///     "mana_color": "azure",
///     "mana_generation_amount": 2
/// }"#).unwrap();
///
/// assert_eq!(arena.mana_color, ManaColor::Azure);
/// assert!(arena.special_rules.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub id: ArenaId,
    pub name: String,
    pub mana_color: ManaColor,
    pub mana_generation_amount: u32,
    #[serde(default)]
    pub passive_effects: PassiveEffects,
    #[serde(default)]
    pub hero_bonuses: BTreeMap<ManaColor, HeroBonus>,
    /// Rules keyed by name; iteration order is the name order.
    #[serde(default)]
    pub special_rules: BTreeMap<String, SpecialRule>,
    #[serde(default)]
    pub objectives: Vec<ObjectiveDefinition>,
}

impl Arena {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mana_color: ManaColor,
        mana_generation_amount: u32,
    ) -> Self {
        Self {
            id: ArenaId::new(id),
            name: name.into(),
            mana_color,
            mana_generation_amount,
            passive_effects: PassiveEffects::default(),
            hero_bonuses: BTreeMap::new(),
            special_rules: BTreeMap::new(),
            objectives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_passive_effects(mut self, passive: PassiveEffects) -> Self {
        self.passive_effects = passive;
        self
    }

    #[must_use]
    pub fn with_hero_bonus(mut self, affinity: ManaColor, bonus: HeroBonus) -> Self {
        self.hero_bonuses.insert(affinity, bonus);
        self
    }

    #[must_use]
    pub fn with_special_rule(mut self, name: impl Into<String>, rule: SpecialRule) -> Self {
        self.special_rules.insert(name.into(), rule);
        self
    }

    #[must_use]
    pub fn with_objective(mut self, objective: ObjectiveDefinition) -> Self {
        self.objectives.push(objective);
        self
    }
}
