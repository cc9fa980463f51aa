//! Effect definitions.
//!
//! Effects describe what a card, combo bonus, arena rule or objective reward
//! does. The rules core never applies them to combat state; it relays them
//! to the orchestrator that owns health, shields and the draw pile.
//!
//! Content names an effect with a `kind` tag. Kinds this build does not
//! recognise load as [`Effect::Unknown`] and are relayed as no-ops, so newer
//! content keeps working against older engines.

use serde::{Deserialize, Serialize};

use crate::core::CardSku;
use crate::resources::ManaColor;

/// Damage school. Arena bonuses match on the school and on its color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    #[default]
    Physical,
    Fire,
    Ice,
    Nature,
    Holy,
    Dark,
    Arcane,
    #[serde(other)]
    Unknown,
}

impl DamageType {
    /// The mana color aligned with this school, if any.
    #[must_use]
    pub const fn color(self) -> Option<ManaColor> {
        match self {
            DamageType::Fire => Some(ManaColor::Crimson),
            DamageType::Ice => Some(ManaColor::Azure),
            DamageType::Nature => Some(ManaColor::Verdant),
            DamageType::Holy => Some(ManaColor::Golden),
            DamageType::Dark => Some(ManaColor::Shadow),
            DamageType::Arcane => Some(ManaColor::Aether),
            DamageType::Physical | DamageType::Unknown => None,
        }
    }
}

/// An effect to hand to external resolution.
///
/// ## Example
///
/// ```
/// use arena_ccg::effects::{DamageType, Effect};
///
/// let effect: Effect = serde_json::from_str(
///     r#"{ "kind": "damage", "amount": 3, "damage_type": "fire" }"#,
/// ).unwrap();
/// assert_eq!(effect, Effect::damage(3, DamageType::Fire));
///
/// let future: Effect = serde_json::from_str(r#"{ "kind": "time_warp" }"#).unwrap();
/// assert!(future.is_unknown());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    Damage {
        amount: u32,
        #[serde(default)]
        damage_type: DamageType,
    },
    Heal {
        amount: u32,
    },
    Shield {
        amount: u32,
    },
    DrawCards {
        count: u32,
    },
    GainEnergy {
        amount: u32,
    },
    GainMana {
        color: ManaColor,
        amount: u32,
    },
    /// Temporary stat change on the target (attack, defense, ...).
    ModifyStat {
        stat: String,
        delta: i32,
    },
    /// Put a token copy of a card onto the battlefield.
    Summon {
        sku: CardSku,
    },
    #[serde(other)]
    Unknown,
}

impl Effect {
    pub fn damage(amount: u32, damage_type: DamageType) -> Self {
        Effect::Damage { amount, damage_type }
    }

    pub fn heal(amount: u32) -> Self {
        Effect::Heal { amount }
    }

    pub fn shield(amount: u32) -> Self {
        Effect::Shield { amount }
    }

    pub fn draw(count: u32) -> Self {
        Effect::DrawCards { count }
    }

    pub fn gain_energy(amount: u32) -> Self {
        Effect::GainEnergy { amount }
    }

    pub fn gain_mana(color: ManaColor, amount: u32) -> Self {
        Effect::GainMana { color, amount }
    }

    pub fn modify_stat(stat: impl Into<String>, delta: i32) -> Self {
        Effect::ModifyStat {
            stat: stat.into(),
            delta,
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Effect::Unknown)
    }
}
