//! Ability identifiers.
//!
//! Abilities are what combos match on. Content names them with snake_case
//! strings; names this build does not know are kept verbatim in
//! [`AbilityKind::Unknown`] so two unknown abilities with the same name still
//! compare equal inside a combo.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effects::DamageType;

/// A resolvable card ability.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AbilityKind {
    PhysicalDamage,
    FireDamage,
    IceDamage,
    NatureDamage,
    HolyDamage,
    ShadowDamage,
    ArcaneDamage,
    AreaDamage,
    Burn,
    Freeze,
    Poison,
    Stun,
    Heal,
    Shield,
    Draw,
    Lifesteal,
    Unknown(String),
}

const NAMES: [(&str, AbilityKind); 16] = [
    ("physical_damage", AbilityKind::PhysicalDamage),
    ("fire_damage", AbilityKind::FireDamage),
    ("ice_damage", AbilityKind::IceDamage),
    ("nature_damage", AbilityKind::NatureDamage),
    ("holy_damage", AbilityKind::HolyDamage),
    ("shadow_damage", AbilityKind::ShadowDamage),
    ("arcane_damage", AbilityKind::ArcaneDamage),
    ("area_damage", AbilityKind::AreaDamage),
    ("burn", AbilityKind::Burn),
    ("freeze", AbilityKind::Freeze),
    ("poison", AbilityKind::Poison),
    ("stun", AbilityKind::Stun),
    ("heal", AbilityKind::Heal),
    ("shield", AbilityKind::Shield),
    ("draw", AbilityKind::Draw),
    ("lifesteal", AbilityKind::Lifesteal),
];

impl AbilityKind {
    /// Parse a content name. Never fails; unrecognised names become `Unknown`.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map_or_else(|| AbilityKind::Unknown(name.to_string()), |(_, kind)| kind.clone())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            AbilityKind::Unknown(name) => name,
            known => NAMES
                .iter()
                .find(|(_, kind)| kind == known)
                .map_or("unknown", |(n, _)| n),
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, AbilityKind::Unknown(_))
    }

    /// Damage school for damage-dealing abilities.
    ///
    /// Damage-over-time abilities count as damage of their school.
    #[must_use]
    pub fn damage_type(&self) -> Option<DamageType> {
        match self {
            AbilityKind::PhysicalDamage | AbilityKind::AreaDamage => Some(DamageType::Physical),
            AbilityKind::FireDamage | AbilityKind::Burn => Some(DamageType::Fire),
            AbilityKind::IceDamage => Some(DamageType::Ice),
            AbilityKind::NatureDamage | AbilityKind::Poison => Some(DamageType::Nature),
            AbilityKind::HolyDamage => Some(DamageType::Holy),
            AbilityKind::ShadowDamage | AbilityKind::Lifesteal => Some(DamageType::Dark),
            AbilityKind::ArcaneDamage => Some(DamageType::Arcane),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_healing(&self) -> bool {
        matches!(self, AbilityKind::Heal)
    }
}

impl From<String> for AbilityKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<&str> for AbilityKind {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<AbilityKind> for String {
    fn from(kind: AbilityKind) -> Self {
        match kind {
            AbilityKind::Unknown(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
