//! Arena content catalog.
//!
//! Arenas ship as JSON. The catalog validates them once at load time and
//! picks the arena for a match from the seeded [`GameRng`], so every peer
//! that shares the seed agrees on the arena.

use rustc_hash::FxHashSet;
use serde::Deserialize;

use super::definition::{Arena, ArenaId};
use super::objectives::ObjectiveKind;
use super::rules::RuleTrigger;
use crate::core::{ContentError, GameRng};

#[derive(Deserialize)]
struct CatalogFile {
    arenas: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
struct CatalogEntry {
    #[serde(default = "default_weight")]
    weight: f32,
    #[serde(flatten)]
    arena: Arena,
}

fn default_weight() -> f32 {
    1.0
}

/// Loaded, validated arenas with their selection weights.
///
/// ```
/// use arena_ccg::arena::ArenaCatalog;
/// use arena_ccg::core::GameRng;
///
/// let catalog = ArenaCatalog::from_json(r#"{
///     "arenas": [
///         { "id": "frozen_lake", "name": "Frozen Lake", "mana_color": "azure", "mana_generation_amount": 2 },
///         { "id": "grove", "name": "Grove", "mana_color": "verdant", "mana_generation_amount": 1, "weight": 0 }
///     ]
/// }"#).unwrap();
///
/// let mut rng = GameRng::new(7);
/// assert_eq!(catalog.pick(&mut rng).unwrap().id.as_str(), "frozen_lake");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ArenaCatalog {
    arenas: Vec<Arena>,
    weights: Vec<f32>,
}

impl ArenaCatalog {
    /// Parse and validate a catalog.
    ///
    /// Rejects duplicate arena ids, duplicate objective ids within an arena,
    /// zero objective targets and negative weights. Unknown trigger or
    /// objective kinds are accepted and logged; they stay inert at runtime.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let file: CatalogFile = serde_json::from_str(json)?;

        let mut catalog = Self::default();
        for entry in file.arenas {
            catalog.insert(entry.arena, entry.weight)?;
        }
        tracing::info!(arenas = catalog.len(), "arena catalog loaded");
        Ok(catalog)
    }

    /// Add one arena, validating it against the catalog.
    pub fn insert(&mut self, arena: Arena, weight: f32) -> Result<(), ContentError> {
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(ContentError::invalid(
                "arena",
                format!("{} has invalid weight {weight}", arena.id),
            ));
        }
        if self.get(&arena.id).is_some() {
            return Err(ContentError::invalid("arena", format!("duplicate arena id {}", arena.id)));
        }
        validate(&arena)?;

        self.arenas.push(arena);
        self.weights.push(weight);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &ArenaId) -> Option<&Arena> {
        self.arenas.iter().find(|a| &a.id == id)
    }

    /// Choose an arena by weight.
    ///
    /// `None` when the catalog is empty or every weight is zero.
    pub fn pick(&self, rng: &mut GameRng) -> Option<&Arena> {
        rng.choose_weighted(&self.weights).and_then(|i| self.arenas.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arena> {
        self.arenas.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arenas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arenas.is_empty()
    }
}

fn validate(arena: &Arena) -> Result<(), ContentError> {
    let mut objective_ids = FxHashSet::default();
    for objective in &arena.objectives {
        if !objective_ids.insert(objective.id.as_str()) {
            return Err(ContentError::invalid(
                "arena",
                format!("{} repeats objective id {}", arena.id, objective.id),
            ));
        }
        if objective.target == 0 {
            return Err(ContentError::invalid(
                "arena",
                format!("{} objective {} has a zero target", arena.id, objective.id),
            ));
        }
        if objective.kind == ObjectiveKind::Unknown {
            tracing::warn!(arena = %arena.id, objective = %objective.id, "unknown objective kind");
        }
    }

    for (name, rule) in &arena.special_rules {
        if rule.trigger == RuleTrigger::Unknown {
            tracing::warn!(arena = %arena.id, rule = %name, "unknown special rule trigger");
        }
        if rule.effect.is_unknown() {
            tracing::warn!(arena = %arena.id, rule = %name, "unknown special rule effect");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "arenas": [
            {
                "id": "volcanic_forge",
                "name": "Volcanic Forge",
                "mana_color": "crimson",
                "mana_generation_amount": 2,
                "special_rules": {
                    "tremor": { "trigger": "on_solar_eclipse", "effect": { "kind": "damage", "amount": 1 } }
                },
                "objectives": [ { "id": "scorch", "kind": "deal_damage", "target": 15 } ]
            },
            { "id": "frozen_lake", "name": "Frozen Lake", "mana_color": "azure", "mana_generation_amount": 2 }
        ]
    }"#;

    #[test]
    fn test_load_keeps_unknown_triggers() {
        let catalog = ArenaCatalog::from_json(CATALOG).unwrap();

        assert_eq!(catalog.len(), 2);
        let forge = catalog.get(&ArenaId::new("volcanic_forge")).unwrap();
        assert_eq!(forge.special_rules["tremor"].trigger, RuleTrigger::Unknown);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{ "arenas": [
            { "id": "a", "name": "A", "mana_color": "azure", "mana_generation_amount": 1 },
            { "id": "a", "name": "A again", "mana_color": "golden", "mana_generation_amount": 1 }
        ] }"#;

        assert!(matches!(
            ArenaCatalog::from_json(json),
            Err(ContentError::Invalid { what: "arena", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_target() {
        let json = r#"{ "arenas": [ {
            "id": "a", "name": "A", "mana_color": "azure", "mana_generation_amount": 1,
            "objectives": [ { "id": "o", "kind": "play_cards", "target": 0 } ]
        } ] }"#;

        assert!(ArenaCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(ArenaCatalog::from_json("{"), Err(ContentError::Json(_))));
    }

    #[test]
    fn test_pick_is_deterministic() {
        let catalog = ArenaCatalog::from_json(CATALOG).unwrap();

        let picks = |seed| {
            let mut rng = GameRng::new(seed);
            (0..8)
                .map(|_| catalog.pick(&mut rng).unwrap().id.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(picks(99), picks(99));
    }

    #[test]
    fn test_pick_empty() {
        let mut rng = GameRng::new(1);
        assert!(ArenaCatalog::default().pick(&mut rng).is_none());
    }
}
