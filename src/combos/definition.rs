//! Combo content definitions.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::AbilityKind;
use crate::core::ContentError;
use crate::effects::Effect;

/// Content identifier of a combo.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComboId(String);

impl ComboId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComboId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A set of abilities that grants bonus effects when all are resolved
/// within the combo window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboDefinition {
    pub id: ComboId,
    pub name: String,
    pub required_abilities: BTreeSet<AbilityKind>,
    #[serde(default)]
    pub bonus_effects: Vec<Effect>,
}

impl ComboDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        required: impl IntoIterator<Item = AbilityKind>,
    ) -> Self {
        Self {
            id: ComboId::new(id),
            name: name.into(),
            required_abilities: required.into_iter().collect(),
            bonus_effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bonus(mut self, effect: Effect) -> Self {
        self.bonus_effects.push(effect);
        self
    }

    #[must_use]
    pub fn requires(&self, ability: &AbilityKind) -> bool {
        self.required_abilities.contains(ability)
    }

    /// Load and validate a JSON array of combos.
    ///
    /// Every combo needs at least one required ability and a unique id.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, ContentError> {
        let combos: Vec<Self> = serde_json::from_str(json)?;

        let mut ids = FxHashSet::default();
        for combo in &combos {
            if combo.required_abilities.is_empty() {
                return Err(ContentError::invalid(
                    "combo",
                    format!("{} has no required abilities", combo.id),
                ));
            }
            if !ids.insert(combo.id.as_str()) {
                return Err(ContentError::invalid("combo", format!("duplicate combo id {}", combo.id)));
            }
            for ability in combo.required_abilities.iter().filter(|a| a.is_unknown()) {
                tracing::warn!(combo = %combo.id, %ability, "combo requires unknown ability");
            }
        }

        tracing::info!(combos = combos.len(), "combo definitions loaded");
        Ok(combos)
    }
}
