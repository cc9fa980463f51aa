//! Arena objectives.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerSide, SideMap};
use crate::effects::Effect;

/// What an objective counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    DealDamage,
    DestroyCreatures,
    PlayCards,
    CastSpells,
    HealHealth,
    /// Kinds this build does not count; progress updates are ignored.
    #[serde(other)]
    Unknown,
}

/// Authored objective.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveDefinition {
    pub id: String,
    pub kind: ObjectiveKind,
    pub target: u32,
    #[serde(default)]
    pub reward: Option<Effect>,
    #[serde(default)]
    pub description: String,
}

impl ObjectiveDefinition {
    pub fn new(id: impl Into<String>, kind: ObjectiveKind, target: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            target,
            reward: None,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_reward(mut self, reward: Effect) -> Self {
        self.reward = Some(reward);
        self
    }
}

/// Runtime progress of one objective.
///
/// Progress only grows and is capped at the target. The first side to reach
/// the target completes the objective for the match; after that it stops
/// counting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub kind: ObjectiveKind,
    pub target: u32,
    pub progress: SideMap<u32>,
    pub completed_by: Option<PlayerSide>,
}

impl Objective {
    #[must_use]
    pub fn from_definition(definition: &ObjectiveDefinition) -> Self {
        Self {
            id: definition.id.clone(),
            kind: definition.kind,
            target: definition.target,
            progress: SideMap::with_value(0),
            completed_by: None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_by.is_some()
    }

    /// Add progress for a side. Returns `true` if this completed the objective.
    pub fn advance(&mut self, side: PlayerSide, amount: u32) -> bool {
        if self.is_completed() || amount == 0 || self.kind == ObjectiveKind::Unknown {
            return false;
        }

        let progress = &mut self.progress[side];
        *progress = progress.saturating_add(amount).min(self.target);

        if *progress >= self.target {
            self.completed_by = Some(side);
            return true;
        }
        false
    }
}
