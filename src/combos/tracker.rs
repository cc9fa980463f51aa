//! Combo chain tracking.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::definition::{ComboDefinition, ComboId};
use crate::cards::AbilityKind;
use crate::core::{MatchConfig, PlayerSide};
use crate::effects::Effect;
use crate::events::{EventLog, MatchEvent};

/// Lifecycle of a combo chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboState {
    Pending,
    Completed,
    Expired,
}

/// One side's partial progress through a combo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveCombo {
    pub combo: ComboId,
    pub side: PlayerSide,
    pub abilities_played: OrdSet<AbilityKind>,
    pub timer_remaining: f64,
    pub state: ComboState,
}

/// A combo finished on this resolution, with the bonus to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboCompletion {
    pub combo: ComboId,
    pub side: PlayerSide,
    pub bonus_effects: Vec<Effect>,
}

/// Matches resolved abilities against combo definitions.
///
/// Each side has at most one pending chain per combo. Every qualifying
/// ability resets the chain's window; a chain that sees no qualifying
/// ability for a whole window expires without a bonus.
///
/// ## Example
///
/// ```
/// use arena_ccg::cards::AbilityKind;
/// use arena_ccg::combos::{ComboDefinition, ComboTracker};
/// use arena_ccg::core::{MatchConfig, PlayerSide};
/// use arena_ccg::effects::Effect;
/// use arena_ccg::events::EventLog;
///
/// let inferno = ComboDefinition::new(
///     "inferno",
///     "Inferno",
///     [AbilityKind::FireDamage, AbilityKind::Burn],
/// )
/// .with_bonus(Effect::draw(1));
///
/// let mut events = EventLog::new();
/// let mut tracker = ComboTracker::new(vec![inferno], &MatchConfig::default());
///
/// tracker.on_ability_resolved(&AbilityKind::FireDamage, PlayerSide::Player, &mut events);
/// let done = tracker.on_ability_resolved(&AbilityKind::Burn, PlayerSide::Player, &mut events);
///
/// assert_eq!(done.len(), 1);
/// assert_eq!(done[0].bonus_effects, vec![Effect::draw(1)]);
/// ```
#[derive(Clone, Debug)]
pub struct ComboTracker {
    definitions: Vec<ComboDefinition>,
    window: f64,
    active: Vec<ActiveCombo>,
}

impl ComboTracker {
    #[must_use]
    pub fn new(definitions: Vec<ComboDefinition>, config: &MatchConfig) -> Self {
        Self {
            definitions,
            window: config.combo_window,
            active: Vec::new(),
        }
    }

    /// Feed one resolved ability.
    ///
    /// Completion is evaluated immediately; every combo completed by this
    /// ability is returned and announced with `ComboChainCompleted`.
    pub fn on_ability_resolved(
        &mut self,
        ability: &AbilityKind,
        side: PlayerSide,
        events: &mut EventLog,
    ) -> Vec<ComboCompletion> {
        let mut completions = Vec::new();

        for definition in self.definitions.iter().filter(|d| d.requires(ability)) {
            let index = match self
                .active
                .iter()
                .position(|c| c.combo == definition.id && c.side == side && c.state == ComboState::Pending)
            {
                Some(index) => index,
                None => {
                    tracing::debug!(combo = %definition.id, %side, "combo chain started");
                    events.push(MatchEvent::ComboChainStarted {
                        side,
                        combo: definition.id.clone(),
                    });
                    self.active.push(ActiveCombo {
                        combo: definition.id.clone(),
                        side,
                        abilities_played: OrdSet::new(),
                        timer_remaining: self.window,
                        state: ComboState::Pending,
                    });
                    self.active.len() - 1
                }
            };

            let chain = &mut self.active[index];
            chain.abilities_played.insert(ability.clone());
            chain.timer_remaining = self.window;

            let complete = definition
                .required_abilities
                .iter()
                .all(|required| chain.abilities_played.contains(required));
            if !complete {
                tracing::debug!(
                    combo = %definition.id,
                    %side,
                    progress = chain.abilities_played.len(),
                    required = definition.required_abilities.len(),
                    "combo progressed"
                );
                continue;
            }

            chain.state = ComboState::Completed;
            tracing::debug!(combo = %definition.id, %side, "combo chain completed");
            events.push(MatchEvent::ComboChainCompleted {
                side,
                combo: definition.id.clone(),
                bonus_effects: definition.bonus_effects.clone(),
            });
            completions.push(ComboCompletion {
                combo: definition.id.clone(),
                side,
                bonus_effects: definition.bonus_effects.clone(),
            });
        }

        self.active.retain(|c| c.state == ComboState::Pending);
        completions
    }

    /// Advance every pending chain's window. Returns the chains that expired.
    pub fn tick(&mut self, dt: f64, events: &mut EventLog) -> Vec<ActiveCombo> {
        if !(dt.is_finite() && dt > 0.0) {
            return Vec::new();
        }

        for chain in &mut self.active {
            chain.timer_remaining = (chain.timer_remaining - dt).max(0.0);
            if chain.timer_remaining <= 0.0 {
                chain.state = ComboState::Expired;
            }
        }

        let (expired, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|c| c.state == ComboState::Expired);
        self.active = pending;

        for chain in &expired {
            tracing::debug!(combo = %chain.combo, side = %chain.side, "combo chain expired");
            events.push(MatchEvent::ComboChainExpired {
                side: chain.side,
                combo: chain.combo.clone(),
            });
        }
        expired
    }

    /// Pending chains, oldest first.
    #[must_use]
    pub fn active(&self) -> &[ActiveCombo] {
        &self.active
    }

    #[must_use]
    pub fn pending(&self, combo: &ComboId, side: PlayerSide) -> Option<&ActiveCombo> {
        self.active.iter().find(|c| &c.combo == combo && c.side == side)
    }

    #[must_use]
    pub fn definitions(&self) -> &[ComboDefinition] {
        &self.definitions
    }
}
