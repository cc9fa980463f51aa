//! The arena effect engine.
//!
//! Holds the match's selected arena and everything computed from it: turn
//! mana, passive damage and healing bonuses, special-rule firing and
//! objective progress.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::definition::{Arena, ArenaId, HeroBonus};
use super::objectives::{Objective, ObjectiveKind};
use super::rules::{RuleContext, RuleTrigger, SpecialRuleResult};
use crate::core::{PlayerSide, RulesError, SideMap};
use crate::effects::DamageType;
use crate::events::{EventLog, MatchEvent};
use crate::resources::{ManaColor, ManaPool};

/// Single-color mana produced by the arena for one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaGrant {
    pub color: ManaColor,
    pub amount: u32,
}

impl ManaGrant {
    #[must_use]
    pub fn to_pool(self) -> ManaPool {
        ManaPool::single(self.color, self.amount)
    }
}

/// Runtime state of the engine, without the arena content itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaState {
    pub arena: Option<ArenaId>,
    pub objectives: Vec<Objective>,
    /// Turn each once-per-turn rule last fired on, per side.
    pub last_fired: SideMap<BTreeMap<String, u32>>,
}

/// Applies the selected arena's rules to a match.
///
/// ## Example
///
/// ```
/// use arena_ccg::arena::{Arena, ArenaEffectEngine};
/// use arena_ccg::events::EventLog;
/// use arena_ccg::resources::ManaColor;
///
/// let mut events = EventLog::new();
/// let mut engine = ArenaEffectEngine::new();
/// engine
///     .select(Arena::new("frozen_lake", "Frozen Lake", ManaColor::Azure, 2), &mut events)
///     .unwrap();
///
/// // Azure's opposite is Crimson: 2 - 1.
/// let grant = engine.generate_turn_mana(Some(ManaColor::Crimson)).unwrap();
/// assert_eq!((grant.color, grant.amount), (ManaColor::Azure, 1));
///
/// let grant = engine.generate_turn_mana(Some(ManaColor::Azure)).unwrap();
/// assert_eq!(grant.amount, 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ArenaEffectEngine {
    arena: Option<Arena>,
    objectives: Vec<Objective>,
    last_fired: SideMap<BTreeMap<String, u32>>,
}

impl ArenaEffectEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the match's arena. Allowed once per match.
    pub fn select(&mut self, arena: Arena, events: &mut EventLog) -> Result<(), RulesError> {
        if let Some(current) = &self.arena {
            tracing::warn!(current = %current.id, rejected = %arena.id, "arena already selected");
            return Err(RulesError::ArenaAlreadySelected);
        }

        self.objectives = arena.objectives.iter().map(Objective::from_definition).collect();
        tracing::info!(arena = %arena.id, color = %arena.mana_color, "arena selected");
        events.push(MatchEvent::ArenaSelected {
            arena: arena.id.clone(),
        });
        self.arena = Some(arena);
        Ok(())
    }

    #[must_use]
    pub fn arena(&self) -> Option<&Arena> {
        self.arena.as_ref()
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.arena.is_some()
    }

    /// Mana the arena produces this turn for a hero of the given affinity.
    ///
    /// Matching affinity adds one; the arena color's opposite loses one but
    /// never drops below one. `None` before an arena is selected.
    #[must_use]
    pub fn generate_turn_mana(&self, hero_affinity: Option<ManaColor>) -> Option<ManaGrant> {
        let arena = self.arena.as_ref()?;
        let base = arena.mana_generation_amount;

        let amount = match hero_affinity {
            Some(affinity) if affinity == arena.mana_color => base.saturating_add(1),
            Some(affinity) if affinity == arena.mana_color.opposite() => base.saturating_sub(1).max(1),
            _ => base,
        };

        Some(ManaGrant {
            color: arena.mana_color,
            amount,
        })
    }

    /// Damage after the arena's passive bonuses, floored at zero.
    #[must_use]
    pub fn apply_damage_bonus(&self, base: u32, damage_type: DamageType) -> u32 {
        let Some(arena) = &self.arena else {
            return base;
        };
        let passive = &arena.passive_effects;

        let mut bonus = passive.type_damage_bonus.get(&damage_type).copied().unwrap_or(0);
        if damage_type.color() == Some(arena.mana_color) {
            bonus += passive.color_damage_bonus;
        }
        adjust(base, bonus)
    }

    /// Healing after the arena's passive bonus, floored at zero.
    #[must_use]
    pub fn apply_healing_bonus(&self, base: u32) -> u32 {
        match &self.arena {
            Some(arena) => adjust(base, arena.passive_effects.healing_bonus),
            None => base,
        }
    }

    /// Bonuses for heroes of the given affinity. Zero when the arena has none.
    #[must_use]
    pub fn hero_bonus(&self, affinity: ManaColor) -> HeroBonus {
        self.arena
            .as_ref()
            .and_then(|arena| arena.hero_bonuses.get(&affinity).copied())
            .unwrap_or_default()
    }

    /// Whether the named rule fires for this context on this turn.
    ///
    /// Unknown rule names and trigger kinds never fire.
    #[must_use]
    pub fn check_special_rule_trigger(&self, name: &str, turn_number: u32, context: &RuleContext) -> bool {
        let Some(rule) = self.arena.as_ref().and_then(|a| a.special_rules.get(name)) else {
            return false;
        };

        if !rule.trigger.matches(turn_number, context) {
            return false;
        }
        if rule.trigger == RuleTrigger::OncePerTurn {
            return self.last_fired[context.side].get(name) != Some(&turn_number);
        }
        true
    }

    /// Fire the named rule and announce its effect.
    ///
    /// The effect is returned for the caller to apply; nothing here touches
    /// combat state. Call after [`check_special_rule_trigger`](Self::check_special_rule_trigger).
    pub fn execute_special_rule(
        &mut self,
        name: &str,
        turn_number: u32,
        context: &RuleContext,
        events: &mut EventLog,
    ) -> Option<SpecialRuleResult> {
        let rule = self.arena.as_ref()?.special_rules.get(name)?;
        if rule.trigger == RuleTrigger::Unknown {
            tracing::debug!(rule = name, "ignoring rule with unknown trigger");
            return None;
        }

        let result = SpecialRuleResult {
            rule: name.to_string(),
            side: context.side,
            effect: rule.effect.clone(),
        };

        if rule.trigger == RuleTrigger::OncePerTurn {
            self.last_fired[context.side].insert(name.to_string(), turn_number);
        }

        tracing::debug!(rule = name, side = %context.side, turn_number, "special rule fired");
        events.push(MatchEvent::ArenaEffectTriggered {
            rule: result.rule.clone(),
            side: result.side,
            effect: result.effect.clone(),
        });
        Some(result)
    }

    /// Fire every rule whose trigger matches, in rule-name order.
    pub fn fire_triggered_rules(
        &mut self,
        turn_number: u32,
        context: &RuleContext,
        events: &mut EventLog,
    ) -> Vec<SpecialRuleResult> {
        let names: Vec<String> = match &self.arena {
            Some(arena) => arena
                .special_rules
                .keys()
                .filter(|name| self.check_special_rule_trigger(name, turn_number, context))
                .cloned()
                .collect(),
            None => return Vec::new(),
        };

        names
            .iter()
            .filter_map(|name| self.execute_special_rule(name, turn_number, context, events))
            .collect()
    }

    /// Count progress toward every open objective of this kind.
    ///
    /// Returns how many objectives this completed.
    pub fn update_objective_progress(
        &mut self,
        kind: ObjectiveKind,
        side: PlayerSide,
        amount: u32,
        events: &mut EventLog,
    ) -> usize {
        if kind == ObjectiveKind::Unknown || amount == 0 {
            return 0;
        }

        let mut completed = 0;
        for (index, objective) in self.objectives.iter_mut().enumerate() {
            if objective.kind != kind || !objective.advance(side, amount) {
                continue;
            }

            completed += 1;
            let reward = self
                .arena
                .as_ref()
                .and_then(|arena| arena.objectives.get(index))
                .and_then(|definition| definition.reward.clone());

            tracing::info!(objective = %objective.id, %side, "arena objective completed");
            events.push(MatchEvent::ArenaObjectiveCompleted {
                objective: objective.id.clone(),
                side,
                reward,
            });
        }
        completed
    }

    #[must_use]
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    #[must_use]
    pub fn objective(&self, id: &str) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.id == id)
    }

    /// Capture runtime state for a snapshot.
    #[must_use]
    pub fn state(&self) -> ArenaState {
        ArenaState {
            arena: self.arena.as_ref().map(|a| a.id.clone()),
            objectives: self.objectives.clone(),
            last_fired: self.last_fired.clone(),
        }
    }
}

fn adjust(base: u32, bonus: i32) -> u32 {
    let value = i64::from(base) + i64::from(bonus);
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
