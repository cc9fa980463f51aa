//! The match orchestrator.
//!
//! `MatchContext` owns one instance of every rules component for a single
//! match and routes collaborator inputs through them in a fixed order:
//!
//! - **card played**: affordability, uniqueness, spend, placement, objectives
//! - **ability resolved**: combos first, then arena bonuses and objectives
//! - **tick**: turn expiry (with forced discards), card timers, combo windows
//!
//! Every input either succeeds or returns a [`RulesError`] without changing
//! state. Events accumulate in order and are collected with
//! [`MatchContext::drain_events`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::snapshot::MatchSnapshot;
use crate::arena::{Arena, ArenaEffectEngine, ObjectiveKind, RuleContext, RuleEvent, SpecialRuleResult};
use crate::cards::{AbilityKind, CardInstance, CardRegistry, CardSummary};
use crate::combos::{ComboCompletion, ComboDefinition, ComboTracker};
use crate::core::{CardSku, ContentError, DuplicatePlay, EntityId, MatchConfig, PlayerSide, RulesError, SideMap};
use crate::events::{EventLog, MatchEvent, TurnEndReason};
use crate::resources::{ManaColor, ManaPool, ResourceLedger};
use crate::timers::{TimerTick, TurnTimers};
use crate::uniqueness::UniquenessGuard;
use crate::zones::{Zone, ZoneKind, ZoneRegistry};

/// An ability that finished resolving, as reported by effect resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityResolution {
    /// The card whose ability resolved.
    pub card: EntityId,
    pub ability: AbilityKind,
    /// Unmodified damage or healing amount. Zero for other abilities.
    #[serde(default)]
    pub magnitude: u32,
}

impl AbilityResolution {
    pub fn new(card: EntityId, ability: impl Into<AbilityKind>, magnitude: u32) -> Self {
        Self {
            card,
            ability: ability.into(),
            magnitude,
        }
    }
}

/// What resolving an ability produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAbility {
    pub side: PlayerSide,
    pub ability: AbilityKind,
    /// Magnitude after arena and hero bonuses.
    pub magnitude: u32,
    /// Combos this ability completed; their bonuses are the caller's to apply.
    pub combos: Vec<ComboCompletion>,
}

/// A collaborator input, for callers that queue inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum MatchInput {
    SelectArena { arena: Arena },
    StartTurn { side: PlayerSide, turn_number: u32 },
    EndTurn,
    Tick { dt: f64 },
    CardScanned { side: PlayerSide, card: EntityId, sku: CardSku },
    PlayCard { side: PlayerSide, card: EntityId },
    DiscardCard { side: PlayerSide, card: EntityId },
    AbilityResolved { side: PlayerSide, resolution: AbilityResolution },
    CreatureDied { card: EntityId },
    ExileCard { card: EntityId },
    OfferToSacrificePool { card: EntityId },
    SacrificeCard { card: EntityId, beneficiary: Option<PlayerSide> },
    TransformCard { card: EntityId, into: CardSku },
    ActivateSpecialRule { side: PlayerSide, rule: String },
}

/// One match's rules state.
///
/// ## Example
///
/// ```
/// use arena_ccg::arena::Arena;
/// use arena_ccg::cards::{CardDefinition, CardKind, CardRegistry};
/// use arena_ccg::core::{CardSku, EntityId, MatchConfig, PlayerSide};
/// use arena_ccg::resources::{Cost, ManaColor};
/// use arena_ccg::rules::MatchContext;
///
/// let mut cards = CardRegistry::new();
/// cards
///     .register(
///         CardDefinition::new("CRE_001", "Ember Whelp", CardKind::Creature)
///             .with_cost(Cost::energy(1).with_mana(ManaColor::Crimson, 1)),
///     )
///     .unwrap();
///
/// let mut game = MatchContext::new(MatchConfig::default(), cards, Vec::new());
/// game.select_arena(Arena::new("forge", "Forge", ManaColor::Crimson, 2)).unwrap();
/// game.start_turn(PlayerSide::Player, 1).unwrap();
///
/// let card = EntityId(1);
/// game.card_scanned(PlayerSide::Player, card, &CardSku::new("CRE_001")).unwrap();
/// game.tick(3.0);
/// game.card_play_requested(PlayerSide::Player, card).unwrap();
///
/// assert_eq!(game.ledger(PlayerSide::Player).energy(), 0);
/// assert_eq!(game.ledger(PlayerSide::Player).mana(ManaColor::Crimson), 1);
/// ```
#[derive(Clone, Debug)]
pub struct MatchContext {
    config: MatchConfig,
    registry: CardRegistry,
    ledgers: SideMap<ResourceLedger>,
    heroes: SideMap<Option<ManaColor>>,
    timers: TurnTimers,
    arena: ArenaEffectEngine,
    zones: ZoneRegistry,
    uniqueness: UniquenessGuard,
    combos: ComboTracker,
    cards: FxHashMap<EntityId, CardInstance>,
    active: Option<PlayerSide>,
    turn_number: u32,
    events: EventLog,
}

impl MatchContext {
    /// Build a match from a configuration that has already been validated,
    /// such as one loaded with [`MatchConfig::from_json`]. Use
    /// [`MatchContext::try_new`] for configurations assembled in code.
    #[must_use]
    pub fn new(config: MatchConfig, registry: CardRegistry, combos: Vec<ComboDefinition>) -> Self {
        let persists = config.mana_persists;
        Self {
            ledgers: SideMap::new(|side| ResourceLedger::new(side, persists)),
            heroes: SideMap::with_value(None),
            timers: TurnTimers::new(&config),
            arena: ArenaEffectEngine::new(),
            zones: ZoneRegistry::new(),
            uniqueness: UniquenessGuard::new(),
            combos: ComboTracker::new(combos, &config),
            cards: FxHashMap::default(),
            active: None,
            turn_number: 0,
            events: EventLog::new(),
            registry,
            config,
        }
    }

    /// Validate `config`, then build the match.
    pub fn try_new(
        config: MatchConfig,
        registry: CardRegistry,
        combos: Vec<ComboDefinition>,
    ) -> Result<Self, ContentError> {
        config.validate()?;
        Ok(Self::new(config, registry, combos))
    }

    /// Set a side's hero color affinity.
    #[must_use]
    pub fn with_hero_affinity(mut self, side: PlayerSide, affinity: ManaColor) -> Self {
        self.heroes[side] = Some(affinity);
        self
    }

    // === Turn structure ===

    /// Bind the match's arena. Allowed once.
    pub fn select_arena(&mut self, arena: Arena) -> Result<(), RulesError> {
        self.arena.select(arena, &mut self.events)
    }

    /// Start `side`'s turn.
    ///
    /// Refills the side's resources (with the arena's mana for its hero) and
    /// fires the arena's turn-start rules. Returns the rules that fired.
    pub fn start_turn(&mut self, side: PlayerSide, turn_number: u32) -> Result<Vec<SpecialRuleResult>, RulesError> {
        self.timers.start_turn(turn_number)?;

        self.active = Some(side);
        self.turn_number = turn_number;

        let arena_mana = self
            .arena
            .generate_turn_mana(self.heroes[side])
            .map_or_else(ManaPool::default, |grant| grant.to_pool());
        self.ledgers[side].start_new_turn(turn_number, arena_mana, &mut self.events);

        tracing::info!(%side, turn_number, "turn started");
        self.events.push(MatchEvent::TurnStarted { side, turn_number });

        Ok(self
            .arena
            .fire_triggered_rules(turn_number, &RuleContext::turn_start(side), &mut self.events))
    }

    /// End the active turn. Every pending card is discarded.
    pub fn end_turn(&mut self) -> Result<Vec<EntityId>, RulesError> {
        let side = self.active.ok_or(RulesError::NoActiveTurn)?;
        let discarded = self.timers.end_turn(&mut self.events);
        self.finish_turn(side, &discarded, TurnEndReason::Ended);
        Ok(discarded)
    }

    /// Advance every clock by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> TimerTick {
        let outcome = self.timers.tick(dt, &mut self.events);

        if outcome.turn_expired {
            if let Some(side) = self.active {
                self.finish_turn(side, &outcome.force_discarded, TurnEndReason::TimerExpired);
            }
        }
        for card in &outcome.card_expired {
            self.cards.remove(card);
        }

        self.combos.tick(dt, &mut self.events);
        outcome
    }

    fn finish_turn(&mut self, side: PlayerSide, discarded: &[EntityId], reason: TurnEndReason) {
        for card in discarded {
            self.cards.remove(card);
        }
        tracing::info!(%side, turn_number = self.turn_number, ?reason, "turn ended");
        self.events.push(MatchEvent::TurnEnded {
            side,
            turn_number: self.turn_number,
            reason,
        });
        self.active = None;
    }

    // === Card decisions ===

    /// Accept a scanned card from the active side and start its decision clock.
    pub fn card_scanned(&mut self, side: PlayerSide, card: EntityId, sku: &CardSku) -> Result<(), RulesError> {
        self.require_active(side)?;
        if self.zones.contains(card) {
            return Err(RulesError::InvalidZoneTransition { card });
        }
        let definition = self.registry.get(sku).ok_or(RulesError::UnknownCard { card })?.clone();

        self.timers.start_card_timer(card, &mut self.events)?;
        tracing::debug!(%side, %card, %sku, "card scanned");
        self.cards.insert(card, CardInstance::new(card, side, definition));
        Ok(())
    }

    /// Play a pending card.
    ///
    /// Checks run before anything is spent, so a rejected play leaves the
    /// card pending and the pool untouched. Returns the zone the card went to.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn card_play_requested(&mut self, side: PlayerSide, card: EntityId) -> Result<Zone, RulesError> {
        self.require_active(side)?;
        self.timers.cards().check_playable(card)?;
        let instance = self.cards.get(&card).ok_or(RulesError::UnknownCard { card })?;
        let definition = instance.definition.clone();

        let ledger = &self.ledgers[side];
        let affordability = ledger.can_afford(&definition.cost);
        if !affordability.affordable {
            return Err(ledger.reject(affordability.missing, &mut self.events));
        }

        let legendary = (definition.legendary && definition.is_creature()).then_some(definition.name.as_str());
        if let Err(err) = self
            .uniqueness
            .check(&definition.sku, definition.once_per_game, legendary, side)
        {
            if let RulesError::DuplicatePlay(DuplicatePlay::Legendary { name, side }) = &err {
                self.events.push(MatchEvent::LegendaryRuleTriggered {
                    side: *side,
                    name: name.clone(),
                });
            }
            return Err(err);
        }

        self.timers.cards_mut().play(card)?;
        self.ledgers[side].spend(&definition.cost, &mut self.events)?;

        if definition.once_per_game {
            self.uniqueness.mark_played(&definition.sku, self.turn_number);
        }
        if let Some(name) = legendary {
            self.uniqueness.add_legendary(name, side, &mut self.events);
        }

        let zone = if definition.is_creature() {
            Zone::battlefield(side)
        } else {
            Zone::graveyard(side)
        };
        self.zones.place(card, zone, &mut self.events);
        self.events.push(MatchEvent::CardPlayed {
            side,
            card,
            sku: definition.sku.clone(),
        });

        self.arena
            .update_objective_progress(ObjectiveKind::PlayCards, side, 1, &mut self.events);
        if definition.is_spell() {
            self.arena
                .update_objective_progress(ObjectiveKind::CastSpells, side, 1, &mut self.events);
        }
        Ok(zone)
    }

    /// Discard a pending card at the player's request.
    pub fn card_discard_requested(&mut self, side: PlayerSide, card: EntityId) -> Result<(), RulesError> {
        self.require_active(side)?;
        self.timers.cards_mut().discard(card, &mut self.events)?;
        self.cards.remove(&card);
        Ok(())
    }

    // === Abilities ===

    /// Record a resolved ability.
    ///
    /// The card must have been played (it is in a zone) and belong to `side`.
    /// Combos are matched first; the returned magnitude then includes the
    /// arena's passive bonus and the side's hero bonus, and feeds the damage
    /// and healing objectives. Combo bonuses are not folded into it.
    pub fn ability_resolved(
        &mut self,
        side: PlayerSide,
        resolution: &AbilityResolution,
    ) -> Result<ResolvedAbility, RulesError> {
        let card = resolution.card;
        let owner = self.cards.get(&card).ok_or(RulesError::UnknownCard { card })?.owner;
        if !self.zones.contains(card) {
            return Err(RulesError::InvalidZoneTransition { card });
        }
        if owner != side {
            return Err(RulesError::NotCardOwner { card, side });
        }

        let combos = self
            .combos
            .on_ability_resolved(&resolution.ability, side, &mut self.events);

        let hero = self.heroes[side].map(|affinity| self.arena.hero_bonus(affinity)).unwrap_or_default();
        let mut magnitude = resolution.magnitude;
        if let Some(damage_type) = resolution.ability.damage_type() {
            magnitude = self.arena.apply_damage_bonus(magnitude, damage_type);
            magnitude = magnitude.saturating_add_signed(hero.damage_bonus);
            self.arena
                .update_objective_progress(ObjectiveKind::DealDamage, side, magnitude, &mut self.events);
        } else if resolution.ability.is_healing() {
            magnitude = self.arena.apply_healing_bonus(magnitude);
            magnitude = magnitude.saturating_add_signed(hero.healing_bonus);
            self.arena
                .update_objective_progress(ObjectiveKind::HealHealth, side, magnitude, &mut self.events);
        }

        Ok(ResolvedAbility {
            side,
            ability: resolution.ability.clone(),
            magnitude,
            combos,
        })
    }

    // === Zones ===

    /// A creature on a battlefield died.
    ///
    /// It goes to its owner's graveyard and releases its legendary name.
    /// Death rules fire for both sides and the opposing side gains
    /// creature-destruction progress. Returns the rules that fired.
    pub fn creature_died(&mut self, card: EntityId) -> Result<Vec<SpecialRuleResult>, RulesError> {
        let owner = self.battlefield_side(card)?;
        self.zones.move_card(card, Zone::graveyard(owner), &mut self.events)?;
        self.release_legendary(card, owner);

        let died = RuleEvent::CreatureDied { owner };
        let mut fired = Vec::new();
        for side in PlayerSide::ALL {
            fired.extend(self.arena.fire_triggered_rules(
                self.turn_number,
                &RuleContext::new(side, died),
                &mut self.events,
            ));
        }

        self.arena.update_objective_progress(
            ObjectiveKind::DestroyCreatures,
            owner.opponent(),
            1,
            &mut self.events,
        );
        Ok(fired)
    }

    /// Move a played card into its owner's sacrifice pool, where it can later
    /// be sacrificed. Returns the zone it left.
    pub fn offer_to_sacrifice_pool(&mut self, card: EntityId) -> Result<Zone, RulesError> {
        let owner = self.cards.get(&card).ok_or(RulesError::UnknownCard { card })?.owner;
        let from = self
            .zones
            .zone_of(card)
            .ok_or(RulesError::InvalidZoneTransition { card })?;
        if from.kind == ZoneKind::SacrificePool {
            return Err(RulesError::InvalidZoneTransition { card });
        }

        self.zones
            .move_card(card, Zone::sacrifice_pool(owner), &mut self.events)?;
        if from.kind == ZoneKind::Battlefield {
            self.release_legendary(card, from.side);
        }
        Ok(from)
    }

    /// Exile a tracked card.
    pub fn exile_card(&mut self, card: EntityId) -> Result<Zone, RulesError> {
        let from = self.zones.exile(card, &mut self.events)?;
        if from.kind == ZoneKind::Battlefield {
            self.release_legendary(card, from.side);
        }
        Ok(from)
    }

    /// Sacrifice a card from a battlefield or sacrifice pool, relaying its
    /// sacrifice effects to `beneficiary`.
    pub fn sacrifice_card(&mut self, card: EntityId, beneficiary: Option<PlayerSide>) -> Result<PlayerSide, RulesError> {
        let effects = self
            .cards
            .get(&card)
            .ok_or(RulesError::UnknownCard { card })?
            .definition
            .sacrifice_effects
            .clone();

        let from = self.zones.zone_of(card);
        let owner = self.zones.sacrifice(card, beneficiary, effects, &mut self.events)?;
        if from.is_some_and(|zone| zone.kind == ZoneKind::Battlefield) {
            self.release_legendary(card, owner);
        }
        Ok(owner)
    }

    /// Turn a battlefield card into another card.
    ///
    /// A legendary result must not collide with another legendary of the
    /// same name on its side.
    pub fn transform_card(&mut self, card: EntityId, into: &CardSku) -> Result<(), RulesError> {
        let side = self.battlefield_side(card)?;
        let replacement = self.registry.get(into).ok_or(RulesError::UnknownCard { card })?.clone();
        let current = self.cards.get(&card).ok_or(RulesError::UnknownCard { card })?;

        let old_name = current.definition.legendary.then(|| current.definition.name.clone());
        let renamed = old_name.as_deref() != Some(replacement.name.as_str());
        if replacement.legendary && renamed && !self.uniqueness.can_play_legendary(&replacement.name, side) {
            self.events.push(MatchEvent::LegendaryRuleTriggered {
                side,
                name: replacement.name.clone(),
            });
            return Err(RulesError::DuplicatePlay(DuplicatePlay::Legendary {
                name: replacement.name,
                side,
            }));
        }

        if let Some(name) = &old_name {
            self.uniqueness.remove_legendary(name, side);
        }
        if replacement.legendary {
            self.uniqueness.add_legendary(&replacement.name, side, &mut self.events);
        }

        let to = replacement.sku.clone();
        let previous = match self.cards.get_mut(&card) {
            Some(instance) => instance.transform(replacement),
            None => return Err(RulesError::UnknownCard { card }),
        };
        tracing::debug!(%card, from = %previous.sku, %to, "card transformed");
        self.events.push(MatchEvent::CardTransformed {
            card,
            from: previous.sku,
            to,
        });
        Ok(())
    }

    // === Arena ===

    /// Use a player-activated arena rule. `None` if it cannot fire now.
    pub fn activate_special_rule(
        &mut self,
        side: PlayerSide,
        rule: &str,
    ) -> Result<Option<SpecialRuleResult>, RulesError> {
        self.require_active(side)?;
        let context = RuleContext::activated(side);
        if !self.arena.check_special_rule_trigger(rule, self.turn_number, &context) {
            return Ok(None);
        }
        Ok(self
            .arena
            .execute_special_rule(rule, self.turn_number, &context, &mut self.events))
    }

    // === Dispatch ===

    /// Apply a queued input, discarding its return value.
    pub fn apply(&mut self, input: MatchInput) -> Result<(), RulesError> {
        match input {
            MatchInput::SelectArena { arena } => self.select_arena(arena),
            MatchInput::StartTurn { side, turn_number } => self.start_turn(side, turn_number).map(drop),
            MatchInput::EndTurn => self.end_turn().map(drop),
            MatchInput::Tick { dt } => {
                self.tick(dt);
                Ok(())
            }
            MatchInput::CardScanned { side, card, sku } => self.card_scanned(side, card, &sku),
            MatchInput::PlayCard { side, card } => self.card_play_requested(side, card).map(drop),
            MatchInput::DiscardCard { side, card } => self.card_discard_requested(side, card),
            MatchInput::AbilityResolved { side, resolution } => self.ability_resolved(side, &resolution).map(drop),
            MatchInput::CreatureDied { card } => self.creature_died(card).map(drop),
            MatchInput::ExileCard { card } => self.exile_card(card).map(drop),
            MatchInput::OfferToSacrificePool { card } => self.offer_to_sacrifice_pool(card).map(drop),
            MatchInput::SacrificeCard { card, beneficiary } => self.sacrifice_card(card, beneficiary).map(drop),
            MatchInput::TransformCard { card, into } => self.transform_card(card, &into),
            MatchInput::ActivateSpecialRule { side, rule } => self.activate_special_rule(side, &rule).map(drop),
        }
    }

    /// Take every event emitted since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.events.drain()
    }

    /// Capture the runtime state for resync.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        let mut cards: Vec<CardSummary> = self.cards.values().map(CardInstance::summary).collect();
        cards.sort_by_key(|c| c.id);

        MatchSnapshot {
            turn_number: self.turn_number,
            active_side: self.active,
            resources: SideMap::new(|side| *self.ledgers[side].pool()),
            timers: self.timers.clone(),
            arena: self.arena.state(),
            zones: self.zones.clone(),
            uniqueness: self.uniqueness.clone(),
            combos: self.combos.active().to_vec(),
            cards,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn ledger(&self, side: PlayerSide) -> &ResourceLedger {
        &self.ledgers[side]
    }

    #[must_use]
    pub fn timers(&self) -> &TurnTimers {
        &self.timers
    }

    #[must_use]
    pub fn arena(&self) -> &ArenaEffectEngine {
        &self.arena
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    #[must_use]
    pub fn uniqueness(&self) -> &UniquenessGuard {
        &self.uniqueness
    }

    #[must_use]
    pub fn combos(&self) -> &ComboTracker {
        &self.combos
    }

    #[must_use]
    pub fn card(&self, card: EntityId) -> Option<&CardInstance> {
        self.cards.get(&card)
    }

    #[must_use]
    pub fn active_side(&self) -> Option<PlayerSide> {
        self.active
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    // === Helpers ===

    fn require_active(&self, side: PlayerSide) -> Result<(), RulesError> {
        match self.active {
            None => Err(RulesError::NoActiveTurn),
            Some(active) if active != side => Err(RulesError::NotActivePlayer { side }),
            Some(_) => Ok(()),
        }
    }

    fn battlefield_side(&self, card: EntityId) -> Result<PlayerSide, RulesError> {
        if !self.cards.contains_key(&card) {
            return Err(RulesError::UnknownCard { card });
        }
        match self.zones.zone_of(card) {
            Some(zone) if zone.kind == ZoneKind::Battlefield => Ok(zone.side),
            _ => Err(RulesError::InvalidZoneTransition { card }),
        }
    }

    fn release_legendary(&mut self, card: EntityId, side: PlayerSide) {
        if let Some(instance) = self.cards.get(&card) {
            if instance.definition.legendary {
                self.uniqueness.remove_legendary(&instance.definition.name, side);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{ObjectiveDefinition, RuleTrigger, SpecialRule};
    use crate::cards::{CardDefinition, CardKind};
    use crate::effects::Effect;
    use crate::resources::Cost;

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        for card in [
            CardDefinition::new("HERO_001", "Ignis", CardKind::Creature)
                .legendary()
                .once_per_game()
                .with_cost(Cost::energy(1)),
            CardDefinition::new("CRE_001", "Ember Whelp", CardKind::Creature)
                .with_cost(Cost::energy(1))
                .with_sacrifice_effect(Effect::gain_energy(1)),
            CardDefinition::new("SPL_001", "Fireball", CardKind::Spell)
                .with_cost(Cost::energy(1).with_mana(ManaColor::Crimson, 1)),
            CardDefinition::new("LEG_002", "Ignis", CardKind::Creature).legendary(),
        ] {
            registry.register(card).unwrap();
        }
        registry
    }

    fn arena() -> Arena {
        Arena::new("forge", "Forge", ManaColor::Crimson, 2)
            .with_special_rule(
                "blessing",
                SpecialRule::new(RuleTrigger::OncePerTurn, Effect::gain_energy(1)),
            )
            .with_objective(ObjectiveDefinition::new("summoner", ObjectiveKind::PlayCards, 2))
    }

    fn started() -> MatchContext {
        let mut game = MatchContext::new(MatchConfig::default(), registry(), Vec::new());
        game.select_arena(arena()).unwrap();
        game.start_turn(PlayerSide::Player, 3).unwrap();
        game.drain_events();
        game
    }

    fn scan_and_validate(game: &mut MatchContext, card: u32, sku: &str) -> EntityId {
        let card = EntityId(card);
        game.card_scanned(PlayerSide::Player, card, &CardSku::new(sku)).unwrap();
        game.tick(3.0);
        card
    }

    #[test]
    fn test_scan_rejected_for_inactive_side() {
        let mut game = started();
        let err = game.card_scanned(PlayerSide::Opponent, EntityId(1), &CardSku::new("CRE_001"));
        assert_eq!(err, Err(RulesError::NotActivePlayer { side: PlayerSide::Opponent }));
        assert!(game.timers().cards().is_empty());
    }

    #[test]
    fn test_scan_unknown_sku() {
        let mut game = started();
        let err = game.card_scanned(PlayerSide::Player, EntityId(1), &CardSku::new("NOPE"));
        assert_eq!(err, Err(RulesError::UnknownCard { card: EntityId(1) }));
    }

    #[test]
    fn test_play_while_validating_rejected() {
        let mut game = started();
        game.card_scanned(PlayerSide::Player, EntityId(1), &CardSku::new("CRE_001"))
            .unwrap();

        let err = game.card_play_requested(PlayerSide::Player, EntityId(1));

        assert_eq!(err, Err(RulesError::CardValidating { card: EntityId(1) }));
        assert_eq!(game.ledger(PlayerSide::Player).energy(), 3);
    }

    #[test]
    fn test_spell_goes_to_graveyard() {
        let mut game = started();
        let card = scan_and_validate(&mut game, 1, "SPL_001");

        let zone = game.card_play_requested(PlayerSide::Player, card).unwrap();

        assert_eq!(zone, Zone::graveyard(PlayerSide::Player));
        assert_eq!(game.ledger(PlayerSide::Player).mana(ManaColor::Crimson), 1);
    }

    #[test]
    fn test_once_per_game_blocks_second_copy() {
        let mut game = started();
        let first = scan_and_validate(&mut game, 1, "HERO_001");
        game.card_play_requested(PlayerSide::Player, first).unwrap();
        game.creature_died(first).unwrap();

        let second = scan_and_validate(&mut game, 2, "HERO_001");
        let err = game.card_play_requested(PlayerSide::Player, second);

        assert!(matches!(
            err,
            Err(RulesError::DuplicatePlay(DuplicatePlay::OncePerGame { played_on_turn: 3, .. }))
        ));
        assert!(game.timers().cards().is_pending(second));
    }

    #[test]
    fn test_legendary_rule_on_play() {
        let mut game = started();
        let first = scan_and_validate(&mut game, 1, "HERO_001");
        game.card_play_requested(PlayerSide::Player, first).unwrap();
        let energy = game.ledger(PlayerSide::Player).energy();

        let second = scan_and_validate(&mut game, 2, "LEG_002");
        game.drain_events();
        let err = game.card_play_requested(PlayerSide::Player, second);

        assert!(matches!(err, Err(RulesError::DuplicatePlay(DuplicatePlay::Legendary { .. }))));
        assert_eq!(game.ledger(PlayerSide::Player).energy(), energy);
        let events = game.drain_events();
        assert!(events.iter().any(|e| e.name() == "legendary_rule_triggered"));
    }

    #[test]
    fn test_creature_death_frees_legendary() {
        let mut game = started();
        let hero = scan_and_validate(&mut game, 1, "LEG_002");
        game.card_play_requested(PlayerSide::Player, hero).unwrap();
        assert!(!game.uniqueness().can_play_legendary("Ignis", PlayerSide::Player));

        game.creature_died(hero).unwrap();

        assert!(game.uniqueness().can_play_legendary("Ignis", PlayerSide::Player));
        assert_eq!(game.zones().zone_of(hero), Some(Zone::graveyard(PlayerSide::Player)));
    }

    #[test]
    fn test_sacrifice_relays_effects() {
        let mut game = started();
        let whelp = scan_and_validate(&mut game, 1, "CRE_001");
        game.card_play_requested(PlayerSide::Player, whelp).unwrap();
        game.drain_events();

        game.sacrifice_card(whelp, Some(PlayerSide::Player)).unwrap();

        let events = game.drain_events();
        assert!(events.contains(&MatchEvent::SacrificePerformed {
            card: whelp,
            owner: PlayerSide::Player,
            beneficiary: Some(PlayerSide::Player),
            effects: vec![Effect::gain_energy(1)],
        }));
    }

    #[test]
    fn test_transform_emits_event() {
        let mut game = started();
        let whelp = scan_and_validate(&mut game, 1, "CRE_001");
        game.card_play_requested(PlayerSide::Player, whelp).unwrap();

        game.transform_card(whelp, &CardSku::new("LEG_002")).unwrap();

        assert_eq!(game.card(whelp).unwrap().name(), "Ignis");
        assert!(!game.uniqueness().can_play_legendary("Ignis", PlayerSide::Player));
        assert!(game
            .drain_events()
            .iter()
            .any(|e| matches!(e, MatchEvent::CardTransformed { .. })));
    }

    #[test]
    fn test_once_per_turn_rule_activation() {
        let mut game = started();

        assert!(game.activate_special_rule(PlayerSide::Player, "blessing").unwrap().is_some());
        assert!(game.activate_special_rule(PlayerSide::Player, "blessing").unwrap().is_none());
        assert_eq!(
            game.activate_special_rule(PlayerSide::Opponent, "blessing"),
            Err(RulesError::NotActivePlayer { side: PlayerSide::Opponent })
        );
    }

    #[test]
    fn test_play_cards_objective() {
        let mut game = started();
        for id in 1..=2 {
            let card = scan_and_validate(&mut game, id, "CRE_001");
            game.card_play_requested(PlayerSide::Player, card).unwrap();
        }

        let objective = game.arena().objective("summoner").unwrap();
        assert_eq!(objective.completed_by, Some(PlayerSide::Player));
    }

    #[test]
    fn test_ability_from_unplayed_card_rejected() {
        let mut game = started();
        let pending = EntityId(9);
        game.card_scanned(PlayerSide::Player, pending, &CardSku::new("CRE_001"))
            .unwrap();
        game.drain_events();

        let err = game.ability_resolved(
            PlayerSide::Player,
            &AbilityResolution::new(pending, AbilityKind::FireDamage, 30),
        );

        assert_eq!(err, Err(RulesError::InvalidZoneTransition { card: pending }));
        assert!(game.combos().active().is_empty());
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_ability_for_wrong_side_rejected() {
        let mut game = started();
        let whelp = scan_and_validate(&mut game, 1, "CRE_001");
        game.card_play_requested(PlayerSide::Player, whelp).unwrap();
        game.drain_events();

        let err = game.ability_resolved(
            PlayerSide::Opponent,
            &AbilityResolution::new(whelp, AbilityKind::FireDamage, 30),
        );

        assert_eq!(
            err,
            Err(RulesError::NotCardOwner {
                card: whelp,
                side: PlayerSide::Opponent,
            })
        );
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_sacrifice_pool_releases_legendary() {
        let mut game = started();
        let hero = scan_and_validate(&mut game, 1, "LEG_002");
        game.card_play_requested(PlayerSide::Player, hero).unwrap();

        let from = game.offer_to_sacrifice_pool(hero).unwrap();

        assert_eq!(from, Zone::battlefield(PlayerSide::Player));
        assert_eq!(game.zones().zone_of(hero), Some(Zone::sacrifice_pool(PlayerSide::Player)));
        assert!(game.uniqueness().can_play_legendary("Ignis", PlayerSide::Player));
        assert_eq!(
            game.offer_to_sacrifice_pool(hero),
            Err(RulesError::InvalidZoneTransition { card: hero })
        );
    }

    #[test]
    fn test_try_new_rejects_zero_turn() {
        let config = MatchConfig::default().with_turn_duration(0.0);
        assert!(MatchContext::try_new(config, registry(), Vec::new()).is_err());
        assert!(MatchContext::try_new(MatchConfig::default(), registry(), Vec::new()).is_ok());
    }

    #[test]
    fn test_end_turn_requires_active_turn() {
        let mut game = MatchContext::new(MatchConfig::default(), registry(), Vec::new());
        assert_eq!(game.end_turn(), Err(RulesError::NoActiveTurn));
    }
}
