//! Full match flow tests through `MatchContext`.
//!
//! Content is loaded from JSON the way a client ships it, then both sides
//! play turns through scans, plays, abilities and deaths.

use arena_ccg::arena::{ArenaCatalog, ArenaId};
use arena_ccg::cards::{AbilityKind, CardRegistry};
use arena_ccg::combos::ComboDefinition;
use arena_ccg::core::{CardSku, DuplicatePlay, EntityId, MatchConfig, PlayerSide, RulesError};
use arena_ccg::effects::Effect;
use arena_ccg::events::{DiscardReason, MatchEvent, TurnEndReason};
use arena_ccg::resources::ManaColor;
use arena_ccg::rules::{AbilityResolution, MatchContext, MatchInput, MatchSnapshot};
use arena_ccg::zones::Zone;

const CARDS: &str = r#"[
    { "sku": "HERO_001", "name": "Ignis", "legendary": true, "once_per_game": true,
      "cost": { "energy": 2, "mana": { "crimson": 1 } },
      "abilities": ["fire_damage", "burn"] },
    { "sku": "CRE_010", "name": "Ash Hound", "cost": { "energy": 1 },
      "abilities": ["area_damage"],
      "sacrifice_effects": [ { "kind": "gain_mana", "color": "crimson", "amount": 1 } ] },
    { "sku": "SPL_020", "name": "Mend", "kind": "spell", "cost": { "energy": 1 },
      "abilities": ["heal"] },
    { "sku": "SPL_021", "name": "Frost Bolt", "kind": "spell", "cost": { "energy": 1, "mana": { "azure": 1 } },
      "abilities": ["ice_damage"] }
]"#;

const ARENAS: &str = r#"{
    "arenas": [{
        "id": "ember_forge",
        "name": "Ember Forge",
        "mana_color": "crimson",
        "mana_generation_amount": 1,
        "passive_effects": { "color_damage_bonus": 1, "healing_bonus": -1 },
        "hero_bonuses": { "crimson": { "damage_bonus": 2 } },
        "special_rules": {
            "stoke": { "trigger": "turn_start", "effect": { "kind": "gain_energy", "amount": 1 } },
            "ember_rain": { "trigger": "on_death", "effect": { "kind": "damage", "amount": 1, "damage_type": "fire" } }
        },
        "objectives": [
            { "id": "scorch", "kind": "deal_damage", "target": 8,
              "reward": { "kind": "draw_cards", "count": 1 } },
            { "id": "hunter", "kind": "destroy_creatures", "target": 1 }
        ]
    }]
}"#;

const COMBOS: &str = r#"[
    { "id": "inferno", "name": "Inferno",
      "required_abilities": ["fire_damage", "burn", "area_damage"],
      "bonus_effects": [ { "kind": "damage", "amount": 5, "damage_type": "fire" } ] }
]"#;

fn new_match() -> MatchContext {
    let cards = CardRegistry::from_json(CARDS).unwrap();
    let combos = ComboDefinition::list_from_json(COMBOS).unwrap();
    let arena = ArenaCatalog::from_json(ARENAS)
        .unwrap()
        .get(&ArenaId::new("ember_forge"))
        .unwrap()
        .clone();

    let mut game = MatchContext::new(MatchConfig::default(), cards, combos)
        .with_hero_affinity(PlayerSide::Player, ManaColor::Crimson)
        .with_hero_affinity(PlayerSide::Opponent, ManaColor::Azure);
    game.select_arena(arena).unwrap();
    game
}

/// Scan a card and wait out validation.
fn scan(game: &mut MatchContext, side: PlayerSide, id: u32, sku: &str) -> EntityId {
    let card = EntityId(id);
    game.card_scanned(side, card, &CardSku::new(sku)).unwrap();
    game.tick(3.0);
    card
}

// =============================================================================
// Turn Structure
// =============================================================================

#[test]
fn test_turn_start_refills_and_fires_rules() {
    let mut game = new_match();

    let fired = game.start_turn(PlayerSide::Player, 2).unwrap();

    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].rule, "stoke");
    assert_eq!(game.ledger(PlayerSide::Player).energy(), 2);
    assert_eq!(game.ledger(PlayerSide::Player).mana(ManaColor::Crimson), 2);

    let events = game.drain_events();
    let names: Vec<_> = events.iter().map(MatchEvent::name).collect();
    assert_eq!(
        names,
        vec!["arena_selected", "energy_changed", "mana_changed", "turn_started", "arena_effect_triggered"]
    );
}

#[test]
fn test_opposed_hero_gets_reduced_mana() {
    let mut game = new_match();

    game.start_turn(PlayerSide::Opponent, 1).unwrap();

    assert_eq!(game.ledger(PlayerSide::Opponent).mana(ManaColor::Crimson), 1);
}

#[test]
fn test_end_turn_discards_pending_cards() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Player, 1).unwrap();
    game.card_scanned(PlayerSide::Player, EntityId(1), &CardSku::new("CRE_010"))
        .unwrap();
    game.drain_events();

    let discarded = game.end_turn().unwrap();

    assert_eq!(discarded, vec![EntityId(1)]);
    assert!(game.card(EntityId(1)).is_none());
    assert_eq!(game.active_side(), None);
    assert_eq!(
        game.drain_events(),
        vec![
            MatchEvent::CardDiscarded {
                card: EntityId(1),
                reason: DiscardReason::TurnEnded,
            },
            MatchEvent::TurnEnded {
                side: PlayerSide::Player,
                turn_number: 1,
                reason: TurnEndReason::Ended,
            },
        ]
    );
}

#[test]
fn test_turn_timer_expiry_ends_turn() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Player, 1).unwrap();
    game.card_scanned(PlayerSide::Player, EntityId(1), &CardSku::new("CRE_010"))
        .unwrap();

    let tick = game.tick(60.0);

    assert!(tick.turn_expired);
    assert_eq!(tick.force_discarded, vec![EntityId(1)]);
    assert_eq!(game.active_side(), None);
    assert!(game.drain_events().contains(&MatchEvent::TurnEnded {
        side: PlayerSide::Player,
        turn_number: 1,
        reason: TurnEndReason::TimerExpired,
    }));

    game.start_turn(PlayerSide::Opponent, 2).unwrap();
    assert_eq!(game.active_side(), Some(PlayerSide::Opponent));
}

#[test]
fn test_card_decision_timeout_loses_card() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Player, 1).unwrap();
    game.card_scanned(PlayerSide::Player, EntityId(1), &CardSku::new("CRE_010"))
        .unwrap();

    let tick = game.tick(10.0);

    assert_eq!(tick.card_expired.as_slice(), &[EntityId(1)]);
    assert_eq!(
        game.card_play_requested(PlayerSide::Player, EntityId(1)),
        Err(RulesError::CardNotPending { card: EntityId(1) })
    );
}

// =============================================================================
// Playing Cards
// =============================================================================

#[test]
fn test_unaffordable_play_keeps_card_pending() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Player, 1).unwrap();
    let bolt = scan(&mut game, PlayerSide::Player, 1, "SPL_021");
    game.drain_events();

    let err = game.card_play_requested(PlayerSide::Player, bolt);

    assert!(matches!(err, Err(RulesError::InsufficientResource { ref missing }) if missing.len() == 1));
    assert!(game.timers().cards().is_pending(bolt));
    assert_eq!(game.ledger(PlayerSide::Player).energy(), 1);
    assert_eq!(game.drain_events().iter().filter(|e| e.name() == "resource_insufficient").count(), 1);
}

#[test]
fn test_play_for_inactive_side_rejected() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Player, 1).unwrap();

    assert_eq!(
        game.card_scanned(PlayerSide::Opponent, EntityId(4), &CardSku::new("CRE_010")),
        Err(RulesError::NotActivePlayer { side: PlayerSide::Opponent })
    );
}

#[test]
fn test_hero_once_per_game_across_turns() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Player, 3).unwrap();
    let hero = scan(&mut game, PlayerSide::Player, 1, "HERO_001");
    assert_eq!(
        game.card_play_requested(PlayerSide::Player, hero),
        Ok(Zone::battlefield(PlayerSide::Player))
    );
    game.creature_died(hero).unwrap();
    game.end_turn().unwrap();

    game.start_turn(PlayerSide::Player, 5).unwrap();
    let again = scan(&mut game, PlayerSide::Player, 2, "HERO_001");
    let err = game.card_play_requested(PlayerSide::Player, again);

    assert_eq!(
        err,
        Err(RulesError::DuplicatePlay(DuplicatePlay::OncePerGame {
            sku: CardSku::new("HERO_001"),
            played_on_turn: 3,
        }))
    );
}

// =============================================================================
// Abilities, Combos and Objectives
// =============================================================================

#[test]
fn test_inferno_combo_through_match() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Player, 4).unwrap();
    let hero = scan(&mut game, PlayerSide::Player, 1, "HERO_001");
    game.card_play_requested(PlayerSide::Player, hero).unwrap();
    let hound = scan(&mut game, PlayerSide::Player, 2, "CRE_010");
    game.card_play_requested(PlayerSide::Player, hound).unwrap();

    let fire = game
        .ability_resolved(PlayerSide::Player, &AbilityResolution::new(hero, AbilityKind::FireDamage, 3))
        .unwrap();
    game.tick(5.0);
    game.ability_resolved(PlayerSide::Player, &AbilityResolution::new(hero, AbilityKind::Burn, 1))
        .unwrap();
    game.tick(5.0);
    let area = game
        .ability_resolved(PlayerSide::Player, &AbilityResolution::new(hound, AbilityKind::AreaDamage, 2))
        .unwrap();

    // Fire matches the arena color (+1) and the crimson hero (+2).
    assert_eq!(fire.magnitude, 6);
    assert!(fire.combos.is_empty());
    assert_eq!(area.combos.len(), 1);
    assert_eq!(area.combos[0].bonus_effects, vec![Effect::damage(5, arena_ccg::DamageType::Fire)]);

    // Burn adds 4 more, which already passes the damage target of 8.
    let scorch = game.arena().objective("scorch").unwrap();
    assert_eq!(scorch.completed_by, Some(PlayerSide::Player));
}

#[test]
fn test_healing_bonus_can_reduce() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Opponent, 2).unwrap();
    let mend = scan(&mut game, PlayerSide::Opponent, 7, "SPL_020");
    game.card_play_requested(PlayerSide::Opponent, mend).unwrap();

    let healed = game
        .ability_resolved(PlayerSide::Opponent, &AbilityResolution::new(mend, AbilityKind::Heal, 3))
        .unwrap();

    assert_eq!(healed.magnitude, 2);
}

#[test]
fn test_creature_death_fires_rules_and_objective() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Player, 1).unwrap();
    let hound = scan(&mut game, PlayerSide::Player, 1, "CRE_010");
    game.card_play_requested(PlayerSide::Player, hound).unwrap();

    let fired = game.creature_died(hound).unwrap();

    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].rule, "ember_rain");
    assert_eq!(fired[0].side, PlayerSide::Player);
    assert_eq!(
        game.arena().objective("hunter").unwrap().completed_by,
        Some(PlayerSide::Opponent)
    );
    assert_eq!(game.zones().zone_of(hound), Some(Zone::graveyard(PlayerSide::Player)));
    assert_eq!(
        game.creature_died(hound),
        Err(RulesError::InvalidZoneTransition { card: hound })
    );
}

#[test]
fn test_exile_frees_legendary_name() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Player, 4).unwrap();
    let hero = scan(&mut game, PlayerSide::Player, 1, "HERO_001");
    game.card_play_requested(PlayerSide::Player, hero).unwrap();
    assert!(!game.uniqueness().can_play_legendary("Ignis", PlayerSide::Player));

    let from = game.exile_card(hero).unwrap();

    assert_eq!(from, Zone::battlefield(PlayerSide::Player));
    assert_eq!(game.zones().zone_of(hero), Some(Zone::exile(PlayerSide::Player)));
    assert!(game.uniqueness().can_play_legendary("Ignis", PlayerSide::Player));
    assert_eq!(game.arena().objective("hunter").unwrap().progress[PlayerSide::Opponent], 0);
}

// =============================================================================
// Inputs and Snapshots
// =============================================================================

#[test]
fn test_queued_inputs_apply_in_order() {
    let mut game = new_match();
    let inputs = vec![
        MatchInput::StartTurn {
            side: PlayerSide::Player,
            turn_number: 1,
        },
        MatchInput::CardScanned {
            side: PlayerSide::Player,
            card: EntityId(1),
            sku: CardSku::new("CRE_010"),
        },
        MatchInput::Tick { dt: 3.5 },
        MatchInput::PlayCard {
            side: PlayerSide::Player,
            card: EntityId(1),
        },
        MatchInput::SacrificeCard {
            card: EntityId(1),
            beneficiary: Some(PlayerSide::Player),
        },
        MatchInput::EndTurn,
    ];

    for input in inputs {
        game.apply(input).unwrap();
    }

    assert_eq!(game.zones().zone_of(EntityId(1)), Some(Zone::graveyard(PlayerSide::Player)));
    assert!(game.drain_events().iter().any(|e| matches!(
        e,
        MatchEvent::SacrificePerformed { effects, .. } if effects == &vec![Effect::gain_mana(ManaColor::Crimson, 1)]
    )));
}

#[test]
fn test_sacrifice_from_pool_through_inputs() {
    let mut game = new_match();
    let hound = EntityId(4);
    let inputs = vec![
        MatchInput::StartTurn {
            side: PlayerSide::Player,
            turn_number: 1,
        },
        MatchInput::CardScanned {
            side: PlayerSide::Player,
            card: hound,
            sku: CardSku::new("CRE_010"),
        },
        MatchInput::Tick { dt: 3.0 },
        MatchInput::PlayCard {
            side: PlayerSide::Player,
            card: hound,
        },
        MatchInput::OfferToSacrificePool { card: hound },
    ];
    for input in inputs {
        game.apply(input).unwrap();
    }
    assert_eq!(game.zones().zone_of(hound), Some(Zone::sacrifice_pool(PlayerSide::Player)));
    game.drain_events();

    let owner = game.sacrifice_card(hound, Some(PlayerSide::Opponent)).unwrap();

    assert_eq!(owner, PlayerSide::Player);
    assert_eq!(game.zones().zone_of(hound), Some(Zone::graveyard(PlayerSide::Player)));
    assert!(game.drain_events().contains(&MatchEvent::SacrificePerformed {
        card: hound,
        owner: PlayerSide::Player,
        beneficiary: Some(PlayerSide::Opponent),
        effects: vec![Effect::gain_mana(ManaColor::Crimson, 1)],
    }));
}

#[test]
fn test_pending_card_cannot_resolve_abilities() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Player, 1).unwrap();
    let hound = EntityId(9);
    game.card_scanned(PlayerSide::Player, hound, &CardSku::new("CRE_010"))
        .unwrap();

    let err = game.ability_resolved(
        PlayerSide::Opponent,
        &AbilityResolution::new(hound, AbilityKind::FireDamage, 30),
    );

    assert_eq!(err, Err(RulesError::InvalidZoneTransition { card: hound }));
    assert_eq!(game.arena().objective("scorch").unwrap().progress[PlayerSide::Opponent], 0);
    assert_eq!(game.zones().zone_of(hound), None);
}

#[test]
fn test_inputs_load_from_json() {
    let input: MatchInput =
        serde_json::from_str(r#"{ "input": "play_card", "side": "player", "card": 3 }"#).unwrap();

    assert_eq!(
        input,
        MatchInput::PlayCard {
            side: PlayerSide::Player,
            card: EntityId(3),
        }
    );
}

#[test]
fn test_snapshot_roundtrips_mid_turn() {
    let mut game = new_match();
    game.start_turn(PlayerSide::Player, 4).unwrap();
    let hero = scan(&mut game, PlayerSide::Player, 1, "HERO_001");
    game.card_play_requested(PlayerSide::Player, hero).unwrap();
    game.ability_resolved(PlayerSide::Player, &AbilityResolution::new(hero, AbilityKind::Burn, 1))
        .unwrap();
    game.card_scanned(PlayerSide::Player, EntityId(2), &CardSku::new("CRE_010"))
        .unwrap();

    let snapshot = game.snapshot();
    let restored = MatchSnapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();

    assert_eq!(restored, snapshot);
    assert_eq!(restored.active_side, Some(PlayerSide::Player));
    assert_eq!(restored.combos.len(), 1);
    assert_eq!(restored.cards.len(), 2);
    assert_eq!(restored.uniqueness.played_on(&CardSku::new("HERO_001")), Some(4));
}
