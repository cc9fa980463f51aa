//! Zone registry and uniqueness guard tests.

use arena_ccg::core::{CardSku, DuplicatePlay, EntityId, PlayerSide, RulesError};
use arena_ccg::effects::Effect;
use arena_ccg::events::{EventLog, MatchEvent};
use arena_ccg::uniqueness::UniquenessGuard;
use arena_ccg::zones::{Zone, ZoneKind, ZoneRegistry};

// =============================================================================
// Zone Movement
// =============================================================================

#[test]
fn test_card_lives_in_one_zone() {
    let mut events = EventLog::new();
    let mut zones = ZoneRegistry::new();
    let card = EntityId(1);

    zones.place(card, Zone::battlefield(PlayerSide::Player), &mut events);
    zones.move_card(card, Zone::exile(PlayerSide::Player), &mut events).unwrap();
    zones.move_card(card, Zone::graveyard(PlayerSide::Opponent), &mut events).unwrap();

    assert_eq!(zones.memberships(card), 1);
    assert_eq!(zones.zone_of(card), Some(Zone::graveyard(PlayerSide::Opponent)));
    for kind in ZoneKind::ALL {
        for side in PlayerSide::ALL {
            let zone = Zone::new(kind, side);
            let expected = usize::from(zone == Zone::graveyard(PlayerSide::Opponent));
            assert_eq!(zones.count(zone), expected, "{zone}");
        }
    }
}

#[test]
fn test_untracked_move_rejected() {
    let mut events = EventLog::new();
    let mut zones = ZoneRegistry::new();

    let err = zones.move_card(EntityId(5), Zone::graveyard(PlayerSide::Player), &mut events);

    assert_eq!(err, Err(RulesError::InvalidZoneTransition { card: EntityId(5) }));
    assert!(events.is_empty());
    assert!(!zones.contains(EntityId(5)));
}

#[test]
fn test_graveyard_and_exile_announced() {
    let mut events = EventLog::new();
    let mut zones = ZoneRegistry::new();
    zones.place(EntityId(1), Zone::battlefield(PlayerSide::Opponent), &mut events);
    zones.place(EntityId(2), Zone::battlefield(PlayerSide::Opponent), &mut events);

    zones.send_to_graveyard(EntityId(1), &mut events).unwrap();
    zones.exile(EntityId(2), &mut events).unwrap();

    assert_eq!(
        events.drain(),
        vec![
            MatchEvent::CardSentToGraveyard {
                card: EntityId(1),
                side: PlayerSide::Opponent,
            },
            MatchEvent::CardExiled {
                card: EntityId(2),
                side: PlayerSide::Opponent,
            },
        ]
    );
}

#[test]
fn test_sacrifice_from_pool_relays_effects() {
    let mut events = EventLog::new();
    let mut zones = ZoneRegistry::new();
    let card = EntityId(3);
    zones.place(card, Zone::sacrifice_pool(PlayerSide::Player), &mut events);
    events.drain();

    let owner = zones
        .sacrifice(card, Some(PlayerSide::Player), vec![Effect::heal(4)], &mut events)
        .unwrap();

    assert_eq!(owner, PlayerSide::Player);
    assert_eq!(zones.zone_of(card), Some(Zone::graveyard(PlayerSide::Player)));
    let emitted = events.drain();
    assert_eq!(emitted.len(), 2);
    assert_eq!(emitted[0].name(), "card_sent_to_graveyard");
    assert_eq!(
        emitted[1],
        MatchEvent::SacrificePerformed {
            card,
            owner: PlayerSide::Player,
            beneficiary: Some(PlayerSide::Player),
            effects: vec![Effect::heal(4)],
        }
    );
}

#[test]
fn test_sacrifice_from_graveyard_rejected() {
    let mut events = EventLog::new();
    let mut zones = ZoneRegistry::new();
    let card = EntityId(4);
    zones.place(card, Zone::graveyard(PlayerSide::Player), &mut events);

    let err = zones.sacrifice(card, None, Vec::new(), &mut events);

    assert_eq!(err, Err(RulesError::InvalidZoneTransition { card }));
    assert_eq!(zones.zone_of(card), Some(Zone::graveyard(PlayerSide::Player)));
}

// =============================================================================
// Uniqueness
// =============================================================================

#[test]
fn test_once_per_game_recorded() {
    let mut guard = UniquenessGuard::new();
    let hero = CardSku::new("HERO_001");

    guard.mark_played(&hero, 3);

    assert!(!guard.can_play_once_per_game(&hero));
    assert_eq!(guard.played_on(&hero), Some(3));
    assert!(guard.can_play_once_per_game(&CardSku::new("HERO_002")));
}

#[test]
fn test_legendary_rule_is_per_side() {
    let mut events = EventLog::new();
    let mut guard = UniquenessGuard::new();

    assert!(guard.add_legendary("Ignis", PlayerSide::Player, &mut events));
    assert!(guard.can_play_legendary("Ignis", PlayerSide::Opponent));
    assert!(!guard.can_play_legendary("Ignis", PlayerSide::Player));

    assert!(!guard.add_legendary("Ignis", PlayerSide::Player, &mut events));
    assert_eq!(events.count("legendary_rule_triggered"), 1);

    assert!(guard.remove_legendary("Ignis", PlayerSide::Player));
    assert!(guard.can_play_legendary("Ignis", PlayerSide::Player));
}

#[test]
fn test_check_reports_first_violation() {
    let mut events = EventLog::new();
    let mut guard = UniquenessGuard::new();
    let sku = CardSku::new("HERO_001");
    guard.mark_played(&sku, 2);
    guard.add_legendary("Ignis", PlayerSide::Player, &mut events);

    let err = guard.check(&sku, true, Some("Ignis"), PlayerSide::Player);

    assert_eq!(
        err,
        Err(RulesError::DuplicatePlay(DuplicatePlay::OncePerGame {
            sku,
            played_on_turn: 2,
        }))
    );
    assert!(guard.check(&CardSku::new("OTHER"), false, Some("Ignis"), PlayerSide::Opponent).is_ok());
}
