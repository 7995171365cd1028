//! End-to-end scenarios driven through the public `Game` API

use spike_dodge::consts::{INJURED_COOL_DOWN_TICKS, MAX_HEALTH, SIM_DT};
use spike_dodge::sim::{
    Character, Damageable, EnemyKind, Game, GameEvent, Key, KeyState, StatePatch,
};
use spike_dodge::preferences::{KeyValueStorage, MemoryStorage};
use spike_dodge::{GameConfig, Preferences, Viewport};

/// A run with an empty wave table: only scripted enemies appear
fn scripted_game() -> Game {
    let config = GameConfig {
        waves: Vec::new(),
        ..GameConfig::with_seed(7)
    };
    Game::new(config, Character::MaskDude)
}

fn idle_ticks(game: &mut Game, ticks: u32) {
    let idle = KeyState::new();
    for _ in 0..ticks {
        game.tick(&idle, SIM_DT);
    }
}

/// Drop a saw so that after one tick of falling it overlaps the player
fn drop_saw_on_player(game: &mut Game) {
    let hb = game.player().hit_box();
    game.spawn_enemy(EnemyKind::Saw, hb.x - 6.0, hb.y - 40.0);
}

#[test]
fn test_injury_window_scenario() {
    let mut game = scripted_game();

    drop_saw_on_player(&mut game);
    idle_ticks(&mut game, 1);
    assert_eq!(game.state().health, 75);
    assert!(game.player().is_injured());

    // Second enemy overlapping during the window: no damage
    drop_saw_on_player(&mut game);
    idle_ticks(&mut game, 1);
    assert_eq!(game.state().health, 75);

    // Let the window run out and the saws fall off screen
    idle_ticks(&mut game, INJURED_COOL_DOWN_TICKS);
    assert!(!game.player().is_injured());
    assert!(game.enemies().is_empty());

    drop_saw_on_player(&mut game);
    idle_ticks(&mut game, 1);
    assert_eq!(game.state().health, 50);
}

#[test]
fn test_simultaneous_overlaps_hit_once() {
    let mut game = scripted_game();
    let hb = game.player().hit_box();
    game.spawn_enemy(EnemyKind::Saw, hb.x - 6.0, hb.y - 40.0);
    game.spawn_enemy(EnemyKind::RockHead, hb.x - 10.0, hb.y - 20.0);

    idle_ticks(&mut game, 1);
    assert_eq!(game.state().health, MAX_HEALTH - EnemyKind::Saw.damage());

    let events = game.drain_events();
    let hits = events
        .iter()
        .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
        .count();
    assert_eq!(hits, 1);
    assert!(events.iter().any(|e| matches!(e, GameEvent::Shake { .. })));
}

#[test]
fn test_lethal_hit_clamps_to_zero() {
    let mut game = scripted_game();
    game.store().set_state(StatePatch::health(20));

    drop_saw_on_player(&mut game);
    idle_ticks(&mut game, 1);

    let state = game.state();
    assert_eq!(state.health, 0);
    assert!(state.is_game_over);
    assert!(game.player().is_dead());
    assert!(
        game.drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    );
}

#[test]
fn test_off_screen_enemy_removed_next_tick() {
    let mut game = scripted_game();
    let height = game.config().viewport.height;
    let id = game.spawn_enemy(EnemyKind::RockHead, 10.0, height - 1.0);

    idle_ticks(&mut game, 1);
    assert!(game.enemies().iter().all(|e| e.id != id));
    assert!(
        game.drain_events()
            .contains(&GameEvent::EnemyDespawned { id })
    );
}

#[test]
fn test_restart_resets_run() {
    let mut game = Game::new(GameConfig::with_seed(3), Character::NinjaFrog);
    idle_ticks(&mut game, 60 * 20);
    assert!(game.state().time > 0 || game.state().is_game_over);

    game.restart();
    let state = game.state();
    assert_eq!(state.health, MAX_HEALTH);
    assert_eq!(state.time, 0);
    assert_eq!(state.difficulty, 1);
    assert!(!state.is_game_over);
    assert_eq!(state.character, Character::NinjaFrog);
    assert!(game.enemies().is_empty());
    assert!(
        game.spawner()
            .waves()
            .iter()
            .all(|w| w.cool_down_time == 0)
    );
}

#[test]
fn test_holding_left_pins_to_edge() {
    let mut game = scripted_game();
    let left = KeyState::with(&[Key::Left]);
    for _ in 0..300 {
        game.tick(&left, SIM_DT);
    }
    assert_eq!(game.player().hit_box().x, 0.0);
    assert_eq!(game.player().velocity().x, 0.0);
}

#[test]
fn test_held_dash_triggers_once() {
    let mut game = scripted_game();
    let dash = KeyState::with(&[Key::Dash]);
    let mut starts = 0;
    let mut was_dashing = false;
    for _ in 0..120 {
        game.tick(&dash, SIM_DT);
        let dashing = game.player().is_dashing();
        if dashing && !was_dashing {
            starts += 1;
        }
        was_dashing = dashing;
    }
    assert_eq!(starts, 1);
}

#[test]
fn test_subscribers_see_every_transition() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut game = scripted_game();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let id = game.store().subscribe(move |next, prev| {
        log.borrow_mut().push((prev.time, next.time));
    });

    idle_ticks(&mut game, 60 * 3);
    assert_eq!(*seen.borrow(), vec![(0, 1), (1, 2), (2, 3)]);

    assert!(game.store().unsubscribe(id));
    idle_ticks(&mut game, 60);
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn test_custom_viewport_spawns_inside() {
    let config = GameConfig {
        viewport: Viewport::new(200.0, 300.0),
        ..GameConfig::with_seed(11)
    };
    let mut game = Game::new(config, Character::MaskDude);
    // Enough for every wave in the default table to fire at least once
    let idle = KeyState::new();
    for _ in 0..60 * 20 {
        game.tick(&idle, SIM_DT);
        for enemy in game.enemies() {
            assert!((0.0..=200.0).contains(&enemy.pos.x));
        }
    }
}

#[test]
fn test_character_selection_is_stored_and_persisted() {
    let mut storage = MemoryStorage::default();
    let mut prefs = Preferences::load(&storage);
    let mut game = Game::new(GameConfig::with_seed(5), prefs.character());
    assert!(game.open_character_select());

    let idle = KeyState::new();
    game.tick(&KeyState::with(&[Key::Right]), SIM_DT);
    game.tick(&idle, SIM_DT);
    game.tick(&KeyState::with(&[Key::Enter]), SIM_DT);

    for event in game.drain_events() {
        if let GameEvent::CharacterSelected { character } = event {
            prefs.confirm(character, &mut storage);
        }
    }

    assert_eq!(game.state().character, Character::NinjaFrog);
    assert_eq!(
        storage.get_item("selectedCharacter").unwrap().as_deref(),
        Some("1")
    );
    assert_eq!(Preferences::load(&storage).character(), Character::NinjaFrog);

    // The choice survives a restart
    game.restart();
    assert_eq!(game.state().character, Character::NinjaFrog);
}
