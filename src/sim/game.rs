//! Per-frame game loop
//!
//! `Game` owns every simulation component plus the state store and advances
//! them in a fixed order each tick:
//! 1. menu/command keys (pause, resume, restart)
//! 2. player movement
//! 3. enemy movement and off-screen cleanup
//! 4. elapsed-time clock, difficulty and wave spawning
//! 5. collisions
//!
//! While paused nothing past step 1 runs and the clock does not advance.
//! The character selection screen, when open, takes the whole tick.

use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{Damageable, resolve_collisions};
use super::effects::GameEvent;
use super::enemy::{Enemy, EnemyId, EnemyKind};
use super::input::{InputSource, Key, KeyEdges};
use super::menu::{CharacterSelect, MenuAction, PauseMenu};
use super::player::Player;
use super::spawn::SpawnScheduler;
use super::state::{Character, GameState, StatePatch};
use super::store::{Snapshot, StateStore};
use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, TARGET_FPS};

const MICROS_PER_SEC: u64 = 1_000_000;

/// One run of the game
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    store: Rc<StateStore>,
    player: Player,
    spawner: SpawnScheduler,
    rng: Pcg32,
    /// Running time in microseconds (integer so whole seconds land on exact ticks)
    elapsed_micros: u64,
    keys: KeyEdges,
    pause_menu: PauseMenu,
    character_select: Option<CharacterSelect>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig, character: Character) -> Self {
        let store = Rc::new(StateStore::new(GameState::initial(character)));
        let player = Player::new(config.viewport);
        let spawner = SpawnScheduler::new(config.waves.clone(), config.enemy_spawn_y);
        let rng = Pcg32::seed_from_u64(config.seed);

        log::info!(
            "Run started: seed={}, {}x{}, {} waves, character={:?}",
            config.seed,
            config.viewport.width,
            config.viewport.height,
            config.waves.len(),
            character
        );

        Self {
            config,
            store,
            player,
            spawner,
            rng,
            elapsed_micros: 0,
            keys: KeyEdges::default(),
            pause_menu: PauseMenu::default(),
            character_select: None,
            events: Vec::new(),
        }
    }

    /// Shared store; subscribe here to observe state transitions
    pub fn store(&self) -> &Rc<StateStore> {
        &self.store
    }

    pub fn state(&self) -> Snapshot {
        self.store.state()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.spawner.enemies()
    }

    pub fn spawner(&self) -> &SpawnScheduler {
        &self.spawner
    }

    pub fn pause_menu(&self) -> &PauseMenu {
        &self.pause_menu
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Place an enemy directly (scripted encounters)
    pub fn spawn_enemy(&mut self, kind: EnemyKind, x: f32, y: f32) -> EnemyId {
        let id = self.spawner.push_enemy(kind, x, y);
        self.events.push(GameEvent::EnemySpawned { id, kind, x, y });
        id
    }

    /// Change the cosmetic character (before a run)
    pub fn select_character(&mut self, character: Character) {
        self.store.set_state(StatePatch::character(character));
    }

    /// Open the character selection screen
    ///
    /// Only possible before the run starts; returns whether it opened.
    pub fn open_character_select(&mut self) -> bool {
        let state = self.store.state();
        if self.elapsed_micros > 0 || !state.is_running() {
            return false;
        }
        self.character_select = Some(CharacterSelect::new(state.character));
        true
    }

    /// The selection screen, while it is open
    pub fn character_select(&self) -> Option<&CharacterSelect> {
        self.character_select.as_ref()
    }

    /// Advance the simulation by one frame of `dt` seconds
    ///
    /// `dt` is clamped to `0..=MAX_FRAME_DT`; NaN and infinities count as 0.
    pub fn tick(&mut self, input: &impl InputSource, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            log::warn!("Ignoring non-finite frame time {}", dt);
            0.0
        };

        self.keys.update(input);

        if let Some(select) = self.character_select.as_mut() {
            if let Some(character) = select.handle_input(&self.keys) {
                self.character_select = None;
                self.select_character(character);
                self.events.push(GameEvent::CharacterSelected { character });
                log::info!("Character selected: {}", character.as_str());
            }
            return;
        }

        self.handle_commands();

        let state = self.store.state();
        if state.is_paused {
            return;
        }

        let frame_delta = dt * TARGET_FPS;

        self.player.update(input, &state, frame_delta);

        for enemy in self.spawner.update(frame_delta, self.config.viewport.height) {
            self.events.push(GameEvent::EnemyDespawned { id: enemy.id });
        }

        if !state.is_game_over {
            self.advance_clock(dt);
        }

        if !self.player.is_dead() {
            let outcome = resolve_collisions(&mut self.player, self.spawner.enemies(), &self.store);
            if let Some(enemy) = outcome.hit {
                self.events.push(GameEvent::PlayerHit {
                    enemy,
                    damage: outcome.damage,
                    health: outcome.health,
                });
            }
            if let Some((strength, duration_ticks)) = outcome.shake {
                self.events.push(GameEvent::Shake {
                    strength,
                    duration_ticks,
                });
            }
            if outcome.killed {
                self.on_game_over();
            }
        }
    }

    /// Escape toggles pause, the pause menu handles Up/Down/Enter, and Enter
    /// restarts after game over
    fn handle_commands(&mut self) {
        let state = self.store.state();

        if state.is_game_over {
            if self.keys.just_pressed(Key::Enter) {
                self.restart();
            }
            return;
        }

        if self.keys.just_pressed(Key::Escape) {
            self.request_pause(!state.is_paused);
            return;
        }

        if state.is_paused {
            match self.pause_menu.handle_input(&self.keys) {
                Some(MenuAction::Resume) => self.request_pause(false),
                Some(MenuAction::Restart) => {
                    self.request_pause(false);
                    self.kill_player();
                    self.restart();
                }
                None => {}
            }
        }
    }

    /// Accumulate running time and publish whole-second changes
    fn advance_clock(&mut self, dt: f32) {
        let dt_micros = (f64::from(dt) * MICROS_PER_SEC as f64).round() as u64;
        self.elapsed_micros = self.elapsed_micros.saturating_add(dt_micros);

        let state = self.store.state();
        let time = u32::try_from(self.elapsed_micros / MICROS_PER_SEC).unwrap_or(u32::MAX);
        if time == state.time {
            return;
        }

        let difficulty = self.config.difficulty_at(time).max(state.difficulty);
        let mut patch = StatePatch {
            time: Some(time),
            ..Default::default()
        };
        if difficulty > state.difficulty {
            log::info!("Difficulty {} at {}s", difficulty, time);
            patch.difficulty = Some(difficulty);
        }
        self.store.set_state(patch);
        self.spawner.set_difficulty(self.store.state().difficulty);

        // One wave step per elapsed second, even if a long frame skipped some
        for _ in state.time..time {
            for id in self.spawner.on_tick(&mut self.rng, self.config.viewport.width) {
                if let Some(enemy) = self.spawner.enemies().iter().find(|e| e.id == id) {
                    self.events.push(GameEvent::EnemySpawned {
                        id,
                        kind: enemy.kind,
                        x: enemy.pos.x,
                        y: enemy.pos.y,
                    });
                }
            }
        }
    }

    fn on_game_over(&mut self) {
        let time = self.store.state().time;
        log::info!("Game over after {}s", time);
        self.events.push(GameEvent::GameOver { time });
    }

    /// Reset the run: full health, clock at zero, no enemies, fresh player
    pub fn restart(&mut self) {
        for enemy in self.spawner.enemies() {
            self.events.push(GameEvent::EnemyDespawned { id: enemy.id });
        }
        self.spawner.restart();
        self.player = Player::new(self.config.viewport);
        self.elapsed_micros = 0;
        self.pause_menu.reset();
        self.store.set_state(StatePatch::restart());
        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted");
    }

    /// End the run immediately
    pub fn kill_player(&mut self) {
        if self.player.is_dead() {
            return;
        }
        self.player.kill(&self.store);
        self.on_game_over();
    }

    /// Pause or resume; ignored once the run is over
    pub fn request_pause(&mut self, paused: bool) {
        let state = self.store.state();
        if state.is_game_over || state.is_paused == paused {
            return;
        }
        if paused {
            self.pause_menu.reset();
        }
        self.store.set_state(StatePatch::paused(paused));
        self.events.push(if paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        });
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::input::KeyState;

    fn game() -> Game {
        Game::new(GameConfig::with_seed(12345), Character::MaskDude)
    }

    fn run(game: &mut Game, ticks: u32) {
        let idle = KeyState::new();
        for _ in 0..ticks {
            game.tick(&idle, SIM_DT);
        }
    }

    #[test]
    fn test_clock_counts_whole_seconds() {
        let mut game = game();
        run(&mut game, 59);
        assert_eq!(game.state().time, 0);
        run(&mut game, 1);
        assert_eq!(game.state().time, 1);
        run(&mut game, 180);
        assert_eq!(game.state().time, 4);
    }

    #[test]
    fn test_first_wave_at_four_seconds() {
        let mut game = game();
        run(&mut game, 239);
        assert!(game.enemies().is_empty());
        run(&mut game, 1);
        assert_eq!(game.enemies().len(), 3);
        let spawned = game
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
            .count();
        assert_eq!(spawned, 3);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut game = game();
        run(&mut game, 30);
        let id = game.spawn_enemy(EnemyKind::Saw, 10.0, 0.0);
        game.request_pause(true);
        assert!(game.state().is_paused);

        run(&mut game, 600);
        assert_eq!(game.state().time, 0);
        let enemy = game.enemies().iter().find(|e| e.id == id).unwrap();
        assert_eq!(enemy.pos.y, 0.0);

        game.request_pause(false);
        run(&mut game, 30);
        assert_eq!(game.state().time, 1);
    }

    #[test]
    fn test_escape_toggles_pause() {
        let mut game = game();
        let esc = KeyState::with(&[Key::Escape]);
        let idle = KeyState::new();

        game.tick(&esc, SIM_DT);
        assert!(game.state().is_paused);
        // still held: no toggle
        game.tick(&esc, SIM_DT);
        assert!(game.state().is_paused);
        game.tick(&idle, SIM_DT);
        game.tick(&esc, SIM_DT);
        assert!(!game.state().is_paused);
    }

    #[test]
    fn test_pause_menu_restart() {
        let mut game = game();
        run(&mut game, 300);
        assert!(!game.enemies().is_empty());

        let idle = KeyState::new();
        game.tick(&KeyState::with(&[Key::Escape]), SIM_DT);
        game.tick(&idle, SIM_DT);
        game.tick(&KeyState::with(&[Key::Down]), SIM_DT);
        game.tick(&idle, SIM_DT);
        game.tick(&KeyState::with(&[Key::Enter]), SIM_DT);

        let state = game.state();
        assert!(!state.is_paused);
        assert!(!state.is_game_over);
        assert_eq!(state.time, 0);
        assert!(game.enemies().is_empty());
        assert!(game.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_enter_restarts_after_game_over() {
        let mut game = game();
        game.kill_player();
        assert!(game.state().is_game_over);

        // pausing is ignored once the run is over
        game.request_pause(true);
        assert!(!game.state().is_paused);

        game.tick(&KeyState::with(&[Key::Enter]), SIM_DT);
        assert!(!game.state().is_game_over);
        assert!(!game.player().is_dead());
    }

    #[test]
    fn test_game_over_stops_clock() {
        let mut game = game();
        run(&mut game, 120);
        game.kill_player();
        run(&mut game, 300);
        assert_eq!(game.state().time, 2);
    }

    #[test]
    fn test_difficulty_rises_with_time() {
        // No waves, so nothing can end the run early
        let config = GameConfig {
            waves: Vec::new(),
            ..GameConfig::default()
        };
        let mut game = Game::new(config, Character::MaskDude);
        run(&mut game, 60 * 31);
        assert_eq!(game.state().difficulty, 3);
        assert_eq!(game.spawner().difficulty(), 3);
    }

    #[test]
    fn test_select_character() {
        let mut game = game();
        game.select_character(Character::PinkMan);
        assert_eq!(game.state().character, Character::PinkMan);
    }

    #[test]
    fn test_character_select_screen_confirms_into_store() {
        let mut game = game();
        assert!(game.open_character_select());

        let idle = KeyState::new();
        game.tick(&KeyState::with(&[Key::Right]), SIM_DT);
        game.tick(&idle, SIM_DT);
        assert_eq!(
            game.character_select().map(|s| s.selected()),
            Some(Character::NinjaFrog)
        );
        // Enter goes to the selection screen, not the run's commands
        game.tick(&KeyState::with(&[Key::Enter]), SIM_DT);

        assert!(game.character_select().is_none());
        assert_eq!(game.state().character, Character::NinjaFrog);
        assert_eq!(game.state().time, 0);
        assert_eq!(game.elapsed_micros, 0);
        assert!(game.drain_events().contains(&GameEvent::CharacterSelected {
            character: Character::NinjaFrog
        }));
    }

    #[test]
    fn test_character_select_only_before_run() {
        let mut game = game();
        run(&mut game, 1);
        assert!(!game.open_character_select());
        assert!(game.character_select().is_none());
    }

    #[test]
    fn test_bad_frame_times_are_bounded() {
        let config = GameConfig {
            waves: Vec::new(),
            ..GameConfig::with_seed(1)
        };
        let mut game = Game::new(config, Character::MaskDude);
        let right = KeyState::with(&[Key::Right]);

        game.tick(&right, SIM_DT);
        for dt in [f32::INFINITY, f32::NAN, f32::NEG_INFINITY, -1.0] {
            game.tick(&right, dt);
        }
        assert!(game.player().position().x.is_finite());
        assert_eq!(game.elapsed_micros, 16_667);

        // A suspended tab resumes with a huge dt: one capped step, not an hour
        game.tick(&right, 3600.0);
        assert_eq!(game.state().time, 0);
        assert!(game.elapsed_micros <= 16_667 + 66_667);
        run(&mut game, 60);
        assert!(game.player().position().x.is_finite());
        assert_eq!(game.state().time, 1);
    }

    #[test]
    fn test_long_frame_does_not_flood_enemies() {
        let mut game = game();
        run(&mut game, 1);
        game.tick(&KeyState::new(), 3600.0);
        assert!(game.enemies().is_empty());
    }
}
