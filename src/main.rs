//! Spike Dodge headless runner
//!
//! Runs the simulation without a renderer: useful for balancing the wave
//! table and for watching the state store's transitions in the log.
//!
//! ```text
//! RUST_LOG=info spike-dodge --autopilot --seconds 120 --seed 7
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(name = "spike-dodge", about = "Run the Spike Dodge simulation headless")]
struct Args {
    /// RNG seed for spawn positions
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Simulated seconds to run before stopping
    #[arg(long, default_value_t = 60)]
    seconds: u32,

    /// JSON config file (viewport, waves, difficulty pacing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let the autopilot play instead of standing still
    #[arg(long)]
    autopilot: bool,

    /// Character index (0-3), picked on the selection screen and saved
    #[arg(long)]
    character: Option<usize>,

    /// Directory holding saved preferences
    #[arg(long, default_value = ".spike-dodge")]
    profile: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use spike_dodge::consts::{SIM_DT, TARGET_FPS};
    use spike_dodge::preferences::FileStorage;
    use spike_dodge::sim::{Character, Game, GameEvent, KeyState, autopilot_input};
    use spike_dodge::{GameConfig, Preferences};

    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    config.seed = args.seed;

    let mut storage = FileStorage::new(&args.profile);
    let mut prefs = Preferences::load(&storage);
    let wanted = args
        .character
        .map(|index| {
            Character::from_index(index)
                .ok_or_else(|| format!("character index {index} out of range (0-3)"))
        })
        .transpose()?;

    log::info!("Spike Dodge (headless) starting...");
    let mut game = Game::new(config, prefs.character());
    if let Some(character) = wanted {
        choose_character(&mut game, character);
    }

    game.store().subscribe(|next, prev| {
        if next.health != prev.health {
            log::info!("health {} -> {}", prev.health, next.health);
        }
        if next.is_game_over && !prev.is_game_over {
            log::info!("game over at {}s", next.time);
        }
    });

    let idle = KeyState::new();
    let total_ticks = (args.seconds as f32 * TARGET_FPS) as u64;
    let mut hits = 0;
    let mut spawned = 0;

    for _ in 0..total_ticks {
        let input = if args.autopilot {
            autopilot_input(game.player(), game.enemies(), game.config().viewport)
        } else {
            idle.clone()
        };
        game.tick(&input, SIM_DT);

        for event in game.drain_events() {
            match event {
                GameEvent::CharacterSelected { character } => prefs.confirm(character, &mut storage),
                GameEvent::PlayerHit { .. } => hits += 1,
                GameEvent::EnemySpawned { .. } => spawned += 1,
                _ => {}
            }
        }

        if game.state().is_game_over {
            break;
        }
    }

    let state = game.state();
    println!(
        "survived {}s | health {} | difficulty {} | hits {} | enemies spawned {} | {}",
        state.time,
        state.health,
        state.difficulty,
        hits,
        spawned,
        if state.is_game_over { "game over" } else { "alive" }
    );

    Ok(())
}

/// Walk the selection screen with Right taps until `target` is highlighted, then confirm
#[cfg(not(target_arch = "wasm32"))]
fn choose_character(game: &mut spike_dodge::sim::Game, target: spike_dodge::sim::Character) {
    use spike_dodge::consts::SIM_DT;
    use spike_dodge::sim::{Key, KeyState};

    if !game.open_character_select() {
        return;
    }
    let idle = KeyState::new();
    let right = KeyState::with(&[Key::Right]);
    while game
        .character_select()
        .is_some_and(|s| s.selected() != target)
    {
        game.tick(&right, SIM_DT);
        game.tick(&idle, SIM_DT);
    }
    game.tick(&KeyState::with(&[Key::Enter]), SIM_DT);
    game.tick(&idle, SIM_DT);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build drives `Game` from the host page; nothing to run here
}
