/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use log::{error, info};

use config::GameConfig;
use sim::level;
use sim::step::{self, TurnOutcome};
use sim::world::GameState;
use ui::input::KeyReader;
use ui::renderer::Renderer;

/// Exit status when the player quits.
const QUIT_STATUS: i32 = 1;

fn main() {
    // RUST_LOG selects the level; stderr can be redirected away from the board.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let config = GameConfig::load();
    info!("starting {:?} variant", config.variant);

    let mut world = GameState::new(config);
    if let Err(e) = level::new_game(&mut world) {
        eprintln!("Could not set up the board: {e}");
        std::process::exit(2);
    }

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        let _ = renderer.cleanup();
        eprintln!("Terminal init failed: {e}");
        std::process::exit(2);
    }

    let result = game_loop(&mut world, &mut renderer);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(()) => {
            println!("Reached level {}.", world.level);
            std::process::exit(QUIT_STATUS);
        }
        Err(e) => {
            error!("game loop ended: {e}");
            eprintln!("Game error: {e}");
            std::process::exit(2);
        }
    }
}

/// One key per turn: render, block on input, apply the whole turn.
fn game_loop(world: &mut GameState, renderer: &mut Renderer) -> Result<(), Box<dyn std::error::Error>> {
    let mut keys = KeyReader::new();

    loop {
        renderer.render(world)?;
        let key = keys.read_key()?;

        match step::turn(world, key)? {
            TurnOutcome::Quit => break,
            TurnOutcome::Ignored => {}
            TurnOutcome::Played(events) => {
                if world.player_dead() {
                    info!("player died on level {} ({} events)", world.level, events.len());
                }
            }
        }
    }

    Ok(())
}
