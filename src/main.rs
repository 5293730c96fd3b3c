//! Entry point: logging, config, terminal setup/teardown, final score.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use config::GameConfig;
use domain::rng::GameRng;
use error::GameError;
use sim::engine::Engine;
use ui::gamepad::GamepadState;
use ui::input::{Combined, TerminalKeys};
use ui::renderer::{with_terminal, Renderer};
use ui::sound::SoundEngine;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::load();
    log::debug!("settings: {config:?}");

    let mut renderer = Renderer::new();
    let result = with_terminal(&mut renderer, |r| play(config, r));

    match result {
        Ok(score) => {
            println!();
            println!("Thanks for playing Dash Runner!");
            println!("Final Score: {score}");
        }
        Err(e) => {
            eprintln!("Game error: {e}");
            std::process::exit(1);
        }
    }
}

fn play(config: GameConfig, renderer: &mut Renderer) -> Result<u32, GameError> {
    let pad_config = config.gamepad.clone();
    let mut engine = Engine::new(config, GameRng::from_clock(), renderer)?
        .with_sound(SoundEngine::new());

    // gilrs is built on the input thread; it need not be `Send`.
    engine.run(move || Combined {
        primary: TerminalKeys,
        secondary: GamepadState::new(&pad_config),
    })
}
