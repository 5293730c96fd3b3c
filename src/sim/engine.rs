//! The tick sequencer.
//!
//! Per tick, in this order:
//!   render → stop if the last pass collided → step → sleep
//!
//! `step` covers score, jump, shift-and-place and spawn. The input poller
//! runs on its own thread and only ever touches `RunFlags`; everything in
//! `WorldState` belongs to this loop.

use std::thread;

use crate::config::GameConfig;
use crate::domain::rng::GameRng;
use crate::error::GameError;
use crate::ui::input::{spawn_poller, KeySource};
use crate::ui::renderer::{self, Display};
use crate::ui::sound::SoundEngine;
use super::event::GameEvent;
use super::flags::RunFlags;
use super::step::step;
use super::world::WorldState;

pub struct Engine<D: Display> {
    world: WorldState,
    display: D,
    sound: Option<SoundEngine>,
    flags: RunFlags,
}

impl<D: Display> Engine<D> {
    /// Validate `config` and build a fresh game.
    pub fn new(config: GameConfig, rng: GameRng, display: D) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Engine {
            world: WorldState::new(config, rng),
            display,
            sound: None,
            flags: RunFlags::new(),
        })
    }

    pub fn with_sound(mut self, sound: Option<SoundEngine>) -> Self {
        self.sound = sound;
        self
    }

    #[cfg(test)]
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    /// Handle on the shared flags.
    #[cfg(test)]
    pub fn flags(&self) -> RunFlags {
        self.flags.clone()
    }

    #[cfg(test)]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Run until quit or collision, then join the input thread.
    /// Returns the final score.
    pub fn run<F, K>(&mut self, make_source: F) -> Result<u32, GameError>
    where
        F: FnOnce() -> K + Send + 'static,
        K: KeySource,
    {
        if !self.flags.start() {
            return Err(GameError::AlreadyRunning);
        }
        log::info!("game started");

        let poller = match spawn_poller(make_source, self.flags.clone()) {
            Ok(handle) => handle,
            Err(e) => {
                self.flags.stop();
                return Err(e.into());
            }
        };

        let result = self.tick_loop();

        // Whatever ended the loop, the poller must see the stop before join.
        self.flags.stop();
        if poller.join().is_err() {
            log::error!("input thread panicked");
        }

        log::info!("game over after {} ticks, score {}", self.world.tick, self.world.score);
        result.map(|()| self.world.score)
    }

    fn tick_loop(&mut self) -> Result<(), GameError> {
        let interval = self.world.config.tick_interval();

        while self.flags.is_running() {
            renderer::render(&mut self.world, &mut self.display)?;

            if self.world.colliding {
                log::debug!("collision on tick {}", self.world.tick);
                self.flags.stop();
                break;
            }

            let jump = self.flags.take_jump_request();
            let events = step(&mut self.world, jump);
            self.handle_events(&events);

            thread::sleep(interval);
        }
        Ok(())
    }

    fn handle_events(&self, events: &[GameEvent]) {
        let jump = &self.world.jump;
        log::trace!(
            "tick {}: offset {} step {} prev {} dir {}",
            self.world.tick, jump.offset, jump.step, jump.prev_step, jump.direction
        );
        for event in events {
            match *event {
                GameEvent::Scored { score } => log::debug!("score {score}"),
                GameEvent::ObstacleSpawned { height } => log::trace!("obstacle of height {height}"),
                GameEvent::Collided { row } => log::info!("crashed in row {row}"),
                GameEvent::JumpStarted => log::trace!("jump"),
            }
            let sfx = match &self.sound {
                Some(s) => s,
                None => continue,
            };
            match event {
                GameEvent::JumpStarted => sfx.play_jump(),
                GameEvent::Scored { .. } => sfx.play_score(),
                GameEvent::Collided { .. } => sfx.play_crash(),
                GameEvent::ObstacleSpawned { .. } => {}
            }
        }
    }
}
