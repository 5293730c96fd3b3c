//! Gamepad input using gilrs.
//!
//! Button mapping is loaded from config.toml `[gamepad]`.
//! Default mapping:
//!   A (South) / Y (North)  →  Jump
//!   Select                 →  Quit
//!
//! Without the `gamepad` feature this source never reports anything.

use std::io;
use std::time::Duration;

#[cfg(feature = "gamepad")]
use gilrs::{Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use super::input::{KeyAction, KeySource};

/// Logical button identifiers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    Start,
    Select,
}

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East => Some(Btn::B),
            Button::West => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::LeftTrigger => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Action-to-button mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
struct ActionMap {
    jump: Vec<Btn>,
    quit: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            jump: vec![Btn::A, Btn::Y],
            quit: vec![Btn::Select],
        }
    }
}

impl ActionMap {
    /// Names that fail to parse are skipped; an empty result keeps the default.
    fn from_config(cfg: &GamepadConfig) -> Self {
        fn parse_list(names: &[String]) -> Vec<Btn> {
            names.iter().filter_map(|s| Btn::from_name(s)).collect()
        }
        let mut map = ActionMap::default();
        let jump = parse_list(&cfg.jump);
        if !jump.is_empty() { map.jump = jump; }
        let quit = parse_list(&cfg.quit);
        if !quit.is_empty() { map.quit = quit; }
        map
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn action_for(&self, btn: Btn) -> Option<KeyAction> {
        if self.quit.contains(&btn) {
            Some(KeyAction::Quit)
        } else if self.jump.contains(&btn) {
            Some(KeyAction::Jump)
        } else {
            None
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    action_map: ActionMap,
}

impl GamepadState {
    pub fn new(cfg: &GamepadConfig) -> Self {
        #[cfg(feature = "gamepad")]
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                if g.gamepads().next().is_some() {
                    log::info!("gamepad detected");
                }
                Some(g)
            }
            Err(e) => {
                log::debug!("gamepad support unavailable: {e}");
                None
            }
        };

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs,
            action_map: ActionMap::from_config(cfg),
        }
    }

    /// Drain pending gilrs events; the first mapped button press wins.
    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) -> Option<KeyAction> {
        let gilrs = self.gilrs.as_mut()?;
        let mut action = None;
        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    if action.is_none() {
                        action = Btn::from_gilrs(btn).and_then(|b| self.action_map.action_for(b));
                    }
                }
                EventType::Connected => log::info!("gamepad connected"),
                EventType::Disconnected => log::info!("gamepad disconnected"),
                _ => {}
            }
        }
        action
    }
}

impl KeySource for GamepadState {
    fn poll_action(&mut self, _timeout: Duration) -> io::Result<Option<KeyAction>> {
        #[cfg(feature = "gamepad")]
        return Ok(self.poll_gilrs());
        #[cfg(not(feature = "gamepad"))]
        return Ok(None);
    }
}
