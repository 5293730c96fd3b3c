//! Keyboard input and the input-poller thread.
//!
//! The poller runs beside the tick loop. It only ever touches the two
//! `RunFlags`: a Jump action raises the jump request, a Quit action clears
//! the running flag. Polls use a bounded timeout so the thread notices a
//! stop from the tick loop and can be joined.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::flags::RunFlags;

/// Poll timeout for one iteration of the poller thread.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(20);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyAction {
    Jump,
    Quit,
}

/// Anything that can be polled for player actions.
pub trait KeySource {
    /// Wait up to `timeout` for an action. `Ok(None)` means nothing relevant
    /// arrived in time.
    fn poll_action(&mut self, timeout: Duration) -> io::Result<Option<KeyAction>>;
}

const KEYS_JUMP: &[KeyCode] = &[KeyCode::Char(' '), KeyCode::Up];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

/// Map a terminal key event to an action. Releases and unknown keys map to
/// nothing.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(KeyAction::Quit);
    }
    if KEYS_JUMP.contains(&key.code) {
        Some(KeyAction::Jump)
    } else if KEYS_QUIT.contains(&key.code) {
        Some(KeyAction::Quit)
    } else {
        None
    }
}

/// The crossterm event stream.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn poll_action(&mut self, timeout: Duration) -> io::Result<Option<KeyAction>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

/// Two sources polled in turn: `secondary` without waiting, then `primary`
/// for the full timeout.
pub struct Combined<A, B> {
    pub primary: A,
    pub secondary: B,
}

impl<A: KeySource, B: KeySource> KeySource for Combined<A, B> {
    fn poll_action(&mut self, timeout: Duration) -> io::Result<Option<KeyAction>> {
        if let Some(action) = self.secondary.poll_action(Duration::ZERO)? {
            return Ok(Some(action));
        }
        self.primary.poll_action(timeout)
    }
}

/// Spawn the poller thread. The source is built on the new thread, so it
/// does not have to be `Send`.
pub fn spawn_poller<F, K>(make_source: F, flags: RunFlags) -> io::Result<JoinHandle<()>>
where
    F: FnOnce() -> K + Send + 'static,
    K: KeySource,
{
    thread::Builder::new()
        .name("input".into())
        .spawn(move || {
            let mut source = make_source();
            while flags.is_running() {
                match source.poll_action(POLL_TIMEOUT) {
                    Ok(Some(KeyAction::Jump)) => flags.request_jump(),
                    Ok(Some(KeyAction::Quit)) => {
                        log::debug!("quit requested");
                        flags.stop();
                    }
                    Ok(None) => {}
                    Err(e) => {
                        log::error!("input polling failed: {e}");
                        flags.stop();
                    }
                }
            }
            log::debug!("input poller exiting");
        })
}
