//! The two flags shared between the tick loop and the input thread.
//! Nothing else crosses that boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct RunFlags {
    running: Arc<AtomicBool>,
    jump_requested: Arc<AtomicBool>,
}

impl RunFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Mark the game as running. Returns false if it already was.
    pub fn start(&self) -> bool {
        !self.running.swap(true, Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn request_jump(&self) {
        self.jump_requested.store(true, Ordering::SeqCst);
    }

    /// Consume a pending jump request.
    pub fn take_jump_request(&self) -> bool {
        self.jump_requested.swap(false, Ordering::SeqCst)
    }
}
