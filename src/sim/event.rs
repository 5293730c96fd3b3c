//! Events emitted during a simulation step.
//! The presentation layer consumes these for sound and logging.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    JumpStarted,
    /// The player cleared an obstacle; carries the new total.
    Scored { score: u32 },
    ObstacleSpawned { height: u32 },
    /// The head landed on an obstacle. The loop stops after the next render.
    Collided { row: usize },
}
