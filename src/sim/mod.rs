pub mod engine;
pub mod event;
pub mod flags;
pub mod step;
pub mod world;
