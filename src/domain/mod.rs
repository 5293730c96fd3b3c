pub mod grid;
pub mod jump;
pub mod rng;
pub mod spawner;
pub mod tile;
