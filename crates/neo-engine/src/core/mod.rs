pub mod distance;
pub mod field;
pub mod orbit;
pub mod rng;
pub mod ship;
pub mod simulation;
pub mod time;
