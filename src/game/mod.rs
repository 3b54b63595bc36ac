//! The endless climb itself: world entities, generation, input, and the
//! per-tick session orchestration.

pub mod input;
pub mod level;
pub mod obstacle;
pub mod platform;
pub mod player;
pub mod session;
