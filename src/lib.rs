//! Goobi - Terminal Endless Climber Library
//!
//! Exposes the simulation core and the Telegram glue for testing and
//! external use; the terminal presentation stays in the binary.

pub mod constants;
pub mod game;
pub mod storage;
pub mod telegram;
pub mod ui;
pub mod util;
