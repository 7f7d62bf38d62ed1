//! A snake game on a wraparound board.
//!
//! - `grid`: board coordinates, directions and toroidal wrapping
//! - `engine`: the tick-driven simulation
//! - `input`: key bindings for the terminal front-end
//! - `game`: the crossterm front-end that drives the engine clock

pub mod engine;
pub mod game;
pub mod grid;
pub mod input;

pub use engine::{Engine, GameState, Phase};
pub use grid::{Direction, Position, BOARD_SIZE};
