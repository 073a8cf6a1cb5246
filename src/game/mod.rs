//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A driver calls [`GameEngine::tick`] on its own schedule and reads
//! [`GameEngine::snapshot`] to draw.

pub mod config;
pub mod direction;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use grid::Grid;
pub use state::{Collision, GameState, Position, Snake, Snapshot};
