//! Grid Snake - a tick-driven Snake engine with a terminal front end
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - A fixed-period tick schedule (driver module)
//! - Keyboard mapping, TUI rendering and session statistics
//! - The interactive terminal mode (modes module)

pub mod driver;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
