use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::direction::Direction;
use super::grid::Grid;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake body, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Create a snake whose segments trail behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.opposite().delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(dx * i, dy * i))
            .collect();

        Self { body }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_segments<I>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() { None } else { Some(Self { body }) }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        // A snake always keeps at least one segment.
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.body.iter()
    }

    /// Check if position is occupied by any segment, tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance onto `new_head`. The tail is kept when growing.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; provided alongside `len`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Complete game state, owned by a [`GameEngine`](super::GameEngine)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub apple: Position,
    /// Direction the snake moved in on the last tick
    pub direction: Direction,
    /// Direction applied at the start of the next tick
    pub pending_direction: Direction,
    pub score: u32,
    /// Successful ticks since the last reset
    pub ticks: u64,
    pub running: bool,
}

impl GameState {
    pub fn new(grid: Grid, snake: Snake, apple: Position, direction: Direction) -> Self {
        Self {
            grid,
            snake,
            apple,
            direction,
            pending_direction: direction,
            score: 0,
            ticks: 0,
            running: true,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            apple: self.apple,
            score: self.score,
            running: self.running,
        }
    }
}

/// Read-only view handed to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Head first
    pub snake: Vec<Position>,
    pub apple: Position,
    pub score: u32,
    pub running: bool,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
