use rand::rngs::ThreadRng;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

use super::{
    config::{self, GameConfig},
    direction::Direction,
    grid::Grid,
    state::{Collision, GameState, Position, Snake, Snapshot},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was already over; nothing changed
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the apple and grew
    Ate,
    /// The move was illegal and ended the game
    GameOver(Collision),
}

/// The game engine that owns the simulation state
///
/// Construction performs the initial reset, so the engine always holds a valid
/// state. The random source is a type parameter so tests can seed it.
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    state: GameState,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let state = initial_state(&config, &mut rng);
        Self { config, state, rng }
    }

    /// Start a fresh game on a `cols` x `rows` grid at `speed` ticks per second
    pub fn reset(&mut self, cols: usize, rows: usize, speed: u32) {
        self.config.cols = cols;
        self.config.rows = rows;
        self.config.speed = config::clamp_speed(speed);
        self.restart();
    }

    /// Start a fresh game with the current configuration
    pub fn restart(&mut self) {
        self.state = initial_state(&self.config, &mut self.rng);
        debug!(
            cols = self.state.grid.cols(),
            rows = self.state.grid.rows(),
            speed = self.speed(),
            "game reset"
        );
    }

    /// Queue a direction for the next tick.
    ///
    /// Reversing onto the current direction is ignored, as is any change while
    /// the game is over. Returns whether the pending direction was updated.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.state.running {
            return false;
        }
        if direction.is_opposite(self.state.direction) {
            trace!(?direction, current = ?self.state.direction, "reverse turn ignored");
            return false;
        }
        self.state.pending_direction = direction;
        true
    }

    /// Like [`set_direction`](Self::set_direction), from a unit vector.
    /// Anything other than the four unit vectors is ignored.
    pub fn set_direction_delta(&mut self, dx: i32, dy: i32) -> bool {
        match Direction::from_delta(dx, dy) {
            Some(direction) => self.set_direction(direction),
            None => false,
        }
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> TickOutcome {
        let state = &mut self.state;
        if !state.running {
            return TickOutcome::Idle;
        }

        state.direction = state.pending_direction;
        let new_head = state.snake.head().moved_in_direction(state.direction);

        if !state.grid.is_inside(new_head) {
            return self.game_over(Collision::Wall);
        }
        // Checked against the body before the tail moves: chasing the tail
        // into the cell it is about to leave still counts.
        if state.snake.occupies(new_head) {
            return self.game_over(Collision::SelfCollision);
        }

        let ate = new_head == state.apple;
        state.snake.advance(new_head, ate);
        state.ticks += 1;

        if ate {
            state.score += 1;
            state.apple = place_apple(
                &state.grid,
                &state.snake,
                self.config.max_placement_attempts,
                &mut self.rng,
            );
            debug!(score = state.score, length = state.snake.len(), "apple eaten");
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    fn game_over(&mut self, collision: Collision) -> TickOutcome {
        self.state.running = false;
        info!(
            ?collision,
            score = self.state.score,
            length = self.state.snake.len(),
            ticks = self.state.ticks,
            "game over"
        );
        TickOutcome::GameOver(collision)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn speed(&self) -> u32 {
        self.config.effective_speed()
    }

    /// Change the speed without restarting the game
    pub fn set_speed(&mut self, speed: u32) {
        self.config.speed = config::clamp_speed(speed);
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval()
    }
}

/// Build the state a reset starts from.
///
/// The snake lies horizontally through the grid centre heading right. On
/// grids too narrow for the configured length the snake is shortened and the
/// head shifted right so every segment stays on the board.
fn initial_state<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> GameState {
    let grid = Grid::new(config.cols, config.rows);
    let (cols, rows) = grid.bounds();

    let length = config.initial_snake_length.clamp(1, cols);
    let head = Position::new((cols / 2).max(length - 1) as i32, (rows / 2) as i32);
    let snake = Snake::new(head, Direction::Right, length);

    let apple = place_apple(&grid, &snake, config.max_placement_attempts, rng);
    GameState::new(grid, snake, apple, Direction::Right)
}

/// Pick a cell for the apple that the snake does not cover.
///
/// Tries up to `attempts` uniform draws, then scans the board for the first
/// free cell. A board with no free cell at all gets the apple on the head.
pub fn place_apple<R: Rng + ?Sized>(
    grid: &Grid,
    snake: &Snake,
    attempts: usize,
    rng: &mut R,
) -> Position {
    for _ in 0..attempts {
        let candidate = grid.random_cell(rng);
        if !snake.occupies(candidate) {
            return candidate;
        }
    }

    if let Some(cell) = grid.cells().find(|cell| !snake.occupies(*cell)) {
        debug!(attempts, ?cell, "apple placed by board scan");
        return cell;
    }

    warn!(length = snake.len(), "board full; apple placed on head");
    snake.head()
}
