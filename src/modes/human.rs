use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::driver::TickDriver;
use crate::game::{GameConfig, GameEngine, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::{Renderer, View};

pub const MAX_SPEED: u32 = 60;

/// Interactive terminal game
pub struct HumanMode {
    engine: GameEngine,
    driver: TickDriver,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    /// Must be called inside a tokio runtime
    pub fn new(config: GameConfig) -> Self {
        let engine = GameEngine::new(config);
        let driver = TickDriver::new(engine.speed());

        Self {
            engine,
            driver,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let (cols, rows) = self.engine.state().grid.bounds();
        info!(cols, rows, speed = self.engine.speed(), "starting game");

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS, independent of the tick rate
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => self.handle_key(key),
                        Some(Ok(_)) => {}
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = self.driver.next_tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    self.stats.update();
                    let snapshot = self.engine.snapshot();
                    let view = View {
                        snapshot: &snapshot,
                        grid: self.engine.state().grid,
                        speed: self.engine.speed(),
                        stats: &self.stats,
                    };
                    terminal
                        .draw(|frame| self.renderer.render(frame, &view))
                        .context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            games = self.stats.games_played,
            best = self.stats.best_score,
            "session finished"
        );
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.apply(self.input_handler.handle_key_event(key));
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                self.engine.set_direction(direction);
            }
            KeyAction::Restart => self.restart(),
            KeyAction::SpeedUp => self.change_speed(1),
            KeyAction::SpeedDown => self.change_speed(-1),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if let TickOutcome::GameOver(_) = self.engine.tick() {
            self.stats.on_game_over(self.engine.snapshot().score);
        }
    }

    fn restart(&mut self) {
        self.engine.restart();
        self.stats.on_game_start();
    }

    fn change_speed(&mut self, delta: i32) {
        let speed = self.engine.speed().saturating_add_signed(delta).clamp(1, MAX_SPEED);
        self.engine.set_speed(speed);
        self.driver.set_speed(speed);
        debug!(speed, "speed changed");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[tokio::test]
    async fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::small());
        assert!(mode.engine.is_running());
        assert_eq!(mode.engine.snapshot().score, 0);
        assert_eq!(mode.driver.speed(), 10);
    }

    #[tokio::test]
    async fn test_turn_reaches_engine() {
        let mut mode = HumanMode::new(GameConfig::small());

        mode.apply(KeyAction::Turn(Direction::Up));
        assert_eq!(mode.engine.state().pending_direction, Direction::Up);

        // Reverse of the current heading is dropped by the engine.
        mode.apply(KeyAction::Turn(Direction::Left));
        assert_eq!(mode.engine.state().pending_direction, Direction::Up);
    }

    #[tokio::test]
    async fn test_key_release_ignored() {
        let mut mode = HumanMode::new(GameConfig::small());
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        mode.handle_key(release);
        assert!(!mode.should_quit);

        mode.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(mode.should_quit);
    }

    #[tokio::test]
    async fn test_speed_keys_clamped() {
        let mut mode = HumanMode::new(GameConfig::small().with_speed(1));

        mode.apply(KeyAction::SpeedDown);
        assert_eq!(mode.engine.speed(), 1);

        mode.apply(KeyAction::SpeedUp);
        assert_eq!(mode.engine.speed(), 2);
        assert_eq!(mode.driver.speed(), 2);

        let mut fast = HumanMode::new(GameConfig::small().with_speed(MAX_SPEED));
        fast.apply(KeyAction::SpeedUp);
        assert_eq!(fast.engine.speed(), MAX_SPEED);
    }

    #[tokio::test]
    async fn test_game_over_and_restart() {
        // A 1x1 board ends on the first tick.
        let mut mode = HumanMode::new(GameConfig::new(1, 1));

        mode.update_game();
        assert!(!mode.engine.is_running());
        assert_eq!(mode.stats.games_played, 1);

        mode.update_game();
        assert_eq!(mode.stats.games_played, 1);

        mode.apply(KeyAction::Restart);
        assert!(mode.engine.is_running());
        assert_eq!(mode.engine.snapshot().score, 0);
    }
}
