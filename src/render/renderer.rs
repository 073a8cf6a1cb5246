use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::collections::HashSet;

use crate::game::{Grid, Position, Snapshot};
use crate::metrics::SessionStats;

/// Header and footer rows plus the grid border
const CHROME_ROWS: u16 = 3 + 3 + 2;
/// Terminal columns per grid cell
const CELL_WIDTH: u16 = 2;

/// Everything drawn in one frame
pub struct View<'a> {
    pub snapshot: &'a Snapshot,
    pub grid: Grid,
    pub speed: u32,
    pub stats: &'a SessionStats,
}

/// Largest grid that fits a terminal of the given size.
///
/// May return zero for tiny terminals; the engine clamps that to 1.
pub fn fit_grid(width: u16, height: u16) -> (usize, usize) {
    // The grid gets the middle 80% of the width.
    let game_width = (width as u32 * 8 / 10) as u16;
    let cols = game_width.saturating_sub(2) / CELL_WIDTH;
    let rows = height.saturating_sub(CHROME_ROWS);
    (cols as usize, rows as usize)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &View) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if view.snapshot.running {
            frame.render_widget(self.render_grid(view), game_area);
        } else {
            frame.render_widget(self.render_game_over(view), game_area);
        }

        frame.render_widget(self.render_controls(chunks[2]), chunks[2]);
    }

    fn render_grid(&self, view: &View) -> Paragraph<'_> {
        let snapshot = view.snapshot;
        let head = snapshot.head();
        let body: HashSet<Position> = snapshot.snake.iter().copied().collect();
        let (cols, rows) = view.grid.bounds();

        let lines: Vec<Line> = (0..rows)
            .map(|y| {
                let spans: Vec<Span> = (0..cols)
                    .map(|x| {
                        let pos = Position::new(x as i32, y as i32);
                        if Some(pos) == head {
                            Span::styled(
                                "■ ",
                                Style::default()
                                    .fg(Color::LightGreen)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else if body.contains(&pos) {
                            Span::styled("■ ", Style::default().fg(Color::Green))
                        } else if pos == snapshot.apple {
                            Span::styled(
                                "● ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled(". ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, view: &View) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                view.snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(view.snapshot.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(view.speed.to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(view.stats.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(view.stats.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, view: &View) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.stats.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("+/-", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(snapshot: &Snapshot, grid: Grid) -> String {
        let stats = SessionStats::new();
        let view = View {
            snapshot,
            grid,
            speed: 10,
            stats: &stats,
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &view))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn snapshot(running: bool) -> Snapshot {
        Snapshot {
            snake: vec![Position::new(2, 1), Position::new(1, 1)],
            apple: Position::new(4, 3),
            score: 12,
            running,
        }
    }

    #[test]
    fn test_running_game_draws_grid() {
        let screen = draw(&snapshot(true), Grid::new(6, 5));

        assert!(screen.contains("Score: 12"));
        assert!(screen.contains("Speed: 10"));
        assert!(screen.contains("●"));
        assert_eq!(screen.matches('■').count(), 2);
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_panel() {
        let screen = draw(&snapshot(false), Grid::new(6, 5));

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score: 12"));
    }

    #[test]
    fn test_fit_grid() {
        // 80 wide -> 64 for the grid, minus border, two columns per cell.
        assert_eq!(fit_grid(80, 30), (31, 22));
        assert_eq!(fit_grid(0, 0), (0, 0));
        assert_eq!(fit_grid(3, 8), (0, 0));
    }
}
