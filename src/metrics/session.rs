use std::time::{Duration, Instant};

/// Statistics for one run of the program. Nothing here outlives the process.
pub struct SessionStats {
    game_started: Instant,
    /// Play time of the current game, frozen once it ends
    pub elapsed: Duration,
    pub best_score: u32,
    pub games_played: u32,
    in_progress: bool,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            elapsed: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            in_progress: true,
        }
    }

    /// Refresh the play clock; a finished game keeps its final time
    pub fn update(&mut self) {
        if self.in_progress {
            self.elapsed = self.game_started.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.game_started = Instant::now();
        self.elapsed = Duration::ZERO;
        self.in_progress = true;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.in_progress = false;
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
