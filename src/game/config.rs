use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the game
///
/// Every field has a default, so a config file only needs to name the values
/// it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub cols: usize,
    /// Height of the game grid in cells
    pub rows: usize,
    /// Ticks per second
    pub speed: u32,
    /// Length of the snake after a reset
    pub initial_snake_length: usize,
    /// Random draws tried before apple placement falls back to a scan
    pub max_placement_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 20,
            rows: 20,
            speed: 10,
            initial_snake_length: 4,
            max_placement_attempts: 1000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Speed clamped to at least one tick per second
    pub fn effective_speed(&self) -> u32 {
        clamp_speed(self.speed)
    }

    /// Time between ticks: 1000ms / speed
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.speed)
    }
}

pub fn clamp_speed(speed: u32) -> u32 {
    speed.max(1)
}

/// Period for a given speed; speeds below 1 are treated as 1
pub fn tick_interval(speed: u32) -> Duration {
    Duration::from_secs(1) / clamp_speed(speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.cols, 20);
        assert_eq!(config.rows, 20);
        assert_eq!(config.speed, 10);
        assert_eq!(config.initial_snake_length, 4);
        assert_eq!(config.max_placement_attempts, 1000);
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(GameConfig::default().tick_interval(), Duration::from_millis(100));
        assert_eq!(tick_interval(1), Duration::from_secs(1));
        assert_eq!(tick_interval(4), Duration::from_millis(250));
    }

    #[test]
    fn test_zero_speed_clamped() {
        let config = GameConfig::small().with_speed(0);
        assert_eq!(config.effective_speed(), 1);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cols": 32, "speed": 15 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.cols, 32);
        assert_eq!(config.rows, 20);
        assert_eq!(config.speed, 15);
        assert_eq!(config.initial_snake_length, 4);
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::from_json_file(Path::new("/nonexistent/snake.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
