use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use grid_snake::render::fit_grid;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    cols: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    rows: Option<usize>,

    /// Ticks per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    speed: Option<u32>,

    /// Size the grid to fill the terminal
    #[arg(long, conflicts_with_all = ["cols", "rows"])]
    fit: bool,

    /// Write logs here (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if self.fit {
            let (width, height) =
                crossterm::terminal::size().context("Failed to query terminal size")?;
            (config.cols, config.rows) = fit_grid(width, height);
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }

        Ok(config)
    }
}

/// The terminal belongs to the game, so logs only go to a file
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    tracing::debug!(?config, "resolved configuration");

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
