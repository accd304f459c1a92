use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_GRID_SIZE: i16 = 20;
pub const DEFAULT_INTERVAL_MS: u64 = 200;
/// Smallest board that leaves room for food next to a one-cell snake.
pub const MIN_GRID_SIZE: i16 = 2;

#[derive(Parser, Debug)]
#[command(name = "snake", version, about = "Grid snake in the terminal")]
pub struct Args {
    /// Cells per side of the square board
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE as u16, value_parser = clap::value_parser!(u16).range(MIN_GRID_SIZE as i64..=60))]
    pub grid_size: u16,

    /// Tick period at the start of every run, in milliseconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Don't ring the terminal bell
    #[arg(long)]
    pub mute: bool,
}

impl Args {
    pub fn session_config(&self) -> Config {
        Config {
            grid_size: self.grid_size as i16,
            initial_interval_ms: self.interval_ms,
            seed: self.seed,
        }
    }
}

/// Everything `GameSession` needs to build and rebuild a run.
#[derive(Clone, Debug)]
pub struct Config {
    pub grid_size: i16,
    pub initial_interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config { grid_size: DEFAULT_GRID_SIZE, initial_interval_ms: DEFAULT_INTERVAL_MS, seed: None }
    }
}
