mod config;
mod driver;
mod food;
mod frontend;
mod game;
mod input;
mod session;
mod snake;
mod term;

use std::fs::File;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use crate::config::Args;
use crate::game::Game;
use crate::session::GameSession;
use crate::term::{Bell, TermManager};

pub type TermInt = u16;
/// Grid cell, 1-indexed. Signed so a head that walked off the board is still
/// representable.
pub type Position = (i16, i16);

fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal is in raw mode while playing, so logs go to a file
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("creating log file {}", args.log_file.display()))?;
    WriteLogger::init(level, LogConfig::default(), log_file).context("initializing logger")?;

    let config = args.session_config();
    info!("Starting snake on a {0}x{0} grid, {1}ms ticks", config.grid_size, config.initial_interval_ms);

    let mut term = TermManager::new(config.grid_size).context("reading terminal size")?;
    let (need_w, need_h) = term.required_size();
    let (have_w, have_h) = term.terminal_size();
    ensure!(
        term.fits(),
        "terminal is {}x{} but a {} grid needs at least {}x{}",
        have_w, have_h, config.grid_size, need_w, need_h
    );

    // Restored on every path, including a half-finished setup
    let (result, mut term) = match term.setup() {
        Err(e) => (Err::<(), _>(e).context("setting up terminal"), term),
        Ok(()) => {
            let mut game = Game::new(GameSession::new(&config), term, Bell::new(args.mute));
            let result = game.run().context("game loop failed");
            info!("Exiting, high score {}", game.session().high_score());
            (result, game.into_term())
        }
    };

    let restored = term.restore().context("restoring terminal");
    first_error(result, restored)
}

/// The game's own failure outranks a failure to restore the terminal.
fn first_error(result: Result<()>, restored: Result<()>) -> Result<()> {
    result?;
    restored
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn loop_error_wins_over_restore_error() {
        let err = first_error(Err(anyhow!("loop")), Err(anyhow!("restore"))).unwrap_err();
        assert_eq!(err.to_string(), "loop");

        let err = first_error(Ok(()), Err(anyhow!("restore"))).unwrap_err();
        assert_eq!(err.to_string(), "restore");

        assert!(first_error(Ok(()), Ok(())).is_ok());
    }
}
