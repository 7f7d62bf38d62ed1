use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use wrapsnake::game::Game;
use wrapsnake::Engine;

#[derive(Parser)]
#[command(name = "wrapsnake")]
#[command(version, about = "Snake on a board without walls")]
struct Cli {
    /// File that receives the game log (the terminal belongs to the board)
    #[arg(long, default_value = "wrapsnake.log")]
    log_file: PathBuf,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Seed for food placement, for replaying the same session
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("failed to initialize logger")?;

    let rng = match cli.seed {
        Some(seed) => {
            info!("using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut game = Game::new(Engine::with_rng(rng));
    let score = game.run()?;
    println!("Final score: {}", score);
    Ok(())
}
