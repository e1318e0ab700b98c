use std::{
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use lib_2048::{HighScoreStore, MemoryStore, Session};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod input;
mod render;
mod store;
mod terminal;

use input::{Key, KeyDecoder};
use render::TerminalRenderer;
use store::FileStore;
use terminal::RawMode;

#[derive(Debug, Parser)]
#[command(author, version, about = "Play 2048 in the terminal")]
struct Args {
    /// Seed for the tile spawns (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// File holding the high score
    #[arg(long, env = "SLIDE_2048_HIGH_SCORE", default_value = ".2048-high-score")]
    high_score_file: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    no_save: bool,
}

fn play(rng: ChaCha8Rng, input: &mut impl Read, store: impl HighScoreStore) -> Result<()> {
    let renderer = TerminalRenderer::new(io::stdout().lock());
    let mut session = Session::new(rng, renderer, store).context("failed to start a game")?;
    let mut keys = KeyDecoder::new()?;

    loop {
        for key in keys.read_keys(&mut *input).context("failed to read input")? {
            match key {
                Key::Command(command) => {
                    session.handle(command).context("failed to draw the board")?;
                }
                Key::Quit => {
                    info!(
                        "quit with score {}, high score {}",
                        session.state().score(),
                        session.high_score()
                    );
                    return Ok(());
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut stdin = io::stdin().lock();
    let _raw_mode = RawMode::enable(&stdin).context("stdin is not a terminal")?;

    if args.no_save {
        play(rng, &mut stdin, MemoryStore::default())
    } else {
        play(rng, &mut stdin, FileStore::new(args.high_score_file))
    }
}
