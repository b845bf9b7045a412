use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};

use sweepfield::config::GameConfig;
use sweepfield::error::Error;
use sweepfield::game::Game;
use sweepfield::game_loop;
use sweepfield::interaction::LineSource;

fn run() -> Result<(), Error> {
    let config = match env::args_os().nth(1) {
        Some(path) => GameConfig::load(&PathBuf::from(path))?,
        None => GameConfig::default()
    };
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy()
    };
    let mut game = Game::from_config(&config, &mut rng)?;
    println!("Commands: click X Y (window pixels), cell X Y, quit");
    game_loop(&mut game, &mut LineSource::stdin());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    info!("running Minesweeper");
    if let Err(err) = run() {
        error!(%err, "game failed");
        process::exit(1);
    }
}
