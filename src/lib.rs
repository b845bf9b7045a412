pub mod board;
pub mod config;
pub mod error;
pub mod field;
pub mod game;
pub mod geometry;
pub mod interaction;
pub mod render;

use tracing::info;

use game::{Flow, Game};
use interaction::EventSource;

/// Runs the game until the source asks to quit or runs dry, printing the board after every change.
pub fn game_loop<S: EventSource + ?Sized>(game: &mut Game, source: &mut S){
    info!("starting main loop");
    game.draw();
    println!("{}", game.surface());
    while let Some(action) = source.next_action() {
        if let Flow::Quit = game.handle(action) {
            break
        }
        if game.draw() > 0 {
            println!("{}", game.surface());
        }
    }
}
