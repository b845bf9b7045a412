use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::BoardError;
use crate::geometry::{Pixel, Point, Rect};
use crate::interaction::Action;
use crate::render::TextSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit
}

/// A board placed somewhere in a window, plus the surface it is drawn on.
///
/// Presses arrive in window coordinates; the board only ever sees board-local ones.
pub struct Game {
    board: Board,
    position: Pixel,
    surface: TextSurface
}

impl Game {
    pub fn new(board: Board, position: Pixel) -> Game {
        let surface = TextSurface::new(board.size(), board.layout());
        Game{board, position, surface}
    }

    pub fn from_config<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Game, BoardError> {
        let board = Board::new(config.board_size(), config.mines, config.layout(), rng)?;
        let position = config.board_position(board.bounds().width);
        Ok(Game::new(board, position))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn surface(&self) -> &TextSurface {
        &self.surface
    }

    /// The board's rectangle in window coordinates.
    pub fn screen_bounds(&self) -> Rect {
        let bounds = self.board.bounds();
        Rect::new(self.position, bounds.width, bounds.height)
    }

    fn to_local(&self, pixel: Pixel) -> Pixel {
        let origin = self.board.layout().origin;
        pixel.translate(origin.0 - self.position.0, origin.1 - self.position.1)
    }

    fn to_screen(&self, pixel: Pixel) -> Pixel {
        let origin = self.board.layout().origin;
        pixel.translate(self.position.0 - origin.0, self.position.1 - origin.1)
    }

    pub fn handle(&mut self, action: Action) -> Flow {
        match action {
            Action::Press(pixel) => {
                self.press(pixel);
            }
            Action::PressCell(point) => {
                match self.board.cell_rect(point) {
                    Some(rect) => {
                        let pixel = self.to_screen(rect.center());
                        self.press(pixel);
                    }
                    None => warn!(cell = %point, "no such cell")
                }
            }
            Action::Quit => {
                info!("shutting down the game");
                return Flow::Quit
            }
        }
        Flow::Continue
    }

    fn press(&mut self, pixel: Pixel) -> Option<Point> {
        if !self.screen_bounds().contains(pixel) {
            trace!(x = pixel.0, y = pixel.1, "press outside the board");
            return None
        }
        debug!(x = pixel.0, y = pixel.1, "clicked board");
        let local = self.to_local(pixel);
        self.board.click_at(local)
    }

    /// Draws whatever changed onto the surface; returns the number of fields drawn.
    pub fn draw(&mut self) -> usize {
        self.board.draw(&mut self.surface)
    }
}
