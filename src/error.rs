use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::Point;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("cannot place {mines} mines on a board with {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
    #[error("board must be at least 1x1")]
    EmptyBoard,
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("padding must not be negative, got {0}")]
    NegativePadding(i32),
    #[error("board does not fit in pixel coordinates")]
    LayoutTooLarge,
    #[error("mine at {0} is outside the board")]
    MineOutOfBounds(Point),
    #[error("mine at {0} was placed twice")]
    DuplicateMine(Point),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
