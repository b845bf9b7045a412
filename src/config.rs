use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{BoardSize, Layout};
use crate::error::ConfigError;
use crate::geometry::{Pixel, Rect};

/// Game settings. Every key is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
    pub cell_size: i32,
    pub padding: i32,
    /// Window width and height in pixels.
    pub window: [i32; 2],
    /// Distance from the top of the window to the board. The board is centred horizontally.
    pub board_top: i32,
    /// Fixed seed for mine placement; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            mines: 70,
            cell_size: 30,
            padding: 3,
            window: [940, 940],
            board_top: 150,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn board_size(&self) -> BoardSize {
        BoardSize::new(self.width, self.height)
    }

    /// Cell layout in board-local pixels, with cell (0, 0) at the origin.
    pub fn layout(&self) -> Layout {
        Layout {
            origin: Pixel(0, 0),
            cell_size: self.cell_size,
            padding: self.padding,
        }
    }

    pub fn window(&self) -> Rect {
        Rect::new(Pixel(0, 0), self.window[0], self.window[1])
    }

    /// Where the top-left corner of a board `board_width` pixels wide sits in the window.
    pub fn board_position(&self, board_width: i32) -> Pixel {
        Pixel(self.window[0].saturating_sub(board_width) / 2, self.board_top)
    }
}
