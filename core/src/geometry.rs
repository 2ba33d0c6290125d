use serde::{Deserialize, Serialize};

use crate::*;

/// Height in pixels of the HUD bar drawn above the board.
pub const HUD_BAR_HEIGHT: u16 = 60;

/// Pixel layout of the board, used to turn pointer positions into tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGeometry {
    size: Coord2,
    tile_size: u16,
}

impl BoardGeometry {
    pub const fn new(size: Coord2, tile_size: u16) -> Self {
        Self { size, tile_size }
    }

    pub const fn tile_size(&self) -> u16 {
        self.tile_size
    }

    pub const fn width(&self) -> u32 {
        self.size.1 as u32 * self.tile_size as u32
    }

    pub const fn height(&self) -> u32 {
        self.size.0 as u32 * self.tile_size as u32
    }

    /// Window height needed to fit the HUD bar and the board.
    pub const fn window_height(&self) -> u32 {
        self.height() + HUD_BAR_HEIGHT as u32
    }

    /// Top-left pixel of a tile, relative to the board origin, as `(x, y)`.
    pub const fn tile_origin(&self, (row, col): Coord2) -> (u32, u32) {
        (
            col as u32 * self.tile_size as u32,
            row as u32 * self.tile_size as u32,
        )
    }

    /// Tile under a point given in pixels relative to the board origin.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<Coord2> {
        if !(x >= 0.0 && y >= 0.0) || self.tile_size == 0 {
            return None;
        }
        let tile_size = f64::from(self.tile_size);
        let col = (x / tile_size) as u32;
        let row = (y / tile_size) as u32;
        if row < u32::from(self.size.0) && col < u32::from(self.size.1) {
            Some((row as Coord, col as Coord))
        } else {
            None
        }
    }
}
