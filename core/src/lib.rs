#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use geometry::*;
pub use session::*;
pub use tile::*;
pub use types::*;
pub use watch::*;

mod board;
mod error;
mod generator;
mod geometry;
mod session;
mod tile;
mod types;
mod watch;

/// Fixed parameters a board is built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    /// Edge length of a tile in pixels
    pub tile_size: u16,
    pub mines: CellCount,
}

impl BoardConfig {
    /// The only board the game ships with.
    pub const EASY: Self = Self::new_unchecked((8, 10), 45, 10);

    pub const fn new_unchecked(size: Coord2, tile_size: u16, mines: CellCount) -> Self {
        Self {
            size,
            tile_size,
            mines,
        }
    }

    pub fn new(size: Coord2, tile_size: u16, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 || tile_size == 0 {
            return Err(BoardError::EmptyBoard);
        }
        if mines > mult(size.0, size.1) {
            return Err(BoardError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, tile_size, mines))
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Flag budget, one per mine
    pub const fn flags(&self) -> CellCount {
        self.mines
    }

    pub const fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.size, self.tile_size)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::EASY
    }
}

/// Outcome of placing or clearing a flag
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
