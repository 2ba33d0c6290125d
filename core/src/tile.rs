use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of revealed-ground shades a renderer can pick from.
pub const SHADE_VARIANTS: u8 = 2;

/// Number of explosion sprites a renderer can pick from.
pub const BOMB_VARIANTS: u8 = 8;

/// Gameplay state of a single tile.
///
/// Valid transitions:
/// - Grass <-> GrassFlagged
/// - HiddenBomb <-> BombFlagged
/// - Grass -> DisplayAdjacentBombs
/// - HiddenBomb -> ExplodingBomb
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    /// Unrevealed, no mine
    Grass,
    /// Flagged, no mine
    GrassFlagged,
    /// Flagged, mine
    BombFlagged,
    /// Revealed, shows the adjacency count
    DisplayAdjacentBombs,
    /// Unrevealed, mine
    HiddenBomb,
    /// Mine shown after the game was lost
    ExplodingBomb,
}

impl TileState {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::HiddenBomb | Self::BombFlagged | Self::ExplodingBomb)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::GrassFlagged | Self::BombFlagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::DisplayAdjacentBombs)
    }

    /// Whether a primary click may act on this tile
    pub const fn can_be_mined(self) -> bool {
        matches!(self, Self::Grass | Self::HiddenBomb)
    }

    /// State after placing a flag, `None` when a flag cannot go here
    pub const fn flagged(self) -> Option<Self> {
        match self {
            Self::Grass => Some(Self::GrassFlagged),
            Self::HiddenBomb => Some(Self::BombFlagged),
            _ => None,
        }
    }

    /// State after removing a flag, `None` when there is no flag
    pub const fn unflagged(self) -> Option<Self> {
        match self {
            Self::GrassFlagged => Some(Self::Grass),
            Self::BombFlagged => Some(Self::HiddenBomb),
            _ => None,
        }
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Grass
    }
}

/// Presentation-only sprite choices, rolled when a tile enters a state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderHint {
    pub shade: Option<u8>,
    pub bomb: Option<u8>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    state: TileState,
    adjacent_bombs: u8,
    hint: RenderHint,
}

impl Tile {
    pub const fn state(&self) -> TileState {
        self.state
    }

    pub const fn adjacent_bombs(&self) -> u8 {
        self.adjacent_bombs
    }

    pub const fn hint(&self) -> RenderHint {
        self.hint
    }

    pub(crate) fn set_adjacent_bombs(&mut self, count: u8) {
        self.adjacent_bombs = count;
    }

    /// Moves the tile into `state`, rolling the render hint that goes with it.
    pub(crate) fn enter<R: Rng>(&mut self, state: TileState, rng: &mut R) {
        self.state = state;
        match state {
            TileState::Grass => self.hint = RenderHint::default(),
            TileState::DisplayAdjacentBombs => {
                self.hint.shade = Some(rng.random_range(0..SHADE_VARIANTS));
            }
            TileState::ExplodingBomb => {
                self.hint.bomb = Some(rng.random_range(0..BOMB_VARIANTS));
            }
            _ => {}
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
