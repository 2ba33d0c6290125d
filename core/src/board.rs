use alloc::vec::Vec;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::generator::{count_adjacent_bombs, place_mines};
use crate::*;

/// Grid of tiles with its mine layout, flag budget and cleared-tile count.
///
/// Invariants:
/// - exactly `mines` tiles are mines; mine positions only change on [`Board::reset`]
/// - `flags_left == mines - flagged tiles`
/// - `tiles_cleared == flagged tiles + revealed tiles`
#[derive(Clone, Debug)]
pub struct Board<R = SmallRng> {
    config: BoardConfig,
    tiles: Array2<Tile>,
    flags_left: CellCount,
    tiles_cleared: CellCount,
    rng: R,
}

impl Board<SmallRng> {
    pub fn from_seed(config: BoardConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Board<R> {
    /// Builds a board and places `config.mines` mines with `rng`.
    pub fn new(config: BoardConfig, rng: R) -> Self {
        let mut board = Self::blank(config, rng);
        board.add_bombs();
        board
    }

    /// Builds a board with mines at exactly `mine_coords`.
    ///
    /// The mine count of the returned board is the number of distinct coordinates given, later resets place that
    /// many mines at random.
    pub fn with_mines(config: BoardConfig, mine_coords: &[Coord2], rng: R) -> Result<Self> {
        let mut board = Self::blank(config, rng);
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.tiles[coords.to_nd_index()].enter(TileState::HiddenBomb, &mut board.rng);
        }
        let mines = board.tiles.iter().filter(|tile| tile.state().is_mine()).count();
        board.config.mines = mines as CellCount;
        board.flags_left = board.config.flags();
        count_adjacent_bombs(&mut board.tiles);
        Ok(board)
    }

    fn blank(config: BoardConfig, rng: R) -> Self {
        Self {
            config,
            tiles: Array2::default(config.size.to_nd_index()),
            flags_left: config.flags(),
            tiles_cleared: 0,
            rng,
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn flags_left(&self) -> CellCount {
        self.flags_left
    }

    pub fn tiles_cleared(&self) -> CellCount {
        self.tiles_cleared
    }

    /// Panics when `coords` is outside the board.
    pub fn tile(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_nd_index()]
    }

    /// Panics when `coords` is outside the board.
    pub fn tile_state(&self, coords: Coord2) -> TileState {
        self.tile(coords).state()
    }

    /// Whether a primary click on this tile either reveals it or sets off a mine.
    ///
    /// Panics when `coords` is outside the board.
    pub fn can_tile_be_mined(&self, coords: Coord2) -> bool {
        self.tile_state(coords).can_be_mined()
    }

    pub fn is_position_valid(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.config.size;
        row < rows && col < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_position_valid(coords) {
            Ok(coords)
        } else {
            Err(BoardError::InvalidCoords)
        }
    }

    /// Every tile is either flagged or revealed.
    ///
    /// Flags count towards this regardless of whether they sit on a mine, so a board can be completed by flagging
    /// grass as well.
    pub fn is_fully_cleared(&self) -> bool {
        self.tiles_cleared == self.config.total_tiles()
    }

    /// Positions and tiles in row-major order.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, col), &tile)| ((row as Coord, col as Coord), tile))
    }

    /// Turns every tile back to grass and scatters a fresh set of mines.
    pub fn reset(&mut self) {
        self.flags_left = self.config.flags();
        self.tiles_cleared = 0;
        for tile in self.tiles.iter_mut() {
            tile.reset();
        }
        self.add_bombs();
        log::debug!("Board reset with {} mines", self.config.mines);
    }

    pub fn place_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.flags_left == 0 {
            return Ok(MarkOutcome::NoChange);
        }

        let tile = &mut self.tiles[coords.to_nd_index()];
        let Some(next) = tile.state().flagged() else {
            return Ok(MarkOutcome::NoChange);
        };
        tile.enter(next, &mut self.rng);
        self.flags_left -= 1;
        self.tiles_cleared += 1;
        log::debug!("Flag placed at {:?}, {} left", coords, self.flags_left);

        Ok(MarkOutcome::Changed)
    }

    pub fn clear_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        let tile = &mut self.tiles[coords.to_nd_index()];
        let Some(next) = tile.state().unflagged() else {
            return Ok(MarkOutcome::NoChange);
        };
        tile.enter(next, &mut self.rng);
        self.flags_left += 1;
        self.tiles_cleared -= 1;
        log::debug!("Flag cleared at {:?}, {} left", coords, self.flags_left);

        Ok(MarkOutcome::Changed)
    }

    /// Reveals a grass tile, cascading through every connected zero tile and its numbered border.
    ///
    /// The cascade also opens flagged grass it runs into; those flags go back to the budget. Returns how many tiles
    /// were revealed.
    pub fn reveal_tile(&mut self, coords: Coord2) -> Result<CellCount> {
        use TileState::*;

        let coords = self.validate_coords(coords)?;
        if self.tiles[coords.to_nd_index()].state() != Grass {
            return Err(BoardError::NotRevealable);
        }

        let mut revealed: CellCount = 0;
        let mut to_visit = Vec::from([coords]);

        while let Some(visit_coords) = to_visit.pop() {
            let tile = &mut self.tiles[visit_coords.to_nd_index()];
            match tile.state() {
                Grass => self.tiles_cleared += 1,
                // already counted as cleared when flagged
                GrassFlagged => self.flags_left += 1,
                _ => continue,
            }
            tile.enter(DisplayAdjacentBombs, &mut self.rng);
            revealed += 1;
            log::trace!(
                "Revealed tile at {:?}, adjacent bombs: {}",
                visit_coords,
                tile.adjacent_bombs()
            );

            if tile.adjacent_bombs() == 0 {
                let tiles = &self.tiles;
                to_visit.extend(
                    tiles
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| matches!(tiles[pos.to_nd_index()].state(), Grass | GrassFlagged)),
                );
            }
        }

        log::debug!("Reveal at {:?} opened {} tiles", coords, revealed);
        Ok(revealed)
    }

    /// Sets off every mine that is neither flagged nor already exploded, returning how many changed.
    pub fn explode_bombs(&mut self) -> CellCount {
        let mut exploded: CellCount = 0;
        for tile in self.tiles.iter_mut() {
            if tile.state() == TileState::HiddenBomb {
                tile.enter(TileState::ExplodingBomb, &mut self.rng);
                exploded += 1;
            }
        }
        log::debug!("Exploded {} bombs", exploded);
        exploded
    }

    fn add_bombs(&mut self) {
        place_mines(&mut self.tiles, self.config.mines, &mut self.rng);
        count_adjacent_bombs(&mut self.tiles);
    }
}
