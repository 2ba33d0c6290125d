use ndarray::Array2;
use rand::Rng;

use crate::*;

/// Scatters `mines` bombs over grass tiles by rejection sampling.
pub(crate) fn place_mines<R: Rng>(tiles: &mut Array2<Tile>, mines: CellCount, rng: &mut R) {
    let (rows, cols) = tiles.dim();
    let total_tiles = tiles.len();

    // a full board would only terminate by luck
    if usize::from(mines) >= total_tiles {
        if usize::from(mines) > total_tiles {
            log::warn!(
                "Board already full, requested {} mines but only fits {}",
                mines,
                total_tiles
            );
        }
        for tile in tiles.iter_mut() {
            tile.enter(TileState::HiddenBomb, rng);
        }
        return;
    }

    let mut placed: CellCount = 0;
    let mut attempts: u32 = 0;
    while placed < mines {
        attempts += 1;
        let row = rng.random_range(0..rows);
        let col = rng.random_range(0..cols);
        let tile = &mut tiles[[row, col]];

        if tile.state() != TileState::HiddenBomb {
            tile.enter(TileState::HiddenBomb, rng);
            placed += 1;
        }
    }
    log::debug!("Placed {} mines in {} attempts", placed, attempts);
}

/// Stores the count of mined neighbors on every tile.
pub(crate) fn count_adjacent_bombs(tiles: &mut Array2<Tile>) {
    let (rows, cols) = tiles.dim();
    for row in 0..rows {
        for col in 0..cols {
            let coords = (row as Coord, col as Coord);
            let count = tiles
                .iter_neighbors(coords)
                .filter(|&pos| tiles[pos.to_nd_index()].state() == TileState::HiddenBomb)
                .count();
            // at most 8 neighbors
            tiles[coords.to_nd_index()].set_adjacent_bombs(count as u8);
        }
    }
}
