use ndarray::Array2;

/// Single grid axis used for row/column counts and positions.
pub type Coord = u8;

/// Count type used for mine, flag and tile counts.
pub type CellCount = u16;

/// Grid position `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // grids are always built from a `Coord2` shape
        NeighborIter::new(index, (rows as Coord, cols as Coord))
    }
}

/// Walks the 3x3 window around a cell in row-major order, clipped at the grid edges.
/// The cell itself is skipped.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    first: Coord2,
    last: Coord2,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    pub(crate) fn new((row, col): Coord2, (rows, cols): Coord2) -> Self {
        if rows == 0 || cols == 0 {
            return Self {
                center: (row, col),
                first: (0, 0),
                last: (0, 0),
                cursor: None,
            };
        }
        let first = (row.saturating_sub(1), col.saturating_sub(1));
        let last = (row.saturating_add(1).min(rows - 1), col.saturating_add(1).min(cols - 1));
        Self {
            center: (row, col),
            first,
            last,
            cursor: Some(first),
        }
    }

    fn step(&self, (row, col): Coord2) -> Option<Coord2> {
        if col < self.last.1 {
            Some((row, col + 1))
        } else if row < self.last.0 {
            Some((row + 1, self.first.1))
        } else {
            None
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pos) = self.cursor {
            self.cursor = self.step(pos);
            if pos != self.center {
                return Some(pos);
            }
        }
        None
    }
}
