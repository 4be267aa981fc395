use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary, CoordinateSmallVec,
                   CLOCKWISE_DIRECTIONS};
use crate::units::{PassagesCount, WallsCount};

/// Read access to a grid of wall/passage cells.
///
/// Implemented by the generator's own `Grid` and by raw row data handed in from
/// elsewhere, which may not even be rectangular. A coordinate is valid when there is a cell
/// stored at it.
pub trait CellGrid {
    /// Nominal width, i.e. the length of the first row.
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn cell_at(&self, coord: Cartesian2DCoordinate) -> Option<CellState>;

    /// Row-major walk over every cell actually present.
    fn coordinates(&self) -> Vec<Cartesian2DCoordinate>;

    #[inline]
    fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell_at(coord).is_some()
    }

    #[inline]
    fn is_passage(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell_at(coord).map_or(false, CellState::is_passage)
    }

    fn is_boundary(&self, coord: Cartesian2DCoordinate) -> bool {
        let (x, y) = (coord.x as usize, coord.y as usize);
        x == 0 || y == 0 || x + 1 >= self.width() || y + 1 >= self.height()
    }

    /// Valid cells directly to the North, East, South or West.
    fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CLOCKWISE_DIRECTIONS.iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    fn neighbour_at_direction(&self,
                              coord: Cartesian2DCoordinate,
                              direction: CompassPrimary)
                              -> Option<Cartesian2DCoordinate> {
        coord.offset(direction, 1).filter(|c| self.is_valid_coordinate(*c))
    }

    /// Neighbours that are open passages.
    fn open_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|c| self.is_passage(*c))
            .collect()
    }

    /// A passage with a single way in or out.
    fn is_dead_end(&self, coord: Cartesian2DCoordinate) -> bool {
        self.is_passage(coord) && self.open_neighbours(coord).len() == 1
    }

    fn walls_and_passages(&self) -> (WallsCount, PassagesCount) {
        let (walls, passages) = self.coordinates()
            .into_iter()
            .filter_map(|c| self.cell_at(c))
            .fold((0, 0), |(w, p), state| match state {
                CellState::Wall => (w + 1, p),
                CellState::Passage => (w, p + 1),
            });
        (WallsCount(walls), PassagesCount(passages))
    }
}

/// Borrowed `1`/`0` row data exactly as collaborators hold it. Rows may be ragged.
#[derive(Debug, Copy, Clone)]
pub struct RawRows<'a> {
    rows: &'a [Vec<u8>],
}

impl<'a> RawRows<'a> {
    pub fn new(rows: &'a [Vec<u8>]) -> RawRows<'a> {
        RawRows { rows }
    }

    /// True when there is at least one row, no row is empty and every row has the same length.
    pub fn is_rectangular(&self) -> bool {
        match self.rows.first() {
            Some(first) => !first.is_empty() && self.rows.iter().all(|r| r.len() == first.len()),
            None => false,
        }
    }
}

impl<'a> CellGrid for RawRows<'a> {
    #[inline]
    fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    #[inline]
    fn height(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    fn cell_at(&self, coord: Cartesian2DCoordinate) -> Option<CellState> {
        self.rows
            .get(coord.y as usize)
            .and_then(|row| row.get(coord.x as usize))
            .map(|code| CellState::from_code(*code))
    }

    fn coordinates(&self) -> Vec<Cartesian2DCoordinate> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                (0..row.len()).map(move |x| Cartesian2DCoordinate::new(x as u32, y as u32))
            })
            .collect()
    }
}
