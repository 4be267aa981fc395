use error_chain::bail;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CellState};
use crate::errors::*;
use crate::grid_displays;
use crate::grid_traits::{CellGrid, RawRows};
use crate::units::{Height, Width};


/// A rectangular maze grid, row-major, every cell a wall or a passage.
///
/// The grid is an owned buffer. Whoever holds it may force individual cells with `set`,
/// but the generator's guarantees only cover cells nobody has overridden since.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {}, height: {}", self.width, self.height)
    }
}

impl Grid {
    /// A grid with every cell set to `state`.
    pub fn filled(width: Width, height: Height, state: CellState) -> Grid {
        Grid {
            width: width.0,
            height: height.0,
            cells: vec![state; width.0 * height.0],
        }
    }

    /// Parse the `1` (wall) / `0` (passage) row encoding.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Grid> {
        if !RawRows::new(rows).is_rectangular() {
            let reason = match rows.iter().position(|r| r.len() != rows[0].len()) {
                Some(row) => format!("row {} does not match the width of row 0", row),
                None => String::from("no cells"),
            };
            bail!(ErrorKind::MalformedGrid(reason));
        }

        Ok(Grid {
            width: rows[0].len(),
            height: rows.len(),
            cells: rows.iter()
                .flat_map(|row| row.iter().map(|code| CellState::from_code(*code)))
                .collect(),
        })
    }

    /// The row-major `1`/`0` encoding, indexed `rows[row][column]`.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|state| state.code()).collect())
            .collect()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn get(&self, coord: Cartesian2DCoordinate) -> Option<CellState> {
        self.grid_coordinate_to_index(coord).map(|i| self.cells[i])
    }

    /// Overwrite one cell. Returns false, changing nothing, if the coordinate is off the grid.
    #[inline]
    pub fn set(&mut self, coord: Cartesian2DCoordinate, state: CellState) -> bool {
        if let Some(i) = self.grid_coordinate_to_index(coord) {
            self.cells[i] = state;
            true
        } else {
            false
        }
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Odd-coordinate cells in row-major order.
    pub fn chambers(&self) -> impl Iterator<Item = Cartesian2DCoordinate> {
        let (width, height) = (self.width as u32, self.height as u32);
        (1..height).step_by(2)
            .flat_map(move |y| (1..width).step_by(2).map(move |x| Cartesian2DCoordinate::new(x, y)))
    }

    /// Is the coordinate a chamber strictly inside the outer wall.
    #[inline]
    pub fn is_interior_chamber(&self, coord: Cartesian2DCoordinate) -> bool {
        coord.is_chamber() && (coord.x as usize) + 1 < self.width &&
        (coord.y as usize) + 1 < self.height
    }
}

impl CellGrid for Grid {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn cell_at(&self, coord: Cartesian2DCoordinate) -> Option<CellState> {
        self.get(coord)
    }

    fn coordinates(&self) -> Vec<Cartesian2DCoordinate> {
        let width = self.width;
        (0..self.cells.len())
            .map(|i| Cartesian2DCoordinate::new((i % width) as u32, (i / width) as u32))
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", grid_displays::render_ascii(self, &[]))
    }
}
