use itertools::Itertools;

use crate::cells::{Cartesian2DCoordinate, CellState};
use crate::grid_traits::CellGrid;
use crate::utils::{self, FnvHashSet};

const WALL: char = '#';
const PASSAGE: char = ' ';

pub trait CellDisplay {
    /// The glyph to draw at a cell instead of the plain wall/passage glyph, if any.
    fn render_cell(&self, coord: Cartesian2DCoordinate) -> Option<char>;
}

#[derive(Debug, Clone)]
pub struct StartEndPointsDisplay {
    start: Cartesian2DCoordinate,
    end: Cartesian2DCoordinate,
}

impl StartEndPointsDisplay {
    pub fn new(start: Cartesian2DCoordinate, end: Cartesian2DCoordinate) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }
}

impl CellDisplay for StartEndPointsDisplay {
    fn render_cell(&self, coord: Cartesian2DCoordinate) -> Option<char> {
        if coord == self.start {
            Some('S')
        } else if coord == self.end {
            Some('E')
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}

impl CellDisplay for PathDisplay {
    fn render_cell(&self, coord: Cartesian2DCoordinate) -> Option<char> {
        if self.on_path_coordinates.contains(&coord) {
            Some('.')
        } else {
            None
        }
    }
}

/// One text line per grid row, `#` for walls and a space for passages. The first overlay with
/// something to say about a cell wins. Ragged rows render as far as they go.
pub fn render_ascii<G: CellGrid>(grid: &G, overlays: &[&dyn CellDisplay]) -> String {
    (0..grid.height() as u32)
        .map(|y| {
            (0..)
                .map(|x| Cartesian2DCoordinate::new(x, y))
                .map_while(|coord| grid.cell_at(coord).map(|state| (coord, state)))
                .map(|(coord, state)| {
                    overlays.iter()
                        .find_map(|o| o.render_cell(coord))
                        .unwrap_or(if state == CellState::Passage { PASSAGE } else { WALL })
                })
                .collect::<String>()
        })
        .map(|line| line + "\n")
        .join("")
}
