use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// The coordinate `steps` cells away in the given direction, or None if that would
    /// go below zero. The upper bounds are the grid's business.
    pub fn offset(&self, dir: CompassPrimary, steps: u32) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(steps).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::South => y.checked_add(steps).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::East => x.checked_add(steps).map(|x| Cartesian2DCoordinate { x, y }),
            CompassPrimary::West => x.checked_sub(steps).map(|x| Cartesian2DCoordinate { x, y }),
        }
    }

    /// Chambers sit on odd coordinates along both axes.
    #[inline(always)]
    pub fn is_chamber(&self) -> bool {
        self.x % 2 == 1 && self.y % 2 == 1
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

/// Order in which the carver lists its candidate chambers.
pub const CARVE_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                   CompassPrimary::South,
                                                   CompassPrimary::West,
                                                   CompassPrimary::East];

/// Clockwise from north, the order braiding lists the walls around a dead end.
pub const CLOCKWISE_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                       CompassPrimary::East,
                                                       CompassPrimary::South,
                                                       CompassPrimary::West];

/// A single grid cell. The numeric codes are what collaborators index into, `1` for a wall
/// and `0` for an open passage.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CellState {
    Wall,
    Passage,
}

impl CellState {
    #[inline(always)]
    pub fn code(self) -> u8 {
        match self {
            CellState::Wall => 1,
            CellState::Passage => 0,
        }
    }

    /// Anything other than `1` is open ground.
    #[inline(always)]
    pub fn from_code(code: u8) -> CellState {
        if code == 1 {
            CellState::Wall
        } else {
            CellState::Passage
        }
    }

    #[inline(always)]
    pub fn is_passage(self) -> bool {
        self == CellState::Passage
    }
}
