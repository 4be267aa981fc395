//! **mazes** is a seedable maze generation and maze analysis library.
//!
//! ```
//! use mazes::generators::{generate, MazeOptions};
//! use mazes::units::{Height, Width};
//!
//! let grid = generate(Width(21), Height(21), &MazeOptions::new(310u32)).unwrap();
//! let rows = grid.to_rows(); // rows[y][x], 1 for a wall and 0 for a passage
//! assert_eq!(rows[0][1], 0);
//! ```

pub mod analysis;
pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_traits;
pub mod pathing;
pub mod rng;
pub mod units;
mod utils;
