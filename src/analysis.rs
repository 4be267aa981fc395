//! Diagnostics for generated mazes: counts, dead ends, the entrance to exit distance and a text
//! preview. Analysis never fails, bad input just gets a less complete report.

use log::{debug, info, log_enabled, warn, Level};
use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::Grid;
use crate::grid_displays::{render_ascii, StartEndPointsDisplay};
use crate::grid_traits::{CellGrid, RawRows};
use crate::pathing::{distance_between, passage_topology, PassageTopology};
use crate::rng::Seed;
use crate::units::{PassagesCount, WallsCount};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalyzeOptions {
    /// Found on the boundary when not given.
    pub entrance: Option<Cartesian2DCoordinate>,
    /// Found on the boundary when not given.
    pub exit: Option<Cartesian2DCoordinate>,
    /// Only reported, the analysis does not depend on it.
    pub seed: Option<Seed>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MazeStats {
    pub width: usize,
    pub height: usize,
    pub seed: Option<Seed>,
    pub entrance: Cartesian2DCoordinate,
    pub exit: Cartesian2DCoordinate,
    pub walls: WallsCount,
    pub passages: PassagesCount,
    /// Passages inside the outer wall with a single open neighbour.
    pub dead_ends: usize,
    /// Steps from entrance to exit, None when the exit cannot be reached.
    pub shortest_path: Option<u32>,
    /// Skipped for malformed input.
    pub topology: Option<PassageTopology>,
    /// The rows were empty or ragged.
    pub malformed: bool,
    pub ascii: String,
}

impl MazeStats {
    /// Shortest path with -1 standing in for unreachable.
    pub fn shortest_path_or_sentinel(&self) -> i64 {
        self.shortest_path.map_or(-1, i64::from)
    }
}

impl fmt::Display for MazeStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let seed = self.seed.as_ref().map_or(String::from("n/a"), |s| s.to_string());
        writeln!(f, "Maze Info")?;
        writeln!(f, "  size:          {} x {}", self.width, self.height)?;
        writeln!(f, "  seed:          {}", seed)?;
        writeln!(f, "  entrance:      {}", self.entrance)?;
        writeln!(f, "  exit:          {}", self.exit)?;
        writeln!(f, "  walls:         {}", self.walls.0)?;
        writeln!(f, "  passages:      {}", self.passages.0)?;
        writeln!(f, "  dead ends:     {}", self.dead_ends)?;
        write!(f, "  shortest path: {}", self.shortest_path_or_sentinel())?;
        if let Some(topology) = self.topology {
            write!(f,
                   "\n  components:    {}\n  loops:         {}",
                   topology.components,
                   topology.has_loops)?;
        }
        if self.malformed {
            write!(f, "\n  (malformed grid, best effort)")?;
        }
        Ok(())
    }
}

/// Analyze a well formed grid.
pub fn analyze<G: CellGrid>(grid: &G, options: &AnalyzeOptions) -> MazeStats {
    collect_stats(grid, options, false)
}

/// Analyze raw `1`/`0` rows as collaborators hold them. Empty or ragged rows still get counts,
/// dead ends and a preview, but no shortest path or topology.
pub fn analyze_rows(rows: &[Vec<u8>], options: &AnalyzeOptions) -> MazeStats {
    match Grid::from_rows(rows) {
        Ok(grid) => analyze(&grid, options),
        Err(e) => {
            warn!("{}, analysis is best effort", e);
            collect_stats(&RawRows::new(rows), options, true)
        }
    }
}

/// Write the stats through the log facade, the preview only at debug level.
pub fn log_stats(stats: &MazeStats) {
    info!("{}", stats);
    if log_enabled!(Level::Debug) {
        debug!("ASCII preview\n{}", stats.ascii);
    }
}

/// Passages on the outer edge in the order they are met: along x checking the top then the bottom
/// row, then along y checking the left then the right column. Corners can be listed twice.
pub fn boundary_openings<G: CellGrid>(grid: &G) -> Vec<Cartesian2DCoordinate> {
    let (width, height) = (grid.width() as u32, grid.height() as u32);
    let mut openings = vec![];
    if width == 0 || height == 0 {
        return openings;
    }

    for x in 0..width {
        for &y in &[0, height - 1] {
            let c = Cartesian2DCoordinate::new(x, y);
            if grid.is_passage(c) {
                openings.push(c);
            }
        }
    }
    for y in 0..height {
        for &x in &[0, width - 1] {
            let c = Cartesian2DCoordinate::new(x, y);
            if grid.is_passage(c) {
                openings.push(c);
            }
        }
    }
    openings
}

fn collect_stats<G: CellGrid>(grid: &G, options: &AnalyzeOptions, malformed: bool) -> MazeStats {
    let (width, height) = (grid.width(), grid.height());

    let (entrance, exit) = match (options.entrance, options.exit) {
        (Some(entrance), Some(exit)) => (entrance, exit),
        (entrance, exit) => {
            let openings = boundary_openings(grid);
            let fallback_exit = Cartesian2DCoordinate::new((width as u32).saturating_sub(2),
                                                           (height as u32).saturating_sub(1));
            (entrance.or_else(|| openings.get(0).cloned())
                     .unwrap_or_else(|| Cartesian2DCoordinate::new(1, 0)),
             exit.or_else(|| openings.get(1).cloned()).unwrap_or(fallback_exit))
        }
    };

    let (walls, passages) = grid.walls_and_passages();
    let dead_ends = grid.coordinates()
        .into_iter()
        .filter(|c| !grid.is_boundary(*c) && grid.is_dead_end(*c))
        .count();

    let (shortest_path, topology) = if malformed {
        (None, None)
    } else {
        (distance_between(grid, entrance, exit), Some(passage_topology(grid)))
    };

    let marks = StartEndPointsDisplay::new(entrance, exit);
    let ascii = render_ascii(grid, &[&marks]);

    MazeStats {
        width,
        height,
        seed: options.seed.clone(),
        entrance,
        exit,
        walls,
        passages,
        dead_ends,
        shortest_path,
        topology,
        malformed,
        ascii,
    }
}
