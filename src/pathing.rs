use std::collections::VecDeque;

use itertools::Itertools;
use petgraph::algo;
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid_traits::CellGrid;
use crate::utils;


/// Breadth first flood fill distances from one start passage to every passage reachable from it.
///
/// Every step costs the same, so the first time the flood touches a cell is its shortest
/// distance and the distance matrix doubles as the visited set.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    width: usize,
    distances: Vec<Option<u32>>,
    max_distance: u32,
}

impl Distances {
    /// None if the start is off the grid or not a passage.
    pub fn new<G: CellGrid>(grid: &G, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {
        flood(grid, start_coordinate, None).map(|(distances, _)| distances)
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.index(coord).and_then(|i| self.distances[i])
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .positions(|d| *d == Some(furthest_distance))
            .map(|i| self.coordinate(i))
            .collect()
    }

    #[inline]
    fn index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        let i = coord.y as usize * self.width + coord.x as usize;
        if (coord.x as usize) < self.width && i < self.distances.len() {
            Some(i)
        } else {
            None
        }
    }

    #[inline]
    fn coordinate(&self, index: usize) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new((index % self.width) as u32, (index / self.width) as u32)
    }
}

/// Level order flood from `start`, stopping early once `stop_at` comes off the queue.
/// Also returns whether `stop_at` was dequeued.
fn flood<G: CellGrid>(grid: &G,
                      start: Cartesian2DCoordinate,
                      stop_at: Option<Cartesian2DCoordinate>)
                      -> Option<(Distances, bool)> {
    if !grid.is_passage(start) {
        return None;
    }

    // Ragged grids get a matrix as wide as their widest row.
    let width = grid.coordinates().iter().map(|c| c.x as usize + 1).max().unwrap_or(0);
    let mut distances = Distances {
        start_coordinate: start,
        width,
        distances: vec![None; width * grid.height()],
        max_distance: 0,
    };

    let start_index = distances.index(start)?;
    distances.distances[start_index] = Some(0);
    let mut frontier = VecDeque::new();
    frontier.push_back((start, 0u32));

    while let Some((cell, distance)) = frontier.pop_front() {
        if distance > distances.max_distance {
            distances.max_distance = distance;
        }
        if Some(cell) == stop_at {
            return Some((distances, true));
        }

        for neighbour in grid.open_neighbours(cell) {
            if let Some(i) = distances.index(neighbour) {
                if distances.distances[i].is_none() {
                    distances.distances[i] = Some(distance + 1);
                    frontier.push_back((neighbour, distance + 1));
                }
            }
        }
    }

    Some((distances, false))
}

/// Shortest number of steps between two passages, None if there is no route.
pub fn distance_between<G: CellGrid>(grid: &G,
                                     from: Cartesian2DCoordinate,
                                     to: Cartesian2DCoordinate)
                                     -> Option<u32> {
    match flood(grid, from, Some(to)) {
        Some((distances, true)) => distances.distance_from_start_to(to),
        _ => None,
    }
}

/// Walk back from `end_point` to the start of the distances, always stepping to an open neighbour
/// one closer to the start. The path runs start first.
pub fn shortest_path<G: CellGrid>(grid: &G,
                                  distances_from_start: &Distances,
                                  end_point: Cartesian2DCoordinate)
                                  -> Option<Vec<Cartesian2DCoordinate>> {
    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut current_coord = end_point;
    let mut path = vec![end_point];

    while current_distance > 0 {
        let closer = grid.open_neighbours(current_coord)
            .into_iter()
            .find(|c| distances_from_start.distance_from_start_to(*c) == Some(current_distance - 1));

        match closer {
            Some(coord) => {
                current_coord = coord;
                current_distance -= 1;
                path.push(coord);
            }
            // The distances do not belong to this grid.
            None => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// Shape of the graph formed by passages and the openings between them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PassageTopology {
    /// Separate groups of passages with no route between them.
    pub components: usize,
    /// Whether any passage can be walked around in a circle, i.e. more than one route exists
    /// between some pair of cells.
    pub has_loops: bool,
}

pub fn passage_topology<G: CellGrid>(grid: &G) -> PassageTopology {
    let passages = grid.coordinates()
        .into_iter()
        .filter(|c| grid.is_passage(*c))
        .collect::<Vec<_>>();

    let mut graph = UnGraph::<Cartesian2DCoordinate, ()>::with_capacity(passages.len(),
                                                                          passages.len() * 2);
    let nodes = passages.iter()
        .map(|c| (*c, graph.add_node(*c)))
        .collect::<utils::FnvHashMap<Cartesian2DCoordinate, NodeIndex>>();

    // Only look east and south so each opening is added once.
    for (coord, node) in &nodes {
        for neighbour in &[coord.offset(CompassPrimary::East, 1),
                           coord.offset(CompassPrimary::South, 1)] {
            if let Some(other) = neighbour.and_then(|n| nodes.get(&n)) {
                graph.add_edge(*node, *other, ());
            }
        }
    }

    PassageTopology {
        components: algo::connected_components(&graph),
        has_loops: algo::is_cyclic_undirected(&graph),
    }
}
