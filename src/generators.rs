use error_chain::bail;
use log::{debug, trace};
use rand::RngCore;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary, CARVE_DIRECTIONS,
                   CLOCKWISE_DIRECTIONS};
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_traits::CellGrid;
use crate::rng::{index_from_bits, unit_from_bits, Mulberry32, Seed};
use crate::units::{Height, Width};

pub const DEFAULT_WIDTH: Width = Width(21);
pub const DEFAULT_HEIGHT: Height = Height(21);

const MIN_DIMENSION: usize = 3;

/// Where carving starts, the top left chamber.
pub const START: Cartesian2DCoordinate = Cartesian2DCoordinate { x: 1, y: 1 };

/// Everything besides the size that decides what maze comes out.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeOptions {
    pub seed: Seed,
    /// Chance that any one dead end gets knocked through into a loop. 0 keeps the maze perfect,
    /// anything at or above 1 braids every dead end it can.
    pub braid_factor: f64,
}

impl MazeOptions {
    pub fn new<S: Into<Seed>>(seed: S) -> MazeOptions {
        MazeOptions {
            seed: seed.into(),
            braid_factor: 0.0,
        }
    }

    pub fn with_braid_factor(mut self, braid_factor: f64) -> MazeOptions {
        self.braid_factor = braid_factor;
        self
    }
}

impl Default for MazeOptions {
    fn default() -> MazeOptions {
        MazeOptions::new(Seed::from_time())
    }
}

/// The opening in the top wall.
#[inline]
pub fn entrance(_: Width, _: Height) -> Cartesian2DCoordinate {
    Cartesian2DCoordinate::new(1, 0)
}

/// The opening in the bottom wall. Clamps to 0 for sizes too small to generate.
#[inline]
pub fn exit(width: Width, height: Height) -> Cartesian2DCoordinate {
    Cartesian2DCoordinate::new((width.0 as u32).saturating_sub(2),
                               (height.0 as u32).saturating_sub(1))
}

/// Generate a maze on a fresh `width` x `height` grid.
///
/// Walls sit on even coordinates and chambers on odd ones, so both dimensions have to be odd
/// and at least 3. The result is a perfect maze, one route between any two passages, unless
/// `braid_factor` opens up some loops. The entrance at `(1, 0)` and the exit at
/// `(width - 2, height - 1)` are always open.
///
/// The same options and size always give the same grid.
pub fn generate(width: Width, height: Height, options: &MazeOptions) -> Result<Grid> {
    if !is_valid_dimension(width.0) || !is_valid_dimension(height.0) {
        bail!(ErrorKind::InvalidDimensions(width.0, height.0));
    }

    let mut rng = Mulberry32::from_seed_value(&options.seed);
    let mut grid = Grid::filled(width, height, CellState::Wall);

    let carved = recursive_backtracker(&mut grid, &mut rng);
    debug!("Carved {}x{} maze from seed {}: {} walls knocked through",
           width.0,
           height.0,
           options.seed,
           carved);

    if options.braid_factor > 0.0 {
        let braided = braid(&mut grid, &mut rng, options.braid_factor);
        debug!("Braided {} dead ends (factor {})", braided, options.braid_factor);
    }

    grid.set(entrance(width, height), CellState::Passage);
    grid.set(exit(width, height), CellState::Passage);

    Ok(grid)
}

#[inline]
fn is_valid_dimension(d: usize) -> bool {
    d >= MIN_DIMENSION && d % 2 == 1 && d <= u32::max_value() as usize
}

/// Apply the recursive backtracker maze generation algorithm to an all wall grid.
///
/// Depth first random walk over the chambers, stepping two cells at a time and knocking down the
/// wall in between. When the walk reaches a chamber with no unvisited chamber next to it we back
/// up the stack until we find one that has. Every chamber is pushed once, so it finishes once the
/// stack runs dry and every chamber hangs off a single spanning tree.
///
/// Returns how many walls between chambers were opened, always one less than the chamber count.
pub fn recursive_backtracker(grid: &mut Grid, rng: &mut Mulberry32) -> usize {
    grid.set(START, CellState::Passage);
    let mut stack = vec![START];
    let mut carved = 0;

    while let Some(&current) = stack.last() {
        let candidates = unvisited_chambers(grid, current);

        if candidates.is_empty() {
            stack.pop();
        } else {
            let (wall, chamber) = candidates[rng.below(candidates.len())];
            grid.set(wall, CellState::Passage);
            grid.set(chamber, CellState::Passage);
            trace!("carve {} -> {}", current, chamber);
            carved += 1;
            stack.push(chamber);
        }
    }

    carved
}

/// (wall between, chamber beyond) pairs for every still walled chamber two steps away.
fn unvisited_chambers(grid: &Grid,
                      coord: Cartesian2DCoordinate)
                      -> SmallVec<[(Cartesian2DCoordinate, Cartesian2DCoordinate); 4]> {
    let (width, height) = (grid.width() as u32, grid.height() as u32);
    let inside = |c: &Cartesian2DCoordinate| {
        c.x >= 1 && c.y >= 1 && c.x <= width - 2 && c.y <= height - 2
    };

    CARVE_DIRECTIONS.iter()
        .filter_map(|dir| {
            coord.offset(*dir, 2)
                .filter(|c| inside(c) && grid.get(*c) == Some(CellState::Wall))
                .and_then(|chamber| coord.offset(*dir, 1).map(|wall| (wall, chamber)))
        })
        .collect()
}

/// Knock loops into a maze by opening walls at dead ends.
///
/// One pass over the chambers in row-major order. Each chamber draws a roll and a pick from the
/// generator whether it is a dead end or not, which keeps the random stream lined up between
/// different braid factors: raising the factor can only open more walls, never fewer.
/// A dead end whose roll is under `braid_factor` uses its pick to choose one of its walls, and
/// that wall is opened through to the chamber beyond. An outer wall picked this way is opened
/// on its own, making an extra way out of the maze.
///
/// Returns the number of walls opened.
pub fn braid(grid: &mut Grid, rng: &mut Mulberry32, braid_factor: f64) -> usize {
    let chambers = grid.chambers().collect::<Vec<_>>();
    let mut braided = 0;

    for chamber in chambers {
        let roll = unit_from_bits(rng.next_u32());
        let pick = rng.next_u32();

        if !(grid.is_dead_end(chamber) && roll < braid_factor) {
            continue;
        }

        let walls = CLOCKWISE_DIRECTIONS.iter()
            .cloned()
            .filter(|dir| grid.neighbour_at_direction(chamber, *dir)
                              .map_or(false, |c| !grid.is_passage(c)))
            .collect::<SmallVec<[CompassPrimary; 4]>>();
        if walls.is_empty() {
            continue;
        }

        let dir = walls[index_from_bits(pick, walls.len())];
        if let Some(wall) = grid.neighbour_at_direction(chamber, dir) {
            grid.set(wall, CellState::Passage);
            if let Some(beyond) = chamber.offset(dir, 2).filter(|c| grid.is_valid_coordinate(*c)) {
                grid.set(beyond, CellState::Passage);
            }
            trace!("braid {} through {}", chamber, wall);
            braided += 1;
        }
    }

    braided
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::pathing::{distance_between, passage_topology};
    use quickcheck::{quickcheck, TestResult};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn rows_text(grid: &Grid) -> Vec<String> {
        grid.to_rows()
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn chambers_count(width: usize, height: usize) -> usize {
        ((width - 1) / 2) * ((height - 1) / 2)
    }

    /// Small odd dimension from an arbitrary byte, 3 to 41.
    fn odd_dimension(n: u8) -> usize {
        (n as usize % 20) * 2 + 3
    }

    #[test]
    fn even_dimensions_are_rejected() {
        for &(w, h) in &[(20, 21), (21, 20), (4, 4)] {
            match generate(Width(w), Height(h), &MazeOptions::new(1u32)) {
                Err(e) => match *e.kind() {
                    ErrorKind::InvalidDimensions(ew, eh) => assert_eq!((ew, eh), (w, h)),
                    ref kind => panic!("unexpected error {:?}", kind),
                },
                Ok(_) => panic!("{}x{} should not generate", w, h),
            }
        }
    }

    #[test]
    fn tiny_dimensions_are_rejected() {
        assert!(generate(Width(1), Height(21), &MazeOptions::new(1u32)).is_err());
        assert!(generate(Width(21), Height(1), &MazeOptions::new(1u32)).is_err());
        assert!(generate(Width(3), Height(3), &MazeOptions::new(1u32)).is_ok());
    }

    #[test]
    fn five_by_five_seed_one() {
        let g = generate(Width(5), Height(5), &MazeOptions::new(1u32)).unwrap();
        assert_eq!(g.get(gc(1, 1)), Some(CellState::Passage));
        assert_eq!(g.get(gc(1, 0)), Some(CellState::Passage));
        assert_eq!(g.get(gc(3, 4)), Some(CellState::Passage));
        for &corner in &[gc(0, 0), gc(4, 0), gc(0, 4), gc(4, 4)] {
            assert_eq!(g.get(corner), Some(CellState::Wall));
        }
        assert!(distance_between(&g, gc(1, 0), gc(3, 4)).is_some());
        assert_eq!(rows_text(&g), vec!["10111", "10001", "11101", "10001", "11101"]);
    }

    #[test]
    fn numeric_seeds_carve_shareable_mazes() {
        let g = generate(Width(7), Height(7), &MazeOptions::new(1u32)).unwrap();
        assert_eq!(rows_text(&g),
                   vec!["1011111", "1000101", "1110101", "1000101", "1011101", "1000001",
                        "1111101"]);

        let g = generate(Width(9), Height(7), &MazeOptions::new(42u32)).unwrap();
        assert_eq!(rows_text(&g),
                   vec!["101111111", "100010001", "111011101", "101000001", "101111101",
                        "100000001", "111111101"]);
    }

    #[test]
    fn text_seeds_are_hashed() {
        let g = generate(Width(7), Height(5), &MazeOptions::new("maze")).unwrap();
        assert_eq!(rows_text(&g),
                   vec!["1011111", "1010001", "1011101", "1000001", "1111101"]);
    }

    #[test]
    fn single_chamber_maze() {
        let g = generate(Width(3), Height(3), &MazeOptions::new(7u32).with_braid_factor(1.0))
            .unwrap();
        assert_eq!(rows_text(&g), vec!["101", "101", "101"]);
    }

    #[test]
    fn deterministic() {
        fn p(w: u8, h: u8, seed: u32, braid: u8) -> bool {
            let (w, h) = (odd_dimension(w), odd_dimension(h));
            let options = MazeOptions::new(seed).with_braid_factor(braid as f64 / 255.0);
            generate(Width(w), Height(h), &options).unwrap() ==
            generate(Width(w), Height(h), &options).unwrap()
        }
        quickcheck(p as fn(u8, u8, u32, u8) -> bool);
    }

    #[test]
    fn perfect_mazes_are_spanning_trees() {
        fn p(w: u8, h: u8, seed: u32) -> bool {
            let (w, h) = (odd_dimension(w), odd_dimension(h));
            let mut grid = Grid::filled(Width(w), Height(h), CellState::Wall);
            let mut rng = Mulberry32::new(seed);
            let chambers = chambers_count(w, h);

            let carved = recursive_backtracker(&mut grid, &mut rng);
            let (_, passages) = grid.walls_and_passages();
            let topology = passage_topology(&grid);

            carved == chambers - 1 && passages.0 == chambers + carved &&
            topology.components == 1 && !topology.has_loops
        }
        quickcheck(p as fn(u8, u8, u32) -> bool);
    }

    #[test]
    fn perfect_maze_has_one_route_from_entrance_to_exit() {
        fn p(w: u8, h: u8, seed: u32) -> bool {
            let (w, h) = (odd_dimension(w), odd_dimension(h));
            let g = generate(Width(w), Height(h), &MazeOptions::new(seed)).unwrap();
            let topology = passage_topology(&g);
            let (_, passages) = g.walls_and_passages();

            topology.components == 1 && !topology.has_loops &&
            passages.0 == 2 * chambers_count(w, h) - 1 + 2 &&
            distance_between(&g, entrance(Width(w), Height(h)), exit(Width(w), Height(h)))
                .is_some()
        }
        quickcheck(p as fn(u8, u8, u32) -> bool);
    }

    #[test]
    fn entrance_and_exit_are_always_open() {
        fn p(w: u8, h: u8, seed: u32, braid: u8) -> bool {
            let (w, h) = (odd_dimension(w), odd_dimension(h));
            let options = MazeOptions::new(seed).with_braid_factor(braid as f64 / 255.0);
            let g = generate(Width(w), Height(h), &options).unwrap();
            g.is_passage(gc(1, 0)) && g.is_passage(gc(w as u32 - 2, h as u32 - 1))
        }
        quickcheck(p as fn(u8, u8, u32, u8) -> bool);
    }

    #[test]
    fn braiding_only_opens_walls() {
        fn p(w: u8, h: u8, seed: u32, low: u8, high: u8) -> TestResult {
            if low >= high {
                return TestResult::discard();
            }
            let (w, h) = (odd_dimension(w), odd_dimension(h));
            let gen = |braid: u8| {
                let options = MazeOptions::new(seed).with_braid_factor(braid as f64 / 255.0);
                generate(Width(w), Height(h), &options).unwrap()
            };
            let perfect = gen(0);
            let less = gen(low);
            let more = gen(high);

            let passages = |g: &Grid| (g.walls_and_passages().1).0;
            let keeps_perfect_passages = perfect.coordinates()
                .into_iter()
                .all(|c| !perfect.is_passage(c) || more.is_passage(c));

            TestResult::from_bool(passages(&more) >= passages(&less) &&
                                  passages(&less) >= passages(&perfect) &&
                                  keeps_perfect_passages &&
                                  passage_topology(&more).components == 1)
        }
        quickcheck(p as fn(u8, u8, u32, u8, u8) -> TestResult);
    }

    #[test]
    fn full_braiding_leaves_few_dead_ends() {
        let perfect = generate(Width(21), Height(21), &MazeOptions::new(310u32)).unwrap();
        let braided = generate(Width(21),
                               Height(21),
                               &MazeOptions::new(310u32).with_braid_factor(1.0))
            .unwrap();
        let dead_ends = |g: &Grid| g.chambers().filter(|c| g.is_dead_end(*c)).count();

        assert!(dead_ends(&perfect) > 0);
        assert!(dead_ends(&braided) < dead_ends(&perfect));
        assert!(passage_topology(&braided).has_loops);
    }

    #[test]
    fn braiding_can_open_the_outer_wall() {
        // Perfect: 10111 10001 11101 10001 11101
        let options = MazeOptions::new(1u32).with_braid_factor(1.0);
        let g = generate(Width(5), Height(5), &options).unwrap();
        assert_eq!(rows_text(&g), vec!["10111", "00001", "11101", "10001", "10101"]);
        assert!(g.is_passage(gc(0, 1)));
        assert!(g.is_passage(gc(1, 4)));
        assert_eq!(passage_topology(&g).components, 1);
    }

    #[test]
    fn braiding_only_breaches_next_to_a_chamber() {
        fn p(w: u8, h: u8, seed: u32) -> bool {
            let (w, h) = (odd_dimension(w), odd_dimension(h));
            let options = MazeOptions::new(seed).with_braid_factor(1.0);
            let g = generate(Width(w), Height(h), &options).unwrap();
            let (right, bottom) = (w as u32 - 1, h as u32 - 1);
            let corners = [gc(0, 0), gc(right, 0), gc(0, bottom), gc(right, bottom)];
            g.coordinates()
                .into_iter()
                .filter(|c| g.is_boundary(*c) && g.is_passage(*c))
                .all(|c| !corners.contains(&c) && g.open_neighbours(c).len() == 1)
        }
        quickcheck(p as fn(u8, u8, u32) -> bool);
    }

    #[test]
    fn braid_factor_is_clamped() {
        let gen = |braid: f64| {
            generate(Width(21), Height(21), &MazeOptions::new(310u32).with_braid_factor(braid))
                .unwrap()
        };
        let (none, full) = (gen(0.0), gen(1.0));
        assert_ne!(none, full);
        assert_eq!(gen(2.0), full);
        assert_eq!(gen(f64::INFINITY), full);
        assert_eq!(gen(-0.5), none);
        assert_eq!(gen(f64::NAN), none);
    }

    #[test]
    fn exit_of_tiny_sizes_does_not_underflow() {
        assert_eq!(exit(Width(0), Height(0)), gc(0, 0));
        assert_eq!(exit(Width(1), Height(1)), gc(0, 0));
        assert_eq!(exit(Width(21), Height(21)), gc(19, 20));
    }

    #[test]
    fn time_seeded_options_generate() {
        let options = MazeOptions::default();
        assert_eq!(options.braid_factor, 0.0);
        match options.seed {
            Seed::Number(_) => {}
            ref seed => panic!("time seed should be numeric, got {}", seed),
        }
        let g = generate(DEFAULT_WIDTH, DEFAULT_HEIGHT, &options).unwrap();
        assert_eq!(g.size(), 21 * 21);
    }
}
