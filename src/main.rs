use docopt::Docopt;
use log::{info, LevelFilter};
use serde_derive::Deserialize;
use mazes::{
    analysis::{self, AnalyzeOptions},
    generators::{self, MazeOptions},
    grid::Grid,
    grid_displays::{self, CellDisplay, PathDisplay, StartEndPointsDisplay},
    pathing,
    rng::Seed,
    units::{Height, Width},
};
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--width=<w>] [--height=<h>] [--seed=<s>] [--braid=<b>] [--numeric] [--show-path] [--text-out=<path>] [--debug]

Options:
    -h --help              Show this screen.
    --width=<w>            Odd number of columns in the maze grid [default: 21].
    --height=<h>           Odd number of rows in the maze grid [default: 21].
    --seed=<s>             Maze seed. Digits are a numeric seed, anything else is hashed text. Time based if not given.
    --braid=<b>            Probability in [0, 1] of knocking a loop through each dead end [default: 0].
    --numeric              Print the grid as rows of 1 (wall) and 0 (passage) instead of drawing it.
    --show-path            Mark the shortest route from the entrance to the exit.
    --text-out=<path>      Write the maze to this file instead of standard output.
    --debug                Log maze statistics and a preview.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<String>,
    flag_braid: f64,
    flag_numeric: bool,
    flag_show_path: bool,
    flag_text_out: String,
    flag_debug: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazes::errors::Error, ::mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    init_logging(args.flag_debug);

    let seed = args.flag_seed.as_ref().map_or_else(Seed::from_time, |s| Seed::parse(s));
    let options = MazeOptions::new(seed.clone()).with_braid_factor(args.flag_braid);
    let (width, height) = (Width(args.flag_width), Height(args.flag_height));

    let maze_grid = generators::generate(width, height, &options)
        .chain_err(|| "Refusing to start without a valid maze")?;
    info!("Generated {}x{} maze, seed {}", width.0, height.0, seed);

    if args.flag_debug {
        let stats = analysis::analyze(&maze_grid,
                                      &AnalyzeOptions {
                                          entrance: Some(generators::entrance(width, height)),
                                          exit: Some(generators::exit(width, height)),
                                          seed: Some(seed),
                                      });
        analysis::log_stats(&stats);
    }

    let text = if args.flag_numeric {
        numeric_rows(&maze_grid)
    } else {
        draw_maze(&maze_grid, width, height, args.flag_show_path)
    };

    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn numeric_rows(maze_grid: &Grid) -> String {
    maze_grid.to_rows()
        .iter()
        .map(|row| row.iter().map(|code| code.to_string()).collect::<String>() + "\n")
        .collect()
}

fn draw_maze(maze_grid: &Grid, width: Width, height: Height, show_path: bool) -> String {
    let entrance = generators::entrance(width, height);
    let exit = generators::exit(width, height);
    let marks = StartEndPointsDisplay::new(entrance, exit);

    let path = if show_path {
        pathing::Distances::new(maze_grid, entrance)
            .and_then(|distances| pathing::shortest_path(maze_grid, &distances, exit))
            .map(|path| PathDisplay::new(&path))
    } else {
        None
    };

    let mut overlays: Vec<&dyn CellDisplay> = vec![&marks];
    if let Some(ref path_display) = path {
        overlays.push(path_display);
    }
    grid_displays::render_ascii(maze_grid, &overlays)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
