use docopt::Docopt;
use log::{debug, info};
use maze_carver::{
    grid_displays::{PathDisplay, StartEndPointsDisplay, WallsDisplay, CellDisplay},
    pathing,
    Maze,
};
use rand::{SeedableRng, rngs::StdRng};
use serde_derive::Deserialize;
use smallvec::smallvec;
use std::{
    io,
    io::prelude::*,
    fs::File,
};

const USAGE: &str = "Maze Carver

Usage:
    maze_carver_driver -h | --help
    maze_carver_driver [--size=<n>] [--seed=<s>] [--show-path | --mark-start-end] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --size=<n>             Odd number of cells along one side of the maze, not counting the outer wall [default: 13].
    --seed=<s>             Seed for the random walk that carves the maze. A random seed is used if not given.
    --show-path            Mark the route from the player start to the finish with '.'.
    --mark-start-end       Draw an 'S' (player start) and 'E' (finish).
    --text-out=<path>      Output file path for the textual rendering of the maze. Printed to stdout if not given.
    --save-edges=<path>    Serialize the maze passages to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_size: usize,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_mark_start_end: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_carver::errors::Error, ::maze_carver::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());
    debug!("{:?}", args);

    let maze = build_maze(&args)?;
    info!("Carved {:?}", maze);

    let text = render_maze(&maze, &args);
    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    Ok(())
}

fn build_maze(args: &MazeArgs) -> Result<Maze> {
    let maze = if let Some(seed) = args.flag_seed {
        Maze::with_rng(args.flag_size, &mut StdRng::seed_from_u64(seed))
    } else {
        Maze::new(args.flag_size)
    };
    maze.chain_err(|| format!("Failed to build a maze of size {}", args.flag_size))
}

/// Decide how the cells should be drawn: the route to the finish, start and end markers or
/// just the walls.
fn render_maze(maze: &Maze, args: &MazeArgs) -> String {

    let display: Box<dyn CellDisplay> = if args.flag_show_path {
        match pathing::solution(maze) {
            Some(path) => Box::new(PathDisplay::new(&path)),
            None => Box::new(WallsDisplay),
        }
    } else if args.flag_mark_start_end {
        Box::new(StartEndPointsDisplay::new(smallvec![maze.player_start()],
                                            smallvec![maze.finish_coordinate()]))
    } else {
        Box::new(WallsDisplay)
    };

    maze.render_with(display.as_ref())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let graph = maze.passage_graph();

    let mut graph_data = String::new();
    graph_data.push_str(graph.node_count().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(graph.edge_count().to_string().as_ref());
    graph_data.push('\n');

    for edge in graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
