//! **maze-carver** carves randomized perfect mazes into odd sized square grids and exposes
//! the finished grid, read only, to whatever draws it.
//!
//! ```
//! use maze_carver::{ErrorKind, Maze};
//!
//! assert!(matches!(Maze::new(4).unwrap_err().kind(), ErrorKind::InvalidSize(4)));
//!
//! let maze = Maze::new(13).unwrap();
//! assert!(maze.block_at(13, 13).unwrap().is_finish());
//! assert!(maze.block_at(-1, 0).is_none());
//! print!("{}", maze.render());
//! ```

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod pathing;
pub mod units;
mod utils;

pub use crate::cells::{Cartesian2DCoordinate, Cell, CellType};
pub use crate::errors::{Error, ErrorKind};
pub use crate::grid::Maze;
