use log::debug;
use petgraph::{Graph, Undirected};
use rand::Rng;
use std::convert::TryFrom;
use std::fmt;
use std::slice;

use crate::cells::{ALL_DIRECTIONS, Cartesian2DCoordinate, Cell, CoordinateSmallVec, NeighbourIndices};
use crate::errors::{ErrorKind, Result};
use crate::generators;
use crate::grid_displays::{CellDisplay, WallsDisplay};
use crate::units::{ColumnIndex, EdgesCount, NodesCount, RowIndex, SideLength};
use crate::utils;

/// Where a player is placed when the maze is walked, the top left structural cell.
pub const PLAYER_START: Cartesian2DCoordinate = Cartesian2DCoordinate { x: 1, y: 1 };

/// Graph of the carved maze: one node per structural cell, one edge per opened wall.
pub type PassageGraph = Graph<Cartesian2DCoordinate, (), Undirected>;

/// A perfect maze carved into an odd sized square grid surrounded by a wall border.
///
/// The grid holds `(size + 2) * (size + 2)` cells in row-major order. Once built the maze
/// cannot be mutated through the public API.
#[derive(Clone)]
pub struct Maze {
    size: usize,
    cells: Vec<Cell>,
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Maze :: size: {}, cells: {}, passages: {}",
               self.size, self.cells.len(), self.passages_count())
    }
}

impl Maze {
    /// Build and carve a maze using the thread local random number generator.
    pub fn new(size: usize) -> Result<Maze> {
        Maze::with_rng(size, &mut rand::thread_rng())
    }

    /// Build and carve a maze, drawing every random choice from `rng`.
    ///
    /// A seeded `rng` always produces the same maze for the same `size`.
    pub fn with_rng<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Maze> {
        let mut maze = Maze::walled(size)?;
        generators::random_walk(&mut maze, rng);
        generators::mark_finish(&mut maze);
        Ok(maze)
    }

    /// A fully walled grid with the structural cells' neighbours wired up, nothing carved yet.
    pub(crate) fn walled(size: usize) -> Result<Maze> {
        if size % 2 != 1 {
            return Err(ErrorKind::InvalidSize(size).into());
        }

        let mut maze = Maze {
            size,
            cells: Vec::new(),
        };
        maze.fill_with_walls();
        maze.wire_neighbours();
        debug!("Built {0}x{0} walled grid for maze size {1}", maze.side_length().0, size);

        Ok(maze)
    }

    fn fill_with_walls(&mut self) {
        let SideLength(side) = self.side_length();
        self.cells.reserve_exact(side * side);
        for row in 0..side {
            for column in 0..side {
                let coord = Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(column),
                                                                           RowIndex(row));
                self.cells.push(Cell::new(coord));
            }
        }
    }

    fn wire_neighbours(&mut self) {
        let side_length = self.side_length();
        for index in 0..self.cells.len() {
            let coord = self.cells[index].coordinate();
            if !coord.is_structural() {
                continue;
            }
            let neighbour_indices = ALL_DIRECTIONS.iter()
                .filter_map(|dir| coord.offset(*dir, 2, side_length))
                .filter_map(|neighbour| self.grid_coordinate_to_index(neighbour))
                .collect::<NeighbourIndices>();
            self.cells[index].set_neighbours(neighbour_indices);
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells along one side of the grid, including the two border walls.
    #[inline]
    pub fn side_length(&self) -> SideLength {
        SideLength(self.size + 2)
    }

    /// Number of structural cells and the number of passages joining them in a perfect maze.
    pub fn structural_graph_size(&self) -> (NodesCount, EdgesCount) {
        let nodes = generators::structural_cells_count(self.size);
        (NodesCount(nodes), EdgesCount(nodes - 1))
    }

    /// The cell at `column` and `row`, or None if that position is outside the grid.
    pub fn block_at(&self, column: isize, row: isize) -> Option<&Cell> {
        match (u32::try_from(column), u32::try_from(row)) {
            (Ok(column), Ok(row)) => self.cell(Cartesian2DCoordinate::new(column, row)),
            _ => None,
        }
    }

    #[inline]
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// All the cells, row by row.
    #[inline]
    pub fn iter(&self) -> slice::Iter<Cell> {
        self.cells.iter()
    }

    /// Structural cells two steps away from `coord` that a passage could lead to.
    /// Empty for non structural or invalid coordinates.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        self.cell(coord)
            .map(|cell| {
                cell.neighbour_indices()
                    .iter()
                    .map(|&index| self.cells[index].coordinate())
                    .collect()
            })
            .unwrap_or_else(CoordinateSmallVec::new)
    }

    #[inline]
    pub fn start_coordinate(&self) -> Cartesian2DCoordinate {
        generators::start_coordinate(self.size)
    }

    #[inline]
    pub fn finish_coordinate(&self) -> Cartesian2DCoordinate {
        generators::finish_coordinate(self.size)
    }

    #[inline]
    pub fn player_start(&self) -> Cartesian2DCoordinate {
        PLAYER_START
    }

    /// Is the coordinate on the outer wall that surrounds the maze?
    pub fn is_border(&self, coord: Cartesian2DCoordinate) -> bool {
        let last = self.size as u32 + 1;
        coord.x == 0 || coord.y == 0 || coord.x == last || coord.y == last
    }

    /// Count of walls between structural cells that were knocked down.
    pub fn passages_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| self.is_midpoint(cell.coordinate()) && !cell.is_wall())
            .count()
    }

    /// Debug dump of the maze, one line per column: `X` for a wall, a space for anything else.
    ///
    /// Line `c` holds the cells `(c, 0)` to `(c, size + 1)`.
    pub fn render(&self) -> String {
        self.render_with(&WallsDisplay)
    }

    pub fn render_with(&self, display: &dyn CellDisplay) -> String {
        let SideLength(side) = self.side_length();
        let mut output = String::with_capacity(side * (side + 1));
        for column in 0..side {
            for row in 0..side {
                let index = row * side + column;
                output.push(display.render_cell(&self.cells[index]));
            }
            output.push('\n');
        }
        output
    }

    /// Undirected graph of the passages between structural cells.
    ///
    /// Nodes are added in row-major order. Every structural cell is a node, whether carved or not.
    pub fn passage_graph(&self) -> PassageGraph {
        let (NodesCount(nodes), EdgesCount(edges)) = self.structural_graph_size();
        let mut graph = PassageGraph::with_capacity(nodes, edges);
        let mut node_indices = utils::fnv_hashmap(nodes);

        for cell in self.cells.iter().filter(|cell| cell.is_structural()) {
            let _ = node_indices.insert(cell.coordinate(), graph.add_node(cell.coordinate()));
        }

        for (index, cell) in self.cells.iter().enumerate().filter(|&(_, cell)| cell.is_structural()) {
            // Each wall is shared by two cells, only look at it from the lower index side
            for &neighbour_index in cell.neighbour_indices().iter().filter(|&&n| n > index) {
                let neighbour = self.cells[neighbour_index].coordinate();
                let is_open = self.cell(cell.coordinate().midpoint(neighbour))
                    .map_or(false, |midpoint| !midpoint.is_wall());

                if is_open {
                    if let (Some(&a), Some(&b)) = (node_indices.get(&cell.coordinate()),
                                                   node_indices.get(&neighbour)) {
                        let _ = graph.add_edge(a, b, ());
                    }
                }
            }
        }

        graph
    }

    /// Convert a grid coordinate to its index in the row-major cell arena.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        let SideLength(side) = self.side_length();
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < side && y < side {
            Some(y * side + x)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn cell_at_index(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    #[inline]
    pub(crate) fn cell_at_index_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    fn is_midpoint(&self, coord: Cartesian2DCoordinate) -> bool {
        !self.is_border(coord) && (coord.x % 2) != (coord.y % 2)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl<'a> IntoIterator for &'a Maze {
    type Item = &'a Cell;
    type IntoIter = slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
