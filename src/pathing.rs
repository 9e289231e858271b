// Flood fill distances over the open cells of a carved maze.
//
// Walls block movement, every other cell (carved passages and the finish) can be stepped onto
// from its four direct neighbours. A carved maze is a spanning tree, so the route between any two
// open cells is unique and the flood fill gives its length.

use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::{ALL_DIRECTIONS, Cartesian2DCoordinate, CoordinateSmallVec};
use crate::grid::Maze;
use crate::utils::{self, FnvHashMap};


#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Steps from `start_coordinate` to every open cell reachable from it.
    ///
    /// None if the start is outside the maze or is a wall.
    pub fn new(maze: &Maze, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {

        if maze.cell(start_coordinate).map_or(true, |cell| cell.is_wall()) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(maze.iter().filter(|c| !c.is_wall()).count());
        distances.insert(start_coordinate, 0);

        // Every step costs one, so the first time a cell is reached is along its shortest route
        // and the distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        let mut distance = 0;
        while !frontier.is_empty() {

            max = distance;
            distance += 1;

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                for open_coord in open_neighbours(maze, *cell_coord) {
                    if !distances.contains_key(&open_coord) {
                        distances.insert(open_coord, distance);
                        new_frontier.push(open_coord);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// Every reachable cell at the maximum distance, in row-major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted_by_key(|coord| (coord.y, coord.x))
            .collect()
    }
}

/// Cells one step away from `coord` that are not walls.
fn open_neighbours(maze: &Maze, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
    ALL_DIRECTIONS.iter()
        .filter_map(|dir| coord.offset(*dir, 1, maze.side_length()))
        .filter(|neighbour| maze.cell(*neighbour).map_or(false, |cell| !cell.is_wall()))
        .collect()
}

/// The route from the start of `distances_from_start` to `end_point`, both ends included.
///
/// None if `end_point` cannot be reached.
pub fn shortest_path(maze: &Maze,
                     distances_from_start: &Distances,
                     end_point: Cartesian2DCoordinate)
                     -> Option<Vec<Cartesian2DCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_distance > 0 {
        // Some neighbour is always one step closer to the start, otherwise the flood fill
        // would never have reached this cell.
        let closer = open_neighbours(maze, current_coord)
            .iter()
            .cloned()
            .find(|coord| {
                distances_from_start.distance_from_start_to(*coord) == Some(current_distance - 1)
            })?;

        current_coord = closer;
        current_distance -= 1;
        path.push(current_coord);
    }

    path.reverse();
    Some(path)
}

/// The route a player takes from their start cell to the finish.
pub fn solution(maze: &Maze) -> Option<Vec<Cartesian2DCoordinate>> {
    let distances = Distances::new(maze, maze.player_start())?;
    shortest_path(maze, &distances, maze.finish_coordinate())
}

/// The longest route through the maze.
///
/// Measured twice: the furthest cell from any open cell is one end of the longest path,
/// and the furthest cell from that end is the other.
pub fn longest_path(maze: &Maze) -> Option<Vec<Cartesian2DCoordinate>> {
    let first_distances = Distances::new(maze, maze.player_start())?;
    let long_path_start = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(maze, long_path_start)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(maze, &distances_from_start, end_point)
}
