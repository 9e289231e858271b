use log::{debug, trace};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::cells::{Cartesian2DCoordinate, CellType};
use crate::grid::Maze;

/// The structural cell the carving walk starts from, the one nearest the middle of the maze.
///
/// Half the size is bumped up to the next odd number when it is even so that it lands on a
/// structural cell.
pub fn start_coordinate(size: usize) -> Cartesian2DCoordinate {
    let mut middle = size / 2;
    if middle % 2 == 0 {
        middle += 1;
    }
    Cartesian2DCoordinate::new(middle as u32, middle as u32)
}

/// The goal of the maze, the bottom right structural cell.
#[inline]
pub fn finish_coordinate(size: usize) -> Cartesian2DCoordinate {
    Cartesian2DCoordinate::new(size as u32, size as u32)
}

/// Number of cells on an odd column and odd row in a maze of `size`.
#[inline]
pub fn structural_cells_count(size: usize) -> usize {
    let per_side = size / 2 + 1;
    per_side * per_side
}

/// Carve a perfect maze into a walled grid with the Aldous-Broder random walk.
///
/// Starting from the middle structural cell, repeatedly step to a uniformly chosen neighbour.
/// Whenever the step lands on a cell that was never visited the wall between the two cells is
/// knocked down. Stepping onto an already carved cell changes nothing, so no cycles are ever
/// introduced and every structural cell ends up with exactly one passage leading into it
/// from the cell the walk came from.
/// The walk stops as soon as every structural cell has been visited.
///
/// Returns the number of steps walked.
///
/// Panics if the walk reaches a structural cell without neighbours, which a grid built from an
/// odd size never has while there are cells left to carve.
pub(crate) fn random_walk<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R) -> usize {

    let start = start_coordinate(maze.size());
    let mut current_index = maze.grid_coordinate_to_index(start)
        .expect("start coordinate lies inside the grid");
    maze.cell_at_index_mut(current_index).change_type_to(CellType::Empty);

    let mut remaining = structural_cells_count(maze.size()) - 1;
    let mut steps = 0;

    while remaining > 0 {
        let current = maze.cell_at_index(current_index);
        let current_coord = current.coordinate();
        let next_index = *current.neighbour_indices()
            .choose(rng)
            .unwrap_or_else(|| panic!("Structural cell {:?} has no neighbours.", current_coord));

        if maze.cell_at_index(next_index).is_wall() {
            let next_coord = maze.cell_at_index(next_index).coordinate();
            let wall_index = maze.grid_coordinate_to_index(current_coord.midpoint(next_coord))
                .expect("midpoint of two cells lies inside the grid");

            maze.cell_at_index_mut(next_index).change_type_to(CellType::Empty);
            maze.cell_at_index_mut(wall_index).change_type_to(CellType::Empty);
            remaining -= 1;
            trace!("Carved passage {:?} -> {:?}", current_coord, next_coord);
        }

        current_index = next_index;
        steps += 1;
    }

    debug!("Random walk from {:?} carved a maze of size {} in {} steps",
           start, maze.size(), steps);
    steps
}

/// Turn the bottom right structural cell into the finish, whatever it was before.
pub(crate) fn mark_finish(maze: &mut Maze) {
    let finish = finish_coordinate(maze.size());
    if let Some(index) = maze.grid_coordinate_to_index(finish) {
        maze.cell_at_index_mut(index).change_type_to(CellType::Finish);
    }
}


#[cfg(test)]
mod tests {

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn carved(size: usize, seed: u64) -> (Maze, usize) {
        let mut maze = Maze::walled(size).expect("odd maze size rejected");
        let mut rng = StdRng::seed_from_u64(seed);
        let steps = random_walk(&mut maze, &mut rng);
        (maze, steps)
    }

    #[test]
    fn start_is_nearest_odd_middle() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(start_coordinate(1), gc(1, 1));
        assert_eq!(start_coordinate(3), gc(1, 1));
        assert_eq!(start_coordinate(5), gc(3, 3));
        assert_eq!(start_coordinate(7), gc(3, 3));
        assert_eq!(start_coordinate(9), gc(5, 5));
        assert_eq!(start_coordinate(13), gc(7, 7));
        for size in (1..100).step_by(2) {
            let start = start_coordinate(size);
            assert!(start.is_structural());
            assert!(start.x as usize <= size);
        }
    }

    #[test]
    fn structural_counts() {
        assert_eq!(structural_cells_count(1), 1);
        assert_eq!(structural_cells_count(3), 4);
        assert_eq!(structural_cells_count(5), 9);
        assert_eq!(structural_cells_count(13), 49);
    }

    #[test]
    fn walled_grid_has_nothing_carved() {
        let maze = Maze::walled(9).unwrap();
        assert!(maze.iter().all(|cell| cell.is_wall()));
        assert_eq!(maze.passages_count(), 0);
    }

    #[test]
    fn walk_visits_every_structural_cell() {
        let (maze, steps) = carved(11, 17);
        assert!(maze.iter().filter(|cell| cell.is_structural()).all(|cell| cell.is_empty()));
        assert!(steps >= structural_cells_count(11) - 1);
    }

    #[test]
    fn walk_opens_one_passage_per_visited_cell() {
        for seed in 0..10 {
            let (maze, _) = carved(9, seed);
            assert_eq!(maze.passages_count(), structural_cells_count(9) - 1);

            let carved_count = maze.iter().filter(|cell| cell.is_empty()).count();
            assert_eq!(carved_count, 2 * structural_cells_count(9) - 1);
        }
    }

    #[test]
    fn walk_never_touches_the_border() {
        let (maze, _) = carved(7, 99);
        assert!(maze.iter()
            .filter(|cell| maze.is_border(cell.coordinate()))
            .all(|cell| cell.is_wall()));
    }

    #[test]
    fn walk_on_single_cell_maze_takes_no_steps() {
        let (maze, steps) = carved(1, 0);
        assert_eq!(steps, 0);
        assert!(maze.block_at(1, 1).unwrap().is_empty());
    }

    #[test]
    fn same_seed_same_walk() {
        let (a, a_steps) = carved(15, 2024);
        let (b, b_steps) = carved(15, 2024);
        assert_eq!(a_steps, b_steps);
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn walk_follows_the_rng() {
        let mut walks = (0..20).map(|seed| carved(13, seed)).map(|(maze, steps)| (maze.render(), steps));
        let (first_render, first_steps) = walks.next().unwrap();
        assert!(walks.any(|(render, steps)| render != first_render || steps != first_steps));
    }

    #[test]
    fn finish_overwrites_carved_cell() {
        let (mut maze, _) = carved(5, 8);
        assert!(maze.block_at(5, 5).unwrap().is_empty());
        mark_finish(&mut maze);
        assert!(maze.block_at(5, 5).unwrap().is_finish());
        assert_eq!(maze.iter().filter(|cell| cell.is_finish()).count(), 1);
    }

    #[test]
    fn finish_on_single_cell_maze_replaces_start() {
        let (mut maze, _) = carved(1, 0);
        mark_finish(&mut maze);
        assert!(maze.block_at(1, 1).unwrap().is_finish());
        assert_eq!(maze.iter().filter(|cell| cell.is_empty()).count(), 0);
    }
}
