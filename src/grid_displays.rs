use crate::cells::{Cartesian2DCoordinate, Cell, CoordinateSmallVec};
use crate::utils::{self, FnvHashSet};

const WALL: char = 'X';
const OPEN: char = ' ';

/// Chooses the character each cell is drawn with in a text dump of a maze.
pub trait CellDisplay {
    fn render_cell(&self, cell: &Cell) -> char;
}

#[inline]
fn walls_only(cell: &Cell) -> char {
    if cell.is_wall() {
        WALL
    } else {
        OPEN
    }
}

/// Walls and nothing else. Empty and finish cells look the same.
#[derive(Debug, Copy, Clone)]
pub struct WallsDisplay;

impl CellDisplay for WallsDisplay {
    fn render_cell(&self, cell: &Cell) -> char {
        walls_only(cell)
    }
}


#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl CellDisplay for PathDisplay {
    fn render_cell(&self, cell: &Cell) -> char {
        if self.on_path_coordinates.contains(&cell.coordinate()) {
            '.'
        } else {
            walls_only(cell)
        }
    }
}


#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}
impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}
impl CellDisplay for StartEndPointsDisplay {
    fn render_cell(&self, cell: &Cell) -> char {

        let coord = cell.coordinate();
        let contains_coordinate =
            |coordinates: &CoordinateSmallVec| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates) {
            'S'
        } else if contains_coordinate(&self.end_coordinates) {
            'E'
        } else {
            walls_only(cell)
        }
    }
}


#[cfg(test)]
mod tests {

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use smallvec::smallvec;

    use super::*;
    use crate::grid::Maze;
    use crate::pathing;

    fn maze() -> Maze {
        Maze::with_rng(7, &mut StdRng::seed_from_u64(31)).unwrap()
    }

    #[test]
    fn start_and_end_markers() {
        let maze = maze();
        let display = StartEndPointsDisplay::new(smallvec![maze.player_start()],
                                                 smallvec![maze.finish_coordinate()]);
        let text = maze.render_with(&display);
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[1].chars().nth(1), Some('S'));
        assert_eq!(lines[7].chars().nth(7), Some('E'));
        assert_eq!(text.matches('S').count(), 1);
        assert_eq!(text.matches('E').count(), 1);
    }

    #[test]
    fn path_overlay_keeps_walls() {
        let maze = maze();
        let path = pathing::solution(&maze).expect("finish unreachable");
        let text = maze.render_with(&PathDisplay::new(&path));

        assert_eq!(text.matches('.').count(), path.len());
        assert_eq!(text.matches('X').count(), maze.render().matches('X').count());
    }

    #[test]
    fn plain_display_matches_render() {
        let maze = maze();
        assert_eq!(maze.render_with(&WallsDisplay), maze.render());
    }
}
