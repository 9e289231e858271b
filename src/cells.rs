use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

use crate::units::{ColumnIndex, RowIndex, SideLength};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// Arena indices of the structural cells two steps away from a structural cell.
pub type NeighbourIndices = SmallVec<[usize; 4]>;

/// Position of a cell in the bordered maze grid, `x` is the column and `y` the row.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const ALL_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::West,
                                                 CompassPrimary::East,
                                                 CompassPrimary::North,
                                                 CompassPrimary::South];

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.x
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.y
    }

    /// Structural cells sit on an odd column and an odd row. They are the vertices of the maze graph.
    #[inline]
    pub fn is_structural(&self) -> bool {
        self.x % 2 == 1 && self.y % 2 == 1
    }

    /// The cell exactly between this coordinate and `other`.
    ///
    /// Only meaningful for two structural cells that are two steps apart along one axis,
    /// in which case it is the wall (or passage) separating them.
    #[inline]
    pub fn midpoint(&self, other: Cartesian2DCoordinate) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }

    /// Creates a new coordinate offset `steps` cells away in the given direction.
    /// Returns None if the result would fall outside a square grid of `side_length`.
    pub fn offset(&self,
                  direction: CompassPrimary,
                  steps: u32,
                  side_length: SideLength)
                  -> Option<Cartesian2DCoordinate> {

        let SideLength(side) = side_length;
        let (x, y) = (self.x, self.y);
        let fits = |value: u32| (value as usize + steps as usize) < side;

        match direction {
            CompassPrimary::North => {
                if y >= steps {
                    Some(Cartesian2DCoordinate::new(x, y - steps))
                } else {
                    None
                }
            }
            CompassPrimary::South => {
                if fits(y) {
                    Some(Cartesian2DCoordinate::new(x, y + steps))
                } else {
                    None
                }
            }
            CompassPrimary::East => {
                if fits(x) {
                    Some(Cartesian2DCoordinate::new(x + steps, y))
                } else {
                    None
                }
            }
            CompassPrimary::West => {
                if x >= steps {
                    Some(Cartesian2DCoordinate::new(x - steps, y))
                } else {
                    None
                }
            }
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellType {
    Wall,
    Empty,
    Finish,
}

/// One square of the maze grid.
///
/// Equality and hashing only consider the position, never the type or the neighbours.
#[derive(Clone, Debug)]
pub struct Cell {
    coordinate: Cartesian2DCoordinate,
    cell_type: CellType,
    neighbours: NeighbourIndices,
}

impl Cell {
    pub(crate) fn new(coordinate: Cartesian2DCoordinate) -> Cell {
        Cell {
            coordinate,
            cell_type: CellType::Wall,
            neighbours: NeighbourIndices::new(),
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        self.coordinate
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.coordinate.x
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.coordinate.y
    }

    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.cell_type == CellType::Wall
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cell_type == CellType::Empty
    }

    #[inline]
    pub fn is_finish(&self) -> bool {
        self.cell_type == CellType::Finish
    }

    #[inline]
    pub fn is_structural(&self) -> bool {
        self.coordinate.is_structural()
    }

    #[inline]
    pub(crate) fn neighbour_indices(&self) -> &[usize] {
        &self.neighbours
    }

    pub(crate) fn set_neighbours(&mut self, neighbours: NeighbourIndices) {
        self.neighbours = neighbours;
    }

    pub(crate) fn change_type_to(&mut self, cell_type: CellType) {
        self.cell_type = cell_type;
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Cell) -> bool {
        self.coordinate == other.coordinate
    }
}
impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinate.hash(state);
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn cells_equal_by_position_only() {
        let mut a = Cell::new(gc(3, 5));
        let b = Cell::new(gc(3, 5));
        let c = Cell::new(gc(5, 3));

        a.change_type_to(CellType::Empty);
        a.set_neighbours(NeighbourIndices::from_slice(&[7]));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn new_cells_are_walls_without_neighbours() {
        let cell = Cell::new(gc(1, 1));
        assert!(cell.is_wall());
        assert!(!cell.is_empty());
        assert!(!cell.is_finish());
        assert!(cell.neighbour_indices().is_empty());
    }

    #[test]
    fn changing_cell_type() {
        let mut cell = Cell::new(gc(1, 1));
        cell.change_type_to(CellType::Empty);
        assert!(cell.is_empty());
        cell.change_type_to(CellType::Finish);
        assert!(cell.is_finish());
        assert_eq!(cell.cell_type(), CellType::Finish);
    }

    #[test]
    fn structural_coordinates() {
        assert!(gc(1, 1).is_structural());
        assert!(gc(3, 7).is_structural());
        assert!(!gc(0, 1).is_structural());
        assert!(!gc(1, 2).is_structural());
        assert!(!gc(2, 2).is_structural());
    }

    #[test]
    fn midpoints() {
        assert_eq!(gc(1, 1).midpoint(gc(3, 1)), gc(2, 1));
        assert_eq!(gc(3, 1).midpoint(gc(1, 1)), gc(2, 1));
        assert_eq!(gc(5, 3).midpoint(gc(5, 5)), gc(5, 4));
    }

    #[test]
    fn offsets_within_grid() {
        let side = SideLength(7);
        let c = gc(3, 3);
        assert_eq!(c.offset(CompassPrimary::North, 2, side), Some(gc(3, 1)));
        assert_eq!(c.offset(CompassPrimary::South, 2, side), Some(gc(3, 5)));
        assert_eq!(c.offset(CompassPrimary::East, 2, side), Some(gc(5, 3)));
        assert_eq!(c.offset(CompassPrimary::West, 2, side), Some(gc(1, 3)));
        assert_eq!(c.offset(CompassPrimary::West, 1, side), Some(gc(2, 3)));
    }

    #[test]
    fn offsets_outside_grid() {
        let side = SideLength(7);
        assert_eq!(gc(1, 1).offset(CompassPrimary::North, 2, side), None);
        assert_eq!(gc(1, 1).offset(CompassPrimary::West, 2, side), None);
        assert_eq!(gc(5, 5).offset(CompassPrimary::South, 2, side), None);
        assert_eq!(gc(5, 5).offset(CompassPrimary::East, 2, side), None);
        assert_eq!(gc(5, 5).offset(CompassPrimary::East, 1, side), Some(gc(6, 5)));
        assert_eq!(gc(0, 0).offset(CompassPrimary::North, 1, side), None);
    }

    #[test]
    fn coordinate_conversions() {
        assert_eq!(Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(2), RowIndex(4)),
                   gc(2, 4));
        assert_eq!(Cartesian2DCoordinate::from((4, 2)), gc(4, 2));
    }
}
