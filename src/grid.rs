//! Maze grid data module.
//!
//! This module contains the [`Grid`] struct and the small value types used to address it: cell
//! states, positions and movement directions.

use color_eyre::eyre::{ensure, Result};

/// State of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Impassable cell.
    Wall,
    /// Walkable cell.
    Open,
}

/// Grid coordinate with the origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column index, growing to the right.
    pub x: usize,
    /// Row index, growing downwards.
    pub y: usize,
}

impl Position {
    /// Builds a position from its column and row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position `distance` cells away in the given direction.
    ///
    /// Only underflow is checked here; the upper bound depends on the grid and is enforced by
    /// [`Grid::cell`]. `None` means the position would leave the grid through its top or left
    /// edge.
    #[must_use]
    pub const fn offset(self, direction: Direction, distance: isize) -> Option<Self> {
        let (dx, dy) = direction.delta();
        let Some(x) = self.x.checked_add_signed(dx * distance) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy * distance) else {
            return None;
        };

        Some(Self { x, y })
    }

    /// Returns the adjacent position in the given direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        self.offset(direction, 1)
    }
}

/// Axis-aligned movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Away from row zero.
    Down,
    /// Towards column zero.
    Left,
    /// Away from column zero.
    Right,
}

impl Direction {
    /// All four directions in a fixed order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the unit `(dx, dy)` delta of the direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Fixed-size, row-major maze grid.
///
/// This structure stores the state of every cell of the labyrinth. Its dimensions never change
/// after construction and are always at least one cell in each direction, so every grid has a
/// top-left start cell and a bottom-right goal cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Cell states, one row after another.
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid of the given dimensions with every cell set to [`Cell::Wall`].
    ///
    /// # Errors
    ///
    /// This function returns an error if either dimension is zero, as a grid without cells has
    /// neither a start nor a goal.
    pub fn filled(width: usize, height: usize) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "maze dimensions must be positive, got {width}x{height}"
        );

        Ok(Self {
            width,
            height,
            cells: vec![Cell::Wall; width * height],
        })
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the bottom-right corner of the grid.
    #[must_use]
    pub const fn bottom_right(&self) -> Position {
        Position::new(self.width - 1, self.height - 1)
    }

    /// Returns the state of a cell, or `None` if the position lies outside the grid.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.index(pos)
            .and_then(|idx| self.cells.get(idx))
            .copied()
    }

    /// Returns `true` if the position lies inside the grid and is open.
    #[must_use]
    pub fn is_open(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    /// Sets the state of a cell. Positions outside the grid are ignored.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(slot) = self.index(pos).and_then(|idx| self.cells.get_mut(idx)) {
            *slot = cell;
        }
    }

    /// Resets every cell to [`Cell::Wall`].
    pub(crate) fn fill_walls(&mut self) {
        self.cells.fill(Cell::Wall);
    }

    /// Iterates over every position of the grid in row-major order together with its state.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(idx, cell)| {
            (Position::new(idx % self.width, idx / self.width), *cell)
        })
    }

    /// Returns the number of open cells.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Open).count()
    }

    /// Maps a position to its offset in the backing storage.
    const fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < self.width && pos.y < self.height {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_filled_is_all_walls() {
        let grid = Grid::filled(4, 3).expect("failed to create grid");

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.open_count(), 0);
        assert_eq!(grid.cells().count(), 12);
        assert!(
            grid.cells().all(|(_, cell)| cell == Cell::Wall),
            "fresh grid should contain only walls"
        );
    }

    #[test]
    fn test_grid_filled_rejects_zero_dimensions() {
        assert!(Grid::filled(0, 5).is_err(), "zero width should be rejected");
        assert!(Grid::filled(5, 0).is_err(), "zero height should be rejected");
        assert!(Grid::filled(0, 0).is_err(), "empty grid should be rejected");
    }

    #[test]
    fn test_grid_set_and_cell() {
        let mut grid = Grid::filled(3, 3).expect("failed to create grid");
        grid.set(Position::new(2, 1), Cell::Open);

        assert_eq!(grid.cell(Position::new(2, 1)), Some(Cell::Open));
        assert!(grid.is_open(Position::new(2, 1)), "set cell should be open");
        assert!(!grid.is_open(Position::new(1, 2)), "transposed cell should stay a wall");
        assert_eq!(grid.open_count(), 1);
    }

    #[test]
    fn test_grid_out_of_bounds() {
        let mut grid = Grid::filled(3, 2).expect("failed to create grid");
        grid.set(Position::new(3, 0), Cell::Open);

        assert_eq!(grid.cell(Position::new(3, 0)), None);
        assert_eq!(grid.cell(Position::new(0, 2)), None);
        assert!(!grid.is_open(Position::new(3, 0)), "off-grid cell is never open");
        assert_eq!(grid.open_count(), 0);
    }

    #[test]
    fn test_grid_cells_row_major() {
        let grid = Grid::filled(3, 2).expect("failed to create grid");
        let positions: Vec<Position> = grid.cells().map(|(pos, _)| pos).collect();

        assert_eq!(positions.first(), Some(&Position::new(0, 0)));
        assert_eq!(positions.get(1), Some(&Position::new(1, 0)));
        assert_eq!(positions.get(3), Some(&Position::new(0, 1)));
        assert_eq!(positions.last(), Some(&Position::new(2, 1)));
        assert_eq!(grid.bottom_right(), Position::new(2, 1));
    }

    #[test]
    fn test_grid_fill_walls() {
        let mut grid = Grid::filled(2, 2).expect("failed to create grid");
        grid.set(Position::new(0, 0), Cell::Open);
        grid.set(Position::new(1, 1), Cell::Open);
        grid.fill_walls();

        assert_eq!(grid.open_count(), 0);
    }

    #[test]
    fn test_position_step() {
        let origin = Position::new(0, 0);

        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Down), Some(Position::new(0, 1)));
        assert_eq!(origin.step(Direction::Right), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_position_offset_by_two() {
        let pos = Position::new(2, 1);

        assert_eq!(pos.offset(Direction::Left, 2), Some(Position::new(0, 1)));
        assert_eq!(pos.offset(Direction::Up, 2), None);
        assert_eq!(pos.offset(Direction::Down, 2), Some(Position::new(2, 3)));
        assert_eq!(pos.offset(Direction::Right, 2), Some(Position::new(4, 1)));
    }

    #[test]
    fn test_direction_deltas_are_unit() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(dx.abs() + dy.abs(), 1, "{direction:?} should move a single cell");
        }
    }
}
