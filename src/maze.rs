//! Maze generation module.
//!
//! This module carves perfect mazes with a randomized depth-first search that advances two cells
//! at a time, then patches the goal corner so the bottom-right cell can be entered.

use color_eyre::eyre::Result;
use log::debug;
use rand::{seq::SliceRandom as _, Rng};

use crate::grid::{Cell, Direction, Grid, Position};

/// Distance between two consecutive cells of the carving lattice.
///
/// The cell halfway between two lattice cells is the wall knocked down when the search moves from
/// one to the other, which keeps a one-cell-thick wall lattice between corridors.
const CARVE_STEP: isize = 2;

/// Generates a new maze of the given dimensions.
///
/// The returned grid has its top-left cell open, every lattice cell reachable from it carved as a
/// spanning tree, and the goal patch of [`ensure_goal_accessible`] applied.
///
/// # Errors
///
/// This function returns an error if either dimension is zero.
pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Grid> {
    let mut grid = Grid::filled(width, height)?;
    regenerate(&mut grid, rng);

    Ok(grid)
}

/// Carves a fresh maze into an existing grid, keeping its dimensions.
pub fn regenerate<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let passages = carve(grid, rng);
    ensure_goal_accessible(grid);

    debug!(
        "generated {}x{} maze with {passages} passages and {} open cells",
        grid.width(),
        grid.height(),
        grid.open_count()
    );
}

/// Runs the depth-first carving phase on its own, without the goal patch.
///
/// Every cell is reset to a wall, then the search starts from the top-left corner. At each step
/// it looks at the top of the stack without popping it, shuffles the four directions and takes the
/// first one whose cell two steps away is inside the grid and still a wall. Both that cell and the
/// wall in between are opened and the new cell is pushed. When no direction works the stack is
/// popped.
///
/// Returns the number of walls knocked down, which for a perfect maze is one less than the number
/// of lattice cells reached.
pub fn carve<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let start = Position::new(0, 0);

    grid.fill_walls();
    grid.set(start, Cell::Open);

    let mut stack = vec![start];
    let mut passages = 0;

    while let Some(&current) = stack.last() {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);

        let next = directions.into_iter().find_map(|direction| {
            let candidate = current.offset(direction, CARVE_STEP)?;
            (grid.cell(candidate) == Some(Cell::Wall)).then_some((direction, candidate))
        });

        if let Some((direction, candidate)) = next {
            if let Some(between) = current.step(direction) {
                grid.set(between, Cell::Open);
            }
            grid.set(candidate, Cell::Open);
            stack.push(candidate);
            passages += 1;
        } else {
            let _ = stack.pop();
        }
    }

    passages
}

/// Makes the bottom-right goal cell enterable.
///
/// If the cell directly left of the goal and the cell directly above it both exist and are walls,
/// both are opened. The goal itself is always opened. This does not prove the goal is connected
/// to the start; it only guarantees the goal has an open neighbour whenever it has two
/// neighbours.
pub fn ensure_goal_accessible(grid: &mut Grid) {
    let goal = grid.bottom_right();
    let left = goal.step(Direction::Left);
    let up = goal.step(Direction::Up);

    let is_wall = |pos: Option<Position>| pos.and_then(|pos| grid.cell(pos)) == Some(Cell::Wall);

    if is_wall(left) && is_wall(up) {
        debug!("goal at ({}, {}) is boxed in, opening its neighbours", goal.x, goal.y);
        for pos in [left, up].into_iter().flatten() {
            grid.set(pos, Cell::Open);
        }
    }

    grid.set(goal, Cell::Open);
}
