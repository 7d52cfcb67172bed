//! Dense passability grid shared by generation, the world, and pathfinding.

use serde::{Deserialize, Serialize};

use crate::{Coordinate, Rect};

/// Fixed-size boolean passability map stored in row-major order.
///
/// Every access validates the coordinate against the grid dimensions. Reads
/// outside the grid report an impassable cell and writes outside the grid are
/// ignored, so callers never observe wraparound between rows.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid with every cell impassable.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, false)
    }

    /// Creates a grid with every cell passable.
    #[must_use]
    pub fn open(width: u32, height: u32) -> Self {
        Self::filled(width, height, true)
    }

    fn filled(width: u32, height: u32, passable: bool) -> Self {
        let capacity_u64 = u64::from(width) * u64::from(height);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![passable; capacity],
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Rectangle covering the whole grid, anchored at the origin.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(Coordinate::new(0, 0), self.width, self.height)
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: Coordinate) -> bool {
        self.index(cell).is_some()
    }

    /// Reports whether the cell is inside the grid and passable.
    #[must_use]
    pub fn is_passable(&self, cell: Coordinate) -> bool {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(false)
    }

    /// Marks the cell passable. Coordinates outside the grid are ignored.
    pub fn carve(&mut self, cell: Coordinate) {
        self.set_passable(cell, true);
    }

    /// Marks every cell covered by the rectangle passable.
    pub fn carve_rect(&mut self, rect: Rect) {
        for cell in rect.cells() {
            self.carve(cell);
        }
    }

    /// Updates the passability of a single cell. Coordinates outside the grid are ignored.
    pub fn set_passable(&mut self, cell: Coordinate, passable: bool) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = passable;
            }
        }
    }

    /// Number of passable cells.
    #[must_use]
    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Row-major index of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn index(&self, cell: Coordinate) -> Option<usize> {
        let column = u32::try_from(cell.x()).ok()?;
        let row = u32::try_from(cell.y()).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Coordinate addressed by a row-major index produced by [`Grid::index`].
    #[must_use]
    pub fn coordinate(&self, index: usize) -> Option<Coordinate> {
        if index >= self.cells.len() || self.width == 0 {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let x = i32::try_from(index % width).ok()?;
        let y = i32::try_from(index / width).ok()?;
        Some(Coordinate::new(x, y))
    }

    /// Passable orthogonal neighbours of the cell in north, east, south, west order.
    pub fn passable_neighbors(&self, cell: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        cell.neighbors()
            .into_iter()
            .filter(move |neighbor| self.is_passable(*neighbor))
    }
}
