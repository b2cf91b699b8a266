use std::collections::HashSet;

use crate::map::cell::Cell;

/// Cells a robot has stood on, directly or through a peer's broadcast.
/// Grows only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExploredArea {
    cells: HashSet<Cell>,
}

impl ExploredArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the cell was new.
    pub fn mark(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Union of `other` into `self`.
    pub fn merge(&mut self, other: &ExploredArea) {
        self.cells.extend(other.cells.iter().copied());
    }

    pub fn is_subset(&self, other: &ExploredArea) -> bool {
        self.cells.is_subset(&other.cells)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
