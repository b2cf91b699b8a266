use super::cell::Cell;

/// The rectangular deposit zone. Its counter only ever goes up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartArea {
    origin: Cell,
    width: usize,
    height: usize,
    materials: u32,
}

impl StartArea {
    pub fn new(origin: Cell, width: usize, height: usize) -> Self {
        Self {
            origin,
            width,
            height,
            materials: 0,
        }
    }

    pub fn origin(&self) -> Cell {
        self.origin
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn materials(&self) -> u32 {
        self.materials
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.origin.x..self.origin.x + self.width).contains(&cell.x)
            && (self.origin.y..self.origin.y + self.height).contains(&cell.y)
    }

    /// Every cell of the rectangle, row by row.
    pub fn cells(&self) -> Vec<Cell> {
        (self.origin.y..self.origin.y + self.height)
            .flat_map(|y| (self.origin.x..self.origin.x + self.width).map(move |x| Cell::new(x, y)))
            .collect()
    }

    pub(crate) fn deposit(&mut self, amount: u32) {
        self.materials = self.materials.saturating_add(amount);
    }
}
