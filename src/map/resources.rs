use super::cell::Cell;

/// A depletable material source sitting on one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    position: Cell,
    materials: u32,
}

impl Resource {
    pub fn new(position: Cell, materials: u32) -> Self {
        Self {
            position,
            materials,
        }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn materials(&self) -> u32 {
        self.materials
    }

    pub fn is_depleted(&self) -> bool {
        self.materials == 0
    }

    /// Removes one unit. Returns `false` when nothing was left to take.
    pub(crate) fn take_one(&mut self) -> bool {
        if self.materials == 0 {
            return false;
        }
        self.materials -= 1;
        true
    }
}
