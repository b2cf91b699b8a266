use std::fmt;

use crate::map::cell::Cell;
use crate::map::start_area::StartArea;
use crate::robot::RobotStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotSnapshot {
    pub id: usize,
    pub position: Cell,
    pub start_cell: Cell,
    pub is_grabbing: bool,
    pub materials: u32,
    pub status: RobotStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSnapshot {
    pub position: Cell,
    pub materials: u32,
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub width: usize,
    pub height: usize,
    /// Sorted row-major.
    pub obstacles: Vec<Cell>,
    pub resources: Vec<ResourceSnapshot>,
    pub start_area: StartArea,
    pub robots: Vec<RobotSnapshot>,
    pub collection_target: u32,
    pub game_over: bool,
}

impl WorldSnapshot {
    /// Map symbol for one cell. Robots draw over everything else.
    pub fn symbol_at(&self, cell: Cell) -> char {
        if let Some(robot) = self.robots.iter().find(|r| r.position == cell) {
            return if robot.is_grabbing { 'C' } else { 'R' };
        }
        if self
            .obstacles
            .binary_search_by(|o| (o.y, o.x).cmp(&(cell.y, cell.x)))
            .is_ok()
        {
            return '#';
        }
        if let Some(resource) = self.resources.iter().find(|r| r.position == cell) {
            return char::from_digit(resource.materials.min(9), 10).unwrap_or('*');
        }
        if self.start_area.contains(cell) {
            return 'S';
        }
        '.'
    }
}

impl fmt::Display for WorldSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.symbol_at(Cell::new(x, y)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
