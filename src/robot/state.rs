use std::fmt;

use crate::map::cell::Cell;

/// What a robot does this tick, decided before it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotStatus {
    Exploring,
    /// Heading for a known or remembered resource.
    Pursuing(Cell),
    /// Carrying material back to the start cell.
    Returning,
    /// The collection target was reached; parking on the start cell.
    Idle,
}

impl fmt::Display for RobotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RobotStatus::Exploring => write!(f, "exploring"),
            RobotStatus::Pursuing(cell) => write!(f, "pursuing {}", cell),
            RobotStatus::Returning => write!(f, "returning"),
            RobotStatus::Idle => write!(f, "idle"),
        }
    }
}
