use thiserror::Error;

use crate::map::cell::Cell;

/// Failures of a single pathfinding request.
///
/// Both variants are absorbed by the robot that asked: it falls back to a
/// random step for the tick.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The target does not resolve to a cell a robot could ever stand next to.
    #[error("target {0} cannot be resolved to a reachable cell")]
    InvalidTarget(Cell),
    /// The frontier was exhausted before reaching the goal.
    #[error("no path from {from} to {to}")]
    Unreachable { from: Cell, to: Cell },
}

/// Errors raised while building a world.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds { cell: Cell, width: usize, height: usize },
    #[error("cell {0} is already taken by an obstacle or resource")]
    CellOccupied(Cell),
    #[error("start area at {origin} ({width}x{height}) does not fit in the grid")]
    StartAreaOutOfBounds {
        origin: Cell,
        width: usize,
        height: usize,
    },
    #[error("resource at {0} must start with at least one material")]
    EmptyResource(Cell),
}

/// Invalid tuning values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grab distance {grab} must be between 1 and the view distance {view}")]
    GrabDistance { grab: usize, view: usize },
    #[error("at least one robot is required")]
    NoRobots,
    #[error("start area {area_width}x{area_height} does not fit in a {width}x{height} grid")]
    StartAreaTooLarge {
        area_width: usize,
        area_height: usize,
        width: usize,
        height: usize,
    },
    #[error("collection target must be greater than zero")]
    ZeroTarget,
    #[error("resource materials range {min}..={max} is empty or starts at zero")]
    MaterialsRange { min: u32, max: u32 },
}

/// Anything that stops a simulation from being built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    World(#[from] WorldError),
}
