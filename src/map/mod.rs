pub mod cell;
pub mod generation;
pub mod grid;
pub mod resources;
pub mod start_area;

pub use cell::Cell;
pub use grid::GridWorld;
pub use resources::Resource;
pub use start_area::StartArea;
