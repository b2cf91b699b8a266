pub mod config;
pub mod forager;
pub mod knowledge;
pub mod movement;
pub mod pathfinding;
pub mod state;

pub use forager::{Interaction, Robot};
pub use state::RobotStatus;
