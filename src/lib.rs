pub mod app;
pub mod communication;
pub mod config;
pub mod error;
pub mod logging;
pub mod map;
pub mod robot;
pub mod simulation;
pub mod terminal;
pub mod ui;

pub use simulation::ForagingSimulation;
