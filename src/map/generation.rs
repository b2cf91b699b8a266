use log::info;
use noise::{NoiseFn, Perlin};
use rand::seq::IndexedRandom;
use rand::Rng;

use super::cell::Cell;
use super::grid::GridWorld;
use super::start_area::StartArea;
use crate::config::SimulationConfig;
use crate::error::WorldError;

/// Noise sampling scale: larger values give tighter obstacle clusters.
const NOISE_SCALE: f64 = 10.0;
/// Cells whose noise exceeds this are preferred for obstacles.
const OBSTACLE_THRESHOLD: f64 = 0.0;

/// A freshly generated world plus the spawn cell of each robot.
#[derive(Debug, Clone)]
pub struct Layout {
    pub world: GridWorld,
    pub spawns: Vec<Cell>,
}

/// Places the start area, obstacles, resources and robot spawns.
///
/// The start area is kept clear so robots can always leave it. Obstacles are
/// drawn from the Perlin hot spots, which clumps them into small ridges
/// instead of scattering single blocks.
pub fn generate<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<Layout, WorldError> {
    let origin = Cell::new(
        rng.random_range(0..=config.width - config.start_area_width),
        rng.random_range(0..=config.height - config.start_area_height),
    );
    let start_area = StartArea::new(origin, config.start_area_width, config.start_area_height);
    let mut world = GridWorld::new(config.width, config.height, start_area)?;

    let perlin = Perlin::new(rng.random::<u32>());
    let free: Vec<Cell> = (0..config.height)
        .flat_map(|y| (0..config.width).map(move |x| Cell::new(x, y)))
        .filter(|&cell| !world.start_area().contains(cell))
        .collect();
    let hot: Vec<Cell> = free
        .iter()
        .copied()
        .filter(|cell| {
            perlin.get([cell.x as f64 / NOISE_SCALE, cell.y as f64 / NOISE_SCALE]) > OBSTACLE_THRESHOLD
        })
        .collect();
    let obstacle_pool = if hot.len() >= config.obstacle_count { &hot } else { &free };
    for &cell in obstacle_pool.choose_multiple(rng, config.obstacle_count) {
        world.add_obstacle(cell)?;
    }

    let open: Vec<Cell> = free
        .into_iter()
        .filter(|&cell| !world.is_obstacle(cell))
        .collect();
    for &cell in open.choose_multiple(rng, config.resource_count) {
        let materials = rng.random_range(config.resource_materials.clone());
        world.add_resource(cell, materials)?;
    }

    let spawns = (0..config.robot_count)
        .map(|_| {
            Cell::new(
                rng.random_range(origin.x..origin.x + config.start_area_width),
                rng.random_range(origin.y..origin.y + config.start_area_height),
            )
        })
        .collect();

    info!(
        "Generated {}x{} world: start area at {}, {} obstacles, {} resources ({} materials)",
        config.width,
        config.height,
        origin,
        world.obstacles().count(),
        world.resources().len(),
        world.remaining_materials()
    );
    Ok(Layout { world, spawns })
}
