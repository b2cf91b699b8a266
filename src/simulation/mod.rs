pub mod snapshot;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::mpsc::Sender;

use crate::communication::SimEvent;
use crate::config::SimulationConfig;
use crate::error::{SetupError, WorldError};
use crate::map::cell::Cell;
use crate::map::generation;
use crate::map::grid::GridWorld;
use crate::robot::config::RobotConfig;
use crate::robot::{Interaction, Robot};

pub use snapshot::{ResourceSnapshot, RobotSnapshot, WorldSnapshot};

/// Owns the world and the robots and advances them one tick at a time.
pub struct ForagingSimulation {
    world: GridWorld,
    robots: Vec<Robot>,
    rng: StdRng,
    collection_target: u32,
    tick: u64,
    events: Option<Sender<SimEvent>>,
}

impl ForagingSimulation {
    /// Generates a random world from `config` and spawns the robots in its
    /// start area.
    pub fn generate(config: &SimulationConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let layout = generation::generate(config, &mut rng)?;
        let robots = layout
            .spawns
            .into_iter()
            .enumerate()
            .map(|(id, cell)| Robot::new(id, cell, config.robot))
            .collect();
        Ok(Self {
            world: layout.world,
            robots,
            rng,
            collection_target: config.collection_target,
            tick: 0,
            events: None,
        })
    }

    /// Builds a simulation over a hand-made world. Robot `i` spawns on
    /// `spawns[i]`.
    pub fn with_world(
        world: GridWorld,
        spawns: &[Cell],
        robot_config: RobotConfig,
        collection_target: u32,
        seed: u64,
    ) -> Result<Self, SetupError> {
        robot_config.validate()?;
        for &cell in spawns {
            if !world.in_bounds(cell) {
                return Err(WorldError::OutOfBounds {
                    cell,
                    width: world.width(),
                    height: world.height(),
                }
                .into());
            }
            if world.is_obstacle(cell) || world.is_occupied_by_resource(cell).is_some() {
                return Err(WorldError::CellOccupied(cell).into());
            }
        }
        let robots = spawns
            .iter()
            .enumerate()
            .map(|(id, &cell)| Robot::new(id, cell, robot_config))
            .collect();
        Ok(Self {
            world,
            robots,
            rng: StdRng::seed_from_u64(seed),
            collection_target,
            tick: 0,
            events: None,
        })
    }

    /// Routes events to `sender`. Sends are fire-and-forget.
    pub fn attach_sink(&mut self, sender: Sender<SimEvent>) {
        self.events = Some(sender);
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn collection_target(&self) -> u32 {
        self.collection_target
    }

    pub fn is_game_over(&self) -> bool {
        self.world.start_area().materials() >= self.collection_target
    }

    /// Advances every robot by one decision and one move, in spawn order,
    /// then clears out exhausted resources.
    pub fn tick(&mut self) {
        let game_over = self.is_game_over();

        for index in 0..self.robots.len() {
            let robot = &mut self.robots[index];
            if game_over {
                robot.go_idle();
            } else {
                robot.decide(&self.world);
            }
            let interactions = robot.act(&mut self.world, &mut self.rng);
            for interaction in interactions {
                self.resolve(index, interaction);
            }
        }

        for at in self.world.remove_depleted_resources() {
            self.emit(SimEvent::ResourceDepleted { at });
        }
        self.tick += 1;

        if !game_over && self.is_game_over() {
            let total = self.world.start_area().materials();
            info!(
                "Collection target reached after {} ticks ({} materials).",
                self.tick, total
            );
            self.emit(SimEvent::GameOver {
                tick: self.tick,
                total,
            });
        }
    }

    /// Ticks until the target is met or `max_ticks` more ticks have run.
    /// Returns whether the game ended.
    pub fn run_until_game_over(&mut self, max_ticks: u64) -> bool {
        for _ in 0..max_ticks {
            if self.is_game_over() {
                break;
            }
            self.tick();
        }
        self.is_game_over()
    }

    fn resolve(&mut self, index: usize, interaction: Interaction) {
        let id = self.robots[index].id();
        match interaction {
            Interaction::Grabbed {
                resource,
                remaining,
            } => {
                // Finding a resource shares what the finder has seen.
                let explored = self.robots[index].explored_area().clone();
                for (peer_index, peer) in self.robots.iter_mut().enumerate() {
                    if peer_index != index {
                        peer.share_exploration(&explored);
                    }
                }
                self.emit(SimEvent::Grabbed {
                    id,
                    resource,
                    remaining,
                });
            }
            Interaction::Deposited { amount } => {
                let total = self.world.start_area().materials();
                self.emit(SimEvent::Deposited { id, amount, total });
            }
            Interaction::ReachedStart => self.emit(SimEvent::ReachedStart { id }),
        }
    }

    fn emit(&self, event: SimEvent) {
        debug!("Event: {:?}", event);
        if let Some(sender) = &self.events {
            let _ = sender.send(event);
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let mut obstacles: Vec<Cell> = self.world.obstacles().copied().collect();
        obstacles.sort_by_key(|cell| (cell.y, cell.x));
        WorldSnapshot {
            tick: self.tick,
            width: self.world.width(),
            height: self.world.height(),
            obstacles,
            resources: self
                .world
                .resources()
                .iter()
                .filter(|r| !r.is_depleted())
                .map(|r| ResourceSnapshot {
                    position: r.position(),
                    materials: r.materials(),
                })
                .collect(),
            start_area: self.world.start_area().clone(),
            robots: self
                .robots
                .iter()
                .map(|r| RobotSnapshot {
                    id: r.id(),
                    position: r.position(),
                    start_cell: r.start_cell(),
                    is_grabbing: r.is_grabbing(),
                    materials: r.materials(),
                    status: r.status(),
                })
                .collect(),
            collection_target: self.collection_target,
            game_over: self.is_game_over(),
        }
    }
}
