use chrono::{DateTime, Local, TimeDelta};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::sync::mpsc::Receiver;

use crate::communication::{create_channel, SimEvent};
use crate::config::SimulationConfig;
use crate::simulation::{ForagingSimulation, WorldSnapshot};

/// Counters built from the simulation's event stream for the HUD.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub grabs: u32,
    pub deposits: u32,
    pub depleted: u32,
    pub arrivals: u32,
}

pub struct App {
    simulation: ForagingSimulation,
    events: Receiver<SimEvent>,
    seed: u64,
    stats: RunStats,
    paused: bool,
    started_at: DateTime<Local>,
    finished_at: Option<DateTime<Local>>,
}

impl App {
    /// Generates the world for `config` and wires the event channel.
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        let mut simulation = ForagingSimulation::generate(config)
            .wrap_err_with(|| format!("failed to set up a world with seed {}", config.seed))?;
        let (sender, events) = create_channel();
        simulation.attach_sink(sender);
        log::info!(
            "Seed {}: {} robots, target {} materials",
            config.seed,
            simulation.robots().len(),
            simulation.collection_target()
        );
        Ok(Self {
            simulation,
            events,
            seed: config.seed,
            stats: RunStats::default(),
            paused: false,
            started_at: Local::now(),
            finished_at: None,
        })
    }

    /// Advances the simulation by one tick unless paused.
    pub fn update(&mut self) {
        if self.paused {
            return;
        }
        self.simulation.tick();
        self.drain_events();
    }

    fn drain_events(&mut self) {
        for event in self.events.try_iter() {
            match event {
                SimEvent::Grabbed { .. } => self.stats.grabs += 1,
                SimEvent::Deposited { .. } => self.stats.deposits += 1,
                SimEvent::ResourceDepleted { .. } => self.stats.depleted += 1,
                SimEvent::ReachedStart { .. } => self.stats.arrivals += 1,
                SimEvent::GameOver { tick, total } => {
                    self.finished_at = Some(Local::now());
                    log::info!("Game over at tick {} with {} materials collected.", tick, total);
                }
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn is_game_over(&self) -> bool {
        self.simulation.is_game_over()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.simulation.snapshot()
    }

    /// Wall time since start, frozen once the target is reached.
    pub fn elapsed(&self) -> TimeDelta {
        self.finished_at.unwrap_or_else(Local::now) - self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Local>> {
        self.finished_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_counts_events() {
        let mut app = App::new(&SimulationConfig::with_seed(12)).unwrap();
        for _ in 0..500 {
            app.update();
        }
        let stats = app.stats().clone();
        assert_eq!(stats.deposits, app.snapshot().start_area.materials());
        assert!(stats.grabs >= stats.deposits);
        assert_eq!(app.snapshot().tick, 500);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut app = App::new(&SimulationConfig::with_seed(1)).unwrap();
        app.toggle_pause();
        app.update();
        assert!(app.is_paused());
        assert_eq!(app.snapshot().tick, 0);
        app.toggle_pause();
        app.update();
        assert_eq!(app.snapshot().tick, 1);
    }
}
