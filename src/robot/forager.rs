use log::{debug, info};
use rand::Rng;
use std::collections::VecDeque;

use super::config::{self, RobotConfig};
use super::knowledge::ExploredArea;
use super::movement::{self, Direction};
use super::pathfinding;
use super::state::RobotStatus;
use crate::map::cell::Cell;
use crate::map::grid::GridWorld;

/// Outcome of a robot's interaction check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Grabbed { resource: Cell, remaining: u32 },
    Deposited { amount: u32 },
    ReachedStart,
}

#[derive(Debug, Clone)]
struct CachedPath {
    target: Cell,
    steps: VecDeque<Cell>,
}

/// A foraging agent. Carries at most one unit at a time.
#[derive(Debug, Clone)]
pub struct Robot {
    id: usize,
    position: Cell,
    start_cell: Cell,
    is_grabbing: bool,
    materials: u32,
    config: RobotConfig,
    closest_resource: Option<Cell>,
    last_resource: Option<Cell>,
    explored_area: ExploredArea,
    current_path: Option<CachedPath>,
    movements: Vec<Cell>,
    status: RobotStatus,
}

impl Robot {
    /// Spawns a robot whose return anchor is its spawn cell.
    pub fn new(id: usize, start_cell: Cell, config: RobotConfig) -> Self {
        let mut explored_area = ExploredArea::new();
        explored_area.mark(start_cell);
        Self {
            id,
            position: start_cell,
            start_cell,
            is_grabbing: false,
            materials: 0,
            config,
            closest_resource: None,
            last_resource: None,
            explored_area,
            current_path: None,
            movements: Vec::new(),
            status: RobotStatus::Exploring,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn start_cell(&self) -> Cell {
        self.start_cell
    }

    pub fn is_grabbing(&self) -> bool {
        self.is_grabbing
    }

    pub fn materials(&self) -> u32 {
        self.materials
    }

    pub fn status(&self) -> RobotStatus {
        self.status
    }

    pub fn view_distance(&self) -> usize {
        self.config.view_distance
    }

    pub fn grab_distance(&self) -> usize {
        self.config.grab_distance
    }

    pub fn closest_resource(&self) -> Option<Cell> {
        self.closest_resource
    }

    pub fn last_resource(&self) -> Option<Cell> {
        self.last_resource
    }

    pub fn explored_area(&self) -> &ExploredArea {
        &self.explored_area
    }

    pub fn movements(&self) -> &[Cell] {
        &self.movements
    }

    /// Folds a peer's exploration into this robot's memory.
    pub fn share_exploration(&mut self, other: &ExploredArea) {
        self.explored_area.merge(other);
    }

    /// Picks this tick's status: carrying beats remembered resources, which
    /// beat newly sighted ones, which beat exploring.
    pub fn decide(&mut self, world: &GridWorld) -> RobotStatus {
        self.status = if self.is_grabbing {
            RobotStatus::Returning
        } else if let Some(remembered) = self
            .last_resource
            .filter(|&cell| world.is_occupied_by_resource(cell).is_some())
        {
            self.closest_resource = None;
            RobotStatus::Pursuing(remembered)
        } else {
            self.last_resource = None;
            self.closest_resource = self.scan(world);
            match self.closest_resource {
                Some(cell) => RobotStatus::Pursuing(cell),
                None => RobotStatus::Exploring,
            }
        };
        self.status
    }

    /// Nearest non-empty resource within view distance. Ties go to the
    /// first one in world order.
    fn scan(&self, world: &GridWorld) -> Option<Cell> {
        world
            .resources()
            .iter()
            .filter(|r| !r.is_depleted())
            .map(|r| (r.position(), self.position.manhattan(r.position())))
            .filter(|&(_, distance)| distance <= self.config.view_distance)
            .min_by_key(|&(_, distance)| distance)
            .map(|(cell, _)| cell)
    }

    /// Switches to parking mode once the run is over.
    pub fn go_idle(&mut self) {
        self.status = RobotStatus::Idle;
        self.closest_resource = None;
    }

    /// Runs one movement primitive for the current status, then the
    /// interaction check. Stepping onto the start cell is reported too.
    pub fn act<R: Rng + ?Sized>(&mut self, world: &mut GridWorld, rng: &mut R) -> Vec<Interaction> {
        let was_home = self.position == self.start_cell;
        match self.status {
            RobotStatus::Exploring => {
                self.move_randomly(world, rng);
            }
            RobotStatus::Pursuing(target) => {
                if self.position.manhattan(target) > self.config.grab_distance {
                    self.move_towards(world, target, rng);
                }
            }
            RobotStatus::Returning => {
                if !self.can_deposit(world) {
                    self.move_towards(world, self.start_cell, rng);
                }
            }
            RobotStatus::Idle => {
                self.move_towards(world, self.start_cell, rng);
            }
        }

        let mut interactions: Vec<Interaction> = self.check_interactions(world).into_iter().collect();
        if !was_home && self.position == self.start_cell {
            info!("Robot: {} Reached start cell {}.", self.id, self.start_cell);
            interactions.push(Interaction::ReachedStart);
        }
        interactions
    }

    /// Tries random directions until one is acceptable or the retry budget
    /// runs out. Explored cells are turned down a third of the time.
    pub fn move_randomly<R: Rng + ?Sized>(&mut self, world: &GridWorld, rng: &mut R) -> bool {
        for _ in 0..self.config.random_move_attempts {
            let direction = Direction::random(rng);
            let Some(candidate) = movement::next_position(self.position, direction, world) else {
                continue;
            };
            if !movement::is_valid_move(candidate, world) {
                continue;
            }
            if self.explored_area.contains(candidate)
                && rng.random_ratio(
                    config::EXPLORED_REJECT_NUMERATOR,
                    config::EXPLORED_REJECT_DENOMINATOR,
                )
            {
                continue;
            }
            self.apply_move(candidate);
            return true;
        }
        debug!("Robot: {} No valid random move from {}.", self.id, self.position);
        false
    }

    /// One step toward `target`, from the cached path when it still fits,
    /// else from a fresh search. Falls back to a random step when no path
    /// exists.
    pub fn move_towards<R: Rng + ?Sized>(&mut self, world: &GridWorld, target: Cell, rng: &mut R) -> bool {
        if self.position == target {
            return false;
        }
        if self
            .current_path
            .as_ref()
            .is_some_and(|path| path.target != target)
        {
            self.current_path = None;
        }

        if let Some(step) = self
            .current_path
            .as_mut()
            .and_then(|path| path.steps.pop_front())
        {
            if self.position.manhattan(step) == 1 && movement::is_valid_move(step, world) {
                self.apply_move(step);
                return true;
            }
            debug!("Robot: {} Cached step {} is stale, replanning.", self.id, step);
            self.current_path = None;
        }

        match pathfinding::find_path(world, self.position, target) {
            Ok(path) => {
                let mut steps = VecDeque::from(path);
                match steps.pop_front() {
                    Some(step) if movement::is_valid_move(step, world) => {
                        self.current_path = Some(CachedPath { target, steps });
                        self.apply_move(step);
                        true
                    }
                    _ => {
                        self.current_path = None;
                        self.move_randomly(world, rng)
                    }
                }
            }
            Err(err) => {
                debug!("Robot: {} {}. Moving randomly.", self.id, err);
                self.current_path = None;
                self.move_randomly(world, rng)
            }
        }
    }

    fn apply_move(&mut self, cell: Cell) {
        debug!("Robot: {} Moving from {} to {}", self.id, self.position, cell);
        self.position = cell;
        self.movements.push(cell);
        self.explored_area.mark(cell);
    }

    fn can_deposit(&self, world: &GridWorld) -> bool {
        self.position.manhattan(self.start_cell) <= self.config.grab_distance
            || world.start_area().contains(self.position)
    }

    /// Deposits when carrying and close to home; otherwise grabs one unit
    /// from the pursued resource when it is within reach.
    pub fn check_interactions(&mut self, world: &mut GridWorld) -> Option<Interaction> {
        if self.is_grabbing {
            if !self.can_deposit(world) {
                return None;
            }
            let amount = self.materials;
            world.start_area_mut().deposit(amount);
            self.is_grabbing = false;
            self.materials = 0;
            self.current_path = None;
            info!(
                "Robot: {} Dropped {} material(s). Start area holds {}.",
                self.id,
                amount,
                world.start_area().materials()
            );
            return Some(Interaction::Deposited { amount });
        }

        let target = match self.status {
            RobotStatus::Pursuing(cell) => cell,
            RobotStatus::Exploring | RobotStatus::Returning => self.closest_resource?,
            RobotStatus::Idle => return None,
        };
        if self.position.manhattan(target) > self.config.grab_distance {
            return None;
        }
        let resource = world.resource_mut(target)?;
        if !resource.take_one() {
            return None;
        }
        let remaining = resource.materials();

        self.materials += 1;
        self.is_grabbing = true;
        self.last_resource = Some(target);
        self.closest_resource = None;
        self.current_path = None;
        info!(
            "Robot: {} Grabbed a material at {} ({} left).",
            self.id, target, remaining
        );
        Some(Interaction::Grabbed {
            resource: target,
            remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::start_area::StartArea;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn world(width: usize, height: usize) -> GridWorld {
        GridWorld::new(width, height, StartArea::new(Cell::new(0, 0), 2, 2)).unwrap()
    }

    fn robot_at(cell: Cell) -> Robot {
        Robot::new(0, cell, RobotConfig::default())
    }

    #[test]
    fn test_new_robot_knows_its_spawn() {
        let robot = robot_at(Cell::new(1, 1));
        assert!(robot.explored_area().contains(Cell::new(1, 1)));
        assert_eq!(robot.status(), RobotStatus::Exploring);
        assert!(!robot.is_grabbing());
        assert_eq!(robot.materials(), 0);
    }

    #[test]
    fn test_decide_explores_when_nothing_in_view() {
        let mut world = world(20, 20);
        world.add_resource(Cell::new(15, 15), 3).unwrap();
        let mut robot = robot_at(Cell::new(1, 1));
        assert_eq!(robot.decide(&world), RobotStatus::Exploring);
        assert_eq!(robot.closest_resource(), None);
    }

    #[test]
    fn test_decide_picks_nearest_with_first_wins_ties() {
        let mut world = world(20, 20);
        world.add_resource(Cell::new(5, 2), 3).unwrap();
        world.add_resource(Cell::new(2, 5), 3).unwrap();
        world.add_resource(Cell::new(4, 2), 3).unwrap();
        world.add_resource(Cell::new(2, 4), 3).unwrap();
        let mut robot = robot_at(Cell::new(2, 2));
        assert_eq!(robot.decide(&world), RobotStatus::Pursuing(Cell::new(4, 2)));
        assert_eq!(robot.closest_resource(), Some(Cell::new(4, 2)));
    }

    #[test]
    fn test_decide_prefers_remembered_resource() {
        let mut world = world(20, 20);
        world.add_resource(Cell::new(5, 1), 5).unwrap();
        world.add_resource(Cell::new(1, 3), 5).unwrap();
        let mut robot = robot_at(Cell::new(1, 1));
        robot.last_resource = Some(Cell::new(5, 1));

        assert_eq!(robot.decide(&world), RobotStatus::Pursuing(Cell::new(5, 1)));
        assert_eq!(robot.closest_resource(), None);
    }

    #[test]
    fn test_depleted_memory_is_forgotten() {
        let mut world = world(20, 20);
        world.add_resource(Cell::new(5, 1), 1).unwrap();
        world.add_resource(Cell::new(1, 3), 5).unwrap();
        world.resource_mut(Cell::new(5, 1)).unwrap().take_one();
        let mut robot = robot_at(Cell::new(1, 1));
        robot.last_resource = Some(Cell::new(5, 1));

        assert_eq!(robot.decide(&world), RobotStatus::Pursuing(Cell::new(1, 3)));
        assert_eq!(robot.last_resource(), None);
    }

    #[test]
    fn test_carrying_means_returning() {
        let mut world = world(10, 10);
        world.add_resource(Cell::new(4, 5), 2).unwrap();
        let mut robot = robot_at(Cell::new(0, 0));
        robot.position = Cell::new(4, 4);
        robot.decide(&world);
        let grabbed = robot.check_interactions(&mut world);
        assert_eq!(
            grabbed,
            Some(Interaction::Grabbed {
                resource: Cell::new(4, 5),
                remaining: 1
            })
        );
        assert!(robot.is_grabbing());
        assert_eq!(robot.materials(), 1);
        assert_eq!(robot.last_resource(), Some(Cell::new(4, 5)));
        assert_eq!(robot.closest_resource(), None);
        assert_eq!(robot.decide(&world), RobotStatus::Returning);
    }

    #[test]
    fn test_never_grabs_twice() {
        let mut world = world(10, 10);
        world.add_resource(Cell::new(4, 5), 4).unwrap();
        let mut robot = robot_at(Cell::new(0, 0));
        robot.position = Cell::new(4, 4);
        robot.decide(&world);
        robot.check_interactions(&mut world);
        robot.status = RobotStatus::Pursuing(Cell::new(4, 5));
        assert_eq!(robot.check_interactions(&mut world), None);
        assert_eq!(robot.materials(), 1);
        assert_eq!(world.is_occupied_by_resource(Cell::new(4, 5)).unwrap().materials(), 3);
    }

    #[test]
    fn test_deposit_at_grab_distance() {
        let mut world = GridWorld::new(10, 10, StartArea::new(Cell::new(0, 0), 1, 1)).unwrap();
        let mut robot = robot_at(Cell::new(0, 0));
        robot.position = Cell::new(1, 0);
        robot.is_grabbing = true;
        robot.materials = 1;

        assert_eq!(robot.check_interactions(&mut world), Some(Interaction::Deposited { amount: 1 }));
        assert!(!robot.is_grabbing());
        assert_eq!(robot.materials(), 0);
        assert_eq!(world.start_area().materials(), 1);
    }

    #[test]
    fn test_move_randomly_boxed_in_stays_put() {
        let mut world = world(5, 5);
        for cell in [Cell::new(3, 2), Cell::new(1, 2), Cell::new(2, 3), Cell::new(2, 1)] {
            world.add_obstacle(cell).unwrap();
        }
        let mut robot = robot_at(Cell::new(2, 2));
        let mut rng = StdRng::seed_from_u64(3);
        assert!(!robot.move_randomly(&world, &mut rng));
        assert_eq!(robot.position(), Cell::new(2, 2));
        assert!(robot.movements().is_empty());
    }

    #[test]
    fn test_move_randomly_records_history() {
        let world = world(5, 5);
        let mut robot = robot_at(Cell::new(2, 2));
        let mut rng = StdRng::seed_from_u64(9);
        assert!(robot.move_randomly(&world, &mut rng));
        let moved_to = robot.position();
        assert_eq!(Cell::new(2, 2).manhattan(moved_to), 1);
        assert_eq!(robot.movements(), &[moved_to]);
        assert!(robot.explored_area().contains(moved_to));
    }

    #[test]
    fn test_move_towards_follows_cached_path() {
        let mut world = world(10, 5);
        world.add_obstacle(Cell::new(3, 2)).unwrap();
        let mut robot = robot_at(Cell::new(1, 2));
        let mut rng = StdRng::seed_from_u64(5);
        let target = Cell::new(6, 2);

        let mut steps = 0;
        while robot.position() != target {
            assert!(robot.move_towards(&world, target, &mut rng));
            assert!(!world.is_obstacle(robot.position()));
            steps += 1;
            assert!(steps < 20);
        }
        assert_eq!(steps, 7);
        assert!(!robot.move_towards(&world, target, &mut rng));
    }

    #[test]
    fn test_move_towards_unreachable_falls_back_to_random() {
        let mut world = world(6, 3);
        for y in 0..3 {
            world.add_obstacle(Cell::new(3, y)).unwrap();
        }
        let mut robot = robot_at(Cell::new(1, 1));
        let mut rng = StdRng::seed_from_u64(11);
        let moved = robot.move_towards(&world, Cell::new(5, 1), &mut rng);
        assert!(moved);
        assert!(robot.position().x < 3);
    }

    #[test]
    fn test_idle_robot_parks_and_reports_once() {
        let mut world = world(8, 8);
        let mut robot = robot_at(Cell::new(1, 1));
        robot.position = Cell::new(4, 1);
        robot.go_idle();
        let mut rng = StdRng::seed_from_u64(2);

        let mut reached = 0;
        for _ in 0..10 {
            let interactions = robot.act(&mut world, &mut rng);
            reached += interactions
                .iter()
                .filter(|i| **i == Interaction::ReachedStart)
                .count();
        }
        assert_eq!(robot.position(), Cell::new(1, 1));
        assert_eq!(reached, 1);
    }

    #[test]
    fn test_arriving_home_mid_run_is_reported() {
        let mut world = GridWorld::new(4, 1, StartArea::new(Cell::new(3, 0), 1, 1)).unwrap();
        world.add_resource(Cell::new(0, 0), 3).unwrap();
        let mut robot = robot_at(Cell::new(1, 0));
        robot.position = Cell::new(3, 0);
        let mut rng = StdRng::seed_from_u64(4);

        assert_eq!(robot.decide(&world), RobotStatus::Pursuing(Cell::new(0, 0)));
        assert!(robot.act(&mut world, &mut rng).is_empty());
        assert_eq!(robot.position(), Cell::new(2, 0));

        let interactions = robot.act(&mut world, &mut rng);
        assert_eq!(robot.position(), Cell::new(1, 0));
        assert_eq!(
            interactions,
            vec![
                Interaction::Grabbed {
                    resource: Cell::new(0, 0),
                    remaining: 2
                },
                Interaction::ReachedStart
            ]
        );
    }

    #[test]
    fn test_move_randomly_favours_unexplored_cells() {
        let world = GridWorld::new(3, 1, StartArea::new(Cell::new(0, 0), 1, 1)).unwrap();
        let mut robot = robot_at(Cell::new(1, 0));
        robot.explored_area.mark(Cell::new(0, 0));

        let (mut explored, mut novel) = (0_u32, 0_u32);
        for seed in 0..3_000 {
            let mut trial = robot.clone();
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(trial.move_randomly(&world, &mut rng));
            match trial.position() {
                Cell { x: 0, y: 0 } => explored += 1,
                Cell { x: 2, y: 0 } => novel += 1,
                other => panic!("unexpected move to {}", other),
            }
        }
        let ratio = f64::from(explored) / f64::from(novel);
        assert!((0.55..0.78).contains(&ratio), "explored/novel ratio {}", ratio);
    }

    #[test]
    fn test_move_randomly_still_moves_when_all_explored() {
        let world = world(5, 5);
        let mut robot = robot_at(Cell::new(2, 2));
        for cell in movement::neighbors(Cell::new(2, 2), &world) {
            robot.explored_area.mark(cell);
        }
        for seed in 0..20 {
            let mut trial = robot.clone();
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(trial.move_randomly(&world, &mut rng));
            assert_eq!(trial.position().manhattan(Cell::new(2, 2)), 1);
        }
    }
}
