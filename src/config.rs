use std::ops::RangeInclusive;

use crate::error::ConfigError;
use crate::robot::config::RobotConfig;

/// Start area materials needed to end the run.
pub const COLLECTION_TARGET: u32 = 25;
/// Materials a freshly placed resource can hold.
pub const RESOURCE_MATERIALS: RangeInclusive<u32> = 1..=6;

pub const DEFAULT_WIDTH: usize = 60;
pub const DEFAULT_HEIGHT: usize = 24;
pub const DEFAULT_ROBOTS: usize = 4;
pub const DEFAULT_RESOURCES: usize = 20;
pub const DEFAULT_OBSTACLES: usize = 20;
pub const DEFAULT_START_AREA_SIZE: usize = 5;

/// Everything needed to generate and run one world.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    pub robot_count: usize,
    pub resource_count: usize,
    pub obstacle_count: usize,
    pub start_area_width: usize,
    pub start_area_height: usize,
    pub collection_target: u32,
    pub resource_materials: RangeInclusive<u32>,
    pub robot: RobotConfig,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            robot_count: DEFAULT_ROBOTS,
            resource_count: DEFAULT_RESOURCES,
            obstacle_count: DEFAULT_OBSTACLES,
            start_area_width: DEFAULT_START_AREA_SIZE,
            start_area_height: DEFAULT_START_AREA_SIZE,
            collection_target: COLLECTION_TARGET,
            resource_materials: RESOURCE_MATERIALS,
            robot: RobotConfig::default(),
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.robot.validate()?;
        if self.robot_count == 0 {
            return Err(ConfigError::NoRobots);
        }
        if self.start_area_width == 0
            || self.start_area_height == 0
            || self.start_area_width > self.width
            || self.start_area_height > self.height
        {
            return Err(ConfigError::StartAreaTooLarge {
                area_width: self.start_area_width,
                area_height: self.start_area_height,
                width: self.width,
                height: self.height,
            });
        }
        if self.collection_target == 0 {
            return Err(ConfigError::ZeroTarget);
        }
        let (min, max) = (*self.resource_materials.start(), *self.resource_materials.end());
        if min == 0 || min > max {
            return Err(ConfigError::MaterialsRange { min, max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_oversized_start_area() {
        let config = SimulationConfig {
            width: 4,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartAreaTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_materials_range() {
        let config = SimulationConfig {
            resource_materials: 0..=3,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MaterialsRange { min: 0, max: 3 })
        );
    }
}
