use crate::error::ConfigError;

/// Manhattan radius inside which a robot spots a new resource.
pub const VIEW_DISTANCE: usize = 5;
/// Manhattan radius inside which a robot grabs from a resource or deposits.
pub const GRAB_DISTANCE: usize = 1;
/// Re-sampling budget for a random step (four tries per direction).
pub const RANDOM_MOVE_ATTEMPTS: usize = 4 * 4;
/// An already explored cell is rejected with probability
/// `EXPLORED_REJECT_NUMERATOR / EXPLORED_REJECT_DENOMINATOR`.
pub const EXPLORED_REJECT_NUMERATOR: u32 = 1;
pub const EXPLORED_REJECT_DENOMINATOR: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotConfig {
    pub view_distance: usize,
    pub grab_distance: usize,
    pub random_move_attempts: usize,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            view_distance: VIEW_DISTANCE,
            grab_distance: GRAB_DISTANCE,
            random_move_attempts: RANDOM_MOVE_ATTEMPTS,
        }
    }
}

impl RobotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grab_distance == 0 || self.grab_distance > self.view_distance {
            return Err(ConfigError::GrabDistance {
                grab: self.grab_distance,
                view: self.view_distance,
            });
        }
        Ok(())
    }
}
