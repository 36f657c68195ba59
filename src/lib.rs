//! Chasing Targets - local motion planning for differential-drive robots
//!
//! Core modules:
//! - `planner`: Per-tick decision core (kinematics, candidate actions, scoring)
//! - `config`: Planner tuning, fixed at construction
//! - `error`: Error taxonomy shared by config and planner
//! - `sim`: Demo harness (bouncing targets, seeded multi-robot world)

pub mod config;
pub mod error;
pub mod planner;
pub mod sim;

pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use planner::{Action, ActionBatch, Observation, Planner, Pose};

/// Planner configuration defaults
pub mod consts {
    /// Robot radius (half the wheel separation)
    pub const AGENT_RADIUS: f64 = 0.1;
    /// Control timestep (seconds)
    pub const CONTROL_DT: f64 = 0.1;
    /// Wheel velocity limit (exclusive)
    pub const MAX_VELOCITY: f64 = 0.5;

    /// Number of control steps rolled forward when evaluating a candidate
    pub const PLAN_AHEAD_STEPS: u32 = 10;
    /// Reward scale for closing distance to the target
    pub const FORWARD_WEIGHT: f64 = 12.0;
    /// Penalty scale for intruding into another robot's buffer
    pub const OBSTACLE_WEIGHT: f64 = 6666.0;
    /// Wheel acceleration limit (per second)
    pub const MAX_ACCELERATION: f64 = 0.4;

    /// Below this wheel speed difference the robot is treated as driving straight
    pub const STRAIGHT_LINE_EPSILON: f64 = 1e-3;

    /// Batches at least this large are planned on the rayon pool
    pub const PARALLEL_ROBOT_THRESHOLD: usize = 64;
    /// Minimum robots per rayon task
    pub const PARALLEL_MIN_CHUNK: usize = 16;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-12);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-12);
    }
}
