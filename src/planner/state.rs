//! Per-tick planner inputs and outputs
//!
//! Nothing here outlives a planning call. The harness owns robot state and
//! feeds the previous tick's actions back in.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Pose of a differential-drive robot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    /// Heading (radians)
    pub theta: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.position().distance(point)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }
}

/// Wheel velocity command
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    pub left: f64,
    pub right: f64,
}

impl Action {
    pub const STOP: Action = Action::new(0.0, 0.0);

    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Both wheels strictly inside (-max_velocity, max_velocity)
    #[inline]
    pub fn within(&self, max_velocity: f64) -> bool {
        self.left > -max_velocity
            && self.left < max_velocity
            && self.right > -max_velocity
            && self.right < max_velocity
    }
}

/// Batch observation for one tick
///
/// All per-robot vectors are parallel and indexed by robot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Observation {
    /// Previous tick's left wheel velocities
    pub current_left: Vec<f64>,
    /// Previous tick's right wheel velocities
    pub current_right: Vec<f64>,
    /// Poses now
    pub poses: Vec<Pose>,
    /// One-step-ahead poses, used as the obstacle field for every candidate
    pub future_poses: Vec<Pose>,
    /// Target pursued by each robot (index into `targets`)
    pub target_indices: Vec<usize>,
    /// Target positions
    pub targets: Vec<DVec2>,
}

impl Observation {
    pub fn robot_count(&self) -> usize {
        self.poses.len()
    }

    #[inline]
    pub fn current_action(&self, robot: usize) -> Action {
        Action::new(self.current_left[robot], self.current_right[robot])
    }

    #[inline]
    pub fn target_of(&self, robot: usize) -> DVec2 {
        self.targets[self.target_indices[robot]]
    }

    /// Check shapes, index ranges and finiteness for the whole batch.
    ///
    /// Current actions must already lie inside the velocity bounds so that
    /// the no-change candidate survives.
    pub fn validate(&self, max_velocity: f64) -> Result<()> {
        let n = self.poses.len();
        for (name, len) in [
            ("current_left", self.current_left.len()),
            ("current_right", self.current_right.len()),
            ("future_poses", self.future_poses.len()),
            ("target_indices", self.target_indices.len()),
        ] {
            if len != n {
                return Err(PlannerError::input(format!(
                    "{name} has length {len}, expected {n} (one per pose)"
                )));
            }
        }

        for (j, target) in self.targets.iter().enumerate() {
            if !target.is_finite() {
                return Err(PlannerError::input(format!(
                    "target {j} position is not finite: {target}"
                )));
            }
        }

        for i in 0..n {
            let target = self.target_indices[i];
            if target >= self.targets.len() {
                return Err(PlannerError::input(format!(
                    "robot {i} target index {target} out of range (have {} targets)",
                    self.targets.len()
                )));
            }
            if !self.poses[i].is_finite() {
                return Err(PlannerError::input(format!(
                    "robot {i} pose is not finite: {:?}",
                    self.poses[i]
                )));
            }
            if !self.future_poses[i].is_finite() {
                return Err(PlannerError::input(format!(
                    "robot {i} future pose is not finite: {:?}",
                    self.future_poses[i]
                )));
            }
            let action = self.current_action(i);
            if !action.left.is_finite() || !action.right.is_finite() {
                return Err(PlannerError::input(format!(
                    "robot {i} current action is not finite: {action:?}"
                )));
            }
            if !action.within(max_velocity) {
                return Err(PlannerError::input(format!(
                    "robot {i} current action {action:?} outside (-{max_velocity}, {max_velocity})"
                )));
            }
        }
        Ok(())
    }
}

/// Selected wheel velocities, one pair per robot in observation order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionBatch {
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl ActionBatch {
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn get(&self, robot: usize) -> Option<Action> {
        Some(Action::new(*self.left.get(robot)?, *self.right.get(robot)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.left
            .iter()
            .zip(&self.right)
            .map(|(&left, &right)| Action::new(left, right))
    }
}

impl FromIterator<Action> for ActionBatch {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let (left, right) = iter.into_iter().map(|a| (a.left, a.right)).unzip();
        Self { left, right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(n: usize) -> Observation {
        Observation {
            current_left: vec![0.0; n],
            current_right: vec![0.0; n],
            poses: vec![Pose::default(); n],
            future_poses: vec![Pose::default(); n],
            target_indices: vec![0; n],
            targets: vec![DVec2::new(1.0, 0.0)],
        }
    }

    #[test]
    fn test_valid_observation() {
        assert!(observation(3).validate(0.5).is_ok());
        assert!(observation(0).validate(0.5).is_ok());
    }

    #[test]
    fn test_length_mismatch_names_array() {
        let mut obs = observation(3);
        obs.current_right.pop();
        let msg = obs.validate(0.5).unwrap_err().to_string();
        assert!(msg.contains("current_right"), "{msg}");
    }

    #[test]
    fn test_target_index_out_of_range() {
        let mut obs = observation(2);
        obs.target_indices[1] = 4;
        let msg = obs.validate(0.5).unwrap_err().to_string();
        assert!(msg.contains("robot 1 target index 4"), "{msg}");
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut obs = observation(2);
        obs.poses[0].x = f64::NAN;
        assert!(matches!(obs.validate(0.5), Err(PlannerError::InvalidInput(_))));

        let mut obs = observation(2);
        obs.current_left[1] = f64::INFINITY;
        assert!(matches!(obs.validate(0.5), Err(PlannerError::InvalidInput(_))));

        let mut obs = observation(1);
        obs.targets[0].y = f64::NAN;
        assert!(matches!(obs.validate(0.5), Err(PlannerError::InvalidInput(_))));
    }

    #[test]
    fn test_action_at_bound_rejected() {
        let mut obs = observation(1);
        obs.current_left[0] = 0.5;
        let msg = obs.validate(0.5).unwrap_err().to_string();
        assert!(msg.contains("outside"), "{msg}");
    }

    #[test]
    fn test_action_batch_collect() {
        let batch: ActionBatch = [Action::new(0.1, 0.2), Action::new(-0.3, 0.4)]
            .into_iter()
            .collect();
        assert_eq!(batch.left, vec![0.1, -0.3]);
        assert_eq!(batch.right, vec![0.2, 0.4]);
        assert_eq!(batch.get(1), Some(Action::new(-0.3, 0.4)));
        assert_eq!(batch.get(2), None);
    }
}
