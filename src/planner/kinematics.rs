//! Differential-drive forward prediction
//!
//! A single-step extrapolation over the whole horizon using the
//! instantaneous curvature of the wheel command. Not an integrator: it is
//! evaluated for every candidate of every robot on every tick.

use super::state::{Action, Pose};
use crate::consts::STRAIGHT_LINE_EPSILON;

/// Predict the pose reached after `tau` seconds under `action`.
///
/// `agent_radius` is the half-axle length and must be > 0. Wheel speed
/// differences below `STRAIGHT_LINE_EPSILON` take the straight-line branch
/// so the arc radius never divides by a near-zero difference.
pub fn predict_pose(pose: &Pose, action: Action, agent_radius: f64, tau: f64) -> Pose {
    let v_diff = action.right - action.left;

    let (dx, dy, theta) = if v_diff.abs() < STRAIGHT_LINE_EPSILON {
        (
            action.left * pose.theta.cos(),
            action.left * pose.theta.sin(),
            pose.theta,
        )
    } else {
        let radius = agent_radius * (action.right + action.left) / v_diff;
        let new_theta = pose.theta + v_diff / (2.0 * agent_radius);
        (
            radius * (new_theta.sin() - pose.theta.sin()),
            -radius * (new_theta.cos() - pose.theta.cos()),
            new_theta,
        )
    };

    Pose {
        x: pose.x + tau * dx,
        y: pose.y + tau * dy,
        theta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn test_arc_matches_closed_form() {
        // vL = 0, vR = 1, r = 0.5: R = 0.5, theta' = 1
        let pose = Pose::new(0.0, 0.0, 0.0);
        let predicted = predict_pose(&pose, Action::new(0.0, 1.0), 0.5, 1.0);

        let radius = 0.5;
        let expected_x = radius * (1.0f64.sin() - 0.0f64.sin());
        let expected_y = -radius * (1.0f64.cos() - 0.0f64.cos());
        assert!((predicted.x - expected_x).abs() < 1e-6);
        assert!((predicted.y - expected_y).abs() < 1e-6);
        assert!((predicted.theta - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_straight_line_along_heading() {
        let pose = Pose::new(1.0, 2.0, PI / 2.0);
        let predicted = predict_pose(&pose, Action::new(0.3, 0.3), 0.1, 2.0);
        assert!((predicted.x - 1.0).abs() < 1e-12);
        assert!((predicted.y - 2.6).abs() < 1e-12);
        assert_eq!(predicted.theta, pose.theta);
    }

    #[test]
    fn test_near_equal_wheels_take_straight_branch() {
        // Difference below the threshold: speed of the left wheel, no turn
        let pose = Pose::new(0.0, 0.0, 0.0);
        let predicted = predict_pose(&pose, Action::new(0.2, 0.2005), 0.1, 1.0);
        assert_eq!(predicted.theta, 0.0);
        assert!((predicted.x - 0.2).abs() < 1e-12);
        assert_eq!(predicted.y, 0.0);
    }

    #[test]
    fn test_spin_in_place_stays_put() {
        let pose = Pose::new(0.5, -0.5, 0.3);
        let predicted = predict_pose(&pose, Action::new(-0.2, 0.2), 0.1, 1.0);
        assert!((predicted.x - pose.x).abs() < 1e-12);
        assert!((predicted.y - pose.y).abs() < 1e-12);
        assert!((predicted.theta - (0.3 + 2.0)).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_deterministic(
            x in -10.0f64..10.0,
            y in -10.0f64..10.0,
            theta in -PI..PI,
            left in -1.0f64..1.0,
            right in -1.0f64..1.0,
        ) {
            let pose = Pose::new(x, y, theta);
            let a = predict_pose(&pose, Action::new(left, right), 0.1, 1.0);
            let b = predict_pose(&pose, Action::new(left, right), 0.1, 1.0);
            prop_assert_eq!(a.x.to_bits(), b.x.to_bits());
            prop_assert_eq!(a.y.to_bits(), b.y.to_bits());
            prop_assert_eq!(a.theta.to_bits(), b.theta.to_bits());
        }

        #[test]
        fn prop_equal_wheels_move_along_heading(
            theta in -PI..PI,
            v in -1.0f64..1.0,
            tau in 0.01f64..5.0,
        ) {
            let pose = Pose::new(0.0, 0.0, theta);
            let predicted = predict_pose(&pose, Action::new(v, v), 0.1, tau);
            prop_assert_eq!(predicted.theta, theta);
            prop_assert!((predicted.x - v * tau * theta.cos()).abs() < 1e-9);
            prop_assert!((predicted.y - v * tau * theta.sin()).abs() < 1e-9);
        }
    }
}
