//! Bouncing target integrator
//!
//! Targets move in straight lines and reflect off an axis-aligned box.
//! Independent of the planner; it only feeds target positions.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned arena box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: DVec2::new(min_x, min_y),
            max: DVec2::new(max_x, max_y),
        }
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(-2.0, -2.0, 2.0, 2.0)
    }
}

/// A moving target
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Target {
    pub position: DVec2,
    pub velocity: DVec2,
}

impl Target {
    pub fn new(position: DVec2, velocity: DVec2) -> Self {
        Self { position, velocity }
    }

    /// Advance one step, reflecting off any edge crossed
    pub fn advance(&mut self, dt: f64, bounds: &Bounds) {
        self.position += self.velocity * dt;

        if self.position.x < bounds.min.x {
            self.position.x = bounds.min.x;
            self.velocity.x = -self.velocity.x;
        } else if self.position.x > bounds.max.x {
            self.position.x = bounds.max.x;
            self.velocity.x = -self.velocity.x;
        }

        if self.position.y < bounds.min.y {
            self.position.y = bounds.min.y;
            self.velocity.y = -self.velocity.y;
        } else if self.position.y > bounds.max.y {
            self.position.y = bounds.max.y;
            self.velocity.y = -self.velocity.y;
        }
    }
}

/// Advance every target `steps` times by `dt`
pub fn move_targets(targets: &mut [Target], dt: f64, bounds: &Bounds, steps: u32) {
    for _ in 0..steps {
        for target in targets.iter_mut() {
            target.advance(dt, bounds);
        }
    }
}

/// Positions in target order, as consumed by the planner
pub fn target_positions(targets: &[Target]) -> Vec<DVec2> {
    targets.iter().map(|t| t.position).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounce_off_right_edge() {
        let bounds = Bounds::new(0.0, 0.0, 4.0, 4.0);
        let mut targets = [Target::new(DVec2::new(4.0, 2.0), DVec2::new(1.0, 0.5))];
        move_targets(&mut targets, 0.1, &bounds, 1);

        assert_eq!(targets[0].position.x, 4.0);
        assert!(targets[0].velocity.x < 0.0);
        assert_eq!(targets[0].velocity.y, 0.5);
        assert!((targets[0].position.y - 2.05).abs() < 1e-12);
    }

    #[test]
    fn test_bounce_off_corner() {
        let bounds = Bounds::new(0.0, 0.0, 1.0, 1.0);
        let mut target = Target::new(DVec2::new(0.05, 0.05), DVec2::new(-1.0, -1.0));
        target.advance(0.1, &bounds);
        assert_eq!(target.position, DVec2::ZERO);
        assert_eq!(target.velocity, DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_multi_step_straight_line() {
        let bounds = Bounds::default();
        let mut targets = [Target::new(DVec2::ZERO, DVec2::new(0.1, -0.2))];
        move_targets(&mut targets, 0.5, &bounds, 4);
        assert!((targets[0].position - DVec2::new(0.2, -0.4)).length() < 1e-12);
    }

    #[test]
    fn test_positions_in_order() {
        let targets = [
            Target::new(DVec2::new(1.0, 0.0), DVec2::ZERO),
            Target::new(DVec2::new(0.0, 1.0), DVec2::ZERO),
        ];
        assert_eq!(
            target_positions(&targets),
            vec![DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)]
        );
    }

    proptest! {
        #[test]
        fn prop_targets_stay_in_bounds(
            x in -2.0f64..2.0,
            y in -2.0f64..2.0,
            vx in -3.0f64..3.0,
            vy in -3.0f64..3.0,
            steps in 1u32..50,
        ) {
            let bounds = Bounds::default();
            let mut targets = [Target::new(DVec2::new(x, y), DVec2::new(vx, vy))];
            move_targets(&mut targets, 0.1, &bounds, steps);
            prop_assert!(bounds.contains(targets[0].position));
            prop_assert_eq!(targets[0].velocity.abs(), DVec2::new(vx, vy).abs());
        }
    }
}
