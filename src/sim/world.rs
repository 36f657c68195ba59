//! Seeded multi-robot world
//!
//! Plays the environment around the planner: owns robot poses and the
//! actions fed back each tick, builds the future snapshot, and moves targets.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::targets::{Bounds, Target, move_targets, target_positions};
use crate::config::PlannerConfig;
use crate::consts::STRAIGHT_LINE_EPSILON;
use crate::error::{PlannerError, Result};
use crate::normalize_angle;
use crate::planner::{Action, Observation, Planner, Pose};

/// Parameters for a randomly generated world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSpec {
    pub robots: usize,
    pub targets: usize,
    pub bounds: Bounds,
    /// Target speed (units per second), direction randomized
    pub target_speed: f64,
    pub seed: u64,
}

impl Default for WorldSpec {
    fn default() -> Self {
        Self {
            robots: 8,
            targets: 4,
            bounds: Bounds::default(),
            target_speed: 0.2,
            seed: 42,
        }
    }
}

/// Diagnostics after one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub tick: u64,
    /// Smallest hull-to-hull gap between any two robots
    pub min_gap: f64,
    pub mean_target_distance: f64,
}

/// Advance a pose over `dt` along the exact differential-drive arc
pub fn integrate_pose(pose: &Pose, action: Action, agent_radius: f64, dt: f64) -> Pose {
    let v_diff = action.right - action.left;
    if v_diff.abs() < STRAIGHT_LINE_EPSILON {
        let v = 0.5 * (action.left + action.right);
        return Pose {
            x: pose.x + v * dt * pose.theta.cos(),
            y: pose.y + v * dt * pose.theta.sin(),
            theta: pose.theta,
        };
    }

    let radius = agent_radius * (action.right + action.left) / v_diff;
    let theta = pose.theta + v_diff / (2.0 * agent_radius) * dt;
    Pose {
        x: pose.x + radius * (theta.sin() - pose.theta.sin()),
        y: pose.y - radius * (theta.cos() - pose.theta.cos()),
        theta: normalize_angle(theta),
    }
}

fn check_bounds(bounds: &Bounds) -> Result<()> {
    if !bounds.min.is_finite() || !bounds.max.is_finite() {
        return Err(PlannerError::input(format!(
            "bounds must be finite, got min {} max {}",
            bounds.min, bounds.max
        )));
    }
    if !bounds.min.cmplt(bounds.max).all() {
        return Err(PlannerError::input(format!(
            "bounds min {} must be below max {}",
            bounds.min, bounds.max
        )));
    }
    Ok(())
}

/// Robots chasing bouncing targets
#[derive(Debug, Clone)]
pub struct World {
    config: PlannerConfig,
    bounds: Bounds,
    pub poses: Vec<Pose>,
    pub actions: Vec<Action>,
    pub targets: Vec<Target>,
    /// Target pursued by each robot
    pub assignments: Vec<usize>,
    pub ticks: u64,
}

impl World {
    /// World with explicit initial state; robots start at rest.
    pub fn new(
        config: PlannerConfig,
        bounds: Bounds,
        poses: Vec<Pose>,
        targets: Vec<Target>,
        assignments: Vec<usize>,
    ) -> Result<Self> {
        config.validate()?;
        check_bounds(&bounds)?;
        if assignments.len() != poses.len() {
            return Err(PlannerError::input(format!(
                "assignments has length {}, expected {} (one per robot)",
                assignments.len(),
                poses.len()
            )));
        }
        if let Some((robot, &target)) = assignments
            .iter()
            .enumerate()
            .find(|&(_, &t)| t >= targets.len())
        {
            return Err(PlannerError::input(format!(
                "robot {robot} assigned to target {target}, only {} targets",
                targets.len()
            )));
        }

        let actions = vec![Action::STOP; poses.len()];
        Ok(Self {
            config,
            bounds,
            poses,
            actions,
            targets,
            assignments,
            ticks: 0,
        })
    }

    /// Uniformly placed robots and targets; robot `i` chases target `i % targets`
    pub fn random(config: PlannerConfig, spec: &WorldSpec) -> Result<Self> {
        if spec.robots > 0 && spec.targets == 0 {
            return Err(PlannerError::input("robots need at least one target"));
        }
        check_bounds(&spec.bounds)?;

        let mut rng = Pcg32::seed_from_u64(spec.seed);
        let b = spec.bounds;
        let point = |rng: &mut Pcg32| {
            DVec2::new(
                rng.random_range(b.min.x..b.max.x),
                rng.random_range(b.min.y..b.max.y),
            )
        };

        let poses = (0..spec.robots)
            .map(|_| {
                let p = point(&mut rng);
                let theta = rng.random_range(-std::f64::consts::PI..std::f64::consts::PI);
                Pose::new(p.x, p.y, theta)
            })
            .collect();
        let targets = (0..spec.targets)
            .map(|_| {
                let p = point(&mut rng);
                let heading = rng.random_range(0.0..std::f64::consts::TAU);
                Target::new(p, DVec2::from_angle(heading) * spec.target_speed)
            })
            .collect();
        let assignments = (0..spec.robots).map(|i| i % spec.targets.max(1)).collect();

        log::info!(
            "World: {} robots, {} targets, seed {}",
            spec.robots,
            spec.targets,
            spec.seed
        );
        Self::new(config, spec.bounds, poses, targets, assignments)
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Current observation, with each robot's pose one control step ahead
    /// under its current action as the future snapshot
    pub fn observation(&self) -> Observation {
        let radius = self.config.agent_radius;
        let dt = self.config.dt;
        Observation {
            current_left: self.actions.iter().map(|a| a.left).collect(),
            current_right: self.actions.iter().map(|a| a.right).collect(),
            poses: self.poses.clone(),
            future_poses: self
                .poses
                .iter()
                .zip(&self.actions)
                .map(|(pose, &action)| integrate_pose(pose, action, radius, dt))
                .collect(),
            target_indices: self.assignments.clone(),
            targets: target_positions(&self.targets),
        }
    }

    /// Plan, drive every robot one control step, then move the targets
    pub fn step(&mut self, planner: &Planner) -> Result<StepReport> {
        let batch = planner.plan(&self.observation())?;
        let radius = self.config.agent_radius;
        let dt = self.config.dt;

        let robots = self.poses.iter_mut().zip(&mut self.actions);
        for ((pose, action), chosen) in robots.zip(batch.iter()) {
            *action = chosen;
            *pose = integrate_pose(pose, chosen, radius, dt);
        }
        move_targets(&mut self.targets, dt, &self.bounds, 1);
        self.ticks += 1;

        let report = StepReport {
            tick: self.ticks,
            min_gap: self.min_pairwise_gap(),
            mean_target_distance: self.mean_target_distance(),
        };
        log::debug!(
            "tick {}: min gap {:.3}, mean target distance {:.3}",
            report.tick,
            report.min_gap,
            report.mean_target_distance
        );
        Ok(report)
    }

    /// Smallest hull-to-hull gap; infinite with fewer than two robots
    pub fn min_pairwise_gap(&self) -> f64 {
        let diameter = 2.0 * self.config.agent_radius;
        let mut gap = f64::INFINITY;
        for (i, a) in self.poses.iter().enumerate() {
            for b in &self.poses[i + 1..] {
                gap = gap.min(a.position().distance(b.position()) - diameter);
            }
        }
        gap
    }

    /// Mean distance from each robot to its target; zero with no robots
    pub fn mean_target_distance(&self) -> f64 {
        if self.poses.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .poses
            .iter()
            .zip(&self.assignments)
            .map(|(pose, &t)| pose.distance_to(self.targets[t].position))
            .sum();
        total / self.poses.len() as f64
    }
}
