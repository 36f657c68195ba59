//! Per-tick planning
//!
//! Stateless over the batch observation: every robot searches its own
//! candidate neighborhood against the shared future snapshot. Other robots'
//! in-flight candidates are never considered.

use rayon::prelude::*;

use super::actions::candidate_actions;
use super::kinematics::predict_pose;
use super::scoring::{ScoreContext, ScoreWeights, score_candidate};
use super::state::{Action, ActionBatch, Observation};
use crate::config::PlannerConfig;
use crate::consts::{PARALLEL_MIN_CHUNK, PARALLEL_ROBOT_THRESHOLD};
use crate::error::{PlannerError, Result};

/// Result of one robot's search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub score: f64,
    /// Candidates that survived bounds filtering
    pub candidates: usize,
}

/// Local motion planner with tuning fixed at construction
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    parallel_threshold: usize,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            parallel_threshold: PARALLEL_ROBOT_THRESHOLD,
        })
    }

    /// Override the batch size at which robots are planned on the rayon pool
    pub fn with_parallel_threshold(mut self, robots: usize) -> Self {
        self.parallel_threshold = robots;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            forward_weight: self.config.forward_weight,
            obstacle_weight: self.config.obstacle_weight,
            agent_radius: self.config.agent_radius,
        }
    }

    /// Select one action per robot.
    ///
    /// The whole batch is validated first; a malformed observation fails
    /// without producing any actions.
    pub fn plan(&self, obs: &Observation) -> Result<ActionBatch> {
        if let Err(err) = obs.validate(self.config.max_velocity) {
            log::warn!("Rejecting observation: {err}");
            return Err(err);
        }

        let n = obs.robot_count();
        let parallel = n >= self.parallel_threshold;
        log::debug!(
            "Planning {n} robots ({})",
            if parallel { "parallel" } else { "sequential" }
        );

        let batch: ActionBatch = if parallel {
            (0..n)
                .into_par_iter()
                .with_min_len(PARALLEL_MIN_CHUNK)
                .map(|robot| self.search(obs, robot).action)
                .collect::<Vec<_>>()
                .into_iter()
                .collect()
        } else {
            (0..n).map(|robot| self.search(obs, robot).action).collect()
        };
        Ok(batch)
    }

    /// Search a single robot's candidates.
    ///
    /// Validates the observation like [`Planner::plan`]; an out-of-range
    /// `robot` is also `InvalidInput`.
    pub fn decide(&self, obs: &Observation, robot: usize) -> Result<Decision> {
        let n = obs.robot_count();
        if robot >= n {
            let err = PlannerError::input(format!("robot {robot} out of range (have {n} robots)"));
            log::warn!("Rejecting observation: {err}");
            return Err(err);
        }
        if let Err(err) = obs.validate(self.config.max_velocity) {
            log::warn!("Rejecting observation: {err}");
            return Err(err);
        }
        Ok(self.search(obs, robot))
    }

    /// Ties keep the first candidate in enumeration order. `obs` must
    /// already be validated.
    fn search(&self, obs: &Observation, robot: usize) -> Decision {
        let current = obs.current_action(robot);
        let candidates = candidate_actions(
            current,
            self.config.dt,
            self.config.max_acceleration,
            self.config.max_velocity,
        );

        let ctx = ScoreContext {
            pose_now: obs.poses[robot],
            target: obs.target_of(robot),
            future_poses: &obs.future_poses,
            robot,
            weights: self.weights(),
        };
        let tau = self.config.lookahead_time();

        let mut best = Decision {
            action: current,
            score: f64::NEG_INFINITY,
            candidates: candidates.len(),
        };
        for &candidate in &candidates {
            let predicted = predict_pose(&ctx.pose_now, candidate, self.config.agent_radius, tau);
            let score = score_candidate(&ctx, &predicted);
            if score > best.score {
                best.action = candidate;
                best.score = score;
            }
        }

        log::trace!(
            "robot {robot}: {:?} -> {:?} (score {:.4}, {} candidates)",
            current,
            best.action,
            best.score,
            best.candidates
        );
        best
    }
}
