//! Candidate scoring
//!
//! Score = progress toward the target minus a penalty that switches on only
//! once a predicted pose comes within one agent radius of another robot's
//! hull. Cruising is governed purely by goal progress.

use glam::DVec2;

use super::state::Pose;

/// Scoring weights and geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub forward_weight: f64,
    pub obstacle_weight: f64,
    pub agent_radius: f64,
}

/// Everything fixed while one robot's candidates are ranked
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext<'a> {
    /// Acting robot's pose before moving
    pub pose_now: Pose,
    /// Assigned target position
    pub target: DVec2,
    /// Shared one-step-ahead snapshot of every robot
    pub future_poses: &'a [Pose],
    /// Acting robot's index in `future_poses`
    pub robot: usize,
    pub weights: ScoreWeights,
}

/// Gap between the predicted hull and the nearest other robot's hull.
///
/// Negative when hulls overlap; `+inf` when there are no other robots.
pub fn closest_obstacle_gap(
    predicted: DVec2,
    future_poses: &[Pose],
    robot: usize,
    agent_radius: f64,
) -> f64 {
    future_poses
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != robot)
        .map(|(_, other)| predicted.distance(other.position()) - 2.0 * agent_radius)
        .fold(f64::INFINITY, f64::min)
}

/// Linear penalty once the gap drops below one agent radius, zero otherwise
#[inline]
pub fn obstacle_cost(gap: f64, agent_radius: f64, obstacle_weight: f64) -> f64 {
    if gap < agent_radius {
        obstacle_weight * (agent_radius - gap)
    } else {
        0.0
    }
}

/// Desirability of reaching `predicted`; higher is better
pub fn score_candidate(ctx: &ScoreContext<'_>, predicted: &Pose) -> f64 {
    let w = &ctx.weights;
    let prev_dist = ctx.pose_now.distance_to(ctx.target);
    let new_dist = predicted.distance_to(ctx.target);
    let dist_score = w.forward_weight * (prev_dist - new_dist);

    let gap = closest_obstacle_gap(
        predicted.position(),
        ctx.future_poses,
        ctx.robot,
        w.agent_radius,
    );

    dist_score - obstacle_cost(gap, w.agent_radius, w.obstacle_weight)
}
