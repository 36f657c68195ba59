//! Local motion planning core
//!
//! One decision per robot per tick. This module must stay pure:
//! - No state kept between calls
//! - Fixed candidate enumeration order (deterministic tie-break)
//! - Obstacles read from the shared future snapshot only
//! - No harness or platform dependencies

pub mod actions;
pub mod kinematics;
pub mod scoring;
pub mod state;
pub mod tick;

pub use actions::{CandidateSet, MAX_CANDIDATES, candidate_actions};
pub use kinematics::predict_pose;
pub use scoring::{ScoreContext, ScoreWeights, closest_obstacle_gap, obstacle_cost, score_candidate};
pub use state::{Action, ActionBatch, Observation, Pose};
pub use tick::{Decision, Planner};
