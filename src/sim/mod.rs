//! Demo harness around the planner
//!
//! Not part of the decision core: it supplies what an external environment
//! would (poses, future snapshot, target motion) so episodes can be run
//! end to end.

pub mod targets;
pub mod world;

pub use targets::{Bounds, Target, move_targets, target_positions};
pub use world::{StepReport, World, WorldSpec, integrate_pose};
