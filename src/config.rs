//! Planner configuration
//!
//! Fixed for a planner's lifetime. Persisted as JSON so a harness can keep
//! tuning next to its scenario files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PlannerError, Result};

/// Planner tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    // === Robot ===
    /// Half the wheel separation; also the collision buffer radius
    pub agent_radius: f64,
    /// Control timestep (seconds)
    pub dt: f64,
    /// Wheel velocity limit, exclusive on both sides
    pub max_velocity: f64,
    /// Wheel acceleration limit (per second)
    pub max_acceleration: f64,

    // === Search ===
    /// Control steps rolled forward per candidate
    pub plan_ahead_steps: u32,

    // === Scoring ===
    /// Reward scale for closing distance to the target
    pub forward_weight: f64,
    /// Penalty scale for intruding into another robot's buffer
    pub obstacle_weight: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            agent_radius: AGENT_RADIUS,
            dt: CONTROL_DT,
            max_velocity: MAX_VELOCITY,
            max_acceleration: MAX_ACCELERATION,

            plan_ahead_steps: PLAN_AHEAD_STEPS,

            forward_weight: FORWARD_WEIGHT,
            obstacle_weight: OBSTACLE_WEIGHT,
        }
    }
}

impl PlannerConfig {
    /// Config for a robot geometry, with default search and scoring tunables
    pub fn new(agent_radius: f64, dt: f64, max_velocity: f64) -> Self {
        Self {
            agent_radius,
            dt,
            max_velocity,
            ..Self::default()
        }
    }

    pub fn with_plan_ahead_steps(mut self, steps: u32) -> Self {
        self.plan_ahead_steps = steps;
        self
    }

    pub fn with_forward_weight(mut self, weight: f64) -> Self {
        self.forward_weight = weight;
        self
    }

    pub fn with_obstacle_weight(mut self, weight: f64) -> Self {
        self.obstacle_weight = weight;
        self
    }

    pub fn with_max_acceleration(mut self, accel: f64) -> Self {
        self.max_acceleration = accel;
        self
    }

    /// Check construction preconditions, naming the first field that fails
    pub fn validate(&self) -> Result<()> {
        positive("agent_radius", self.agent_radius)?;
        positive("dt", self.dt)?;
        positive("max_velocity", self.max_velocity)?;

        if !self.max_acceleration.is_finite() || self.max_acceleration < 0.0 {
            return Err(PlannerError::config(
                "max_acceleration",
                format!("must be finite and >= 0, got {}", self.max_acceleration),
            ));
        }
        if self.plan_ahead_steps == 0 {
            return Err(PlannerError::config("plan_ahead_steps", "must be >= 1, got 0"));
        }
        finite("forward_weight", self.forward_weight)?;
        finite("obstacle_weight", self.obstacle_weight)?;
        Ok(())
    }

    /// Forward-simulation horizon used to evaluate a candidate
    #[inline]
    pub fn lookahead_time(&self) -> f64 {
        self.dt * self.plan_ahead_steps as f64
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        config.validate()?;
        log::info!("Loaded planner config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Planner config saved to {}", path.display());
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PlannerError::config(
            field,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PlannerError::config(field, format!("must be finite, got {value}")))
    }
}
