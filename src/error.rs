//! Error types
//!
//! Every failure here is an integration error in the caller: nothing is
//! transient and nothing is retried.

/// Errors reported by configuration and planning
#[derive(thiserror::Error, Debug)]
pub enum PlannerError {
    /// Construction-time parameter out of range
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },

    /// Per-tick observation is malformed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlannerError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        PlannerError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        PlannerError::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = PlannerError::config("agent_radius", "must be > 0, got -1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: agent_radius must be > 0, got -1"
        );

        let err = PlannerError::input("poses has length 2, expected 3");
        assert_eq!(err.to_string(), "invalid input: poses has length 2, expected 3");
    }
}
