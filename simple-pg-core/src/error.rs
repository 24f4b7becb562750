//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum PgError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// The observation space of the environment is not a continuous vector space.
    #[error("This example only works for envs with continuous state spaces, got {0}")]
    UnsupportedObservationSpace(String),

    /// The action space of the environment is not a finite discrete set.
    #[error("This example only works for envs with discrete action spaces, got {0}")]
    UnsupportedActionSpace(String),

    /// An optimization step was requested with a batch having no steps.
    #[error("Empty batch")]
    EmptyBatch,

    /// Action probabilities could not be used for sampling.
    #[error("Invalid action probabilities: {0}")]
    InvalidProbabilities(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_space_messages() {
        let err = PgError::UnsupportedObservationSpace("Discrete(16)".to_string());
        assert_eq!(
            err.to_string(),
            "This example only works for envs with continuous state spaces, got Discrete(16)"
        );

        let err = PgError::UnsupportedActionSpace("Box(-2.0, 2.0, (1,), float32)".to_string());
        assert_eq!(
            err.to_string(),
            "This example only works for envs with discrete action spaces, got Box(-2.0, 2.0, (1,), float32)"
        );
    }

    #[test]
    fn test_space_errors_survive_anyhow() {
        let err: anyhow::Error = PgError::UnsupportedActionSpace("Box".to_string()).into();
        assert!(matches!(
            err.downcast_ref::<PgError>(),
            Some(PgError::UnsupportedActionSpace(_))
        ));
    }
}
