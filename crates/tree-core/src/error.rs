use thiserror::Error;

/// Reasons a detected hand cannot be turned into gesture signals.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    #[error("hand has {available} landmarks, landmark {index} is required")]
    MissingLandmark { index: usize, available: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },
}

/// Rejected scene configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle count must be at least 1")]
    NoParticles,
    #[error("{field} must be finite and positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}
