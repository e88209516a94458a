use thiserror::Error;

/// Errors produced while validating domain values and feed records.
///
/// These are per-record errors: a bad record is skipped and counted by the
/// caller, never allowed to abort a whole batch.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Latitude/longitude pair is non-finite, out of range, or half-missing.
    #[error("invalid coordinate: {reason}")]
    InvalidCoordinate { reason: String },

    /// A feed record arrived without a usable document id.
    #[error("record is missing an id")]
    MissingId,
}

/// Errors from loading application configuration out of the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
