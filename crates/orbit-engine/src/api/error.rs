use thiserror::Error;

/// Errors found while loading or validating an `EngineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field is NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    /// A field is outside its allowed range.
    #[error("{field} = {value} is out of range (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// The speed bounds are inverted.
    #[error("speed range is inverted (min {min} > max {max})")]
    SpeedRange { min: f64, max: f64 },

    /// The satellite would leave its orbital sphere.
    #[error("inclination amplitude {amplitude} exceeds orbit radius {radius}")]
    InclinationExceedsRadius { amplitude: f64, radius: f64 },
}

/// Fatal startup errors. Per-frame operations never fail.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}
