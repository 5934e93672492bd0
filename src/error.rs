/// Convenience result type used across the meter engine.
pub type MeterResult<T> = Result<T, MeterError>;

/// Errors raised while building a meter.
///
/// Runtime operations (setting levels, driving frames) never fail: out of range
/// levels are clamped and frames delivered to a cancelled meter are ignored.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MeterError {
    /// Configuration rejected during validation.
    #[error("invalid meter config: {0}")]
    InvalidConfig(String),

    /// The render surface cannot be used by a meter.
    #[error("meter construction failed: {0}")]
    ConstructionFailure(String),

    /// Options could not be decoded.
    #[error("could not read meter options: {0}")]
    Options(String),
}

impl MeterError {
    /// Build a [`MeterError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build a [`MeterError::ConstructionFailure`] value.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::ConstructionFailure(msg.into())
    }
}

impl From<toml::de::Error> for MeterError {
    fn from(err: toml::de::Error) -> Self {
        Self::Options(err.to_string())
    }
}
