//! Error types shared across the calculator

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("aircraft '{0}' not found in catalog")]
    AircraftNotFound(String),

    #[error("fleet entry '{0}' not found")]
    FleetEntryNotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("fleet storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject NaN and infinities
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidArgument(format!("{} must be a finite number, got {}", name, value)))
    }
}

/// Reject zero, negative and non-finite values
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidArgument(format!("{} must be positive, got {}", name, value)))
    }
}

/// Require `min <= value <= max`
pub(crate) fn ensure_within(name: &str, value: f64, min: f64, max: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value < min || value > max {
        return Err(Error::InvalidArgument(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )));
    }
    Ok(value)
}
