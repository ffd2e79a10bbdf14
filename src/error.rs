//! Engine error taxonomy.

use thiserror::Error;

use crate::config::ConfigError;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the generation model, dispatch heuristics, and driver.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A configuration value is outside its valid domain (e.g. capacity <= 0).
    #[error("invalid configuration: {field}: {message}")]
    InvalidConfiguration {
        /// Dotted field path (e.g. `"simulation.storage_capacity_mwh"`).
        field: String,
        /// Human-readable constraint description.
        message: String,
    },

    /// A computed quantity came out NaN or infinite.
    ///
    /// Unreachable for validated, clamped inputs; seeing it is a bug.
    #[error("computation invariant violated: {quantity} = {value}")]
    ComputationInvariantViolated {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// The non-finite value.
        value: f64,
    },

    /// A deferred solver could not produce a result.
    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfiguration {
            field: e.field,
            message: e.message,
        }
    }
}

/// Returns `value` unchanged if finite, otherwise a
/// [`EngineError::ComputationInvariantViolated`] naming `quantity`.
pub fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::ComputationInvariantViolated { quantity, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(ensure_finite("cost", 12.5), Ok(12.5));
    }

    #[test]
    fn nan_is_an_invariant_violation() {
        let err = ensure_finite("efficiency", f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ComputationInvariantViolated {
                quantity: "efficiency",
                ..
            }
        ));
    }

    #[test]
    fn config_error_converts_to_invalid_configuration() {
        let err: EngineError = ConfigError {
            field: "grid.solar_capacity_mw".into(),
            message: "must be > 0".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: grid.solar_capacity_mw: must be > 0"
        );
    }
}
