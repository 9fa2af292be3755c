//! Error taxonomy for the drift and search core
//!
//! Every operation returns these to the caller; nothing is logged and
//! swallowed except the two documented bearing fallbacks in [`crate::geo`].

use std::fmt;

/// Errors raised by drift, search-geometry and probability computations
#[derive(Debug, Clone, PartialEq)]
pub enum SarError {
    /// Non-finite or out-of-range numeric input (negative time, NaN
    /// coordinates, negative radius or count, ...)
    InvalidInput {
        /// Name of the offending parameter
        parameter: &'static str,
        /// What was wrong with it
        message: String,
    },
    /// Longitude delta is undefined: the position is at or next to a pole
    Drift {
        /// Latitude at which the conversion was attempted
        latitude: f64,
    },
    /// Search-geometry method name not recognized
    UnsupportedMethod(String),
    /// Configuration value out of range or configuration file unreadable
    Config(String),
}

impl SarError {
    /// Shorthand for [`SarError::InvalidInput`]
    pub fn invalid(parameter: &'static str, message: impl Into<String>) -> Self {
        SarError::InvalidInput {
            parameter,
            message: message.into(),
        }
    }

    /// Stable short name of the error kind, used by the FFI layer and logs
    pub fn kind(&self) -> &'static str {
        match self {
            SarError::InvalidInput { .. } => "InvalidInput",
            SarError::Drift { .. } => "Drift",
            SarError::UnsupportedMethod(_) => "UnsupportedMethod",
            SarError::Config(_) => "Config",
        }
    }
}

impl fmt::Display for SarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SarError::InvalidInput { parameter, message } => {
                write!(f, "Invalid input '{parameter}': {message}")
            }
            SarError::Drift { latitude } => write!(
                f,
                "Undefined longitude delta near pole (latitude {latitude:.6}°)"
            ),
            SarError::UnsupportedMethod(name) => {
                write!(f, "Unsupported search method '{name}'")
            }
            SarError::Config(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SarError {}

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, SarError>;

/// Reject NaN and infinities
pub(crate) fn ensure_finite(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SarError::invalid(
            parameter,
            format!("must be finite, got {value}"),
        ))
    }
}

/// Reject NaN, infinities and negative values
pub(crate) fn ensure_non_negative(parameter: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(parameter, value)?;
    if value < 0.0 {
        return Err(SarError::invalid(
            parameter,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(value)
}

/// Reject NaN, infinities, zero and negative values
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(parameter, value)?;
    if value <= 0.0 {
        return Err(SarError::invalid(
            parameter,
            format!("must be positive, got {value}"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SarError::invalid("elapsed", "must be positive, got -1");
        assert_eq!(
            err.to_string(),
            "Invalid input 'elapsed': must be positive, got -1"
        );

        let err = SarError::Drift { latitude: 90.0 };
        assert!(err.to_string().contains("near pole"));

        let err = SarError::UnsupportedMethod("spiral".into());
        assert_eq!(err.to_string(), "Unsupported search method 'spiral'");
    }

    #[test]
    fn test_validators() {
        assert!(ensure_finite("x", f64::NAN).is_err());
        assert!(ensure_non_negative("x", -0.1).is_err());
        assert_eq!(ensure_non_negative("x", 0.0), Ok(0.0));
        assert!(ensure_positive("x", 0.0).is_err());
        assert_eq!(ensure_positive("x", 2.5), Ok(2.5));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SarError::Config("x".into()).kind(), "Config");
        assert_eq!(SarError::invalid("x", "y").kind(), "InvalidInput");
    }
}
