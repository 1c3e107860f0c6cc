//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for toolpath generation and
//! parameter validation.

use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// I/O error while writing the generated program.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::InvalidValue {
            name: "cut_depth".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'cut_depth': must be positive"
        );

        let err = ParameterError::InvalidDimensions("bit_diameter must be > 0".to_string());
        assert_eq!(err.to_string(), "Invalid dimensions: bit_diameter must be > 0");
    }

    #[test]
    fn test_error_conversion() {
        let param_err = ParameterError::InvalidDimensions("dowel_diameter".to_string());
        let cam_err: CamToolError = param_err.into();
        assert!(matches!(cam_err, CamToolError::Parameter(_)));
        assert_eq!(
            cam_err.to_string(),
            "Parameter error: Invalid dimensions: dowel_diameter"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let cam_err: CamToolError = io_err.into();
        assert!(matches!(cam_err, CamToolError::IoError(_)));
        assert_eq!(cam_err.to_string(), "I/O error: pipe closed");
    }
}
