//! Error types for the mining tools
//!
//! A single error enum built with `thiserror`, shared by the race calculator,
//! the header reconstructor and the configuration layer.

use thiserror::Error;

/// Main error type for the mining tools
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed hex input
    #[error("Invalid hex in {field}: {message}")]
    InvalidHex {
        /// Name of the offending field
        field: String,
        /// Decoder message
        message: String,
    },

    /// A decoded field with the wrong shape (usually its length)
    #[error("Invalid field {field}: {message}")]
    InvalidField {
        /// Name of the offending field
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// Out-of-range numeric parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for the mining tools
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid hex error
    pub fn invalid_hex(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidHex {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Yaml(_) => "yaml",
            Error::InvalidHex { .. } => "invalid_hex",
            Error::InvalidField { .. } => "invalid_field",
            Error::InvalidParameter(_) => "invalid_parameter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("missing field");
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = Error::invalid_hex("nonce", "Odd number of digits");
        assert_eq!(err.to_string(), "Invalid hex in nonce: Odd number of digits");

        let err = Error::invalid_field("bits", "expected 4 bytes, got 3");
        assert_eq!(err.to_string(), "Invalid field bits: expected 4 bytes, got 3");
    }

    #[test]
    fn test_error_conversions() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));

        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));

        let yaml_err = serde_yaml::from_str::<u32>("[1, 2").unwrap_err();
        let err: Error = yaml_err.into();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_error_category() {
        assert_eq!(Error::invalid_parameter("p > 1").category(), "invalid_parameter");
        assert_eq!(Error::invalid_hex("time", "bad").category(), "invalid_hex");
        assert_eq!(Error::config("bad file").category(), "config");
    }
}
