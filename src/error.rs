//! Error types and handling for the weather impact pipeline

use thiserror::Error;

/// Main error type for the weather impact pipeline
#[derive(Error, Debug)]
pub enum WeatherImpactError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Malformed report or input data
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Tabular file errors
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON (de)serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl WeatherImpactError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherImpactError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            WeatherImpactError::Api { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            WeatherImpactError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherImpactError::Parse { message } => {
                format!("Could not read data: {message}")
            }
            WeatherImpactError::Io { .. } | WeatherImpactError::Csv { .. } => {
                "File operation failed. Please check paths and file permissions.".to_string()
            }
            WeatherImpactError::Json { .. } => {
                "Could not read or write JSON data.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = WeatherImpactError::config("bad timezone");
        assert!(matches!(config_err, WeatherImpactError::Config { .. }));

        let api_err = WeatherImpactError::api("connection failed");
        assert!(matches!(api_err, WeatherImpactError::Api { .. }));

        let validation_err = WeatherImpactError::validation("invalid coordinates");
        assert!(matches!(validation_err, WeatherImpactError::Validation { .. }));

        let parse_err = WeatherImpactError::parse("short row");
        assert!(matches!(parse_err, WeatherImpactError::Parse { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = WeatherImpactError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = WeatherImpactError::api("test");
        assert!(api_err.user_message().contains("Unable to reach"));

        let validation_err = WeatherImpactError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WeatherImpactError = io_err.into();
        assert!(matches!(err, WeatherImpactError::Io { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: WeatherImpactError = json_err.into();
        assert!(matches!(err, WeatherImpactError::Json { .. }));
        assert!(err.to_string().starts_with("JSON error"));
    }
}
