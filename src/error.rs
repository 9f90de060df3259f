//! Error types and handling for the citycast pipeline

use thiserror::Error;

/// Main error type for the citycast library
#[derive(Error, Debug)]
pub enum CitycastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Provider communication errors, scoped to one city
    #[error("Provider error for city '{city}': {message}")]
    Provider { city: String, message: String },

    /// Payload validation errors, scoped to one city
    #[error("Validation error for city '{city}': {message}")]
    Validation { city: String, message: String },

    /// Statistics computation errors, scoped to one city
    #[error("Aggregation error for city '{city}': {message}")]
    Aggregation { city: String, message: String },

    /// Report export errors
    #[error("Export error: {message}")]
    Export { message: String },

    /// The pipeline ended with nothing to rank or export
    #[error("Empty pipeline result: {message}")]
    Empty { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl CitycastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error for one city
    pub fn provider<C: Into<String>, S: Into<String>>(city: C, message: S) -> Self {
        Self::Provider {
            city: city.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error for one city
    pub fn validation<C: Into<String>, S: Into<String>>(city: C, message: S) -> Self {
        Self::Validation {
            city: city.into(),
            message: message.into(),
        }
    }

    /// Create a new aggregation error for one city
    pub fn aggregation<C: Into<String>, S: Into<String>>(city: C, message: S) -> Self {
        Self::Aggregation {
            city: city.into(),
            message: message.into(),
        }
    }

    /// Create a new export error
    pub fn export<S: Into<String>>(message: S) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Create a new empty-result error
    pub fn empty<S: Into<String>>(message: S) -> Self {
        Self::Empty {
            message: message.into(),
        }
    }

    /// Name of the city this error is scoped to, if any
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        match self {
            CitycastError::Provider { city, .. }
            | CitycastError::Validation { city, .. }
            | CitycastError::Aggregation { city, .. } => Some(city),
            _ => None,
        }
    }
}
