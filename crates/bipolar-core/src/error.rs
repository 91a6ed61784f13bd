//! Error types for bipolar

use thiserror::Error;

/// Main error type for bipolar
///
/// Nothing in the conversion batch itself is fatal; these errors cover the
/// surfaces around it (configuration files and reports).
#[derive(Debug, Error)]
pub enum BipolarError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<BipolarError>,
    },
}

impl BipolarError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        BipolarError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for BipolarError {
    fn from(err: toml::de::Error) -> Self {
        BipolarError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for BipolarError {
    fn from(err: toml::ser::Error) -> Self {
        BipolarError::Toml(err.to_string())
    }
}

/// Result type alias for bipolar
pub type Result<T> = std::result::Result<T, BipolarError>;
