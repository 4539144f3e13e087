//! Error types for the settings system

use thiserror::Error;

/// Errors that can occur when working with settings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingError {
    /// Invalid value for the setting
    #[error("Invalid value for setting '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl SettingError {
    /// Create an invalid value error for a named field
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        SettingError::InvalidValue {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
