//! Error types for vocalis-core

use thiserror::Error;

/// Result type alias using vocalis-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Vocalis
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No language model file for a locale
    #[error("Language model for locale '{locale}' not found at {path}")]
    ModelNotFound { locale: String, path: String },

    /// Model violates an invariant
    #[error("Invalid language model: {message}")]
    InvalidModel { message: String },

    /// Locale string that cannot be used
    #[error("Invalid locale: {locale}")]
    InvalidLocale { locale: String },

    /// No default locale configured and none could be derived
    #[error("Could not find a default locale. Try adding \"defaultLocale\" to vocalis.yaml")]
    MissingDefaultLocale,

    /// Unknown project template
    #[error("Unknown project template: {name}")]
    UnknownTemplate { name: String },

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(String),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a model not found error
    pub fn model_not_found(locale: impl Into<String>, path: impl Into<String>) -> Self {
        Self::ModelNotFound {
            locale: locale.into(),
            path: path.into(),
        }
    }

    /// Create an invalid model error
    pub fn invalid_model(message: impl Into<String>) -> Self {
        Self::InvalidModel {
            message: message.into(),
        }
    }

    /// Create an invalid locale error
    pub fn invalid_locale(locale: impl Into<String>) -> Self {
        Self::InvalidLocale {
            locale: locale.into(),
        }
    }

    /// Create an unknown template error
    pub fn unknown_template(name: impl Into<String>) -> Self {
        Self::UnknownTemplate { name: name.into() }
    }
}

impl From<tera::Error> for Error {
    fn from(err: tera::Error) -> Self {
        Self::Template(err.to_string())
    }
}
