//! Error types for the Dialogflow platform

use thiserror::Error;

/// Result type alias for Dialogflow builds
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or reverse-building a Dialogflow agent
#[derive(Error, Debug)]
pub enum Error {
    /// A slot references a custom type that is not defined in `inputTypes`
    #[error("Input type \"{type_name}\" of input \"{input}\" in intent \"{intent}\" must be defined in inputTypes")]
    UnresolvedType {
        intent: String,
        input: String,
        type_name: String,
    },

    /// A custom type is referenced but the model has no `inputTypes` at all
    #[error("Input type \"{type_name}\" must be defined in inputTypes, but the model has no inputTypes")]
    MissingInputTypes { type_name: String },

    /// A platform-specific input type lacks the `dialogflow` key
    #[error("Please add a dialogflow property for input \"{input}\" in intent \"{intent}\"")]
    MissingPlatformMapping { intent: String, input: String },

    /// An input has no usable type at all
    #[error("Invalid input type for input \"{input}\" in intent \"{intent}\"")]
    InvalidInputType { intent: String, input: String },

    /// No invocation name for the Dialogflow platform
    #[error("Can't find invocation name for locale {locale}")]
    MissingInvocation { locale: String },

    /// Native file content that cannot be used
    #[error("Invalid Dialogflow data in {source_name}: {message}")]
    InvalidNative {
        source_name: String,
        message: String,
    },

    /// Error from vocalis-core (config, model loading, locales)
    #[error(transparent)]
    Core(#[from] vocalis_core::Error),

    /// JSON parsing or serialization error
    #[error("JSON error in {path}: {source}")]
    JsonFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON conversion error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unresolved type error
    pub fn unresolved_type(
        intent: impl Into<String>,
        input: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::UnresolvedType {
            intent: intent.into(),
            input: input.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a missing input types error
    pub fn missing_input_types(type_name: impl Into<String>) -> Self {
        Self::MissingInputTypes {
            type_name: type_name.into(),
        }
    }

    /// Create a missing platform mapping error
    pub fn missing_platform_mapping(intent: impl Into<String>, input: impl Into<String>) -> Self {
        Self::MissingPlatformMapping {
            intent: intent.into(),
            input: input.into(),
        }
    }

    /// Create an invalid input type error
    pub fn invalid_input_type(intent: impl Into<String>, input: impl Into<String>) -> Self {
        Self::InvalidInputType {
            intent: intent.into(),
            input: input.into(),
        }
    }

    /// Create an invalid native data error
    pub fn invalid_native(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidNative {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Attach a file path to a JSON error
    pub fn json_file(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonFile {
            path: path.into(),
            source,
        }
    }
}
