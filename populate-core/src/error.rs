//! Error types for random fixture generation.

use thiserror::Error;

type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for populate.
///
/// Reaching the depth ceiling is not an error: the context returns an
/// absent value instead, and containers stop filling when they see one.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// The request itself is malformed, e.g. a collection without its
    /// element type or a length hint on a date.
    #[error("{message}")]
    InvalidArgument { message: String },

    /// No generator covers the requested type.
    #[error("No random generator for {type_name}")]
    UnsupportedType { type_name: String },

    /// The descriptor does not resolve to something that can be built.
    #[error("Type {type_name} cannot be resolved to a concrete description")]
    Unresolved { type_name: String },

    /// Building or assigning a generated value failed.
    #[error("Generation failed: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Cause>,
    },

    /// The field configuration document is invalid or names unknown fields.
    #[error("Invalid field configuration: {message}")]
    InvalidConfig {
        message: String,
        #[source]
        source: Option<Cause>,
    },
}

/// Result type for populate operations.
pub type Result<T> = std::result::Result<T, PopulateError>;

impl PopulateError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PopulateError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn unsupported(type_name: impl Into<String>) -> Self {
        PopulateError::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    pub fn unresolved(type_name: impl Into<String>) -> Self {
        PopulateError::Unresolved {
            type_name: type_name.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PopulateError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying failure as an internal generation error.
    pub fn internal_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PopulateError::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        PopulateError::InvalidConfig {
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_config_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PopulateError::InvalidConfig {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// A generated value did not have the shape the target type expects.
    pub fn mismatch(expected: &str, found: &str) -> Self {
        PopulateError::internal(format!("expected a value for {expected}, found {found}"))
    }

    /// A record carried a field the target struct does not declare.
    pub fn unknown_field(type_name: &str, field: &str) -> Self {
        PopulateError::internal(format!("type {type_name} has no field `{field}`"))
    }
}
