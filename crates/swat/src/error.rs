//! Error types for the widget toolkit.
//!
//! These are construction and lookup failures. User-facing validation
//! problems are never errors: they are [`Message`](crate::Message)s attached
//! to the widget that raised them.

use thiserror::Error;

/// Errors raised while building, looking up or rendering a widget tree.
#[derive(Debug, Error)]
pub enum SwatError {
    /// No object with the given id is indexed.
    #[error("{kind} with id '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// Two objects in the same collection share an explicit id.
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    /// An object was added to a parent that cannot hold it.
    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A structural invariant would be violated.
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// A form method other than `post` or `get`.
    #[error("invalid form method '{0}', expected 'post' or 'get'")]
    InvalidMethod(String),

    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rows could not be converted to the table model representation.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A template used for error display failed to render.
    #[error("render error: {0}")]
    Render(String),
}

impl From<minijinja::Error> for SwatError {
    fn from(err: minijinja::Error) -> Self {
        SwatError::Render(err.to_string())
    }
}

impl From<serde_yaml::Error> for SwatError {
    fn from(err: serde_yaml::Error) -> Self {
        SwatError::Config(err.to_string())
    }
}

impl SwatError {
    /// Short machine-friendly name of the error class.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SwatError::NotFound { .. } => "not-found",
            SwatError::DuplicateId { .. } => "duplicate-id",
            SwatError::TypeMismatch { .. } => "type-mismatch",
            SwatError::Constraint(_) => "constraint",
            SwatError::InvalidMethod(_) => "invalid-method",
            SwatError::Config(_) => "config",
            SwatError::Io(_) => "io",
            SwatError::Serialization(_) => "serialization",
            SwatError::Render(_) => "render",
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        SwatError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn duplicate(kind: &'static str, id: &str) -> Self {
        SwatError::DuplicateId {
            kind,
            id: id.to_string(),
        }
    }
}

/// Result type for widget toolkit operations.
pub type Result<T> = std::result::Result<T, SwatError>;
