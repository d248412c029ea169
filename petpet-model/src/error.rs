use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug)]
pub enum ModelError {
    /// A required field was missing or empty.
    MissingField(&'static str),
    /// A field was present but failed validation.
    InvalidField { field: &'static str, reason: String },
    /// An identifier could not be parsed.
    InvalidId(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::MissingField(field) => {
                write!(f, "{field} is a required field")
            }
            ModelError::InvalidField { field, reason } => {
                write!(f, "invalid {field}: {reason}")
            }
            ModelError::InvalidId(msg) => write!(f, "invalid id: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
