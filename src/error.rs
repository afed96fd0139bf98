//! Crate error type.

use crate::validation::ValidationError;

/// Errors returned by the timetabling GA.
///
/// The loop itself cannot fail; every error is raised before the first
/// generation is built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Catalog or configuration failed validation.
    #[error("invalid configuration: {}", join(.0))]
    Configuration(Vec<ValidationError>),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::Configuration(errors)
    }
}

impl Error {
    /// The individual validation failures.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Error::Configuration(errors) => errors,
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
