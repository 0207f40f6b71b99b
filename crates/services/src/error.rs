//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use vida_core::login::CpfError;
use vida_core::model::{QuestionError, SessionError};

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("CPF ou senha inválidos")]
    InvalidCredentials,
    #[error(transparent)]
    Cpf(#[from] CpfError),
    #[error(transparent)]
    Token(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while loading assessment content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error(transparent)]
    Content(#[from] QuestionError),
    #[error("failed to read question file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid question file: {0}")]
    Parse(String),
}
