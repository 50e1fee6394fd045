//! Error types shared by the registries, the expression compiler and the
//! integration engine.

use thiserror::Error;

use crate::equation_engine::ExpressionError;

/// Errors raised by catalog, registry and integration operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttractorError {
    /// Bad shape, length or name handed to a contract-checked operation.
    #[error("{0}")]
    ContractViolation(String),

    #[error("{kind} {name} already registered")]
    DuplicateRegistration { kind: &'static str, name: String },

    #[error("{kind} {name} not found")]
    NotFound { kind: &'static str, name: String },

    /// Integration arguments outside their domain (`steps == 0`, `dt <= 0`).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid expression: {0}")]
    Expression(#[from] ExpressionError),
}

pub type Result<T> = std::result::Result<T, AttractorError>;

impl AttractorError {
    pub(crate) fn contract(message: impl Into<String>) -> Self {
        AttractorError::ContractViolation(message.into())
    }
}
