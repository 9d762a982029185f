//! Error types for the public library API.

use thiserror::Error;

use crate::spreading::{CategoryKind, StatementKind};

#[derive(Debug, Error)]
pub enum LoanDeskError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {source_name}: {error}")]
    Json {
        source_name: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Loan catalog is empty")]
    EmptyCatalog,

    #[error("Unknown loan application: {0}")]
    UnknownApplication(String),
}

/// Addressing errors raised by worksheet updates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpreadingError {
    #[error("{category} is not part of the {statement}")]
    CategoryNotInStatement {
        statement: StatementKind,
        category: CategoryKind,
    },

    #[error("Unknown line item '{item}' in {category}")]
    UnknownLineItem { category: CategoryKind, item: String },

    #[error("Period index {0} is out of range")]
    PeriodOutOfRange(usize),

    #[error("Unknown statement: {0}")]
    UnknownStatement(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, LoanDeskError>;
