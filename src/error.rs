use rusqlite::Error as RusqliteError;
use std::io;
use thiserror::Error;

use crate::query::Rule;

#[derive(Error, Debug)]
pub enum AssetListError {
    #[error("Invalid list parameter: {0}")]
    InvalidListParam(String),

    #[error("Unknown field '{field}' on '{entity}'")]
    UnknownField { field: String, entity: &'static str },

    #[error("Unsupported operator '{operator}' for {attribute_kind} attribute")]
    UnsupportedOperator {
        operator: String,
        attribute_kind: &'static str,
    },

    #[error("Invalid operand '{value}': {reason}")]
    InvalidOperand { value: String, reason: String },

    #[error("Malformed filter clause: '{0}'")]
    MalformedClause(String),

    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] RusqliteError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Filter parsing error: {0}")]
    ParsingError(#[from] Box<pest::error::Error<Rule>>),

    #[error("Error: {0}")]
    Error(String),
}

impl AssetListError {
    /// Errors caused by the caller's input rather than by storage or the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AssetListError::InvalidListParam(_)
                | AssetListError::UnknownField { .. }
                | AssetListError::UnsupportedOperator { .. }
                | AssetListError::InvalidOperand { .. }
                | AssetListError::MalformedClause(_)
                | AssetListError::InvalidScope(_)
        )
    }
}
