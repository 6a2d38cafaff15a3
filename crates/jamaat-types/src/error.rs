use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::snapshot::MosqueId;

/// Result alias used across the jamaat crates.
pub type Result<T> = std::result::Result<T, JamaatError>;

/// Collaborator data that must exist before a schedule can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dependency {
    /// The 366-day base timing table.
    BaseTimetable,
    /// The rule set bound to the mosque.
    MosqueConfig,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Dependency::BaseTimetable => "base timetable",
            Dependency::MosqueConfig => "mosque configuration",
        };
        write!(f, "{}", s)
    }
}

/// Coarse classification of a [`JamaatError`], for callers mapping errors onto
/// their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidArgument,
    MissingDependency,
    NotFound,
    Conflict,
    Internal,
}

/// Errors from jamaat operations.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JamaatError {
    /// Malformed `HH:MM`, day number out of range, malformed config field.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// No base table or no config bound to the mosque.
    #[error("Missing {dependency} for mosque {mosque_id}")]
    MissingDependency {
        mosque_id: MosqueId,
        dependency: Dependency,
    },

    /// No active snapshot to act on.
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// Already approved, or the active slot changed underneath the caller.
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Unexpected storage failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl JamaatError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument { reason: reason.into() }
    }

    pub fn missing_dependency(mosque_id: &MosqueId, dependency: Dependency) -> Self {
        Self::MissingDependency {
            mosque_id: mosque_id.clone(),
            dependency,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict { reason: reason.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            JamaatError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            JamaatError::MissingDependency { .. } => ErrorKind::MissingDependency,
            JamaatError::NotFound { .. } => ErrorKind::NotFound,
            JamaatError::Conflict { .. } => ErrorKind::Conflict,
            JamaatError::Internal(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let id = MosqueId::from("m-1");
        assert_eq!(JamaatError::invalid_argument("x").kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            JamaatError::missing_dependency(&id, Dependency::MosqueConfig).kind(),
            ErrorKind::MissingDependency
        );
        assert_eq!(JamaatError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(JamaatError::conflict("x").kind(), ErrorKind::Conflict);
        assert_eq!(JamaatError::internal("x").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_missing_dependency_message() {
        let err = JamaatError::missing_dependency(&MosqueId::from("m-7"), Dependency::BaseTimetable);
        assert_eq!(err.to_string(), "Missing base timetable for mosque m-7");
    }
}
