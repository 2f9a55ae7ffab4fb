//! Error types shared across the marketplace services and stores.

use thiserror::Error;

/// Result type alias for marketplace operations.
pub type Result<T> = std::result::Result<T, StudioError>;

/// Error taxonomy for the marketplace.
///
/// Variants map one-to-one onto the HTTP statuses the web layer emits:
/// validation failures become 400, missing entities 404, credential
/// failures 401, ownership violations 403, and store failures 500.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StudioError {
    /// Missing or invalid input, including duplicate-constraint violations.
    #[error("{0}")]
    Validation(String),

    /// The referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Credentials did not match.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The caller is not allowed to perform this action on this entity.
    #[error("{0}")]
    Forbidden(String),

    /// The underlying store failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Unexpected internal failure (poisoned lock, broken invariant).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StudioError {
    /// Shorthand for a [`StudioError::Validation`] with a formatted message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Relabel a [`StudioError::NotFound`] with the entity the caller
    /// looked up; any other variant passes through unchanged, so store
    /// failures keep surfacing as store failures.
    #[must_use]
    pub fn not_found_as(self, entity: &'static str) -> Self {
        match self {
            Self::NotFound(_) => Self::NotFound(entity),
            other => other,
        }
    }

    /// Returns `true` if this error is caused by bad client input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::InvalidCredentials | Self::Forbidden(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StudioError::NotFound("Photographer");
        assert_eq!(err.to_string(), "Photographer not found");
    }

    #[test]
    fn test_not_found_relabel_passes_store_failures_through() {
        let relabeled = StudioError::NotFound("User").not_found_as("Client");
        assert_eq!(relabeled, StudioError::NotFound("Client"));

        let outage = StudioError::Database("boom".to_string()).not_found_as("Client");
        assert_eq!(outage, StudioError::Database("boom".to_string()));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(StudioError::validation("Missing required fields").is_client_error());
        assert!(StudioError::InvalidCredentials.is_client_error());
        assert!(!StudioError::Database("boom".to_string()).is_client_error());
    }
}
