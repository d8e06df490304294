//! Contract error types for purchases service
//!
//! These errors are transport-agnostic; the REST layer maps them to
//! problem details.

use super::model::EntityId;

/// Purchases service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PurchasesError {
    /// A new entity was submitted with an identity already set
    #[error("A new {entity} cannot already have an ID")]
    IdAlreadySet { entity: &'static str },

    /// Update or patch body carries no identity
    #[error("Invalid id")]
    IdMissing { entity: &'static str },

    /// Path identity and body identity disagree
    #[error("Invalid ID")]
    IdMismatch { entity: &'static str },

    /// Identity to update does not exist in the store
    #[error("Entity not found")]
    EntityNotFound { entity: &'static str, id: EntityId },

    /// Requested entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },

    /// Request is well formed but carries invalid values
    #[error("Validation error: {message}")]
    Validation {
        entity: Option<&'static str>,
        message: String,
    },

    /// Store failure; details are logged, never returned
    #[error("Internal error")]
    Internal,
}

impl PurchasesError {
    /// Machine-readable key for identity errors (`idexists`, `idnull`, ...)
    pub fn error_key(&self) -> Option<&'static str> {
        match self {
            Self::IdAlreadySet { .. } => Some("idexists"),
            Self::IdMissing { .. } => Some("idnull"),
            Self::IdMismatch { .. } => Some("idinvalid"),
            Self::EntityNotFound { .. } => Some("idnotfound"),
            Self::NotFound { .. } | Self::Validation { .. } | Self::Internal => None,
        }
    }

    /// Entity name the error refers to, when known
    pub fn entity(&self) -> Option<&'static str> {
        match self {
            Self::IdAlreadySet { entity }
            | Self::IdMissing { entity }
            | Self::IdMismatch { entity }
            | Self::EntityNotFound { entity, .. }
            | Self::NotFound { entity, .. } => Some(entity),
            Self::Validation { entity, .. } => *entity,
            Self::Internal => None,
        }
    }

    pub fn validation(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            entity: Some(entity),
            message: message.into(),
        }
    }
}
