//! Error types for the Ledgersync system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Access denied: {0}")]
    AccessDenied(#[from] AccessError),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Authorization failures surfaced to callers as values, never as panics.
///
/// `TenantMismatch` is raised by handlers via the tenant isolation guard;
/// the other three come from the request-context guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("no tenant associated with this account")]
    NoTenant,

    #[error("insufficient permission")]
    InsufficientPermission,

    #[error("tenant mismatch")]
    TenantMismatch,
}

pub type CoreResult<T> = Result<T, CoreError>;
