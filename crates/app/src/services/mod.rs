//! Service layer over the composition root.

pub mod admin;
pub mod cases;

pub use admin::AdminService;
pub use cases::CaseService;

use thiserror::Error;

use opi_access::DenialReason;
use opi_backend::BackendError;
use opi_core::EmailError;

/// Errors surfaced by the service layer.
///
/// Denials and pending checks are ordinary variants here, never panics:
/// the presentation layer turns them into form errors and loading
/// states.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The email/PIN pair was rejected by the remote service.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The access guard denied the operation.
    #[error("access denied: {0}")]
    AccessDenied(DenialReason),

    /// The access guard has not finished deciding (role fetch in
    /// flight). The caller should show a loading state and retry.
    #[error("access check pending")]
    AccessPending,

    /// The acting admin has no email on record to attribute a change to.
    #[error("no email on record for the acting admin")]
    MissingAdminEmail,

    /// Requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller supplied a malformed email.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A remote call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
