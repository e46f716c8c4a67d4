//! Core types for OPI Paranormal.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod principal;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use principal::{Principal, PrincipalError};
pub use role::UserRole;
pub use status::CaseStatus;
