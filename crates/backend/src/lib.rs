//! OPI Backend - client for the remote data/identity service.
//!
//! # Architecture
//!
//! - The service exposes named methods over plain JSON POSTs; this crate
//!   wraps them in typed calls (`verify_admin_credentials`, `submit_case`,
//!   `get_caller_user_role`, ...)
//! - The service is the source of truth - NO local sync, direct calls
//! - In-memory caching via `moka` for list reads (5 minute TTL),
//!   invalidated explicitly by the mutations that touch them
//!
//! # Method groups
//!
//! - [`auth`] - credential verification, caller role, admin claim
//! - [`cases`] - case submission, lookup, and admin CRUD
//! - [`content`] - investigations, testimonials, team members
//! - [`profile`] - caller user profiles
//!
//! # Example
//!
//! ```rust,ignore
//! use opi_backend::{BackendClient, BackendConfig};
//!
//! let client = BackendClient::new(&config);
//!
//! // Verify an admin PIN
//! let ok = client.verify_admin_credentials(&email, &pin).await?;
//!
//! // List cases for the admin dashboard
//! let cases = client.get_all_cases().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
mod cache;
pub mod cases;
mod client;
pub mod content;
pub mod models;
pub mod profile;

pub use client::{BackendClient, BackendConfig};
pub use models::*;

use thiserror::Error;

/// Errors that can occur when calling the remote service.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Body snippet for diagnostics.
        message: String,
    },

    /// JSON parsing of the response failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited by the service.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),
}
