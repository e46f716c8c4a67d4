//! OPI Core - Shared types library.
//!
//! This crate provides common types used across all OPI Paranormal
//! components:
//! - `backend` - Client for the remote data/identity service
//! - `access` - Admin access controller (PIN session + remote role)
//! - `app` - Application composition root and services
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! storage access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, entity IDs, principals,
//!   roles, and case statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
