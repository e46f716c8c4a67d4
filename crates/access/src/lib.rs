//! OPI Access - Admin access controller.
//!
//! Decides, for any entry into admin-only functionality, whether the
//! current caller is authorized. Two independent authority sources are
//! reconciled:
//!
//! 1. A **PIN session**: issued locally after the remote service verifies
//!    an email + PIN pair, persisted to a two-scope [`store`], and read
//!    back synchronously on every decision.
//! 2. A **remote role**: the role the identity service reports for a
//!    logged-in principal, tracked by [`role::RoleTracker`] with an
//!    explicit fetched-vs-loading distinction.
//!
//! The precedence rule lives in a single place, [`resolve_access`]: an
//! active PIN session short-circuits every remote consideration.
//!
//! # Fail-closed
//!
//! Nothing in this crate ever propagates a storage or parse fault into an
//! access decision. A fault reads as "no session" and denies access.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod controller;
pub mod guard;
pub mod role;
pub mod session;
pub mod store;

pub use controller::AccessController;
pub use guard::{AccessDecision, DenialReason, GrantSource, resolve_access};
pub use role::{RefreshHandle, RoleSource, RoleState, RoleTracker};
pub use session::{AdminSession, SESSION_KEY};
pub use store::{FileScope, MemoryScope, SessionScope, SessionStore, StoreError};
